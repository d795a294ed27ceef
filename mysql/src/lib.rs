pub mod binlog;
mod buf_ext;
pub mod cell;
mod conn;
pub mod constants;
mod debug;
pub mod fake;
pub mod jsonb;
mod query;
mod scramble;
mod stream;

pub use conn::{BinlogCursor, Connection, ConnectionOptions, ServerError};
pub use query::{Column, QueryResults, RowValue};
