use std::io;

use thiserror::Error;

/// Everything that can end a binlog stream, with the original cause attached
/// where one exists.
#[derive(Debug, Error)]
pub enum Error {
  /// Building the dump connection, the replication setup statement, or the
  /// dump command itself failed.
  #[error("dump connection failed: {0}")]
  Conn(#[source] io::Error),

  /// A packet read failed mid-stream.
  #[error("failed to read packet: {0}")]
  ReadPacket(#[source] io::Error),

  /// The server sent an EOF packet. End of stream, not a failure.
  #[error("stream reached EOF")]
  StreamEof,

  /// The server sent an ERR packet; carries the server's code and message.
  #[error("server error packet: {0}")]
  Protocol(#[source] io::Error),

  /// Malformed event bytes, an invalid format description, an unsupported
  /// checksum algorithm, or an invalid cell.
  #[error("failed to decode binlog event: {0}")]
  Decode(#[source] io::Error),

  /// The catalog disagrees with the TABLE_MAP about the column count.
  #[error("schema mismatch for {table}: table map has {table_map_columns} columns, catalog has {catalog_columns}")]
  SchemaMismatch {
    table: String,
    table_map_columns: usize,
    catalog_columns: usize,
  },

  /// A rows event referenced a table id no TABLE_MAP introduced.
  #[error("unknown table id {0} in rows event")]
  UnknownTable(u64),

  /// RAND, INTVAR or ROWS_QUERY: the server configuration is outside the
  /// supported envelope.
  #[error("unsupported {0} in binlog stream")]
  UnsupportedEvent(&'static str),

  /// Client-initiated shutdown. Not a failure.
  #[error("stream cancelled")]
  Cancelled,

  /// The catalog lookup itself failed.
  #[error("table lookup failed: {0}")]
  TableMapper(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The sink rejected a transaction; the stream aborts with this cause.
  #[error("sink rejected transaction: {0}")]
  Sink(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// True for the terminal conditions that are not failures to the caller.
  pub fn is_benign(&self) -> bool {
    matches!(self, Error::StreamEof | Error::Cancelled)
  }
}

#[cfg(test)]
mod test {
  use super::Error;

  #[test]
  fn benign_kinds() {
    assert!(Error::StreamEof.is_benign());
    assert!(Error::Cancelled.is_benign());
    assert!(!Error::UnknownTable(7).is_benign());
    assert!(!Error::UnsupportedEvent("RAND_EVENT").is_benign());
  }

  #[test]
  fn messages_carry_context() {
    let err = Error::SchemaMismatch {
      table: "`db`.`t`".to_string(),
      table_map_columns: 3,
      catalog_columns: 2,
    };
    let msg = err.to_string();
    assert!(msg.contains("`db`.`t`"));
    assert!(msg.contains('3'));
    assert!(msg.contains('2'));
  }
}
