//! Synthesized binlog events with correct headers, bodies and checksum
//! trailers. The decoder and assembler test suites are built on these; none
//! of this talks to a server.

use bytes::{BufMut, BytesMut};

use crate::binlog::{server_supports_checksum, BinlogEvent, BinlogFormat, Query, Rows, TableMap};
use crate::buf_ext::BufMutExt;
use crate::constants::{BinlogEventType, ColumnType, BINLOG_CHECKSUM_ALG_CRC32};

/// Header fields shared by every event of a synthesized stream.
#[derive(Debug, Clone)]
pub struct FakeBinlogStream {
  pub server_id: u32,
  pub log_position: u32,
  pub timestamp: u32,
}

impl FakeBinlogStream {
  pub fn new() -> Self {
    Self {
      server_id: 62344,
      log_position: 4,
      timestamp: 1407805592,
    }
  }
}

impl Default for FakeBinlogStream {
  fn default() -> Self {
    Self::new()
  }
}

/// The format a MySQL 5.6 server advertises: v4, 19-byte headers, CRC32
/// checksums, and the stock per-type header size table.
pub fn new_mysql56_binlog_format() -> BinlogFormat {
  BinlogFormat {
    format_version: 4,
    server_version: "5.6.33-0ubuntu0.14.04.1-log".to_string(),
    header_length: 19,
    checksum_algorithm: BINLOG_CHECKSUM_ALG_CRC32,
    header_sizes: vec![
      56, 13, 0, 8, 0, 18, 0, 4, 4, 4, 4, 18, 0, 0, 92, 0, 4, 26, 8, 0, 0, 0, 8, 8, 8, 2, 0, 0, 0, 10, 10, 10, 25,
      25, 0,
    ],
  }
}

pub fn new_binlog_event(f: &BinlogFormat, s: &FakeBinlogStream, typ: BinlogEventType, body: &[u8]) -> BinlogEvent {
  let checksum_len = if f.checksum_algorithm == BINLOG_CHECKSUM_ALG_CRC32 { 4 } else { 0 };
  let header_len = f.header_length as usize;
  let event_size = (header_len + body.len() + checksum_len) as u32;

  let mut b = BytesMut::with_capacity(event_size as usize);
  b.put_u32_le(s.timestamp);
  b.put_u8(typ as u8);
  b.put_u32_le(s.server_id);
  b.put_u32_le(event_size);
  b.put_u32_le(s.log_position);
  b.put_u16_le(0x01);
  b.resize(header_len, 0);
  b.put(body);
  // The checksum is fake; it is stripped and discarded, never verified.
  b.resize(header_len + body.len() + checksum_len, 0);

  BinlogEvent::new(b.freeze())
}

pub fn new_format_description_event(f: &BinlogFormat, s: &FakeBinlogStream) -> BinlogEvent {
  let mut body = BytesMut::new();
  body.put_u16_le(f.format_version);
  let mut server_version = [0_u8; 50];
  let sv = f.server_version.as_bytes();
  server_version[..sv.len()].copy_from_slice(sv);
  body.put(&server_version[..]);
  body.put_u32_le(0); // create timestamp
  body.put_u8(f.header_length);
  body.put(&f.header_sizes[..]);
  if server_supports_checksum(&f.server_version) {
    body.put_u8(f.checksum_algorithm);
  }
  new_binlog_event(f, s, BinlogEventType::FORMAT_DESCRIPTION_EVENT, &body)
}

pub fn new_rotate_event(f: &BinlogFormat, s: &FakeBinlogStream, position: u64, filename: &str) -> BinlogEvent {
  let mut body = BytesMut::new();
  body.put_u64_le(position);
  body.put(filename.as_bytes());
  new_binlog_event(f, s, BinlogEventType::ROTATE_EVENT, &body)
}

pub fn new_query_event(f: &BinlogFormat, s: &FakeBinlogStream, q: Query) -> BinlogEvent {
  let mut status_vars = BytesMut::new();
  if let Some(charset) = &q.charset {
    status_vars.put_u8(0x04);
    status_vars.put_u16_le(charset.client as u16);
    status_vars.put_u16_le(charset.conn as u16);
    status_vars.put_u16_le(charset.server as u16);
  }

  let mut body = BytesMut::new();
  body.put_u32_le(0x01); // slave proxy id
  body.put_u32_le(0x02); // execution time
  body.put_u8(q.database.len() as u8);
  body.put_u16_le(0); // error code
  body.put_u16_le(status_vars.len() as u16);
  body.put(&status_vars[..]);
  body.put(q.database.as_bytes());
  body.put_u8(0);
  body.put(q.sql.as_bytes());
  new_binlog_event(f, s, BinlogEventType::QUERY_EVENT, &body)
}

pub fn new_xid_event(f: &BinlogFormat, s: &FakeBinlogStream) -> BinlogEvent {
  let mut body = BytesMut::new();
  body.put_u64_le(0x0102030405060708);
  new_binlog_event(f, s, BinlogEventType::XID_EVENT, &body)
}

pub fn new_table_map_event(f: &BinlogFormat, s: &FakeBinlogStream, table_id: u64, tm: &TableMap) -> BinlogEvent {
  let mut metadata = BytesMut::new();
  for (i, typ) in tm.types.iter().enumerate() {
    let m = tm.metadata[i];
    match typ {
      ColumnType::MYSQL_TYPE_FLOAT
      | ColumnType::MYSQL_TYPE_DOUBLE
      | ColumnType::MYSQL_TYPE_TIMESTAMP2
      | ColumnType::MYSQL_TYPE_DATETIME2
      | ColumnType::MYSQL_TYPE_TIME2
      | ColumnType::MYSQL_TYPE_JSON
      | ColumnType::MYSQL_TYPE_TINY_BLOB
      | ColumnType::MYSQL_TYPE_MEDIUM_BLOB
      | ColumnType::MYSQL_TYPE_LONG_BLOB
      | ColumnType::MYSQL_TYPE_BLOB
      | ColumnType::MYSQL_TYPE_GEOMETRY => metadata.put_u8(m as u8),
      ColumnType::MYSQL_TYPE_VARCHAR | ColumnType::MYSQL_TYPE_VAR_STRING | ColumnType::MYSQL_TYPE_BIT => {
        metadata.put_u16_le(m)
      }
      ColumnType::MYSQL_TYPE_NEWDECIMAL
      | ColumnType::MYSQL_TYPE_ENUM
      | ColumnType::MYSQL_TYPE_SET
      | ColumnType::MYSQL_TYPE_STRING => metadata.put_u16(m),
      _ => {}
    }
  }

  let mut body = BytesMut::new();
  body.put_uint_le(table_id, 6);
  body.put_u16_le(tm.flags);
  body.put_u8(tm.database.len() as u8);
  body.put(tm.database.as_bytes());
  body.put_u8(0);
  body.put_u8(tm.name.len() as u8);
  body.put(tm.name.as_bytes());
  body.put_u8(0);
  body.mysql_put_lenc_uint(tm.types.len() as u64);
  for typ in &tm.types {
    body.put_u8(*typ as u8);
  }
  body.mysql_put_lenc_uint(metadata.len() as u64);
  body.put(&metadata[..]);
  body.put(tm.can_be_null.bytes());
  new_binlog_event(f, s, BinlogEventType::TABLE_MAP_EVENT, &body)
}

pub fn new_write_rows_event(f: &BinlogFormat, s: &FakeBinlogStream, table_id: u64, rows: &Rows) -> BinlogEvent {
  new_rows_event(f, s, BinlogEventType::WRITE_ROWS_EVENTV2, table_id, rows)
}

pub fn new_update_rows_event(f: &BinlogFormat, s: &FakeBinlogStream, table_id: u64, rows: &Rows) -> BinlogEvent {
  new_rows_event(f, s, BinlogEventType::UPDATE_ROWS_EVENTV2, table_id, rows)
}

pub fn new_delete_rows_event(f: &BinlogFormat, s: &FakeBinlogStream, table_id: u64, rows: &Rows) -> BinlogEvent {
  new_rows_event(f, s, BinlogEventType::DELETE_ROWS_EVENTV2, table_id, rows)
}

fn new_rows_event(
  f: &BinlogFormat,
  s: &FakeBinlogStream,
  typ: BinlogEventType,
  table_id: u64,
  rows: &Rows,
) -> BinlogEvent {
  let has_identify = matches!(
    typ,
    BinlogEventType::UPDATE_ROWS_EVENTV2 | BinlogEventType::DELETE_ROWS_EVENTV2
  );
  let has_data = matches!(
    typ,
    BinlogEventType::WRITE_ROWS_EVENTV2 | BinlogEventType::UPDATE_ROWS_EVENTV2
  );

  let mut body = BytesMut::new();
  body.put_uint_le(table_id, 6);
  body.put_u16_le(rows.flags);
  body.put_u16_le(2); // extra data length, nothing follows

  let column_count = if has_data {
    rows.data_columns.count()
  } else {
    rows.identify_columns.count()
  };
  body.mysql_put_lenc_uint(column_count as u64);

  if has_identify {
    body.put(rows.identify_columns.bytes());
  }
  if has_data {
    body.put(rows.data_columns.bytes());
  }

  for row in &rows.rows {
    if has_identify {
      body.put(row.null_identify_columns.bytes());
      body.put(&row.identify[..]);
    }
    if has_data {
      body.put(row.null_columns.bytes());
      body.put(&row.data[..]);
    }
  }

  new_binlog_event(f, s, typ, &body)
}
