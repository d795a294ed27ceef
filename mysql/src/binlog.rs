use std::io;

use crate::cell;
use crate::constants::{
  BinlogEventType, ColumnType, BINLOG_CHECKSUM_ALG_CRC32, BINLOG_CHECKSUM_ALG_OFF, BINLOG_CHECKSUM_ALG_UNDEF,
};
use bytes::Bytes;

// v4 binlog event header: timestamp(4) type(1) server_id(4) event_size(4)
// next_log_position(4) flags(2).
pub const EVENT_FIXED_HEADER_LEN: usize = 19;

fn decode_err(msg: impl Into<String>) -> io::Error {
  io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

fn need(data: &[u8], pos: usize, len: usize, what: &str) -> io::Result<()> {
  if pos + len > data.len() {
    return Err(decode_err(format!(
      "event too short reading {}: need {} bytes at {}, have {}",
      what,
      len,
      pos,
      data.len()
    )));
  }
  Ok(())
}

fn read_lenc_uint(data: &[u8], pos: &mut usize) -> io::Result<u64> {
  need(data, *pos, 1, "length-encoded integer")?;
  let first = data[*pos];
  *pos += 1;
  let len = match first {
    0xfc => 2,
    0xfd => 3,
    0xfe => 8,
    0xff => return Err(decode_err("invalid length-encoded integer prefix 0xff")),
    x => return Ok(u64::from(x)),
  };
  need(data, *pos, len, "length-encoded integer")?;
  let v = read_uint_le(data, *pos, len);
  *pos += len;
  Ok(v)
}

fn read_uint_le(data: &[u8], pos: usize, len: usize) -> u64 {
  let mut v = 0_u64;
  for i in 0..len {
    v |= u64::from(data[pos + i]) << (8 * i);
  }
  v
}

/// Relevant data from a FORMAT_DESCRIPTION_EVENT, required to locate the body
/// of every subsequent event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinlogFormat {
  /// Version number of the binlog file format. Only version 4 is supported.
  pub format_version: u16,
  /// Server version string, e.g. "5.6.33-log".
  pub server_version: String,
  /// Size in bytes of event headers other than FORMAT_DESCRIPTION_EVENT.
  /// Almost always 19.
  pub header_length: u8,
  /// Binlog checksum algorithm id advertised by the server.
  pub checksum_algorithm: u8,
  /// Per-event-type header sizes, indexed by type code - 1.
  pub header_sizes: Vec<u8>,
}

impl BinlogFormat {
  /// True until the first FORMAT_DESCRIPTION_EVENT has been parsed.
  pub fn is_zero(&self) -> bool {
    self.format_version == 0 && self.header_length == 0
  }

  pub fn header_size(&self, typ: u8) -> u8 {
    self.header_sizes.get((typ - 1) as usize).copied().unwrap_or(0)
  }
}

/// Connection charset triple carried in a QUERY_EVENT status block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
  // @@session.character_set_client
  pub client: i32,
  // @@session.collation_connection
  pub conn: i32,
  // @@session.collation_server
  pub server: i32,
}

/// Data from a QUERY_EVENT.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
  pub database: String,
  pub charset: Option<Charset>,
  pub sql: String,
}

/// GTID payload of a MySQL 5.6 GTID_EVENT: 1 byte flags, 16 byte server SID,
/// 8 byte sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gtid {
  pub flags: u8,
  pub sid: [u8; 16],
  pub sequence: i64,
}

impl std::fmt::Display for Gtid {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (i, b) in self.sid.iter().enumerate() {
      if matches!(i, 4 | 6 | 8 | 10) {
        write!(f, "-")?;
      }
      write!(f, "{:02x}", b)?;
    }
    write!(f, ":{}", self.sequence)
  }
}

/// Fixed-size bitmap used by TABLE_MAP and rows events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitmap {
  data: Vec<u8>,
  count: usize,
}

impl Bitmap {
  /// Returns a zeroed bitmap that can hold `count` bits.
  pub fn new(count: usize) -> Self {
    Self {
      data: vec![0; (count + 7) / 8],
      count,
    }
  }

  fn parse(data: &[u8], pos: usize, count: usize) -> io::Result<(Self, usize)> {
    let byte_size = (count + 7) / 8;
    need(data, pos, byte_size, "bitmap")?;
    Ok((
      Self {
        data: data[pos..pos + byte_size].to_vec(),
        count,
      },
      pos + byte_size,
    ))
  }

  /// Number of bits in this bitmap.
  pub fn count(&self) -> usize {
    self.count
  }

  pub fn bit(&self, index: usize) -> bool {
    self.data[index / 8] & (1 << (index & 0x7)) > 0
  }

  pub fn set(&mut self, index: usize, value: bool) {
    let mask = 1 << (index & 0x7);
    if value {
      self.data[index / 8] |= mask;
    } else {
      self.data[index / 8] &= 0xff - mask;
    }
  }

  /// How many bits are set. Bits beyond `count` are ignored.
  pub fn bit_count(&self) -> usize {
    (0..self.count).filter(|i| self.bit(*i)).count()
  }

  pub fn bytes(&self) -> &[u8] {
    &self.data
  }
}

/// Data from a TABLE_MAP_EVENT.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableMap {
  pub flags: u16,
  pub database: String,
  pub name: String,
  /// Per-column MySQL types.
  pub types: Vec<ColumnType>,
  /// Bits are set for columns that can be NULL.
  pub can_be_null: Bitmap,
  /// Per-column metadata. Zero when the type carries none, the low 8 bits for
  /// one-byte metadata, all 16 bits for two-byte metadata.
  pub metadata: Vec<u16>,
}

/// Data from a {WRITE,UPDATE,DELETE}_ROWS_EVENT.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rows {
  pub flags: u16,
  /// Columns present in the before image (the WHERE side). Set for UPDATE and
  /// DELETE.
  pub identify_columns: Bitmap,
  /// Columns present in the after image (the SET side). Set for WRITE and
  /// UPDATE.
  pub data_columns: Bitmap,
  pub rows: Vec<Row>,
}

/// A single row inside a rows event. The raw byte runs are positionally
/// decoded against the TableMap through the cell codec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
  /// Which of the identify columns are NULL. Indexed by present-column
  /// ordinal, not by table column index.
  pub null_identify_columns: Bitmap,
  /// Which of the data columns are NULL.
  pub null_columns: Bitmap,
  pub identify: Vec<u8>,
  pub data: Vec<u8>,
}

/// A single event from a raw MySQL binlog dump stream.
///
/// Header accessors never fail once `is_valid` returned true. Body accessors
/// are valid only when the matching type predicate is true, and need the
/// stream's `BinlogFormat` to locate the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinlogEvent {
  data: Bytes,
}

impl BinlogEvent {
  pub fn new(data: impl Into<Bytes>) -> Self {
    Self { data: data.into() }
  }

  pub fn bytes(&self) -> &[u8] {
    &self.data
  }

  /// Checks the buffer is large enough for the fixed header and is not
  /// shorter than its own length field claims. Call this before anything
  /// else.
  pub fn is_valid(&self) -> bool {
    if self.data.len() < EVENT_FIXED_HEADER_LEN {
      return false;
    }
    let event_size = read_uint_le(&self.data, 9, 4) as usize;
    event_size >= EVENT_FIXED_HEADER_LEN && event_size <= self.data.len()
  }

  pub fn timestamp(&self) -> u32 {
    read_uint_le(&self.data, 0, 4) as u32
  }

  pub fn event_type(&self) -> u8 {
    self.data[4]
  }

  pub fn server_id(&self) -> u32 {
    read_uint_le(&self.data, 5, 4) as u32
  }

  /// Offset of the event following this one, from the event header.
  pub fn next_position(&self) -> u32 {
    read_uint_le(&self.data, 13, 4) as u32
  }

  pub fn flags(&self) -> u16 {
    read_uint_le(&self.data, 17, 2) as u16
  }

  pub fn is_format_description(&self) -> bool {
    self.event_type() == BinlogEventType::FORMAT_DESCRIPTION_EVENT as u8
  }

  pub fn is_query(&self) -> bool {
    self.event_type() == BinlogEventType::QUERY_EVENT as u8
  }

  pub fn is_xid(&self) -> bool {
    self.event_type() == BinlogEventType::XID_EVENT as u8
  }

  pub fn is_gtid(&self) -> bool {
    self.event_type() == BinlogEventType::GTID_EVENT as u8
  }

  pub fn is_rotate(&self) -> bool {
    self.event_type() == BinlogEventType::ROTATE_EVENT as u8
  }

  pub fn is_int_var(&self) -> bool {
    self.event_type() == BinlogEventType::INTVAR_EVENT as u8
  }

  pub fn is_rand(&self) -> bool {
    self.event_type() == BinlogEventType::RAND_EVENT as u8
  }

  pub fn is_previous_gtids(&self) -> bool {
    self.event_type() == BinlogEventType::PREVIOUS_GTIDS_EVENT as u8
  }

  pub fn is_rows_query(&self) -> bool {
    self.event_type() == BinlogEventType::ROWS_QUERY_EVENT as u8
  }

  pub fn is_table_map(&self) -> bool {
    self.event_type() == BinlogEventType::TABLE_MAP_EVENT as u8
  }

  pub fn is_write_rows(&self) -> bool {
    let t = self.event_type();
    t == BinlogEventType::WRITE_ROWS_EVENTV1 as u8 || t == BinlogEventType::WRITE_ROWS_EVENTV2 as u8
  }

  pub fn is_update_rows(&self) -> bool {
    let t = self.event_type();
    t == BinlogEventType::UPDATE_ROWS_EVENTV1 as u8 || t == BinlogEventType::UPDATE_ROWS_EVENTV2 as u8
  }

  pub fn is_delete_rows(&self) -> bool {
    let t = self.event_type();
    t == BinlogEventType::DELETE_ROWS_EVENTV1 as u8 || t == BinlogEventType::DELETE_ROWS_EVENTV2 as u8
  }

  /// Returns the event minus its checksum trailer, plus the checksum bytes.
  /// The checksum is stripped, never verified.
  pub fn strip_checksum(&self, f: &BinlogFormat) -> io::Result<(BinlogEvent, Bytes)> {
    match f.checksum_algorithm {
      BINLOG_CHECKSUM_ALG_OFF | BINLOG_CHECKSUM_ALG_UNDEF => Ok((self.clone(), Bytes::new())),
      BINLOG_CHECKSUM_ALG_CRC32 => {
        let len = self.data.len();
        if len < 4 {
          return Err(decode_err("event too short to carry a crc32 checksum"));
        }
        let stripped = self.data.slice(..len - 4);
        let checksum = self.data.slice(len - 4..);
        Ok((BinlogEvent::new(stripped), checksum))
      }
      alg => Err(decode_err(format!("unsupported checksum algorithm: {}", alg))),
    }
  }

  fn body<'a>(&'a self, f: &BinlogFormat) -> io::Result<&'a [u8]> {
    let offset = f.header_length as usize;
    if self.data.len() < offset {
      return Err(decode_err("event shorter than its header"));
    }
    Ok(&self.data[offset..])
  }

  /// Parses a FORMAT_DESCRIPTION_EVENT into a BinlogFormat. Valid only if
  /// `is_format_description` is true. Callable without stripping the
  /// checksum first; the trailer is accounted for here.
  pub fn format(&self) -> io::Result<BinlogFormat> {
    // The format description's own header is always the fixed 19 bytes.
    let data = &self.data[..];
    need(data, EVENT_FIXED_HEADER_LEN, 2 + 50 + 4 + 1, "format description")?;
    let body = &data[EVENT_FIXED_HEADER_LEN..];

    let format_version = read_uint_le(body, 0, 2) as u16;
    if format_version != 4 {
      return Err(decode_err(format!("unsupported binlog format version {}", format_version)));
    }
    let server_version_raw = &body[2..52];
    let end = server_version_raw.iter().position(|b| *b == 0).unwrap_or(50);
    let server_version = String::from_utf8_lossy(&server_version_raw[..end]).into_owned();
    // 4 bytes of create timestamp, ignored.
    let header_length = body[56];
    if (header_length as usize) < EVENT_FIXED_HEADER_LEN {
      return Err(decode_err(format!("invalid binlog header length {}", header_length)));
    }

    // Servers from 5.6.1 on append the checksum algorithm id and a checksum
    // of the format description event itself.
    let (checksum_algorithm, header_sizes) = if server_supports_checksum(&server_version) && body.len() >= 57 + 5 {
      (body[body.len() - 5], body[57..body.len() - 5].to_vec())
    } else {
      (BINLOG_CHECKSUM_ALG_UNDEF, body[57..].to_vec())
    };

    Ok(BinlogFormat {
      format_version,
      server_version,
      header_length,
      checksum_algorithm,
      header_sizes,
    })
  }

  /// Returns the new binlog filename and offset from a ROTATE_EVENT.
  pub fn rotate(&self, f: &BinlogFormat) -> io::Result<(String, u64)> {
    let body = self.body(f)?;
    need(body, 0, 8, "rotate offset")?;
    let offset = read_uint_le(body, 0, 8);
    let filename = String::from_utf8_lossy(&body[8..]).into_owned();
    Ok((filename, offset))
  }

  /// Returns the transaction id from an XID_EVENT.
  pub fn xid(&self, f: &BinlogFormat) -> io::Result<u64> {
    let body = self.body(f)?;
    need(body, 0, 8, "xid")?;
    Ok(read_uint_le(body, 0, 8))
  }

  /// Returns the GTID carried by a GTID_EVENT.
  pub fn gtid(&self, f: &BinlogFormat) -> io::Result<Gtid> {
    let body = self.body(f)?;
    need(body, 0, 1 + 16 + 8, "gtid")?;
    let flags = body[0];
    let mut sid = [0_u8; 16];
    sid.copy_from_slice(&body[1..17]);
    let sequence = read_uint_le(body, 17, 8) as i64;
    Ok(Gtid { flags, sid, sequence })
  }

  /// Parses a QUERY_EVENT body: fixed prefix, status variables (scanned for
  /// the charset triple), database name and SQL text.
  pub fn query(&self, f: &BinlogFormat) -> io::Result<Query> {
    let body = self.body(f)?;
    need(body, 0, 4 + 4 + 1 + 2 + 2, "query prefix")?;
    // slave proxy id and execution time are ignored.
    let db_len = body[8] as usize;
    // 2 bytes of error code, ignored.
    let status_vars_len = read_uint_le(body, 11, 2) as usize;
    let mut pos = 13;

    need(body, pos, status_vars_len, "query status variables")?;
    let status_end = pos + status_vars_len;
    let mut charset = None;
    while pos < status_end {
      let tag = body[pos];
      pos += 1;
      match tag {
        // Q_FLAGS2
        0x00 => pos += 4,
        // Q_SQL_MODE
        0x01 => pos += 8,
        // Q_CATALOG (deprecated): length, string, NUL
        0x02 => {
          need(body, pos, 1, "status catalog")?;
          pos += 1 + body[pos] as usize + 1;
        }
        // Q_AUTO_INCREMENT
        0x03 => pos += 4,
        // Q_CHARSET: client, connection and server charset ids
        0x04 => {
          need(body, pos, 6, "status charset")?;
          charset = Some(Charset {
            client: read_uint_le(body, pos, 2) as i32,
            conn: read_uint_le(body, pos + 2, 2) as i32,
            server: read_uint_le(body, pos + 4, 2) as i32,
          });
          pos += 6;
        }
        // Q_TIME_ZONE: length-prefixed string
        0x05 => {
          need(body, pos, 1, "status time zone")?;
          pos += 1 + body[pos] as usize;
        }
        // Q_CATALOG_NZ: length-prefixed string
        0x06 => {
          need(body, pos, 1, "status catalog nz")?;
          pos += 1 + body[pos] as usize;
        }
        // Q_LC_TIME_NAMES
        0x07 => pos += 2,
        // Q_CHARSET_DATABASE
        0x08 => pos += 2,
        // Q_TABLE_MAP_FOR_UPDATE
        0x09 => pos += 8,
        // Q_MASTER_DATA_WRITTEN
        0x0a => pos += 4,
        unknown => {
          // The remaining variables have no fixed width we care to model.
          log::debug!("stopping status variable scan at unknown code {:#x}", unknown);
          break;
        }
      }
    }
    let mut pos = status_end;

    need(body, pos, db_len + 1, "query database")?;
    let database = String::from_utf8_lossy(&body[pos..pos + db_len]).into_owned();
    pos += db_len + 1;

    let sql = String::from_utf8_lossy(&body[pos..]).into_owned();
    Ok(Query { database, charset, sql })
  }

  /// Returns the table id of a TABLE_MAP or rows event.
  pub fn table_id(&self, f: &BinlogFormat) -> u64 {
    let offset = f.header_length as usize;
    read_uint_le(&self.data, offset, 6)
  }

  /// Parses a TABLE_MAP_EVENT body.
  pub fn table_map(&self, f: &BinlogFormat) -> io::Result<TableMap> {
    let body = self.body(f)?;
    need(body, 0, 6 + 2 + 1, "table map prefix")?;
    let flags = read_uint_le(body, 6, 2) as u16;
    let mut pos = 8;

    let db_len = body[pos] as usize;
    pos += 1;
    need(body, pos, db_len + 1, "table map database")?;
    let database = String::from_utf8_lossy(&body[pos..pos + db_len]).into_owned();
    pos += db_len + 1;

    need(body, pos, 1, "table map name length")?;
    let name_len = body[pos] as usize;
    pos += 1;
    need(body, pos, name_len + 1, "table map name")?;
    let name = String::from_utf8_lossy(&body[pos..pos + name_len]).into_owned();
    pos += name_len + 1;

    let column_count = read_lenc_uint(body, &mut pos)? as usize;
    need(body, pos, column_count, "table map column types")?;
    let mut types = Vec::with_capacity(column_count);
    for i in 0..column_count {
      let typ = ColumnType::try_from(body[pos + i])
        .map_err(|t| decode_err(format!("unknown column type {} in table map", t)))?;
      types.push(typ);
    }
    pos += column_count;

    let metadata_len = read_lenc_uint(body, &mut pos)? as usize;
    need(body, pos, metadata_len, "table map metadata")?;
    let metadata_end = pos + metadata_len;
    let mut metadata = vec![0_u16; column_count];
    for (i, typ) in types.iter().enumerate() {
      match typ {
        // One byte of metadata, the low 8 bits.
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
        | ColumnType::MYSQL_TYPE_GEOMETRY => {
          need(body, pos, 1, "column metadata")?;
          metadata[i] = u16::from(body[pos]);
          pos += 1;
        }
        // Two bytes, little endian.
        ColumnType::MYSQL_TYPE_VARCHAR | ColumnType::MYSQL_TYPE_VAR_STRING | ColumnType::MYSQL_TYPE_BIT => {
          need(body, pos, 2, "column metadata")?;
          metadata[i] = read_uint_le(body, pos, 2) as u16;
          pos += 2;
        }
        // Two bytes, high byte first.
        ColumnType::MYSQL_TYPE_NEWDECIMAL
        | ColumnType::MYSQL_TYPE_ENUM
        | ColumnType::MYSQL_TYPE_SET
        | ColumnType::MYSQL_TYPE_STRING => {
          need(body, pos, 2, "column metadata")?;
          metadata[i] = (u16::from(body[pos]) << 8) | u16::from(body[pos + 1]);
          pos += 2;
        }
        _ => {}
      }
    }
    if pos != metadata_end {
      return Err(decode_err(format!(
        "table map metadata length mismatch: consumed {}, block is {}",
        pos - (metadata_end - metadata_len),
        metadata_len
      )));
    }

    let (can_be_null, _) = Bitmap::parse(body, pos, column_count)?;

    Ok(TableMap {
      flags,
      database,
      name,
      types,
      can_be_null,
      metadata,
    })
  }

  /// Parses a {WRITE,UPDATE,DELETE}_ROWS_EVENT body against the TableMap the
  /// stream saw for its table id.
  pub fn rows(&self, f: &BinlogFormat, tm: &TableMap) -> io::Result<Rows> {
    let typ = self.event_type();
    let has_identify = self.is_update_rows() || self.is_delete_rows();
    let has_data = self.is_write_rows() || self.is_update_rows();
    if !has_identify && !has_data {
      return Err(decode_err(format!("event type {} is not a rows event", typ)));
    }
    let is_v2 = typ >= BinlogEventType::WRITE_ROWS_EVENTV2 as u8 && typ <= BinlogEventType::DELETE_ROWS_EVENTV2 as u8;

    let body = self.body(f)?;
    need(body, 0, 6 + 2, "rows prefix")?;
    let flags = read_uint_le(body, 6, 2) as u16;
    let mut pos = 8;

    if is_v2 {
      // The length covers itself.
      need(body, pos, 2, "rows extra data length")?;
      let extra_len = read_uint_le(body, pos, 2) as usize;
      if extra_len < 2 {
        return Err(decode_err("invalid rows extra data length"));
      }
      need(body, pos, extra_len, "rows extra data")?;
      pos += extra_len;
    }

    let column_count = read_lenc_uint(body, &mut pos)? as usize;

    let mut identify_columns = Bitmap::default();
    let mut data_columns = Bitmap::default();
    if has_identify {
      let (b, next) = Bitmap::parse(body, pos, column_count)?;
      identify_columns = b;
      pos = next;
    }
    if has_data {
      let (b, next) = Bitmap::parse(body, pos, column_count)?;
      data_columns = b;
      pos = next;
    }

    let mut rows = Vec::new();
    while pos < body.len() {
      let mut row = Row::default();

      if has_identify {
        let (nulls, next) = Bitmap::parse(body, pos, identify_columns.bit_count())?;
        pos = next;
        let len = image_length(body, pos, tm, &identify_columns, &nulls)?;
        need(body, pos, len, "row identify image")?;
        row.identify = body[pos..pos + len].to_vec();
        row.null_identify_columns = nulls;
        pos += len;
      }

      if has_data {
        let (nulls, next) = Bitmap::parse(body, pos, data_columns.bit_count())?;
        pos = next;
        let len = image_length(body, pos, tm, &data_columns, &nulls)?;
        need(body, pos, len, "row data image")?;
        row.data = body[pos..pos + len].to_vec();
        row.null_columns = nulls;
        pos += len;
      }

      rows.push(row);
    }

    Ok(Rows {
      flags,
      identify_columns,
      data_columns,
      rows,
    })
  }
}

// Byte length of one row image: the concatenated cells of every present,
// non-NULL column.
fn image_length(body: &[u8], start: usize, tm: &TableMap, present: &Bitmap, nulls: &Bitmap) -> io::Result<usize> {
  let mut len = 0;
  let mut value_index = 0;
  for c in 0..present.count() {
    if !present.bit(c) {
      continue;
    }
    if nulls.bit(value_index) {
      value_index += 1;
      continue;
    }
    if c >= tm.types.len() {
      return Err(decode_err(format!(
        "rows event references column {} outside table map of {} columns",
        c,
        tm.types.len()
      )));
    }
    len += cell::cell_length(body, start + len, tm.types[c], tm.metadata[c])?;
    value_index += 1;
  }
  Ok(len)
}

// Binlog checksums exist from 5.6.1 on; older servers end the format
// description body right after the header size table.
pub(crate) fn server_supports_checksum(server_version: &str) -> bool {
  let mut parts = server_version.split('.');
  let major: u32 = match parts.next().and_then(|p| p.parse().ok()) {
    Some(v) => v,
    None => return false,
  };
  let minor: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
  let patch: u32 = parts
    .next()
    .map(|p| {
      let digits: String = p.chars().take_while(|c| c.is_ascii_digit()).collect();
      digits.parse().unwrap_or(0)
    })
    .unwrap_or(0);
  (major, minor, patch) >= (5, 6, 1)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::constants::ColumnType;
  use crate::fake::{
    new_delete_rows_event, new_format_description_event, new_mysql56_binlog_format, new_query_event, new_rotate_event,
    new_table_map_event, new_update_rows_event, new_xid_event, FakeBinlogStream,
  };

  #[test]
  fn invalid_events() {
    assert!(!BinlogEvent::new(Bytes::new()).is_valid());
    assert!(!BinlogEvent::new(Bytes::from_static(&[0_u8; 18])).is_valid());
    // Claims 100 bytes but only has 19.
    let mut buf = vec![0_u8; 19];
    buf[9] = 100;
    assert!(!BinlogEvent::new(buf).is_valid());
  }

  #[test]
  fn format_description_round_trips() {
    let f = new_mysql56_binlog_format();
    let s = FakeBinlogStream::new();

    let ev = new_format_description_event(&f, &s);
    assert!(ev.is_valid());
    assert!(ev.is_format_description());
    assert_eq!(f, ev.format().unwrap());
  }

  #[test]
  fn format_description_without_checksum() {
    let mut f = new_mysql56_binlog_format();
    f.server_version = "5.5.41-log".to_string();
    f.checksum_algorithm = BINLOG_CHECKSUM_ALG_UNDEF;
    let s = FakeBinlogStream::new();

    let ev = new_format_description_event(&f, &s);
    let got = ev.format().unwrap();
    assert_eq!(f, got);
  }

  #[test]
  fn rotate_round_trips() {
    let f = new_mysql56_binlog_format();
    let s = FakeBinlogStream::new();

    let ev = new_rotate_event(&f, &s, 456, "mysql-bin.000123");
    assert!(ev.is_valid());
    assert!(ev.is_rotate());
    let (ev, checksum) = ev.strip_checksum(&f).unwrap();
    assert_eq!(4, checksum.len());
    let (filename, offset) = ev.rotate(&f).unwrap();
    assert_eq!("mysql-bin.000123", filename);
    assert_eq!(456, offset);
  }

  #[test]
  fn query_round_trips() {
    let f = new_mysql56_binlog_format();
    let s = FakeBinlogStream::new();

    let q = Query {
      database: "my database".to_string(),
      sql: "my query".to_string(),
      charset: Some(Charset {
        client: 0x1234,
        conn: 0x5678,
        server: 0x2bcd,
      }),
    };
    let ev = new_query_event(&f, &s, q.clone());
    assert!(ev.is_valid());
    assert!(ev.is_query());
    let (ev, _) = ev.strip_checksum(&f).unwrap();
    assert_eq!(q, ev.query(&f).unwrap());
  }

  #[test]
  fn query_survives_stripping() {
    // Body accessors see the same bytes whether or not a checksum trailer
    // was there to strip.
    let s = FakeBinlogStream::new();

    let q = Query {
      database: "db".to_string(),
      sql: "COMMIT".to_string(),
      charset: None,
    };

    let with_checksum = new_mysql56_binlog_format();
    let ev = new_query_event(&with_checksum, &s, q.clone());
    let (stripped, _) = ev.strip_checksum(&with_checksum).unwrap();
    assert_eq!(q, stripped.query(&with_checksum).unwrap());

    let mut without = new_mysql56_binlog_format();
    without.checksum_algorithm = BINLOG_CHECKSUM_ALG_OFF;
    let ev = new_query_event(&without, &s, q.clone());
    let (stripped, checksum) = ev.strip_checksum(&without).unwrap();
    assert!(checksum.is_empty());
    assert_eq!(ev, stripped);
    assert_eq!(q, stripped.query(&without).unwrap());
  }

  #[test]
  fn strip_checksum_rejects_unknown_algorithm() {
    let mut f = new_mysql56_binlog_format();
    let s = FakeBinlogStream::new();
    let ev = new_xid_event(&f, &s);
    f.checksum_algorithm = 2;
    assert!(ev.strip_checksum(&f).is_err());
  }

  #[test]
  fn xid_round_trips() {
    let f = new_mysql56_binlog_format();
    let s = FakeBinlogStream::new();

    let ev = new_xid_event(&f, &s);
    assert!(ev.is_valid());
    assert!(ev.is_xid());
    let (ev, _) = ev.strip_checksum(&f).unwrap();
    assert_eq!(0x0102030405060708, ev.xid(&f).unwrap());
  }

  fn test_table_map() -> TableMap {
    let mut tm = TableMap {
      flags: 0x8090,
      database: "my_database".to_string(),
      name: "my_table".to_string(),
      types: vec![
        ColumnType::MYSQL_TYPE_LONGLONG,
        ColumnType::MYSQL_TYPE_LONGLONG,
        ColumnType::MYSQL_TYPE_LONGLONG,
        ColumnType::MYSQL_TYPE_LONGLONG,
        ColumnType::MYSQL_TYPE_LONGLONG,
        ColumnType::MYSQL_TYPE_TIME,
        ColumnType::MYSQL_TYPE_LONGLONG,
        ColumnType::MYSQL_TYPE_LONGLONG,
        ColumnType::MYSQL_TYPE_LONGLONG,
        ColumnType::MYSQL_TYPE_VARCHAR,
      ],
      can_be_null: Bitmap::new(10),
      metadata: vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 384],
    };
    tm.can_be_null.set(1, true);
    tm.can_be_null.set(2, true);
    tm.can_be_null.set(5, true);
    tm.can_be_null.set(9, true);
    tm
  }

  #[test]
  fn table_map_round_trips() {
    let f = new_mysql56_binlog_format();
    let s = FakeBinlogStream::new();
    let tm = test_table_map();

    let ev = new_table_map_event(&f, &s, 0x102030405060, &tm);
    assert!(ev.is_valid());
    assert!(ev.is_table_map());
    let (ev, _) = ev.strip_checksum(&f).unwrap();
    assert_eq!(0x102030405060, ev.table_id(&f));
    assert_eq!(tm, ev.table_map(&f).unwrap());
  }

  fn two_column_table_map() -> TableMap {
    let mut tm = TableMap {
      flags: 0x8090,
      database: "my_database".to_string(),
      name: "my_table".to_string(),
      types: vec![ColumnType::MYSQL_TYPE_LONG, ColumnType::MYSQL_TYPE_VARCHAR],
      can_be_null: Bitmap::new(2),
      metadata: vec![0, 384],
    };
    tm.can_be_null.set(1, true);
    tm
  }

  #[test]
  fn update_rows_round_trips() {
    let f = new_mysql56_binlog_format();
    let s = FakeBinlogStream::new();
    let tm = two_column_table_map();

    let mut rows = Rows {
      flags: 0x1234,
      identify_columns: Bitmap::new(2),
      data_columns: Bitmap::new(2),
      rows: vec![Row {
        null_identify_columns: Bitmap::new(2),
        null_columns: Bitmap::new(2),
        identify: vec![0x10, 0x20, 0x30, 0x40, 0x03, 0x00, b'a', b'b', b'c'],
        data: vec![0x10, 0x20, 0x30, 0x40, 0x04, 0x00, b'a', b'b', b'c', b'd'],
      }],
    };
    rows.identify_columns.set(0, true);
    rows.identify_columns.set(1, true);
    rows.data_columns.set(0, true);
    rows.data_columns.set(1, true);

    let ev = new_update_rows_event(&f, &s, 0x102030405060, &rows);
    assert!(ev.is_valid());
    assert!(ev.is_update_rows());
    let (ev, _) = ev.strip_checksum(&f).unwrap();
    assert_eq!(0x102030405060, ev.table_id(&f));
    assert_eq!(rows, ev.rows(&f, &tm).unwrap());
  }

  #[test]
  fn delete_rows_with_null_column() {
    let f = new_mysql56_binlog_format();
    let s = FakeBinlogStream::new();
    let tm = two_column_table_map();

    let mut rows = Rows {
      flags: 0x1234,
      identify_columns: Bitmap::new(2),
      data_columns: Bitmap::default(),
      rows: vec![Row {
        null_identify_columns: Bitmap::new(2),
        null_columns: Bitmap::default(),
        // Second column is NULL, so only the long is present.
        identify: vec![0x10, 0x20, 0x30, 0x40],
        data: vec![],
      }],
    };
    rows.identify_columns.set(0, true);
    rows.identify_columns.set(1, true);
    rows.rows[0].null_identify_columns.set(1, true);

    let ev = new_delete_rows_event(&f, &s, 0x102030405060, &rows);
    let (ev, _) = ev.strip_checksum(&f).unwrap();
    assert!(ev.is_delete_rows());
    assert_eq!(rows, ev.rows(&f, &tm).unwrap());
  }

  #[test]
  fn rows_event_unknown_table_width_fails() {
    let f = new_mysql56_binlog_format();
    let s = FakeBinlogStream::new();
    let tm = two_column_table_map();

    let mut rows = Rows {
      flags: 0,
      identify_columns: Bitmap::new(3),
      data_columns: Bitmap::default(),
      rows: vec![Row {
        null_identify_columns: Bitmap::new(3),
        null_columns: Bitmap::default(),
        identify: vec![0x10, 0x20, 0x30, 0x40, 0x00, 0x00],
        data: vec![],
      }],
    };
    rows.identify_columns.set(0, true);
    rows.identify_columns.set(1, true);
    rows.identify_columns.set(2, true);

    let ev = new_delete_rows_event(&f, &s, 0x102030405060, &rows);
    let (ev, _) = ev.strip_checksum(&f).unwrap();
    assert!(ev.rows(&f, &tm).is_err());
  }

  #[test]
  fn gtid_display() {
    let gtid = Gtid {
      flags: 1,
      sid: [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
      ],
      sequence: 4,
    };
    assert_eq!("00010203-0405-0607-0809-0a0b0c0d0e0f:4", gtid.to_string());
  }

  #[test]
  fn header_size_lookup() {
    let f = new_mysql56_binlog_format();
    assert_eq!(13, f.header_size(crate::constants::BinlogEventType::QUERY_EVENT as u8));
    assert_eq!(8, f.header_size(crate::constants::BinlogEventType::TABLE_MAP_EVENT as u8));
    assert!(!f.is_zero());
    assert!(BinlogFormat::default().is_zero());
  }
}
