use std::fmt;

use bitflags::bitflags;

pub const MYSQL_NATIVE_PASSWORD_PLUGIN_NAME: &str = "mysql_native_password";
pub const CACHING_SHA2_PASSWORD_PLUGIN_NAME: &str = "caching_sha2_password";
pub const MAX_PAYLOAD_LEN: usize = 16777215;

// Binlog checksum algorithm ids carried by FORMAT_DESCRIPTION_EVENT.
pub const BINLOG_CHECKSUM_ALG_OFF: u8 = 0;
pub const BINLOG_CHECKSUM_ALG_CRC32: u8 = 1;
pub const BINLOG_CHECKSUM_ALG_UNDEF: u8 = 255;

// https://dev.mysql.com/doc/dev/mysql-server/latest/group__group__cs__column__definition__flags.html
bitflags! {
  #[derive(Debug, Clone, Copy)]
  pub struct ColumnFlags: u16 {
    const NOT_NULL = 0x0001;
    const PRIMARY_KEY = 0x0002;
    const UNIQUE_KEY = 0x0004;
    const MULTIPLE_KEY = 0x0008;
    const BLOB = 0x0010;
    const UNSIGNED = 0x0020;
    const ZEROFILL = 0x0040;
    const BINARY = 0x0080;
    const ENUM = 0x0100;
    const AUTO_INCREMENT = 0x0200;
    const TIMESTAMP = 0x0400;
    const SET = 0x0800;
    const NO_DEFAULT_VALUE = 0x1000;
    const ON_UPDATE_NOW = 0x2000;
  }
}

bitflags! {
  #[derive(Debug, Clone, Copy)]
  pub struct BinlogDumpFlags: u16 {
    const NON_BLOCK = 0x0001;
  }
}

// https://dev.mysql.com/doc/dev/mysql-server/latest/group__group__cs__capabilities__flags.html
bitflags! {
  #[derive(Debug, Clone, Copy)]
  pub struct CapabilityFlags: u32 {
    const CLIENT_LONG_PASSWORD = 0x00000001;
    const CLIENT_FOUND_ROWS = 0x00000002;
    const CLIENT_LONG_FLAG = 0x00000004;
    const CLIENT_CONNECT_WITH_DB = 0x00000008;
    const CLIENT_NO_SCHEMA = 0x00000010;
    const CLIENT_COMPRESS = 0x00000020;
    const CLIENT_ODBC = 0x00000040;
    const CLIENT_LOCAL_FILES = 0x00000080;
    const CLIENT_IGNORE_SPACE = 0x00000100;
    const CLIENT_PROTOCOL_41 = 0x00000200;
    const CLIENT_INTERACTIVE = 0x00000400;
    const CLIENT_SSL = 0x00000800;
    const CLIENT_IGNORE_SIGPIPE = 0x00001000;
    const CLIENT_TRANSACTIONS = 0x00002000;
    const CLIENT_RESERVED = 0x00004000;
    const CLIENT_RESERVED2 = 0x00008000;
    const CLIENT_MULTI_STATEMENTS = 0x00010000;
    const CLIENT_MULTI_RESULTS = 0x00020000;
    const CLIENT_PS_MULTI_RESULTS = 0x00040000;
    const CLIENT_PLUGIN_AUTH = 0x00080000;
    const CLIENT_CONNECT_ATTRS = 0x00100000;
    const CLIENT_PLUGIN_AUTH_LENENC_CLIENT_DATA = 0x00200000;
    const CLIENT_CAN_HANDLE_EXPIRED_PASSWORDS = 0x00400000;
    const CLIENT_SESSION_TRACK = 0x00800000;
    const CLIENT_DEPRECATE_EOF = 0x01000000;
    const CLIENT_PROGRESS_OBSOLETE = 0x20000000;
    const CLIENT_SSL_VERIFY_SERVER_CERT = 0x40000000;
    const CLIENT_REMEMBER_OPTIONS = 0x80000000;
  }
}

bitflags! {
  #[derive(Debug, Clone, Copy)]
  pub struct StatusFlags: u16 {
    const SERVER_STATUS_IN_TRANS = 0x0001;
    const SERVER_STATUS_AUTOCOMMIT = 0x0002;
    const SERVER_MORE_RESULTS_EXISTS = 0x0008;
    const SERVER_STATUS_NO_GOOD_INDEX_USED = 0x0010;
    const SERVER_STATUS_NO_INDEX_USED = 0x0020;
    const SERVER_STATUS_CURSOR_EXISTS = 0x0040;
    const SERVER_STATUS_LAST_ROW_SENT = 0x0080;
    const SERVER_STATUS_DB_DROPPED = 0x0100;
    const SERVER_STATUS_NO_BACKSLASH_ESCAPES = 0x0200;
    const SERVER_STATUS_METADATA_CHANGED = 0x0400;
    const SERVER_QUERY_WAS_SLOW = 0x0800;
    const SERVER_PS_OUT_PARAMS = 0x1000;
    const SERVER_STATUS_IN_TRANS_READONLY = 0x2000;
    const SERVER_SESSION_STATE_CHANGED = 0x4000;
  }
}

// https://dev.mysql.com/doc/internals/en/character-set.html
#[allow(non_camel_case_types)]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterSet {
  BIG5 = 0x01,
  DEC8 = 0x03,
  CP850 = 0x04,
  HP8 = 0x06,
  KOI8R = 0x07,
  LATIN1 = 0x08,
  LATIN2 = 0x09,
  SWE7 = 0x0A,
  ASCII = 0x0B,
  UJIS = 0x0C,
  SJIS = 0x0D,
  HEBREW = 0x10,
  TIS620 = 0x12,
  EUCKR = 0x13,
  KOI8U = 0x16,
  GB2312 = 0x18,
  GREEK = 0x19,
  CP1250 = 0x1A,
  GBK = 0x1C,
  LATIN5 = 0x1E,
  ARMSCII8 = 0x20,
  UTF8 = 0x21,
  UCS2 = 0x23,
  CP866 = 0x24,
  KEYBCS2 = 0x25,
  MACCE = 0x26,
  MACROMAN = 0x27,
  CP852 = 0x28,
  LATIN7 = 0x29,
  CP1251 = 0x53,
  UTF16 = 0x36,
  UTF16LE = 0x38,
  CP1256 = 0x39,
  CP1257 = 0x3B,
  UTF32 = 0x3C,
  BINARY = 0x3F,
  GEOSTD8 = 0x5C,
  CP932 = 0x5F,
  EUCJPMS = 0x61,
  GB18030 = 0xF8,
  UTF8MB4 = 0xFF,
}

impl TryFrom<u8> for CharacterSet {
  type Error = u8;

  fn try_from(v: u8) -> Result<Self, Self::Error> {
    match v {
      0x01 => Ok(CharacterSet::BIG5),
      0x03 => Ok(CharacterSet::DEC8),
      0x04 => Ok(CharacterSet::CP850),
      0x06 => Ok(CharacterSet::HP8),
      0x07 => Ok(CharacterSet::KOI8R),
      0x08 => Ok(CharacterSet::LATIN1),
      0x09 => Ok(CharacterSet::LATIN2),
      0x0A => Ok(CharacterSet::SWE7),
      0x0B => Ok(CharacterSet::ASCII),
      0x0C => Ok(CharacterSet::UJIS),
      0x0D => Ok(CharacterSet::SJIS),
      0x10 => Ok(CharacterSet::HEBREW),
      0x12 => Ok(CharacterSet::TIS620),
      0x13 => Ok(CharacterSet::EUCKR),
      0x16 => Ok(CharacterSet::KOI8U),
      0x18 => Ok(CharacterSet::GB2312),
      0x19 => Ok(CharacterSet::GREEK),
      0x1A => Ok(CharacterSet::CP1250),
      0x1C => Ok(CharacterSet::GBK),
      0x1E => Ok(CharacterSet::LATIN5),
      0x20 => Ok(CharacterSet::ARMSCII8),
      0x21 => Ok(CharacterSet::UTF8),
      0x23 => Ok(CharacterSet::UCS2),
      0x24 => Ok(CharacterSet::CP866),
      0x25 => Ok(CharacterSet::KEYBCS2),
      0x26 => Ok(CharacterSet::MACCE),
      0x27 => Ok(CharacterSet::MACROMAN),
      0x28 => Ok(CharacterSet::CP852),
      0x29 => Ok(CharacterSet::LATIN7),
      0x53 => Ok(CharacterSet::CP1251),
      0x36 => Ok(CharacterSet::UTF16),
      0x38 => Ok(CharacterSet::UTF16LE),
      0x39 => Ok(CharacterSet::CP1256),
      0x3B => Ok(CharacterSet::CP1257),
      0x3C => Ok(CharacterSet::UTF32),
      0x3F => Ok(CharacterSet::BINARY),
      0x5C => Ok(CharacterSet::GEOSTD8),
      0x5F => Ok(CharacterSet::CP932),
      0x61 => Ok(CharacterSet::EUCJPMS),
      0xF8 => Ok(CharacterSet::GB18030),
      0xFF => Ok(CharacterSet::UTF8MB4),
      unsupported => Err(unsupported),
    }
  }
}

#[allow(non_camel_case_types)]
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
#[repr(u8)]
pub enum Command {
  COM_SLEEP = 0x00,
  COM_QUIT = 0x01,
  COM_INIT_DB = 0x02,
  COM_QUERY = 0x03,
  COM_FIELD_LIST = 0x04,
  COM_CREATE_DB = 0x05,
  COM_DROP_DB = 0x06,
  COM_REFRESH = 0x07,
  COM_SHUTDOWN = 0x08,
  COM_STATISTICS = 0x09,
  COM_PROCESS_INFO = 0x0a,
  COM_CONNECT = 0x0b,
  COM_PROCESS_KILL = 0x0c,
  COM_DEBUG = 0x0d,
  COM_PING = 0x0e,
  COM_TIME = 0x0f,
  COM_DELAYED_INSERT = 0x10,
  COM_CHANGE_USER = 0x11,
  COM_BINLOG_DUMP = 0x12,
  COM_TABLE_DUMP = 0x13,
  COM_CONNECT_OUT = 0x14,
  COM_REGISTER_SLAVE = 0x15,
  COM_STMT_PREPARE = 0x16,
  COM_STMT_EXECUTE = 0x17,
  COM_STMT_SEND_LONG_DATA = 0x18,
  COM_STMT_CLOSE = 0x19,
  COM_STMT_RESET = 0x1a,
  COM_SET_OPTION = 0x1b,
  COM_STMT_FETCH = 0x1c,
  COM_DAEMON = 0x1d,
  COM_BINLOG_DUMP_GTID = 0x1e,
  COM_RESET_CONNECTION = 0x1f,
}

/// Type of a MySQL column as carried by TABLE_MAP_EVENT and column definitions.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[repr(u8)]
pub enum ColumnType {
  MYSQL_TYPE_DECIMAL = 0x00,
  MYSQL_TYPE_TINY = 0x01,
  MYSQL_TYPE_SHORT = 0x02,
  MYSQL_TYPE_LONG = 0x03,
  MYSQL_TYPE_FLOAT = 0x04,
  MYSQL_TYPE_DOUBLE = 0x05,
  MYSQL_TYPE_NULL = 0x06,
  MYSQL_TYPE_TIMESTAMP = 0x07,
  MYSQL_TYPE_LONGLONG = 0x08,
  MYSQL_TYPE_INT24 = 0x09,
  MYSQL_TYPE_DATE = 0x0a,
  MYSQL_TYPE_TIME = 0x0b,
  MYSQL_TYPE_DATETIME = 0x0c,
  MYSQL_TYPE_YEAR = 0x0d,
  MYSQL_TYPE_NEWDATE = 0x0e,
  MYSQL_TYPE_VARCHAR = 0x0f,
  MYSQL_TYPE_BIT = 0x10,
  MYSQL_TYPE_TIMESTAMP2 = 0x11,
  MYSQL_TYPE_DATETIME2 = 0x12,
  MYSQL_TYPE_TIME2 = 0x13,
  MYSQL_TYPE_JSON = 0xf5,
  MYSQL_TYPE_NEWDECIMAL = 0xf6,
  MYSQL_TYPE_ENUM = 0xf7,
  MYSQL_TYPE_SET = 0xf8,
  MYSQL_TYPE_TINY_BLOB = 0xf9,
  MYSQL_TYPE_MEDIUM_BLOB = 0xfa,
  MYSQL_TYPE_LONG_BLOB = 0xfb,
  MYSQL_TYPE_BLOB = 0xfc,
  MYSQL_TYPE_VAR_STRING = 0xfd,
  MYSQL_TYPE_STRING = 0xfe,
  MYSQL_TYPE_GEOMETRY = 0xff,
}

impl TryFrom<u8> for ColumnType {
  type Error = u8;

  fn try_from(v: u8) -> Result<Self, Self::Error> {
    match v {
      0x00 => Ok(ColumnType::MYSQL_TYPE_DECIMAL),
      0x01 => Ok(ColumnType::MYSQL_TYPE_TINY),
      0x02 => Ok(ColumnType::MYSQL_TYPE_SHORT),
      0x03 => Ok(ColumnType::MYSQL_TYPE_LONG),
      0x04 => Ok(ColumnType::MYSQL_TYPE_FLOAT),
      0x05 => Ok(ColumnType::MYSQL_TYPE_DOUBLE),
      0x06 => Ok(ColumnType::MYSQL_TYPE_NULL),
      0x07 => Ok(ColumnType::MYSQL_TYPE_TIMESTAMP),
      0x08 => Ok(ColumnType::MYSQL_TYPE_LONGLONG),
      0x09 => Ok(ColumnType::MYSQL_TYPE_INT24),
      0x0a => Ok(ColumnType::MYSQL_TYPE_DATE),
      0x0b => Ok(ColumnType::MYSQL_TYPE_TIME),
      0x0c => Ok(ColumnType::MYSQL_TYPE_DATETIME),
      0x0d => Ok(ColumnType::MYSQL_TYPE_YEAR),
      0x0e => Ok(ColumnType::MYSQL_TYPE_NEWDATE),
      0x0f => Ok(ColumnType::MYSQL_TYPE_VARCHAR),
      0x10 => Ok(ColumnType::MYSQL_TYPE_BIT),
      0x11 => Ok(ColumnType::MYSQL_TYPE_TIMESTAMP2),
      0x12 => Ok(ColumnType::MYSQL_TYPE_DATETIME2),
      0x13 => Ok(ColumnType::MYSQL_TYPE_TIME2),
      0xf5 => Ok(ColumnType::MYSQL_TYPE_JSON),
      0xf6 => Ok(ColumnType::MYSQL_TYPE_NEWDECIMAL),
      0xf7 => Ok(ColumnType::MYSQL_TYPE_ENUM),
      0xf8 => Ok(ColumnType::MYSQL_TYPE_SET),
      0xf9 => Ok(ColumnType::MYSQL_TYPE_TINY_BLOB),
      0xfa => Ok(ColumnType::MYSQL_TYPE_MEDIUM_BLOB),
      0xfb => Ok(ColumnType::MYSQL_TYPE_LONG_BLOB),
      0xfc => Ok(ColumnType::MYSQL_TYPE_BLOB),
      0xfd => Ok(ColumnType::MYSQL_TYPE_VAR_STRING),
      0xfe => Ok(ColumnType::MYSQL_TYPE_STRING),
      0xff => Ok(ColumnType::MYSQL_TYPE_GEOMETRY),
      unsupported => Err(unsupported),
    }
  }
}

impl ColumnType {
  pub fn is_integer(&self) -> bool {
    matches!(
      self,
      ColumnType::MYSQL_TYPE_TINY
        | ColumnType::MYSQL_TYPE_SHORT
        | ColumnType::MYSQL_TYPE_INT24
        | ColumnType::MYSQL_TYPE_LONG
        | ColumnType::MYSQL_TYPE_LONGLONG
    )
  }

  pub fn is_float(&self) -> bool {
    matches!(self, ColumnType::MYSQL_TYPE_FLOAT | ColumnType::MYSQL_TYPE_DOUBLE)
  }

  pub fn is_decimal(&self) -> bool {
    matches!(self, ColumnType::MYSQL_TYPE_DECIMAL | ColumnType::MYSQL_TYPE_NEWDECIMAL)
  }

  pub fn is_timestamp(&self) -> bool {
    matches!(self, ColumnType::MYSQL_TYPE_TIMESTAMP | ColumnType::MYSQL_TYPE_TIMESTAMP2)
  }

  pub fn is_time(&self) -> bool {
    matches!(self, ColumnType::MYSQL_TYPE_TIME | ColumnType::MYSQL_TYPE_TIME2)
  }

  pub fn is_date(&self) -> bool {
    matches!(self, ColumnType::MYSQL_TYPE_DATE | ColumnType::MYSQL_TYPE_NEWDATE)
  }

  pub fn is_datetime(&self) -> bool {
    matches!(self, ColumnType::MYSQL_TYPE_DATETIME | ColumnType::MYSQL_TYPE_DATETIME2)
  }

  pub fn is_blob(&self) -> bool {
    matches!(
      self,
      ColumnType::MYSQL_TYPE_TINY_BLOB
        | ColumnType::MYSQL_TYPE_MEDIUM_BLOB
        | ColumnType::MYSQL_TYPE_LONG_BLOB
        | ColumnType::MYSQL_TYPE_BLOB
    )
  }

  pub fn is_bit(&self) -> bool {
    matches!(self, ColumnType::MYSQL_TYPE_BIT)
  }

  pub fn is_string(&self) -> bool {
    matches!(
      self,
      ColumnType::MYSQL_TYPE_VARCHAR | ColumnType::MYSQL_TYPE_VAR_STRING | ColumnType::MYSQL_TYPE_STRING
    )
  }

  pub fn is_geometry(&self) -> bool {
    matches!(self, ColumnType::MYSQL_TYPE_GEOMETRY)
  }
}

impl fmt::Display for ColumnType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      ColumnType::MYSQL_TYPE_DECIMAL => "Decimal",
      ColumnType::MYSQL_TYPE_TINY => "Tiny",
      ColumnType::MYSQL_TYPE_SHORT => "Short",
      ColumnType::MYSQL_TYPE_LONG => "Long",
      ColumnType::MYSQL_TYPE_FLOAT => "Float",
      ColumnType::MYSQL_TYPE_DOUBLE => "Double",
      ColumnType::MYSQL_TYPE_NULL => "Null",
      ColumnType::MYSQL_TYPE_TIMESTAMP => "Timestamp",
      ColumnType::MYSQL_TYPE_LONGLONG => "LongLong",
      ColumnType::MYSQL_TYPE_INT24 => "Int24",
      ColumnType::MYSQL_TYPE_DATE => "Date",
      ColumnType::MYSQL_TYPE_TIME => "Time",
      ColumnType::MYSQL_TYPE_DATETIME => "DateTime",
      ColumnType::MYSQL_TYPE_YEAR => "Year",
      ColumnType::MYSQL_TYPE_NEWDATE => "NewDate",
      ColumnType::MYSQL_TYPE_VARCHAR => "Varchar",
      ColumnType::MYSQL_TYPE_BIT => "Bit",
      ColumnType::MYSQL_TYPE_TIMESTAMP2 => "Timestamp2",
      ColumnType::MYSQL_TYPE_DATETIME2 => "DateTime2",
      ColumnType::MYSQL_TYPE_TIME2 => "Time2",
      ColumnType::MYSQL_TYPE_JSON => "JSON",
      ColumnType::MYSQL_TYPE_NEWDECIMAL => "NewDecimal",
      ColumnType::MYSQL_TYPE_ENUM => "Enum",
      ColumnType::MYSQL_TYPE_SET => "Set",
      ColumnType::MYSQL_TYPE_TINY_BLOB => "TinyBlob",
      ColumnType::MYSQL_TYPE_MEDIUM_BLOB => "MediumBlob",
      ColumnType::MYSQL_TYPE_LONG_BLOB => "LongBlob",
      ColumnType::MYSQL_TYPE_BLOB => "Blob",
      ColumnType::MYSQL_TYPE_VAR_STRING => "VarString",
      ColumnType::MYSQL_TYPE_STRING => "String",
      ColumnType::MYSQL_TYPE_GEOMETRY => "Geometry",
    };
    f.write_str(name)
  }
}

/// Binlog event type codes. The v4 header stores one of these at offset 4.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
#[repr(u8)]
pub enum BinlogEventType {
  UNKNOWN_EVENT = 0x00,
  START_EVENT_V3 = 0x01,
  QUERY_EVENT = 0x02,
  STOP_EVENT = 0x03,
  ROTATE_EVENT = 0x04,
  INTVAR_EVENT = 0x05,
  LOAD_EVENT = 0x06,
  SLAVE_EVENT = 0x07,
  CREATE_FILE_EVENT = 0x08,
  APPEND_BLOCK_EVENT = 0x09,
  EXEC_LOAD_EVENT = 0x0a,
  DELETE_FILE_EVENT = 0x0b,
  NEW_LOAD_EVENT = 0x0c,
  RAND_EVENT = 0x0d,
  USER_VAR_EVENT = 0x0e,
  FORMAT_DESCRIPTION_EVENT = 0x0f,
  XID_EVENT = 0x10,
  BEGIN_LOAD_QUERY_EVENT = 0x11,
  EXECUTE_LOAD_QUERY_EVENT = 0x12,
  TABLE_MAP_EVENT = 0x13,
  WRITE_ROWS_EVENTV0 = 0x14,
  UPDATE_ROWS_EVENTV0 = 0x15,
  DELETE_ROWS_EVENTV0 = 0x16,
  WRITE_ROWS_EVENTV1 = 0x17,
  UPDATE_ROWS_EVENTV1 = 0x18,
  DELETE_ROWS_EVENTV1 = 0x19,
  INCIDENT_EVENT = 0x1a,
  HEARTBEAT_EVENT = 0x1b,
  IGNORABLE_EVENT = 0x1c,
  ROWS_QUERY_EVENT = 0x1d,
  WRITE_ROWS_EVENTV2 = 0x1e,
  UPDATE_ROWS_EVENTV2 = 0x1f,
  DELETE_ROWS_EVENTV2 = 0x20,
  GTID_EVENT = 0x21,
  ANONYMOUS_GTID_EVENT = 0x22,
  PREVIOUS_GTIDS_EVENT = 0x23,
}

impl TryFrom<u8> for BinlogEventType {
  type Error = u8;

  fn try_from(v: u8) -> Result<Self, Self::Error> {
    match v {
      0x00 => Ok(BinlogEventType::UNKNOWN_EVENT),
      0x01 => Ok(BinlogEventType::START_EVENT_V3),
      0x02 => Ok(BinlogEventType::QUERY_EVENT),
      0x03 => Ok(BinlogEventType::STOP_EVENT),
      0x04 => Ok(BinlogEventType::ROTATE_EVENT),
      0x05 => Ok(BinlogEventType::INTVAR_EVENT),
      0x06 => Ok(BinlogEventType::LOAD_EVENT),
      0x07 => Ok(BinlogEventType::SLAVE_EVENT),
      0x08 => Ok(BinlogEventType::CREATE_FILE_EVENT),
      0x09 => Ok(BinlogEventType::APPEND_BLOCK_EVENT),
      0x0a => Ok(BinlogEventType::EXEC_LOAD_EVENT),
      0x0b => Ok(BinlogEventType::DELETE_FILE_EVENT),
      0x0c => Ok(BinlogEventType::NEW_LOAD_EVENT),
      0x0d => Ok(BinlogEventType::RAND_EVENT),
      0x0e => Ok(BinlogEventType::USER_VAR_EVENT),
      0x0f => Ok(BinlogEventType::FORMAT_DESCRIPTION_EVENT),
      0x10 => Ok(BinlogEventType::XID_EVENT),
      0x11 => Ok(BinlogEventType::BEGIN_LOAD_QUERY_EVENT),
      0x12 => Ok(BinlogEventType::EXECUTE_LOAD_QUERY_EVENT),
      0x13 => Ok(BinlogEventType::TABLE_MAP_EVENT),
      0x14 => Ok(BinlogEventType::WRITE_ROWS_EVENTV0),
      0x15 => Ok(BinlogEventType::UPDATE_ROWS_EVENTV0),
      0x16 => Ok(BinlogEventType::DELETE_ROWS_EVENTV0),
      0x17 => Ok(BinlogEventType::WRITE_ROWS_EVENTV1),
      0x18 => Ok(BinlogEventType::UPDATE_ROWS_EVENTV1),
      0x19 => Ok(BinlogEventType::DELETE_ROWS_EVENTV1),
      0x1a => Ok(BinlogEventType::INCIDENT_EVENT),
      0x1b => Ok(BinlogEventType::HEARTBEAT_EVENT),
      0x1c => Ok(BinlogEventType::IGNORABLE_EVENT),
      0x1d => Ok(BinlogEventType::ROWS_QUERY_EVENT),
      0x1e => Ok(BinlogEventType::WRITE_ROWS_EVENTV2),
      0x1f => Ok(BinlogEventType::UPDATE_ROWS_EVENTV2),
      0x20 => Ok(BinlogEventType::DELETE_ROWS_EVENTV2),
      0x21 => Ok(BinlogEventType::GTID_EVENT),
      0x22 => Ok(BinlogEventType::ANONYMOUS_GTID_EVENT),
      0x23 => Ok(BinlogEventType::PREVIOUS_GTIDS_EVENT),
      unsupported => Err(unsupported),
    }
  }
}
