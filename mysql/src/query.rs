use std::{
  io,
  slice::{ChunksExact, ChunksExactMut},
};

use bytes::{Buf, Bytes};

use super::{
  buf_ext::BufExt,
  constants::{CharacterSet, ColumnFlags, ColumnType},
};

/// Owned results for 0..N rows.
#[derive(Debug, Default)]
pub struct QueryResults {
  pub columns: Vec<Column>,
  pub values: Vec<RowValue>,
}

impl QueryResults {
  pub fn columns_len(&self) -> usize {
    self.columns.len()
  }

  pub fn row(&self, i: usize) -> &[RowValue] {
    let len = self.columns.len();
    let start = i * len;
    let end = start + len;
    &self.values[start..end]
  }

  pub fn row_mut(&mut self, i: usize) -> &mut [RowValue] {
    let len = self.columns.len();
    let start = i * len;
    let end = start + len;
    &mut self.values[start..end]
  }

  pub fn rows_len(&self) -> usize {
    if !self.columns.is_empty() {
      self.values.len() / self.columns.len()
    } else {
      0
    }
  }

  pub fn rows(&self) -> Option<ChunksExact<'_, RowValue>> {
    if !self.columns.is_empty() {
      Some(self.values.chunks_exact(self.columns.len()))
    } else {
      None
    }
  }

  pub fn rows_mut(&mut self) -> Option<ChunksExactMut<'_, RowValue>> {
    if !self.columns.is_empty() {
      Some(self.values.chunks_exact_mut(self.columns.len()))
    } else {
      None
    }
  }
}

pub type RowValue = Option<String>;

#[derive(Debug)]
pub struct Column {
  pub catalog: String,
  pub schema: String,
  pub table: String,
  pub name: String,
  pub org_table: String,
  pub character_set: Option<CharacterSet>,
  pub column_length: u32,
  pub column_type: ColumnType,
  pub flags: ColumnFlags,
  pub decimals: u8,
}

impl Column {
  pub(crate) fn parse(mut b: Bytes) -> io::Result<Self> {
    // https://dev.mysql.com/doc/internals/en/com-query-response.html#packet-Protocol::ColumnDefinition41
    let catalog = b.mysql_get_lenc_string();
    let schema = b.mysql_get_lenc_string();
    let table = b.mysql_get_lenc_string();
    let org_table = b.mysql_get_lenc_string();
    let name = b.mysql_get_lenc_string();
    let _org_name = b.mysql_get_lenc_string();
    let fixed_len = b.mysql_get_lenc_uint();
    if fixed_len != 0x0C {
      return Err(io::Error::new(
        io::ErrorKind::InvalidData,
        "Invalid data while parsing column definition",
      ));
    }
    let character_set = CharacterSet::try_from(b.get_u16_le() as u8).ok();
    let column_length = b.get_u32_le();
    let column_type = b
      .get_u8()
      .try_into()
      .map_err(|t| io::Error::new(io::ErrorKind::InvalidData, format!("unknown column type {}", t)))?;
    let flags = ColumnFlags::from_bits_truncate(b.get_u16_le());
    let decimals = b.get_u8();

    Ok(Self {
      catalog,
      schema,
      table,
      name,
      org_table,
      character_set,
      column_length,
      column_type,
      flags,
      decimals,
    })
  }
}
