use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

/// A database and table name pair, as carried by TABLE_MAP events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TableName {
  #[serde(rename = "db")]
  pub db_name: String,
  #[serde(rename = "table")]
  pub table_name: String,
}

impl TableName {
  pub fn new(database: impl Into<String>, table: impl Into<String>) -> Self {
    Self {
      db_name: database.into(),
      table_name: table.into(),
    }
  }
}

impl fmt::Display for TableName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "`{}`.`{}`", self.db_name, self.table_name)
  }
}

/// One column as the catalog describes it. The binlog carries only type
/// codes, so the field name and the signedness of integer columns must come
/// from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
  pub field: String,
  pub is_unsigned: bool,
}

/// A catalog row: the table plus its columns, in table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
  pub name: TableName,
  pub columns: Vec<ColumnInfo>,
}

/// The user-supplied catalog. Implementations typically run
/// `DESCRIBE db.table` against a side connection. Results are treated as
/// immutable for as long as the table id stays cached.
#[async_trait]
pub trait TableMapper: Send + Sync {
  async fn mysql_table(&self, name: &TableName) -> Result<TableInfo, Box<dyn std::error::Error + Send + Sync>>;
}

#[cfg(test)]
mod test {
  use super::TableName;

  #[test]
  fn display_is_quoted() {
    let name = TableName::new("db", "t");
    assert_eq!("`db`.`t`", name.to_string());
  }

  #[test]
  fn json_shape() {
    let name = TableName::new("vt_test_keyspace", "vt_a");
    assert_eq!(
      r#"{"db":"vt_test_keyspace","table":"vt_a"}"#,
      serde_json::to_string(&name).unwrap()
    );
  }
}
