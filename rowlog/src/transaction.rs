use chrono::{Local, TimeZone};
use mysql::binlog::Query;
use mysql::constants::ColumnType;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::position::Position;
use crate::statement::StatementCategory;
use crate::table::TableName;

/// One committed group of binlog events, demarcated by BEGIN/XID/COMMIT.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
  /// Where this transaction started.
  pub now_position: Position,
  /// Where the stream continues after it.
  pub next_position: Position,
  /// Commit time, unix seconds.
  pub timestamp: i64,
  pub events: Vec<StreamEvent>,
}

/// A SQL statement or a batch of row images inside a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamEvent {
  pub category: StatementCategory,
  pub table: TableName,
  /// Set for DDL/SET statements replicated as text.
  pub query: Query,
  pub timestamp: i64,
  /// After-images: INSERT and UPDATE.
  pub row_values: Vec<RowData>,
  /// Before-images: UPDATE and DELETE.
  pub row_identifies: Vec<RowData>,
}

impl StreamEvent {
  pub fn new(category: StatementCategory, timestamp: i64, table: TableName) -> Self {
    Self {
      category,
      table,
      query: Query::default(),
      timestamp,
      row_values: Vec::new(),
      row_identifies: Vec::new(),
    }
  }

  pub fn new_query(category: StatementCategory, timestamp: i64, query: Query) -> Self {
    Self {
      category,
      table: TableName::default(),
      query,
      timestamp,
      row_values: Vec::new(),
      row_identifies: Vec::new(),
    }
  }
}

/// One row image: the cells of every table column, in table order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RowData {
  #[serde(rename = "Columns")]
  pub columns: Vec<ColumnData>,
}

impl RowData {
  pub fn with_capacity(cnt: usize) -> Self {
    Self {
      columns: Vec::with_capacity(cnt),
    }
  }
}

/// One decoded cell. `is_empty` marks a column absent from the event, which
/// is distinct from a present SQL NULL (`data == None`).
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnData {
  pub field: String,
  pub column_type: ColumnType,
  pub is_empty: bool,
  pub data: Option<Vec<u8>>,
}

impl ColumnData {
  pub fn new(field: impl Into<String>, column_type: ColumnType, is_empty: bool) -> Self {
    Self {
      field: field.into(),
      column_type,
      is_empty,
      data: None,
    }
  }
}

fn local_time_string(timestamp: i64) -> String {
  Local
    .timestamp_opt(timestamp, 0)
    .single()
    .map(|t| t.format("%Y-%m-%d %H:%M:%S %z").to_string())
    .unwrap_or_else(|| timestamp.to_string())
}

impl Serialize for Transaction {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut s = serializer.serialize_struct("Transaction", 4)?;
    s.serialize_field("nowPosition", &self.now_position)?;
    s.serialize_field("nextPosition", &self.next_position)?;
    s.serialize_field("timestamp", &local_time_string(self.timestamp))?;
    s.serialize_field("events", &self.events)?;
    s.end()
  }
}

impl Serialize for StreamEvent {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    if !self.query.sql.is_empty() {
      let mut s = serializer.serialize_struct("StreamEvent", 4)?;
      s.serialize_field("name", &self.table)?;
      s.serialize_field("type", &self.category.to_string())?;
      s.serialize_field("timestamp", &local_time_string(self.timestamp))?;
      s.serialize_field("sql", &self.query.sql)?;
      s.end()
    } else {
      let mut s = serializer.serialize_struct("StreamEvent", 5)?;
      s.serialize_field("name", &self.table)?;
      s.serialize_field("type", &self.category.to_string())?;
      s.serialize_field("timestamp", &local_time_string(self.timestamp))?;
      s.serialize_field("rowValues", &self.row_values)?;
      s.serialize_field("rowIdentifies", &self.row_identifies)?;
      s.end()
    }
  }
}

impl Serialize for ColumnData {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut s = serializer.serialize_struct("ColumnData", 4)?;
    // The key spelling is part of the wire format consumers depend on.
    s.serialize_field("filed", &self.field)?;
    s.serialize_field("type", &self.column_type.to_string())?;
    s.serialize_field("isEmpty", &self.is_empty)?;
    match &self.data {
      Some(data) => s.serialize_field("data", &String::from_utf8_lossy(data))?,
      None => s.serialize_field("data", &Option::<String>::None)?,
    }
    s.end()
  }
}

#[cfg(test)]
mod test {
  use super::{local_time_string, ColumnData, RowData, StreamEvent, Transaction};
  use crate::position::Position;
  use crate::statement::StatementCategory;
  use crate::table::TableName;
  use mysql::binlog::Query;
  use mysql::constants::ColumnType;
  use serde_json::json;

  #[test]
  fn row_event_json() {
    let mut event = StreamEvent::new(
      StatementCategory::Insert,
      1407805592,
      TableName::new("vt_test_keyspace", "vt_a"),
    );
    event.row_values.push(RowData {
      columns: vec![
        ColumnData {
          field: "id".to_string(),
          column_type: ColumnType::MYSQL_TYPE_LONG,
          is_empty: false,
          data: Some(b"1076895760".to_vec()),
        },
        ColumnData {
          field: "message".to_string(),
          column_type: ColumnType::MYSQL_TYPE_VARCHAR,
          is_empty: false,
          data: None,
        },
      ],
    });

    let tran = Transaction {
      now_position: Position::new("binlog.000005", 4),
      next_position: Position::new("binlog.000005", 136),
      timestamp: 1407805592,
      events: vec![event],
    };

    let got = serde_json::to_value(&tran).unwrap();
    let want = json!({
      "nowPosition": {"filename": "binlog.000005", "offset": 4},
      "nextPosition": {"filename": "binlog.000005", "offset": 136},
      "timestamp": local_time_string(1407805592),
      "events": [{
        "name": {"db": "vt_test_keyspace", "table": "vt_a"},
        "type": "insert",
        "timestamp": local_time_string(1407805592),
        "rowValues": [{
          "Columns": [
            {"filed": "id", "type": "Long", "isEmpty": false, "data": "1076895760"},
            {"filed": "message", "type": "Varchar", "isEmpty": false, "data": null},
          ],
        }],
        "rowIdentifies": [],
      }],
    });
    assert_eq!(want, got);
  }

  #[test]
  fn sql_event_json() {
    let event = StreamEvent::new_query(
      StatementCategory::Create,
      1407805592,
      Query {
        database: "test".to_string(),
        charset: None,
        sql: "create table a(id int)".to_string(),
      },
    );

    let got = serde_json::to_value(&event).unwrap();
    let want = json!({
      "name": {"db": "", "table": ""},
      "type": "create",
      "timestamp": local_time_string(1407805592),
      "sql": "create table a(id int)",
    });
    assert_eq!(want, got);
  }

  #[test]
  fn empty_column_is_distinct_from_null() {
    let mut empty = ColumnData::new("c", ColumnType::MYSQL_TYPE_LONG, true);
    empty.data = None;
    let got = serde_json::to_value(&empty).unwrap();
    assert_eq!(
      serde_json::json!({"filed": "c", "type": "Long", "isEmpty": true, "data": null}),
      got
    );
  }
}
