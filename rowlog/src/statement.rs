use std::fmt;

/// The category of a replicated SQL statement, taken from its first
/// whitespace-delimited word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementCategory {
  Unknown,
  Begin,
  Commit,
  Rollback,
  Insert,
  Update,
  Delete,
  Create,
  Alter,
  Drop,
  Truncate,
  Rename,
  Set,
}

impl StatementCategory {
  pub fn from_sql(sql: &str) -> Self {
    let word = match sql.find(' ') {
      Some(i) => &sql[..i],
      None => sql,
    };
    match word.to_ascii_lowercase().as_str() {
      "begin" => StatementCategory::Begin,
      "commit" => StatementCategory::Commit,
      "rollback" => StatementCategory::Rollback,
      "insert" => StatementCategory::Insert,
      "update" => StatementCategory::Update,
      "delete" => StatementCategory::Delete,
      "create" => StatementCategory::Create,
      "alter" => StatementCategory::Alter,
      "drop" => StatementCategory::Drop,
      "truncate" => StatementCategory::Truncate,
      "rename" => StatementCategory::Rename,
      "set" => StatementCategory::Set,
      _ => StatementCategory::Unknown,
    }
  }

  pub fn is_ddl(&self) -> bool {
    matches!(
      self,
      StatementCategory::Create
        | StatementCategory::Alter
        | StatementCategory::Drop
        | StatementCategory::Truncate
        | StatementCategory::Rename
    )
  }
}

impl fmt::Display for StatementCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      StatementCategory::Unknown => "unknown",
      StatementCategory::Begin => "begin",
      StatementCategory::Commit => "commit",
      StatementCategory::Rollback => "rollback",
      StatementCategory::Insert => "insert",
      StatementCategory::Update => "update",
      StatementCategory::Delete => "delete",
      StatementCategory::Create => "create",
      StatementCategory::Alter => "alter",
      StatementCategory::Drop => "drop",
      StatementCategory::Truncate => "truncate",
      StatementCategory::Rename => "rename",
      StatementCategory::Set => "set",
    };
    f.write_str(name)
  }
}
