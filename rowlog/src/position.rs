use std::fmt;

use serde::{Deserialize, Serialize};

/// A binlog position: file name plus byte offset within it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
  pub filename: String,
  pub offset: i64,
}

impl Position {
  pub fn new(filename: impl Into<String>, offset: i64) -> Self {
    Self {
      filename: filename.into(),
      offset,
    }
  }

  /// A position only names a real place in the binlog once both fields are
  /// set.
  pub fn is_zero(&self) -> bool {
    self.filename.is_empty() || self.offset == 0
  }
}

impl fmt::Display for Position {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.filename, self.offset)
  }
}
