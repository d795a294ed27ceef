use std::fmt::{self, Debug};

/// Renders a packet as a Rust byte-string literal for trace logs.
pub struct DebugBytesRef<'a>(pub &'a [u8]);

impl Debug for DebugBytesRef<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("b\"")?;
    for &b in self.0 {
      // https://doc.rust-lang.org/reference/tokens.html#byte-escapes
      match b {
        b'\n' => f.write_str("\\n")?,
        b'\r' => f.write_str("\\r")?,
        b'\t' => f.write_str("\\t")?,
        b'\0' => f.write_str("\\0")?,
        b'\\' | b'"' => write!(f, "\\{}", b as char)?,
        // ASCII printable
        0x20..=0x7e => write!(f, "{}", b as char)?,
        _ => write!(f, "\\x{:02x}", b)?,
      }
    }
    f.write_str("\"")
  }
}

#[cfg(test)]
mod test {
  use super::DebugBytesRef;

  #[test]
  fn escapes_like_a_byte_string_literal() {
    let bytes = b"ok\t\"quoted\"\\\r\n\x00\x7f\xff";
    assert_eq!(
      r#"b"ok\t\"quoted\"\\\r\n\0\x7f\xff""#,
      format!("{:?}", DebugBytesRef(bytes))
    );
  }
}
