//! MySQL binary JSON ("JSONB", unrelated to the PostgreSQL column type)
//! rendered as the SQL expression form the server would echo:
//! `JSON_OBJECT(...)`, `JSON_ARRAY(...)`, quoted strings and bare scalars.
//!
//! Coverage is partial on purpose: opaque and custom values fail with a
//! decode error instead of producing wrong output.

use std::io;

const TYPE_SMALL_OBJECT: u8 = 0x00;
const TYPE_LARGE_OBJECT: u8 = 0x01;
const TYPE_SMALL_ARRAY: u8 = 0x02;
const TYPE_LARGE_ARRAY: u8 = 0x03;
const TYPE_LITERAL: u8 = 0x04;
const TYPE_INT16: u8 = 0x05;
const TYPE_UINT16: u8 = 0x06;
const TYPE_INT32: u8 = 0x07;
const TYPE_UINT32: u8 = 0x08;
const TYPE_INT64: u8 = 0x09;
const TYPE_UINT64: u8 = 0x0a;
const TYPE_DOUBLE: u8 = 0x0b;
const TYPE_STRING: u8 = 0x0c;

const LITERAL_NULL: u8 = 0x00;
const LITERAL_TRUE: u8 = 0x01;
const LITERAL_FALSE: u8 = 0x02;

fn decode_err(msg: impl Into<String>) -> io::Error {
  io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

fn need(data: &[u8], pos: usize, len: usize) -> io::Result<()> {
  if pos + len > data.len() {
    return Err(decode_err("json value truncated"));
  }
  Ok(())
}

fn read_uint_le(data: &[u8], pos: usize, len: usize) -> u64 {
  let mut v = 0_u64;
  for i in 0..len {
    v |= u64::from(data[pos + i]) << (8 * i);
  }
  v
}

/// Renders one binary JSON document. The slice starts at the type byte.
pub fn print(data: &[u8]) -> io::Result<Vec<u8>> {
  if data.is_empty() {
    return Ok(b"null".to_vec());
  }
  let mut out = Vec::new();
  print_value(data[0], &data[1..], &mut out)?;
  Ok(out)
}

fn print_value(typ: u8, data: &[u8], out: &mut Vec<u8>) -> io::Result<()> {
  match typ {
    TYPE_SMALL_OBJECT => print_compound(data, false, true, out),
    TYPE_LARGE_OBJECT => print_compound(data, true, true, out),
    TYPE_SMALL_ARRAY => print_compound(data, false, false, out),
    TYPE_LARGE_ARRAY => print_compound(data, true, false, out),
    TYPE_LITERAL => {
      need(data, 0, 1)?;
      print_literal(data[0], out)
    }
    TYPE_INT16 => {
      need(data, 0, 2)?;
      out.extend((read_uint_le(data, 0, 2) as u16 as i16).to_string().into_bytes());
      Ok(())
    }
    TYPE_UINT16 => {
      need(data, 0, 2)?;
      out.extend((read_uint_le(data, 0, 2) as u16).to_string().into_bytes());
      Ok(())
    }
    TYPE_INT32 => {
      need(data, 0, 4)?;
      out.extend((read_uint_le(data, 0, 4) as u32 as i32).to_string().into_bytes());
      Ok(())
    }
    TYPE_UINT32 => {
      need(data, 0, 4)?;
      out.extend((read_uint_le(data, 0, 4) as u32).to_string().into_bytes());
      Ok(())
    }
    TYPE_INT64 => {
      need(data, 0, 8)?;
      out.extend((read_uint_le(data, 0, 8) as i64).to_string().into_bytes());
      Ok(())
    }
    TYPE_UINT64 => {
      need(data, 0, 8)?;
      out.extend(read_uint_le(data, 0, 8).to_string().into_bytes());
      Ok(())
    }
    TYPE_DOUBLE => {
      need(data, 0, 8)?;
      let mut b = [0_u8; 8];
      b.copy_from_slice(&data[..8]);
      out.extend(f64::from_le_bytes(b).to_string().into_bytes());
      Ok(())
    }
    TYPE_STRING => {
      let (len, start) = read_varlen(data)?;
      need(data, start, len)?;
      print_quoted(&data[start..start + len], out);
      Ok(())
    }
    other => Err(decode_err(format!("unsupported json value type {:#04x}", other))),
  }
}

fn print_literal(v: u8, out: &mut Vec<u8>) -> io::Result<()> {
  let text: &[u8] = match v {
    LITERAL_NULL => b"null",
    LITERAL_TRUE => b"true",
    LITERAL_FALSE => b"false",
    other => return Err(decode_err(format!("invalid json literal {:#04x}", other))),
  };
  out.extend_from_slice(text);
  Ok(())
}

fn print_quoted(s: &[u8], out: &mut Vec<u8>) {
  out.push(b'\'');
  for &b in s {
    if b == b'\'' || b == b'\\' {
      out.push(b'\\');
    }
    out.push(b);
  }
  out.push(b'\'');
}

// Object and array layout: element count, total byte size, key entries
// (objects only), value entries, then the out-of-line data. All offsets are
// relative to the start of the element count.
fn print_compound(data: &[u8], large: bool, object: bool, out: &mut Vec<u8>) -> io::Result<()> {
  let hdr = if large { 4 } else { 2 };
  need(data, 0, 2 * hdr)?;
  let count = read_uint_le(data, 0, hdr) as usize;
  let byte_size = read_uint_le(data, hdr, hdr) as usize;
  if byte_size > data.len() {
    return Err(decode_err("json compound truncated"));
  }

  out.extend_from_slice(if object { b"JSON_OBJECT(" } else { b"JSON_ARRAY(" });

  let key_entries = 2 * hdr;
  let value_entries = key_entries + if object { count * (hdr + 2) } else { 0 };

  for i in 0..count {
    if i > 0 {
      out.push(b',');
    }

    if object {
      let entry = key_entries + i * (hdr + 2);
      need(data, entry, hdr + 2)?;
      let key_offset = read_uint_le(data, entry, hdr) as usize;
      let key_len = read_uint_le(data, entry + hdr, 2) as usize;
      need(data, key_offset, key_len)?;
      print_quoted(&data[key_offset..key_offset + key_len], out);
      out.push(b',');
    }

    let entry = value_entries + i * (1 + hdr);
    need(data, entry, 1 + hdr)?;
    let typ = data[entry];
    let inlined = matches!(typ, TYPE_LITERAL | TYPE_INT16 | TYPE_UINT16)
      || (large && matches!(typ, TYPE_INT32 | TYPE_UINT32));
    if inlined {
      match typ {
        TYPE_LITERAL => print_literal(data[entry + 1], out)?,
        TYPE_INT16 => out.extend((read_uint_le(data, entry + 1, 2) as u16 as i16).to_string().into_bytes()),
        TYPE_UINT16 => out.extend((read_uint_le(data, entry + 1, 2) as u16).to_string().into_bytes()),
        TYPE_INT32 => out.extend((read_uint_le(data, entry + 1, 4) as u32 as i32).to_string().into_bytes()),
        TYPE_UINT32 => out.extend((read_uint_le(data, entry + 1, 4) as u32).to_string().into_bytes()),
        _ => unreachable!(),
      }
    } else {
      let offset = read_uint_le(data, entry + 1, hdr) as usize;
      if offset >= data.len() {
        return Err(decode_err("json value offset out of bounds"));
      }
      print_value(typ, &data[offset..], out)?;
    }
  }

  out.push(b')');
  Ok(())
}

// Strings carry a variable-length size: 7 bits per byte, high bit set on
// continuation bytes.
fn read_varlen(data: &[u8]) -> io::Result<(usize, usize)> {
  let mut len = 0_usize;
  for i in 0..5 {
    need(data, i, 1)?;
    len |= usize::from(data[i] & 0x7f) << (7 * i);
    if data[i] & 0x80 == 0 {
      return Ok((len, i + 1));
    }
  }
  Err(decode_err("json string length too long"))
}

#[cfg(test)]
mod test {
  use super::print;

  fn print_str(data: &[u8]) -> String {
    String::from_utf8(print(data).unwrap()).unwrap()
  }

  #[test]
  fn small_object() {
    let data = [0x0f_u8, 0x00, 0, 1, 0, 14, 0, 11, 0, 1, 0, 12, 12, 0, 97, 1, 98];
    // skip the two length prefix bytes a cell would carry
    assert_eq!("JSON_OBJECT('a','b')", print_str(&data[2..]));
  }

  #[test]
  fn small_object_inlined_scalars() {
    // {"n": null, "i": -1}
    let data: &[u8] = &[
      0x00, // small object
      2, 0, // count
      20, 0, // size
      18, 0, 1, 0, // key "n"
      19, 0, 1, 0, // key "i"
      0x04, 0x00, 0x00, // null
      0x05, 0xff, 0xff, // -1
      b'n', b'i',
    ];
    assert_eq!("JSON_OBJECT('n',null,'i',-1)", print_str(data));
  }

  #[test]
  fn small_array() {
    // [1, "hi"]
    let data: &[u8] = &[
      0x02, // small array
      2, 0, // count
      13, 0, // size
      0x05, 1, 0, // inline int16 1
      0x0c, 10, 0, // string at offset 10
      2, b'h', b'i',
    ];
    assert_eq!("JSON_ARRAY(1,'hi')", print_str(data));
  }

  #[test]
  fn nested_array_in_object() {
    // {"a": [true, false]}
    let data: &[u8] = &[
      0x00, // small object
      1, 0, // count
      22, 0, // size
      11, 0, 1, 0, // key "a"
      0x02, 12, 0, // array at offset 12
      b'a', // key bytes
      2, 0, // array count
      10, 0, // array size
      0x04, 0x01, 0x00, // true
      0x04, 0x02, 0x00, // false
    ];
    assert_eq!("JSON_OBJECT('a',JSON_ARRAY(true,false))", print_str(data));
  }

  #[test]
  fn standalone_scalars() {
    assert_eq!("'hi'", print_str(&[0x0c, 2, b'h', b'i']));
    assert_eq!("-1", print_str(&[0x05, 0xff, 0xff]));
    assert_eq!("65535", print_str(&[0x06, 0xff, 0xff]));
    assert_eq!("null", print_str(&[0x04, 0x00]));
    assert_eq!("true", print_str(&[0x04, 0x01]));
    assert_eq!("3.25", print_str(&[0x0b, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0a, 0x40]));
    assert_eq!("null", print_str(&[]));
  }

  #[test]
  fn string_escaping() {
    assert_eq!(r"'it\'s'", print_str(&[0x0c, 4, b'i', b't', b'\'', b's']));
  }

  #[test]
  fn opaque_values_fail() {
    assert!(print(&[0x0f, 0x00]).is_err());
    assert!(print(&[0x20, 0x00]).is_err());
  }

  #[test]
  fn truncated_compound_fails() {
    assert!(print(&[0x00, 2, 0, 50, 0]).is_err());
  }
}
