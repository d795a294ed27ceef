use sha1::{Digest, Sha1};
use sha2::Sha256;

// SHA1(password) XOR SHA1(nonce + SHA1(SHA1(password)))
// https://dev.mysql.com/doc/dev/mysql-server/latest/page_protocol_connection_phase_authentication_methods_native_password_authentication.html
pub fn scramble_native(nonce: &[u8], password: &[u8]) -> [u8; 20] {
  let hashed = Sha1::digest(password);
  let double_hashed = Sha1::digest(hashed);

  let mut salted = Sha1::new();
  salted.update(nonce);
  salted.update(double_hashed);
  let salted = salted.finalize();

  let mut out = [0_u8; 20];
  for (i, b) in hashed.iter().enumerate() {
    out[i] = b ^ salted[i];
  }
  out
}

// XOR(SHA256(password), SHA256(SHA256(SHA256(password)) + nonce))
// https://dev.mysql.com/doc/dev/mysql-server/latest/page_caching_sha2_authentication_exchanges.html
pub fn scramble_sha256(nonce: &[u8], password: &[u8]) -> [u8; 32] {
  let hashed = Sha256::digest(password);
  let double_hashed = Sha256::digest(hashed);

  let mut salted = Sha256::new();
  salted.update(double_hashed);
  salted.update(nonce);
  let salted = salted.finalize();

  let mut out = [0_u8; 32];
  for (i, b) in hashed.iter().enumerate() {
    out[i] = b ^ salted[i];
  }
  out
}

#[cfg(test)]
mod test {
  use super::{scramble_native, scramble_sha256};

  #[test]
  fn native_scramble_is_deterministic() {
    let a = scramble_native(b"01234567890123456789", b"secret");
    let b = scramble_native(b"01234567890123456789", b"secret");
    assert_eq!(a, b);
    let c = scramble_native(b"01234567890123456789", b"other");
    assert_ne!(a, c);
  }

  #[test]
  fn sha256_scramble_is_deterministic() {
    let a = scramble_sha256(b"01234567890123456789", b"secret");
    let b = scramble_sha256(b"01234567890123456789", b"secret");
    assert_eq!(a, b);
    let c = scramble_sha256(b"x1234567890123456789", b"secret");
    assert_ne!(a, c);
  }
}
