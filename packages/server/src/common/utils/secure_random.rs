//! Unpredictable values drawn from the operating system CSPRNG.
//!
//! One-time codes and user identifiers must not be guessable, so nothing in
//! here uses a seeded or thread-local PRNG.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::{Rng, RngCore};

/// Number of random bytes behind a user identifier
const USER_ID_BYTES: usize = 16;

/// Generate a numeric code of `length` decimal digits
pub fn generate_numeric_code(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Generate an opaque, URL-safe user identifier
pub fn generate_user_id() -> String {
    let mut bytes = [0u8; USER_ID_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_numeric_code_shape() {
        for _ in 0..100 {
            let code = generate_numeric_code(6);
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_numeric_code_keeps_leading_zeros() {
        // 6-digit codes are strings, so "000123" must stay six characters
        let seen_leading_zero = (0..2000).any(|_| generate_numeric_code(6).starts_with('0'));
        assert!(seen_leading_zero);
    }

    #[test]
    fn test_user_id_is_url_safe() {
        let id = generate_user_id();
        assert_eq!(id.len(), 22);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_user_ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_user_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
