//! Random session id generation.
//!
//! Ids are short lowercase-alphanumeric strings.  The goal is collision
//! resistance across one user's sessions, not secrecy, so a thread-local
//! PRNG is sufficient; the store's `create` remains the uniqueness
//! authority either way.

use rand::Rng;

use vm_domain::error::{Error, Result};

/// Alphabet for generated session ids.
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random session id of exactly `length` characters, each drawn
/// independently and uniformly from `[a-z0-9]`.
///
/// Fails with [`Error::InvalidArgument`] when `length` is zero.
pub fn generate(length: usize) -> Result<String> {
    if length == 0 {
        return Err(Error::InvalidArgument(
            "session id length must be a positive integer".into(),
        ));
    }

    let mut rng = rand::thread_rng();
    let id = (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn exact_length_and_alphabet() {
        for length in [1, 12, 64] {
            let id = generate(length).unwrap();
            assert_eq!(id.len(), length);
            assert!(id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn zero_length_rejected() {
        let err = generate(0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn generated_ids_unique_in_large_sample() {
        // Probabilistic sanity check: 36^12 is vast, so a large sample of
        // 12-char ids should never collide in practice.
        let mut seen = HashSet::new();
        for _ in 0..100_000 {
            assert!(seen.insert(generate(12).unwrap()));
        }
    }
}
