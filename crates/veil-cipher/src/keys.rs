//! Key material for the layered-XOR transform.
//!
//! Every encode call draws a fresh random key; the key travels inside the
//! token it produced and is never reused. Key generation takes the random
//! source as an argument so tests can run against a seeded generator.

use rand::Rng;
use thiserror::Error;

/// Alphabet fresh keys are drawn from.
///
/// Letters, digits, and a fixed set of punctuation. The wire format embeds
/// keys verbatim at the end of the token body, so this set must stay
/// disjoint from nothing — the parser locates the key by length, not by
/// character class.
pub const KEY_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Minimum length of a generated key.
pub const KEY_LEN_MIN: usize = 12;

/// Maximum length of a generated key.
pub const KEY_LEN_MAX: usize = 22;

/// Errors from key construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// Key text contains no code points.
    #[error("cipher key must contain at least one code point")]
    EmptyKey,
}

/// A transform key with at least one code point.
///
/// # Invariants
///
/// - `code_points()` is never empty. The constructor rejects empty input,
///   which makes the modular indexing inside the transform total — there is
///   no zero-length-key case for the transform to defend against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherKey {
    text: String,
    codes: Vec<u32>,
}

impl CipherKey {
    /// Wrap key text, rejecting empty input.
    ///
    /// # Errors
    ///
    /// - `CipherError::EmptyKey` if `text` has no code points
    pub fn new(text: &str) -> Result<Self, CipherError> {
        let codes: Vec<u32> = text.chars().map(|c| c as u32).collect();
        if codes.is_empty() {
            return Err(CipherError::EmptyKey);
        }
        Ok(Self { text: text.to_owned(), codes })
    }

    /// The key text as it appears on the wire.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The key's code-point sequence (never empty).
    pub fn code_points(&self) -> &[u32] {
        &self.codes
    }
}

/// Generate a fresh key from the caller's random source.
///
/// Length is uniform between [`KEY_LEN_MIN`] and [`KEY_LEN_MAX`] inclusive;
/// every character is drawn independently from [`KEY_ALPHABET`].
pub fn generate_key_with_rng(rng: &mut impl Rng) -> CipherKey {
    let alphabet: Vec<char> = KEY_ALPHABET.chars().collect();
    let length = rng.gen_range(KEY_LEN_MIN..=KEY_LEN_MAX);

    let text: String =
        (0..length).map(|_| alphabet[rng.gen_range(0..alphabet.len())]).collect();

    // INVARIANT: length >= KEY_LEN_MIN > 0, so the key is never empty.
    match CipherKey::new(&text) {
        Ok(key) => key,
        Err(_) => unreachable!("generated keys have at least KEY_LEN_MIN characters"),
    }
}

/// Generate a fresh key from the thread-local random source.
pub fn generate_key() -> CipherKey {
    generate_key_with_rng(&mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn alphabet_has_expected_size() {
        assert_eq!(KEY_ALPHABET.chars().count(), 89);
    }

    #[test]
    fn empty_key_is_rejected() {
        assert_eq!(CipherKey::new(""), Err(CipherError::EmptyKey));
    }

    #[test]
    fn key_exposes_text_and_code_points() {
        let key = CipherKey::new("Ab1").unwrap();
        assert_eq!(key.as_str(), "Ab1");
        assert_eq!(key.code_points(), &[65, 98, 49]);
    }

    #[test]
    fn generated_length_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let key = generate_key_with_rng(&mut rng);
            let len = key.as_str().chars().count();
            assert!((KEY_LEN_MIN..=KEY_LEN_MAX).contains(&len), "length {len} out of range");
        }
    }

    #[test]
    fn generated_chars_come_from_alphabet() {
        let mut rng = StdRng::seed_from_u64(11);
        let key = generate_key_with_rng(&mut rng);
        assert!(key.as_str().chars().all(|c| KEY_ALPHABET.contains(c)));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate_key_with_rng(&mut StdRng::seed_from_u64(42));
        let b = generate_key_with_rng(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn consecutive_keys_differ() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = generate_key_with_rng(&mut rng);
        let b = generate_key_with_rng(&mut rng);
        assert_ne!(a, b);
    }
}
