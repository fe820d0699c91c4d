//! Property-based tests for the layered-XOR transform
//!
//! Verify the transform's algebraic guarantees for ALL inputs, not just
//! specific examples: self-inversion, length preservation, and determinism.

use proptest::prelude::*;
use veil_cipher::{CipherKey, code_points, layered_xor, text_from_code_points};

/// Strategy for arbitrary word sequences within the Unicode-derived range.
fn arbitrary_words() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..=0x0010_FFFF, 0..256)
}

/// Strategy for non-empty key text over printable ASCII.
fn arbitrary_key() -> impl Strategy<Value = String> {
    "[ -~]{1,32}"
}

#[test]
fn prop_transform_is_self_inverse() {
    proptest!(|(words in arbitrary_words(), key_text in arbitrary_key())| {
        let key = CipherKey::new(&key_text).expect("strategy produces non-empty keys");

        let once = layered_xor(&words, &key);
        let twice = layered_xor(&once, &key);

        // PROPERTY: Applying the transform twice is the identity
        prop_assert_eq!(twice, words);
    });
}

#[test]
fn prop_transform_preserves_length() {
    proptest!(|(words in arbitrary_words(), key_text in arbitrary_key())| {
        let key = CipherKey::new(&key_text).expect("strategy produces non-empty keys");

        prop_assert_eq!(layered_xor(&words, &key).len(), words.len());
    });
}

#[test]
fn prop_transform_is_deterministic() {
    proptest!(|(words in arbitrary_words(), key_text in arbitrary_key())| {
        let key = CipherKey::new(&key_text).expect("strategy produces non-empty keys");

        prop_assert_eq!(layered_xor(&words, &key), layered_xor(&words, &key));
    });
}

#[test]
fn prop_text_round_trips_through_code_points() {
    proptest!(|(text in ".*")| {
        // PROPERTY: Decomposition and recomposition are exact for any valid
        // Rust string, since every char is a valid scalar value.
        prop_assert_eq!(text_from_code_points(&code_points(&text)), text);
    });
}
