//! The self-inverse layered-XOR transform.
//!
//! Operates on sequences of Unicode scalar values, never on UTF-16 code
//! units or UTF-8 bytes — an emoji is one element of the sequence, which is
//! what keeps round trips exact for text outside the Basic Multilingual
//! Plane.

use crate::keys::CipherKey;

/// Modulus of the positional mask term.
///
/// Chosen below the Unicode range so the mask can never push a transformed
/// value outside what the wire layer's fixed-width words can carry.
const POSITION_MASK_MOD: u64 = 0x10000;

/// Decompose text into its sequence of Unicode scalar values.
pub fn code_points(text: &str) -> Vec<u32> {
    text.chars().map(|c| c as u32).collect()
}

/// Recompose text from a sequence of candidate scalar values.
///
/// Values outside the valid scalar range (the surrogate block and anything
/// above U+10FFFF) are skipped rather than failing the whole sequence, so a
/// corrupted word costs one character, not the message.
pub fn text_from_code_points(values: &[u32]) -> String {
    values.iter().copied().filter_map(char::from_u32).collect()
}

/// Apply the layered-XOR transform to `data` under `key`.
///
/// For each index `i` with key code points `K`:
///
/// ```text
/// out[i] = data[i] ^ K[i % |K|] ^ K[(i + 1) % |K|] ^ ((i * 7) % 0x10000)
/// ```
///
/// The transform is its own inverse: every XOR term depends only on `i` and
/// `K`, so applying it twice with the same key restores the input exactly.
/// Decoding therefore calls this same function, unstacking layers in the
/// reverse order they were applied.
///
/// # Invariants
///
/// - Length preserving: `out.len() == data.len()`
/// - Position dependent: equal input values at different indices map to
///   different outputs (for any key shorter than the positional mask period)
#[must_use]
pub fn layered_xor(data: &[u32], key: &CipherKey) -> Vec<u32> {
    let key_codes = key.code_points();
    let key_len = key_codes.len();

    data.iter()
        .enumerate()
        .map(|(i, &word)| {
            let mask = ((i as u64).wrapping_mul(7) % POSITION_MASK_MOD) as u32;
            word ^ key_codes[i % key_len] ^ key_codes[(i + 1) % key_len] ^ mask
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(text: &str) -> CipherKey {
        CipherKey::new(text).unwrap()
    }

    #[test]
    fn transform_round_trip() {
        let data = code_points("Hello, World!");
        let k = key("rAnd0m-key!");

        let encrypted = layered_xor(&data, &k);
        let decrypted = layered_xor(&encrypted, &k);

        assert_eq!(decrypted, data);
        assert_ne!(encrypted, data, "transform must actually change the data");
    }

    #[test]
    fn transform_round_trip_emoji() {
        let text = "Hi 😀🦀";
        let k = key("k3y{with}symbols|;:");

        let restored = text_from_code_points(&layered_xor(
            &layered_xor(&code_points(text), &k),
            &k,
        ));

        assert_eq!(restored, text);
    }

    #[test]
    fn transform_is_deterministic() {
        let data = code_points("same input");
        let k = key("stable key");

        assert_eq!(layered_xor(&data, &k), layered_xor(&data, &k));
    }

    #[test]
    fn different_keys_produce_different_output() {
        let data = code_points("the quick brown fox");

        let a = layered_xor(&data, &key("first key value"));
        let b = layered_xor(&data, &key("second key value"));

        assert_ne!(a, b);
    }

    #[test]
    fn positional_mask_separates_repeated_input() {
        // A run of identical values must not produce identical output words,
        // otherwise repetition in the plaintext would show through.
        let data = vec![65u32; 8];
        let out = layered_xor(&data, &key("abcdefghijkl"));

        assert!(out.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn empty_data_stays_empty() {
        let k = key("any key at all");
        assert!(layered_xor(&[], &k).is_empty());
    }

    #[test]
    fn invalid_code_points_are_skipped() {
        // Surrogate value and out-of-range value surround a valid 'A'.
        let values = [0xD800, 65, 0x0011_0000];
        assert_eq!(text_from_code_points(&values), "A");
    }

    #[test]
    fn code_points_use_scalar_values_not_utf16_units() {
        // U+1F600 is a single code point even though UTF-16 needs a
        // surrogate pair for it.
        assert_eq!(code_points("😀"), vec![0x1F600]);
    }
}
