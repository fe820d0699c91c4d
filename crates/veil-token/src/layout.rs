//! Wire-format constants.
//!
//! Every alphabet, width, and range the format depends on, in one place.
//! These values are the interop contract: existing tokens were produced
//! against them, so none can change without a new format version.

/// Separator characters framing the token's inner region.
pub const SEPARATORS: [char; 8] = ['|', ':', ';', '~', '!', '@', '#', '$'];

/// Noise characters interleaved into the ciphertext digit stream.
///
/// Deliberately overlaps [`SEPARATORS`]: the parser never searches the body
/// for separators, so the overlap costs nothing and widens the noise set.
pub const OBFUSCATION_CHARS: [char; 20] = [
    '-', '_', '.', '~', '!', '@', '#', '$', '%', '^', '&', '*', '+', '=', '|', '\\', '/', '?',
    '<', '>',
];

/// Alphabet for prefix and suffix padding.
///
/// Alphanumeric only — padding must never contain a separator, or the
/// backward scan for the closing separator would stop inside it.
pub const PADDING_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Alphabet decoy strings are drawn from.
pub const DECOY_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789|:;~!@#$%^&*()_+-=[]{}";

/// Body flag marking a token that carries a secret-code layer.
pub const FLAG_SECRET: char = 'S';

/// Body flag marking a token with no secret-code layer.
pub const FLAG_NORMAL: char = 'N';

/// Width of one ciphertext word in base-36 digits.
///
/// Five digits carry values up to 36^5 − 1 ≈ 60.4M, comfortably above the
/// transform's maximum output (below 2^21). Changing the transform's value
/// range requires re-deriving this width.
pub const CHUNK_WIDTH: usize = 5;

/// Largest value one ciphertext word can carry.
pub const MAX_WORD: u64 = 36u64.pow(CHUNK_WIDTH as u32) - 1;

/// Width of the embedded secret-code checksum field.
pub const SECRET_CHECKSUM_WIDTH: usize = 5;

/// Width of the key-length field.
pub const KEY_LEN_WIDTH: usize = 2;

/// Width of the key-checksum field.
pub const KEY_CHECKSUM_WIDTH: usize = 3;

/// Minimum padding length (prefix and suffix independently).
pub const PAD_LEN_MIN: usize = 4;

/// Maximum padding length (prefix and suffix independently).
pub const PAD_LEN_MAX: usize = 8;

/// Minimum obfuscation rate: noise before every Nth ciphertext chunk.
pub const OBFUSCATION_RATE_MIN: usize = 2;

/// Maximum obfuscation rate.
pub const OBFUSCATION_RATE_MAX: usize = 4;

/// Whether `c` is one of the token separators.
#[must_use]
pub fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}
