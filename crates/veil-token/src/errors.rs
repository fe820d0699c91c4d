//! Error types for token assembly and parsing.
//!
//! Strongly-typed structural errors. Parsing reports what was expected and
//! what was found so callers can log useful diagnostics, but none of the
//! variants reveal anything a holder of the token could not read directly.

use thiserror::Error;

/// Result alias for wire-format operations.
pub type Result<T> = std::result::Result<T, TokenError>;

/// Errors from building or parsing a token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Token does not begin with a base-36 length field.
    #[error("token does not start with a base-36 length field")]
    MissingPrefixLength,

    /// The character after the prefix length is not a separator.
    #[error("expected a separator after the prefix length, found {found:?}")]
    InvalidSeparator {
        /// The offending character, or `None` if the token ended.
        found: Option<char>,
    },

    /// No separator found scanning backward for the suffix length.
    #[error("no closing separator before the suffix length")]
    MissingClosingSeparator,

    /// A length field failed base-36 decoding.
    #[error("length field is not valid base-36: {text:?}")]
    InvalidLengthField {
        /// The raw field text.
        text: String,
    },

    /// Declared padding exceeds the token's inner region.
    #[error("declared padding ({padding} chars) exceeds inner region ({inner} chars)")]
    PaddingOutOfBounds {
        /// Combined prefix and suffix padding length.
        padding: usize,
        /// Inner region length.
        inner: usize,
    },

    /// Nothing remains after removing padding.
    #[error("token body is empty after removing padding")]
    EmptyBody,

    /// The body's format flag is not one of the defined flags.
    #[error("unknown format flag {found:?}")]
    UnknownFlag {
        /// The offending flag character.
        found: char,
    },

    /// A fixed-width header field has fewer digits than its width.
    #[error("header field {field} is truncated: expected {expected} digits, found {found}")]
    TruncatedField {
        /// Which field was being read.
        field: &'static str,
        /// Digits the field requires.
        expected: usize,
        /// Digits actually present.
        found: usize,
    },

    /// The declared key length does not fit inside the body.
    #[error("embedded key out of bounds: key length {key_len}, body length {body_len}")]
    KeyOutOfBounds {
        /// Declared key length.
        key_len: usize,
        /// Body length in characters.
        body_len: usize,
    },

    /// The embedded key fails its checksum.
    #[error("key checksum mismatch: embedded {embedded}, computed {computed}")]
    KeyChecksumMismatch {
        /// Checksum carried in the token.
        embedded: u64,
        /// Checksum computed over the extracted key.
        computed: u64,
    },

    /// A value does not fit its fixed-width field.
    #[error("field {field} does not fit its fixed width: {value}")]
    FieldOverflow {
        /// Which field overflowed.
        field: &'static str,
        /// The oversized value.
        value: u64,
    },

    /// A ciphertext word exceeds what five base-36 digits can carry.
    #[error("ciphertext word out of range: {value}")]
    WordOutOfRange {
        /// The oversized word.
        value: u32,
    },

    /// The embedded key must not be empty.
    #[error("embedded key must not be empty")]
    EmptyKey,
}
