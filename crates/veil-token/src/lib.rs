//! Veil Token Wire Format
//!
//! Assembly and structural parsing of the self-describing token format. A
//! token carries everything its decoder needs — transformed words, the key
//! that produced them, and integrity checksums — wrapped in random padding
//! and separators so equal inputs never serialize equally.
//!
//! Layout on the wire:
//!
//! ```text
//! <base36(prefixLen)><sep1><prefixPad><body><suffixPad><sep2><base36(suffixLen)>
//!
//! body (secret):    S<checksum5><keyLen2><keyChecksum3><obfuscatedDigits><key>
//! body (no secret): N<keyLen2><keyChecksum3><obfuscatedDigits><key>
//! ```
//!
//! `obfuscatedDigits` is the ciphertext: fixed-width 5-character base-36
//! words with single noise characters interleaved at chunk boundaries. The
//! noise never splits a word, so stripping every non-alphanumeric character
//! recovers the digit stream exactly.
//!
//! This crate is purely structural. Parsing validates framing and the key
//! checksum but never decrypts — the transform lives in `veil-cipher`, and
//! the public boundary that combines the two lives in `veil-codec`.
//!
//! # Invariants
//!
//! - Self-contained: a token parses with no material beyond the token itself
//! - Reversible framing: `parse` inverts `build` for every buildable input
//! - Checksum gate: the embedded key is only surfaced after its checksum
//!   verifies

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod base36;
pub mod checksum;
pub mod decoy;
pub mod errors;
pub mod layout;
pub mod token;

pub use checksum::{key_checksum, secret_checksum};
pub use decoy::decoy;
pub use errors::{Result, TokenError};
pub use token::{ChunkDecode, Envelope, Flag, Payload, build};
