//! Veil Transform Primitives
//!
//! Building blocks for the Veil codec: code-point decomposition, the
//! self-inverse layered-XOR transform, and key generation. All functions are
//! pure with deterministic outputs. Callers provide the random source for
//! key generation, which enables deterministic testing.
//!
//! # Transform Pipeline
//!
//! Text is obfuscated by stacking up to two keyed passes of the same
//! transform, one per key, applied to the code-point sequence:
//!
//! ```text
//! Text
//!    │
//!    ▼
//! Code points (Unicode scalar values)
//!    │
//!    ▼
//! Layered XOR ← secret code (optional second layer)
//!    │
//!    ▼
//! Layered XOR ← fresh random key (always)
//!    │
//!    ▼
//! u32 words → serialized into a token by the wire-format layer
//! ```
//!
//! Because XOR is its own inverse and every term is recomputed from the same
//! index and key material, decoding applies the identical transform in the
//! reverse layer order.
//!
//! # Security
//!
//! This is obfuscation, not encryption:
//!
//! - The key travels inside the token; anyone holding the token can decode it
//! - XOR with a short repeating key resists neither known-plaintext nor
//!   brute-force analysis
//! - Integrity is covered by plain checksums in the wire layer, not a MAC
//!
//! Callers that need confidentiality against a motivated attacker must wrap
//! the token in real cryptography.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod keys;
pub mod transform;

pub use keys::{
    CipherError, CipherKey, KEY_ALPHABET, KEY_LEN_MAX, KEY_LEN_MIN, generate_key,
    generate_key_with_rng,
};
pub use transform::{code_points, layered_xor, text_from_code_points};
