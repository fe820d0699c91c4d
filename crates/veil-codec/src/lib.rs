//! Veil Codec
//!
//! Reversible text obfuscation with self-describing tokens. `encode` turns
//! arbitrary Unicode text into a randomized token; `decode` turns the token
//! back into the exact original text; `classify` guesses which of the two a
//! piece of input is.
//!
//! Every token is self-contained: the transform key is generated fresh per
//! call and embedded (checksummed) in the output, so decoding needs no
//! state beyond the token itself — plus the secret code, if the encoder was
//! given one. A wrong secret is answered with a random decoy string rather
//! than an error, so failed guesses all look alike.
//!
//! ```
//! use veil_codec::{DecodeOutcome, decode, encode};
//!
//! let token = encode("Hi 😀", Some("pw1")).unwrap();
//! assert_eq!(
//!     decode(&token, Some("pw1")).unwrap(),
//!     DecodeOutcome::Text("Hi 😀".to_owned()),
//! );
//! assert_eq!(decode(&token, None).unwrap(), DecodeOutcome::SecretRequired);
//! ```
//!
//! # Security
//!
//! Obfuscation, not encryption. The key rides inside the token; checksums
//! catch damage, not tampering; the XOR transform does not resist
//! cryptanalysis. The secret-code layer gates casual access, nothing more.
//!
//! # Concurrency
//!
//! Pure and synchronous. No shared state between calls; the thread-local
//! random source keeps generated keys independent under parallel callers.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod codec;
pub mod detect;
pub mod error;
mod legacy;

pub use codec::{DecodeOutcome, decode, decode_with_rng, encode, encode_with_rng};
pub use detect::{TextKind, classify};
pub use error::CodecError;
