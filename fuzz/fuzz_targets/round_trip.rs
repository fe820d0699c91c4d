//! Fuzz target for the encode → decode round trip
//!
//! # Strategy
//!
//! - Arbitrary Unicode text, including emoji and control characters
//! - Optional arbitrary secrets (blank secrets exercise the absent path)
//!
//! # Invariants
//!
//! - Everything the encoder accepts, the decoder restores exactly
//! - The secret layer is transparent when the same secret is supplied
//! - The pipeline never panics

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use veil_codec::DecodeOutcome;

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    secret: Option<String>,
}

fuzz_target!(|input: Input| {
    let Ok(token) = veil_codec::encode(&input.text, input.secret.as_deref()) else {
        // Blank text is refused, as is a secret whose checksum overflows
        // its fixed-width wire field.
        return;
    };

    let outcome = veil_codec::decode(&token, input.secret.as_deref())
        .expect("own tokens must decode");

    assert_eq!(outcome, DecodeOutcome::Text(input.text));
});
