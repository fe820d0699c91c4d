//! Fuzz target for the decode and classify paths
//!
//! # Strategy
//!
//! - Arbitrary strings: completely random input through the full parse
//! - Arbitrary secrets: exercise the secret gate and decoy generation
//! - Structural prefixes: random input that happens to open like a token
//!
//! # Invariants
//!
//! - Decode NEVER panics, whatever the input
//! - Every failure is a structured error, not a crash
//! - Classification is total: any input maps to a kind or None

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    token: String,
    secret: Option<String>,
}

fuzz_target!(|input: Input| {
    let _ = veil_codec::decode(&input.token, input.secret.as_deref());
    let _ = veil_codec::classify(&input.token);

    // The structural layer must be equally total on its own.
    if let Ok(envelope) = veil_token::Envelope::parse(&input.token) {
        let _ = envelope.secret_checksum();
        let _ = envelope.payload();
    }
});
