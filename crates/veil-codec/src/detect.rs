//! Input classification: plain text, token, or secret-bearing token.
//!
//! There is no format marker that distinguishes "plain text that happens to
//! parse" from "an actual token" — the only evidence is a successful,
//! plausible trial decode. This is a heuristic by construction and can
//! misclassify in both directions: adversarially-crafted plain text can look
//! like a token, and a token whose decoded content is symbol-heavy and long
//! can look like plain text. Callers treat the answer as a default action,
//! not a proof.

use crate::codec::{DecodeOutcome, decode};

/// Decoded content whose readable ratio exceeds this is presumed
/// intentional.
const READABLE_RATIO: f64 = 0.3;

/// Decoded content shorter than this is presumed intentional even if
/// symbol-heavy.
const SHORT_DECODE_LIMIT: usize = 50;

/// What a piece of input text appears to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// Ordinary text; the natural action is to encode it.
    Plain,
    /// A decodable token; the natural action is to decode it.
    Encrypted,
    /// A token whose decoding requires a secret code.
    SecretEncrypted,
}

/// Classify input text by trial decode.
///
/// Returns `None` for empty or whitespace-only input. Anything that neither
/// decodes nor decodes plausibly is [`TextKind::Plain`] — the encoder
/// accepts arbitrary text, so "plain" is always a safe answer.
#[must_use]
pub fn classify(text: &str) -> Option<TextKind> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    match decode(trimmed, None) {
        Ok(DecodeOutcome::SecretRequired) => Some(TextKind::SecretEncrypted),
        Ok(DecodeOutcome::Text(decoded)) if !decoded.trim().is_empty() => {
            if looks_intentional(&decoded) {
                Some(TextKind::Encrypted)
            } else {
                Some(TextKind::Plain)
            }
        },
        // Decode failures, empty decodes, and (unreachable without a
        // secret) decoys all mean the input was not one of our tokens.
        _ => Some(TextKind::Plain),
    }
}

/// Whether decoded content is plausibly a message someone meant to send:
/// mostly letters and whitespace, or short enough that shape says nothing.
fn looks_intentional(decoded: &str) -> bool {
    let total = decoded.chars().count();
    if total < SHORT_DECODE_LIMIT {
        return true;
    }

    let readable =
        decoded.chars().filter(|c| c.is_ascii_alphabetic() || c.is_whitespace()).count();
    readable as f64 / total as f64 > READABLE_RATIO
}
