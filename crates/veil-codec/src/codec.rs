//! The public encode/decode operations.
//!
//! This is the boundary collaborators call through. Both operations are
//! pure, never panic, and never return partial output: every internal
//! failure is caught here and converted into a [`CodecError`] or a
//! structured [`DecodeOutcome`].
//!
//! Encoding stacks the transform layers bottom-up (secret code first, then
//! the fresh key) and hands the result to the wire layer; decoding parses
//! the wire layer and unstacks the layers top-down. The secret-code decoy
//! policy lives here: once a secret-flagged token's embedded checksum has
//! been read and a secret was supplied, every failure — wrong checksum or
//! any downstream damage — is answered with a decoy, so error behavior
//! never tells a guesser whether their secret or the token was at fault.

use rand::Rng;
use veil_cipher::{CipherKey, code_points, generate_key_with_rng, layered_xor,
    text_from_code_points};
use veil_token::{Envelope, Flag, TokenError, build, decoy, secret_checksum};

use crate::{error::CodecError, legacy};

/// Outcome of a decode operation that was structurally understood.
///
/// Hard failures (unparseable tokens, empty input) are the `Err` side of
/// [`decode`]; these variants are the answers a well-formed token can give.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The recovered text.
    Text(String),
    /// The token carries a secret-code layer and none was supplied.
    /// No text was recovered and nothing about the token was revealed.
    SecretRequired,
    /// A secret code was supplied but did not match. The decoy is a random
    /// token-shaped string for the caller to display in place of output.
    WrongSecret {
        /// Random string, indistinguishable in shape from a genuine token.
        decoy: String,
    },
}

/// How far the primary decode got before failing, which determines the
/// fallback: structural failures may still be legacy codes, but anything
/// after the secret gate is answered with a decoy.
enum PrimaryFailure {
    /// Structural failure before any secret material was involved.
    Format(TokenError),
    /// The embedded secret checksum did not match the supplied secret.
    WrongSecret,
    /// Failure after the secret checksum was parsed and matched.
    AfterSecretGate(TokenError),
}

/// Encode text into a fresh token using the thread-local random source.
///
/// See [`encode_with_rng`] for the contract.
pub fn encode(text: &str, secret: Option<&str>) -> Result<String, CodecError> {
    encode_with_rng(&mut rand::thread_rng(), text, secret)
}

/// Encode text into a fresh token using the caller's random source.
///
/// A secret that is empty after trimming counts as absent. The token is
/// self-contained: everything needed to decode it except the secret code is
/// embedded inside it.
///
/// # Errors
///
/// - `CodecError::EmptyInput` if `text` is empty after trimming
/// - `CodecError::Encode` if the pipeline fails; no partial output escapes
pub fn encode_with_rng(
    rng: &mut impl Rng,
    text: &str,
    secret: Option<&str>,
) -> Result<String, CodecError> {
    if text.trim().is_empty() {
        return Err(CodecError::EmptyInput);
    }
    let secret = active_secret(secret);

    let mut words = code_points(text);
    let embedded_checksum = match secret {
        Some(secret) => {
            let Ok(secret_key) = CipherKey::new(secret) else {
                unreachable!("active secrets are non-empty after trimming");
            };
            words = layered_xor(&words, &secret_key);
            Some(secret_checksum(secret))
        },
        None => None,
    };

    let key = generate_key_with_rng(rng);
    let words = layered_xor(&words, &key);

    build(rng, &words, key.as_str(), embedded_checksum)
        .map_err(|err| CodecError::Encode { reason: err.to_string() })
}

/// Decode a token using the thread-local random source for decoys.
///
/// See [`decode_with_rng`] for the contract.
pub fn decode(token: &str, secret: Option<&str>) -> Result<DecodeOutcome, CodecError> {
    decode_with_rng(&mut rand::thread_rng(), token, secret)
}

/// Decode a token back into text, or into one of the structured outcomes.
///
/// Decoding is deterministic given the token and secret; the random source
/// is drawn on only when a decoy must be produced. Tokens whose primary
/// parse fails are retried against the legacy base64 format before the
/// operation reports failure.
///
/// # Errors
///
/// - `CodecError::EmptyInput` if `token` is empty after trimming
/// - `CodecError::InvalidToken` if the token parses under neither the
///   current nor the legacy format
pub fn decode_with_rng(
    rng: &mut impl Rng,
    token: &str,
    secret: Option<&str>,
) -> Result<DecodeOutcome, CodecError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(CodecError::EmptyInput);
    }
    let target_len = token.chars().count();

    match decode_primary(token, secret) {
        Ok(outcome) => Ok(outcome),
        Err(PrimaryFailure::WrongSecret) => {
            Ok(DecodeOutcome::WrongSecret { decoy: decoy(rng, target_len) })
        },
        Err(PrimaryFailure::AfterSecretGate(err)) => {
            // A failure this deep on a secret-flagged token is answered like
            // a wrong secret. Distinguishing "corrupt token" from "wrong
            // secret" here would hand a guesser an oracle.
            tracing::debug!(error = %err, "secret-gated decode failed, answering with decoy");
            Ok(DecodeOutcome::WrongSecret { decoy: decoy(rng, target_len) })
        },
        Err(PrimaryFailure::Format(err)) => {
            tracing::debug!(error = %err, "structural parse failed, trying legacy format");
            match legacy::decode(token) {
                Some(text) => Ok(DecodeOutcome::Text(text)),
                None => Err(CodecError::InvalidToken { reason: err.to_string() }),
            }
        },
    }
}

/// The primary (current-format) decode path.
fn decode_primary(token: &str, secret: Option<&str>) -> Result<DecodeOutcome, PrimaryFailure> {
    let envelope = Envelope::parse(token).map_err(PrimaryFailure::Format)?;
    let secret = active_secret(secret);

    let active_secret = match envelope.flag() {
        Flag::Secret => {
            let Some(secret) = secret else {
                return Ok(DecodeOutcome::SecretRequired);
            };
            let embedded = envelope.secret_checksum().map_err(PrimaryFailure::Format)?;
            if embedded != secret_checksum(secret) {
                return Err(PrimaryFailure::WrongSecret);
            }
            Some(secret)
        },
        // A secret supplied for a token that never had one is ignored.
        Flag::Normal => None,
    };

    // Past the secret gate: failures from here must not leak which stage
    // broke when a secret is in play.
    let gate = |err: TokenError| match active_secret {
        Some(_) => PrimaryFailure::AfterSecretGate(err),
        None => PrimaryFailure::Format(err),
    };

    let payload = envelope.payload().map_err(gate)?;

    let decoded = payload.words();
    for chunk in &decoded.skipped {
        tracing::warn!(chunk = %chunk, "skipping malformed ciphertext chunk");
    }

    let Ok(key) = CipherKey::new(&payload.key) else {
        unreachable!("parsed payloads carry a non-empty key");
    };

    let mut words = layered_xor(&decoded.words, &key);
    if let Some(secret) = active_secret {
        let Ok(secret_key) = CipherKey::new(secret) else {
            unreachable!("active secrets are non-empty after trimming");
        };
        words = layered_xor(&words, &secret_key);
    }

    Ok(DecodeOutcome::Text(text_from_code_points(&words)))
}

/// Normalize an optional secret: trimmed, and present only if non-empty.
fn active_secret(secret: Option<&str>) -> Option<&str> {
    secret.map(str::trim).filter(|s| !s.is_empty())
}
