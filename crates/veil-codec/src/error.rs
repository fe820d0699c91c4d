//! Error types for the codec boundary.
//!
//! The codec never panics and never lets an internal error type escape:
//! every failure crossing the public boundary is one of these variants, and
//! "wrong secret code" is deliberately NOT among them — it is a structured
//! outcome, so callers cannot accidentally treat it differently from a
//! decode that merely failed.

use thiserror::Error;

/// Errors surfaced by the public encode/decode operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input text or token was empty after trimming.
    #[error("input is empty")]
    EmptyInput,

    /// Token is structurally invalid and the legacy fallback failed too.
    #[error("not a recognizable token: {reason}")]
    InvalidToken {
        /// Diagnostic from the structural parse that failed.
        reason: String,
    },

    /// The encode pipeline failed; no partial output was produced.
    #[error("encoding failed: {reason}")]
    Encode {
        /// Diagnostic from the stage that failed.
        reason: String,
    },
}
