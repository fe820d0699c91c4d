//! Embedded integrity checksums.
//!
//! Plain sums, not MACs: they catch transcription damage and wrong secret
//! codes, nothing adversarial. Both sums run over UTF-16 code units — that
//! is the unit existing tokens were checksummed in, so it is the wire
//! contract even though the transform itself works on code points.

/// Checksum embedded alongside the key: the unweighted sum of the key's
/// UTF-16 code units.
///
/// Verified before any further parsing — a token whose key fails this check
/// is structurally rejected.
#[must_use]
pub fn key_checksum(key: &str) -> u64 {
    key.encode_utf16().map(u64::from).sum()
}

/// Checksum identifying a secret code without storing it: the code's length
/// plus the positionally weighted (1-indexed) sum of its UTF-16 code units.
///
/// The weighting makes the sum order-sensitive, so transposed characters in
/// a guessed secret are caught; the raw secret never appears in the token.
#[must_use]
pub fn secret_checksum(secret: &str) -> u64 {
    let mut sum = secret.encode_utf16().count() as u64;
    for (index, unit) in secret.encode_utf16().enumerate() {
        sum += u64::from(unit) * (index as u64 + 1);
    }
    sum
}
