//! Decoy strings for wrong-secret-code responses.
//!
//! When a secret-code check fails, the caller returns a random string shaped
//! like a genuine token instead of an error. A distinguishable failure would
//! tell a guessing attacker which secrets get further — the decoy keeps
//! every wrong guess looking the same.

use rand::Rng;

use crate::layout::{DECOY_ALPHABET, SEPARATORS};

/// Minimum decoy length regardless of target.
const MIN_LENGTH: usize = 50;

/// Slack applied around the target length.
const LENGTH_SLACK: usize = 20;

/// Smallest random chunk between separators.
const CHUNK_MIN: usize = 3;

/// Largest random chunk between separators.
const CHUNK_MAX: usize = 10;

/// Generate a decoy string sized to resemble a token of `target_len` chars.
///
/// Length is uniform in `[max(50, target − 20), target + 20]`; content is
/// random 3–10 character chunks over the decoy alphabet interleaved with
/// random separators. The result carries no information about the token that
/// triggered it beyond its approximate length.
pub fn decoy(rng: &mut impl Rng, target_len: usize) -> String {
    let lower = MIN_LENGTH.max(target_len.saturating_sub(LENGTH_SLACK));
    let upper = (target_len + LENGTH_SLACK).max(lower);
    let length = rng.gen_range(lower..=upper);

    let alphabet: Vec<char> = DECOY_ALPHABET.chars().collect();
    let mut out = String::with_capacity(length);

    while out.len() < length {
        let chunk_len = rng.gen_range(CHUNK_MIN..=CHUNK_MAX);
        for _ in 0..chunk_len {
            if out.len() >= length {
                break;
            }
            out.push(alphabet[rng.gen_range(0..alphabet.len())]);
        }
        if out.len() < length {
            out.push(SEPARATORS[rng.gen_range(0..SEPARATORS.len())]);
        }
    }

    out
}
