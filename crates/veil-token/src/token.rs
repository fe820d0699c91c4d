//! Token assembly and structural parsing.
//!
//! `build` wraps transformed words and their key into the randomized outer
//! format; [`Envelope::parse`] inverts the framing. Parsing is staged so the
//! caller controls how far it goes:
//!
//! 1. [`Envelope::parse`] — strip padding, read the flag (cheap, no
//!    checksum work)
//! 2. [`Envelope::secret_checksum`] — the embedded secret-code checksum, for
//!    secret-flagged tokens
//! 3. [`Envelope::payload`] — header fields, key extraction, key-checksum
//!    verification, ciphertext recovery
//!
//! The staging exists because the public boundary must be able to stop
//! early: a secret-flagged token with no secret supplied is answered before
//! the key material is ever touched.
//!
//! All positions are counted in characters, not bytes — tokens are ASCII
//! when genuine, but parsing must stay panic-free on arbitrary input.

use rand::Rng;

use crate::{
    base36, checksum,
    errors::{Result, TokenError},
    layout::{
        CHUNK_WIDTH, FLAG_NORMAL, FLAG_SECRET, KEY_CHECKSUM_WIDTH, KEY_LEN_WIDTH, MAX_WORD,
        OBFUSCATION_CHARS, OBFUSCATION_RATE_MAX, OBFUSCATION_RATE_MIN, PAD_LEN_MAX, PAD_LEN_MIN,
        PADDING_ALPHABET, SECRET_CHECKSUM_WIDTH, SEPARATORS, is_separator,
    },
};

/// Body flag: does the token carry a secret-code layer?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// Second transform layer present; decoding needs the secret code.
    Secret,
    /// Single transform layer.
    Normal,
}

/// A token's outer structure with padding removed.
///
/// Holds the raw body characters plus the already-validated flag. Further
/// fields are parsed on demand by [`Envelope::secret_checksum`] and
/// [`Envelope::payload`].
#[derive(Debug, Clone)]
pub struct Envelope {
    body: Vec<char>,
    flag: Flag,
}

/// The decoded structural content of a token body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    /// The embedded key, already verified against its checksum.
    pub key: String,
    /// Ciphertext digit stream with all noise characters stripped.
    pub ciphertext: String,
}

/// Result of decoding the ciphertext digit stream into words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkDecode {
    /// Successfully decoded words, in order.
    pub words: Vec<u32>,
    /// Chunks that could not be decoded (short trailing chunk or malformed
    /// digits). Skipped, not fatal — the caller decides whether to log.
    pub skipped: Vec<String>,
}

impl Envelope {
    /// Parse the outer structure of a token.
    ///
    /// Validation is cheapest-first: length fields and separators before
    /// padding bounds, padding bounds before the flag. Nothing here touches
    /// the key or ciphertext.
    ///
    /// # Errors
    ///
    /// - `MissingPrefixLength` if the token does not open with base-36 digits
    /// - `InvalidSeparator` if the prefix length is not followed by a
    ///   separator
    /// - `MissingClosingSeparator` if no separator precedes the suffix length
    /// - `InvalidLengthField` if either length field fails base-36 decoding
    /// - `PaddingOutOfBounds` if the declared padding exceeds the inner
    ///   region
    /// - `EmptyBody` / `UnknownFlag` if the body is empty or starts with an
    ///   undefined flag
    pub fn parse(token: &str) -> Result<Self> {
        let chars: Vec<char> = token.chars().collect();

        // Leading base-36 run: the prefix padding length.
        let run_len = chars.iter().take_while(|c| c.is_ascii_alphanumeric()).count();
        if run_len == 0 {
            return Err(TokenError::MissingPrefixLength);
        }

        match chars.get(run_len) {
            Some(c) if is_separator(*c) => {},
            other => return Err(TokenError::InvalidSeparator { found: other.copied() }),
        }

        let prefix_field: String = chars[..run_len].iter().collect();
        let prefix_len = decode_length(&prefix_field)?;

        // The trailing run after the LAST separator is the suffix length.
        // Padding and length fields are alphanumeric by construction, so the
        // backward scan cannot stop early inside them.
        let last_sep = match chars.iter().rposition(|c| is_separator(*c)) {
            Some(pos) if pos > run_len => pos,
            _ => return Err(TokenError::MissingClosingSeparator),
        };

        let suffix_field: String = chars[last_sep + 1..].iter().collect();
        let suffix_len = decode_length(&suffix_field)?;

        let inner = &chars[run_len + 1..last_sep];
        let padding = prefix_len
            .checked_add(suffix_len)
            .ok_or(TokenError::PaddingOutOfBounds { padding: usize::MAX, inner: inner.len() })?;
        if padding > inner.len() {
            return Err(TokenError::PaddingOutOfBounds { padding, inner: inner.len() });
        }

        let body: Vec<char> = inner[prefix_len..inner.len() - suffix_len].to_vec();
        let Some(&flag_char) = body.first() else {
            return Err(TokenError::EmptyBody);
        };

        let flag = match flag_char {
            FLAG_SECRET => Flag::Secret,
            FLAG_NORMAL => Flag::Normal,
            other => return Err(TokenError::UnknownFlag { found: other }),
        };

        Ok(Self { body, flag })
    }

    /// Whether this token carries a secret-code layer.
    pub fn flag(&self) -> Flag {
        self.flag
    }

    /// The embedded secret-code checksum: the first
    /// [`SECRET_CHECKSUM_WIDTH`] alphanumeric characters after the flag.
    ///
    /// Meaningful only for [`Flag::Secret`] tokens; on a normal token this
    /// reads into the key-length field and fails or returns nonsense, so
    /// callers gate on the flag first.
    ///
    /// # Errors
    ///
    /// - `TruncatedField` if fewer digits are present than the field needs
    pub fn secret_checksum(&self) -> Result<u64> {
        let digits: String = self.body[1..]
            .iter()
            .filter(|c| c.is_ascii_alphanumeric())
            .take(SECRET_CHECKSUM_WIDTH)
            .collect();

        if digits.chars().count() < SECRET_CHECKSUM_WIDTH {
            return Err(TokenError::TruncatedField {
                field: "secret checksum",
                expected: SECRET_CHECKSUM_WIDTH,
                found: digits.chars().count(),
            });
        }

        base36::decode(&digits).ok_or(TokenError::InvalidLengthField { text: digits })
    }

    /// Parse the key header, verify the key checksum, and split the body
    /// into key and cleaned ciphertext.
    ///
    /// Header fields are located by running alphanumeric count, not raw
    /// index, because noise characters may sit between them and the
    /// ciphertext. The key itself is located from the end of the body by its
    /// declared length — it is embedded verbatim, with no noise inside it.
    ///
    /// # Errors
    ///
    /// - `TruncatedField` if the key-length or key-checksum digits run out
    /// - `KeyOutOfBounds` if the declared key length is zero or overlaps the
    ///   header
    /// - `KeyChecksumMismatch` if the extracted key fails its checksum
    pub fn payload(&self) -> Result<Payload> {
        let secret_digits = match self.flag {
            Flag::Secret => SECRET_CHECKSUM_WIDTH,
            Flag::Normal => 0,
        };
        let key_len_at = 1 + secret_digits;
        let key_checksum_at = key_len_at + KEY_LEN_WIDTH;
        let header_alnum = key_checksum_at + KEY_CHECKSUM_WIDTH;

        let mut key_len_field = String::new();
        let mut key_checksum_field = String::new();
        let mut seen = 0usize;
        let mut data_start = None;

        for (raw, &c) in self.body.iter().enumerate() {
            if !c.is_ascii_alphanumeric() {
                continue;
            }
            seen += 1;
            if seen > key_len_at && seen <= key_checksum_at {
                key_len_field.push(c);
            } else if seen > key_checksum_at && seen <= header_alnum {
                key_checksum_field.push(c);
            }
            if seen == header_alnum {
                data_start = Some(raw + 1);
                break;
            }
        }

        let Some(data_start) = data_start else {
            return Err(if key_len_field.len() < KEY_LEN_WIDTH {
                TokenError::TruncatedField {
                    field: "key length",
                    expected: KEY_LEN_WIDTH,
                    found: key_len_field.len(),
                }
            } else {
                TokenError::TruncatedField {
                    field: "key checksum",
                    expected: KEY_CHECKSUM_WIDTH,
                    found: key_checksum_field.len(),
                }
            });
        };

        let key_len = decode_length(&key_len_field)?;
        if key_len == 0 || data_start.checked_add(key_len).is_none_or(|end| end > self.body.len())
        {
            return Err(TokenError::KeyOutOfBounds { key_len, body_len: self.body.len() });
        }

        let key: String = self.body[self.body.len() - key_len..].iter().collect();
        let embedded = base36::decode(&key_checksum_field)
            .ok_or(TokenError::InvalidLengthField { text: key_checksum_field })?;
        let computed = checksum::key_checksum(&key);
        if embedded != computed {
            return Err(TokenError::KeyChecksumMismatch { embedded, computed });
        }

        let ciphertext: String = self.body[data_start..self.body.len() - key_len]
            .iter()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        Ok(Payload { key, ciphertext })
    }
}

impl Payload {
    /// Decode the cleaned digit stream into fixed-width words.
    ///
    /// A short trailing chunk or a chunk that fails base-36 decoding is
    /// collected into [`ChunkDecode::skipped`] rather than failing — one
    /// damaged word should cost one character of output, not the message.
    #[must_use]
    pub fn words(&self) -> ChunkDecode {
        let chars: Vec<char> = self.ciphertext.chars().collect();
        let mut words = Vec::with_capacity(chars.len() / CHUNK_WIDTH);
        let mut skipped = Vec::new();

        for chunk in chars.chunks(CHUNK_WIDTH) {
            let text: String = chunk.iter().collect();
            if chunk.len() < CHUNK_WIDTH {
                skipped.push(text);
                continue;
            }
            match base36::decode(&text) {
                Some(value) if value <= MAX_WORD => words.push(value as u32),
                _ => skipped.push(text),
            }
        }

        ChunkDecode { words, skipped }
    }
}

/// Assemble a complete token around already-transformed words.
///
/// `secret_checksum` present selects the secret-flagged layout. The caller
/// supplies the random source; everything non-deterministic about the token
/// (padding, separators, noise placement) draws from it.
///
/// # Errors
///
/// - `WordOutOfRange` if a word exceeds [`MAX_WORD`]
/// - `EmptyKey` if the key has no characters
/// - `FieldOverflow` if the key length, key checksum, or secret checksum
///   does not fit its fixed-width field
pub fn build(
    rng: &mut impl Rng,
    words: &[u32],
    key: &str,
    secret_checksum: Option<u64>,
) -> Result<String> {
    let mut digits = String::with_capacity(words.len() * CHUNK_WIDTH);
    for &word in words {
        if u64::from(word) > MAX_WORD {
            return Err(TokenError::WordOutOfRange { value: word });
        }
        digits.push_str(&base36::encode_padded(u64::from(word), CHUNK_WIDTH));
    }
    let obfuscated = insert_obfuscation(rng, &digits);

    let key_len = key.chars().count();
    if key_len == 0 {
        return Err(TokenError::EmptyKey);
    }

    let mut body = String::new();
    match secret_checksum {
        Some(value) => {
            body.push(FLAG_SECRET);
            body.push_str(&encode_field(value, SECRET_CHECKSUM_WIDTH, "secret checksum")?);
        },
        None => body.push(FLAG_NORMAL),
    }
    body.push_str(&encode_field(key_len as u64, KEY_LEN_WIDTH, "key length")?);
    body.push_str(&encode_field(checksum::key_checksum(key), KEY_CHECKSUM_WIDTH, "key checksum")?);
    body.push_str(&obfuscated);
    body.push_str(key);

    let prefix = random_padding(rng);
    let suffix = random_padding(rng);
    let sep1 = SEPARATORS[rng.gen_range(0..SEPARATORS.len())];
    let sep2 = SEPARATORS[rng.gen_range(0..SEPARATORS.len())];

    let mut token = String::with_capacity(body.len() + prefix.len() + suffix.len() + 4);
    token.push_str(&base36::encode(prefix.chars().count() as u64));
    token.push(sep1);
    token.push_str(&prefix);
    token.push_str(&body);
    token.push_str(&suffix);
    token.push(sep2);
    token.push_str(&base36::encode(suffix.chars().count() as u64));

    Ok(token)
}

/// Interleave noise characters into the digit stream at chunk boundaries.
///
/// One rate N is drawn per call; a noise character lands before every Nth
/// complete chunk, never before the first and never inside a chunk, so
/// stripping non-alphanumerics recovers `digits` exactly.
fn insert_obfuscation(rng: &mut impl Rng, digits: &str) -> String {
    let rate = rng.gen_range(OBFUSCATION_RATE_MIN..=OBFUSCATION_RATE_MAX);
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(chars.len() + chars.len() / (CHUNK_WIDTH * rate) + 1);

    for (index, chunk) in chars.chunks(CHUNK_WIDTH).enumerate() {
        if chunk.len() == CHUNK_WIDTH && index > 0 && index % rate == 0 {
            out.push(OBFUSCATION_CHARS[rng.gen_range(0..OBFUSCATION_CHARS.len())]);
        }
        out.extend(chunk);
    }

    out
}

fn random_padding(rng: &mut impl Rng) -> String {
    let alphabet: Vec<char> = PADDING_ALPHABET.chars().collect();
    let length = rng.gen_range(PAD_LEN_MIN..=PAD_LEN_MAX);
    (0..length).map(|_| alphabet[rng.gen_range(0..alphabet.len())]).collect()
}

fn encode_field(value: u64, width: usize, field: &'static str) -> Result<String> {
    let text = base36::encode_padded(value, width);
    if text.len() > width {
        return Err(TokenError::FieldOverflow { field, value });
    }
    Ok(text)
}

fn decode_length(field: &str) -> Result<usize> {
    let value =
        base36::decode(field).ok_or(TokenError::InvalidLengthField { text: field.to_owned() })?;
    usize::try_from(value).map_err(|_| TokenError::InvalidLengthField { text: field.to_owned() })
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    const KEY: &str = "tEst-key!42xyz";

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0xDEAD_BEEF)
    }

    #[test]
    fn build_then_parse_round_trip() {
        let words = vec![0, 17, 0x10FFFF, 60_466_175];
        let token = build(&mut rng(), &words, KEY, None).unwrap();

        let envelope = Envelope::parse(&token).unwrap();
        assert_eq!(envelope.flag(), Flag::Normal);

        let payload = envelope.payload().unwrap();
        assert_eq!(payload.key, KEY);

        let decoded = payload.words();
        assert_eq!(decoded.words, words);
        assert!(decoded.skipped.is_empty());
    }

    #[test]
    fn build_then_parse_round_trip_with_secret() {
        let words = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let token = build(&mut rng(), &words, KEY, Some(31_337)).unwrap();

        let envelope = Envelope::parse(&token).unwrap();
        assert_eq!(envelope.flag(), Flag::Secret);
        assert_eq!(envelope.secret_checksum().unwrap(), 31_337);

        let payload = envelope.payload().unwrap();
        assert_eq!(payload.key, KEY);
        assert_eq!(payload.words().words, words);
    }

    #[test]
    fn tokens_for_equal_input_differ_across_calls() {
        let words = vec![10, 20, 30];
        let mut r = rng();
        let a = build(&mut r, &words, KEY, None).unwrap();
        let b = build(&mut r, &words, KEY, None).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_word_list_still_frames() {
        let token = build(&mut rng(), &[], KEY, None).unwrap();
        let payload = Envelope::parse(&token).unwrap().payload().unwrap();
        assert!(payload.ciphertext.is_empty());
        assert!(payload.words().words.is_empty());
    }

    #[test]
    fn build_rejects_oversized_word() {
        let result = build(&mut rng(), &[60_466_176], KEY, None);
        assert!(matches!(result, Err(TokenError::WordOutOfRange { value: 60_466_176 })));
    }

    #[test]
    fn build_rejects_empty_key() {
        assert!(matches!(build(&mut rng(), &[1], "", None), Err(TokenError::EmptyKey)));
    }

    #[test]
    fn build_rejects_oversized_secret_checksum() {
        // 36^5 needs six digits.
        let result = build(&mut rng(), &[1], KEY, Some(60_466_176));
        assert!(matches!(
            result,
            Err(TokenError::FieldOverflow { field: "secret checksum", .. })
        ));
    }

    #[test]
    fn parse_rejects_text_without_leading_length() {
        assert!(matches!(
            Envelope::parse("|nope"),
            Err(TokenError::MissingPrefixLength)
        ));
    }

    #[test]
    fn parse_rejects_missing_separator() {
        assert!(matches!(
            Envelope::parse("hello world"),
            Err(TokenError::InvalidSeparator { found: Some(' ') })
        ));
        assert!(matches!(
            Envelope::parse("allalphanumeric"),
            Err(TokenError::InvalidSeparator { found: None })
        ));
    }

    #[test]
    fn parse_rejects_missing_closing_separator() {
        assert!(matches!(
            Envelope::parse("4|abcdNdata"),
            Err(TokenError::MissingClosingSeparator)
        ));
    }

    #[test]
    fn parse_rejects_padding_larger_than_inner() {
        // Prefix claims 35 characters of padding; the inner region has 5.
        assert!(matches!(
            Envelope::parse("Z|abcde$4"),
            Err(TokenError::PaddingOutOfBounds { .. })
        ));
    }

    #[test]
    fn parse_rejects_unknown_flag() {
        let token = build(&mut rng(), &[1, 2], KEY, None).unwrap();

        // Flag position: length digit + separator + prefix padding.
        let mut tampered: Vec<char> = token.chars().collect();
        let prefix_len = base36::decode(&tampered[0].to_string()).unwrap() as usize;
        let flag_at = 2 + prefix_len;
        assert_eq!(tampered[flag_at], 'N');
        tampered[flag_at] = 'Q';
        let tampered: String = tampered.into_iter().collect();

        assert!(matches!(
            Envelope::parse(&tampered),
            Err(TokenError::UnknownFlag { found: 'Q' })
        ));
    }

    #[test]
    fn payload_rejects_tampered_key() {
        let token = build(&mut rng(), &[1, 2, 3], KEY, None).unwrap();

        // The key sits immediately before the suffix padding; flip its last
        // character (located from the end: suffix length digit + separator +
        // suffix padding).
        let chars: Vec<char> = token.chars().collect();
        let suffix_len = base36::decode(&chars[chars.len() - 1].to_string()).unwrap() as usize;
        let key_end = chars.len() - 2 - suffix_len;
        let mut tampered = chars;
        tampered[key_end - 1] = if tampered[key_end - 1] == 'A' { 'B' } else { 'A' };
        let tampered: String = tampered.into_iter().collect();

        let envelope = Envelope::parse(&tampered).unwrap();
        assert!(matches!(
            envelope.payload(),
            Err(TokenError::KeyChecksumMismatch { .. })
        ));
    }

    #[test]
    fn short_trailing_chunk_is_skipped_not_fatal() {
        let payload = Payload { key: KEY.to_owned(), ciphertext: "0000A123".to_owned() };
        let decoded = payload.words();
        assert_eq!(decoded.words, vec![10]);
        assert_eq!(decoded.skipped, vec!["123".to_owned()]);
    }

    #[test]
    fn obfuscation_strips_back_to_original_digits() {
        let digits = "0123456789ABCDE0123456789ABCDE0123456789ABCDE";
        for seed in 0..32 {
            let mut r = StdRng::seed_from_u64(seed);
            let noisy = insert_obfuscation(&mut r, digits);
            let cleaned: String = noisy.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
            assert_eq!(cleaned, digits);
        }
    }

    #[test]
    fn obfuscation_never_precedes_first_chunk() {
        let digits = "00000111112222233333";
        for seed in 0..32 {
            let mut r = StdRng::seed_from_u64(seed);
            let noisy = insert_obfuscation(&mut r, digits);
            assert!(noisy.starts_with("00000"));
        }
    }
}
