//! Legacy-format fallback decoding.
//!
//! The format that predates self-describing tokens: a standard-alphabet
//! base64 string of the text's UTF-8 bytes, with no key material and no
//! checksums. Still accepted so old codes keep decoding; never produced by
//! the current encoder.

use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

/// Standard alphabet, padding optional — legacy producers were not
/// consistent about emitting `=`.
const LEGACY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Attempt a legacy decode: strip everything outside the base64 alphabet,
/// decode, and require valid UTF-8.
///
/// Returns `None` on any failure — the caller treats that as "not a legacy
/// code" and reports its own structural error instead.
pub(crate) fn decode(token: &str) -> Option<String> {
    let cleaned: String = token
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let bytes = LEGACY_ENGINE.decode(cleaned.as_bytes()).ok()?;
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plain_base64() {
        assert_eq!(decode("SGVsbG8sIFdvcmxkIQ=="), Some("Hello, World!".to_owned()));
    }

    #[test]
    fn decodes_without_padding() {
        assert_eq!(decode("SGVsbG8"), Some("Hello".to_owned()));
    }

    #[test]
    fn strips_stray_characters_before_decoding() {
        assert_eq!(decode("SGVs bG8s IFdv cmxk IQ==\n"), Some("Hello, World!".to_owned()));
    }

    #[test]
    fn decodes_utf8_content() {
        // base64 of the UTF-8 bytes of "Hi 😀"
        assert_eq!(decode("SGkg8J+YgA=="), Some("Hi 😀".to_owned()));
    }

    #[test]
    fn rejects_invalid_utf8() {
        // 0xFF 0xFE is not valid UTF-8.
        assert_eq!(decode("//4="), None);
    }

    #[test]
    fn rejects_empty_and_symbol_only_input() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("~~~ ~~~"), None);
    }
}
