//! URL-safe base64 encoding of compressed payloads.
//!
//! Standard base64 with `+` replaced by `-`, `/` replaced by `_`, and no
//! trailing `=` padding, i.e. RFC 4648 §5 without padding.

use crate::error::TokenError;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use std::fmt;

/// A URL-path-safe token. Never contains `+`, `/` or `=`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RenderToken(String);

impl RenderToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RenderToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RenderToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Encode arbitrary bytes. Total over all inputs; `[]` encodes to `""`.
pub fn encode(bytes: &[u8]) -> RenderToken {
    RenderToken(URL_SAFE_NO_PAD.encode(bytes))
}

/// Decode a token back to bytes.
///
/// Trailing `=` padding is tolerated so tokens copied from padded encoders
/// still decode. Characters from the standard alphabet (`+`, `/`) are rejected.
pub fn decode(token: &str) -> Result<Vec<u8>, TokenError> {
    let trimmed = token.trim().trim_end_matches('=');
    Ok(URL_SAFE_NO_PAD.decode(trimmed)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    #[test]
    fn test_empty_encodes_to_empty() {
        let token = encode(&[]);
        assert_eq!(token.as_str(), "");
        assert!(token.is_empty());
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_matches_substituted_standard_base64() {
        // 0xfb 0xff produces both '+' and '/' in the standard alphabet
        let bytes = [0xfb, 0xff, 0xbf, 0x00, 0x10];
        let standard = STANDARD.encode(bytes);
        assert!(standard.contains('+') && standard.contains('/') && standard.ends_with('='));

        let expected = standard
            .replace('+', "-")
            .replace('/', "_")
            .trim_end_matches('=')
            .to_string();
        assert_eq!(encode(&bytes).as_str(), expected);
    }

    #[test]
    fn test_never_emits_reserved_characters() {
        let bytes: Vec<u8> = (0..=255u8).collect();
        for len in 0..bytes.len() {
            let token = encode(&bytes[..len]);
            assert!(
                !token.as_str().contains(['+', '/', '=']),
                "reserved character in token for len {len}: {token}"
            );
        }
    }

    #[test]
    fn test_decode_tolerates_padding() {
        let token = encode(b"ab");
        assert_eq!(token.as_str(), "YWI");
        assert_eq!(decode("YWI=").unwrap(), b"ab");
        assert_eq!(decode("YWI").unwrap(), b"ab");
    }

    #[test]
    fn test_decode_rejects_standard_alphabet() {
        assert!(matches!(decode("+/8"), Err(TokenError::Decode(_))));
    }

    #[test]
    fn test_display_matches_as_str() {
        let token = encode(b"blockdiag");
        assert_eq!(token.to_string(), token.as_str());
        assert_eq!(token.clone().into_string(), token.as_str());
    }
}
