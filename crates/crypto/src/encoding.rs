//! RFC 3986 percent-encoding.
//!
//! Everything outside the unreserved set `A-Z a-z 0-9 - . _ ~` is encoded as
//! `%XX` with uppercase hex digits. Spaces become `%20`, never `+`.

use crate::{CryptoError, Result};

/// Percent-encode a string per RFC 3986.
pub fn percent_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Decode a percent-encoded string.
pub fn percent_decode(input: &str) -> Result<String> {
    urlencoding::decode(input)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| CryptoError::EncodingError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unreserved_pass_through() {
        assert_eq!(percent_encode("AZaz09-._~"), "AZaz09-._~");
    }

    #[test]
    fn test_reserved_are_encoded() {
        assert_eq!(
            percent_encode("https://platform.fatsecret.com/rest/server.api"),
            "https%3A%2F%2Fplatform.fatsecret.com%2Frest%2Fserver.api"
        );
        assert_eq!(percent_encode("a=b&c"), "a%3Db%26c");
        assert_eq!(percent_encode("a b+c"), "a%20b%2Bc");
        assert_eq!(percent_encode("x/y="), "x%2Fy%3D");
    }

    #[test]
    fn test_multibyte_utf8() {
        assert_eq!(percent_encode("é"), "%C3%A9");
    }

    #[test]
    fn test_decode_invalid_utf8() {
        assert!(percent_decode("%FF%FE").is_err());
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(s in ".*") {
            prop_assert_eq!(percent_decode(&percent_encode(&s)).unwrap(), s);
        }

        #[test]
        fn prop_output_is_unreserved_or_escape(s in ".*") {
            let encoded = percent_encode(&s);
            prop_assert!(encoded
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "-._~%".contains(c)));
        }
    }
}
