//! Embeds binary data in JSON strings using the data-URI-base64 convention.

use crate::json::{JsonDecoder, JsonEncoder, JsonError};
use crate::PackValue;

use super::constants::BIN_URI_START;

/// Wraps raw bytes as a binary data-URI string.
pub fn wrap_binary(bytes: &[u8]) -> String {
    format!("{}{}", BIN_URI_START, bytepack_base64::to_base64(bytes))
}

/// Unwraps a binary data-URI string back into bytes, if it carries the prefix.
pub fn unwrap_binary(s: &str) -> Option<Vec<u8>> {
    s.strip_prefix(BIN_URI_START)
        .and_then(|encoded| bytepack_base64::from_base64(encoded).ok())
}

/// Serializes a [`PackValue`] to a JSON string, encoding `Bytes` values as
/// binary data-URI strings.
pub fn stringify(value: &PackValue) -> String {
    let bytes = JsonEncoder::new().binary_prefix(BIN_URI_START).encode(value);
    String::from_utf8(bytes).unwrap_or_default()
}

/// Serializes raw bytes directly as a quoted binary data-URI JSON string.
pub fn stringify_binary(bytes: &[u8]) -> String {
    format!("\"{}\"", wrap_binary(bytes))
}

/// Parses a JSON string into a [`PackValue`], decoding binary data-URI
/// strings back into `Bytes`.
pub fn parse(s: &str) -> Result<PackValue, JsonError> {
    JsonDecoder::new(s.as_bytes())
        .binary_prefix(BIN_URI_START)
        .decode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_unwrap_roundtrip() {
        let wrapped = wrap_binary(&[1, 2, 3]);
        assert_eq!(unwrap_binary(&wrapped), Some(vec![1, 2, 3]));
    }

    #[test]
    fn stringify_then_parse_roundtrips_bytes() {
        let value = PackValue::Object(vec![("blob".into(), PackValue::Bytes(vec![9, 9, 9]))]);
        let text = stringify(&value);
        assert_eq!(parse(&text).unwrap(), value);
    }
}
