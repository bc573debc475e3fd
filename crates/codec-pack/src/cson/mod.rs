//! CSON: a JSON superset permitting unquoted object keys, `#` comments,
//! trailing commas, and single-quoted strings.

mod decoder;
mod encoder;
mod error;
mod types;
mod util;

pub use decoder::CsonDecoder;
pub use encoder::CsonEncoder;
pub use error::CsonError;
pub use types::CsonText;

use crate::PackValue;

pub fn encode(value: &PackValue) -> String {
    encoder::encode(value)
}

pub fn decode(data: &[u8]) -> Result<PackValue, CsonError> {
    decoder::decode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let value = PackValue::Object(vec![
            ("name".to_string(), PackValue::Str("cson".to_string())),
            ("tags".to_string(), PackValue::Array(vec![PackValue::Int(1), PackValue::Int(2)])),
        ]);
        let text = encode(&value);
        assert_eq!(decode(text.as_bytes()).unwrap(), value);
    }

    #[test]
    fn decodes_comment_and_unquoted_key_syntax() {
        let value = decode(b"{ # a person\n  name: 'ada' }").unwrap();
        assert_eq!(value, PackValue::Object(vec![("name".to_string(), PackValue::Str("ada".to_string()))]));
    }
}
