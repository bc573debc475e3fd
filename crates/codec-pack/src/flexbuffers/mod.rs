//! FlexBuffers-flavored codec: a self-describing, schema-free binary
//! stream closed by a short root footer. Trades the real format's
//! width-packed inline scalars for plain tag-prefixed values, keeping the
//! self-describing-without-a-schema property without its byte-packing.

mod decoder;
mod encoder;
mod error;
mod types;

pub use decoder::FlexBufferDecoder;
pub use encoder::FlexBufferEncoder;
pub use error::FlexBufferError;
pub use types::{tag, FlexBytes};

use crate::PackValue;

pub fn encode(value: &PackValue) -> Vec<u8> {
    encoder::encode(value)
}

pub fn decode(data: &[u8]) -> Result<PackValue, FlexBufferError> {
    decoder::decode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let value = PackValue::Object(vec![
            ("name".to_string(), PackValue::Str("flex".to_string())),
            ("ok".to_string(), PackValue::Bool(true)),
        ]);
        let bytes = encode(&value);
        assert_eq!(decode(&bytes).unwrap(), value);
    }
}
