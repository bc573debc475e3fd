//! BSON document codec.

mod decoder;
mod encoder;
mod error;
mod types;

pub use decoder::BsonDecoder;
pub use encoder::BsonEncoder;
pub use error::BsonError;
pub use types::{ext_tag, BsonBytes};

use crate::PackValue;

pub fn encode(value: &PackValue) -> Result<BsonBytes, BsonError> {
    BsonEncoder::new().encode(value)
}

pub fn decode(data: &[u8]) -> Result<PackValue, BsonError> {
    BsonDecoder::new(data).decode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_a_document() {
        let value = PackValue::Object(vec![
            ("a".to_string(), PackValue::Int(1)),
            ("b".to_string(), PackValue::Array(vec![PackValue::Bool(true), PackValue::Null])),
        ]);
        let bytes = encode(&value).unwrap();
        assert_eq!(decode(&bytes).unwrap(), value);
    }
}
