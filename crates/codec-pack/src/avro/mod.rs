//! Schemaless Avro binary codec. Real Avro resolves types from a writer
//! schema exchanged out of band; this boundary codec instead tags every
//! value with its Avro primitive kind so it can decode without one.

mod decoder;
mod encoder;
mod error;
mod types;

pub use decoder::AvroDecoder;
pub use encoder::AvroEncoder;
pub use error::AvroError;
pub use types::{tag, AvroBytes};

use crate::PackValue;

pub fn encode(value: &PackValue) -> Vec<u8> {
    encoder::encode(value)
}

pub fn decode(data: &[u8]) -> Result<PackValue, AvroError> {
    decoder::decode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let value = PackValue::Object(vec![
            ("name".to_string(), PackValue::Str("avro".to_string())),
            ("values".to_string(), PackValue::Array(vec![PackValue::Int(1), PackValue::Int(2)])),
        ]);
        let bytes = encode(&value);
        assert_eq!(decode(&bytes).unwrap(), value);
    }
}
