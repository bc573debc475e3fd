//! UBJSON (Universal Binary JSON) codec.

mod decoder;
mod encoder;
mod error;
mod types;

pub use decoder::UbjsonDecoder;
pub use encoder::UbjsonEncoder;
pub use error::UbjsonError;
pub use types::UbjsonBytes;

use crate::PackValue;

pub fn encode(value: &PackValue) -> Result<UbjsonBytes, UbjsonError> {
    UbjsonEncoder::new().encode(value)
}

pub fn decode(data: &[u8]) -> Result<PackValue, UbjsonError> {
    UbjsonDecoder::new(data).decode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_encode_decode() {
        let value = PackValue::Array(vec![PackValue::Int(1), PackValue::Bool(true), PackValue::Null]);
        let bytes = encode(&value).unwrap();
        assert_eq!(decode(&bytes).unwrap(), value);
    }
}
