//! MongoDB Extended JSON: a `$type`-wrapper convention layered on top of
//! the tolerant JSON codec, carrying BSON-only kinds through plain text.

mod decoder;
mod encoder;
mod error;
mod types;

pub use decoder::EjsonDecoder;
pub use encoder::EjsonEncoder;
pub use error::{EjsonDecodeError, EjsonEncodeError};
pub use types::{ext_tag, EjsonEncoderOptions};

use crate::PackValue;

pub fn encode(value: &PackValue) -> Result<String, EjsonEncodeError> {
    EjsonEncoder::new().encode_to_string(value)
}

pub fn decode(data: &[u8]) -> Result<PackValue, EjsonDecodeError> {
    decoder::decode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip_through_wrappers() {
        let value = PackValue::Extension(Box::new(crate::JsonPackExtension::new(
            ext_tag::MIN_KEY,
            PackValue::Null,
        )));
        let text = encode(&value).unwrap();
        assert_eq!(decode(text.as_bytes()).unwrap(), value);
    }

    #[test]
    fn plain_objects_survive_a_round_trip() {
        let value = PackValue::Object(vec![("name".to_string(), PackValue::Str("x".to_string()))]);
        let text = encode(&value).unwrap();
        assert_eq!(decode(text.as_bytes()).unwrap(), value);
    }
}
