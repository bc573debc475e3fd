//! Amazon Ion binary codec, boundary-only: enough of the format to carry a
//! value through an IVM and a local symbol table, without shared symbol
//! tables or Ion's textual syntax.

mod ast;
pub mod constants;
mod decoder;
mod encoder;
mod error;
mod symbols;
mod types;

pub use decoder::IonDecoder;
pub use encoder::IonEncoder;
pub use error::IonError;
pub use types::IonBytes;

use crate::PackValue;

pub fn encode(value: &PackValue) -> Vec<u8> {
    encoder::encode(value)
}

pub fn decode(data: &[u8]) -> Result<PackValue, IonError> {
    decoder::decode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let value = PackValue::Array(vec![
            PackValue::Object(vec![("ok".to_string(), PackValue::Bool(true))]),
            PackValue::Str("ion".to_string()),
        ]);
        let bytes = encode(&value);
        assert_eq!(decode(&bytes).unwrap(), value);
    }

    #[test]
    fn header_is_the_binary_version_marker() {
        let bytes = encode(&PackValue::Null);
        assert_eq!(&bytes[0..4], &constants::ION_BVM);
    }
}
