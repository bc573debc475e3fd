//! Smile binary JSON codec: a 7-bit-clean, VInt-based encoding with
//! shared-string tables for property names and string values.

mod bits7;
mod constants;
mod decoder;
mod encoder;
mod error;
mod shared_table;
mod types;
mod vint;

pub use constants::HEADER;
pub use decoder::SmileDecoder;
pub use encoder::SmileEncoder;
pub use error::SmileError;
pub use types::SmileBytes;

use crate::PackValue;

pub fn encode(value: &PackValue) -> SmileBytes {
    SmileEncoder::new().encode(value)
}

pub fn decode(data: &[u8]) -> Result<PackValue, SmileError> {
    SmileDecoder::new(data).decode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let value = PackValue::Object(vec![
            ("a".into(), PackValue::UInt(1)),
            ("b".into(), PackValue::Array(vec![PackValue::Bool(true), PackValue::Null])),
        ]);
        let bytes = encode(&value);
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn header_is_the_smile_magic() {
        let bytes = encode(&PackValue::Null);
        assert_eq!(&bytes[0..3], &HEADER);
    }
}
