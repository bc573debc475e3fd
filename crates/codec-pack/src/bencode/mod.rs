//! Bencode (BitTorrent) codec.

mod decoder;
mod encoder;
mod error;
mod types;

pub use decoder::BencodeDecoder;
pub use encoder::BencodeEncoder;
pub use error::BencodeError;
pub use types::BencodeBytes;

use crate::PackValue;

pub fn encode(value: &PackValue) -> BencodeBytes {
    BencodeEncoder::new().encode(value)
}

pub fn decode(data: &[u8]) -> Result<PackValue, BencodeError> {
    BencodeDecoder::new(data).decode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_encode_decode() {
        let value = PackValue::Object(vec![
            ("cow".to_string(), PackValue::Str("moo".to_string())),
            ("spam".to_string(), PackValue::Str("eggs".to_string())),
        ]);
        let bytes = encode(&value);
        assert_eq!(decode(&bytes).unwrap(), value);
    }
}
