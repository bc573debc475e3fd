//! Tolerant JSON codec family: strict/partial/DAG decoders, three encoders.

mod decoder;
mod decoder_dag;
mod decoder_partial;
mod encoder;
mod encoder_dag;
mod encoder_stable;
mod error;
mod types;
mod util;

pub use decoder::JsonDecoder;
pub use decoder_dag::JsonDecoderDag;
pub use decoder_partial::JsonDecoderPartial;
pub use encoder::JsonEncoder;
pub use encoder_dag::JsonEncoderDag;
pub use encoder_stable::JsonEncoderStable;
pub use error::JsonError;
pub use types::JsonUint8Array;

use crate::PackValue;

pub fn encode(value: &PackValue) -> Vec<u8> {
    JsonEncoder::new().encode(value)
}

pub fn decode(data: &[u8]) -> Result<PackValue, JsonError> {
    JsonDecoder::new(data).decode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let value = PackValue::Object(vec![
            ("a".into(), PackValue::UInt(1)),
            ("b".into(), PackValue::Str("x".into())),
        ]);
        let bytes = encode(&value);
        assert_eq!(decode(&bytes).unwrap(), value);
    }
}
