//! CBOR (RFC 8949) codec: four encoder profiles sharing one decoder.
//!
//! `encoder_fast` favors minimal dispatch, `encoder_stable` sorts object keys
//! for deterministic output, `encoder_dag` layers the DAG-CBOR canonical
//! profile on top. [`CborDecoder`] reads all three encodings back.

mod constants;
mod convert;
mod decoder;
mod encoder;
mod encoder_dag;
mod encoder_fast;
mod encoder_stable;
mod error;
mod shared;
mod types;

pub use convert::{cbor_to_json, cbor_to_json_owned, json_to_cbor};
pub use decoder::CborDecoder;
pub use encoder::CborEncoder;
pub use encoder_dag::CborEncoderDag;
pub use encoder_fast::CborEncoderFast;
pub use encoder_stable::CborEncoderStable;
pub use error::CborError;
pub use shared::{decode, encode};
pub use types::CborBytes;

use crate::PackValue;

/// Encodes with [`CborEncoderStable`] and decodes with [`CborDecoder`],
/// confirming the buffer holds exactly one value.
pub fn validate_exact_size(data: &[u8], size: usize) -> Result<(), CborError> {
    CborDecoder::new(data).validate(0, size)
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
    fn validate_exact_size_rejects_trailing_bytes() {
        let bytes = encode(&PackValue::UInt(7));
        assert!(validate_exact_size(&bytes, bytes.len()).is_ok());
        let mut padded = bytes.clone();
        padded.push(0x00);
        assert!(validate_exact_size(&padded, padded.len()).is_err());
    }
}
