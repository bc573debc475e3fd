//! Redis RESP3 protocol codec, with a RESP2-compatible legacy encoder
//! and an incremental streaming decoder.

pub mod constants;
mod decoder;
mod encoder;
mod encoder_legacy;
pub mod extensions;
mod error;
mod streaming_decoder;

pub use constants::{Resp, RESP_EXTENSION_ATTRIBUTES, RESP_EXTENSION_PUSH, RESP_EXTENSION_VERBATIM_STRING};
pub use decoder::RespDecoder;
pub use encoder::RespEncoder;
pub use encoder_legacy::RespEncoderLegacy;
pub use error::RespError;
pub use streaming_decoder::RespStreamingDecoder;

use crate::PackValue;

pub fn encode(value: &PackValue) -> Vec<u8> {
    RespEncoder::new().encode(value)
}

pub fn decode(data: &[u8]) -> Result<PackValue, RespError> {
    RespDecoder::new(data).decode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_encode_decode() {
        let value = PackValue::Array(vec![PackValue::Int(1), PackValue::Str("a".to_string())]);
        let bytes = encode(&value);
        assert_eq!(decode(&bytes).unwrap(), value);
    }
}
