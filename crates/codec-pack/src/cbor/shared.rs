//! Free-function convenience wrappers around [`CborEncoderFast`]/[`CborDecoder`].

use crate::PackValue;

use super::{CborDecoder, CborEncoderFast, CborError};

/// Encodes a [`PackValue`] into CBOR bytes using the default (fast) profile.
pub fn encode(data: &PackValue) -> Vec<u8> {
    CborEncoderFast::new().encode(data)
}

/// Decodes CBOR bytes into a [`PackValue`].
pub fn decode(blob: &[u8]) -> Result<PackValue, CborError> {
    CborDecoder::new(blob).decode()
}
