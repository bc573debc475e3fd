//! CBOR codec wrapper.

use crate::{cbor, EncodingFormat, PackValue};

use super::types::{CodecError, JsonValueCodec};

#[derive(Default)]
pub struct CborJsonValueCodec;

impl CborJsonValueCodec {
    pub fn new() -> Self {
        Self
    }

    pub fn id(&self) -> &'static str {
        "cbor"
    }

    pub fn format(&self) -> EncodingFormat {
        EncodingFormat::Cbor
    }

    pub fn encode(&self, value: &PackValue) -> Result<Vec<u8>, CodecError> {
        Ok(cbor::encode(value))
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<PackValue, CodecError> {
        Ok(cbor::decode(bytes)?)
    }
}

impl JsonValueCodec for CborJsonValueCodec {
    fn id(&self) -> &'static str {
        self.id()
    }

    fn format(&self) -> EncodingFormat {
        self.format()
    }

    fn encode(&self, value: &PackValue) -> Result<Vec<u8>, CodecError> {
        self.encode(value)
    }

    fn decode(&self, bytes: &[u8]) -> Result<PackValue, CodecError> {
        self.decode(bytes)
    }
}
