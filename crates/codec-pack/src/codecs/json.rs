//! JSON codec wrapper.

use crate::{json, EncodingFormat, PackValue};

use super::types::{CodecError, JsonValueCodec};

#[derive(Default)]
pub struct JsonJsonValueCodec;

impl JsonJsonValueCodec {
    pub fn new() -> Self {
        Self
    }

    pub fn id(&self) -> &'static str {
        "json"
    }

    pub fn format(&self) -> EncodingFormat {
        EncodingFormat::Json
    }

    pub fn encode(&self, value: &PackValue) -> Result<Vec<u8>, CodecError> {
        Ok(json::encode(value))
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<PackValue, CodecError> {
        Ok(json::decode(bytes)?)
    }
}

impl JsonValueCodec for JsonJsonValueCodec {
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
