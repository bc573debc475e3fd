//! Smile codec wrapper.

use crate::{smile, EncodingFormat, PackValue};

use super::types::{CodecError, JsonValueCodec};

#[derive(Default)]
pub struct SmileJsonValueCodec;

impl SmileJsonValueCodec {
    pub fn new() -> Self {
        Self
    }

    pub fn id(&self) -> &'static str {
        "smile"
    }

    pub fn format(&self) -> EncodingFormat {
        EncodingFormat::Smile
    }

    pub fn encode(&self, value: &PackValue) -> Result<Vec<u8>, CodecError> {
        Ok(smile::encode(value))
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<PackValue, CodecError> {
        Ok(smile::decode(bytes)?)
    }
}

impl JsonValueCodec for SmileJsonValueCodec {
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
