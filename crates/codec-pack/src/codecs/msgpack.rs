//! MessagePack codec wrapper.

use crate::{msgpack, EncodingFormat, PackValue};

use super::types::{CodecError, JsonValueCodec};

#[derive(Default)]
pub struct MsgPackJsonValueCodec;

impl MsgPackJsonValueCodec {
    pub fn new() -> Self {
        Self
    }

    pub fn id(&self) -> &'static str {
        "msgpack"
    }

    pub fn format(&self) -> EncodingFormat {
        EncodingFormat::MsgPack
    }

    pub fn encode(&self, value: &PackValue) -> Result<Vec<u8>, CodecError> {
        Ok(msgpack::encode(value))
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<PackValue, CodecError> {
        Ok(msgpack::decode(bytes)?)
    }
}

impl JsonValueCodec for MsgPackJsonValueCodec {
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
