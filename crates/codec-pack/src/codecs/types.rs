//! Common codec trait and combined error type.

use crate::{cbor::CborError, json::JsonError, msgpack::MsgPackError, smile::SmileError, EncodingFormat, PackValue};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("CBOR codec error: {0}")]
    Cbor(#[from] CborError),
    #[error("JSON codec error: {0}")]
    Json(#[from] JsonError),
    #[error("MessagePack codec error: {0}")]
    MsgPack(#[from] MsgPackError),
    #[error("Smile codec error: {0}")]
    Smile(#[from] SmileError),
}

/// A binary codec that encodes/decodes [`PackValue`]. Each registry member
/// is a stateless unit struct: this crate's per-format decoders borrow
/// their input for the lifetime of one decode call rather than being
/// reusable owned objects, so there is no per-codec state to hold between
/// calls.
pub trait JsonValueCodec {
    fn id(&self) -> &'static str;
    fn format(&self) -> EncodingFormat;
    fn encode(&self, value: &PackValue) -> Result<Vec<u8>, CodecError>;
    fn decode(&self, bytes: &[u8]) -> Result<PackValue, CodecError>;
}
