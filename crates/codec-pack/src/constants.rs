//! Top-level constants shared across codecs.

/// Binary encoding format identifier, used by the unified codec registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingFormat {
    Cbor = 0,
    MsgPack = 1,
    Json = 2,
    Smile = 3,
}
