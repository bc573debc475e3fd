//! Path navigation errors.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("object key not found")]
    KeyNotFound,
    #[error("array index out of bounds")]
    IndexOutOfBounds,
    #[error("path segment expected an object key but the container is an array")]
    ExpectedKey,
    #[error("path segment expected an array index but the container is an object")]
    ExpectedIndex,
    #[error("this encoding does not support path navigation")]
    UnsupportedFormat,
    #[error("messagepack error: {0}")]
    MsgPack(#[from] crate::msgpack::MsgPackError),
    #[error("cbor error: {0}")]
    Cbor(#[from] crate::cbor::CborError),
}
