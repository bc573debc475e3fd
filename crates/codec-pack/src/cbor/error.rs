//! CBOR decode errors.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CborError {
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),
    #[error("invalid payload at byte {0}")]
    InvalidPayload(usize),
    #[error("unsupported value")]
    Unsupported,
    #[error("unexpected major type {0} at byte {1}")]
    UnexpectedMajor(u8, usize),
    #[error("unexpected minor {0} at byte {1}")]
    UnexpectedMinor(u8, usize),
    #[error("unexpected chunk major type {0} in indefinite byte string at byte {1}")]
    UnexpectedBinChunkMajor(u8, usize),
    #[error("unexpected chunk minor in indefinite byte string at byte {0}")]
    UnexpectedBinChunkMinor(usize),
    #[error("unexpected chunk major type {0} in indefinite text string at byte {1}")]
    UnexpectedStrChunkMajor(u8, usize),
    #[error("unexpected chunk minor in indefinite text string at byte {0}")]
    UnexpectedStrChunkMinor(usize),
    #[error("object key at byte {0} is not a text string")]
    UnexpectedObjKey(usize),
    #[error("unexpected break code while reading object at byte {0}")]
    UnexpectedObjBreak(usize),
    #[error("invalid length value at byte {0}")]
    InvalidSize(usize),
    #[error("key not found")]
    KeyNotFound,
    #[error("index out of bounds")]
    IndexOutOfBounds,
    #[error("expected major type 3 (text string) at byte {0}")]
    UnexpectedStrMajor(usize),
    #[error("recursion depth exceeded at byte {0}")]
    DepthExceeded(usize),
    #[error("invalid UTF-8 at byte {0}")]
    InvalidUtf8(usize),
}
