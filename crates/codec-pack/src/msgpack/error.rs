//! MessagePack decode/encode errors.

/// Errors produced while decoding or navigating a MessagePack document.
///
/// Every variant that can occur mid-document carries the byte offset at
/// which it was detected, matching the other codecs' error shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MsgPackError {
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),
    #[error("byte {1} is not a valid MessagePack head: 0x{0:02x}")]
    InvalidByte(u8, usize),
    #[error("invalid UTF-8 string at byte {0}")]
    InvalidUtf8(usize),
    #[error("map key at byte {0} is not a string")]
    InvalidKey(usize),
    #[error("recursion depth exceeded at byte {0}")]
    DepthExceeded(usize),
    #[error("key not found")]
    KeyNotFound,
    #[error("index out of bounds")]
    IndexOutOfBounds,
    #[error("expected object at byte {0}")]
    NotObj(usize),
    #[error("expected array at byte {0}")]
    NotArr(usize),
    #[error("expected string at byte {0}")]
    NotStr(usize),
}
