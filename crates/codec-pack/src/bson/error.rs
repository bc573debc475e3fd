//! BSON decode errors.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BsonError {
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),
    #[error("invalid UTF-8 in string at byte {0}")]
    InvalidUtf8(usize),
    #[error("unsupported BSON element type 0x{0:02x} at byte {1}")]
    UnsupportedType(u8, usize),
    #[error("invalid key `__proto__` at byte {0}")]
    InvalidKey(usize),
    #[error("top-level BSON value must be a document")]
    NotADocument,
}
