//! Avro decode errors.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AvroError {
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),
    #[error("invalid UTF-8 in string at byte {0}")]
    InvalidUtf8(usize),
    #[error("invalid zigzag varint at byte {0}")]
    InvalidVarint(usize),
    #[error("unknown value tag {0} at byte {1}")]
    UnknownTag(u8, usize),
    #[error("negative block count at byte {0}")]
    NegativeBlockCount(usize),
}
