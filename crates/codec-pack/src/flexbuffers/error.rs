//! FlexBuffers decode errors.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlexBufferError {
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),
    #[error("invalid UTF-8 in string at byte {0}")]
    InvalidUtf8(usize),
    #[error("unknown value tag {0} at byte {1}")]
    UnknownTag(u8, usize),
    #[error("missing or corrupt root footer")]
    InvalidFooter,
}
