//! Smile decode errors.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SmileError {
    #[error("invalid Smile header at byte {0}")]
    InvalidHeader(usize),
    #[error("unsupported Smile version {0}")]
    UnsupportedVersion(u8),
    #[error("invalid token 0x{0:02x} at byte {1}")]
    InvalidToken(u8, usize),
    #[error("invalid shared-string reference index {0} at byte {1}")]
    InvalidReference(usize, usize),
    #[error("malformed VInt at byte {0}")]
    MalformedVInt(usize),
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),
}
