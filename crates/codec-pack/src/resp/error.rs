//! RESP3 decode errors.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RespError {
    #[error("unexpected byte 0x{0:02x} at byte {1}")]
    UnexpectedByte(u8, usize),
    #[error("end of input")]
    EndOfInput,
    #[error("invalid UTF-8 in string at byte {0}")]
    InvalidUtf8(usize),
    #[error("invalid integer at byte {0}")]
    InvalidInteger(usize),
}
