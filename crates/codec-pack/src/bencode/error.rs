//! Bencode decode errors.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BencodeError {
    #[error("unexpected byte 0x{0:02x} at byte {1}")]
    UnexpectedByte(u8, usize),
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),
    #[error("invalid UTF-8 in string at byte {0}")]
    InvalidUtf8(usize),
    #[error("invalid key `__proto__` at byte {0}")]
    InvalidKey(usize),
    #[error("non-string dictionary key at byte {0}")]
    NonStringKey(usize),
}
