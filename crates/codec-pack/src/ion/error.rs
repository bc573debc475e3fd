//! Ion decode errors.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IonError {
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),
    #[error("invalid binary version marker")]
    InvalidHeader,
    #[error("invalid UTF-8 in string at byte {0}")]
    InvalidUtf8(usize),
    #[error("unknown symbol id {0} at byte {1}")]
    UnknownSymbol(u32, usize),
    #[error("unsupported type descriptor 0x{0:02x} at byte {1}")]
    UnsupportedType(u8, usize),
}
