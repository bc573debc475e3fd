//! CSON encoder/decoder error type.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CsonError {
    #[error("invalid CSON at byte {0}")]
    Invalid(usize),
    #[error("invalid UTF-8 at byte {0}")]
    InvalidUtf8(usize),
    #[error("unterminated string starting at byte {0}")]
    UnterminatedString(usize),
    #[error("recursion depth exceeded at byte {0}")]
    DepthExceeded(usize),
}
