//! JSON encoder/decoder error type.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JsonError {
    #[error("invalid JSON at byte {0}")]
    Invalid(usize),
    #[error("invalid UTF-8 at byte {0}")]
    InvalidUtf8(usize),
    #[error("invalid key `__proto__` at byte {0}")]
    InvalidKey(usize),
    #[error("recursion depth exceeded at byte {0}")]
    DepthExceeded(usize),
}
