//! Error types for EJSON encoding and decoding.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum EjsonEncodeError {
    /// Attempted to encode an invalid Date (NaN timestamp).
    InvalidDate,
}

impl fmt::Display for EjsonEncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EjsonEncodeError::InvalidDate => write!(f, "Invalid Date"),
        }
    }
}

impl std::error::Error for EjsonEncodeError {}

#[derive(Debug, Clone, PartialEq)]
pub enum EjsonDecodeError {
    InvalidJson(usize),
    InvalidUtf8,
    InvalidObjectId,
    InvalidInt32,
    InvalidInt64,
    InvalidDouble,
    InvalidDecimal128,
    InvalidBinary,
    InvalidUuid,
    InvalidCode,
    InvalidCodeWithScope,
    InvalidSymbol,
    InvalidTimestamp,
    InvalidRegularExpression,
    InvalidDbPointer,
    InvalidDate,
    InvalidMinKey,
    InvalidMaxKey,
    InvalidUndefined,
    /// Extra keys found where not allowed (strict single-key wrapper).
    ExtraKeys(&'static str),
}

impl fmt::Display for EjsonDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EjsonDecodeError::InvalidJson(pos) => write!(f, "Invalid JSON at position {pos}"),
            EjsonDecodeError::InvalidUtf8 => write!(f, "Invalid UTF-8"),
            EjsonDecodeError::InvalidObjectId => write!(f, "Invalid ObjectId format"),
            EjsonDecodeError::InvalidInt32 => write!(f, "Invalid Int32 format"),
            EjsonDecodeError::InvalidInt64 => write!(f, "Invalid Int64 format"),
            EjsonDecodeError::InvalidDouble => write!(f, "Invalid Double format"),
            EjsonDecodeError::InvalidDecimal128 => write!(f, "Invalid Decimal128 format"),
            EjsonDecodeError::InvalidBinary => write!(f, "Invalid Binary format"),
            EjsonDecodeError::InvalidUuid => write!(f, "Invalid UUID format"),
            EjsonDecodeError::InvalidCode => write!(f, "Invalid Code format"),
            EjsonDecodeError::InvalidCodeWithScope => write!(f, "Invalid CodeWScope format"),
            EjsonDecodeError::InvalidSymbol => write!(f, "Invalid Symbol format"),
            EjsonDecodeError::InvalidTimestamp => write!(f, "Invalid Timestamp format"),
            EjsonDecodeError::InvalidRegularExpression => write!(f, "Invalid RegularExpression format"),
            EjsonDecodeError::InvalidDbPointer => write!(f, "Invalid DBPointer format"),
            EjsonDecodeError::InvalidDate => write!(f, "Invalid Date format"),
            EjsonDecodeError::InvalidMinKey => write!(f, "Invalid MinKey format"),
            EjsonDecodeError::InvalidMaxKey => write!(f, "Invalid MaxKey format"),
            EjsonDecodeError::InvalidUndefined => write!(f, "Invalid Undefined format"),
            EjsonDecodeError::ExtraKeys(wrapper) => {
                write!(f, "Invalid {wrapper} format: extra keys not allowed")
            }
        }
    }
}

impl std::error::Error for EjsonDecodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_messages() {
        let cases = [
            (EjsonDecodeError::InvalidJson(10), "Invalid JSON at position 10"),
            (EjsonDecodeError::InvalidBinary, "Invalid Binary format"),
            (EjsonDecodeError::ExtraKeys("$oid"), "Invalid $oid format: extra keys not allowed"),
        ];
        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn decode_error_clone_eq() {
        let a = EjsonDecodeError::InvalidBinary;
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, EjsonDecodeError::InvalidUuid);
    }
}
