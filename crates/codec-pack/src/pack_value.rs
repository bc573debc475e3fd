//! The universal value model shared by every codec in this crate.

use crate::{JsonPackExtension, JsonPackValue};

/// A typed-array payload carried by CBOR's RFC 8746 tags. Other formats
/// that cannot represent a typed array natively fall back to `Array`.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArray {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Uint8(Vec<u8>),
    Uint16(Vec<u16>),
    Uint32(Vec<u32>),
    Uint64(Vec<u64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

/// The universal value every codec in this crate encodes from and decodes
/// into. A codec's wire format determines which variants are reachable: JSON
/// can never produce `Bytes`, `BigInt`, or `Extension`, while CBOR can
/// produce all of them.
#[derive(Debug, Clone, PartialEq)]
pub enum PackValue {
    Null,
    Bool(bool),
    /// A signed integer that fits in 64 bits.
    Int(i64),
    /// An unsigned integer that fits in 64 bits. Kept distinct from `Int`
    /// because CBOR and MessagePack both distinguish unsigned from negative
    /// integers on the wire.
    UInt(u64),
    /// An arbitrary-precision integer, stored as a two's-complement byte
    /// string the way CBOR tags 2/3 and MessagePack's bigint extension do.
    BigInt(i128),
    Float32(f32),
    Float64(f64),
    Bytes(Vec<u8>),
    Str(String),
    Array(Vec<PackValue>),
    /// A sequence of string-keyed pairs. Insertion order is preserved.
    Object(Vec<(String, PackValue)>),
    /// A sequence of arbitrarily-keyed pairs, for formats (CBOR, MessagePack)
    /// that allow non-string map keys.
    Map(Vec<(PackValue, PackValue)>),
    /// A tagged wrapper: CBOR tag, MessagePack extension, RESP3 push/attribute/
    /// verbatim-string carrier.
    Extension(Box<JsonPackExtension>),
    /// An opaque pre-encoded fragment, copied verbatim by encoders and
    /// captured verbatim by decoders instructed to read "as raw value."
    Raw(JsonPackValue),
    TypedArray(TypedArray),
}

impl PackValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PackValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PackValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PackValue]> {
        match self {
            PackValue::Array(a) => Some(a.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, PackValue)]> {
        match self {
            PackValue::Object(o) => Some(o.as_slice()),
            _ => None,
        }
    }

    /// Returns the value as an `i64`, widening `UInt` when it fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PackValue::Int(n) => Some(*n),
            PackValue::UInt(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PackValue::Float32(f) => Some(*f as f64),
            PackValue::Float64(f) => Some(*f),
            PackValue::Int(n) => Some(*n as f64),
            PackValue::UInt(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PackValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            PackValue::Bytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    /// Looks up a key in an `Object`, returning `None` for any other variant
    /// or a missing key. On duplicate keys the last occurrence wins, matching
    /// decoder behavior.
    pub fn get(&self, key: &str) -> Option<&PackValue> {
        match self {
            PackValue::Object(pairs) => pairs.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<bool> for PackValue {
    fn from(v: bool) -> Self {
        PackValue::Bool(v)
    }
}

impl From<i64> for PackValue {
    fn from(v: i64) -> Self {
        PackValue::Int(v)
    }
}

impl From<u64> for PackValue {
    fn from(v: u64) -> Self {
        PackValue::UInt(v)
    }
}

impl From<f64> for PackValue {
    fn from(v: f64) -> Self {
        PackValue::Float64(v)
    }
}

impl From<String> for PackValue {
    fn from(v: String) -> Self {
        PackValue::Str(v)
    }
}

impl From<&str> for PackValue {
    fn from(v: &str) -> Self {
        PackValue::Str(v.to_string())
    }
}

impl From<Vec<u8>> for PackValue {
    fn from(v: Vec<u8>) -> Self {
        PackValue::Bytes(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_get_returns_last_duplicate() {
        let v = PackValue::Object(vec![
            ("a".into(), PackValue::Int(1)),
            ("a".into(), PackValue::Int(2)),
        ]);
        assert_eq!(v.get("a"), Some(&PackValue::Int(2)));
        assert_eq!(v.get("missing"), None);
    }

    #[test]
    fn as_i64_widens_uint_when_it_fits() {
        assert_eq!(PackValue::UInt(42).as_i64(), Some(42));
        assert_eq!(PackValue::UInt(u64::MAX).as_i64(), None);
    }
}
