//! Generic path walk over a decoder that exposes header-level navigation
//! primitives, so a lookup costs only the bytes it skips rather than a
//! full decode.

use crate::PackValue;

use super::error::PathError;
use super::types::{Path, PathSegment};

pub fn find_in_msgpack(data: &[u8], path: &Path) -> Result<PackValue, PathError> {
    use crate::msgpack::MsgPackDecoder;
    let mut dec = MsgPackDecoder::new(data);
    for segment in path {
        match segment {
            PathSegment::Key(key) => dec.find_key(key).map_err(map_msgpack)?,
            PathSegment::Index(index) => dec.find_index(*index).map_err(map_msgpack)?,
        }
    }
    dec.read_any(0).map_err(PathError::from)
}

pub fn find_in_cbor(data: &[u8], path: &Path) -> Result<PackValue, PathError> {
    use crate::cbor::CborDecoder;
    let mut dec = CborDecoder::new(data);
    for segment in path {
        match segment {
            PathSegment::Key(key) => dec.find_key(key).map_err(map_cbor)?,
            PathSegment::Index(index) => dec.find_index(*index).map_err(map_cbor)?,
        }
    }
    dec.read_any(0).map_err(PathError::from)
}

fn map_msgpack(err: crate::msgpack::MsgPackError) -> PathError {
    match err {
        crate::msgpack::MsgPackError::KeyNotFound => PathError::KeyNotFound,
        crate::msgpack::MsgPackError::IndexOutOfBounds => PathError::IndexOutOfBounds,
        crate::msgpack::MsgPackError::NotObj(_) => PathError::ExpectedKey,
        crate::msgpack::MsgPackError::NotArr(_) => PathError::ExpectedIndex,
        other => PathError::MsgPack(other),
    }
}

fn map_cbor(err: crate::cbor::CborError) -> PathError {
    match err {
        crate::cbor::CborError::KeyNotFound => PathError::KeyNotFound,
        crate::cbor::CborError::IndexOutOfBounds => PathError::IndexOutOfBounds,
        other => PathError::Cbor(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msgpack::MsgPackEncoder;
    use crate::PackValue;

    #[test]
    fn finds_nested_key_in_msgpack() {
        let value = PackValue::Object(vec![(
            "a".to_string(),
            PackValue::Object(vec![("b".to_string(), PackValue::Int(7))]),
        )]);
        let bytes = MsgPackEncoder::new().encode(&value);
        let path: Path = vec![PathSegment::Key("a".to_string()), PathSegment::Key("b".to_string())];
        assert_eq!(find_in_msgpack(&bytes, &path).unwrap(), PackValue::Int(7));
    }

    #[test]
    fn finds_array_element_in_msgpack() {
        let value = PackValue::Array(vec![PackValue::Int(1), PackValue::Int(2), PackValue::Int(3)]);
        let bytes = MsgPackEncoder::new().encode(&value);
        let path: Path = vec![PathSegment::Index(2)];
        assert_eq!(find_in_msgpack(&bytes, &path).unwrap(), PackValue::Int(3));
    }

    #[test]
    fn missing_key_is_an_error() {
        let value = PackValue::Object(vec![("a".to_string(), PackValue::Int(1))]);
        let bytes = MsgPackEncoder::new().encode(&value);
        let path: Path = vec![PathSegment::Key("missing".to_string())];
        assert_eq!(find_in_msgpack(&bytes, &path), Err(PathError::KeyNotFound));
    }
}
