//! Cursor-advancing path lookups over encoded bytes, for formats whose
//! decoder exposes `findKey`/`findIndex`/`skipAny` primitives. Skips
//! siblings without decoding them; cost is proportional to bytes skipped,
//! not to the total input size.

mod error;
mod navigator;
mod types;

pub use error::PathError;
pub use navigator::{find_in_cbor, find_in_msgpack};
pub use types::{Path, PathSegment};

use crate::{EncodingFormat, PackValue};

/// Reads the value at `path` inside `data`, encoded as `format`.
///
/// Only formats with a header-navigating decoder are supported; others
/// return [`PathError::UnsupportedFormat`].
pub fn read_at(format: EncodingFormat, data: &[u8], path: &Path) -> Result<PackValue, PathError> {
    match format {
        EncodingFormat::MsgPack => find_in_msgpack(data, path),
        EncodingFormat::Cbor => find_in_cbor(data, path),
        _ => Err(PathError::UnsupportedFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cbor;

    #[test]
    fn read_at_dispatches_by_format() {
        let value = PackValue::Object(vec![("x".to_string(), PackValue::Int(9))]);
        let bytes = cbor::encode(&value);
        let path: Path = vec![PathSegment::Key("x".to_string())];
        assert_eq!(read_at(EncodingFormat::Cbor, &bytes, &path).unwrap(), PackValue::Int(9));
    }

    #[test]
    fn unsupported_format_is_reported() {
        let path: Path = vec![PathSegment::Key("x".to_string())];
        assert_eq!(read_at(EncodingFormat::Json, &[], &path), Err(PathError::UnsupportedFormat));
    }
}
