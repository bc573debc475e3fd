//! [`JsonPackExtension`] — wrapper for MessagePack extensions and CBOR tags.

use crate::PackValue;

/// A wrapper for a MessagePack extension or CBOR tag value.
///
/// When an encoder encounters a [`JsonPackExtension`] it encodes it as a
/// MessagePack extension or CBOR tag. Likewise, a decoder decodes such
/// extensions into a [`JsonPackExtension`] rather than unwrapping them.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPackExtension {
    pub tag: u64,
    pub val: Box<PackValue>,
}

impl JsonPackExtension {
    pub fn new(tag: u64, val: PackValue) -> Self {
        Self {
            tag,
            val: Box::new(val),
        }
    }
}
