//! [`JsonPackValue`] — pre-encoded / raw byte span wrapper.

/// A wrapper for a pre-encoded value or an opaque raw byte span.
///
/// An encoder that encounters a [`JsonPackValue`] copies `val` verbatim into
/// the output rather than re-encoding it. A decoder asked to capture a value
/// "as raw" (rather than walking its contents) produces one of these,
/// pointing at the exact byte span of that value in the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPackValue {
    pub val: Vec<u8>,
}

impl JsonPackValue {
    pub fn new(val: Vec<u8>) -> Self {
        Self { val }
    }
}
