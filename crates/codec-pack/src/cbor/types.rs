//! CBOR type aliases.

/// Raw CBOR byte payload.
pub type CborBytes = Vec<u8>;
