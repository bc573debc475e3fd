//! JSON codec type aliases.

/// Raw JSON UTF-8 payload.
pub type JsonUint8Array = Vec<u8>;
