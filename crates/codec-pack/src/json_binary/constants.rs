//! Data URI prefix constants for the json-binary codec.

/// Binary data URI prefix: `data:application/octet-stream;base64,`
pub const BIN_URI_START: &str = "data:application/octet-stream;base64,";

/// MessagePack URI header (without the trailing comma).
pub const MSGPACK_URI_HEADER: &str = "data:application/msgpack;base64";

/// MessagePack value URI prefix.
pub const MSGPACK_URI_START: &str = "data:application/msgpack;base64,";

/// MessagePack extension URI prefix, followed by the extension tag.
pub const MSGPACK_EXT_START: &str = "data:application/msgpack;base64;ext=";
