pub type BsonBytes = Vec<u8>;

/// BSON extension-type tags preserved through [`crate::PackValue::Extension`]
/// for element kinds that have no direct universal-value counterpart.
pub mod ext_tag {
    pub const BINARY: u64 = 0x05;
    pub const OBJECT_ID: u64 = 0x07;
    pub const REGEX: u64 = 0x0b;
    pub const DB_POINTER: u64 = 0x0c;
    pub const TIMESTAMP: u64 = 0x11;
    pub const DECIMAL128: u64 = 0x13;
    pub const MIN_KEY: u64 = 0xff;
    pub const MAX_KEY: u64 = 0x7f;
}
