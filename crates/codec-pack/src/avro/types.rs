pub type AvroBytes = Vec<u8>;

/// Value tags prefixing each encoded value. Real Avro resolves a value's
/// type from an external schema; this boundary codec is schemaless, so it
/// carries a one-byte tag instead, keeping the wire self-describing enough
/// to decode without one.
pub mod tag {
    pub const NULL: u8 = 0;
    pub const BOOL_FALSE: u8 = 1;
    pub const BOOL_TRUE: u8 = 2;
    pub const INT: u8 = 3;
    pub const LONG: u8 = 4;
    pub const FLOAT: u8 = 5;
    pub const DOUBLE: u8 = 6;
    pub const BYTES: u8 = 7;
    pub const STRING: u8 = 8;
    pub const ARRAY: u8 = 9;
    pub const MAP: u8 = 10;
    pub const FIXED: u8 = 11;
}
