pub type FlexBytes = Vec<u8>;

/// Value tags. FlexBuffers' real wire format picks its type byte from how a
/// value was packed (inline scalar vs. offset, and at what width); this
/// boundary codec keeps one tag per logical kind instead, trading the
/// original format's width-packing tricks for a simpler self-describing
/// stream.
pub mod tag {
    pub const NULL: u8 = 0x00;
    pub const BOOL_FALSE: u8 = 0x01;
    pub const BOOL_TRUE: u8 = 0x02;
    pub const INT: u8 = 0x03;
    pub const UINT: u8 = 0x04;
    pub const FLOAT: u8 = 0x05;
    pub const STRING: u8 = 0x06;
    pub const BLOB: u8 = 0x07;
    pub const VECTOR: u8 = 0x08;
    pub const MAP: u8 = 0x09;

    pub const ROOT_FOOTER_MAGIC: u8 = 0xfb;
}
