//! RESP3 type-prefix bytes and extension tags.
#![allow(non_snake_case)]

pub mod Resp {
    pub const NULL: u8 = b'_';
    pub const BOOL: u8 = b'#';
    pub const INT: u8 = b':';
    pub const BIG: u8 = b'(';
    pub const FLOAT: u8 = b',';
    pub const STR_SIMPLE: u8 = b'+';
    pub const STR_BULK: u8 = b'$';
    pub const STR_VERBATIM: u8 = b'=';
    pub const ERR_SIMPLE: u8 = b'-';
    pub const ERR_BULK: u8 = b'!';
    pub const ARR: u8 = b'*';
    pub const SET: u8 = b'~';
    pub const OBJ: u8 = b'%';
    pub const PUSH: u8 = b'>';
    pub const ATTR: u8 = b'|';
}

pub const RESP_EXTENSION_PUSH: u64 = 1;
pub const RESP_EXTENSION_ATTRIBUTES: u64 = 2;
pub const RESP_EXTENSION_VERBATIM_STRING: u64 = 3;
pub const RESP_EXTENSION_SET: u64 = 4;
pub const RESP_EXTENSION_SIMPLE_ERROR: u64 = 5;
pub const RESP_EXTENSION_BULK_ERROR: u64 = 6;
