//! Smile (v1.0.6) wire-format constants.

pub const HEADER: [u8; 3] = [0x3A, 0x29, 0x0A];

pub const FLAG_SHARED_PROPERTY_NAMES: u8 = 0b0000_0001;
pub const FLAG_SHARED_STRING_VALUES: u8 = 0b0000_0010;
pub const FLAG_RAW_BINARY_ENABLED: u8 = 0b0000_0100;

/// Maximum number of entries either shared-string table holds before a
/// clear-and-restart eviction.
pub const SHARED_STRING_TABLE_CAP: usize = 1024;

// ---- Value-mode tokens ----
pub const TOKEN_EMPTY_STRING: u8 = 0x20;
pub const TOKEN_NULL: u8 = 0x21;
pub const TOKEN_FALSE: u8 = 0x22;
pub const TOKEN_TRUE: u8 = 0x23;
pub const TOKEN_INT32: u8 = 0x24;
pub const TOKEN_INT64: u8 = 0x25;
pub const TOKEN_BIG_INTEGER: u8 = 0x26;
pub const TOKEN_FLOAT32: u8 = 0x28;
pub const TOKEN_FLOAT64: u8 = 0x29;
pub const TOKEN_BIG_DECIMAL: u8 = 0x2A;

pub const TINY_ASCII_START: u8 = 0x40;
pub const TINY_ASCII_END: u8 = 0x5F;
pub const SHORT_ASCII_START: u8 = 0x60;
pub const SHORT_ASCII_END: u8 = 0x7F;
pub const TINY_UNICODE_START: u8 = 0x80;
pub const TINY_UNICODE_END: u8 = 0x9F;
pub const SHORT_UNICODE_START: u8 = 0xA0;
pub const SHORT_UNICODE_END: u8 = 0xBF;
pub const SMALL_INT_START: u8 = 0xC0;
pub const SMALL_INT_END: u8 = 0xDF;

pub const TOKEN_LONG_ASCII: u8 = 0xE0;
pub const TOKEN_LONG_UNICODE: u8 = 0xE4;
pub const TOKEN_BINARY_7BIT: u8 = 0xE8;
pub const LONG_SHARED_VALUE_START: u8 = 0xEC;
pub const LONG_SHARED_VALUE_END: u8 = 0xEF;
pub const SHORT_SHARED_VALUE_START: u8 = 0x01;
pub const SHORT_SHARED_VALUE_END: u8 = 0x1F;

pub const TOKEN_START_ARRAY: u8 = 0xF8;
pub const TOKEN_END_ARRAY: u8 = 0xF9;
pub const TOKEN_START_OBJECT: u8 = 0xFA;
pub const TOKEN_END_STRING_MARKER: u8 = 0xFC;
pub const TOKEN_RAW_BINARY: u8 = 0xFD;
pub const TOKEN_END_OF_CONTENT: u8 = 0xFF;

// ---- Key-mode tokens ----
pub const TOKEN_EMPTY_KEY: u8 = 0x20;
pub const LONG_SHARED_KEY_START: u8 = 0x30;
pub const LONG_SHARED_KEY_END: u8 = 0x33;
pub const TOKEN_LONG_KEY_UNICODE: u8 = 0x34;
pub const SHORT_SHARED_KEY_START: u8 = 0x40;
pub const SHORT_SHARED_KEY_END: u8 = 0x7F;
pub const SHORT_KEY_ASCII_START: u8 = 0x80;
pub const SHORT_KEY_ASCII_END: u8 = 0xBF;
pub const SHORT_KEY_UNICODE_START: u8 = 0xC0;
pub const SHORT_KEY_UNICODE_END: u8 = 0xF7;
pub const TOKEN_END_OBJECT: u8 = 0xFB;
