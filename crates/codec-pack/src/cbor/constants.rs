//! CBOR wire-format constants (RFC 8949 major types and argument encodings).

pub const MAJOR_UIN: u8 = 0;
pub const MAJOR_NIN: u8 = 1;
pub const MAJOR_BIN: u8 = 2;
pub const MAJOR_STR: u8 = 3;
pub const MAJOR_ARR: u8 = 4;
pub const MAJOR_MAP: u8 = 5;
pub const MAJOR_TAG: u8 = 6;
pub const MAJOR_TKN: u8 = 7;

pub const OVERLAY_UIN: u8 = MAJOR_UIN << 5;
pub const OVERLAY_NIN: u8 = MAJOR_NIN << 5;
pub const OVERLAY_BIN: u8 = MAJOR_BIN << 5;
pub const OVERLAY_STR: u8 = MAJOR_STR << 5;
pub const OVERLAY_ARR: u8 = MAJOR_ARR << 5;
pub const OVERLAY_MAP: u8 = MAJOR_MAP << 5;
pub const OVERLAY_TAG: u8 = MAJOR_TAG << 5;
pub const OVERLAY_TKN: u8 = MAJOR_TKN << 5;

pub const MINOR_MASK: u8 = 0b0001_1111;

/// 2^53 - 1, the largest integer magnitude an `f64` can hold exactly.
pub const MAX_UINT: u64 = 9_007_199_254_740_991;

pub const CBOR_END: u8 = 0xff;

/// RFC 8746 typed-array tags (little-endian variants; host-native arrays
/// produced by this crate always use the little-endian forms).
pub mod typed_array_tag {
    pub const UINT8: u64 = 64;
    pub const UINT8_CLAMPED: u64 = 68;
    pub const SINT8: u64 = 72;
    pub const UINT16_LE: u64 = 69;
    pub const SINT16_LE: u64 = 77;
    pub const UINT32_LE: u64 = 70;
    pub const SINT32_LE: u64 = 78;
    pub const FLOAT32_LE: u64 = 85;
    pub const FLOAT64_LE: u64 = 86;
    pub const UINT64_LE: u64 = 71;
    pub const SINT64_LE: u64 = 79;
}

/// Tag 2 / Tag 3: positive / negative bignum.
pub const TAG_BIGNUM_POSITIVE: u64 = 2;
pub const TAG_BIGNUM_NEGATIVE: u64 = 3;

/// Tag 0 / Tag 1: ISO-8601 / Unix-epoch timestamps.
pub const TAG_DATE_STRING: u64 = 0;
pub const TAG_DATE_EPOCH: u64 = 1;

pub const SELF_DESCRIBE_CBOR: [u8; 3] = [0xd9, 0xd9, 0xf7];

/// Returns `true` if `f` round-trips exactly through an `f32`.
pub fn is_f32_roundtrip(f: f64) -> bool {
    (f as f32) as f64 == f
}
