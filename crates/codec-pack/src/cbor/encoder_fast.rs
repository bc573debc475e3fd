//! `CborEncoderFast` — minimal-dispatch CBOR encoder favoring definite lengths.
//!
//! No stable key ordering; prefers writing directly into the backing buffer
//! over intermediate allocations.

use bytepack_buffers::Writer;

use super::constants::*;
use crate::{JsonPackValue, PackValue, TypedArray};

pub struct CborEncoderFast {
    pub writer: Writer,
}

impl Default for CborEncoderFast {
    fn default() -> Self {
        Self::new()
    }
}

impl CborEncoderFast {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    pub fn encode(&mut self, value: &PackValue) -> Vec<u8> {
        self.writer.reset();
        self.write_any(value);
        self.writer.flush()
    }

    pub fn write_any(&mut self, value: &PackValue) {
        match value {
            PackValue::Null => self.write_null(),
            PackValue::Bool(b) => self.write_boolean(*b),
            PackValue::Int(i) => self.write_integer(*i),
            PackValue::UInt(u) => self.write_u_integer(*u),
            PackValue::BigInt(i) => self.write_big_int(*i),
            PackValue::Float32(f) => self.write_float32(*f),
            PackValue::Float64(f) => self.write_float64(*f),
            PackValue::Bytes(b) => self.write_bin(b),
            PackValue::Str(s) => self.write_str(s),
            PackValue::Array(arr) => self.write_arr(arr),
            PackValue::Object(obj) => self.write_obj(obj),
            PackValue::Map(pairs) => self.write_map(pairs),
            PackValue::Extension(ext) => self.write_tag(ext.tag, &ext.val),
            PackValue::Raw(raw) => self.write_raw(raw),
            PackValue::TypedArray(arr) => self.write_typed_array(arr),
        }
    }

    pub fn write_end(&mut self) {
        self.writer.u8(CBOR_END);
    }

    pub fn write_null(&mut self) {
        self.writer.u8(0xf6);
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.u8(if b { 0xf5 } else { 0xf4 });
    }

    pub fn write_big_int(&mut self, int: i128) {
        if int >= 0 {
            self.write_big_uint(int as u128);
        } else {
            self.write_big_sint(int);
        }
    }

    pub fn write_big_uint(&mut self, uint: u128) {
        if uint <= u64::MAX as u128 {
            self.write_u_integer(uint as u64);
        } else {
            self.writer.u8u64(0x1b, u64::MAX);
        }
    }

    pub fn write_big_sint(&mut self, int: i128) {
        if int >= i64::MIN as i128 {
            self.encode_nint(int as i64);
        } else {
            let uint = (-1i128 - int) as u64;
            self.writer.u8u64(0x3b, uint);
        }
    }

    pub fn write_integer(&mut self, int: i64) {
        if int >= 0 {
            self.write_u_integer(int as u64);
        } else {
            self.encode_nint(int);
        }
    }

    pub fn write_u_integer(&mut self, uint: u64) {
        let w = &mut self.writer;
        w.ensure_capacity(9);
        let x = w.x;
        if uint <= 23 {
            w.uint8[x] = OVERLAY_UIN | uint as u8;
            w.x = x + 1;
        } else if uint <= 0xff {
            w.uint8[x] = 0x18;
            w.uint8[x + 1] = uint as u8;
            w.x = x + 2;
        } else if uint <= 0xffff {
            w.uint8[x] = 0x19;
            w.uint8[x + 1..x + 3].copy_from_slice(&(uint as u16).to_be_bytes());
            w.x = x + 3;
        } else if uint <= 0xffffffff {
            w.uint8[x] = 0x1a;
            w.uint8[x + 1..x + 5].copy_from_slice(&(uint as u32).to_be_bytes());
            w.x = x + 5;
        } else {
            w.uint8[x] = 0x1b;
            w.uint8[x + 1..x + 9].copy_from_slice(&uint.to_be_bytes());
            w.x = x + 9;
        }
    }

    pub fn encode_nint(&mut self, int: i64) {
        let uint = (-1i64).wrapping_sub(int) as u64;
        let w = &mut self.writer;
        w.ensure_capacity(9);
        let x = w.x;
        if uint < 24 {
            w.uint8[x] = OVERLAY_NIN | uint as u8;
            w.x = x + 1;
        } else if uint <= 0xff {
            w.uint8[x] = 0x38;
            w.uint8[x + 1] = uint as u8;
            w.x = x + 2;
        } else if uint <= 0xffff {
            w.uint8[x] = 0x39;
            w.uint8[x + 1..x + 3].copy_from_slice(&(uint as u16).to_be_bytes());
            w.x = x + 3;
        } else if uint <= 0xffffffff {
            w.uint8[x] = 0x3a;
            w.uint8[x + 1..x + 5].copy_from_slice(&(uint as u32).to_be_bytes());
            w.x = x + 5;
        } else {
            w.uint8[x] = 0x3b;
            w.uint8[x + 1..x + 9].copy_from_slice(&uint.to_be_bytes());
            w.x = x + 9;
        }
    }

    pub fn write_float32(&mut self, f: f32) {
        self.writer.u8f32(0xfa, f);
    }

    pub fn write_float64(&mut self, f: f64) {
        self.writer.u8f64(0xfb, f);
    }

    /// Picks float32 when it round-trips exactly, else float64.
    pub fn write_number(&mut self, num: f64) {
        if is_f32_roundtrip(num) {
            self.write_float32(num as f32);
        } else {
            self.write_float64(num);
        }
    }

    pub fn write_bin(&mut self, buf: &[u8]) {
        self.write_bin_hdr(buf.len());
        self.writer.buf(buf);
    }

    pub fn write_bin_hdr(&mut self, length: usize) {
        let w = &mut self.writer;
        if length <= 23 {
            w.u8(OVERLAY_BIN | length as u8);
        } else if length <= 0xff {
            w.u8(0x58);
            w.u8(length as u8);
        } else if length <= 0xffff {
            w.u8(0x59);
            w.u16(length as u16);
        } else if length <= 0xffffffff {
            w.u8(0x5a);
            w.u32(length as u32);
        } else {
            w.u8(0x5b);
            w.u64(length as u64);
        }
    }

    /// Writes a CBOR text string using the max-size-guess header strategy:
    /// the header slot is reserved for the worst-case UTF-8 byte count
    /// (`char_count * 4`), the bytes are written, then the header is patched
    /// with the true length. Avoids a separate length-counting pass.
    pub fn write_str(&mut self, s: &str) {
        let char_count = s.chars().count();
        let max_size = char_count * 4;
        let byte_len = s.len();

        self.writer.ensure_capacity(5 + byte_len);

        let length_offset;
        if max_size <= 23 {
            length_offset = self.writer.x;
            self.writer.x += 1;
        } else if max_size <= 0xff {
            self.writer.uint8[self.writer.x] = 0x78;
            self.writer.x += 1;
            length_offset = self.writer.x;
            self.writer.x += 1;
        } else if max_size <= 0xffff {
            self.writer.uint8[self.writer.x] = 0x79;
            self.writer.x += 1;
            length_offset = self.writer.x;
            self.writer.x += 2;
        } else {
            self.writer.uint8[self.writer.x] = 0x7a;
            self.writer.x += 1;
            length_offset = self.writer.x;
            self.writer.x += 4;
        }

        let x = self.writer.x;
        self.writer.uint8[x..x + byte_len].copy_from_slice(s.as_bytes());
        self.writer.x = x + byte_len;

        if max_size <= 23 {
            self.writer.uint8[length_offset] = OVERLAY_STR | byte_len as u8;
        } else if max_size <= 0xff {
            self.writer.uint8[length_offset] = byte_len as u8;
        } else if max_size <= 0xffff {
            self.writer
                .uint8[length_offset..length_offset + 2]
                .copy_from_slice(&(byte_len as u16).to_be_bytes());
        } else {
            self.writer
                .uint8[length_offset..length_offset + 4]
                .copy_from_slice(&(byte_len as u32).to_be_bytes());
        }
    }

    pub fn write_str_hdr(&mut self, length: usize) {
        let w = &mut self.writer;
        if length <= 23 {
            w.u8(OVERLAY_STR | length as u8);
        } else if length <= 0xff {
            w.u8(0x78);
            w.u8(length as u8);
        } else if length <= 0xffff {
            w.u8(0x79);
            w.u16(length as u16);
        } else if length <= 0xffffffff {
            w.u8(0x7a);
            w.u32(length as u32);
        } else {
            w.u8(0x7b);
            w.u64(length as u64);
        }
    }

    pub fn write_arr(&mut self, arr: &[PackValue]) {
        self.write_arr_hdr(arr.len());
        for item in arr {
            self.write_any(item);
        }
    }

    pub fn write_arr_hdr(&mut self, length: usize) {
        let w = &mut self.writer;
        if length <= 23 {
            w.u8(OVERLAY_ARR | length as u8);
        } else if length <= 0xff {
            w.u8(0x98);
            w.u8(length as u8);
        } else if length <= 0xffff {
            w.u8(0x99);
            w.u16(length as u16);
        } else if length <= 0xffffffff {
            w.u8(0x9a);
            w.u32(length as u32);
        } else {
            w.u8(0x9b);
            w.u64(length as u64);
        }
    }

    pub fn write_obj(&mut self, pairs: &[(String, PackValue)]) {
        self.write_obj_hdr(pairs.len());
        for (key, value) in pairs {
            self.write_str(key);
            self.write_any(value);
        }
    }

    pub fn write_obj_hdr(&mut self, length: usize) {
        let w = &mut self.writer;
        if length <= 23 {
            w.u8(OVERLAY_MAP | length as u8);
        } else if length <= 0xff {
            w.u8(0xb8);
            w.u8(length as u8);
        } else if length <= 0xffff {
            w.u8(0xb9);
            w.u16(length as u16);
        } else if length <= 0xffffffff {
            w.u8(0xba);
            w.u32(length as u32);
        } else {
            w.u8(0xbb);
            w.u64(length as u64);
        }
    }

    /// Writes a `Map` (major type 5) with arbitrary key values, distinct from
    /// `Object`'s string-only keys.
    pub fn write_map(&mut self, pairs: &[(PackValue, PackValue)]) {
        self.write_obj_hdr(pairs.len());
        for (key, value) in pairs {
            self.write_any(key);
            self.write_any(value);
        }
    }

    pub fn write_tag(&mut self, tag: u64, value: &PackValue) {
        self.write_tag_hdr(tag);
        self.write_any(value);
    }

    pub fn write_tag_hdr(&mut self, tag: u64) {
        let w = &mut self.writer;
        if tag <= 23 {
            w.u8(OVERLAY_TAG | tag as u8);
        } else if tag <= 0xff {
            w.u8(0xd8);
            w.u8(tag as u8);
        } else if tag <= 0xffff {
            w.u8(0xd9);
            w.u16(tag as u16);
        } else if tag <= 0xffffffff {
            w.u8(0xda);
            w.u32(tag as u32);
        } else {
            w.u8(0xdb);
            w.u64(tag);
        }
    }

    /// Writes a pre-encoded fragment verbatim.
    pub fn write_raw(&mut self, raw: &JsonPackValue) {
        self.writer.buf(&raw.val);
    }

    fn write_typed_array(&mut self, arr: &TypedArray) {
        let (tag, bytes): (u64, Vec<u8>) = match arr {
            TypedArray::Uint8(v) => (typed_array_tag::UINT8, v.clone()),
            TypedArray::Int8(v) => (typed_array_tag::SINT8, v.iter().map(|&n| n as u8).collect()),
            TypedArray::Uint16(v) => (
                typed_array_tag::UINT16_LE,
                v.iter().flat_map(|n| n.to_le_bytes()).collect(),
            ),
            TypedArray::Int16(v) => (
                typed_array_tag::SINT16_LE,
                v.iter().flat_map(|n| n.to_le_bytes()).collect(),
            ),
            TypedArray::Uint32(v) => (
                typed_array_tag::UINT32_LE,
                v.iter().flat_map(|n| n.to_le_bytes()).collect(),
            ),
            TypedArray::Int32(v) => (
                typed_array_tag::SINT32_LE,
                v.iter().flat_map(|n| n.to_le_bytes()).collect(),
            ),
            TypedArray::Uint64(v) => (
                typed_array_tag::UINT64_LE,
                v.iter().flat_map(|n| n.to_le_bytes()).collect(),
            ),
            TypedArray::Int64(v) => (
                typed_array_tag::SINT64_LE,
                v.iter().flat_map(|n| n.to_le_bytes()).collect(),
            ),
            TypedArray::Float32(v) => (
                typed_array_tag::FLOAT32_LE,
                v.iter().flat_map(|n| n.to_le_bytes()).collect(),
            ),
            TypedArray::Float64(v) => (
                typed_array_tag::FLOAT64_LE,
                v.iter().flat_map(|n| n.to_le_bytes()).collect(),
            ),
        };
        self.write_tag_hdr(tag);
        self.write_bin(&bytes);
    }

    // ---- Streaming ----

    pub fn write_start_str(&mut self) {
        self.writer.u8(0x7f);
    }

    pub fn write_start_bin(&mut self) {
        self.writer.u8(0x5f);
    }

    pub fn write_start_arr(&mut self) {
        self.writer.u8(0x9f);
    }

    pub fn write_start_obj(&mut self) {
        self.writer.u8(0xbf);
    }
}
