//! MessagePack encoder.

use bytepack_buffers::Writer;

use crate::{JsonPackExtension, JsonPackValue, PackValue, TypedArray};

/// Encodes [`PackValue`]s into the MessagePack wire format.
///
/// Heads are chosen as compactly as the format allows: small integers use a
/// single fixint byte, short strings/arrays/maps use their 4-bit embedded
/// length forms, and numbers prefer the narrowest representation that
/// round-trips exactly.
pub struct MsgPackEncoder {
    pub writer: Writer,
}

impl Default for MsgPackEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Encodes `value` into a fresh byte buffer.
    pub fn encode(&mut self, value: &PackValue) -> Vec<u8> {
        self.writer.reset();
        self.write_any(value);
        self.writer.flush()
    }

    pub fn write_any(&mut self, value: &PackValue) {
        match value {
            PackValue::Null => self.write_null(),
            PackValue::Bool(b) => self.write_bool(*b),
            PackValue::Int(n) => self.write_int(*n),
            PackValue::UInt(n) => self.write_uint(*n),
            PackValue::BigInt(n) => self.write_big_int(*n),
            PackValue::Float32(f) => self.write_f32(*f),
            PackValue::Float64(f) => self.write_f64(*f),
            PackValue::Bytes(b) => self.write_bin(b),
            PackValue::Str(s) => self.write_str(s),
            PackValue::Array(items) => self.write_arr(items),
            PackValue::Object(pairs) => self.write_obj(pairs),
            PackValue::Map(pairs) => self.write_map(pairs),
            PackValue::Extension(ext) => self.write_extension(ext),
            PackValue::Raw(raw) => self.write_raw(raw),
            PackValue::TypedArray(arr) => self.write_typed_array(arr),
        }
    }

    pub fn write_null(&mut self) {
        self.writer.u8(0xc0);
    }

    pub fn write_bool(&mut self, b: bool) {
        self.writer.u8(if b { 0xc3 } else { 0xc2 });
    }

    pub fn write_int(&mut self, n: i64) {
        if n >= 0 {
            self.write_uint(n as u64);
            return;
        }
        if n >= -32 {
            self.writer.i8(n as i8);
        } else if n >= i8::MIN as i64 {
            self.writer.u8(0xd0);
            self.writer.i8(n as i8);
        } else if n >= i16::MIN as i64 {
            self.writer.u8u16(0xd1, n as i16 as u16);
        } else if n >= i32::MIN as i64 {
            self.writer.u8u32(0xd2, n as i32 as u32);
        } else {
            self.writer.u8u64(0xd3, n as u64);
        }
    }

    pub fn write_uint(&mut self, n: u64) {
        if n <= 0x7f {
            self.writer.u8(n as u8);
        } else if n <= u8::MAX as u64 {
            self.writer.u8(0xcc);
            self.writer.u8(n as u8);
        } else if n <= u16::MAX as u64 {
            self.writer.u8u16(0xcd, n as u16);
        } else if n <= u32::MAX as u64 {
            self.writer.u8u32(0xce, n as u32);
        } else {
            self.writer.u8u64(0xcf, n);
        }
    }

    /// Encodes a wide integer as a MessagePack extension (type -1) carrying
    /// its big-endian two's-complement bytes, the convention used by
    /// interop tooling for values outside the 64-bit range.
    pub fn write_big_int(&mut self, n: i128) {
        let bytes = n.to_be_bytes();
        let start = bytes.iter().position(|&b| b != 0 && b != 0xff).unwrap_or(15);
        let payload = &bytes[start..];
        self.write_ext_header(payload.len(), -1);
        self.writer.buf(payload);
    }

    pub fn write_f32(&mut self, f: f32) {
        self.writer.u8f32(0xca, f);
    }

    pub fn write_f64(&mut self, f: f64) {
        self.writer.u8f64(0xcb, f);
    }

    /// Picks float32 when it round-trips exactly, else float64.
    pub fn write_number(&mut self, f: f64) {
        if (f as f32) as f64 == f {
            self.write_f32(f as f32);
        } else {
            self.write_f64(f);
        }
    }

    pub fn write_bin(&mut self, data: &[u8]) {
        self.write_bin_hdr(data.len());
        self.writer.buf(data);
    }

    pub fn write_bin_hdr(&mut self, len: usize) {
        if len <= u8::MAX as usize {
            self.writer.u8(0xc4);
            self.writer.u8(len as u8);
        } else if len <= u16::MAX as usize {
            self.writer.u8u16(0xc5, len as u16);
        } else {
            self.writer.u8u32(0xc6, len as u32);
        }
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_str_hdr(s.len());
        self.writer.utf8(s);
    }

    pub fn write_str_hdr(&mut self, len: usize) {
        if len <= 31 {
            self.writer.u8(0xa0 | len as u8);
        } else if len <= u8::MAX as usize {
            self.writer.u8(0xd9);
            self.writer.u8(len as u8);
        } else if len <= u16::MAX as usize {
            self.writer.u8u16(0xda, len as u16);
        } else {
            self.writer.u8u32(0xdb, len as u32);
        }
    }

    pub fn write_arr(&mut self, items: &[PackValue]) {
        self.write_arr_hdr(items.len());
        for item in items {
            self.write_any(item);
        }
    }

    pub fn write_arr_hdr(&mut self, len: usize) {
        if len <= 15 {
            self.writer.u8(0x90 | len as u8);
        } else if len <= u16::MAX as usize {
            self.writer.u8u16(0xdc, len as u16);
        } else {
            self.writer.u8u32(0xdd, len as u32);
        }
    }

    pub fn write_obj(&mut self, pairs: &[(String, PackValue)]) {
        self.write_obj_hdr(pairs.len());
        for (key, value) in pairs {
            self.write_str(key);
            self.write_any(value);
        }
    }

    pub fn write_map(&mut self, pairs: &[(PackValue, PackValue)]) {
        self.write_obj_hdr(pairs.len());
        for (key, value) in pairs {
            self.write_any(key);
            self.write_any(value);
        }
    }

    pub fn write_obj_hdr(&mut self, len: usize) {
        if len <= 15 {
            self.writer.u8(0x80 | len as u8);
        } else if len <= u16::MAX as usize {
            self.writer.u8u16(0xde, len as u16);
        } else {
            self.writer.u8u32(0xdf, len as u32);
        }
    }

    pub fn write_extension(&mut self, ext: &JsonPackExtension) {
        let mut payload_writer = MsgPackEncoder::new();
        payload_writer.write_any(&ext.val);
        let payload = payload_writer.writer.flush();
        self.write_ext_header(payload.len(), ext.tag as i8);
        self.writer.buf(&payload);
    }

    fn write_ext_header(&mut self, len: usize, tag: i8) {
        match len {
            1 => self.writer.u8(0xd4),
            2 => self.writer.u8(0xd5),
            4 => self.writer.u8(0xd6),
            8 => self.writer.u8(0xd7),
            16 => self.writer.u8(0xd8),
            _ if len <= u8::MAX as usize => {
                self.writer.u8(0xc7);
                self.writer.u8(len as u8);
            }
            _ if len <= u16::MAX as usize => {
                self.writer.u8u16(0xc8, len as u16);
            }
            _ => {
                self.writer.u8u32(0xc9, len as u32);
            }
        }
        self.writer.i8(tag);
    }

    /// Writes a pre-encoded fragment verbatim.
    pub fn write_raw(&mut self, raw: &JsonPackValue) {
        self.writer.buf(&raw.val);
    }

    fn write_typed_array(&mut self, arr: &TypedArray) {
        let values: Vec<PackValue> = match arr {
            TypedArray::Int8(v) => v.iter().map(|&n| PackValue::Int(n as i64)).collect(),
            TypedArray::Int16(v) => v.iter().map(|&n| PackValue::Int(n as i64)).collect(),
            TypedArray::Int32(v) => v.iter().map(|&n| PackValue::Int(n as i64)).collect(),
            TypedArray::Int64(v) => v.iter().map(|&n| PackValue::Int(n)).collect(),
            TypedArray::Uint8(v) => v.iter().map(|&n| PackValue::UInt(n as u64)).collect(),
            TypedArray::Uint16(v) => v.iter().map(|&n| PackValue::UInt(n as u64)).collect(),
            TypedArray::Uint32(v) => v.iter().map(|&n| PackValue::UInt(n as u64)).collect(),
            TypedArray::Uint64(v) => v.iter().map(|&n| PackValue::UInt(n)).collect(),
            TypedArray::Float32(v) => v.iter().map(|&n| PackValue::Float32(n)).collect(),
            TypedArray::Float64(v) => v.iter().map(|&n| PackValue::Float64(n)).collect(),
        };
        self.write_arr(&values);
    }
}
