//! Smile encoder.

use crate::{JsonPackMpint, PackValue, TypedArray};

use super::bits7::{float_to_7bit, pack_7bit};
use super::constants::*;
use super::shared_table::SharedStringTable;
use super::vint::{write_vint, zigzag_encode};

pub struct SmileEncoder {
    out: Vec<u8>,
    shared_keys: bool,
    shared_values: bool,
    key_table: SharedStringTable,
    value_table: SharedStringTable,
}

impl Default for SmileEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SmileEncoder {
    pub fn new() -> Self {
        Self {
            out: Vec::new(),
            shared_keys: true,
            shared_values: true,
            key_table: SharedStringTable::new(),
            value_table: SharedStringTable::new(),
        }
    }

    pub fn shared_keys(mut self, enabled: bool) -> Self {
        self.shared_keys = enabled;
        self
    }

    pub fn shared_values(mut self, enabled: bool) -> Self {
        self.shared_values = enabled;
        self
    }

    pub fn encode(&mut self, value: &PackValue) -> Vec<u8> {
        self.out.clear();
        self.key_table = SharedStringTable::new();
        self.value_table = SharedStringTable::new();
        self.write_header();
        self.write_value(value);
        std::mem::take(&mut self.out)
    }

    fn write_header(&mut self) {
        self.out.extend_from_slice(&HEADER);
        let mut flags = 0u8;
        if self.shared_keys {
            flags |= FLAG_SHARED_PROPERTY_NAMES;
        }
        if self.shared_values {
            flags |= FLAG_SHARED_STRING_VALUES;
        }
        self.out.push(flags);
    }

    fn write_value(&mut self, value: &PackValue) {
        match value {
            PackValue::Null => self.out.push(TOKEN_NULL),
            PackValue::Bool(false) => self.out.push(TOKEN_FALSE),
            PackValue::Bool(true) => self.out.push(TOKEN_TRUE),
            PackValue::Int(i) => self.write_int(*i),
            PackValue::UInt(u) => {
                if *u <= i64::MAX as u64 {
                    self.write_int(*u as i64);
                } else {
                    self.write_big_int(*u as i128);
                }
            }
            PackValue::BigInt(i) => self.write_big_int(*i),
            PackValue::Float32(f) => {
                self.out.push(TOKEN_FLOAT32);
                let packed = float_to_7bit(f.to_bits() as u64, 32, 5);
                self.out.extend(packed);
            }
            PackValue::Float64(f) => {
                self.out.push(TOKEN_FLOAT64);
                let packed = float_to_7bit(f.to_bits(), 64, 10);
                self.out.extend(packed);
            }
            PackValue::Bytes(b) => self.write_binary(b),
            PackValue::Str(s) => self.write_string_value(s),
            PackValue::Array(arr) => {
                self.out.push(TOKEN_START_ARRAY);
                for item in arr {
                    self.write_value(item);
                }
                self.out.push(TOKEN_END_ARRAY);
            }
            PackValue::Object(pairs) => {
                self.out.push(TOKEN_START_OBJECT);
                for (key, val) in pairs {
                    self.write_key(key);
                    self.write_value(val);
                }
                self.out.push(TOKEN_END_OBJECT);
            }
            PackValue::Map(pairs) => {
                self.out.push(TOKEN_START_OBJECT);
                for (key, val) in pairs {
                    let key_string = map_key_string(key);
                    self.write_key(&key_string);
                    self.write_value(val);
                }
                self.out.push(TOKEN_END_OBJECT);
            }
            PackValue::Extension(ext) => self.write_value(&ext.val),
            PackValue::Raw(raw) => self.write_binary(&raw.val),
            PackValue::TypedArray(arr) => self.write_typed_array(arr),
        }
    }

    fn write_int(&mut self, i: i64) {
        if (-16..=15).contains(&i) {
            self.out.push((SMALL_INT_START as i64 + i + 16) as u8);
        } else if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
            self.out.push(TOKEN_INT32);
            write_vint(&mut self.out, zigzag_encode(i));
        } else {
            self.out.push(TOKEN_INT64);
            write_vint(&mut self.out, zigzag_encode(i));
        }
    }

    fn write_big_int(&mut self, i: i128) {
        self.out.push(TOKEN_BIG_INTEGER);
        let bytes = JsonPackMpint::from_i128(i).data;
        write_vint(&mut self.out, bytes.len() as u64);
        self.out.extend(bytes);
    }

    fn write_binary(&mut self, bytes: &[u8]) {
        self.out.push(TOKEN_BINARY_7BIT);
        write_vint(&mut self.out, bytes.len() as u64);
        self.out.extend(pack_7bit(bytes));
    }

    fn write_typed_array(&mut self, arr: &TypedArray) {
        let items: Vec<PackValue> = match arr {
            TypedArray::Int8(xs) => xs.iter().map(|&n| PackValue::Int(n as i64)).collect(),
            TypedArray::Int16(xs) => xs.iter().map(|&n| PackValue::Int(n as i64)).collect(),
            TypedArray::Int32(xs) => xs.iter().map(|&n| PackValue::Int(n as i64)).collect(),
            TypedArray::Int64(xs) => xs.iter().map(|&n| PackValue::Int(n)).collect(),
            TypedArray::Uint8(xs) => xs.iter().map(|&n| PackValue::UInt(n as u64)).collect(),
            TypedArray::Uint16(xs) => xs.iter().map(|&n| PackValue::UInt(n as u64)).collect(),
            TypedArray::Uint32(xs) => xs.iter().map(|&n| PackValue::UInt(n as u64)).collect(),
            TypedArray::Uint64(xs) => xs.iter().map(|&n| PackValue::UInt(n)).collect(),
            TypedArray::Float32(xs) => xs.iter().map(|&n| PackValue::Float32(n)).collect(),
            TypedArray::Float64(xs) => xs.iter().map(|&n| PackValue::Float64(n)).collect(),
        };
        self.write_value(&PackValue::Array(items));
    }

    fn write_string_value(&mut self, s: &str) {
        if s.is_empty() {
            self.out.push(TOKEN_EMPTY_STRING);
            return;
        }
        let byte_len = s.len();
        let shareable = self.shared_values && byte_len <= 64;
        if shareable {
            if let Some(idx) = self.value_table.find(s) {
                write_shared_ref(
                    &mut self.out,
                    SHORT_SHARED_VALUE_START,
                    31,
                    LONG_SHARED_VALUE_START,
                    idx,
                );
                return;
            }
        }
        if s.is_ascii() {
            if byte_len <= 32 {
                self.out.push(TINY_ASCII_START + (byte_len - 1) as u8);
                self.out.extend_from_slice(s.as_bytes());
            } else if byte_len <= 64 {
                self.out.push(SHORT_ASCII_START + (byte_len - 33) as u8);
                self.out.extend_from_slice(s.as_bytes());
            } else {
                self.out.push(TOKEN_LONG_ASCII);
                self.out.extend_from_slice(s.as_bytes());
                self.out.push(TOKEN_END_STRING_MARKER);
            }
        } else if (2..=33).contains(&byte_len) {
            self.out.push(TINY_UNICODE_START + (byte_len - 2) as u8);
            self.out.extend_from_slice(s.as_bytes());
        } else if (34..=65).contains(&byte_len) {
            self.out.push(SHORT_UNICODE_START + (byte_len - 34) as u8);
            self.out.extend_from_slice(s.as_bytes());
        } else {
            self.out.push(TOKEN_LONG_UNICODE);
            self.out.extend_from_slice(s.as_bytes());
            self.out.push(TOKEN_END_STRING_MARKER);
        }
        if shareable {
            self.value_table.insert(s);
        }
    }

    fn write_key(&mut self, key: &str) {
        if key.is_empty() {
            self.out.push(TOKEN_EMPTY_KEY);
            return;
        }
        let byte_len = key.len();
        if self.shared_keys {
            if let Some(idx) = self.key_table.find(key) {
                write_shared_ref(
                    &mut self.out,
                    SHORT_SHARED_KEY_START,
                    64,
                    LONG_SHARED_KEY_START,
                    idx,
                );
                return;
            }
        }
        if key.is_ascii() && byte_len <= 64 {
            self.out.push(SHORT_KEY_ASCII_START + (byte_len - 1) as u8);
            self.out.extend_from_slice(key.as_bytes());
        } else if !key.is_ascii() && (2..=57).contains(&byte_len) {
            self.out.push(SHORT_KEY_UNICODE_START + (byte_len - 2) as u8);
            self.out.extend_from_slice(key.as_bytes());
        } else {
            self.out.push(TOKEN_LONG_KEY_UNICODE);
            self.out.extend_from_slice(key.as_bytes());
            self.out.push(TOKEN_END_STRING_MARKER);
        }
        if self.shared_keys {
            self.key_table.insert(key);
        }
    }
}

fn write_shared_ref(out: &mut Vec<u8>, short_base: u8, short_count: usize, long_base: u8, idx: usize) {
    if idx < short_count {
        out.push(short_base + idx as u8);
    } else {
        let idx10 = idx.min(1023);
        out.push(long_base + (idx10 >> 8) as u8);
        out.push((idx10 & 0xFF) as u8);
    }
}

fn map_key_string(key: &PackValue) -> String {
    match key {
        PackValue::Str(s) => s.clone(),
        PackValue::Int(i) => i.to_string(),
        PackValue::UInt(u) => u.to_string(),
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_carries_flags_and_version() {
        let bytes = SmileEncoder::new().encode(&PackValue::Null);
        assert_eq!(&bytes[0..3], &HEADER);
        assert_eq!(bytes[3] & 0b1111_0000, 0);
    }

    #[test]
    fn repeated_key_becomes_a_shared_reference() {
        let value = PackValue::Array(vec![
            PackValue::Object(vec![("name".into(), PackValue::Int(1))]),
            PackValue::Object(vec![("name".into(), PackValue::Int(2))]),
        ]);
        let bytes = SmileEncoder::new().encode(&value);
        assert!(bytes.contains(&(SHORT_SHARED_KEY_START)));
    }
}
