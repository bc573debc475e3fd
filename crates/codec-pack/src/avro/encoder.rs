//! Schemaless Avro binary writer. Uses Avro's primitive wire encodings
//! (zigzag varint, block-framed array/map) under a leading value tag.

use crate::{JsonPackExtension, PackValue, TypedArray};

use super::types::tag;

pub struct AvroEncoder {
    out: Vec<u8>,
}

impl Default for AvroEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl AvroEncoder {
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    pub fn encode(mut self, value: &PackValue) -> Vec<u8> {
        self.write_value(value);
        self.out
    }

    fn write_value(&mut self, value: &PackValue) {
        match value {
            PackValue::Null => self.out.push(tag::NULL),
            PackValue::Bool(b) => self.out.push(if *b { tag::BOOL_TRUE } else { tag::BOOL_FALSE }),
            PackValue::Int(i) => {
                self.out.push(tag::LONG);
                self.write_long(*i);
            }
            PackValue::UInt(u) => {
                self.out.push(tag::LONG);
                self.write_long(*u as i64);
            }
            PackValue::BigInt(i) => {
                self.out.push(tag::LONG);
                self.write_long(*i as i64);
            }
            PackValue::Float32(f) => {
                self.out.push(tag::FLOAT);
                self.out.extend_from_slice(&f.to_le_bytes());
            }
            PackValue::Float64(f) => {
                self.out.push(tag::DOUBLE);
                self.out.extend_from_slice(&f.to_le_bytes());
            }
            PackValue::Bytes(b) => {
                self.out.push(tag::BYTES);
                self.write_long(b.len() as i64);
                self.out.extend_from_slice(b);
            }
            PackValue::Str(s) => {
                self.out.push(tag::STRING);
                self.write_long(s.len() as i64);
                self.out.extend_from_slice(s.as_bytes());
            }
            PackValue::Array(items) => self.write_array(items),
            PackValue::Object(fields) => {
                self.out.push(tag::MAP);
                self.write_block_count(fields.len());
                for (k, v) in fields {
                    self.write_long(k.len() as i64);
                    self.out.extend_from_slice(k.as_bytes());
                    self.write_value(v);
                }
                self.write_long(0);
            }
            PackValue::Map(entries) => {
                self.out.push(tag::MAP);
                self.write_block_count(entries.len());
                for (k, v) in entries {
                    let key = k.as_str().map(str::to_string).unwrap_or_else(|| format!("{:?}", k));
                    self.write_long(key.len() as i64);
                    self.out.extend_from_slice(key.as_bytes());
                    self.write_value(v);
                }
                self.write_long(0);
            }
            PackValue::Extension(ext) => self.write_extension(ext),
            PackValue::Raw(raw) => {
                self.out.push(tag::FIXED);
                self.write_long(raw.val.len() as i64);
                self.out.extend_from_slice(&raw.val);
            }
            PackValue::TypedArray(arr) => self.write_array(&typed_array_items(arr)),
        }
    }

    fn write_array(&mut self, items: &[PackValue]) {
        self.out.push(tag::ARRAY);
        self.write_block_count(items.len());
        for item in items {
            self.write_value(item);
        }
        self.write_long(0);
    }

    fn write_extension(&mut self, ext: &JsonPackExtension) {
        // No dedicated tag for extensions; fixed-width blob of the tag
        // followed by the wrapped value keeps the encoding unambiguous to
        // this codec's own decoder without claiming real Avro fixed-type
        // semantics.
        self.out.push(tag::FIXED);
        self.write_long(8);
        self.out.extend_from_slice(&ext.tag.to_le_bytes());
        self.write_value(&ext.val);
    }

    fn write_block_count(&mut self, len: usize) {
        if len > 0 {
            self.write_long(len as i64);
        } else {
            self.write_long(0);
        }
    }

    fn write_long(&mut self, value: i64) {
        let mut zz = ((value << 1) ^ (value >> 63)) as u64;
        loop {
            let mut byte = (zz & 0x7f) as u8;
            zz >>= 7;
            if zz != 0 {
                byte |= 0x80;
            }
            self.out.push(byte);
            if zz == 0 {
                break;
            }
        }
    }
}

fn typed_array_items(arr: &TypedArray) -> Vec<PackValue> {
    match arr {
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
    }
}

pub fn encode(value: &PackValue) -> Vec<u8> {
    AvroEncoder::new().encode(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_long_with_zigzag() {
        let bytes = encode(&PackValue::Int(-1));
        assert_eq!(bytes, vec![tag::LONG, 0x01]);
    }

    #[test]
    fn encodes_string_with_length_prefix() {
        let bytes = encode(&PackValue::Str("hi".to_string()));
        assert_eq!(bytes, vec![tag::STRING, 0x04, b'h', b'i']);
    }
}
