//! FlexBuffers-flavored writer: a self-describing, tag-prefixed stream
//! closed by a short root footer so a reader can confirm it holds a
//! complete value before walking it.

use crate::{PackValue, TypedArray};

use super::types::tag;

pub struct FlexBufferEncoder {
    out: Vec<u8>,
}

impl Default for FlexBufferEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FlexBufferEncoder {
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    pub fn encode(mut self, value: &PackValue) -> Vec<u8> {
        self.write_value(value);
        self.out.push(tag::ROOT_FOOTER_MAGIC);
        self.out
    }

    fn write_value(&mut self, value: &PackValue) {
        match value {
            PackValue::Null => self.out.push(tag::NULL),
            PackValue::Bool(b) => self.out.push(if *b { tag::BOOL_TRUE } else { tag::BOOL_FALSE }),
            PackValue::Int(i) => {
                self.out.push(tag::INT);
                self.out.extend_from_slice(&i.to_le_bytes());
            }
            PackValue::UInt(u) => {
                self.out.push(tag::UINT);
                self.out.extend_from_slice(&u.to_le_bytes());
            }
            PackValue::BigInt(i) => {
                self.out.push(tag::INT);
                self.out.extend_from_slice(&(*i as i64).to_le_bytes());
            }
            PackValue::Float32(f) => {
                self.out.push(tag::FLOAT);
                self.out.extend_from_slice(&(*f as f64).to_le_bytes());
            }
            PackValue::Float64(f) => {
                self.out.push(tag::FLOAT);
                self.out.extend_from_slice(&f.to_le_bytes());
            }
            PackValue::Bytes(b) => self.write_blob(b),
            PackValue::Str(s) => self.write_string(s),
            PackValue::Array(items) => self.write_vector(items),
            PackValue::Object(fields) => self.write_map(fields),
            PackValue::Map(entries) => {
                let fields: Vec<(String, PackValue)> = entries
                    .iter()
                    .map(|(k, v)| {
                        let key = k.as_str().map(str::to_string).unwrap_or_else(|| format!("{:?}", k));
                        (key, v.clone())
                    })
                    .collect();
                self.write_map(&fields);
            }
            PackValue::Extension(ext) => self.write_value(&ext.val),
            PackValue::Raw(raw) => self.write_blob(&raw.val),
            PackValue::TypedArray(arr) => self.write_vector(&typed_array_items(arr)),
        }
    }

    fn write_blob(&mut self, bytes: &[u8]) {
        self.out.push(tag::BLOB);
        self.out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
        self.out.extend_from_slice(bytes);
    }

    fn write_string(&mut self, s: &str) {
        self.out.push(tag::STRING);
        self.out.extend_from_slice(&(s.len() as u32).to_le_bytes());
        self.out.extend_from_slice(s.as_bytes());
    }

    fn write_vector(&mut self, items: &[PackValue]) {
        self.out.push(tag::VECTOR);
        self.out.extend_from_slice(&(items.len() as u32).to_le_bytes());
        for item in items {
            self.write_value(item);
        }
    }

    fn write_map(&mut self, fields: &[(String, PackValue)]) {
        self.out.push(tag::MAP);
        self.out.extend_from_slice(&(fields.len() as u32).to_le_bytes());
        for (k, v) in fields {
            self.write_string(k);
            self.write_value(v);
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
    FlexBufferEncoder::new().encode(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_root_footer_magic() {
        let bytes = encode(&PackValue::Null);
        assert_eq!(*bytes.last().unwrap(), tag::ROOT_FOOTER_MAGIC);
    }

    #[test]
    fn encodes_int_as_eight_little_endian_bytes() {
        let bytes = encode(&PackValue::Int(1));
        assert_eq!(&bytes[0..9], &[tag::INT, 1, 0, 0, 0, 0, 0, 0, 0]);
    }
}
