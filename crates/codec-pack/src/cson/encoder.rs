//! CSON encoder. Emits the JSON-compatible subset of CSON — quoted keys,
//! braces, comma separators — since CSON's indentation-significant block
//! syntax is a parser convenience with no effect on the value it encodes.

use std::fmt::Write as _;

use crate::{PackValue, TypedArray};

pub struct CsonEncoder {
    out: String,
}

impl Default for CsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CsonEncoder {
    pub fn new() -> Self {
        Self { out: String::new() }
    }

    pub fn encode(&mut self, value: &PackValue) -> String {
        self.out.clear();
        self.write_value(value);
        std::mem::take(&mut self.out)
    }

    fn write_value(&mut self, value: &PackValue) {
        match value {
            PackValue::Null => self.out.push_str("null"),
            PackValue::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            PackValue::Int(i) => {
                let _ = write!(self.out, "{i}");
            }
            PackValue::UInt(u) => {
                let _ = write!(self.out, "{u}");
            }
            PackValue::BigInt(i) => {
                let _ = write!(self.out, "{i}");
            }
            PackValue::Float32(f) => {
                let _ = write!(self.out, "{}", *f as f64);
            }
            PackValue::Float64(f) => {
                let _ = write!(self.out, "{f}");
            }
            PackValue::Bytes(b) => self.write_string(&bytepack_base64::to_base64(b)),
            PackValue::Str(s) => self.write_string(s),
            PackValue::Array(items) => self.write_array(items),
            PackValue::Object(fields) => self.write_object(fields),
            PackValue::Map(entries) => {
                let fields: Vec<(String, PackValue)> = entries
                    .iter()
                    .map(|(k, v)| {
                        let key = k.as_str().map(str::to_string).unwrap_or_else(|| format!("{:?}", k));
                        (key, v.clone())
                    })
                    .collect();
                self.write_object(&fields);
            }
            PackValue::Extension(ext) => self.write_value(&ext.val),
            PackValue::Raw(raw) => self.write_string(&bytepack_base64::to_base64(&raw.val)),
            PackValue::TypedArray(arr) => self.write_array(&typed_array_items(arr)),
        }
    }

    fn write_array(&mut self, items: &[PackValue]) {
        self.out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.write_value(item);
        }
        self.out.push(']');
    }

    fn write_object(&mut self, fields: &[(String, PackValue)]) {
        self.out.push('{');
        for (i, (k, v)) in fields.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.write_key(k);
            self.out.push_str(": ");
            self.write_value(v);
        }
        self.out.push('}');
    }

    fn write_key(&mut self, key: &str) {
        if !key.is_empty() && key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$') {
            self.out.push_str(key);
        } else {
            self.write_string(key);
        }
    }

    fn write_string(&mut self, s: &str) {
        self.out.push('"');
        for c in s.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\t' => self.out.push_str("\\t"),
                '\r' => self.out.push_str("\\r"),
                c if (c as u32) < 0x20 => {
                    let _ = write!(self.out, "\\u{:04x}", c as u32);
                }
                c => self.out.push(c),
            }
        }
        self.out.push('"');
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

pub fn encode(value: &PackValue) -> String {
    CsonEncoder::new().encode(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_unquoted_keys_when_safe() {
        let value = PackValue::Object(vec![("name".to_string(), PackValue::Int(1))]);
        assert_eq!(encode(&value), "{name: 1}");
    }

    #[test]
    fn quotes_keys_with_unsafe_characters() {
        let value = PackValue::Object(vec![("a b".to_string(), PackValue::Int(1))]);
        assert_eq!(encode(&value), "{\"a b\": 1}");
    }
}
