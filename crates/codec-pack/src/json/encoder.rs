//! Default JSON encoder: writes tokens directly, insertion-order keys.

use std::fmt::Write as _;

use crate::{PackValue, TypedArray};

const DEFAULT_BINARY_PREFIX: &str = "data:application/octet-stream;base64,";

pub struct JsonEncoder {
    out: String,
    binary_prefix: String,
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            binary_prefix: DEFAULT_BINARY_PREFIX.to_string(),
        }
    }

    pub fn binary_prefix(mut self, prefix: &str) -> Self {
        self.binary_prefix = prefix.to_string();
        self
    }

    pub fn encode(&mut self, value: &PackValue) -> Vec<u8> {
        self.out.clear();
        self.write_any(value);
        std::mem::take(&mut self.out).into_bytes()
    }

    pub fn write_any(&mut self, value: &PackValue) {
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
            PackValue::Float32(f) => self.write_float(*f as f64),
            PackValue::Float64(f) => self.write_float(*f),
            PackValue::Bytes(b) => {
                self.write_string(&format!("{}{}", self.binary_prefix, bytepack_base64::to_base64(b)))
            }
            PackValue::Str(s) => self.write_string(s),
            PackValue::Array(arr) => self.write_array(arr),
            PackValue::Object(pairs) => self.write_object(pairs.iter().map(|(k, v)| (k.as_str(), v)).collect::<Vec<_>>().as_slice()),
            PackValue::Map(pairs) => {
                let keyed: Vec<(String, &PackValue)> = pairs
                    .iter()
                    .map(|(k, v)| (map_key_string(k), v))
                    .collect();
                let refs: Vec<(&str, &PackValue)> = keyed.iter().map(|(k, v)| (k.as_str(), *v)).collect();
                self.write_object(&refs);
            }
            PackValue::Extension(ext) => self.write_any(&ext.val),
            PackValue::Raw(raw) => {
                if let Ok(s) = std::str::from_utf8(&raw.val) {
                    self.out.push_str(s);
                } else {
                    self.out.push_str("null");
                }
            }
            PackValue::TypedArray(arr) => self.write_typed_array(arr),
        }
    }

    fn write_float(&mut self, f: f64) {
        if f.is_nan() || f.is_infinite() {
            self.out.push_str("null");
        } else if f == f.trunc() && f.abs() < 1e15 {
            let _ = write!(self.out, "{f:.1}");
        } else {
            let _ = write!(self.out, "{f}");
        }
    }

    fn write_array(&mut self, arr: &[PackValue]) {
        self.out.push('[');
        for (i, item) in arr.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.write_any(item);
        }
        self.out.push(']');
    }

    fn write_object(&mut self, pairs: &[(&str, &PackValue)]) {
        self.out.push('{');
        for (i, (key, value)) in pairs.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.write_string(key);
            self.out.push(':');
            self.write_any(value);
        }
        self.out.push('}');
    }

    fn write_typed_array(&mut self, arr: &TypedArray) {
        self.out.push('[');
        macro_rules! write_numbers {
            ($xs:expr) => {
                for (i, n) in $xs.iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    let _ = write!(self.out, "{n}");
                }
            };
        }
        match arr {
            TypedArray::Int8(xs) => write_numbers!(xs),
            TypedArray::Int16(xs) => write_numbers!(xs),
            TypedArray::Int32(xs) => write_numbers!(xs),
            TypedArray::Int64(xs) => write_numbers!(xs),
            TypedArray::Uint8(xs) => write_numbers!(xs),
            TypedArray::Uint16(xs) => write_numbers!(xs),
            TypedArray::Uint32(xs) => write_numbers!(xs),
            TypedArray::Uint64(xs) => write_numbers!(xs),
            TypedArray::Float32(xs) => {
                for (i, n) in xs.iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.write_float(*n as f64);
                }
            }
            TypedArray::Float64(xs) => {
                for (i, n) in xs.iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.write_float(*n);
                }
            }
        }
        self.out.push(']');
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
                '\u{8}' => self.out.push_str("\\b"),
                '\u{c}' => self.out.push_str("\\f"),
                c if (c as u32) < 0x20 => {
                    let _ = write!(self.out, "\\u{:04x}", c as u32);
                }
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }
}

fn map_key_string(key: &PackValue) -> String {
    match key {
        PackValue::Str(s) => s.clone(),
        PackValue::Int(i) => i.to_string(),
        PackValue::UInt(u) => u.to_string(),
        other => {
            let mut enc = JsonEncoder::new();
            String::from_utf8(enc.encode(other)).unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_object_preserving_insertion_order() {
        let value = PackValue::Object(vec![
            ("b".into(), PackValue::Int(2)),
            ("a".into(), PackValue::Int(1)),
        ]);
        let bytes = JsonEncoder::new().encode(&value);
        assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"b":2,"a":1}"#);
    }

    #[test]
    fn escapes_control_characters() {
        let value = PackValue::Str("a\nb\"c".to_string());
        let bytes = JsonEncoder::new().encode(&value);
        assert_eq!(String::from_utf8(bytes).unwrap(), r#""a\nb\"c""#);
    }

    #[test]
    fn bytes_become_prefixed_base64_string() {
        let value = PackValue::Bytes(vec![1, 2, 3]);
        let bytes = JsonEncoder::new().encode(&value);
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with(r#""data:application/octet-stream;base64,"#));
    }
}
