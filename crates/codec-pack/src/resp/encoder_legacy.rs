//! RESP2-compatible encoder: downgrades RESP3-only types (maps, sets,
//! booleans, doubles, big numbers, verbatim strings) to their RESP2
//! equivalents so older clients can parse the output.

use super::constants::{Resp, RESP_EXTENSION_ATTRIBUTES, RESP_EXTENSION_PUSH, RESP_EXTENSION_SET, RESP_EXTENSION_VERBATIM_STRING};
use crate::{PackValue, TypedArray};

pub struct RespEncoderLegacy {
    out: Vec<u8>,
}

impl Default for RespEncoderLegacy {
    fn default() -> Self {
        Self::new()
    }
}

impl RespEncoderLegacy {
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    pub fn encode(&mut self, value: &PackValue) -> Vec<u8> {
        self.out.clear();
        self.write_any(value);
        std::mem::take(&mut self.out)
    }

    fn push_line(&mut self, prefix: u8, body: &str) {
        self.out.push(prefix);
        self.out.extend_from_slice(body.as_bytes());
        self.out.extend_from_slice(b"\r\n");
    }

    fn push_bulk(&mut self, bytes: &[u8]) {
        self.out.push(Resp::STR_BULK);
        self.out.extend_from_slice(bytes.len().to_string().as_bytes());
        self.out.extend_from_slice(b"\r\n");
        self.out.extend_from_slice(bytes);
        self.out.extend_from_slice(b"\r\n");
    }

    pub fn write_any(&mut self, value: &PackValue) {
        match value {
            PackValue::Null => self.push_bulk_null(),
            PackValue::Bool(b) => self.push_line(Resp::INT, if *b { "1" } else { "0" }),
            PackValue::Int(i) => self.push_line(Resp::INT, &i.to_string()),
            PackValue::UInt(u) => self.push_line(Resp::INT, &u.to_string()),
            PackValue::BigInt(i) => self.push_line(Resp::STR_SIMPLE, &i.to_string()),
            PackValue::Float32(f) => self.push_line(Resp::STR_SIMPLE, &(*f as f64).to_string()),
            PackValue::Float64(f) => self.push_line(Resp::STR_SIMPLE, &f.to_string()),
            PackValue::Str(s) => self.write_str(s),
            PackValue::Bytes(b) => self.push_bulk(b),
            PackValue::Array(arr) => self.write_arr(arr),
            PackValue::Object(pairs) => self.write_obj(pairs),
            PackValue::Map(pairs) => {
                let flat: Vec<(String, PackValue)> = pairs
                    .iter()
                    .map(|(k, v)| (format!("{k:?}"), v.clone()))
                    .collect();
                self.write_obj(&flat);
            }
            PackValue::Extension(ext) => match ext.tag {
                RESP_EXTENSION_PUSH | RESP_EXTENSION_SET => {
                    if let PackValue::Array(arr) = ext.val.as_ref() {
                        self.write_arr(arr);
                    }
                }
                RESP_EXTENSION_VERBATIM_STRING => {
                    if let PackValue::Str(s) = ext.val.as_ref() {
                        self.write_str(s);
                    }
                }
                RESP_EXTENSION_ATTRIBUTES => {
                    if let PackValue::Object(pairs) = ext.val.as_ref() {
                        self.write_obj(pairs);
                    }
                }
                _ => self.write_any(&ext.val),
            },
            PackValue::Raw(raw) => self.push_bulk(&raw.val),
            PackValue::TypedArray(arr) => self.write_arr(&typed_array_to_items(arr)),
        }
    }

    fn push_bulk_null(&mut self) {
        self.out.extend_from_slice(b"$-1\r\n");
    }

    fn write_str(&mut self, s: &str) {
        if s.len() < 64 && !s.contains('\r') && !s.contains('\n') {
            self.push_line(Resp::STR_SIMPLE, s);
        } else {
            self.push_bulk(s.as_bytes());
        }
    }

    fn write_arr(&mut self, arr: &[PackValue]) {
        self.out.push(Resp::ARR);
        self.out.extend_from_slice(arr.len().to_string().as_bytes());
        self.out.extend_from_slice(b"\r\n");
        for item in arr {
            self.write_any(item);
        }
    }

    fn write_obj(&mut self, pairs: &[(String, PackValue)]) {
        self.out.push(Resp::ARR);
        self.out.extend_from_slice((pairs.len() * 2).to_string().as_bytes());
        self.out.extend_from_slice(b"\r\n");
        for (key, val) in pairs {
            self.write_str(key);
            self.write_any(val);
        }
    }
}

fn typed_array_to_items(arr: &TypedArray) -> Vec<PackValue> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downgrades_map_to_flat_array() {
        let value = PackValue::Object(vec![("k".to_string(), PackValue::Int(1))]);
        assert_eq!(RespEncoderLegacy::new().encode(&value), b"*2\r\n+k\r\n:1\r\n");
    }

    #[test]
    fn downgrades_null_to_bulk_null() {
        assert_eq!(RespEncoderLegacy::new().encode(&PackValue::Null), b"$-1\r\n");
    }
}
