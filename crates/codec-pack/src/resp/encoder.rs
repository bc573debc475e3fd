//! RESP3 encoder.

use crate::{PackValue, TypedArray};

use super::constants::{
    Resp, RESP_EXTENSION_ATTRIBUTES, RESP_EXTENSION_BULK_ERROR, RESP_EXTENSION_PUSH,
    RESP_EXTENSION_SET, RESP_EXTENSION_SIMPLE_ERROR, RESP_EXTENSION_VERBATIM_STRING,
};

pub struct RespEncoder {
    out: Vec<u8>,
}

impl Default for RespEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RespEncoder {
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    pub fn encode(&mut self, value: &PackValue) -> Vec<u8> {
        self.out.clear();
        self.write_any(value);
        std::mem::take(&mut self.out)
    }

    fn write_line(&mut self, prefix: u8, body: &str) {
        self.out.push(prefix);
        self.out.extend_from_slice(body.as_bytes());
        self.out.extend_from_slice(b"\r\n");
    }

    fn write_bulk(&mut self, prefix: u8, bytes: &[u8]) {
        self.out.push(prefix);
        self.out.extend_from_slice(bytes.len().to_string().as_bytes());
        self.out.extend_from_slice(b"\r\n");
        self.out.extend_from_slice(bytes);
        self.out.extend_from_slice(b"\r\n");
    }

    fn write_header(&mut self, prefix: u8, count: usize) {
        self.out.push(prefix);
        self.out.extend_from_slice(count.to_string().as_bytes());
        self.out.extend_from_slice(b"\r\n");
    }

    pub fn write_any(&mut self, value: &PackValue) {
        match value {
            PackValue::Null => self.write_line(Resp::NULL, ""),
            PackValue::Bool(b) => self.write_line(Resp::BOOL, if *b { "t" } else { "f" }),
            PackValue::Int(i) => self.write_line(Resp::INT, &i.to_string()),
            PackValue::UInt(u) => self.write_line(Resp::INT, &u.to_string()),
            PackValue::BigInt(i) => self.write_line(Resp::BIG, &i.to_string()),
            PackValue::Float32(f) => self.write_float(*f as f64),
            PackValue::Float64(f) => self.write_float(*f),
            PackValue::Str(s) => self.write_bulk(Resp::STR_BULK, s.as_bytes()),
            PackValue::Bytes(b) => self.write_bulk(Resp::STR_BULK, b),
            PackValue::Array(arr) => self.write_array(Resp::ARR, arr),
            PackValue::Object(pairs) => self.write_map(pairs),
            PackValue::Map(pairs) => {
                let stringified: Vec<(String, PackValue)> = pairs
                    .iter()
                    .map(|(k, v)| (map_key_string(k), v.clone()))
                    .collect();
                self.write_map(&stringified);
            }
            PackValue::Extension(ext) => match ext.tag {
                RESP_EXTENSION_PUSH => {
                    if let PackValue::Array(arr) = ext.val.as_ref() {
                        self.write_array(Resp::PUSH, arr);
                    }
                }
                RESP_EXTENSION_SET => {
                    if let PackValue::Array(arr) = ext.val.as_ref() {
                        self.write_array(Resp::SET, arr);
                    }
                }
                RESP_EXTENSION_ATTRIBUTES => {
                    if let PackValue::Object(pairs) = ext.val.as_ref() {
                        self.write_header(Resp::ATTR, pairs.len());
                        for (key, val) in pairs {
                            self.write_bulk(Resp::STR_BULK, key.as_bytes());
                            self.write_any(val);
                        }
                    }
                }
                RESP_EXTENSION_VERBATIM_STRING => {
                    if let PackValue::Str(s) = ext.val.as_ref() {
                        let mut body = b"txt:".to_vec();
                        body.extend_from_slice(s.as_bytes());
                        self.write_bulk(Resp::STR_VERBATIM, &body);
                    }
                }
                RESP_EXTENSION_SIMPLE_ERROR => {
                    if let PackValue::Str(s) = ext.val.as_ref() {
                        self.write_line(Resp::ERR_SIMPLE, s);
                    }
                }
                RESP_EXTENSION_BULK_ERROR => {
                    if let PackValue::Str(s) = ext.val.as_ref() {
                        self.write_bulk(Resp::ERR_BULK, s.as_bytes());
                    }
                }
                _ => self.write_any(&ext.val),
            },
            PackValue::Raw(raw) => self.write_bulk(Resp::STR_BULK, &raw.val),
            PackValue::TypedArray(arr) => self.write_typed_array(arr),
        }
    }

    fn write_float(&mut self, f: f64) {
        let body = if f.is_nan() {
            "nan".to_string()
        } else if f.is_infinite() {
            if f > 0.0 { "inf".to_string() } else { "-inf".to_string() }
        } else {
            f.to_string()
        };
        self.write_line(Resp::FLOAT, &body);
    }

    fn write_array(&mut self, prefix: u8, arr: &[PackValue]) {
        self.write_header(prefix, arr.len());
        for item in arr {
            self.write_any(item);
        }
    }

    fn write_map(&mut self, pairs: &[(String, PackValue)]) {
        self.write_header(Resp::OBJ, pairs.len());
        for (key, val) in pairs {
            self.write_bulk(Resp::STR_BULK, key.as_bytes());
            self.write_any(val);
        }
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
        self.write_array(Resp::ARR, &items);
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
    fn encodes_scalars() {
        assert_eq!(RespEncoder::new().encode(&PackValue::Null), b"_\r\n");
        assert_eq!(RespEncoder::new().encode(&PackValue::Int(42)), b":42\r\n");
        assert_eq!(
            RespEncoder::new().encode(&PackValue::Str("hi".to_string())),
            b"$2\r\nhi\r\n"
        );
    }
}
