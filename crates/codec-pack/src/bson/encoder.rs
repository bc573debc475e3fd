//! BSON document encoder. The top-level value must be an Object/Map;
//! anything else is rejected since BSON has no scalar top-level form.

use crate::{PackValue, TypedArray};

use super::error::BsonError;
use super::types::ext_tag;

pub struct BsonEncoder {
    out: Vec<u8>,
}

impl Default for BsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BsonEncoder {
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    pub fn encode(&mut self, value: &PackValue) -> Result<Vec<u8>, BsonError> {
        let pairs: Vec<(String, PackValue)> = match value {
            PackValue::Object(pairs) => pairs.clone(),
            PackValue::Map(pairs) => pairs
                .iter()
                .map(|(k, v)| (map_key_string(k), v.clone()))
                .collect(),
            _ => return Err(BsonError::NotADocument),
        };
        self.out.clear();
        self.write_document(&pairs);
        Ok(std::mem::take(&mut self.out))
    }

    fn write_document(&mut self, pairs: &[(String, PackValue)]) {
        let size_at = self.out.len();
        self.out.extend([0u8; 4]);
        for (key, val) in pairs {
            self.write_element(key, val);
        }
        self.out.push(0);
        let size = (self.out.len() - size_at) as i32;
        self.out[size_at..size_at + 4].copy_from_slice(&size.to_le_bytes());
    }

    fn write_element(&mut self, key: &str, value: &PackValue) {
        match value {
            PackValue::Null => self.write_header(0x0a, key),
            PackValue::Bool(b) => {
                self.write_header(0x08, key);
                self.out.push(if *b { 1 } else { 0 });
            }
            PackValue::Int(i) => {
                if *i >= i32::MIN as i64 && *i <= i32::MAX as i64 {
                    self.write_header(0x10, key);
                    self.out.extend((*i as i32).to_le_bytes());
                } else {
                    self.write_header(0x12, key);
                    self.out.extend(i.to_le_bytes());
                }
            }
            PackValue::UInt(u) => {
                self.write_header(0x12, key);
                self.out.extend((*u as i64).to_le_bytes());
            }
            PackValue::BigInt(i) => {
                self.write_header(0x12, key);
                self.out.extend((*i as i64).to_le_bytes());
            }
            PackValue::Float32(f) => {
                self.write_header(0x01, key);
                self.out.extend((*f as f64).to_le_bytes());
            }
            PackValue::Float64(f) => {
                self.write_header(0x01, key);
                self.out.extend(f.to_le_bytes());
            }
            PackValue::Str(s) => {
                self.write_header(0x02, key);
                self.write_string(s);
            }
            PackValue::Bytes(b) => {
                self.write_header(0x05, key);
                self.out.extend((b.len() as i32).to_le_bytes());
                self.out.push(0x00);
                self.out.extend_from_slice(b);
            }
            PackValue::Array(arr) => {
                self.write_header(0x04, key);
                let pairs: Vec<(String, PackValue)> = arr
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v.clone()))
                    .collect();
                self.write_document(&pairs);
            }
            PackValue::Object(pairs) => {
                self.write_header(0x03, key);
                self.write_document(pairs);
            }
            PackValue::Map(pairs) => {
                self.write_header(0x03, key);
                let pairs: Vec<(String, PackValue)> = pairs
                    .iter()
                    .map(|(k, v)| (map_key_string(k), v.clone()))
                    .collect();
                self.write_document(&pairs);
            }
            PackValue::Extension(boxed) if boxed.tag == ext_tag::BINARY => {
                self.write_header(0x05, key);
                if let PackValue::Object(fields) = boxed.val.as_ref() {
                    let subtype = fields
                        .iter()
                        .find(|(k, _)| k == "subtype")
                        .and_then(|(_, v)| if let PackValue::Int(i) = v { Some(*i as u8) } else { None })
                        .unwrap_or(0);
                    let data = fields
                        .iter()
                        .find(|(k, _)| k == "data")
                        .and_then(|(_, v)| if let PackValue::Bytes(b) = v { Some(b.clone()) } else { None })
                        .unwrap_or_default();
                    self.out.extend((data.len() as i32).to_le_bytes());
                    self.out.push(subtype);
                    self.out.extend_from_slice(&data);
                }
            }
            PackValue::Extension(boxed) => self.write_element(key, &boxed.val),
            PackValue::Raw(raw) => {
                self.write_header(0x05, key);
                self.out.extend((raw.val.len() as i32).to_le_bytes());
                self.out.push(0x00);
                self.out.extend_from_slice(&raw.val);
            }
            PackValue::TypedArray(arr) => self.write_element(key, &typed_array_to_array(arr)),
        }
    }

    fn write_header(&mut self, typ: u8, key: &str) {
        self.out.push(typ);
        self.out.extend_from_slice(key.as_bytes());
        self.out.push(0);
    }

    fn write_string(&mut self, s: &str) {
        self.out.extend((s.len() as i32 + 1).to_le_bytes());
        self.out.extend_from_slice(s.as_bytes());
        self.out.push(0);
    }
}

fn typed_array_to_array(arr: &TypedArray) -> PackValue {
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
    PackValue::Array(items)
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
    fn rejects_non_document_top_level() {
        assert!(matches!(
            BsonEncoder::new().encode(&PackValue::Int(1)),
            Err(BsonError::NotADocument)
        ));
    }
}
