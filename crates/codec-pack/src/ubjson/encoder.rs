//! UBJSON (Universal Binary JSON) encoder, non-optimized container form:
//! every array/object element carries its own type marker.

use crate::{PackValue, TypedArray};

use super::error::UbjsonError;

const NULL: u8 = b'Z';
const TRUE: u8 = b'T';
const FALSE: u8 = b'F';
const INT8: u8 = b'i';
const UINT8: u8 = b'U';
const INT16: u8 = b'I';
const INT32: u8 = b'l';
const INT64: u8 = b'L';
const FLOAT32: u8 = b'd';
const FLOAT64: u8 = b'D';
const STRING: u8 = b'S';
const ARRAY_START: u8 = b'[';
const ARRAY_END: u8 = b']';
const OBJECT_START: u8 = b'{';
const OBJECT_END: u8 = b'}';

pub struct UbjsonEncoder {
    out: Vec<u8>,
}

impl Default for UbjsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl UbjsonEncoder {
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    pub fn encode(&mut self, value: &PackValue) -> Result<Vec<u8>, UbjsonError> {
        self.out.clear();
        self.write_any(value)?;
        Ok(std::mem::take(&mut self.out))
    }

    fn write_any(&mut self, value: &PackValue) -> Result<(), UbjsonError> {
        match value {
            PackValue::Null => self.out.push(NULL),
            PackValue::Bool(true) => self.out.push(TRUE),
            PackValue::Bool(false) => self.out.push(FALSE),
            PackValue::Int(i) => self.write_int(*i),
            PackValue::UInt(u) => {
                if *u <= i64::MAX as u64 {
                    self.write_int(*u as i64);
                } else {
                    self.write_float64(*u as f64);
                }
            }
            PackValue::BigInt(i) => {
                if *i >= i64::MIN as i128 && *i <= i64::MAX as i128 {
                    self.write_int(*i as i64);
                } else {
                    self.write_float64(*i as f64);
                }
            }
            PackValue::Float32(f) => {
                self.out.push(FLOAT32);
                self.out.extend(f.to_be_bytes());
            }
            PackValue::Float64(f) => self.write_float64(*f),
            PackValue::Bytes(b) => self.write_byte_array(b)?,
            PackValue::Str(s) => self.write_string(s),
            PackValue::Array(arr) => {
                self.out.push(ARRAY_START);
                for item in arr {
                    self.write_any(item)?;
                }
                self.out.push(ARRAY_END);
            }
            PackValue::Object(pairs) => {
                self.out.push(OBJECT_START);
                for (key, val) in pairs {
                    if key == "__proto__" {
                        return Err(UbjsonError::InvalidKey(self.out.len()));
                    }
                    self.write_key(key);
                    self.write_any(val)?;
                }
                self.out.push(OBJECT_END);
            }
            PackValue::Map(pairs) => {
                self.out.push(OBJECT_START);
                for (key, val) in pairs {
                    self.write_key(&map_key_string(key));
                    self.write_any(val)?;
                }
                self.out.push(OBJECT_END);
            }
            PackValue::Extension(ext) => self.write_any(&ext.val)?,
            PackValue::Raw(raw) => self.write_byte_array(&raw.val)?,
            PackValue::TypedArray(arr) => self.write_typed_array(arr)?,
        }
        Ok(())
    }

    fn write_int(&mut self, i: i64) {
        if (i8::MIN as i64..=i8::MAX as i64).contains(&i) {
            self.out.push(INT8);
            self.out.push(i as i8 as u8);
        } else if (0..=u8::MAX as i64).contains(&i) {
            self.out.push(UINT8);
            self.out.push(i as u8);
        } else if (i16::MIN as i64..=i16::MAX as i64).contains(&i) {
            self.out.push(INT16);
            self.out.extend((i as i16).to_be_bytes());
        } else if (i32::MIN as i64..=i32::MAX as i64).contains(&i) {
            self.out.push(INT32);
            self.out.extend((i as i32).to_be_bytes());
        } else {
            self.out.push(INT64);
            self.out.extend(i.to_be_bytes());
        }
    }

    fn write_float64(&mut self, f: f64) {
        self.out.push(FLOAT64);
        self.out.extend(f.to_be_bytes());
    }

    fn write_length(&mut self, len: usize) {
        self.write_int(len as i64);
    }

    fn write_string(&mut self, s: &str) {
        self.out.push(STRING);
        self.write_length(s.len());
        self.out.extend_from_slice(s.as_bytes());
    }

    fn write_key(&mut self, key: &str) {
        self.write_length(key.len());
        self.out.extend_from_slice(key.as_bytes());
    }

    fn write_byte_array(&mut self, bytes: &[u8]) -> Result<(), UbjsonError> {
        self.out.push(ARRAY_START);
        self.out.push(b'$');
        self.out.push(UINT8);
        self.out.push(b'#');
        self.write_length(bytes.len());
        self.out.extend_from_slice(bytes);
        Ok(())
    }

    fn write_typed_array(&mut self, arr: &TypedArray) -> Result<(), UbjsonError> {
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
        self.write_any(&PackValue::Array(items))
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
        assert_eq!(UbjsonEncoder::new().encode(&PackValue::Null).unwrap(), vec![NULL]);
        assert_eq!(
            UbjsonEncoder::new().encode(&PackValue::Bool(true)).unwrap(),
            vec![TRUE]
        );
        assert_eq!(
            UbjsonEncoder::new().encode(&PackValue::Int(5)).unwrap(),
            vec![INT8, 5]
        );
    }
}
