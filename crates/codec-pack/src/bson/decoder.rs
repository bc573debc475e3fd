//! BSON document decoder, reading straight into [`PackValue`]. Element
//! kinds with no direct universal-value counterpart (binary, ObjectId,
//! regex, timestamp, ...) round-trip through `PackValue::Extension`,
//! tagged with the BSON element type byte.

use crate::{JsonPackExtension, PackValue};

use super::error::BsonError;
use super::types::ext_tag;

pub struct BsonDecoder<'a> {
    data: &'a [u8],
    x: usize,
}

impl<'a> BsonDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, x: 0 }
    }

    pub fn decode(&mut self) -> Result<PackValue, BsonError> {
        self.read_document().map(PackValue::Object)
    }

    fn ensure(&self, n: usize) -> Result<(), BsonError> {
        if self.x + n > self.data.len() {
            return Err(BsonError::UnexpectedEnd(self.x));
        }
        Ok(())
    }

    fn u8(&mut self) -> Result<u8, BsonError> {
        self.ensure(1)?;
        let v = self.data[self.x];
        self.x += 1;
        Ok(v)
    }

    fn i32_le(&mut self) -> Result<i32, BsonError> {
        self.ensure(4)?;
        let v = i32::from_le_bytes(self.data[self.x..self.x + 4].try_into().unwrap());
        self.x += 4;
        Ok(v)
    }

    fn i64_le(&mut self) -> Result<i64, BsonError> {
        self.ensure(8)?;
        let v = i64::from_le_bytes(self.data[self.x..self.x + 8].try_into().unwrap());
        self.x += 8;
        Ok(v)
    }

    fn f64_le(&mut self) -> Result<f64, BsonError> {
        self.ensure(8)?;
        let v = f64::from_le_bytes(self.data[self.x..self.x + 8].try_into().unwrap());
        self.x += 8;
        Ok(v)
    }

    fn buf(&mut self, n: usize) -> Result<Vec<u8>, BsonError> {
        self.ensure(n)?;
        let v = self.data[self.x..self.x + n].to_vec();
        self.x += n;
        Ok(v)
    }

    fn read_cstring(&mut self) -> Result<String, BsonError> {
        let start = self.x;
        while self.x < self.data.len() && self.data[self.x] != 0 {
            self.x += 1;
        }
        if self.x >= self.data.len() {
            return Err(BsonError::UnexpectedEnd(start));
        }
        let s = String::from_utf8(self.data[start..self.x].to_vec())
            .map_err(|_| BsonError::InvalidUtf8(start))?;
        self.x += 1;
        Ok(s)
    }

    fn read_string(&mut self) -> Result<String, BsonError> {
        let length = self.i32_le()? as usize;
        if length == 0 {
            return Ok(String::new());
        }
        let bytes = self.buf(length - 1)?;
        self.x += 1;
        String::from_utf8(bytes).map_err(|_| BsonError::InvalidUtf8(self.x))
    }

    fn read_document(&mut self) -> Result<Vec<(String, PackValue)>, BsonError> {
        let document_size = self.i32_le()? as usize;
        if document_size < 5 {
            return Err(BsonError::UnexpectedEnd(self.x));
        }
        let start_pos = self.x;
        let end_pos = start_pos + document_size - 4 - 1;
        let mut fields = Vec::new();
        while self.x < end_pos {
            let element_type = self.u8()?;
            if element_type == 0 {
                break;
            }
            let key = self.read_cstring()?;
            if key == "__proto__" {
                return Err(BsonError::InvalidKey(self.x));
            }
            let value = self.read_element_value(element_type)?;
            fields.push((key, value));
        }
        self.x = start_pos + document_size - 4;
        Ok(fields)
    }

    fn read_element_value(&mut self, typ: u8) -> Result<PackValue, BsonError> {
        match typ {
            0x01 => Ok(PackValue::Float64(self.f64_le()?)),
            0x02 => self.read_string().map(PackValue::Str),
            0x03 => self.read_document().map(PackValue::Object),
            0x04 => self.read_array(),
            0x05 => self.read_binary(),
            0x06 => Ok(PackValue::Null),
            0x07 => self.buf(12).map(|b| ext(ext_tag::OBJECT_ID, PackValue::Bytes(b))),
            0x08 => Ok(PackValue::Bool(self.u8()? == 1)),
            0x09 => Ok(PackValue::Int(self.i64_le()?)),
            0x0a => Ok(PackValue::Null),
            0x0b => self.read_regex(),
            0x0c => self.read_db_pointer(),
            0x0d | 0x0e => self.read_string().map(PackValue::Str),
            0x0f => self.read_code_with_scope(),
            0x10 => Ok(PackValue::Int(self.i32_le()? as i64)),
            0x11 => self.read_timestamp(),
            0x12 => Ok(PackValue::Int(self.i64_le()?)),
            0x13 => self.buf(16).map(|b| ext(ext_tag::DECIMAL128, PackValue::Bytes(b))),
            0xff => Ok(ext(ext_tag::MIN_KEY, PackValue::Null)),
            0x7f => Ok(ext(ext_tag::MAX_KEY, PackValue::Null)),
            _ => Err(BsonError::UnsupportedType(typ, self.x)),
        }
    }

    fn read_array(&mut self) -> Result<PackValue, BsonError> {
        let fields = self.read_document()?;
        let mut indexed: Vec<(usize, PackValue)> = fields
            .into_iter()
            .map(|(k, v)| (k.parse::<usize>().unwrap_or(0), v))
            .collect();
        indexed.sort_by_key(|(i, _)| *i);
        Ok(PackValue::Array(indexed.into_iter().map(|(_, v)| v).collect()))
    }

    fn read_binary(&mut self) -> Result<PackValue, BsonError> {
        let length = self.i32_le()? as usize;
        let subtype = self.u8()?;
        let data = self.buf(length)?;
        Ok(ext(ext_tag::BINARY, PackValue::Object(vec![
            ("subtype".to_string(), PackValue::Int(subtype as i64)),
            ("data".to_string(), PackValue::Bytes(data)),
        ])))
    }

    fn read_regex(&mut self) -> Result<PackValue, BsonError> {
        let pattern = self.read_cstring()?;
        let flags = self.read_cstring()?;
        Ok(ext(
            ext_tag::REGEX,
            PackValue::Array(vec![PackValue::Str(pattern), PackValue::Str(flags)]),
        ))
    }

    fn read_db_pointer(&mut self) -> Result<PackValue, BsonError> {
        let name = self.read_string()?;
        let id = self.buf(12)?;
        Ok(ext(
            ext_tag::DB_POINTER,
            PackValue::Object(vec![
                ("name".to_string(), PackValue::Str(name)),
                ("id".to_string(), PackValue::Bytes(id)),
            ]),
        ))
    }

    fn read_code_with_scope(&mut self) -> Result<PackValue, BsonError> {
        let _total_len = self.i32_le()?;
        let code = self.read_string()?;
        let scope = self.read_document()?;
        Ok(PackValue::Object(vec![
            ("code".to_string(), PackValue::Str(code)),
            ("scope".to_string(), PackValue::Object(scope)),
        ]))
    }

    fn read_timestamp(&mut self) -> Result<PackValue, BsonError> {
        let increment = self.i32_le()?;
        let timestamp = self.i32_le()?;
        Ok(ext(
            ext_tag::TIMESTAMP,
            PackValue::Array(vec![
                PackValue::Int(increment as i64),
                PackValue::Int(timestamp as i64),
            ]),
        ))
    }
}

fn ext(tag: u64, val: PackValue) -> PackValue {
    PackValue::Extension(Box::new(JsonPackExtension { tag, val: Box::new(val) }))
}

#[cfg(test)]
mod tests {
    use super::super::encoder::BsonEncoder;
    use super::*;

    #[test]
    fn decodes_a_flat_document() {
        let value = PackValue::Object(vec![
            ("name".to_string(), PackValue::Str("ferris".to_string())),
            ("age".to_string(), PackValue::Int(7)),
            ("active".to_string(), PackValue::Bool(true)),
        ]);
        let bytes = BsonEncoder::new().encode(&value).unwrap();
        assert_eq!(BsonDecoder::new(&bytes).decode().unwrap(), value);
    }

    #[test]
    fn rejects_proto_key() {
        let value = PackValue::Object(vec![("__proto__".to_string(), PackValue::Null)]);
        let bytes = BsonEncoder::new().encode(&value).unwrap();
        assert!(matches!(
            BsonDecoder::new(&bytes).decode(),
            Err(BsonError::InvalidKey(_))
        ));
    }
}
