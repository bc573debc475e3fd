//! Reader for the tag-prefixed schemaless Avro encoding this crate writes.

use crate::{JsonPackExtension, PackValue};

use super::error::AvroError;
use super::types::tag;

pub struct AvroDecoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> AvroDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn decode(mut self) -> Result<PackValue, AvroError> {
        self.read_value()
    }

    fn read_value(&mut self) -> Result<PackValue, AvroError> {
        let at = self.pos;
        let t = self.byte()?;
        self.pos += 1;
        match t {
            tag::NULL => Ok(PackValue::Null),
            tag::BOOL_FALSE => Ok(PackValue::Bool(false)),
            tag::BOOL_TRUE => Ok(PackValue::Bool(true)),
            tag::LONG => Ok(PackValue::Int(self.read_long()?)),
            tag::FLOAT => {
                let bytes = self.take(4, at)?;
                let arr: [u8; 4] = bytes.try_into().map_err(|_| AvroError::UnexpectedEnd(at))?;
                Ok(PackValue::Float32(f32::from_le_bytes(arr)))
            }
            tag::DOUBLE => {
                let bytes = self.take(8, at)?;
                let arr: [u8; 8] = bytes.try_into().map_err(|_| AvroError::UnexpectedEnd(at))?;
                Ok(PackValue::Float64(f64::from_le_bytes(arr)))
            }
            tag::BYTES => {
                let len = self.read_long()? as usize;
                Ok(PackValue::Bytes(self.take(len, at)?.to_vec()))
            }
            tag::STRING => {
                let len = self.read_long()? as usize;
                let bytes = self.take(len, at)?;
                let s = String::from_utf8(bytes.to_vec()).map_err(|_| AvroError::InvalidUtf8(at))?;
                Ok(PackValue::Str(s))
            }
            tag::ARRAY => {
                let mut items = Vec::new();
                loop {
                    let block_at = self.pos;
                    let count = self.read_long()?;
                    if count == 0 {
                        break;
                    }
                    if count < 0 {
                        return Err(AvroError::NegativeBlockCount(block_at));
                    }
                    for _ in 0..count {
                        items.push(self.read_value()?);
                    }
                }
                Ok(PackValue::Array(items))
            }
            tag::MAP => {
                let mut fields = Vec::new();
                loop {
                    let block_at = self.pos;
                    let count = self.read_long()?;
                    if count == 0 {
                        break;
                    }
                    if count < 0 {
                        return Err(AvroError::NegativeBlockCount(block_at));
                    }
                    for _ in 0..count {
                        let key_at = self.pos;
                        let key_len = self.read_long()? as usize;
                        let key_bytes = self.take(key_len, key_at)?;
                        let key = String::from_utf8(key_bytes.to_vec()).map_err(|_| AvroError::InvalidUtf8(key_at))?;
                        let value = self.read_value()?;
                        fields.push((key, value));
                    }
                }
                Ok(PackValue::Object(fields))
            }
            tag::FIXED => {
                let len = self.read_long()? as usize;
                if len == 8 {
                    // May be an encoded extension: a u64 tag followed by a
                    // nested value. Peek by trying to decode it that way;
                    // fall back to a plain blob if the nested read fails.
                    let tag_bytes = self.take(8, at)?;
                    let tag_arr: [u8; 8] = tag_bytes.try_into().map_err(|_| AvroError::UnexpectedEnd(at))?;
                    let ext_tag = u64::from_le_bytes(tag_arr);
                    let checkpoint = self.pos;
                    match self.read_value() {
                        Ok(val) => Ok(PackValue::Extension(Box::new(JsonPackExtension::new(ext_tag, val)))),
                        Err(_) => {
                            self.pos = checkpoint;
                            Ok(PackValue::Bytes(tag_bytes.to_vec()))
                        }
                    }
                } else {
                    Ok(PackValue::Bytes(self.take(len, at)?.to_vec()))
                }
            }
            other => Err(AvroError::UnknownTag(other, at)),
        }
    }

    fn read_long(&mut self) -> Result<i64, AvroError> {
        let at = self.pos;
        let mut result: u64 = 0;
        let mut shift = 0;
        loop {
            let byte = self.byte()?;
            self.pos += 1;
            result |= ((byte & 0x7f) as u64) << shift;
            if byte & 0x80 == 0 {
                break;
            }
            shift += 7;
            if shift > 63 {
                return Err(AvroError::InvalidVarint(at));
            }
        }
        Ok(((result >> 1) as i64) ^ -((result & 1) as i64))
    }

    fn byte(&self) -> Result<u8, AvroError> {
        self.data.get(self.pos).copied().ok_or(AvroError::UnexpectedEnd(self.pos))
    }

    fn take(&mut self, len: usize, at: usize) -> Result<&'a [u8], AvroError> {
        let end = self.pos + len;
        if end > self.data.len() {
            return Err(AvroError::UnexpectedEnd(at));
        }
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }
}

pub fn decode(data: &[u8]) -> Result<PackValue, AvroError> {
    AvroDecoder::new(data).decode()
}

#[cfg(test)]
mod tests {
    use super::super::encoder::encode;
    use super::*;

    #[test]
    fn roundtrips_scalars() {
        assert_eq!(decode(&encode(&PackValue::Null)).unwrap(), PackValue::Null);
        assert_eq!(decode(&encode(&PackValue::Bool(true))).unwrap(), PackValue::Bool(true));
        assert_eq!(decode(&encode(&PackValue::Int(-7))).unwrap(), PackValue::Int(-7));
        assert_eq!(decode(&encode(&PackValue::Float64(1.5))).unwrap(), PackValue::Float64(1.5));
        assert_eq!(decode(&encode(&PackValue::Str("hi".to_string()))).unwrap(), PackValue::Str("hi".to_string()));
    }

    #[test]
    fn roundtrips_array_and_map() {
        let value = PackValue::Array(vec![PackValue::Int(1), PackValue::Int(2), PackValue::Int(3)]);
        assert_eq!(decode(&encode(&value)).unwrap(), value);

        let obj = PackValue::Object(vec![("a".to_string(), PackValue::Int(1))]);
        assert_eq!(decode(&encode(&obj)).unwrap(), obj);
    }

    #[test]
    fn empty_array_is_a_single_zero_block() {
        let bytes = encode(&PackValue::Array(vec![]));
        assert_eq!(bytes, vec![tag::ARRAY, 0]);
    }
}
