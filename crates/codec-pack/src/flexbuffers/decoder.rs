//! Reader for the tag-prefixed stream `FlexBufferEncoder` writes.

use crate::PackValue;

use super::error::FlexBufferError;
use super::types::tag;

pub struct FlexBufferDecoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FlexBufferDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn decode(mut self) -> Result<PackValue, FlexBufferError> {
        if self.data.last().copied() != Some(tag::ROOT_FOOTER_MAGIC) {
            return Err(FlexBufferError::InvalidFooter);
        }
        self.read_value()
    }

    fn read_value(&mut self) -> Result<PackValue, FlexBufferError> {
        let at = self.pos;
        let t = self.byte()?;
        self.pos += 1;
        match t {
            tag::NULL => Ok(PackValue::Null),
            tag::BOOL_FALSE => Ok(PackValue::Bool(false)),
            tag::BOOL_TRUE => Ok(PackValue::Bool(true)),
            tag::INT => {
                let bytes = self.take(8, at)?;
                let arr: [u8; 8] = bytes.try_into().map_err(|_| FlexBufferError::UnexpectedEnd(at))?;
                Ok(PackValue::Int(i64::from_le_bytes(arr)))
            }
            tag::UINT => {
                let bytes = self.take(8, at)?;
                let arr: [u8; 8] = bytes.try_into().map_err(|_| FlexBufferError::UnexpectedEnd(at))?;
                Ok(PackValue::UInt(u64::from_le_bytes(arr)))
            }
            tag::FLOAT => {
                let bytes = self.take(8, at)?;
                let arr: [u8; 8] = bytes.try_into().map_err(|_| FlexBufferError::UnexpectedEnd(at))?;
                Ok(PackValue::Float64(f64::from_le_bytes(arr)))
            }
            tag::STRING => {
                let len = self.read_u32(at)? as usize;
                let bytes = self.take(len, at)?;
                let s = String::from_utf8(bytes.to_vec()).map_err(|_| FlexBufferError::InvalidUtf8(at))?;
                Ok(PackValue::Str(s))
            }
            tag::BLOB => {
                let len = self.read_u32(at)? as usize;
                Ok(PackValue::Bytes(self.take(len, at)?.to_vec()))
            }
            tag::VECTOR => {
                let len = self.read_u32(at)? as usize;
                let mut items = Vec::with_capacity(len);
                for _ in 0..len {
                    items.push(self.read_value()?);
                }
                Ok(PackValue::Array(items))
            }
            tag::MAP => {
                let len = self.read_u32(at)? as usize;
                let mut fields = Vec::with_capacity(len);
                for _ in 0..len {
                    let key_at = self.pos;
                    let key_tag = self.byte()?;
                    if key_tag != tag::STRING {
                        return Err(FlexBufferError::UnknownTag(key_tag, key_at));
                    }
                    let PackValue::Str(key) = self.read_value()? else {
                        unreachable!("string tag always decodes to PackValue::Str")
                    };
                    let value = self.read_value()?;
                    fields.push((key, value));
                }
                Ok(PackValue::Object(fields))
            }
            other => Err(FlexBufferError::UnknownTag(other, at)),
        }
    }

    fn read_u32(&mut self, at: usize) -> Result<u32, FlexBufferError> {
        let bytes = self.take(4, at)?;
        let arr: [u8; 4] = bytes.try_into().map_err(|_| FlexBufferError::UnexpectedEnd(at))?;
        Ok(u32::from_le_bytes(arr))
    }

    fn byte(&self) -> Result<u8, FlexBufferError> {
        self.data.get(self.pos).copied().ok_or(FlexBufferError::UnexpectedEnd(self.pos))
    }

    fn take(&mut self, len: usize, at: usize) -> Result<&'a [u8], FlexBufferError> {
        let end = self.pos + len;
        if end > self.data.len() {
            return Err(FlexBufferError::UnexpectedEnd(at));
        }
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }
}

pub fn decode(data: &[u8]) -> Result<PackValue, FlexBufferError> {
    FlexBufferDecoder::new(data).decode()
}

#[cfg(test)]
mod tests {
    use super::super::encoder::encode;
    use super::*;

    #[test]
    fn rejects_missing_footer() {
        assert_eq!(decode(&[tag::NULL]), Err(FlexBufferError::InvalidFooter));
    }

    #[test]
    fn roundtrips_scalars() {
        assert_eq!(decode(&encode(&PackValue::Null)).unwrap(), PackValue::Null);
        assert_eq!(decode(&encode(&PackValue::Int(-9))).unwrap(), PackValue::Int(-9));
        assert_eq!(decode(&encode(&PackValue::Str("hi".to_string()))).unwrap(), PackValue::Str("hi".to_string()));
    }

    #[test]
    fn roundtrips_map_and_vector() {
        let value = PackValue::Object(vec![
            ("a".to_string(), PackValue::Array(vec![PackValue::Int(1), PackValue::Int(2)])),
        ]);
        assert_eq!(decode(&encode(&value)).unwrap(), value);
    }
}
