//! Smile decoder.

use crate::{JsonPackMpint, PackValue};

use super::bits7::{float_from_7bit, unpack_7bit};
use super::constants::*;
use super::error::SmileError;
use super::shared_table::SharedStringTable;
use super::vint::{read_vint, zigzag_decode};

pub struct SmileDecoder<'a> {
    data: &'a [u8],
    x: usize,
    shared_keys: bool,
    shared_values: bool,
    key_table: SharedStringTable,
    value_table: SharedStringTable,
    max_depth: usize,
}

impl<'a> SmileDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            x: 0,
            shared_keys: true,
            shared_values: true,
            key_table: SharedStringTable::new(),
            value_table: SharedStringTable::new(),
            max_depth: 256,
        }
    }

    pub fn decode(&mut self) -> Result<PackValue, SmileError> {
        self.read_header()?;
        self.read_value(0)
    }

    fn read_header(&mut self) -> Result<(), SmileError> {
        if self.data.len() < 4 {
            return Err(SmileError::UnexpectedEnd(self.x));
        }
        if self.data[0..3] != HEADER {
            return Err(SmileError::InvalidHeader(0));
        }
        let flags = self.data[3];
        if flags & 0b1111_0000 != 0 {
            return Err(SmileError::UnsupportedVersion(flags));
        }
        self.shared_keys = flags & FLAG_SHARED_PROPERTY_NAMES != 0;
        self.shared_values = flags & FLAG_SHARED_STRING_VALUES != 0;
        self.x = 4;
        Ok(())
    }

    fn byte(&self) -> Result<u8, SmileError> {
        self.data.get(self.x).copied().ok_or(SmileError::UnexpectedEnd(self.x))
    }

    fn read_value(&mut self, depth: usize) -> Result<PackValue, SmileError> {
        let at = self.x;
        let token = self.byte()?;
        if depth > self.max_depth {
            return Err(SmileError::InvalidToken(token, at));
        }
        self.x += 1;
        match token {
            TOKEN_EMPTY_STRING => Ok(PackValue::Str(String::new())),
            TOKEN_NULL => Ok(PackValue::Null),
            TOKEN_FALSE => Ok(PackValue::Bool(false)),
            TOKEN_TRUE => Ok(PackValue::Bool(true)),
            TOKEN_INT32 | TOKEN_INT64 => {
                let zz = read_vint(self.data, &mut self.x)?;
                Ok(PackValue::Int(zigzag_decode(zz)))
            }
            TOKEN_BIG_INTEGER => {
                let len = read_vint(self.data, &mut self.x)? as usize;
                self.ensure(len)?;
                let bytes = self.data[self.x..self.x + len].to_vec();
                self.x += len;
                Ok(PackValue::BigInt(JsonPackMpint { data: bytes }.to_i128()))
            }
            TOKEN_BIG_DECIMAL => Err(SmileError::InvalidToken(token, at)),
            TOKEN_FLOAT32 => {
                self.ensure(5)?;
                let bits = float_from_7bit(&self.data[self.x..self.x + 5], 32, 5) as u32;
                self.x += 5;
                Ok(PackValue::Float32(f32::from_bits(bits)))
            }
            TOKEN_FLOAT64 => {
                self.ensure(10)?;
                let bits = float_from_7bit(&self.data[self.x..self.x + 10], 64, 10);
                self.x += 10;
                Ok(PackValue::Float64(f64::from_bits(bits)))
            }
            SMALL_INT_START..=SMALL_INT_END => {
                Ok(PackValue::Int(token as i64 - SMALL_INT_START as i64 - 16))
            }
            TINY_ASCII_START..=TINY_ASCII_END => {
                let len = (token - TINY_ASCII_START) as usize + 1;
                self.read_literal_string_value(len)
            }
            SHORT_ASCII_START..=SHORT_ASCII_END => {
                let len = (token - SHORT_ASCII_START) as usize + 33;
                self.read_literal_string_value(len)
            }
            TINY_UNICODE_START..=TINY_UNICODE_END => {
                let len = (token - TINY_UNICODE_START) as usize + 2;
                self.read_literal_string_value(len)
            }
            SHORT_UNICODE_START..=SHORT_UNICODE_END => {
                let len = (token - SHORT_UNICODE_START) as usize + 34;
                self.read_literal_string_value(len)
            }
            TOKEN_LONG_ASCII | TOKEN_LONG_UNICODE => {
                let end = self.find_end_marker()?;
                let bytes = self.data[self.x..end].to_vec();
                self.x = end + 1;
                let s = String::from_utf8(bytes).map_err(|_| SmileError::InvalidToken(token, at))?;
                if self.shared_values && s.len() <= 64 {
                    self.value_table.insert(&s);
                }
                Ok(PackValue::Str(s))
            }
            TOKEN_BINARY_7BIT => {
                let len = read_vint(self.data, &mut self.x)? as usize;
                let packed_len = (len * 8).div_ceil(7);
                self.ensure(packed_len)?;
                let packed = &self.data[self.x..self.x + packed_len];
                let bytes = unpack_7bit(packed, len);
                self.x += packed_len;
                Ok(PackValue::Bytes(bytes))
            }
            TOKEN_RAW_BINARY => {
                let len = read_vint(self.data, &mut self.x)? as usize;
                self.ensure(len)?;
                let bytes = self.data[self.x..self.x + len].to_vec();
                self.x += len;
                Ok(PackValue::Bytes(bytes))
            }
            SHORT_SHARED_VALUE_START..=SHORT_SHARED_VALUE_END => {
                let idx = (token - SHORT_SHARED_VALUE_START) as usize;
                self.lookup_shared_value(idx, at)
            }
            LONG_SHARED_VALUE_START..=LONG_SHARED_VALUE_END => {
                let hi = (token - LONG_SHARED_VALUE_START) as usize;
                let lo = self.byte()? as usize;
                self.x += 1;
                self.lookup_shared_value((hi << 8) | lo, at)
            }
            TOKEN_START_ARRAY => {
                let mut items = Vec::new();
                loop {
                    if self.byte()? == TOKEN_END_ARRAY {
                        self.x += 1;
                        break;
                    }
                    items.push(self.read_value(depth + 1)?);
                }
                Ok(PackValue::Array(items))
            }
            TOKEN_START_OBJECT => {
                let mut pairs = Vec::new();
                loop {
                    if self.byte()? == TOKEN_END_OBJECT {
                        self.x += 1;
                        break;
                    }
                    let key = self.read_key()?;
                    let val = self.read_value(depth + 1)?;
                    pairs.push((key, val));
                }
                Ok(PackValue::Object(pairs))
            }
            _ => Err(SmileError::InvalidToken(token, at)),
        }
    }

    fn read_literal_string_value(&mut self, len: usize) -> Result<PackValue, SmileError> {
        self.ensure(len)?;
        let bytes = &self.data[self.x..self.x + len];
        let s = std::str::from_utf8(bytes)
            .map_err(|_| SmileError::InvalidToken(bytes[0], self.x))?
            .to_string();
        self.x += len;
        if self.shared_values && s.len() <= 64 {
            self.value_table.insert(&s);
        }
        Ok(PackValue::Str(s))
    }

    fn lookup_shared_value(&self, idx: usize, at: usize) -> Result<PackValue, SmileError> {
        self.value_table
            .get(idx)
            .map(|s| PackValue::Str(s.to_string()))
            .ok_or(SmileError::InvalidReference(idx, at))
    }

    fn read_key(&mut self) -> Result<String, SmileError> {
        let at = self.x;
        let token = self.byte()?;
        self.x += 1;
        match token {
            TOKEN_EMPTY_KEY => Ok(String::new()),
            LONG_SHARED_KEY_START..=LONG_SHARED_KEY_END => {
                let hi = (token - LONG_SHARED_KEY_START) as usize;
                let lo = self.byte()? as usize;
                self.x += 1;
                let idx = (hi << 8) | lo;
                self.key_table
                    .get(idx)
                    .map(str::to_string)
                    .ok_or(SmileError::InvalidReference(idx, at))
            }
            TOKEN_LONG_KEY_UNICODE => {
                let end = self.find_end_marker()?;
                let bytes = self.data[self.x..end].to_vec();
                self.x = end + 1;
                let s = String::from_utf8(bytes).map_err(|_| SmileError::InvalidToken(token, at))?;
                if self.shared_keys {
                    self.key_table.insert(&s);
                }
                Ok(s)
            }
            SHORT_SHARED_KEY_START..=SHORT_SHARED_KEY_END => {
                let idx = (token - SHORT_SHARED_KEY_START) as usize;
                self.key_table
                    .get(idx)
                    .map(str::to_string)
                    .ok_or(SmileError::InvalidReference(idx, at))
            }
            SHORT_KEY_ASCII_START..=SHORT_KEY_ASCII_END => {
                let len = (token - SHORT_KEY_ASCII_START) as usize + 1;
                self.read_literal_key(len)
            }
            SHORT_KEY_UNICODE_START..=SHORT_KEY_UNICODE_END => {
                let len = (token - SHORT_KEY_UNICODE_START) as usize + 2;
                self.read_literal_key(len)
            }
            _ => Err(SmileError::InvalidToken(token, at)),
        }
    }

    fn read_literal_key(&mut self, len: usize) -> Result<String, SmileError> {
        self.ensure(len)?;
        let bytes = &self.data[self.x..self.x + len];
        let s = std::str::from_utf8(bytes)
            .map_err(|_| SmileError::InvalidToken(bytes[0], self.x))?
            .to_string();
        self.x += len;
        if self.shared_keys {
            self.key_table.insert(&s);
        }
        Ok(s)
    }

    fn find_end_marker(&self) -> Result<usize, SmileError> {
        self.data[self.x..]
            .iter()
            .position(|&b| b == TOKEN_END_STRING_MARKER)
            .map(|rel| self.x + rel)
            .ok_or(SmileError::UnexpectedEnd(self.x))
    }

    fn ensure(&self, n: usize) -> Result<(), SmileError> {
        if self.x + n > self.data.len() {
            return Err(SmileError::UnexpectedEnd(self.x));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::encoder::SmileEncoder;
    use super::*;

    #[test]
    fn roundtrips_scalars_and_containers() {
        let value = PackValue::Object(vec![
            ("name".to_string(), PackValue::Str("ferris".to_string())),
            ("age".to_string(), PackValue::Int(7)),
            (
                "tags".to_string(),
                PackValue::Array(vec![PackValue::Str("rust".to_string()), PackValue::Bool(true)]),
            ),
        ]);
        let bytes = SmileEncoder::new().encode(&value);
        let decoded = SmileDecoder::new(&bytes).decode().unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn repeated_keys_resolve_through_shared_table() {
        let value = PackValue::Array(vec![
            PackValue::Object(vec![("name".to_string(), PackValue::Int(1))]),
            PackValue::Object(vec![("name".to_string(), PackValue::Int(2))]),
        ]);
        let bytes = SmileEncoder::new().encode(&value);
        let decoded = SmileDecoder::new(&bytes).decode().unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn rejects_bad_header() {
        let bytes = [0x00, 0x00, 0x00, 0x00];
        assert!(matches!(
            SmileDecoder::new(&bytes).decode(),
            Err(SmileError::InvalidHeader(0))
        ));
    }

    #[test]
    fn small_ints_roundtrip() {
        for n in [-16i64, -1, 0, 1, 15] {
            let bytes = SmileEncoder::new().encode(&PackValue::Int(n));
            let decoded = SmileDecoder::new(&bytes).decode().unwrap();
            assert_eq!(decoded, PackValue::Int(n));
        }
    }

    #[test]
    fn floats_roundtrip() {
        let bytes = SmileEncoder::new().encode(&PackValue::Float64(std::f64::consts::PI));
        let decoded = SmileDecoder::new(&bytes).decode().unwrap();
        assert_eq!(decoded, PackValue::Float64(std::f64::consts::PI));
    }

    #[test]
    fn binary_roundtrips() {
        let data = PackValue::Bytes(vec![1, 2, 3, 250, 251, 252, 253, 254, 255]);
        let bytes = SmileEncoder::new().encode(&data);
        let decoded = SmileDecoder::new(&bytes).decode().unwrap();
        assert_eq!(decoded, data);
    }
}
