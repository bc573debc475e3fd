//! UBJSON decoder. Understands the optimized `[$U#<len><bytes>]` byte-array
//! form (decoded to `PackValue::Bytes`) in addition to plain marker-per-value
//! containers.

use crate::PackValue;

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

pub struct UbjsonDecoder<'a> {
    data: &'a [u8],
    x: usize,
}

impl<'a> UbjsonDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, x: 0 }
    }

    pub fn decode(&mut self) -> Result<PackValue, UbjsonError> {
        self.read_any()
    }

    fn byte(&self) -> Result<u8, UbjsonError> {
        self.data.get(self.x).copied().ok_or(UbjsonError::UnexpectedEnd(self.x))
    }

    fn take(&mut self) -> Result<u8, UbjsonError> {
        let b = self.byte()?;
        self.x += 1;
        Ok(b)
    }

    fn ensure(&self, n: usize) -> Result<(), UbjsonError> {
        if self.x + n > self.data.len() {
            return Err(UbjsonError::UnexpectedEnd(self.x));
        }
        Ok(())
    }

    fn read_any(&mut self) -> Result<PackValue, UbjsonError> {
        let marker = self.take()?;
        self.read_value(marker)
    }

    fn read_value(&mut self, marker: u8) -> Result<PackValue, UbjsonError> {
        match marker {
            NULL => Ok(PackValue::Null),
            TRUE => Ok(PackValue::Bool(true)),
            FALSE => Ok(PackValue::Bool(false)),
            INT8 => {
                self.ensure(1)?;
                let b = self.take()?;
                Ok(PackValue::Int(b as i8 as i64))
            }
            UINT8 => {
                self.ensure(1)?;
                Ok(PackValue::Int(self.take()? as i64))
            }
            INT16 => {
                self.ensure(2)?;
                let bytes = [self.take()?, self.take()?];
                Ok(PackValue::Int(i16::from_be_bytes(bytes) as i64))
            }
            INT32 => {
                self.ensure(4)?;
                let mut bytes = [0u8; 4];
                for b in &mut bytes {
                    *b = self.take()?;
                }
                Ok(PackValue::Int(i32::from_be_bytes(bytes) as i64))
            }
            INT64 => {
                self.ensure(8)?;
                let mut bytes = [0u8; 8];
                for b in &mut bytes {
                    *b = self.take()?;
                }
                Ok(PackValue::Int(i64::from_be_bytes(bytes)))
            }
            FLOAT32 => {
                self.ensure(4)?;
                let mut bytes = [0u8; 4];
                for b in &mut bytes {
                    *b = self.take()?;
                }
                Ok(PackValue::Float32(f32::from_be_bytes(bytes)))
            }
            FLOAT64 => {
                self.ensure(8)?;
                let mut bytes = [0u8; 8];
                for b in &mut bytes {
                    *b = self.take()?;
                }
                Ok(PackValue::Float64(f64::from_be_bytes(bytes)))
            }
            STRING | b'H' => {
                let len = self.read_length()?;
                self.read_utf8(len).map(PackValue::Str)
            }
            b'C' => {
                self.ensure(1)?;
                let b = self.take()?;
                Ok(PackValue::Str((b as char).to_string()))
            }
            ARRAY_START => self.read_array(),
            OBJECT_START => self.read_object(),
            b => Err(UbjsonError::UnexpectedByte(b, self.x - 1)),
        }
    }

    fn read_length(&mut self) -> Result<usize, UbjsonError> {
        let marker = self.take()?;
        match self.read_value(marker)? {
            PackValue::Int(i) => Ok(i.max(0) as usize),
            _ => Err(UbjsonError::UnexpectedByte(marker, self.x)),
        }
    }

    fn read_utf8(&mut self, len: usize) -> Result<String, UbjsonError> {
        self.ensure(len)?;
        let bytes = &self.data[self.x..self.x + len];
        let s = std::str::from_utf8(bytes)
            .map_err(|_| UbjsonError::InvalidUtf8(self.x))?
            .to_string();
        self.x += len;
        Ok(s)
    }

    fn read_array(&mut self) -> Result<PackValue, UbjsonError> {
        if self.byte()? == b'$' {
            self.x += 1;
            let type_marker = self.take()?;
            if self.take()? != b'#' {
                return Err(UbjsonError::UnexpectedByte(b'#', self.x));
            }
            let len = self.read_length()?;
            if type_marker == UINT8 {
                self.ensure(len)?;
                let bytes = self.data[self.x..self.x + len].to_vec();
                self.x += len;
                return Ok(PackValue::Bytes(bytes));
            }
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(self.read_value(type_marker)?);
            }
            return Ok(PackValue::Array(items));
        }
        let mut items = Vec::new();
        while self.byte()? != ARRAY_END {
            items.push(self.read_any()?);
        }
        self.x += 1;
        Ok(PackValue::Array(items))
    }

    fn read_object(&mut self) -> Result<PackValue, UbjsonError> {
        let mut pairs = Vec::new();
        while self.byte()? != OBJECT_END {
            let len = self.read_length()?;
            let key = self.read_utf8(len)?;
            if key == "__proto__" {
                return Err(UbjsonError::InvalidKey(self.x));
            }
            let value = self.read_any()?;
            pairs.push((key, value));
        }
        self.x += 1;
        Ok(PackValue::Object(pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::super::encoder::UbjsonEncoder;
    use super::*;

    #[test]
    fn roundtrips_scalars_and_containers() {
        let value = PackValue::Object(vec![
            ("name".to_string(), PackValue::Str("ferris".to_string())),
            ("age".to_string(), PackValue::Int(7)),
        ]);
        let bytes = UbjsonEncoder::new().encode(&value).unwrap();
        assert_eq!(UbjsonDecoder::new(&bytes).decode().unwrap(), value);
    }

    #[test]
    fn roundtrips_bytes_through_optimized_array() {
        let value = PackValue::Bytes(vec![1, 2, 3, 250, 255]);
        let bytes = UbjsonEncoder::new().encode(&value).unwrap();
        assert_eq!(UbjsonDecoder::new(&bytes).decode().unwrap(), value);
    }

    #[test]
    fn rejects_proto_key() {
        let raw = b"{U\x09__proto__i\x01}";
        assert!(matches!(
            UbjsonDecoder::new(raw).decode(),
            Err(UbjsonError::InvalidKey(_))
        ));
    }
}
