//! RESP3 decoder. Every scalar and aggregate type is read straight into
//! [`PackValue`]; kinds with no universal-value counterpart (Push,
//! Attributes, Verbatim String, Set, the two error types) round-trip
//! through `PackValue::Extension`.

use crate::PackValue;

use super::constants::Resp;
use super::error::RespError;
use super::extensions::{resp_attributes, resp_bulk_error, resp_push, resp_set, resp_simple_error, resp_verbatim_string};

pub struct RespDecoder<'a> {
    data: &'a [u8],
    x: usize,
    pub try_utf8: bool,
}

impl<'a> RespDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, x: 0, try_utf8: true }
    }

    pub fn position(&self) -> usize {
        self.x
    }

    pub fn decode(&mut self) -> Result<PackValue, RespError> {
        self.read_any()
    }

    fn byte(&self) -> Result<u8, RespError> {
        self.data.get(self.x).copied().ok_or(RespError::EndOfInput)
    }

    fn find_crlf(&self, from: usize) -> Result<usize, RespError> {
        let mut i = from;
        while i + 1 < self.data.len() {
            if self.data[i] == b'\r' && self.data[i + 1] == b'\n' {
                return Ok(i);
            }
            i += 1;
        }
        Err(RespError::EndOfInput)
    }

    fn read_line(&mut self) -> Result<&'a [u8], RespError> {
        let end = self.find_crlf(self.x)?;
        let line = &self.data[self.x..end];
        self.x = end + 2;
        Ok(line)
    }

    fn read_line_str(&mut self) -> Result<String, RespError> {
        let at = self.x;
        let line = self.read_line()?;
        std::str::from_utf8(line)
            .map(str::to_string)
            .map_err(|_| RespError::InvalidUtf8(at))
    }

    fn read_len(&mut self) -> Result<i64, RespError> {
        let at = self.x;
        let s = self.read_line_str()?;
        s.parse::<i64>().map_err(|_| RespError::InvalidInteger(at))
    }

    fn read_bulk_bytes(&mut self) -> Result<Option<Vec<u8>>, RespError> {
        let len = self.read_len()?;
        if len < 0 {
            return Ok(None);
        }
        let len = len as usize;
        if self.x + len + 2 > self.data.len() {
            return Err(RespError::EndOfInput);
        }
        let bytes = self.data[self.x..self.x + len].to_vec();
        self.x += len + 2;
        Ok(Some(bytes))
    }

    fn bulk_to_value(&self, bytes: Vec<u8>) -> PackValue {
        if self.try_utf8 {
            if let Ok(s) = String::from_utf8(bytes.clone()) {
                return PackValue::Str(s);
            }
        }
        PackValue::Bytes(bytes)
    }

    pub fn read_any(&mut self) -> Result<PackValue, RespError> {
        let marker = self.byte()?;
        self.x += 1;
        match marker {
            b if b == Resp::NULL => {
                self.read_line()?;
                Ok(PackValue::Null)
            }
            b if b == Resp::BOOL => {
                let line = self.read_line()?;
                Ok(PackValue::Bool(line == b"t"))
            }
            b if b == Resp::INT => {
                let at = self.x;
                let s = self.read_line_str()?;
                s.parse::<i64>().map(PackValue::Int).map_err(|_| RespError::InvalidInteger(at))
            }
            b if b == Resp::BIG => {
                let at = self.x;
                let s = self.read_line_str()?;
                s.parse::<i128>().map(PackValue::BigInt).map_err(|_| RespError::InvalidInteger(at))
            }
            b if b == Resp::FLOAT => {
                let s = self.read_line_str()?;
                let f = match s.as_str() {
                    "inf" => f64::INFINITY,
                    "-inf" => f64::NEG_INFINITY,
                    "nan" => f64::NAN,
                    _ => s.parse::<f64>().unwrap_or(f64::NAN),
                };
                Ok(PackValue::Float64(f))
            }
            b if b == Resp::STR_SIMPLE => self.read_line_str().map(PackValue::Str),
            b if b == Resp::ERR_SIMPLE => self.read_line_str().map(resp_simple_error),
            b if b == Resp::STR_BULK => match self.read_bulk_bytes()? {
                Some(bytes) => Ok(self.bulk_to_value(bytes)),
                None => Ok(PackValue::Null),
            },
            b if b == Resp::ERR_BULK => match self.read_bulk_bytes()? {
                Some(bytes) => Ok(resp_bulk_error(String::from_utf8_lossy(&bytes).into_owned())),
                None => Ok(PackValue::Null),
            },
            b if b == Resp::STR_VERBATIM => match self.read_bulk_bytes()? {
                Some(bytes) => {
                    let text = String::from_utf8_lossy(&bytes);
                    let content = text.get(4..).unwrap_or(&text).to_string();
                    Ok(resp_verbatim_string(content))
                }
                None => Ok(PackValue::Null),
            },
            b if b == Resp::ARR => match self.read_aggregate_array()? {
                Some(items) => Ok(PackValue::Array(items)),
                None => Ok(PackValue::Null),
            },
            b if b == Resp::SET => {
                let items = self.read_aggregate_array()?.unwrap_or_default();
                Ok(resp_set(items))
            }
            b if b == Resp::PUSH => {
                let items = self.read_aggregate_array()?.unwrap_or_default();
                Ok(resp_push(items))
            }
            b if b == Resp::OBJ => self.read_map().map(PackValue::Object),
            b if b == Resp::ATTR => {
                let fields = self.read_map()?;
                Ok(resp_attributes(fields))
            }
            b => Err(RespError::UnexpectedByte(b, self.x - 1)),
        }
    }

    fn read_aggregate_array(&mut self) -> Result<Option<Vec<PackValue>>, RespError> {
        let count = self.read_len()?;
        if count < 0 {
            return Ok(None);
        }
        let mut items = Vec::with_capacity(count as usize);
        for _ in 0..count {
            items.push(self.read_any()?);
        }
        Ok(Some(items))
    }

    fn read_map(&mut self) -> Result<Vec<(String, PackValue)>, RespError> {
        let count = self.read_len()?;
        let mut pairs = Vec::with_capacity(count.max(0) as usize);
        for _ in 0..count.max(0) {
            let key = self.read_any()?;
            let val = self.read_any()?;
            let key_string = match key {
                PackValue::Str(s) => s,
                other => format!("{other:?}"),
            };
            pairs.push((key_string, val));
        }
        Ok(pairs)
    }

    pub fn skip_any(&mut self) -> Result<(), RespError> {
        self.read_any().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_simple_string() {
        let mut d = RespDecoder::new(b"+OK\r\n");
        assert_eq!(d.decode().unwrap(), PackValue::Str("OK".to_string()));
    }

    #[test]
    fn decodes_bulk_string_and_null() {
        assert_eq!(
            RespDecoder::new(b"$5\r\nhello\r\n").decode().unwrap(),
            PackValue::Str("hello".to_string())
        );
        assert_eq!(RespDecoder::new(b"$-1\r\n").decode().unwrap(), PackValue::Null);
    }

    #[test]
    fn decodes_array() {
        let value = RespDecoder::new(b"*2\r\n:1\r\n:2\r\n").decode().unwrap();
        assert_eq!(value, PackValue::Array(vec![PackValue::Int(1), PackValue::Int(2)]));
    }

    #[test]
    fn decodes_map() {
        let value = RespDecoder::new(b"%1\r\n+k\r\n:1\r\n").decode().unwrap();
        assert_eq!(value, PackValue::Object(vec![("k".to_string(), PackValue::Int(1))]));
    }
}
