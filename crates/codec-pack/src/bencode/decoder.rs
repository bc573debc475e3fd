//! Bencode decoder: integers (`i42e`), byte strings (`4:spam`), lists
//! (`l...e`), and dictionaries (`d...e`) decoded into [`PackValue`].
//!
//! Dictionary values decode to `PackValue::Object` when every key is valid
//! UTF-8, matching the rest of this crate's string-keyed-map convention.

use crate::PackValue;

use super::error::BencodeError;

pub struct BencodeDecoder<'a> {
    data: &'a [u8],
    x: usize,
}

impl<'a> BencodeDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, x: 0 }
    }

    pub fn decode(&mut self) -> Result<PackValue, BencodeError> {
        self.read_any()
    }

    fn byte(&self) -> Result<u8, BencodeError> {
        self.data.get(self.x).copied().ok_or(BencodeError::UnexpectedEnd(self.x))
    }

    fn read_any(&mut self) -> Result<PackValue, BencodeError> {
        match self.byte()? {
            b'i' => self.read_int(),
            b'l' => self.read_list(),
            b'd' => self.read_dict(),
            b'0'..=b'9' => self.read_bytes().map(bytes_to_value),
            b => Err(BencodeError::UnexpectedByte(b, self.x)),
        }
    }

    fn read_int(&mut self) -> Result<PackValue, BencodeError> {
        self.x += 1;
        let start = self.x;
        while self.byte()? != b'e' {
            self.x += 1;
        }
        let text = std::str::from_utf8(&self.data[start..self.x])
            .map_err(|_| BencodeError::InvalidUtf8(start))?;
        self.x += 1;
        text.parse::<i64>()
            .map(PackValue::Int)
            .map_err(|_| BencodeError::UnexpectedByte(b'i', start))
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>, BencodeError> {
        let start = self.x;
        while self.byte()? != b':' {
            self.x += 1;
        }
        let len: usize = std::str::from_utf8(&self.data[start..self.x])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or(BencodeError::UnexpectedByte(b':', start))?;
        self.x += 1;
        if self.x + len > self.data.len() {
            return Err(BencodeError::UnexpectedEnd(self.x));
        }
        let bytes = self.data[self.x..self.x + len].to_vec();
        self.x += len;
        Ok(bytes)
    }

    fn read_list(&mut self) -> Result<PackValue, BencodeError> {
        self.x += 1;
        let mut items = Vec::new();
        while self.byte()? != b'e' {
            items.push(self.read_any()?);
        }
        self.x += 1;
        Ok(PackValue::Array(items))
    }

    fn read_dict(&mut self) -> Result<PackValue, BencodeError> {
        self.x += 1;
        let mut pairs = Vec::new();
        while self.byte()? != b'e' {
            let key_at = self.x;
            let key_bytes = self.read_bytes()?;
            let key = String::from_utf8(key_bytes).map_err(|_| BencodeError::InvalidUtf8(key_at))?;
            if key == "__proto__" {
                return Err(BencodeError::InvalidKey(key_at));
            }
            let value = self.read_any()?;
            pairs.push((key, value));
        }
        self.x += 1;
        Ok(PackValue::Object(pairs))
    }
}

fn bytes_to_value(bytes: Vec<u8>) -> PackValue {
    match String::from_utf8(bytes) {
        Ok(s) => PackValue::Str(s),
        Err(e) => PackValue::Bytes(e.into_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_scalars() {
        assert_eq!(BencodeDecoder::new(b"i42e").decode().unwrap(), PackValue::Int(42));
        assert_eq!(
            BencodeDecoder::new(b"4:spam").decode().unwrap(),
            PackValue::Str("spam".to_string())
        );
    }

    #[test]
    fn decodes_list_and_dict() {
        let value = BencodeDecoder::new(b"l4:spam4:eggse").decode().unwrap();
        assert_eq!(
            value,
            PackValue::Array(vec![
                PackValue::Str("spam".to_string()),
                PackValue::Str("eggs".to_string())
            ])
        );
        let dict = BencodeDecoder::new(b"d3:cow3:moo4:spam4:eggse").decode().unwrap();
        assert_eq!(
            dict,
            PackValue::Object(vec![
                ("cow".to_string(), PackValue::Str("moo".to_string())),
                ("spam".to_string(), PackValue::Str("eggs".to_string())),
            ])
        );
    }

    #[test]
    fn rejects_proto_key() {
        assert!(matches!(
            BencodeDecoder::new(b"d9:__proto__i1ee").decode(),
            Err(BencodeError::InvalidKey(_))
        ));
    }
}
