//! Binary Ion 1.0 decoder: reads the IVM, an optional local symbol table,
//! then decodes the trailing value using whatever symbols it introduced.

use crate::PackValue;

use super::constants::{Type, ION_BVM, SID_ION_SYMBOL_TABLE, SID_SYMBOLS};
use super::error::IonError;
use super::symbols::IonSymbols;

pub struct IonDecoder<'a> {
    data: &'a [u8],
    pos: usize,
    symbols: IonSymbols,
}

impl<'a> IonDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0, symbols: IonSymbols::new() }
    }

    pub fn decode(mut self) -> Result<PackValue, IonError> {
        self.read_header()?;
        self.maybe_read_symbol_table()?;
        self.read_value()
    }

    fn read_header(&mut self) -> Result<(), IonError> {
        if self.data.len() < 4 || self.data[0..4] != ION_BVM {
            return Err(IonError::InvalidHeader);
        }
        self.pos = 4;
        Ok(())
    }

    fn maybe_read_symbol_table(&mut self) -> Result<(), IonError> {
        let start = self.pos;
        let Some(&byte) = self.data.get(self.pos) else {
            return Ok(());
        };
        let ty = byte >> 4;
        if ty != Type::ANNO {
            return Ok(());
        }
        let len = self.read_length(byte)?;
        let body_start = self.pos;
        let body_end = body_start + len;
        if body_end > self.data.len() {
            return Err(IonError::UnexpectedEnd(body_start));
        }

        let (anno_len, anno_len_bytes) = self.read_vuint_at(body_start)?;
        let sid_pos = body_start + anno_len_bytes;
        let (sid, sid_bytes) = self.read_vuint_at(sid_pos)?;
        if anno_len as usize != sid_bytes || sid != SID_ION_SYMBOL_TABLE as u64 {
            // Not a symbol table annotation; rewind and let read_value handle it.
            self.pos = start;
            return Ok(());
        }

        self.pos = sid_pos + sid_bytes;
        let value = self.read_value()?;
        if let PackValue::Object(fields) = &value {
            for (key, val) in fields {
                if key == "symbols" {
                    if let PackValue::Array(items) = val {
                        let names = items
                            .iter()
                            .filter_map(|v| v.as_str().map(str::to_string))
                            .collect();
                        self.symbols.set_names(names);
                    }
                }
            }
        }
        self.pos = body_end;
        Ok(())
    }

    fn read_value(&mut self) -> Result<PackValue, IonError> {
        let at = self.pos;
        let byte = self.next_byte()?;
        let ty = byte >> 4;
        match ty {
            t if t == Type::NULL => {
                self.pos += 1;
                Ok(PackValue::Null)
            }
            t if t == Type::BOOL => {
                self.pos += 1;
                Ok(PackValue::Bool(byte & 0x0f == 1))
            }
            t if t == Type::UINT => {
                let len = self.read_length(byte)?;
                let magnitude = self.read_uint_bytes(len)?;
                Ok(PackValue::UInt(magnitude))
            }
            t if t == Type::NINT => {
                let len = self.read_length(byte)?;
                let magnitude = self.read_uint_bytes(len)?;
                Ok(PackValue::Int(-(magnitude as i64)))
            }
            t if t == Type::FLOT => {
                let len = self.read_length(byte)?;
                if len == 0 {
                    return Ok(PackValue::Float64(0.0));
                }
                let bytes = self.take(len, at)?;
                let arr: [u8; 8] = bytes.try_into().map_err(|_| IonError::UnexpectedEnd(at))?;
                Ok(PackValue::Float64(f64::from_be_bytes(arr)))
            }
            t if t == Type::STRI => {
                let len = self.read_length(byte)?;
                let bytes = self.take(len, at)?;
                let s = String::from_utf8(bytes.to_vec()).map_err(|_| IonError::InvalidUtf8(at))?;
                Ok(PackValue::Str(s))
            }
            t if t == Type::BINA => {
                let len = self.read_length(byte)?;
                let bytes = self.take(len, at)?;
                Ok(PackValue::Bytes(bytes.to_vec()))
            }
            t if t == Type::LIST => {
                let len = self.read_length(byte)?;
                let end = self.pos + len;
                let mut items = Vec::new();
                while self.pos < end {
                    items.push(self.read_value()?);
                }
                Ok(PackValue::Array(items))
            }
            t if t == Type::STRU => {
                let len = self.read_length(byte)?;
                let end = self.pos + len;
                let mut fields = Vec::new();
                while self.pos < end {
                    let field_at = self.pos;
                    let (sid, sid_bytes) = self.read_vuint_at(self.pos)?;
                    self.pos += sid_bytes;
                    let value = self.read_value()?;
                    let name = self
                        .symbols
                        .name_for(sid as u32)
                        .map(str::to_string)
                        .ok_or(IonError::UnknownSymbol(sid as u32, field_at))?;
                    fields.push((name, value));
                }
                Ok(PackValue::Object(fields))
            }
            t if t == Type::ANNO => {
                let len = self.read_length(byte)?;
                let end = self.pos + len;
                let (anno_len, anno_len_bytes) = self.read_vuint_at(self.pos)?;
                self.pos += anno_len_bytes + anno_len as usize;
                let value = self.read_value()?;
                self.pos = end;
                Ok(value)
            }
            _ => Err(IonError::UnsupportedType(byte, at)),
        }
    }

    fn read_length(&mut self, descriptor: u8) -> Result<usize, IonError> {
        let at = self.pos;
        let low = descriptor & 0x0f;
        self.pos += 1;
        if low < 14 {
            Ok(low as usize)
        } else {
            let (len, consumed) = self.read_vuint_at(self.pos)?;
            self.pos += consumed;
            let _ = at;
            Ok(len as usize)
        }
    }

    fn read_uint_bytes(&mut self, len: usize) -> Result<u64, IonError> {
        let at = self.pos;
        let bytes = self.take(len, at)?;
        let mut value: u64 = 0;
        for &b in bytes {
            value = (value << 8) | b as u64;
        }
        Ok(value)
    }

    fn read_vuint_at(&self, pos: usize) -> Result<(u64, usize), IonError> {
        let mut value: u64 = 0;
        let mut consumed = 0;
        loop {
            let byte = *self.data.get(pos + consumed).ok_or(IonError::UnexpectedEnd(pos))?;
            value = (value << 7) | (byte & 0x7f) as u64;
            consumed += 1;
            if byte & 0x80 != 0 {
                break;
            }
            if consumed > 10 {
                return Err(IonError::UnexpectedEnd(pos));
            }
        }
        Ok((value, consumed))
    }

    fn take(&mut self, len: usize, at: usize) -> Result<&'a [u8], IonError> {
        let end = self.pos + len;
        if end > self.data.len() {
            return Err(IonError::UnexpectedEnd(at));
        }
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn next_byte(&self) -> Result<u8, IonError> {
        self.data.get(self.pos).copied().ok_or(IonError::UnexpectedEnd(self.pos))
    }
}

pub fn decode(data: &[u8]) -> Result<PackValue, IonError> {
    IonDecoder::new(data).decode()
}

#[cfg(test)]
mod tests {
    use super::super::encoder::encode;
    use super::*;

    #[test]
    fn rejects_missing_header() {
        assert_eq!(decode(&[0, 1, 2]), Err(IonError::InvalidHeader));
    }

    #[test]
    fn roundtrips_scalars() {
        assert_eq!(decode(&encode(&PackValue::Null)).unwrap(), PackValue::Null);
        assert_eq!(decode(&encode(&PackValue::Bool(true))).unwrap(), PackValue::Bool(true));
        assert_eq!(decode(&encode(&PackValue::UInt(9000))).unwrap(), PackValue::UInt(9000));
        assert_eq!(decode(&encode(&PackValue::Int(-42))).unwrap(), PackValue::Int(-42));
        assert_eq!(decode(&encode(&PackValue::Str("hi".to_string()))).unwrap(), PackValue::Str("hi".to_string()));
    }

    #[test]
    fn roundtrips_struct_through_local_symbol_table() {
        let value = PackValue::Object(vec![
            ("name".to_string(), PackValue::Str("ion".to_string())),
            ("count".to_string(), PackValue::UInt(3)),
        ]);
        assert_eq!(decode(&encode(&value)).unwrap(), value);
    }

    #[test]
    fn roundtrips_nested_array_of_structs() {
        let value = PackValue::Array(vec![
            PackValue::Object(vec![("a".to_string(), PackValue::Int(1))]),
            PackValue::Object(vec![("a".to_string(), PackValue::Int(2))]),
        ]);
        assert_eq!(decode(&encode(&value)).unwrap(), value);
    }

    #[test]
    fn unknown_symbol_id_is_an_error() {
        let mut bytes = ION_BVM.to_vec();
        // A struct with one field keyed on symbol id 50, which was never
        // introduced by a preceding local symbol table.
        bytes.push((Type::STRU << 4) | 2);
        bytes.push(50);
        bytes.push((Type::NULL << 4) | 0x0f);
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, IonError::UnknownSymbol(50, _)));
    }
}
