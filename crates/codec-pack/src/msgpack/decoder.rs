//! MessagePack decoder, including shallow-read navigation helpers.

use bytepack_buffers::Reader;

use crate::msgpack::error::MsgPackError;
use crate::{JsonPackExtension, PackValue};

const DEFAULT_MAX_DEPTH: usize = 1024;

/// Decodes MessagePack documents into [`PackValue`]s.
///
/// Besides the full-document `decode`, exposes header-only readers
/// (`read_str_hdr`, `read_arr_hdr`, `read_obj_hdr`) and `skip_any`/`find_key`/
/// `find_index` so a caller can resolve a path into a document without
/// materializing the parts it does not need.
pub struct MsgPackDecoder<'a> {
    pub reader: Reader<'a>,
    max_depth: usize,
}

impl<'a> MsgPackDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(data),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(data: &'a [u8], max_depth: usize) -> Self {
        Self {
            reader: Reader::new(data),
            max_depth,
        }
    }

    fn ensure(&self, n: usize) -> Result<(), MsgPackError> {
        if self.reader.x + n > self.reader.size() {
            return Err(MsgPackError::UnexpectedEnd(self.reader.x));
        }
        Ok(())
    }

    pub fn decode(&mut self) -> Result<PackValue, MsgPackError> {
        self.read_any(0)
    }

    pub fn read_any(&mut self, depth: usize) -> Result<PackValue, MsgPackError> {
        if depth > self.max_depth {
            return Err(MsgPackError::InvalidByte(0, self.reader.x));
        }
        self.ensure(1)?;
        let at = self.reader.x;
        let head = self.reader.u8();
        match head {
            0x00..=0x7f => Ok(PackValue::UInt(head as u64)),
            0xe0..=0xff => Ok(PackValue::Int((head as i8) as i64)),
            0xc0 => Ok(PackValue::Null),
            0xc2 => Ok(PackValue::Bool(false)),
            0xc3 => Ok(PackValue::Bool(true)),
            0xcc => {
                self.ensure(1)?;
                Ok(PackValue::UInt(self.reader.u8() as u64))
            }
            0xcd => {
                self.ensure(2)?;
                Ok(PackValue::UInt(self.reader.u16() as u64))
            }
            0xce => {
                self.ensure(4)?;
                Ok(PackValue::UInt(self.reader.u32() as u64))
            }
            0xcf => {
                self.ensure(8)?;
                Ok(PackValue::UInt(self.reader.u64()))
            }
            0xd0 => {
                self.ensure(1)?;
                Ok(PackValue::Int(self.reader.i8() as i64))
            }
            0xd1 => {
                self.ensure(2)?;
                Ok(PackValue::Int(self.reader.i16() as i64))
            }
            0xd2 => {
                self.ensure(4)?;
                Ok(PackValue::Int(self.reader.i32() as i64))
            }
            0xd3 => {
                self.ensure(8)?;
                Ok(PackValue::Int(self.reader.i64()))
            }
            0xca => {
                self.ensure(4)?;
                Ok(PackValue::Float32(self.reader.f32()))
            }
            0xcb => {
                self.ensure(8)?;
                Ok(PackValue::Float64(self.reader.f64()))
            }
            0xa0..=0xbf => self.read_str_body((head & 0x1f) as usize, at),
            0xd9 => {
                self.ensure(1)?;
                let len = self.reader.u8() as usize;
                self.read_str_body(len, at)
            }
            0xda => {
                self.ensure(2)?;
                let len = self.reader.u16() as usize;
                self.read_str_body(len, at)
            }
            0xdb => {
                self.ensure(4)?;
                let len = self.reader.u32() as usize;
                self.read_str_body(len, at)
            }
            0xc4 => {
                self.ensure(1)?;
                let len = self.reader.u8() as usize;
                self.read_bin_body(len)
            }
            0xc5 => {
                self.ensure(2)?;
                let len = self.reader.u16() as usize;
                self.read_bin_body(len)
            }
            0xc6 => {
                self.ensure(4)?;
                let len = self.reader.u32() as usize;
                self.read_bin_body(len)
            }
            0x90..=0x9f => self.read_arr_body((head & 0x0f) as usize, depth),
            0xdc => {
                self.ensure(2)?;
                let len = self.reader.u16() as usize;
                self.read_arr_body(len, depth)
            }
            0xdd => {
                self.ensure(4)?;
                let len = self.reader.u32() as usize;
                self.read_arr_body(len, depth)
            }
            0x80..=0x8f => self.read_obj_body((head & 0x0f) as usize, depth),
            0xde => {
                self.ensure(2)?;
                let len = self.reader.u16() as usize;
                self.read_obj_body(len, depth)
            }
            0xdf => {
                self.ensure(4)?;
                let len = self.reader.u32() as usize;
                self.read_obj_body(len, depth)
            }
            0xd4 => self.read_ext_body(1, depth),
            0xd5 => self.read_ext_body(2, depth),
            0xd6 => self.read_ext_body(4, depth),
            0xd7 => self.read_ext_body(8, depth),
            0xd8 => self.read_ext_body(16, depth),
            0xc7 => {
                self.ensure(1)?;
                let len = self.reader.u8() as usize;
                self.read_ext_body(len, depth)
            }
            0xc8 => {
                self.ensure(2)?;
                let len = self.reader.u16() as usize;
                self.read_ext_body(len, depth)
            }
            0xc9 => {
                self.ensure(4)?;
                let len = self.reader.u32() as usize;
                self.read_ext_body(len, depth)
            }
            _ => Err(MsgPackError::InvalidByte(head, at)),
        }
    }

    fn read_str_body(&mut self, len: usize, at: usize) -> Result<PackValue, MsgPackError> {
        self.ensure(len)?;
        let bytes = self.reader.buf(len);
        let s = std::str::from_utf8(bytes).map_err(|_| MsgPackError::InvalidUtf8(at))?;
        Ok(PackValue::Str(s.to_string()))
    }

    fn read_bin_body(&mut self, len: usize) -> Result<PackValue, MsgPackError> {
        self.ensure(len)?;
        Ok(PackValue::Bytes(self.reader.buf(len).to_vec()))
    }

    fn read_arr_body(&mut self, len: usize, depth: usize) -> Result<PackValue, MsgPackError> {
        let mut items = Vec::with_capacity(len.min(1024));
        for _ in 0..len {
            items.push(self.read_any(depth + 1)?);
        }
        Ok(PackValue::Array(items))
    }

    fn read_obj_body(&mut self, len: usize, depth: usize) -> Result<PackValue, MsgPackError> {
        let mut pairs = Vec::with_capacity(len.min(1024));
        for _ in 0..len {
            let key_at = self.reader.x;
            let key = match self.read_any(depth + 1)? {
                PackValue::Str(s) => s,
                _ => return Err(MsgPackError::InvalidKey(key_at)),
            };
            let value = self.read_any(depth + 1)?;
            pairs.push((key, value));
        }
        Ok(PackValue::Object(pairs))
    }

    fn read_ext_body(&mut self, len: usize, depth: usize) -> Result<PackValue, MsgPackError> {
        self.ensure(1)?;
        let tag = self.reader.i8();
        self.ensure(len)?;
        let payload = self.reader.buf(len).to_vec();
        let mut inner = MsgPackDecoder::new(&payload);
        let val = inner.read_any(depth + 1)?;
        Ok(PackValue::Extension(Box::new(JsonPackExtension::new(
            tag as u64,
            val,
        ))))
    }

    // ---- Shallow navigation ----

    /// Reads a string header, returning `(byte_length, body_offset)` without
    /// copying the body.
    pub fn read_str_hdr(&mut self) -> Result<(usize, usize), MsgPackError> {
        self.ensure(1)?;
        let at = self.reader.x;
        let head = self.reader.u8();
        let len = match head {
            0xa0..=0xbf => (head & 0x1f) as usize,
            0xd9 => {
                self.ensure(1)?;
                self.reader.u8() as usize
            }
            0xda => {
                self.ensure(2)?;
                self.reader.u16() as usize
            }
            0xdb => {
                self.ensure(4)?;
                self.reader.u32() as usize
            }
            _ => return Err(MsgPackError::NotStr(at)),
        };
        Ok((len, self.reader.x))
    }

    pub fn read_arr_hdr(&mut self) -> Result<usize, MsgPackError> {
        self.ensure(1)?;
        let at = self.reader.x;
        let head = self.reader.u8();
        match head {
            0x90..=0x9f => Ok((head & 0x0f) as usize),
            0xdc => {
                self.ensure(2)?;
                Ok(self.reader.u16() as usize)
            }
            0xdd => {
                self.ensure(4)?;
                Ok(self.reader.u32() as usize)
            }
            _ => Err(MsgPackError::NotArr(at)),
        }
    }

    pub fn read_obj_hdr(&mut self) -> Result<usize, MsgPackError> {
        self.ensure(1)?;
        let at = self.reader.x;
        let head = self.reader.u8();
        match head {
            0x80..=0x8f => Ok((head & 0x0f) as usize),
            0xde => {
                self.ensure(2)?;
                Ok(self.reader.u16() as usize)
            }
            0xdf => {
                self.ensure(4)?;
                Ok(self.reader.u32() as usize)
            }
            _ => Err(MsgPackError::NotObj(at)),
        }
    }

    /// Advances the cursor past exactly one complete value without
    /// materializing it.
    pub fn skip_any(&mut self) -> Result<(), MsgPackError> {
        self.read_any(0).map(|_| ())
    }

    /// Reads an object header, then scans entries until `key` matches,
    /// leaving the cursor positioned at the start of its value. Entries that
    /// don't match are skipped (key and value) without allocating.
    pub fn find_key(&mut self, key: &str) -> Result<(), MsgPackError> {
        let len = self.read_obj_hdr()?;
        for _ in 0..len {
            let (str_len, body_at) = self.read_str_hdr()?;
            self.ensure(str_len)?;
            let candidate = self.reader.buf(str_len);
            if candidate == key.as_bytes() {
                return Ok(());
            }
            let _ = body_at;
            self.skip_any()?;
        }
        Err(MsgPackError::KeyNotFound)
    }

    /// Reads an array header, then advances to the value at `index`.
    pub fn find_index(&mut self, index: usize) -> Result<(), MsgPackError> {
        let len = self.read_arr_hdr()?;
        if index >= len {
            return Err(MsgPackError::IndexOutOfBounds);
        }
        for _ in 0..index {
            self.skip_any()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msgpack::encoder::MsgPackEncoder;

    #[test]
    fn fixint_and_string_match_seed_bytes() {
        let value = PackValue::Object(vec![("a".into(), PackValue::UInt(1))]);
        let mut enc = MsgPackEncoder::new();
        let bytes = enc.encode(&value);
        assert_eq!(bytes, vec![0x81, 0xA1, 0x61, 0x01]);
        let mut dec = MsgPackDecoder::new(&bytes);
        assert_eq!(dec.decode().unwrap(), value);
    }

    #[test]
    fn find_key_lands_on_value() {
        let value = PackValue::Object(vec![
            ("a".into(), PackValue::Int(1)),
            ("b".into(), PackValue::Array(vec![PackValue::Int(10), PackValue::Int(20)])),
        ]);
        let bytes = MsgPackEncoder::new().encode(&value);
        let mut dec = MsgPackDecoder::new(&bytes);
        dec.find_key("b").unwrap();
        dec.find_index(1).unwrap();
        assert_eq!(dec.read_any(0).unwrap(), PackValue::Int(20));
    }

    #[test]
    fn unexpected_end_reports_offset() {
        let mut dec = MsgPackDecoder::new(&[0xcd, 0x01]);
        assert_eq!(dec.decode(), Err(MsgPackError::UnexpectedEnd(1)));
    }
}
