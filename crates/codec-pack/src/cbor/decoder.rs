//! CBOR decoder: full recursive decode plus shallow-read navigation.

use bytepack_buffers::Reader;

use super::constants::*;
use super::error::CborError;
use crate::{JsonPackExtension, JsonPackMpint, JsonPackValue, PackValue};

const DEFAULT_MAX_DEPTH: usize = 1024;

/// `None` length means the container used CBOR's indefinite-length form
/// (minor 31), terminated by a standalone `0xff` break.
type Len = Option<usize>;

pub struct CborDecoder<'a> {
    pub reader: Reader<'a>,
    max_depth: usize,
}

impl<'a> CborDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(data),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    fn ensure(&self, n: usize) -> Result<(), CborError> {
        if self.reader.x + n > self.reader.size() {
            return Err(CborError::UnexpectedEnd(self.reader.x));
        }
        Ok(())
    }

    pub fn decode(&mut self) -> Result<PackValue, CborError> {
        self.read_any(0)
    }

    /// Reads a head byte and splits it into `(major, minor)`.
    fn read_head(&mut self) -> Result<(u8, u8), CborError> {
        self.ensure(1)?;
        let byte = self.reader.u8();
        Ok((byte >> 5, byte & MINOR_MASK))
    }

    /// Resolves an argument minor to a length: `0..=23` literal, `24/25/26/27`
    /// read 1/2/4/8 extra bytes, `31` is indefinite (`None`).
    fn read_minor_len(&mut self, minor: u8) -> Result<Len, CborError> {
        match minor {
            0..=23 => Ok(Some(minor as usize)),
            24 => {
                self.ensure(1)?;
                Ok(Some(self.reader.u8() as usize))
            }
            25 => {
                self.ensure(2)?;
                Ok(Some(self.reader.u16() as usize))
            }
            26 => {
                self.ensure(4)?;
                Ok(Some(self.reader.u32() as usize))
            }
            27 => {
                self.ensure(8)?;
                Ok(Some(self.reader.u64() as usize))
            }
            31 => Ok(None),
            _ => Err(CborError::UnexpectedMinor(minor, self.reader.x)),
        }
    }

    /// Same as [`Self::read_minor_len`] but returns the raw `u64` value
    /// (used for integers, where minor 31 is not a valid argument form).
    fn read_minor_u64(&mut self, minor: u8) -> Result<u64, CborError> {
        match minor {
            0..=23 => Ok(minor as u64),
            24 => {
                self.ensure(1)?;
                Ok(self.reader.u8() as u64)
            }
            25 => {
                self.ensure(2)?;
                Ok(self.reader.u16() as u64)
            }
            26 => {
                self.ensure(4)?;
                Ok(self.reader.u32() as u64)
            }
            27 => {
                self.ensure(8)?;
                Ok(self.reader.u64())
            }
            _ => Err(CborError::UnexpectedMinor(minor, self.reader.x)),
        }
    }

    pub fn read_any(&mut self, depth: usize) -> Result<PackValue, CborError> {
        if depth > self.max_depth {
            return Err(CborError::InvalidPayload(self.reader.x));
        }
        let at = self.reader.x;
        let (major, minor) = self.read_head()?;
        match major {
            MAJOR_UIN => Ok(PackValue::UInt(self.read_minor_u64(minor)?)),
            MAJOR_NIN => {
                let n = self.read_minor_u64(minor)?;
                Ok(PackValue::Int(-1i64 - n as i64))
            }
            MAJOR_BIN => self.read_bin(minor),
            MAJOR_STR => self.read_str(minor, at),
            MAJOR_ARR => self.read_arr(minor, depth),
            MAJOR_MAP => self.read_map_or_obj(minor, depth, at),
            MAJOR_TAG => self.read_tag(minor, depth),
            MAJOR_TKN => self.read_token(minor, at),
            _ => Err(CborError::UnexpectedMajor(major, at)),
        }
    }

    fn read_bin(&mut self, minor: u8) -> Result<PackValue, CborError> {
        match self.read_minor_len(minor)? {
            Some(len) => {
                self.ensure(len)?;
                Ok(PackValue::Bytes(self.reader.buf(len).to_vec()))
            }
            None => {
                let mut out = Vec::new();
                loop {
                    let chunk_at = self.reader.x;
                    self.ensure(1)?;
                    if self.reader.uint8[self.reader.x] == CBOR_END {
                        self.reader.u8();
                        break;
                    }
                    let (chunk_major, chunk_minor) = self.read_head()?;
                    if chunk_major != MAJOR_BIN {
                        return Err(CborError::UnexpectedBinChunkMajor(chunk_major, chunk_at));
                    }
                    let len = self
                        .read_minor_len(chunk_minor)?
                        .ok_or(CborError::UnexpectedBinChunkMinor(chunk_at))?;
                    self.ensure(len)?;
                    out.extend_from_slice(self.reader.buf(len));
                }
                Ok(PackValue::Bytes(out))
            }
        }
    }

    fn read_str(&mut self, minor: u8, at: usize) -> Result<PackValue, CborError> {
        match self.read_minor_len(minor)? {
            Some(len) => {
                self.ensure(len)?;
                let bytes = self.reader.buf(len);
                let s = std::str::from_utf8(bytes).map_err(|_| CborError::InvalidUtf8(at))?;
                Ok(PackValue::Str(s.to_string()))
            }
            None => {
                let mut out = String::new();
                loop {
                    let chunk_at = self.reader.x;
                    self.ensure(1)?;
                    if self.reader.uint8[self.reader.x] == CBOR_END {
                        self.reader.u8();
                        break;
                    }
                    let (chunk_major, chunk_minor) = self.read_head()?;
                    if chunk_major != MAJOR_STR {
                        return Err(CborError::UnexpectedStrChunkMajor(chunk_major, chunk_at));
                    }
                    let len = self
                        .read_minor_len(chunk_minor)?
                        .ok_or(CborError::UnexpectedStrChunkMinor(chunk_at))?;
                    self.ensure(len)?;
                    let bytes = self.reader.buf(len);
                    out.push_str(
                        std::str::from_utf8(bytes).map_err(|_| CborError::InvalidUtf8(chunk_at))?,
                    );
                }
                Ok(PackValue::Str(out))
            }
        }
    }

    fn read_arr(&mut self, minor: u8, depth: usize) -> Result<PackValue, CborError> {
        match self.read_minor_len(minor)? {
            Some(len) => {
                let mut items = Vec::with_capacity(len.min(1024));
                for _ in 0..len {
                    items.push(self.read_any(depth + 1)?);
                }
                Ok(PackValue::Array(items))
            }
            None => {
                let mut items = Vec::new();
                loop {
                    self.ensure(1)?;
                    if self.reader.uint8[self.reader.x] == CBOR_END {
                        self.reader.u8();
                        break;
                    }
                    items.push(self.read_any(depth + 1)?);
                }
                Ok(PackValue::Array(items))
            }
        }
    }

    fn read_map_or_obj(&mut self, minor: u8, depth: usize, at: usize) -> Result<PackValue, CborError> {
        let entries = self.read_map_entries(minor, depth)?;
        if entries.iter().all(|(k, _)| matches!(k, PackValue::Str(_))) {
            let pairs = entries
                .into_iter()
                .map(|(k, v)| match k {
                    PackValue::Str(s) => (s, v),
                    _ => unreachable!(),
                })
                .collect();
            Ok(PackValue::Object(pairs))
        } else {
            let _ = at;
            Ok(PackValue::Map(entries))
        }
    }

    fn read_map_entries(
        &mut self,
        minor: u8,
        depth: usize,
    ) -> Result<Vec<(PackValue, PackValue)>, CborError> {
        match self.read_minor_len(minor)? {
            Some(len) => {
                let mut pairs = Vec::with_capacity(len.min(1024));
                for _ in 0..len {
                    let key = self.read_any(depth + 1)?;
                    let value = self.read_any(depth + 1)?;
                    pairs.push((key, value));
                }
                Ok(pairs)
            }
            None => {
                let mut pairs = Vec::new();
                loop {
                    self.ensure(1)?;
                    if self.reader.uint8[self.reader.x] == CBOR_END {
                        self.reader.u8();
                        break;
                    }
                    let key = self.read_any(depth + 1)?;
                    let value = self.read_any(depth + 1)?;
                    pairs.push((key, value));
                }
                Ok(pairs)
            }
        }
    }

    fn read_tag(&mut self, minor: u8, depth: usize) -> Result<PackValue, CborError> {
        let tag = self.read_minor_u64(minor)?;
        match tag {
            TAG_BIGNUM_POSITIVE | TAG_BIGNUM_NEGATIVE => {
                let at = self.reader.x;
                let inner = self.read_any(depth + 1)?;
                let bytes = match inner {
                    PackValue::Bytes(b) => b,
                    _ => return Err(CborError::InvalidPayload(at)),
                };
                let mpint = JsonPackMpint::from_magnitude(&bytes, tag == TAG_BIGNUM_NEGATIVE);
                Ok(PackValue::BigInt(mpint.to_i128()))
            }
            typed_array_tag::UINT8
            | typed_array_tag::UINT8_CLAMPED
            | typed_array_tag::SINT8
            | typed_array_tag::UINT16_LE
            | typed_array_tag::SINT16_LE
            | typed_array_tag::UINT32_LE
            | typed_array_tag::SINT32_LE
            | typed_array_tag::UINT64_LE
            | typed_array_tag::SINT64_LE
            | typed_array_tag::FLOAT32_LE
            | typed_array_tag::FLOAT64_LE => self.read_typed_array(tag, depth),
            _ => {
                let val = self.read_any(depth + 1)?;
                Ok(PackValue::Extension(Box::new(JsonPackExtension::new(
                    tag, val,
                ))))
            }
        }
    }

    fn read_typed_array(&mut self, tag: u64, depth: usize) -> Result<PackValue, CborError> {
        use crate::TypedArray;
        let at = self.reader.x;
        let inner = self.read_any(depth + 1)?;
        let bytes = match inner {
            PackValue::Bytes(b) => b,
            _ => return Err(CborError::InvalidPayload(at)),
        };
        let arr = match tag {
            typed_array_tag::UINT8 | typed_array_tag::UINT8_CLAMPED => TypedArray::Uint8(bytes),
            typed_array_tag::SINT8 => {
                TypedArray::Int8(bytes.into_iter().map(|b| b as i8).collect())
            }
            typed_array_tag::UINT16_LE => TypedArray::Uint16(
                bytes
                    .chunks_exact(2)
                    .map(|c| u16::from_le_bytes([c[0], c[1]]))
                    .collect(),
            ),
            typed_array_tag::SINT16_LE => TypedArray::Int16(
                bytes
                    .chunks_exact(2)
                    .map(|c| i16::from_le_bytes([c[0], c[1]]))
                    .collect(),
            ),
            typed_array_tag::UINT32_LE => TypedArray::Uint32(
                bytes
                    .chunks_exact(4)
                    .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                    .collect(),
            ),
            typed_array_tag::SINT32_LE => TypedArray::Int32(
                bytes
                    .chunks_exact(4)
                    .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                    .collect(),
            ),
            typed_array_tag::UINT64_LE => TypedArray::Uint64(
                bytes
                    .chunks_exact(8)
                    .map(|c| u64::from_le_bytes(c.try_into().unwrap()))
                    .collect(),
            ),
            typed_array_tag::SINT64_LE => TypedArray::Int64(
                bytes
                    .chunks_exact(8)
                    .map(|c| i64::from_le_bytes(c.try_into().unwrap()))
                    .collect(),
            ),
            typed_array_tag::FLOAT32_LE => TypedArray::Float32(
                bytes
                    .chunks_exact(4)
                    .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                    .collect(),
            ),
            typed_array_tag::FLOAT64_LE => TypedArray::Float64(
                bytes
                    .chunks_exact(8)
                    .map(|c| f64::from_le_bytes(c.try_into().unwrap()))
                    .collect(),
            ),
            _ => unreachable!("dispatched only for known typed-array tags"),
        };
        Ok(PackValue::TypedArray(arr))
    }

    fn read_token(&mut self, minor: u8, at: usize) -> Result<PackValue, CborError> {
        match minor {
            20 => Ok(PackValue::Bool(false)),
            21 => Ok(PackValue::Bool(true)),
            22 => Ok(PackValue::Null),
            23 => Ok(PackValue::Null), // undefined, collapsed into Null
            24 => {
                self.ensure(1)?;
                Ok(PackValue::Raw(JsonPackValue::new(vec![self.reader.u8()])))
            }
            25 => {
                self.ensure(2)?;
                let bits = self.reader.u16();
                Ok(PackValue::Float64(decode_f16(bits)))
            }
            26 => {
                self.ensure(4)?;
                Ok(PackValue::Float32(self.reader.f32()))
            }
            27 => {
                self.ensure(8)?;
                Ok(PackValue::Float64(self.reader.f64()))
            }
            _ => Err(CborError::UnexpectedMinor(minor, at)),
        }
    }

    // ---- Shallow navigation ----

    pub fn read_str_hdr(&mut self) -> Result<Len, CborError> {
        let (major, minor) = self.read_head()?;
        if major != MAJOR_STR {
            return Err(CborError::UnexpectedStrMajor(self.reader.x));
        }
        self.read_minor_len(minor)
    }

    pub fn read_arr_hdr(&mut self) -> Result<Len, CborError> {
        let at = self.reader.x;
        let (major, minor) = self.read_head()?;
        if major != MAJOR_ARR {
            return Err(CborError::UnexpectedMajor(major, at));
        }
        self.read_minor_len(minor)
    }

    pub fn read_obj_hdr(&mut self) -> Result<Len, CborError> {
        let at = self.reader.x;
        let (major, minor) = self.read_head()?;
        if major != MAJOR_MAP {
            return Err(CborError::UnexpectedMajor(major, at));
        }
        self.read_minor_len(minor)
    }

    /// Advances past exactly one complete value without allocating containers.
    pub fn skip_any(&mut self) -> Result<(), CborError> {
        let at = self.reader.x;
        let (major, minor) = self.read_head()?;
        match major {
            MAJOR_UIN | MAJOR_NIN => {
                self.read_minor_u64(minor)?;
            }
            MAJOR_BIN | MAJOR_STR => match self.read_minor_len(minor)? {
                Some(len) => {
                    self.ensure(len)?;
                    self.reader.skip(len);
                }
                None => loop {
                    self.ensure(1)?;
                    if self.reader.uint8[self.reader.x] == CBOR_END {
                        self.reader.u8();
                        break;
                    }
                    self.skip_any()?;
                },
            },
            MAJOR_ARR => match self.read_minor_len(minor)? {
                Some(len) => {
                    for _ in 0..len {
                        self.skip_any()?;
                    }
                }
                None => loop {
                    self.ensure(1)?;
                    if self.reader.uint8[self.reader.x] == CBOR_END {
                        self.reader.u8();
                        break;
                    }
                    self.skip_any()?;
                },
            },
            MAJOR_MAP => match self.read_minor_len(minor)? {
                Some(len) => {
                    for _ in 0..len {
                        self.skip_any()?;
                        self.skip_any()?;
                    }
                }
                None => loop {
                    self.ensure(1)?;
                    if self.reader.uint8[self.reader.x] == CBOR_END {
                        self.reader.u8();
                        break;
                    }
                    self.skip_any()?;
                    self.skip_any()?;
                },
            },
            MAJOR_TAG => {
                self.read_minor_u64(minor)?;
                self.skip_any()?;
            }
            MAJOR_TKN => match minor {
                20..=23 => {}
                24 => {
                    self.ensure(1)?;
                    self.reader.skip(1);
                }
                25 => {
                    self.ensure(2)?;
                    self.reader.skip(2);
                }
                26 => {
                    self.ensure(4)?;
                    self.reader.skip(4);
                }
                27 => {
                    self.ensure(8)?;
                    self.reader.skip(8);
                }
                _ => return Err(CborError::UnexpectedMinor(minor, at)),
            },
            _ => return Err(CborError::UnexpectedMajor(major, at)),
        }
        Ok(())
    }

    /// Reads an object header, then scans entries until `key` matches,
    /// leaving the cursor at the start of its value.
    pub fn find_key(&mut self, key: &str) -> Result<(), CborError> {
        let at = self.reader.x;
        let len = self
            .read_obj_hdr()?
            .ok_or(CborError::InvalidSize(at))?;
        for _ in 0..len {
            let key_at = self.reader.x;
            let key_len = self
                .read_str_hdr()?
                .ok_or(CborError::UnexpectedObjKey(key_at))?;
            self.ensure(key_len)?;
            let candidate = self.reader.buf(key_len);
            if candidate == key.as_bytes() {
                return Ok(());
            }
            self.skip_any()?;
        }
        Err(CborError::KeyNotFound)
    }

    pub fn find_index(&mut self, index: usize) -> Result<(), CborError> {
        let at = self.reader.x;
        let len = self
            .read_arr_hdr()?
            .ok_or(CborError::InvalidSize(at))?;
        if index >= len {
            return Err(CborError::IndexOutOfBounds);
        }
        for _ in 0..index {
            self.skip_any()?;
        }
        Ok(())
    }

    /// Confirms that exactly one complete value spans `offset..offset+size`.
    pub fn validate(&mut self, offset: usize, size: usize) -> Result<(), CborError> {
        self.reader.x = offset;
        self.skip_any()?;
        if self.reader.x != offset + size {
            return Err(CborError::InvalidSize(offset));
        }
        Ok(())
    }
}

/// IEEE 754 half-precision to double, used for CBOR's float16 minor (25).
fn decode_f16(bits: u16) -> f64 {
    bytepack_buffers::decode_f16(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cbor::encoder_fast::CborEncoderFast;

    #[test]
    fn indefinite_length_array_decodes() {
        let bytes = [0x9F, 0x01, 0x02, 0x03, 0xFF];
        let mut dec = CborDecoder::new(&bytes);
        let value = dec.decode().unwrap();
        assert_eq!(
            value,
            PackValue::Array(vec![PackValue::UInt(1), PackValue::UInt(2), PackValue::UInt(3)])
        );
    }

    #[test]
    fn find_key_then_index_lands_on_leaf() {
        let value = PackValue::Object(vec![(
            "a".into(),
            PackValue::Object(vec![(
                "b".into(),
                PackValue::Array(vec![PackValue::UInt(10), PackValue::UInt(20), PackValue::UInt(30)]),
            )]),
        )]);
        let bytes = CborEncoderFast::new().encode(&value);
        let mut dec = CborDecoder::new(&bytes);
        dec.find_key("a").unwrap();
        dec.find_key("b").unwrap();
        dec.find_index(1).unwrap();
        assert_eq!(dec.read_any(0).unwrap(), PackValue::UInt(20));
    }

    #[test]
    fn stable_encoder_canonicalizes_key_order() {
        use crate::cbor::encoder_stable::CborEncoderStable;
        let a = PackValue::Object(vec![
            ("b".into(), PackValue::Int(1)),
            ("a".into(), PackValue::Int(2)),
        ]);
        let b = PackValue::Object(vec![
            ("a".into(), PackValue::Int(2)),
            ("b".into(), PackValue::Int(1)),
        ]);
        assert_eq!(
            CborEncoderStable::new().encode(&a),
            CborEncoderStable::new().encode(&b)
        );
    }
}
