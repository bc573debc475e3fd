//! Bencode encoder. Dictionary keys are sorted by byte value, as required
//! by the format's canonical form.

use crate::{PackValue, TypedArray};

pub struct BencodeEncoder {
    out: Vec<u8>,
}

impl Default for BencodeEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BencodeEncoder {
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    pub fn encode(&mut self, value: &PackValue) -> Vec<u8> {
        self.out.clear();
        self.write_any(value);
        std::mem::take(&mut self.out)
    }

    fn write_any(&mut self, value: &PackValue) {
        match value {
            PackValue::Null => self.write_bytes(b""),
            PackValue::Bool(b) => self.write_int(if *b { 1 } else { 0 }),
            PackValue::Int(i) => self.write_int(*i),
            PackValue::UInt(u) => self.write_int(*u as i64),
            PackValue::BigInt(i) => self.write_int(*i as i64),
            PackValue::Float32(f) => self.write_bytes(f.to_string().as_bytes()),
            PackValue::Float64(f) => self.write_bytes(f.to_string().as_bytes()),
            PackValue::Bytes(b) => self.write_bytes(b),
            PackValue::Str(s) => self.write_bytes(s.as_bytes()),
            PackValue::Array(arr) => {
                self.out.push(b'l');
                for item in arr {
                    self.write_any(item);
                }
                self.out.push(b'e');
            }
            PackValue::Object(pairs) => {
                let mut sorted: Vec<_> = pairs.iter().collect();
                sorted.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
                self.out.push(b'd');
                for (key, val) in sorted {
                    self.write_bytes(key.as_bytes());
                    self.write_any(val);
                }
                self.out.push(b'e');
            }
            PackValue::Map(pairs) => {
                let mut entries: Vec<(String, &PackValue)> = pairs
                    .iter()
                    .map(|(k, v)| (map_key_string(k), v))
                    .collect();
                entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
                self.out.push(b'd');
                for (key, val) in entries {
                    self.write_bytes(key.as_bytes());
                    self.write_any(val);
                }
                self.out.push(b'e');
            }
            PackValue::Extension(ext) => self.write_any(&ext.val),
            PackValue::Raw(raw) => self.write_bytes(&raw.val),
            PackValue::TypedArray(arr) => self.write_typed_array(arr),
        }
    }

    fn write_int(&mut self, i: i64) {
        self.out.push(b'i');
        self.out.extend(i.to_string().as_bytes());
        self.out.push(b'e');
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.out.extend(bytes.len().to_string().as_bytes());
        self.out.push(b':');
        self.out.extend_from_slice(bytes);
    }

    fn write_typed_array(&mut self, arr: &TypedArray) {
        self.out.push(b'l');
        macro_rules! emit {
            ($xs:expr) => {
                for x in $xs {
                    self.write_int(*x as i64);
                }
            };
        }
        match arr {
            TypedArray::Int8(xs) => emit!(xs),
            TypedArray::Int16(xs) => emit!(xs),
            TypedArray::Int32(xs) => emit!(xs),
            TypedArray::Int64(xs) => emit!(xs),
            TypedArray::Uint8(xs) => emit!(xs),
            TypedArray::Uint16(xs) => emit!(xs),
            TypedArray::Uint32(xs) => emit!(xs),
            TypedArray::Uint64(xs) => emit!(xs),
            TypedArray::Float32(xs) => {
                for x in xs {
                    self.write_bytes(x.to_string().as_bytes());
                }
            }
            TypedArray::Float64(xs) => {
                for x in xs {
                    self.write_bytes(x.to_string().as_bytes());
                }
            }
        }
        self.out.push(b'e');
    }
}

fn map_key_string(key: &PackValue) -> String {
    match key {
        PackValue::Str(s) => s.clone(),
        PackValue::Int(i) => i.to_string(),
        PackValue::UInt(u) => u.to_string(),
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_scalars() {
        assert_eq!(BencodeEncoder::new().encode(&PackValue::Int(42)), b"i42e");
        assert_eq!(
            BencodeEncoder::new().encode(&PackValue::Str("spam".to_string())),
            b"4:spam"
        );
    }

    #[test]
    fn sorts_dictionary_keys() {
        let value = PackValue::Object(vec![
            ("spam".to_string(), PackValue::Str("eggs".to_string())),
            ("cow".to_string(), PackValue::Str("moo".to_string())),
        ]);
        assert_eq!(BencodeEncoder::new().encode(&value), b"d3:cow3:moo4:spam4:eggse");
    }
}
