//! `CborEncoderStable` — canonical CBOR with lexicographically sorted keys.
//!
//! Produces byte-identical output for any permutation of an `Object`'s
//! entries, which is what makes the format usable as a hash/signature input.

use bytepack_buffers::Writer;

use crate::cbor::encoder_fast::CborEncoderFast;
use crate::PackValue;

pub struct CborEncoderStable {
    inner: CborEncoderFast,
}

impl Default for CborEncoderStable {
    fn default() -> Self {
        Self::new()
    }
}

impl CborEncoderStable {
    pub fn new() -> Self {
        Self {
            inner: CborEncoderFast::new(),
        }
    }

    pub fn encode(&mut self, value: &PackValue) -> Vec<u8> {
        self.inner.writer.reset();
        self.write_any(value);
        self.inner.writer.flush()
    }

    pub fn write_any(&mut self, value: &PackValue) {
        match value {
            PackValue::Array(arr) => {
                self.inner.write_arr_hdr(arr.len());
                for item in arr {
                    self.write_any(item);
                }
            }
            PackValue::Object(pairs) => self.write_obj_sorted(pairs),
            PackValue::Map(pairs) => self.write_map_sorted(pairs),
            PackValue::Extension(ext) => {
                self.inner.write_tag_hdr(ext.tag);
                self.write_any(&ext.val);
            }
            other => self.inner.write_any(other),
        }
    }

    fn write_obj_sorted(&mut self, pairs: &[(String, PackValue)]) {
        let mut sorted: Vec<&(String, PackValue)> = pairs.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        self.inner.write_obj_hdr(sorted.len());
        for (key, value) in sorted {
            self.inner.write_str(key);
            self.write_any(value);
        }
    }

    fn write_map_sorted(&mut self, pairs: &[(PackValue, PackValue)]) {
        // Map keys are arbitrary values; sort by their fast-encoded bytes so
        // the ordering is well-defined without assuming string keys.
        let mut encoded: Vec<(Vec<u8>, &PackValue, &PackValue)> = pairs
            .iter()
            .map(|(k, v)| {
                let mut tmp = CborEncoderFast::new();
                (tmp.encode(k), k, v)
            })
            .collect();
        encoded.sort_by(|a, b| a.0.cmp(&b.0));
        self.inner.write_obj_hdr(encoded.len());
        for (key_bytes, _, value) in encoded {
            self.inner.writer.buf(&key_bytes);
            self.write_any(value);
        }
    }

    pub fn writer(&mut self) -> &mut Writer {
        &mut self.inner.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_keys_regardless_of_insertion_order() {
        let a = PackValue::Object(vec![
            ("b".into(), PackValue::Int(1)),
            ("a".into(), PackValue::Int(2)),
        ]);
        let b = PackValue::Object(vec![
            ("a".into(), PackValue::Int(2)),
            ("b".into(), PackValue::Int(1)),
        ]);
        let mut enc = CborEncoderStable::new();
        assert_eq!(enc.encode(&a), enc.encode(&b));
    }
}
