//! `CborEncoderDag` — DAG-CBOR profile.
//!
//! Canonical form on top of [`CborEncoderStable`]'s key sorting: map keys
//! order by encoded-length then lexicographically (RFC 8949 §4.2.3), floats
//! are always written as float64 with `-0.0` normalized to `0.0`, and NaN /
//! ±infinity are rejected rather than silently encoded.

use crate::cbor::encoder_fast::CborEncoderFast;
use crate::cbor::error::CborError;
use crate::PackValue;

pub struct CborEncoderDag {
    inner: CborEncoderFast,
}

impl Default for CborEncoderDag {
    fn default() -> Self {
        Self::new()
    }
}

impl CborEncoderDag {
    pub fn new() -> Self {
        Self {
            inner: CborEncoderFast::new(),
        }
    }

    pub fn encode(&mut self, value: &PackValue) -> Result<Vec<u8>, CborError> {
        self.inner.writer.reset();
        self.write_any(value)?;
        Ok(self.inner.writer.flush())
    }

    pub fn write_any(&mut self, value: &PackValue) -> Result<(), CborError> {
        match value {
            PackValue::Float32(f) => self.write_canonical_float(*f as f64),
            PackValue::Float64(f) => self.write_canonical_float(*f),
            PackValue::Array(arr) => {
                self.inner.write_arr_hdr(arr.len());
                for item in arr {
                    self.write_any(item)?;
                }
                Ok(())
            }
            PackValue::Object(pairs) => self.write_obj_canonical(pairs),
            PackValue::Extension(ext) => {
                self.inner.write_tag_hdr(ext.tag);
                self.write_any(&ext.val)
            }
            other => {
                self.inner.write_any(other);
                Ok(())
            }
        }
    }

    fn write_canonical_float(&mut self, f: f64) -> Result<(), CborError> {
        if f.is_nan() || f.is_infinite() {
            return Err(CborError::Unsupported);
        }
        let normalized = if f == 0.0 { 0.0 } else { f };
        self.inner.write_float64(normalized);
        Ok(())
    }

    fn write_obj_canonical(&mut self, pairs: &[(String, PackValue)]) -> Result<(), CborError> {
        let mut sorted: Vec<&(String, PackValue)> = pairs.iter().collect();
        sorted.sort_by(|a, b| {
            let a_len = a.0.len();
            let b_len = b.0.len();
            a_len.cmp(&b_len).then_with(|| a.0.cmp(&b.0))
        });
        self.inner.write_obj_hdr(sorted.len());
        for (key, value) in sorted {
            self.inner.write_str(key);
            self.write_any(value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nan_and_infinity() {
        let mut enc = CborEncoderDag::new();
        assert!(enc.encode(&PackValue::Float64(f64::NAN)).is_err());
        assert!(enc.encode(&PackValue::Float64(f64::INFINITY)).is_err());
    }

    #[test]
    fn normalizes_negative_zero() {
        let mut enc = CborEncoderDag::new();
        let neg_zero = enc.encode(&PackValue::Float64(-0.0)).unwrap();
        let pos_zero = enc.encode(&PackValue::Float64(0.0)).unwrap();
        assert_eq!(neg_zero, pos_zero);
    }

    #[test]
    fn orders_keys_by_length_then_lexicographically() {
        let a = PackValue::Object(vec![
            ("bb".into(), PackValue::Int(1)),
            ("a".into(), PackValue::Int(2)),
        ]);
        let mut enc = CborEncoderDag::new();
        let bytes = enc.encode(&a).unwrap();
        let mut dec_a = super::super::decoder::CborDecoder::new(&bytes);
        let decoded = dec_a.decode().unwrap();
        assert_eq!(
            decoded,
            PackValue::Object(vec![
                ("a".into(), PackValue::Int(2)),
                ("bb".into(), PackValue::Int(1)),
            ])
        );
    }
}
