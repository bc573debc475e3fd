//! DAG-JSON encoder: [`super::JsonEncoderStable`] plus rejection of values
//! JSON cannot round-trip through IPLD's data model (NaN, ±infinity).

use crate::PackValue;

use super::encoder_stable::JsonEncoderStable;
use super::error::JsonError;

pub struct JsonEncoderDag {
    inner: JsonEncoderStable,
}

impl Default for JsonEncoderDag {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonEncoderDag {
    pub fn new() -> Self {
        Self {
            inner: JsonEncoderStable::new(),
        }
    }

    pub fn encode(&mut self, value: &PackValue) -> Result<Vec<u8>, JsonError> {
        check_finite(value, 0)?;
        Ok(self.inner.encode(value))
    }
}

fn check_finite(value: &PackValue, at: usize) -> Result<(), JsonError> {
    match value {
        PackValue::Float32(f) if !f.is_finite() => Err(JsonError::Invalid(at)),
        PackValue::Float64(f) if !f.is_finite() => Err(JsonError::Invalid(at)),
        PackValue::Array(arr) => arr.iter().try_for_each(|v| check_finite(v, at)),
        PackValue::Object(pairs) => pairs.iter().try_for_each(|(_, v)| check_finite(v, at)),
        PackValue::Map(pairs) => pairs.iter().try_for_each(|(_, v)| check_finite(v, at)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nan_anywhere_in_the_tree() {
        let value = PackValue::Array(vec![PackValue::Float64(f64::NAN)]);
        assert!(JsonEncoderDag::new().encode(&value).is_err());
    }

    #[test]
    fn accepts_finite_values() {
        let value = PackValue::Object(vec![("a".into(), PackValue::Float64(1.5))]);
        assert!(JsonEncoderDag::new().encode(&value).is_ok());
    }
}
