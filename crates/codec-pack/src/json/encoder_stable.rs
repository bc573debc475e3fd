//! Stable JSON encoder: sorts object keys by Unicode code-point order before
//! writing, so encoding a value twice (or any permutation of it) produces
//! byte-identical output.

use crate::PackValue;

use super::encoder::JsonEncoder;

pub struct JsonEncoderStable {
    inner: JsonEncoder,
}

impl Default for JsonEncoderStable {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonEncoderStable {
    pub fn new() -> Self {
        Self {
            inner: JsonEncoder::new(),
        }
    }

    pub fn encode(&mut self, value: &PackValue) -> Vec<u8> {
        self.inner.encode(&sort_keys(value))
    }
}

fn sort_keys(value: &PackValue) -> PackValue {
    match value {
        PackValue::Object(pairs) => {
            let mut sorted: Vec<(String, PackValue)> =
                pairs.iter().map(|(k, v)| (k.clone(), sort_keys(v))).collect();
            sorted.sort_by(|a, b| a.0.cmp(&b.0));
            PackValue::Object(sorted)
        }
        PackValue::Array(arr) => PackValue::Array(arr.iter().map(sort_keys).collect()),
        PackValue::Map(pairs) => {
            PackValue::Map(pairs.iter().map(|(k, v)| (k.clone(), sort_keys(v))).collect())
        }
        other => other.clone(),
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
        assert_eq!(JsonEncoderStable::new().encode(&a), JsonEncoderStable::new().encode(&b));
    }

    #[test]
    fn encoding_twice_is_idempotent() {
        let value = PackValue::Object(vec![
            ("z".into(), PackValue::Int(1)),
            ("a".into(), PackValue::Array(vec![PackValue::Int(1)])),
        ]);
        let mut enc = JsonEncoderStable::new();
        assert_eq!(enc.encode(&value), enc.encode(&value));
    }
}
