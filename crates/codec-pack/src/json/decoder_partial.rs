//! Partial/streaming JSON decoder.
//!
//! Identical grammar to [`super::JsonDecoder`], but end-of-input or a
//! malformed element inside a container returns the prefix assembled so far
//! instead of propagating an error. `__proto__` rejection stays fatal.

use super::decoder::JsonDecoder;
use super::error::JsonError;
use crate::PackValue;

pub struct JsonDecoderPartial<'a> {
    inner: JsonDecoder<'a>,
}

impl<'a> JsonDecoderPartial<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        let mut inner = JsonDecoder::new(data);
        inner.partial = true;
        Self { inner }
    }

    pub fn decode(&mut self) -> Result<PackValue, JsonError> {
        self.inner.decode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_unterminated_array() {
        let value = JsonDecoderPartial::new(b"[1, 2, 3").decode().unwrap();
        assert_eq!(
            value,
            PackValue::Array(vec![PackValue::Int(1), PackValue::Int(2), PackValue::Int(3)])
        );
    }

    #[test]
    fn drops_trailing_incomplete_entry() {
        let value = JsonDecoderPartial::new(br#"{"a":1,"b":"#).decode().unwrap();
        assert_eq!(value, PackValue::Object(vec![("a".into(), PackValue::Int(1))]));
    }

    #[test]
    fn proto_key_is_still_fatal_in_partial_mode() {
        let result = JsonDecoderPartial::new(br#"{"__proto__":1}"#).decode();
        assert!(matches!(result, Err(JsonError::InvalidKey(_))));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::PackValue;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn truncated_int_array_recovers_a_strict_prefix(ns in prop::collection::vec(0i32..1000, 1..12)) {
            let full = format!("[{}]", ns.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(","));
            for cut in 1..full.len() {
                let result = JsonDecoderPartial::new(full[..cut].as_bytes()).decode();
                let PackValue::Array(items) = result.unwrap() else {
                    panic!("partial decode of a truncated array must still yield an array");
                };
                prop_assert!(items.len() <= ns.len());
                for (item, n) in items.iter().zip(ns.iter()) {
                    prop_assert_eq!(item, &PackValue::Int(*n as i64));
                }
            }
        }
    }
}
