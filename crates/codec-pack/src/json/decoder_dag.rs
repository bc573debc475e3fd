//! DAG-JSON decoder.
//!
//! The grammar is identical to strict JSON; canonicalization is an encoder
//! concern ([`super::JsonEncoderDag`]), so this is a thin strict-mode wrapper
//! kept as its own type for symmetry with the CBOR DAG profile.

use super::decoder::JsonDecoder;
use super::error::JsonError;
use crate::PackValue;

pub struct JsonDecoderDag<'a> {
    inner: JsonDecoder<'a>,
}

impl<'a> JsonDecoderDag<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            inner: JsonDecoder::new(data),
        }
    }

    pub fn decode(&mut self) -> Result<PackValue, JsonError> {
        self.inner.decode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_like_strict_json() {
        let value = JsonDecoderDag::new(br#"{"a":[1,2]}"#).decode().unwrap();
        assert_eq!(
            value,
            PackValue::Object(vec![(
                "a".into(),
                PackValue::Array(vec![PackValue::Int(1), PackValue::Int(2)])
            )])
        );
    }
}
