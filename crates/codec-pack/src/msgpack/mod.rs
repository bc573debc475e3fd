//! MessagePack codec: encoder, decoder, and shallow-read navigation.

mod decoder;
mod encoder;
mod error;

pub use decoder::MsgPackDecoder;
pub use encoder::MsgPackEncoder;
pub use error::MsgPackError;

use crate::PackValue;

/// Encodes a value to a MessagePack byte buffer.
pub fn encode(value: &PackValue) -> Vec<u8> {
    MsgPackEncoder::new().encode(value)
}

/// Decodes a MessagePack byte buffer into a value.
pub fn decode(data: &[u8]) -> Result<PackValue, MsgPackError> {
    MsgPackDecoder::new(data).decode()
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn any_i64_round_trips_through_its_narrowest_head(n: i64) {
            let value = PackValue::Int(n);
            let decoded = decode(&encode(&value)).unwrap();
            prop_assert_eq!(decoded, value);
        }

        #[test]
        fn any_object_of_small_ints_round_trips(keys in prop::collection::vec("[a-z]{1,6}", 0..8), ns in prop::collection::vec(any::<i32>(), 0..8)) {
            let n = keys.len().min(ns.len());
            let value = PackValue::Object(
                keys.into_iter().zip(ns.into_iter()).take(n).map(|(k, v)| (k, PackValue::Int(v as i64))).collect(),
            );
            let decoded = decode(&encode(&value)).unwrap();
            prop_assert_eq!(decoded, value);
        }
    }
}
