//! Aggregate codec holder.

use super::{CborJsonValueCodec, JsonJsonValueCodec, MsgPackJsonValueCodec, SmileJsonValueCodec};

pub struct Codecs {
    pub cbor: CborJsonValueCodec,
    pub msgpack: MsgPackJsonValueCodec,
    pub json: JsonJsonValueCodec,
    pub smile: SmileJsonValueCodec,
}

impl Default for Codecs {
    fn default() -> Self {
        Self::new()
    }
}

impl Codecs {
    pub fn new() -> Self {
        Self {
            cbor: CborJsonValueCodec::new(),
            msgpack: MsgPackJsonValueCodec::new(),
            json: JsonJsonValueCodec::new(),
            smile: SmileJsonValueCodec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PackValue;

    #[test]
    fn every_member_round_trips_the_same_value() {
        let codecs = Codecs::new();
        let value = PackValue::Object(vec![("a".to_string(), PackValue::Int(1))]);

        assert_eq!(codecs.cbor.decode(&codecs.cbor.encode(&value).unwrap()).unwrap(), value);
        assert_eq!(codecs.msgpack.decode(&codecs.msgpack.encode(&value).unwrap()).unwrap(), value);
        assert_eq!(codecs.json.decode(&codecs.json.encode(&value).unwrap()).unwrap(), value);
        assert_eq!(codecs.smile.decode(&codecs.smile.encode(&value).unwrap()).unwrap(), value);
    }
}
