//! Combined value codecs behind one `JsonValueCodec` trait, for callers
//! that pick a wire format at runtime rather than at compile time.

mod cbor;
mod json;
mod msgpack;
mod registry;
mod smile;
mod types;

pub use cbor::CborJsonValueCodec;
pub use json::JsonJsonValueCodec;
pub use msgpack::MsgPackJsonValueCodec;
pub use registry::Codecs;
pub use smile::SmileJsonValueCodec;
pub use types::{CodecError, JsonValueCodec};
