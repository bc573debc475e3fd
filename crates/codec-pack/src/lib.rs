//! A universal value model with MessagePack, CBOR, Smile, and JSON codecs,
//! plus boundary-compatibility codecs for BSON, Bencode, UBJSON, RESP,
//! Extended JSON, Ion, Avro, FlexBuffers, and CSON.
//!
//! # Overview
//!
//! [`PackValue`] is the value every codec encodes from and decodes into.
//! Each format module exposes an `Encoder`/`Decoder` pair plus free
//! `encode`/`decode` functions; [`codecs::Codecs`] aggregates CBOR,
//! MessagePack, JSON, and Smile behind one [`codecs::JsonValueCodec`] trait
//! for callers that pick a format at runtime. [`path`] navigates directly
//! into a MessagePack or CBOR buffer without decoding the whole thing.
//!
//! # Example
//!
//! ```
//! use bytepack::{cbor, msgpack, PackValue};
//!
//! let value = PackValue::Object(vec![("a".into(), PackValue::UInt(1))]);
//! assert_eq!(msgpack::encode(&value), vec![0x81, 0xA1, 0x61, 0x01]);
//! assert_eq!(cbor::decode(&cbor::encode(&value)).unwrap(), value);
//! ```

mod constants;
mod json_pack_extension;
mod json_pack_mpint;
mod json_pack_value;
mod pack_value;

pub mod avro;
pub mod bencode;
pub mod bson;
pub mod cbor;
pub mod codecs;
pub mod cson;
pub mod ejson;
pub mod flexbuffers;
pub mod ion;
pub mod json;
pub mod json_binary;
pub mod msgpack;
pub mod path;
pub mod resp;
pub mod smile;
pub mod ubjson;

pub use constants::EncodingFormat;
pub use json_pack_extension::JsonPackExtension;
pub use json_pack_mpint::JsonPackMpint;
pub use json_pack_value::JsonPackValue;
pub use pack_value::{PackValue, TypedArray};
