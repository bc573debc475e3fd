//! `CborEncoder` — the full-featured encoder.
//!
//! Because [`PackValue`] already carries explicit `Map`/`Extension`/
//! `TypedArray`/`BigInt` variants, full dispatch and the fast path converge
//! on the same routines; `CborEncoder` is [`CborEncoderFast`] under its full
//! name for call sites that want the "complete feature set" framing.

pub use crate::cbor::encoder_fast::CborEncoderFast as CborEncoder;
