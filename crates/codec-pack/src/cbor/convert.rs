//! Conversions between [`PackValue`] and `serde_json::Value`.
//!
//! CBOR can represent strictly more than JSON (bytes, bignums, tags, typed
//! arrays); converting those down to JSON is lossy and documented per arm.

use serde_json::{Map, Number, Value as JsonValue};

use crate::PackValue;

/// Converts a `serde_json::Value` into a [`PackValue`].
pub fn json_to_cbor(v: &JsonValue) -> PackValue {
    match v {
        JsonValue::Null => PackValue::Null,
        JsonValue::Bool(b) => PackValue::Bool(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                PackValue::Int(i)
            } else if let Some(u) = n.as_u64() {
                PackValue::UInt(u)
            } else {
                PackValue::Float64(n.as_f64().unwrap_or(0.0))
            }
        }
        JsonValue::String(s) => PackValue::Str(s.clone()),
        JsonValue::Array(arr) => PackValue::Array(arr.iter().map(json_to_cbor).collect()),
        JsonValue::Object(obj) => {
            PackValue::Object(obj.iter().map(|(k, v)| (k.clone(), json_to_cbor(v))).collect())
        }
    }
}

/// Converts a [`PackValue`] into a `serde_json::Value`. Bytes become a base64
/// string, bignums become a JSON number (lossy beyond `f64` precision), and
/// extensions/typed arrays unwrap to their inner payload.
pub fn cbor_to_json(v: &PackValue) -> JsonValue {
    match v {
        PackValue::Null => JsonValue::Null,
        PackValue::Bool(b) => JsonValue::Bool(*b),
        PackValue::Int(i) => JsonValue::Number((*i).into()),
        PackValue::UInt(u) => JsonValue::Number((*u).into()),
        PackValue::BigInt(i) => Number::from_f64(*i as f64).map(JsonValue::Number).unwrap_or(JsonValue::Null),
        PackValue::Float32(f) => {
            Number::from_f64(*f as f64).map(JsonValue::Number).unwrap_or(JsonValue::Null)
        }
        PackValue::Float64(f) => Number::from_f64(*f).map(JsonValue::Number).unwrap_or(JsonValue::Null),
        PackValue::Bytes(b) => JsonValue::String(bytepack_base64::to_base64(b)),
        PackValue::Str(s) => JsonValue::String(s.clone()),
        PackValue::Array(arr) => JsonValue::Array(arr.iter().map(cbor_to_json).collect()),
        PackValue::Object(pairs) => {
            let mut map = Map::new();
            for (k, v) in pairs {
                map.insert(k.clone(), cbor_to_json(v));
            }
            JsonValue::Object(map)
        }
        PackValue::Map(pairs) => {
            let mut map = Map::new();
            for (k, v) in pairs {
                let key = k.as_str().map(str::to_string).unwrap_or_else(|| cbor_to_json(k).to_string());
                map.insert(key, cbor_to_json(v));
            }
            JsonValue::Object(map)
        }
        PackValue::Extension(ext) => cbor_to_json(&ext.val),
        PackValue::Raw(raw) => JsonValue::String(bytepack_base64::to_base64(&raw.val)),
        PackValue::TypedArray(_) => cbor_to_json(&typed_array_to_pack_array(v)),
    }
}

pub fn cbor_to_json_owned(v: PackValue) -> JsonValue {
    cbor_to_json(&v)
}

fn typed_array_to_pack_array(v: &PackValue) -> PackValue {
    use crate::TypedArray;
    let PackValue::TypedArray(arr) = v else {
        return PackValue::Null;
    };
    let items = match arr {
        TypedArray::Int8(xs) => xs.iter().map(|&n| PackValue::Int(n as i64)).collect(),
        TypedArray::Int16(xs) => xs.iter().map(|&n| PackValue::Int(n as i64)).collect(),
        TypedArray::Int32(xs) => xs.iter().map(|&n| PackValue::Int(n as i64)).collect(),
        TypedArray::Int64(xs) => xs.iter().map(|&n| PackValue::Int(n)).collect(),
        TypedArray::Uint8(xs) => xs.iter().map(|&n| PackValue::UInt(n as u64)).collect(),
        TypedArray::Uint16(xs) => xs.iter().map(|&n| PackValue::UInt(n as u64)).collect(),
        TypedArray::Uint32(xs) => xs.iter().map(|&n| PackValue::UInt(n as u64)).collect(),
        TypedArray::Uint64(xs) => xs.iter().map(|&n| PackValue::UInt(n)).collect(),
        TypedArray::Float32(xs) => xs.iter().map(|&n| PackValue::Float32(n)).collect(),
        TypedArray::Float64(xs) => xs.iter().map(|&n| PackValue::Float64(n)).collect(),
    };
    PackValue::Array(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_scalars_through_json() {
        let original = serde_json::json!({"a": 1, "b": [true, null, "x"]});
        let pack = json_to_cbor(&original);
        let back = cbor_to_json(&pack);
        assert_eq!(back, original);
    }

    #[test]
    fn bytes_become_base64_string() {
        let pack = PackValue::Bytes(vec![1, 2, 3]);
        assert_eq!(cbor_to_json(&pack), JsonValue::String(bytepack_base64::to_base64(&[1, 2, 3])));
    }
}
