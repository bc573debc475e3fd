//! MongoDB Extended JSON reader: parses generic JSON text with the tolerant
//! JSON decoder, then rewrites `$number*`/`$oid`/`$date`/... wrapper
//! objects into their native value-model representation.

use crate::{JsonPackExtension, PackValue};

use super::error::EjsonDecodeError;
use super::types::ext_tag;

pub struct EjsonDecoder<'a> {
    data: &'a [u8],
}

impl<'a> EjsonDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn decode(self) -> Result<PackValue, EjsonDecodeError> {
        let raw = crate::json::decode(self.data).map_err(|_| EjsonDecodeError::InvalidJson(0))?;
        rewrite(raw)
    }
}

pub fn decode(data: &[u8]) -> Result<PackValue, EjsonDecodeError> {
    EjsonDecoder::new(data).decode()
}

fn rewrite(value: PackValue) -> Result<PackValue, EjsonDecodeError> {
    match value {
        PackValue::Array(items) => {
            Ok(PackValue::Array(items.into_iter().map(rewrite).collect::<Result<_, _>>()?))
        }
        PackValue::Object(fields) => rewrite_object(fields),
        other => Ok(other),
    }
}

fn single_field<'a>(fields: &'a [(String, PackValue)], key: &str) -> Option<&'a PackValue> {
    if fields.len() == 1 && fields[0].0 == key {
        Some(&fields[0].1)
    } else {
        None
    }
}

fn str_field(value: &PackValue) -> Option<&str> {
    value.as_str()
}

fn rewrite_object(fields: Vec<(String, PackValue)>) -> Result<PackValue, EjsonDecodeError> {
    if let Some(v) = single_field(&fields, "$numberInt") {
        let s = str_field(v).ok_or(EjsonDecodeError::InvalidInt32)?;
        let n: i32 = s.parse().map_err(|_| EjsonDecodeError::InvalidInt32)?;
        return Ok(PackValue::Int(n as i64));
    }
    if let Some(v) = single_field(&fields, "$numberLong") {
        let s = str_field(v).ok_or(EjsonDecodeError::InvalidInt64)?;
        let n: i64 = s.parse().map_err(|_| EjsonDecodeError::InvalidInt64)?;
        return Ok(PackValue::Int(n));
    }
    if let Some(v) = single_field(&fields, "$numberDouble") {
        let s = str_field(v).ok_or(EjsonDecodeError::InvalidDouble)?;
        let n = match s {
            "Infinity" => f64::INFINITY,
            "-Infinity" => f64::NEG_INFINITY,
            "NaN" => f64::NAN,
            other => other.parse().map_err(|_| EjsonDecodeError::InvalidDouble)?,
        };
        return Ok(PackValue::Float64(n));
    }
    if let Some(v) = single_field(&fields, "$numberDecimal") {
        let s = str_field(v).ok_or(EjsonDecodeError::InvalidDecimal128)?;
        if let Ok(n) = s.parse::<i128>() {
            return Ok(PackValue::BigInt(n));
        }
        return Ok(PackValue::Extension(Box::new(JsonPackExtension::new(
            ext_tag::DECIMAL128,
            PackValue::Str(s.to_string()),
        ))));
    }
    if let Some(v) = single_field(&fields, "$oid") {
        if str_field(v).is_none() {
            return Err(EjsonDecodeError::InvalidObjectId);
        }
        return Ok(PackValue::Extension(Box::new(JsonPackExtension::new(ext_tag::OID, v.clone()))));
    }
    if let Some(v) = single_field(&fields, "$uuid") {
        if str_field(v).is_none() {
            return Err(EjsonDecodeError::InvalidUuid);
        }
        return Ok(PackValue::Extension(Box::new(JsonPackExtension::new(ext_tag::UUID, v.clone()))));
    }
    if let Some(v) = single_field(&fields, "$symbol") {
        if str_field(v).is_none() {
            return Err(EjsonDecodeError::InvalidSymbol);
        }
        return Ok(PackValue::Extension(Box::new(JsonPackExtension::new(ext_tag::SYMBOL, v.clone()))));
    }
    if let Some(v) = single_field(&fields, "$code") {
        if str_field(v).is_none() {
            return Err(EjsonDecodeError::InvalidCode);
        }
        return Ok(PackValue::Extension(Box::new(JsonPackExtension::new(ext_tag::CODE, v.clone()))));
    }
    if fields.len() == 2 && fields.iter().any(|(k, _)| k == "$code") && fields.iter().any(|(k, _)| k == "$scope") {
        let code = fields.iter().find(|(k, _)| k == "$code").unwrap().1.clone();
        let scope = fields.iter().find(|(k, _)| k == "$scope").unwrap().1.clone();
        return Ok(PackValue::Extension(Box::new(JsonPackExtension::new(
            ext_tag::CODE_WITH_SCOPE,
            PackValue::Array(vec![code, scope]),
        ))));
    }
    if let Some(v) = single_field(&fields, "$date") {
        let ms = match v {
            PackValue::Object(inner) => match single_field(inner, "$numberLong") {
                Some(PackValue::Str(s)) => s.parse::<f64>().map_err(|_| EjsonDecodeError::InvalidDate)?,
                _ => return Err(EjsonDecodeError::InvalidDate),
            },
            other => other.as_f64().ok_or(EjsonDecodeError::InvalidDate)?,
        };
        return Ok(PackValue::Extension(Box::new(JsonPackExtension::new(ext_tag::DATE, PackValue::Float64(ms)))));
    }
    if let Some(v) = single_field(&fields, "$minKey") {
        if v.as_i64() != Some(1) {
            return Err(EjsonDecodeError::InvalidMinKey);
        }
        return Ok(PackValue::Extension(Box::new(JsonPackExtension::new(ext_tag::MIN_KEY, PackValue::Null))));
    }
    if let Some(v) = single_field(&fields, "$maxKey") {
        if v.as_i64() != Some(1) {
            return Err(EjsonDecodeError::InvalidMaxKey);
        }
        return Ok(PackValue::Extension(Box::new(JsonPackExtension::new(ext_tag::MAX_KEY, PackValue::Null))));
    }
    if let Some(v) = single_field(&fields, "$undefined") {
        if v.as_bool() != Some(true) {
            return Err(EjsonDecodeError::InvalidUndefined);
        }
        return Ok(PackValue::Extension(Box::new(JsonPackExtension::new(ext_tag::UNDEFINED, PackValue::Null))));
    }
    if let Some(v) = single_field(&fields, "$regularExpression") {
        let PackValue::Object(inner) = v else {
            return Err(EjsonDecodeError::InvalidRegularExpression);
        };
        let pattern = inner.iter().find(|(k, _)| k == "pattern").map(|(_, v)| v);
        let options = inner.iter().find(|(k, _)| k == "options").map(|(_, v)| v);
        let (Some(PackValue::Str(pattern)), Some(PackValue::Str(options))) = (pattern, options) else {
            return Err(EjsonDecodeError::InvalidRegularExpression);
        };
        if inner.len() != 2 {
            return Err(EjsonDecodeError::ExtraKeys("$regularExpression"));
        }
        return Ok(PackValue::Extension(Box::new(JsonPackExtension::new(
            ext_tag::REGEX,
            PackValue::Array(vec![PackValue::Str(pattern.clone()), PackValue::Str(options.clone())]),
        ))));
    }
    if let Some(v) = single_field(&fields, "$timestamp") {
        return Ok(PackValue::Extension(Box::new(JsonPackExtension::new(ext_tag::TIMESTAMP, v.clone()))));
    }
    if let Some(v) = single_field(&fields, "$dbPointer") {
        return Ok(PackValue::Extension(Box::new(JsonPackExtension::new(ext_tag::DB_POINTER, v.clone()))));
    }
    if let Some(v) = single_field(&fields, "$binary") {
        let PackValue::Object(inner) = v else {
            return Err(EjsonDecodeError::InvalidBinary);
        };
        let base64 = inner.iter().find(|(k, _)| k == "base64").map(|(_, v)| v);
        let Some(PackValue::Str(b64)) = base64 else {
            return Err(EjsonDecodeError::InvalidBinary);
        };
        let bytes = bytepack_base64::from_base64(b64).map_err(|_| EjsonDecodeError::InvalidBinary)?;
        return Ok(PackValue::Bytes(bytes));
    }

    let mut out = Vec::with_capacity(fields.len());
    for (k, v) in fields {
        out.push((k, rewrite(v)?));
    }
    Ok(PackValue::Object(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wrapped_int32() {
        assert_eq!(decode(b"{\"$numberInt\":\"42\"}").unwrap(), PackValue::Int(42));
    }

    #[test]
    fn decodes_wrapped_double_infinity() {
        assert_eq!(decode(b"{\"$numberDouble\":\"Infinity\"}").unwrap(), PackValue::Float64(f64::INFINITY));
    }

    #[test]
    fn decodes_min_key() {
        let value = decode(b"{\"$minKey\":1}").unwrap();
        assert!(matches!(value, PackValue::Extension(ref e) if e.tag == ext_tag::MIN_KEY));
    }

    #[test]
    fn rejects_malformed_min_key() {
        assert_eq!(decode(b"{\"$minKey\":2}").unwrap_err(), EjsonDecodeError::InvalidMinKey);
    }

    #[test]
    fn leaves_plain_objects_untouched() {
        assert_eq!(
            decode(b"{\"a\":1}").unwrap(),
            PackValue::Object(vec![("a".to_string(), PackValue::Int(1))])
        );
    }
}
