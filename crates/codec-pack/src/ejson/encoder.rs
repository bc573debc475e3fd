//! MongoDB Extended JSON writer. Canonical mode wraps every number so the
//! exact BSON type survives a text round trip; relaxed mode favors plain
//! JSON numbers where that is unambiguous.

use std::fmt::Write as _;

use crate::{JsonPackExtension, PackValue, TypedArray};

use super::error::EjsonEncodeError;
use super::types::{ext_tag, EjsonEncoderOptions};

pub struct EjsonEncoder {
    out: String,
    options: EjsonEncoderOptions,
}

impl Default for EjsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl EjsonEncoder {
    pub fn new() -> Self {
        Self::with_options(EjsonEncoderOptions::default())
    }

    pub fn with_options(options: EjsonEncoderOptions) -> Self {
        Self { out: String::new(), options }
    }

    pub fn encode_to_string(&mut self, value: &PackValue) -> Result<String, EjsonEncodeError> {
        self.out.clear();
        self.write_value(value)?;
        Ok(std::mem::take(&mut self.out))
    }

    fn write_value(&mut self, value: &PackValue) -> Result<(), EjsonEncodeError> {
        match value {
            PackValue::Null => self.out.push_str("null"),
            PackValue::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            PackValue::Int(i) => self.write_int(*i),
            PackValue::UInt(u) => self.write_int_wrapped(&u.to_string(), *u <= i32::MAX as u64),
            PackValue::BigInt(i) => self.write_bigint(*i),
            PackValue::Float32(f) => self.write_double(*f as f64),
            PackValue::Float64(f) => self.write_double(*f),
            PackValue::Bytes(b) => self.write_binary(b, 0),
            PackValue::Str(s) => self.write_string(s),
            PackValue::Array(items) => self.write_array(items)?,
            PackValue::Object(fields) => self.write_object(fields)?,
            PackValue::Map(entries) => {
                let fields: Vec<(String, PackValue)> = entries
                    .iter()
                    .map(|(k, v)| {
                        let key = k.as_str().map(str::to_string).unwrap_or_else(|| format!("{:?}", k));
                        (key, v.clone())
                    })
                    .collect();
                self.write_object(&fields)?;
            }
            PackValue::Extension(ext) => self.write_extension(ext)?,
            PackValue::Raw(raw) => self.write_binary(&raw.val, 0),
            PackValue::TypedArray(arr) => self.write_array(&typed_array_items(arr))?,
        }
        Ok(())
    }

    fn write_int(&mut self, value: i64) {
        let fits_i32 = value >= i32::MIN as i64 && value <= i32::MAX as i64;
        self.write_int_wrapped(&value.to_string(), fits_i32);
    }

    fn write_int_wrapped(&mut self, digits: &str, fits_i32: bool) {
        if !self.options.canonical && fits_i32 {
            self.out.push_str(digits);
            return;
        }
        let key = if fits_i32 { "$numberInt" } else { "$numberLong" };
        let _ = write!(self.out, "{{\"{key}\":");
        self.write_string(digits);
        self.out.push('}');
    }

    fn write_bigint(&mut self, value: i128) {
        if value >= i64::MIN as i128 && value <= i64::MAX as i128 {
            self.write_int_wrapped(&value.to_string(), false);
            return;
        }
        let _ = write!(self.out, "{{\"$numberDecimal\":");
        self.write_string(&value.to_string());
        self.out.push('}');
    }

    fn write_double(&mut self, value: f64) {
        let digits = if value.is_nan() {
            "NaN".to_string()
        } else if value.is_infinite() {
            if value > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
        } else {
            format_double(value)
        };
        if !self.options.canonical && value.is_finite() {
            self.out.push_str(&digits);
            return;
        }
        self.out.push_str("{\"$numberDouble\":");
        self.write_string(&digits);
        self.out.push('}');
    }

    fn write_binary(&mut self, bytes: &[u8], sub_type: u8) {
        self.out.push_str("{\"$binary\":{\"base64\":");
        self.write_string(&bytepack_base64::to_base64(bytes));
        let _ = write!(self.out, ",\"subType\":\"{sub_type:02x}\"}}}}");
    }

    fn write_array(&mut self, items: &[PackValue]) -> Result<(), EjsonEncodeError> {
        self.out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.write_value(item)?;
        }
        self.out.push(']');
        Ok(())
    }

    fn write_object(&mut self, fields: &[(String, PackValue)]) -> Result<(), EjsonEncodeError> {
        self.out.push('{');
        for (i, (k, v)) in fields.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.write_string(k);
            self.out.push(':');
            self.write_value(v)?;
        }
        self.out.push('}');
        Ok(())
    }

    fn write_extension(&mut self, ext: &JsonPackExtension) -> Result<(), EjsonEncodeError> {
        match ext.tag {
            ext_tag::OID => {
                self.out.push_str("{\"$oid\":");
                self.write_value(&ext.val)?;
                self.out.push('}');
            }
            ext_tag::DATE => {
                if let PackValue::Float64(ms) = &*ext.val {
                    if ms.is_nan() {
                        return Err(EjsonEncodeError::InvalidDate);
                    }
                }
                self.out.push_str("{\"$date\":");
                self.write_value(&ext.val)?;
                self.out.push('}');
            }
            ext_tag::REGEX => {
                if let PackValue::Array(parts) = &*ext.val {
                    if let [PackValue::Str(pattern), PackValue::Str(options)] = parts.as_slice() {
                        self.out.push_str("{\"$regularExpression\":{\"pattern\":");
                        self.write_string(pattern);
                        self.out.push_str(",\"options\":");
                        self.write_string(options);
                        self.out.push_str("}}");
                        return Ok(());
                    }
                }
                self.out.push_str("{\"$regularExpression\":");
                self.write_value(&ext.val)?;
                self.out.push('}');
            }
            ext_tag::MIN_KEY => self.out.push_str("{\"$minKey\":1}"),
            ext_tag::MAX_KEY => self.out.push_str("{\"$maxKey\":1}"),
            ext_tag::UNDEFINED => self.out.push_str("{\"$undefined\":true}"),
            ext_tag::SYMBOL => {
                self.out.push_str("{\"$symbol\":");
                self.write_value(&ext.val)?;
                self.out.push('}');
            }
            ext_tag::CODE => {
                self.out.push_str("{\"$code\":");
                self.write_value(&ext.val)?;
                self.out.push('}');
            }
            ext_tag::CODE_WITH_SCOPE => {
                if let PackValue::Array(parts) = &*ext.val {
                    if let [code, scope] = parts.as_slice() {
                        self.out.push_str("{\"$code\":");
                        self.write_value(code)?;
                        self.out.push_str(",\"$scope\":");
                        self.write_value(scope)?;
                        self.out.push('}');
                        return Ok(());
                    }
                }
                self.write_value(&ext.val)?;
            }
            ext_tag::TIMESTAMP => {
                self.out.push_str("{\"$timestamp\":");
                self.write_value(&ext.val)?;
                self.out.push('}');
            }
            ext_tag::DB_POINTER => {
                self.out.push_str("{\"$dbPointer\":");
                self.write_value(&ext.val)?;
                self.out.push('}');
            }
            ext_tag::DECIMAL128 => {
                self.out.push_str("{\"$numberDecimal\":");
                self.write_value(&ext.val)?;
                self.out.push('}');
            }
            ext_tag::UUID => {
                self.out.push_str("{\"$uuid\":");
                self.write_value(&ext.val)?;
                self.out.push('}');
            }
            _ => self.write_value(&ext.val)?,
        }
        Ok(())
    }

    fn write_string(&mut self, s: &str) {
        self.out.push('"');
        for c in s.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\t' => self.out.push_str("\\t"),
                '\r' => self.out.push_str("\\r"),
                c if (c as u32) < 0x20 => {
                    let _ = write!(self.out, "\\u{:04x}", c as u32);
                }
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }
}

fn format_double(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn typed_array_items(arr: &TypedArray) -> Vec<PackValue> {
    match arr {
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
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_int32_canonically() {
        let mut enc = EjsonEncoder::new();
        assert_eq!(enc.encode_to_string(&PackValue::Int(42)).unwrap(), "{\"$numberInt\":\"42\"}");
    }

    #[test]
    fn wraps_int64_when_out_of_i32_range() {
        let mut enc = EjsonEncoder::new();
        assert_eq!(
            enc.encode_to_string(&PackValue::Int(2_147_483_648)).unwrap(),
            "{\"$numberLong\":\"2147483648\"}"
        );
    }

    #[test]
    fn wraps_double_with_special_values() {
        let mut enc = EjsonEncoder::new();
        assert_eq!(
            enc.encode_to_string(&PackValue::Float64(f64::INFINITY)).unwrap(),
            "{\"$numberDouble\":\"Infinity\"}"
        );
    }

    #[test]
    fn relaxed_mode_writes_plain_small_ints() {
        let mut enc = EjsonEncoder::with_options(EjsonEncoderOptions { canonical: false });
        assert_eq!(enc.encode_to_string(&PackValue::Int(3)).unwrap(), "3");
    }
}
