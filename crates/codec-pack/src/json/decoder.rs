//! Strict JSON decoder: whitespace-skipping recursive descent over UTF-8 bytes.
//!
//! Supports RFC 8259 plus signed-exponent scientific notation and the
//! binary-round-trip string convention (see [`crate::json_binary`]).

use super::error::JsonError;
use super::util::{find_ending_quote, is_number_char, skip_whitespace};
use crate::PackValue;

const DEFAULT_MAX_DEPTH: usize = 1024;
const DEFAULT_BINARY_PREFIX: &str = "data:application/octet-stream;base64,";

pub struct JsonDecoder<'a> {
    data: &'a [u8],
    x: usize,
    pub(super) partial: bool,
    allow_proto_key: bool,
    binary_prefix: String,
    max_depth: usize,
}

impl<'a> JsonDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            x: 0,
            partial: false,
            allow_proto_key: false,
            binary_prefix: DEFAULT_BINARY_PREFIX.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn allow_proto_key(mut self, allow: bool) -> Self {
        self.allow_proto_key = allow;
        self
    }

    pub fn binary_prefix(mut self, prefix: &str) -> Self {
        self.binary_prefix = prefix.to_string();
        self
    }

    pub fn decode(&mut self) -> Result<PackValue, JsonError> {
        self.x = skip_whitespace(self.data, self.x);
        let value = self.parse_value(0)?;
        Ok(value)
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.x).copied()
    }

    fn at_end(&self) -> bool {
        self.x >= self.data.len()
    }

    fn parse_value(&mut self, depth: usize) -> Result<PackValue, JsonError> {
        if depth > self.max_depth {
            return Err(JsonError::DepthExceeded(self.x));
        }
        self.x = skip_whitespace(self.data, self.x);
        match self.peek() {
            None => Err(JsonError::Invalid(self.x)),
            Some(b'"') => self.parse_string_value(),
            Some(b'{') => self.parse_object(depth),
            Some(b'[') => self.parse_array(depth),
            Some(b't') => self.parse_literal("true", PackValue::Bool(true)),
            Some(b'f') => self.parse_literal("false", PackValue::Bool(false)),
            Some(b'n') => self.parse_literal("null", PackValue::Null),
            Some(b'-') | Some(b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(JsonError::Invalid(self.x)),
        }
    }

    fn parse_literal(&mut self, lit: &str, value: PackValue) -> Result<PackValue, JsonError> {
        let end = self.x + lit.len();
        if end > self.data.len() || &self.data[self.x..end] != lit.as_bytes() {
            return Err(JsonError::Invalid(self.x));
        }
        self.x = end;
        Ok(value)
    }

    fn parse_number(&mut self) -> Result<PackValue, JsonError> {
        let start = self.x;
        if self.peek() == Some(b'-') {
            self.x += 1;
        }
        let mut is_float = false;
        while let Some(b) = self.peek() {
            if !is_number_char(b) {
                break;
            }
            if matches!(b, b'.' | b'e' | b'E') {
                is_float = true;
            }
            self.x += 1;
        }
        let text = std::str::from_utf8(&self.data[start..self.x])
            .map_err(|_| JsonError::InvalidUtf8(start))?;
        if text.is_empty() || text == "-" {
            return Err(JsonError::Invalid(start));
        }
        if is_float {
            let f = text.parse::<f64>().map_err(|_| JsonError::Invalid(start))?;
            Ok(PackValue::Float64(f))
        } else if let Ok(i) = text.parse::<i64>() {
            Ok(PackValue::Int(i))
        } else if let Ok(u) = text.parse::<u64>() {
            Ok(PackValue::UInt(u))
        } else {
            let f = text.parse::<f64>().map_err(|_| JsonError::Invalid(start))?;
            Ok(PackValue::Float64(f))
        }
    }

    /// Reads the raw (unescaped) content of a string literal, consuming the
    /// surrounding quotes.
    fn parse_string_raw(&mut self) -> Result<String, JsonError> {
        if self.peek() != Some(b'"') {
            return Err(JsonError::Invalid(self.x));
        }
        let content_start = self.x + 1;
        let end = find_ending_quote(self.data, content_start)?;
        let raw = &self.data[content_start..end];
        let s = unescape(raw).map_err(|_| JsonError::InvalidUtf8(content_start))?;
        self.x = end + 1;
        Ok(s)
    }

    fn parse_string_value(&mut self) -> Result<PackValue, JsonError> {
        let s = self.parse_string_raw()?;
        if let Some(encoded) = s.strip_prefix(self.binary_prefix.as_str()) {
            if let Ok(bytes) = bytepack_base64::from_base64(encoded) {
                return Ok(PackValue::Bytes(bytes));
            }
        }
        Ok(PackValue::Str(s))
    }

    fn parse_array(&mut self, depth: usize) -> Result<PackValue, JsonError> {
        self.x += 1;
        let mut items = Vec::new();
        loop {
            self.x = skip_whitespace(self.data, self.x);
            match self.peek() {
                Some(b']') => {
                    self.x += 1;
                    break;
                }
                Some(b',') => {
                    self.x += 1;
                    continue;
                }
                None => {
                    if self.partial {
                        break;
                    }
                    return Err(JsonError::Invalid(self.x));
                }
                _ => {}
            }
            match self.parse_value(depth + 1) {
                Ok(v) => items.push(v),
                Err(e) => {
                    if self.partial {
                        break;
                    }
                    return Err(e);
                }
            }
            self.x = skip_whitespace(self.data, self.x);
            match self.peek() {
                Some(b',') => self.x += 1,
                Some(b']') => {
                    self.x += 1;
                    break;
                }
                _ => {
                    if self.partial {
                        break;
                    }
                    return Err(JsonError::Invalid(self.x));
                }
            }
        }
        Ok(PackValue::Array(items))
    }

    fn parse_object(&mut self, depth: usize) -> Result<PackValue, JsonError> {
        self.x += 1;
        let mut pairs = Vec::new();
        loop {
            self.x = skip_whitespace(self.data, self.x);
            match self.peek() {
                Some(b'}') => {
                    self.x += 1;
                    break;
                }
                Some(b',') => {
                    self.x += 1;
                    continue;
                }
                None => {
                    if self.partial {
                        break;
                    }
                    return Err(JsonError::Invalid(self.x));
                }
                Some(b'"') => {}
                _ => {
                    if self.partial {
                        break;
                    }
                    return Err(JsonError::Invalid(self.x));
                }
            }
            let key_start = self.x;
            let key = match self.parse_string_raw() {
                Ok(k) => k,
                Err(e) => {
                    if self.partial {
                        break;
                    }
                    return Err(e);
                }
            };
            if key == "__proto__" && !self.allow_proto_key {
                return Err(JsonError::InvalidKey(key_start));
            }
            self.x = skip_whitespace(self.data, self.x);
            if self.peek() != Some(b':') {
                if self.partial {
                    break;
                }
                return Err(JsonError::Invalid(self.x));
            }
            self.x += 1;
            self.x = skip_whitespace(self.data, self.x);
            match self.parse_value(depth + 1) {
                Ok(v) => pairs.push((key, v)),
                Err(e) => {
                    if self.partial {
                        break;
                    }
                    return Err(e);
                }
            }
            self.x = skip_whitespace(self.data, self.x);
            match self.peek() {
                Some(b',') => self.x += 1,
                Some(b'}') => {
                    self.x += 1;
                    break;
                }
                _ => {
                    if self.partial {
                        break;
                    }
                    return Err(JsonError::Invalid(self.x));
                }
            }
        }
        Ok(PackValue::Object(pairs))
    }
}

fn unescape(raw: &[u8]) -> Result<String, std::str::Utf8Error> {
    if !raw.contains(&b'\\') {
        return std::str::from_utf8(raw).map(str::to_string);
    }
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'\\' && i + 1 < raw.len() {
            match raw[i + 1] {
                b'"' => out.push('"'),
                b'\\' => out.push('\\'),
                b'/' => out.push('/'),
                b'n' => out.push('\n'),
                b't' => out.push('\t'),
                b'r' => out.push('\r'),
                b'b' => out.push('\u{8}'),
                b'f' => out.push('\u{c}'),
                b'u' if i + 6 <= raw.len() => {
                    let hex = std::str::from_utf8(&raw[i + 2..i + 6]).unwrap_or("0000");
                    if let Ok(code) = u32::from_str_radix(hex, 16) {
                        if let Some(c) = char::from_u32(code) {
                            out.push(c);
                        }
                    }
                    i += 4;
                }
                other => out.push(other as char),
            }
            i += 2;
        } else {
            let start = i;
            while i < raw.len() && raw[i] != b'\\' {
                i += 1;
            }
            out.push_str(std::str::from_utf8(&raw[start..i])?);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_object_with_scientific_notation() {
        let value = JsonDecoder::new(br#"{"a": 1.5e+10}"#).decode().unwrap();
        assert_eq!(
            value,
            PackValue::Object(vec![("a".into(), PackValue::Float64(1.5e10))])
        );
    }

    #[test]
    fn rejects_proto_key() {
        let result = JsonDecoder::new(br#"{"__proto__": 1}"#).decode();
        assert!(matches!(result, Err(JsonError::InvalidKey(_))));
    }

    #[test]
    fn binary_prefixed_string_decodes_to_bytes() {
        let encoded = bytepack_base64::to_base64(&[1, 2, 3]);
        let input = format!(r#""data:application/octet-stream;base64,{}""#, encoded);
        let value = JsonDecoder::new(input.as_bytes()).decode().unwrap();
        assert_eq!(value, PackValue::Bytes(vec![1, 2, 3]));
    }
}
