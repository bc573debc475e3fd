//! CSON decoder: a JSON superset permitting `#` comments, trailing
//! commas, single- or double-quoted strings, and unquoted object keys.

use crate::PackValue;

use super::error::CsonError;
use super::util::{find_ending_quote, is_bare_key_char, is_number_char, skip_trivia};

const DEFAULT_MAX_DEPTH: usize = 1024;

pub struct CsonDecoder<'a> {
    data: &'a [u8],
    x: usize,
    max_depth: usize,
}

impl<'a> CsonDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, x: 0, max_depth: DEFAULT_MAX_DEPTH }
    }

    pub fn decode(&mut self) -> Result<PackValue, CsonError> {
        self.x = skip_trivia(self.data, self.x);
        self.parse_value(0)
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.x).copied()
    }

    fn parse_value(&mut self, depth: usize) -> Result<PackValue, CsonError> {
        if depth > self.max_depth {
            return Err(CsonError::DepthExceeded(self.x));
        }
        self.x = skip_trivia(self.data, self.x);
        match self.peek() {
            None => Err(CsonError::Invalid(self.x)),
            Some(b'"') | Some(b'\'') => self.parse_string().map(PackValue::Str),
            Some(b'{') => self.parse_object(depth),
            Some(b'[') => self.parse_array(depth),
            Some(b't') => self.parse_literal("true", PackValue::Bool(true)),
            Some(b'f') => self.parse_literal("false", PackValue::Bool(false)),
            Some(b'n') => self.parse_literal("null", PackValue::Null),
            Some(b'-') | Some(b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(CsonError::Invalid(self.x)),
        }
    }

    fn parse_literal(&mut self, lit: &str, value: PackValue) -> Result<PackValue, CsonError> {
        let end = self.x + lit.len();
        if end > self.data.len() || &self.data[self.x..end] != lit.as_bytes() {
            return Err(CsonError::Invalid(self.x));
        }
        self.x = end;
        Ok(value)
    }

    fn parse_string(&mut self) -> Result<String, CsonError> {
        let quote = self.peek().ok_or(CsonError::Invalid(self.x))?;
        let start = self.x;
        self.x += 1;
        let end = find_ending_quote(self.data, quote, self.x)?;
        let raw = &self.data[self.x..end];
        self.x = end + 1;
        let s = std::str::from_utf8(raw).map_err(|_| CsonError::InvalidUtf8(start))?;
        Ok(unescape(s))
    }

    fn parse_number(&mut self) -> Result<PackValue, CsonError> {
        let start = self.x;
        if self.peek() == Some(b'-') {
            self.x += 1;
        }
        let mut is_float = false;
        while let Some(b) = self.peek() {
            if is_number_char(b) {
                if matches!(b, b'.' | b'e' | b'E') {
                    is_float = true;
                }
                self.x += 1;
            } else {
                break;
            }
        }
        let text = std::str::from_utf8(&self.data[start..self.x]).map_err(|_| CsonError::InvalidUtf8(start))?;
        if is_float {
            text.parse::<f64>().map(PackValue::Float64).map_err(|_| CsonError::Invalid(start))
        } else {
            text.parse::<i64>()
                .map(PackValue::Int)
                .or_else(|_| text.parse::<f64>().map(PackValue::Float64))
                .map_err(|_| CsonError::Invalid(start))
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<PackValue, CsonError> {
        self.x += 1;
        let mut items = Vec::new();
        loop {
            self.x = skip_trivia(self.data, self.x);
            if self.peek() == Some(b']') {
                self.x += 1;
                break;
            }
            items.push(self.parse_value(depth + 1)?);
            self.x = skip_trivia(self.data, self.x);
            match self.peek() {
                Some(b']') => {
                    self.x += 1;
                    break;
                }
                Some(_) => continue,
                None => return Err(CsonError::Invalid(self.x)),
            }
        }
        Ok(PackValue::Array(items))
    }

    fn parse_object(&mut self, depth: usize) -> Result<PackValue, CsonError> {
        self.x += 1;
        let mut fields = Vec::new();
        loop {
            self.x = skip_trivia(self.data, self.x);
            if self.peek() == Some(b'}') {
                self.x += 1;
                break;
            }
            let key = self.parse_key()?;
            self.x = skip_trivia(self.data, self.x);
            if self.peek() != Some(b':') {
                return Err(CsonError::Invalid(self.x));
            }
            self.x += 1;
            let value = self.parse_value(depth + 1)?;
            fields.push((key, value));
            self.x = skip_trivia(self.data, self.x);
            match self.peek() {
                Some(b'}') => {
                    self.x += 1;
                    break;
                }
                Some(_) => continue,
                None => return Err(CsonError::Invalid(self.x)),
            }
        }
        Ok(PackValue::Object(fields))
    }

    fn parse_key(&mut self) -> Result<String, CsonError> {
        match self.peek() {
            Some(b'"') | Some(b'\'') => self.parse_string(),
            Some(b) if is_bare_key_char(b) => {
                let start = self.x;
                while self.peek().map(is_bare_key_char).unwrap_or(false) {
                    self.x += 1;
                }
                std::str::from_utf8(&self.data[start..self.x])
                    .map(str::to_string)
                    .map_err(|_| CsonError::InvalidUtf8(start))
            }
            _ => Err(CsonError::Invalid(self.x)),
        }
    }
}

fn unescape(s: &str) -> String {
    if !s.contains('\\') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('"') => out.push('"'),
                Some('\'') => out.push('\''),
                Some('\\') => out.push('\\'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}

pub fn decode(data: &[u8]) -> Result<PackValue, CsonError> {
    CsonDecoder::new(data).decode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unquoted_keys_and_comments() {
        let value = decode(b"{ # header\n  name: 'bob', age: 4 }").unwrap();
        assert_eq!(
            value,
            PackValue::Object(vec![
                ("name".to_string(), PackValue::Str("bob".to_string())),
                ("age".to_string(), PackValue::Int(4)),
            ])
        );
    }

    #[test]
    fn parses_trailing_comma_in_array() {
        let value = decode(b"[1, 2, 3,]").unwrap();
        assert_eq!(value, PackValue::Array(vec![PackValue::Int(1), PackValue::Int(2), PackValue::Int(3)]));
    }

    #[test]
    fn parses_plain_json_too() {
        let value = decode(b"{\"a\": 1}").unwrap();
        assert_eq!(value, PackValue::Object(vec![("a".to_string(), PackValue::Int(1))]));
    }
}
