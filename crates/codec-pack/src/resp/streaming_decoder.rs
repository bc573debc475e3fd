//! Incremental RESP decoder over a growing byte buffer, for reading
//! values off a socket as bytes arrive instead of requiring a complete
//! message up front.

use crate::PackValue;

use super::decoder::RespDecoder;
use super::error::RespError;

pub struct RespStreamingDecoder {
    buffer: Vec<u8>,
    offset: usize,
    try_utf8: bool,
}

impl Default for RespStreamingDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RespStreamingDecoder {
    pub fn new() -> Self {
        Self { buffer: Vec::new(), offset: 0, try_utf8: true }
    }

    pub fn try_utf8(&self) -> bool {
        self.try_utf8
    }

    pub fn set_try_utf8(&mut self, value: bool) {
        self.try_utf8 = value;
    }

    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    pub fn read(&mut self) -> Result<Option<PackValue>, RespError> {
        if self.offset >= self.buffer.len() {
            return Ok(None);
        }
        let input = &self.buffer[self.offset..];
        let mut decoder = RespDecoder::new(input);
        decoder.try_utf8 = self.try_utf8;
        match decoder.read_any() {
            Ok(value) => {
                let consumed = decoder.position();
                self.offset += consumed;
                self.compact();
                Ok(Some(value))
            }
            Err(RespError::EndOfInput) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn skip(&mut self) -> Result<Option<()>, RespError> {
        if self.offset >= self.buffer.len() {
            return Ok(None);
        }
        let input = &self.buffer[self.offset..];
        let mut decoder = RespDecoder::new(input);
        match decoder.skip_any() {
            Ok(()) => {
                self.offset += decoder.position();
                self.compact();
                Ok(Some(()))
            }
            Err(RespError::EndOfInput) => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn compact(&mut self) {
        if self.offset == 0 {
            return;
        }
        if self.offset == self.buffer.len() {
            self.buffer.clear();
            self.offset = 0;
            return;
        }
        if self.offset >= 8192 || self.offset * 2 >= self.buffer.len() {
            self.buffer.drain(..self.offset);
            self.offset = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_one_value_at_a_time_across_pushes() {
        let mut dec = RespStreamingDecoder::new();
        dec.push(b"+OK\r\n:");
        assert_eq!(dec.read().unwrap(), Some(PackValue::Str("OK".to_string())));
        assert_eq!(dec.read().unwrap(), None);
        dec.push(b"7\r\n");
        assert_eq!(dec.read().unwrap(), Some(PackValue::Int(7)));
    }
}
