//! Base64 encoding and decoding.
//!
//! Two alphabets are supported out of the box: the standard alphabet (with
//! `+`/`/` and `=` padding) and the URL-safe alphabet (with `-`/`_` and no
//! required padding). Both the encoder and decoder are built by factory
//! functions so callers needing a non-standard alphabet can construct their
//! own.
//!
//! # Example
//!
//! ```
//! use bytepack_base64::{from_base64, to_base64};
//!
//! let encoded = to_base64(b"hello world");
//! assert_eq!(encoded, "aGVsbG8gd29ybGQ=");
//! assert_eq!(from_base64(&encoded).unwrap(), b"hello world");
//! ```

mod constants;
mod create_from_base64;
mod create_to_base64;
mod from_base64;
mod from_base64_url;

pub use constants::{ALPHABET, ALPHABET_URL, PAD};
pub use create_from_base64::create_from_base64;
pub use create_to_base64::create_to_base64;
pub use from_base64::from_base64;
pub use from_base64_url::from_base64_url;

/// Encodes bytes using the standard base64 alphabet with `=` padding.
pub fn to_base64(data: &[u8]) -> String {
    let encode = create_to_base64(None, None).expect("standard alphabet is valid");
    encode(data, data.len())
}

/// Encodes bytes using the URL-safe base64 alphabet without padding.
pub fn to_base64_url(data: &[u8]) -> String {
    let encode =
        create_to_base64(Some(ALPHABET_URL), Some("")).expect("URL-safe alphabet is valid");
    encode(data, data.len())
}

/// Errors produced while building or running a base64 codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Base64Error {
    /// A custom alphabet was not exactly 64 characters.
    #[error("base64 alphabet must contain exactly 64 characters")]
    InvalidCharSetLength,
    /// Input length is not a valid base64 length (after stripping padding).
    #[error("invalid base64 input length")]
    InvalidLength,
    /// Input contained a byte outside the configured alphabet.
    #[error("invalid base64 character at byte offset {0}")]
    InvalidCharacter(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_bytes() {
        for len in 0..16 {
            let data: Vec<u8> = (0..len).map(|i| (i * 37 + 11) as u8).collect();
            let encoded = to_base64(&data);
            assert_eq!(from_base64(&encoded).unwrap(), data);
        }
    }

    #[test]
    fn round_trips_url_safe() {
        let data = b"\xfb\xff\xfe binary \x00 data";
        let encoded = to_base64_url(data);
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains('='));
        assert_eq!(from_base64_url(&encoded).unwrap(), data);
    }
}
