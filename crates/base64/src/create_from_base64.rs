//! Factory function for creating base64 decoders with custom alphabets.

use crate::constants::ALPHABET;
use crate::Base64Error;

/// Creates a base64 decoder function for a custom alphabet.
///
/// # Arguments
///
/// * `chars` - A 64-character string representing the base64 alphabet. Defaults to standard base64.
/// * `lenient_padding` - When `true`, trailing `=` padding in the input is optional and any present
///   is ignored rather than validated; when `false`, the input length must be a multiple of 4.
///
/// # Errors
///
/// Returns an error if `chars` is not exactly 64 characters, or (at decode time) if the input
/// contains a byte outside the alphabet or has an invalid length.
///
/// # Example
///
/// ```
/// use bytepack_base64::create_from_base64;
///
/// let decode = create_from_base64(None, false).unwrap();
/// assert_eq!(decode("aGVsbG8=").unwrap(), b"hello");
/// ```
pub fn create_from_base64(
    chars: Option<&str>,
    lenient_padding: bool,
) -> Result<impl Fn(&str) -> Result<Vec<u8>, Base64Error>, Base64Error> {
    let chars = chars.unwrap_or(ALPHABET);

    if chars.len() != 64 {
        return Err(Base64Error::InvalidCharSetLength);
    }

    let mut reverse = [0xffu8; 256];
    for (value, ch) in chars.bytes().enumerate() {
        reverse[ch as usize] = value as u8;
    }

    Ok(move |encoded: &str| -> Result<Vec<u8>, Base64Error> {
        let bytes = encoded.as_bytes();
        let trimmed_len = bytes
            .iter()
            .rposition(|&b| b != b'=')
            .map(|i| i + 1)
            .unwrap_or(0);
        let input = &bytes[..trimmed_len];

        if !lenient_padding && trimmed_len % 4 == 1 {
            return Err(Base64Error::InvalidLength);
        }

        let mut out = Vec::with_capacity((trimmed_len * 3) / 4 + 3);
        let mut chunk = [0u8; 4];
        let mut chunk_len = 0usize;

        for (i, &b) in input.iter().enumerate() {
            let v = reverse[b as usize];
            if v == 0xff {
                return Err(Base64Error::InvalidCharacter(i));
            }
            chunk[chunk_len] = v;
            chunk_len += 1;
            if chunk_len == 4 {
                out.push((chunk[0] << 2) | (chunk[1] >> 4));
                out.push((chunk[1] << 4) | (chunk[2] >> 2));
                out.push((chunk[2] << 6) | chunk[3]);
                chunk_len = 0;
            }
        }

        match chunk_len {
            0 => {}
            2 => out.push((chunk[0] << 2) | (chunk[1] >> 4)),
            3 => {
                out.push((chunk[0] << 2) | (chunk[1] >> 4));
                out.push((chunk[1] << 4) | (chunk[2] >> 2));
            }
            _ => return Err(Base64Error::InvalidLength),
        }

        Ok(out)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_padded_standard_input() {
        let decode = create_from_base64(None, false).unwrap();
        assert_eq!(decode("aGVsbG8=").unwrap(), b"hello");
        assert_eq!(decode("aGVsbG8gd29ybGQ=").unwrap(), b"hello world");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn rejects_unknown_alphabet_character() {
        let decode = create_from_base64(None, false).unwrap();
        assert!(matches!(
            decode("aGVs!G8="),
            Err(Base64Error::InvalidCharacter(_))
        ));
    }

    #[test]
    fn rejects_bad_char_set_length() {
        match create_from_base64(Some("short"), false) {
            Err(err) => assert_eq!(err, Base64Error::InvalidCharSetLength),
            Ok(_) => panic!("expected InvalidCharSetLength error"),
        }
    }
}
