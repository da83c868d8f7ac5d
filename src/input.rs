//! Text forms of a cue: base64 and hexadecimal.

use crate::config::InputFormat;
use crate::error::{DecodeError, DecodeResult};
use data_encoding::{BASE64, HEXLOWER, HEXLOWER_PERMISSIVE};

/// Converts cue text to bytes.
///
/// Surrounding whitespace is ignored. Hex input may carry a `0x`/`0X` prefix
/// and an odd number of digits, in which case a leading zero is assumed.
///
/// ```rust
/// use scte35_cue::{InputFormat, decode_text};
///
/// let from_hex = decode_text("0xfc3011", InputFormat::Auto).unwrap();
/// let from_base64 = decode_text("/DAR", InputFormat::Auto).unwrap();
/// assert_eq!(from_hex, from_base64);
/// ```
pub fn decode_text(input: &str, format: InputFormat) -> DecodeResult<Vec<u8>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DecodeError::InvalidInput);
    }
    match format {
        InputFormat::Hex => decode_hex(input).ok_or(DecodeError::InvalidInput),
        InputFormat::Base64 => BASE64
            .decode(input.as_bytes())
            .map_err(|_| DecodeError::InvalidInput),
        InputFormat::Auto => decode_hex(input)
            .or_else(|| BASE64.decode(input.as_bytes()).ok())
            .ok_or(DecodeError::InvalidInput),
    }
}

fn decode_hex(input: &str) -> Option<Vec<u8>> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    if digits.len() % 2 == 1 {
        let padded = format!("0{digits}");
        return HEXLOWER_PERMISSIVE.decode(padded.as_bytes()).ok();
    }
    HEXLOWER_PERMISSIVE.decode(digits.as_bytes()).ok()
}

/// Encodes bytes as standard padded base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Encodes bytes as `0x` followed by lowercase hex digits.
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", HEXLOWER.encode(bytes))
}
