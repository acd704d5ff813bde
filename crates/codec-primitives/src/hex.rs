//! Hex rendering backed by a fixed nibble table.
//!
//! Decoding tolerates odd-length input: the leading character is taken as a
//! standalone byte and the rest is read in pairs.

use crate::error::ConvertError;
use crate::utf8::{decode_utf8, encode_utf8, Text};

/// Lowercase hex digit for each nibble value.
const NIBBLE_TO_CHAR: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];

/// Map a hex digit (either case) to its nibble value.
fn char_to_nibble(c: char) -> Result<u8, ConvertError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ConvertError::InvalidHex(c)),
    }
}

/// Render bytes as a lowercase hex string.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(NIBBLE_TO_CHAR[(b >> 4) as usize]);
        out.push(NIBBLE_TO_CHAR[(b & 0x0f) as usize]);
    }
    out
}

/// Parse a hex string into bytes.
///
/// An odd number of digits yields a first byte holding only the leading
/// nibble, e.g. `"abc"` becomes `[0x0a, 0xbc]`.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, ConvertError> {
    let chars: Vec<char> = hex.chars().collect();
    let mut bytes = Vec::with_capacity(chars.len() / 2 + 1);

    let mut i = 0;
    if chars.len() % 2 != 0 {
        bytes.push(char_to_nibble(chars[0])?);
        i = 1;
    }

    while i + 1 < chars.len() {
        let hi = char_to_nibble(chars[i])?;
        let lo = char_to_nibble(chars[i + 1])?;
        bytes.push((hi << 4) | lo);
        i += 2;
    }

    Ok(bytes)
}

/// Hex-encode the UTF-8 bytes of a string.
pub fn string_to_hex(s: &str) -> String {
    bytes_to_hex(&encode_utf8(s))
}

/// Decode hex and interpret the bytes as UTF-8 text.
pub fn hex_to_string(hex: &str) -> Result<Text, ConvertError> {
    let bytes = hex_to_bytes(hex)?;
    Ok(decode_utf8(&bytes))
}
