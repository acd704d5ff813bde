//! Hand-rolled UTF-8 conversion.
//!
//! Decoding never raises: a truncated or malformed sequence produces a
//! [`MalformedText`] value which callers must branch on. The malformed value
//! keeps the raw bytes so a record holding it can still be written back
//! unchanged.

use serde::Serialize;
use thiserror::Error;

/// Number of continuation bytes, indexed by bits 3..6 of a lead byte.
/// A zero entry marks a lead byte that cannot start a sequence.
const EXTRA_BYTES: [usize; 8] = [1, 1, 1, 1, 2, 2, 3, 0];

/// Smallest code point each sequence length may carry, indexed by the
/// number of continuation bytes. Anything below is an overlong form.
const MIN_CODE_POINT: [u32; 4] = [0, 0x80, 0x800, 0x10000];

/// A byte sequence that is not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("malformed utf-8 at byte {position}")]
pub struct MalformedText {
    /// Offset of the lead byte of the first bad sequence.
    pub position: usize,
    /// The complete input that failed to decode.
    pub raw: Vec<u8>,
}

/// Result of decoding text from the wire.
pub type Text = Result<String, MalformedText>;

/// Encode a string as UTF-8, one code point at a time.
pub fn encode_utf8(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for ch in s.chars() {
        let cp = ch as u32;
        if cp < 0x80 {
            out.push(cp as u8);
        } else if cp < 0x800 {
            out.push(0xc0 | (cp >> 6) as u8);
            out.push(0x80 | (cp & 0x3f) as u8);
        } else if cp < 0x10000 {
            out.push(0xe0 | (cp >> 12) as u8);
            out.push(0x80 | ((cp >> 6) & 0x3f) as u8);
            out.push(0x80 | (cp & 0x3f) as u8);
        } else {
            out.push(0xf0 | (cp >> 18) as u8);
            out.push(0x80 | ((cp >> 12) & 0x3f) as u8);
            out.push(0x80 | ((cp >> 6) & 0x3f) as u8);
            out.push(0x80 | (cp & 0x3f) as u8);
        }
    }
    out
}

/// Decode UTF-8 bytes into a string.
pub fn decode_utf8(bytes: &[u8]) -> Text {
    let malformed = |position: usize| MalformedText {
        position,
        raw: bytes.to_vec(),
    };

    let mut out = String::with_capacity(bytes.len());
    let mut index = 0;

    while index < bytes.len() {
        let lead_pos = index;
        let lead = bytes[index];
        index += 1;

        let mut cp = lead as u32;
        if lead & 0x80 != 0 {
            let extra = EXTRA_BYTES[((lead >> 3) & 0x07) as usize];
            if lead & 0x40 == 0 || extra == 0 || index + extra > bytes.len() {
                return Err(malformed(lead_pos));
            }

            cp = (lead & (0x3f >> extra)) as u32;
            for _ in 0..extra {
                let cont = bytes[index];
                index += 1;
                if cont & 0xc0 != 0x80 {
                    return Err(malformed(lead_pos));
                }
                cp = (cp << 6) | (cont & 0x3f) as u32;
            }
            if cp < MIN_CODE_POINT[extra] {
                return Err(malformed(lead_pos));
            }
        }

        // Surrogate halves and values past U+10FFFF are not scalar values.
        match char::from_u32(cp) {
            Some(ch) => out.push(ch),
            None => return Err(malformed(lead_pos)),
        }
    }

    Ok(out)
}

/// Bytes that reproduce a decoded text value on the wire.
pub fn text_to_bytes(text: &Text) -> Vec<u8> {
    match text {
        Ok(s) => encode_utf8(s),
        Err(m) => m.raw.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_one_byte_per_char() {
        assert_eq!(encode_utf8("hello"), b"hello".to_vec());
    }

    #[test]
    fn encode_matches_std_for_every_width() {
        for s in ["a", "é", "€", "𝄞", "mixed é€𝄞 text"] {
            assert_eq!(encode_utf8(s), s.as_bytes(), "mismatch for {s}");
        }
    }

    #[test]
    fn decode_supplementary_plane() {
        let bytes = encode_utf8("😀");
        assert_eq!(bytes, vec![0xf0, 0x9f, 0x98, 0x80]);
        assert_eq!(decode_utf8(&bytes).unwrap(), "😀");
    }

    #[test]
    fn decode_empty() {
        assert_eq!(decode_utf8(&[]).unwrap(), "");
    }

    #[test]
    fn truncated_sequence_is_malformed() {
        let err = decode_utf8(&[b'a', 0xe2, 0x82]).unwrap_err();
        assert_eq!(err.position, 1);
        assert_eq!(err.raw, vec![b'a', 0xe2, 0x82]);
    }

    #[test]
    fn bad_continuation_is_malformed() {
        assert!(decode_utf8(&[0xc3, 0x41]).is_err());
    }

    #[test]
    fn lone_continuation_byte_is_malformed() {
        assert!(decode_utf8(&[0x80]).is_err());
    }

    #[test]
    fn five_byte_lead_is_malformed() {
        assert!(decode_utf8(&[0xf8, 0x80, 0x80, 0x80, 0x80]).is_err());
    }

    #[test]
    fn overlong_forms_are_malformed() {
        // C0 80 and E0 80 80 both spell U+0000 in more bytes than needed.
        assert_eq!(decode_utf8(&[0xc0, 0x80]).unwrap_err().position, 0);
        assert_eq!(decode_utf8(&[b'x', 0xe0, 0x80, 0x80]).unwrap_err().position, 1);
        assert!(decode_utf8(&[0xc1, 0x81]).is_err());
        assert!(decode_utf8(&[0xf0, 0x8f, 0xbf, 0xbf]).is_err());
    }

    #[test]
    fn shortest_forms_at_each_width_boundary_decode() {
        assert_eq!(decode_utf8(&[0xc2, 0x80]).unwrap(), "\u{80}");
        assert_eq!(decode_utf8(&[0xe0, 0xa0, 0x80]).unwrap(), "\u{800}");
        assert_eq!(decode_utf8(&[0xf0, 0x90, 0x80, 0x80]).unwrap(), "\u{10000}");
    }

    #[test]
    fn overlong_text_reencodes_from_raw_bytes() {
        let raw = vec![0xc1, 0x81];
        assert_eq!(text_to_bytes(&decode_utf8(&raw)), raw);
    }

    #[test]
    fn encoded_surrogate_is_malformed() {
        // ED A0 80 would be U+D800.
        assert!(decode_utf8(&[0xed, 0xa0, 0x80]).is_err());
    }

    #[test]
    fn text_to_bytes_reproduces_malformed_input() {
        let raw = vec![0xff, 0x00];
        let text = decode_utf8(&raw);
        assert!(text.is_err());
        assert_eq!(text_to_bytes(&text), raw);
    }

    #[test]
    fn malformed_display() {
        let err = decode_utf8(&[0xc3]).unwrap_err();
        assert_eq!(err.to_string(), "malformed utf-8 at byte 0");
    }
}
