//! Big-endian 32-bit word packing for hash-library interop.

use serde::Serialize;

/// Bytes packed into big-endian words, with the count of meaningful bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordArray {
    pub words: Vec<u32>,
    pub sig_bytes: usize,
}

/// Pack bytes into big-endian words. A short tail is zero-padded on the right.
pub fn bytes_to_word_array(bytes: &[u8]) -> WordArray {
    let words = bytes
        .chunks(4)
        .map(|chunk| {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            u32::from_be_bytes(word)
        })
        .collect();

    WordArray {
        words,
        sig_bytes: bytes.len(),
    }
}

/// Unpack words back into `sig_bytes` bytes, dropping the padding.
pub fn word_array_to_bytes(array: &WordArray) -> Vec<u8> {
    let mut bytes: Vec<u8> = array.words.iter().flat_map(|w| w.to_be_bytes()).collect();
    bytes.truncate(array.sig_bytes);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_words() {
        let array = bytes_to_word_array(&[]);
        assert!(array.words.is_empty());
        assert_eq!(array.sig_bytes, 0);
        assert!(word_array_to_bytes(&array).is_empty());
    }

    #[test]
    fn full_words_are_big_endian() {
        let array = bytes_to_word_array(&[0x01, 0x02, 0x03, 0x04, 0xaa, 0xbb, 0xcc, 0xdd]);
        assert_eq!(array.words, vec![0x01020304, 0xaabbccdd]);
        assert_eq!(array.sig_bytes, 8);
    }

    #[test]
    fn tail_is_zero_padded() {
        let array = bytes_to_word_array(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        assert_eq!(array.words, vec![0x01020304, 0x05060000]);
        assert_eq!(array.sig_bytes, 6);
    }

    #[test]
    fn unpack_drops_padding() {
        for len in 0..12 {
            let bytes: Vec<u8> = (1..=len as u8).collect();
            let array = bytes_to_word_array(&bytes);
            assert_eq!(word_array_to_bytes(&array), bytes, "length {len}");
        }
    }
}
