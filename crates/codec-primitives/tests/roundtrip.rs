//! Round-trip laws for the primitive conversions.

use codec_primitives::hex::{bytes_to_hex, hex_to_bytes};
use codec_primitives::int::{bytes_to_short, int16_to_bytes};
use codec_primitives::words::{bytes_to_word_array, word_array_to_bytes};
use codec_primitives::{decode_utf8, encode_utf8, BigInteger};
use proptest::prelude::*;

#[test]
fn signed_boundary_set_roundtrips() {
    let boundaries: [[u8; 8]; 4] = [
        [0x00; 8],
        [0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
        [0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        [0xff; 8],
    ];
    for bytes in boundaries {
        let value = BigInteger::from_signed_bytes(&bytes).unwrap();
        assert_eq!(value.to_signed_bytes().unwrap(), bytes);
    }
}

proptest! {
    #[test]
    fn prop_signed_bytes_roundtrip(bytes in any::<[u8; 8]>()) {
        let value = BigInteger::from_signed_bytes(&bytes).unwrap();
        prop_assert_eq!(value.to_signed_bytes().unwrap(), bytes);
        prop_assert_eq!(value.to_i64(), Some(i64::from_be_bytes(bytes)));
    }

    #[test]
    fn prop_unsigned_bytes_roundtrip(bytes in proptest::collection::vec(any::<u8>(), 0..32)) {
        let value = BigInteger::from_bytes(&bytes).unwrap();
        prop_assert_eq!(value.to_bytes(bytes.len()).unwrap(), bytes);
    }

    #[test]
    fn prop_utf8_roundtrip(s in any::<String>()) {
        let bytes = encode_utf8(&s);
        prop_assert_eq!(&bytes, &s.as_bytes().to_vec());
        prop_assert_eq!(decode_utf8(&bytes).unwrap(), s);
    }

    #[test]
    fn prop_utf8_decode_agrees_with_std_on_valid_input(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        if let Ok(expected) = std::str::from_utf8(&bytes) {
            prop_assert_eq!(decode_utf8(&bytes).unwrap(), expected);
        }
    }

    #[test]
    fn prop_hex_roundtrip(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(hex_to_bytes(&bytes_to_hex(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn prop_int16_little_endian_roundtrip(x in 0u16..=u16::MAX) {
        let bytes = int16_to_bytes(x as i64, false).unwrap();
        prop_assert_eq!(bytes_to_short(&bytes, 0).unwrap(), x);
    }

    #[test]
    fn prop_word_array_roundtrip(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(word_array_to_bytes(&bytes_to_word_array(&bytes)), bytes);
    }
}
