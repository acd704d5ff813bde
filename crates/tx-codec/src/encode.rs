//! Field builder: host values to wire bytes.
//!
//! Every shape the decoders understand has an encoder here. Length prefixes
//! are two bytes big-endian and are range-checked, never truncated.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use codec_primitives::int::int16_to_bytes;
use codec_primitives::{encode_utf8, text_to_bytes, BigInteger, Text};

use crate::error::{CodecError, CodecResult};
use crate::params::{
    ADDRESS_LENGTH, ALIAS_VERSION, BASE64_PREFIX, LONG_BYTES_SIZE, SCRIPT_VERSION,
};
use crate::types::{AddressOrAlias, DataEntry, DataValue, Transfer};

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

pub fn boolean_to_bytes(input: bool) -> Vec<u8> {
    if input {
        vec![1]
    } else {
        vec![0]
    }
}

/// Read a boolean from exactly one byte.
pub fn bytes_to_boolean(bytes: &[u8]) -> CodecResult<bool> {
    if bytes.len() != 1 {
        return Err(CodecError::WrongLength {
            expected: 1,
            actual: bytes.len(),
        });
    }
    Ok(bytes[0] != 0)
}

/// 16-bit integer, big-endian. Takes both signed and unsigned 16-bit ranges.
pub fn short_to_bytes(input: i64) -> CodecResult<Vec<u8>> {
    Ok(int16_to_bytes(input, true)?)
}

/// Unsigned integer in `length` big-endian bytes, by repeated division.
pub fn long_to_bytes(input: u64, length: usize) -> CodecResult<Vec<u8>> {
    let mut rest = input;
    let mut bytes = vec![0u8; length];
    for k in (0..length).rev() {
        bytes[k] = (rest % 256) as u8;
        rest /= 256;
    }
    if rest != 0 {
        return Err(CodecError::OutOfRange(format!(
            "{input} does not fit in {length} bytes"
        )));
    }
    Ok(bytes)
}

/// Signed 64-bit integer as 8 big-endian two's-complement bytes.
pub fn sign_long_to_bytes(input: i64) -> [u8; LONG_BYTES_SIZE] {
    let mut rest = input as i128;
    let mut bytes = [0u8; LONG_BYTES_SIZE];
    // Least significant first, then flipped.
    for b in bytes.iter_mut() {
        let byte = rest & 0xff;
        *b = byte as u8;
        rest = (rest - byte) / 256;
    }
    bytes.reverse();
    bytes
}

pub fn big_number_to_bytes(input: &BigInteger, length: usize) -> CodecResult<Vec<u8>> {
    Ok(input.to_bytes(length)?)
}

pub fn sign_big_number_to_bytes(input: &BigInteger) -> CodecResult<[u8; LONG_BYTES_SIZE]> {
    Ok(input.to_signed_bytes()?)
}

// ---------------------------------------------------------------------------
// Strings and byte arrays
// ---------------------------------------------------------------------------

/// Two-byte big-endian length header.
pub fn length_prefix(len: usize) -> CodecResult<Vec<u8>> {
    let len = u16::try_from(len)
        .map_err(|_| CodecError::OutOfRange(format!("length {len} exceeds a 2-byte prefix")))?;
    Ok(int16_to_bytes(len as i64, true)?)
}

/// Raw bytes behind a two-byte length header.
pub fn bytes_with_size(input: &[u8]) -> CodecResult<Vec<u8>> {
    let mut out = length_prefix(input.len())?;
    out.extend_from_slice(input);
    Ok(out)
}

pub fn string_to_bytes(input: &str) -> Vec<u8> {
    encode_utf8(input)
}

pub fn string_to_bytes_with_size(input: &str) -> CodecResult<Vec<u8>> {
    bytes_with_size(&encode_utf8(input))
}

/// Length-prefixed text; malformed text is written back from its raw bytes.
pub fn text_to_bytes_with_size(input: &Text) -> CodecResult<Vec<u8>> {
    bytes_with_size(&text_to_bytes(input))
}

/// Decode a base58 string that must cover exactly `length` bytes.
pub fn base58_to_bytes(input: &str, length: usize) -> CodecResult<Vec<u8>> {
    let bytes = bs58::decode(input)
        .into_vec()
        .map_err(|e| CodecError::InvalidBase58(format!("{input}: {e}")))?;
    if bytes.len() != length {
        return Err(CodecError::WrongLength {
            expected: length,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

/// Strip the `base64:` prefix and decode the payload.
pub fn base64_payload(input: &str) -> CodecResult<Vec<u8>> {
    let payload = input.strip_prefix(BASE64_PREFIX).ok_or_else(|| {
        CodecError::InvalidBase64(format!("missing {BASE64_PREFIX} prefix in {input:?}"))
    })?;
    STANDARD
        .decode(payload)
        .map_err(|e| CodecError::InvalidBase64(e.to_string()))
}

// ---------------------------------------------------------------------------
// Composite fields
// ---------------------------------------------------------------------------

pub fn address_or_alias_to_bytes(input: &AddressOrAlias) -> CodecResult<Vec<u8>> {
    match input {
        AddressOrAlias::Address(address) => {
            let bytes = base58_to_bytes(address, ADDRESS_LENGTH)?;
            if bytes[0] == ALIAS_VERSION {
                return Err(CodecError::InvalidInput(format!(
                    "address {address} starts with the alias marker"
                )));
            }
            Ok(bytes)
        }
        AddressOrAlias::Alias { chain_id, name } => {
            let mut out = vec![ALIAS_VERSION, *chain_id];
            out.extend(text_to_bytes_with_size(name)?);
            Ok(out)
        }
    }
}

pub fn transfers_to_bytes(transfers: &[Transfer]) -> CodecResult<Vec<u8>> {
    let mut out = length_prefix(transfers.len())?;
    for transfer in transfers {
        out.extend(address_or_alias_to_bytes(&transfer.recipient)?);
        out.extend(big_number_to_bytes(&transfer.amount, LONG_BYTES_SIZE)?);
    }
    Ok(out)
}

pub fn anchors_to_bytes(anchors: &[String]) -> CodecResult<Vec<u8>> {
    let mut out = length_prefix(anchors.len())?;
    for anchor in anchors {
        let bytes = bs58::decode(anchor)
            .into_vec()
            .map_err(|e| CodecError::InvalidBase58(format!("{anchor}: {e}")))?;
        out.extend(bytes_with_size(&bytes)?);
    }
    Ok(out)
}

pub fn data_entries_to_bytes(entries: &[DataEntry]) -> CodecResult<Vec<u8>> {
    let mut out = length_prefix(entries.len())?;
    for entry in entries {
        out.extend(text_to_bytes_with_size(&entry.key)?);
        out.push(entry.field_type().code());
        match &entry.value {
            DataValue::Integer(v) => out.extend_from_slice(&sign_big_number_to_bytes(v)?),
            DataValue::Boolean(v) => out.extend(boolean_to_bytes(*v)),
            DataValue::Binary(v) => out.extend(bytes_with_size(&base64_payload(v)?)?),
            DataValue::String(v) => out.extend(text_to_bytes_with_size(v)?),
        }
    }
    Ok(out)
}

/// `base64:` alone is the empty script (a single zero byte); anything else
/// is written as a versioned, length-prefixed body.
pub fn script_to_bytes(script: &str) -> CodecResult<Vec<u8>> {
    if script == BASE64_PREFIX {
        return Ok(vec![0]);
    }
    let body = base64_payload(script)?;
    let mut out = vec![SCRIPT_VERSION];
    out.extend(bytes_with_size(&body)?);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans() {
        assert_eq!(boolean_to_bytes(true), vec![1]);
        assert_eq!(boolean_to_bytes(false), vec![0]);
        assert!(bytes_to_boolean(&[7]).unwrap());
        assert!(!bytes_to_boolean(&[0]).unwrap());
    }

    #[test]
    fn bytes_to_boolean_wrong_length() {
        assert_eq!(
            bytes_to_boolean(&[1, 0]),
            Err(CodecError::WrongLength {
                expected: 1,
                actual: 2
            })
        );
        assert!(bytes_to_boolean(&[]).is_err());
    }

    #[test]
    fn short_is_big_endian() {
        assert_eq!(short_to_bytes(0x0102).unwrap(), vec![0x01, 0x02]);
        assert!(matches!(short_to_bytes(70000), Err(CodecError::OutOfRange(_))));
    }

    #[test]
    fn long_to_bytes_pads_and_checks() {
        assert_eq!(long_to_bytes(1, 4).unwrap(), vec![0, 0, 0, 1]);
        assert_eq!(long_to_bytes(u64::MAX, 8).unwrap(), vec![0xff; 8]);
        assert_eq!(long_to_bytes(u64::MAX, 10).unwrap()[..2], [0, 0]);
        assert!(long_to_bytes(256, 1).is_err());
    }

    #[test]
    fn sign_long_matches_native() {
        for v in [0i64, 5, -5, 255, -256, i64::MAX, i64::MIN] {
            assert_eq!(sign_long_to_bytes(v), v.to_be_bytes(), "value {v}");
        }
    }

    #[test]
    fn string_with_size() {
        assert_eq!(
            string_to_bytes_with_size("hello").unwrap(),
            vec![0x00, 0x05, b'h', b'e', b'l', b'l', b'o']
        );
        assert_eq!(string_to_bytes("é"), vec![0xc3, 0xa9]);
    }

    #[test]
    fn bytes_with_size_rejects_oversized_input() {
        let big = vec![0u8; 65_536];
        assert!(matches!(bytes_with_size(&big), Err(CodecError::OutOfRange(_))));
        assert_eq!(bytes_with_size(&big[..65_535]).unwrap()[..2], [0xff, 0xff]);
    }

    #[test]
    fn big_numbers() {
        let v = BigInteger::from(-5i64);
        assert_eq!(sign_big_number_to_bytes(&v).unwrap(), (-5i64).to_be_bytes());
        assert!(big_number_to_bytes(&v, 8).is_err());
        assert_eq!(
            big_number_to_bytes(&BigInteger::from(100_000_000u64), 8).unwrap(),
            100_000_000u64.to_be_bytes().to_vec()
        );
    }

    #[test]
    fn base58_length_is_enforced() {
        let encoded = bs58::encode([1u8; 32]).into_string();
        assert_eq!(base58_to_bytes(&encoded, 32).unwrap(), vec![1u8; 32]);
        assert_eq!(
            base58_to_bytes(&encoded, 26),
            Err(CodecError::WrongLength {
                expected: 26,
                actual: 32
            })
        );
        assert!(matches!(base58_to_bytes("0OIl", 4), Err(CodecError::InvalidBase58(_))));
    }

    #[test]
    fn base64_payload_needs_prefix() {
        assert_eq!(base64_payload("base64:AQID").unwrap(), vec![1, 2, 3]);
        assert!(matches!(base64_payload("AQID"), Err(CodecError::InvalidBase64(_))));
        assert!(matches!(base64_payload("base64:@@"), Err(CodecError::InvalidBase64(_))));
    }

    #[test]
    fn alias_layout() {
        let alias = AddressOrAlias::Alias {
            chain_id: b'T',
            name: Ok("bob".into()),
        };
        assert_eq!(
            address_or_alias_to_bytes(&alias).unwrap(),
            vec![ALIAS_VERSION, b'T', 0x00, 0x03, b'b', b'o', b'b']
        );
    }

    #[test]
    fn address_layout() {
        let mut raw = [0x11u8; ADDRESS_LENGTH];
        raw[0] = 1;
        let address = AddressOrAlias::Address(bs58::encode(raw).into_string());
        assert_eq!(address_or_alias_to_bytes(&address).unwrap(), raw.to_vec());
    }

    #[test]
    fn address_starting_with_alias_marker_is_rejected() {
        let raw = [ALIAS_VERSION; ADDRESS_LENGTH];
        let address = AddressOrAlias::Address(bs58::encode(raw).into_string());
        assert!(matches!(
            address_or_alias_to_bytes(&address),
            Err(CodecError::InvalidInput(_))
        ));
    }

    #[test]
    fn empty_script_is_single_zero() {
        assert_eq!(script_to_bytes("base64:").unwrap(), vec![0]);
    }

    #[test]
    fn script_is_versioned_and_prefixed() {
        assert_eq!(
            script_to_bytes("base64:AQID").unwrap(),
            vec![SCRIPT_VERSION, 0x00, 0x03, 1, 2, 3]
        );
    }

    #[test]
    fn data_entries_layout() {
        let entries = vec![
            DataEntry::new("b", DataValue::Boolean(true)),
            DataEntry::new("i", DataValue::Integer(BigInteger::from(-5i64))),
        ];
        let mut expected = vec![0x00, 0x02];
        expected.extend([0x00, 0x01, b'b', 1, 1]);
        expected.extend([0x00, 0x01, b'i', 0]);
        expected.extend((-5i64).to_be_bytes());
        assert_eq!(data_entries_to_bytes(&entries).unwrap(), expected);
    }

    #[test]
    fn anchors_layout() {
        let anchors = vec![bs58::encode([9u8, 8, 7]).into_string()];
        assert_eq!(
            anchors_to_bytes(&anchors).unwrap(),
            vec![0x00, 0x01, 0x00, 0x03, 9, 8, 7]
        );
    }
}
