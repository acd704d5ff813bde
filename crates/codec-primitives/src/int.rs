//! Fixed-width integer conversion.
//!
//! The 16- and 32-bit helpers are little-endian unless the caller asks for
//! big-endian; wire fields pick their byte order explicitly.

use crate::error::ConvertError;

/// Largest unsigned value that fits in two bytes.
pub const INT16_MAX: u64 = 65_535;

/// Largest unsigned value that fits in four bytes.
pub const INT32_MAX: u64 = 4_294_967_295;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Verify that `num_bytes` bytes are readable starting at `start`.
///
/// Returns `start` on success so callers can index straight away.
pub fn check_bytes_to_int_input(
    bytes: &[u8],
    num_bytes: usize,
    start: usize,
) -> Result<usize, ConvertError> {
    let available = bytes.len().saturating_sub(start);
    if available < num_bytes {
        return Err(ConvertError::InsufficientBytes {
            required: num_bytes,
            available,
        });
    }
    Ok(start)
}

/// Read a little-endian 16-bit value. The result is never sign-extended.
pub fn bytes_to_short(bytes: &[u8], start: usize) -> Result<u16, ConvertError> {
    let i = check_bytes_to_int_input(bytes, 2, start)?;
    Ok(bytes[i] as u16 | (bytes[i + 1] as u16) << 8)
}

/// Read a little-endian 32-bit value; the top byte carries the sign.
pub fn bytes_to_int32(bytes: &[u8], start: usize) -> Result<i32, ConvertError> {
    let i = check_bytes_to_int_input(bytes, 4, start)?;
    Ok(i32::from_le_bytes([
        bytes[i],
        bytes[i + 1],
        bytes[i + 2],
        bytes[i + 3],
    ]))
}

/// How a value is laid out before byte emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberKind {
    /// `0..=unsigned_max / 2`
    SmallPositive,
    /// Above the signed maximum but within the unsigned maximum.
    LargeUnsigned,
    Negative,
}

/// Encode `x` into `num_bytes` bytes.
///
/// Accepts anything in `[-(unsigned_max / 2 + 1), unsigned_max]`, so a 16-bit
/// field takes both `-32768` and `65535`. Negative values come out in two's
/// complement. Bytes are produced least-significant first and reversed when
/// `big_endian` is set.
pub fn int_to_bytes(
    x: i64,
    num_bytes: usize,
    unsigned_max: u64,
    big_endian: bool,
) -> Result<Vec<u8>, ConvertError> {
    let signed_max = (unsigned_max / 2) as i128;
    let negative_max = -(signed_max + 1);
    let value = x as i128;

    if value < negative_max || value > unsigned_max as i128 {
        return Err(ConvertError::OutOfRange {
            value: x.to_string(),
            bits: num_bytes * 8,
        });
    }

    let kind = if value >= 0 && value <= signed_max {
        NumberKind::SmallPositive
    } else if value > signed_max {
        NumberKind::LargeUnsigned
    } else {
        NumberKind::Negative
    };

    let mut rest = match kind {
        NumberKind::Negative => -value - 1,
        _ => value,
    };

    let mut bytes = Vec::with_capacity(num_bytes);
    for _ in 0..num_bytes {
        let current = match kind {
            NumberKind::Negative => 255 - (rest % 256),
            _ => rest % 256,
        };
        bytes.push(current as u8);
        rest /= 256;
    }

    if big_endian {
        bytes.reverse();
    }
    Ok(bytes)
}

/// Encode a 16-bit integer (signed or unsigned range).
pub fn int16_to_bytes(x: i64, big_endian: bool) -> Result<Vec<u8>, ConvertError> {
    int_to_bytes(x, 2, INT16_MAX, big_endian)
}

/// Encode a 32-bit integer (signed or unsigned range).
pub fn int32_to_bytes(x: i64, big_endian: bool) -> Result<Vec<u8>, ConvertError> {
    int_to_bytes(x, 4, INT32_MAX, big_endian)
}

/// Split 32 bytes into sixteen little-endian shorts.
pub fn bytes_to_short_array(bytes: &[u8; 32]) -> [u16; 16] {
    let mut shorts = [0u16; 16];
    for (i, short) in shorts.iter_mut().enumerate() {
        *short = bytes[i * 2] as u16 | (bytes[i * 2 + 1] as u16) << 8;
    }
    shorts
}

/// Inverse of [`bytes_to_short_array`].
pub fn short_array_to_bytes(shorts: &[u16; 16]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (i, short) in shorts.iter().enumerate() {
        bytes[2 * i] = (short & 0xff) as u8;
        bytes[2 * i + 1] = (short >> 8) as u8;
    }
    bytes
}

/// Hex-render shorts low byte first, matching their in-memory layout.
pub fn short_array_to_hex(shorts: &[u16]) -> String {
    let mut out = String::with_capacity(shorts.len() * 4);
    for &s in shorts {
        for shift in [4, 0, 12, 8] {
            out.push(HEX_DIGITS[((s >> shift) & 0x0f) as usize] as char);
        }
    }
    out
}
