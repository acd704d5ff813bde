//! Arbitrary-precision integers for 8-byte amounts and beyond.
//!
//! A [`BigInteger`] is a sign plus a 256-bit magnitude. The byte layer
//! converts between big-endian byte strings and values: unsigned magnitudes of
//! any width up to 32 bytes, and 8-byte two's-complement signed values.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use alloy_primitives::U256;
use serde::{Serialize, Serializer};

use crate::error::ConvertError;

/// Width of a signed wire integer in bytes.
pub const SIGNED_WIDTH: usize = 8;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Signed arbitrary-precision integer. Zero is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BigInteger {
    negative: bool,
    magnitude: U256,
}

impl BigInteger {
    pub const ZERO: Self = Self {
        negative: false,
        magnitude: U256::ZERO,
    };

    /// Build from a sign and magnitude, normalizing negative zero.
    pub fn new(negative: bool, magnitude: U256) -> Self {
        Self {
            negative: negative && magnitude != U256::ZERO,
            magnitude,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude == U256::ZERO
    }

    /// Absolute value.
    pub fn magnitude(&self) -> U256 {
        self.magnitude
    }

    // -----------------------------------------------------------------------
    // Arithmetic
    // -----------------------------------------------------------------------

    pub fn checked_add(self, rhs: Self) -> Result<Self, ConvertError> {
        if self.negative == rhs.negative {
            let magnitude = self
                .magnitude
                .checked_add(rhs.magnitude)
                .ok_or_else(|| ConvertError::Overflow(format!("{self} + {rhs}")))?;
            return Ok(Self::new(self.negative, magnitude));
        }

        // Opposite signs: the larger magnitude wins the sign.
        match self.magnitude.cmp(&rhs.magnitude) {
            Ordering::Less => Ok(Self::new(rhs.negative, rhs.magnitude - self.magnitude)),
            _ => Ok(Self::new(self.negative, self.magnitude - rhs.magnitude)),
        }
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self, ConvertError> {
        self.checked_add(-rhs)
    }

    pub fn checked_mul(self, rhs: Self) -> Result<Self, ConvertError> {
        let magnitude = self
            .magnitude
            .checked_mul(rhs.magnitude)
            .ok_or_else(|| ConvertError::Overflow(format!("{self} * {rhs}")))?;
        Ok(Self::new(self.negative != rhs.negative, magnitude))
    }

    /// Division truncating toward zero.
    pub fn checked_div(self, rhs: Self) -> Result<Self, ConvertError> {
        let magnitude = self
            .magnitude
            .checked_div(rhs.magnitude)
            .ok_or(ConvertError::DivisionByZero)?;
        Ok(Self::new(self.negative != rhs.negative, magnitude))
    }

    pub fn checked_pow(self, exp: u32) -> Result<Self, ConvertError> {
        let magnitude = self
            .magnitude
            .checked_pow(U256::from(exp as u64))
            .ok_or_else(|| ConvertError::Overflow(format!("{self} ^ {exp}")))?;
        Ok(Self::new(self.negative && exp % 2 == 1, magnitude))
    }

    // -----------------------------------------------------------------------
    // Rendering and narrowing
    // -----------------------------------------------------------------------

    /// Render in any radix from 2 to 36 with lowercase digits.
    pub fn to_str_radix(&self, radix: u32) -> Result<String, ConvertError> {
        if !(2..=36).contains(&radix) {
            return Err(ConvertError::InvalidRadix(radix));
        }
        if self.is_zero() {
            return Ok("0".into());
        }

        let base = U256::from(radix as u64);
        let mut rest = self.magnitude;
        let mut digits = Vec::new();
        while rest != U256::ZERO {
            let digit = (rest % base).as_limbs()[0] as usize;
            digits.push(DIGITS[digit]);
            rest /= base;
        }
        if self.negative {
            digits.push(b'-');
        }
        digits.reverse();
        Ok(digits.into_iter().map(char::from).collect())
    }

    /// Parse digits in the given radix, with an optional leading `-`.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, ConvertError> {
        if !(2..=36).contains(&radix) {
            return Err(ConvertError::InvalidRadix(radix));
        }
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if digits.is_empty() || digits.starts_with(['+', '-']) {
            return Err(ConvertError::ParseBigInteger(s.to_string()));
        }
        let magnitude = U256::from_str_radix(digits, radix as u64)
            .map_err(|e| ConvertError::ParseBigInteger(format!("{s}: {e}")))?;
        Ok(Self::new(negative, magnitude))
    }

    pub fn to_u64(&self) -> Option<u64> {
        if self.negative || self.magnitude.bit_len() > 64 {
            return None;
        }
        Some(self.magnitude.as_limbs()[0])
    }

    pub fn to_i64(&self) -> Option<i64> {
        if self.magnitude.bit_len() > 64 {
            return None;
        }
        let m = self.magnitude.as_limbs()[0];
        if self.negative {
            0i64.checked_sub_unsigned(m)
        } else {
            i64::try_from(m).ok()
        }
    }

    /// Nearest double; precision is lost above 2^53.
    pub fn to_f64(&self) -> f64 {
        let value = self
            .magnitude
            .as_limbs()
            .iter()
            .rev()
            .fold(0f64, |acc, &limb| acc * 18_446_744_073_709_551_616f64 + limb as f64);
        if self.negative {
            -value
        } else {
            value
        }
    }

    // -----------------------------------------------------------------------
    // Byte layer
    // -----------------------------------------------------------------------

    /// Interpret big-endian bytes as an unsigned magnitude.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConvertError> {
        let base = U256::from(256u64);
        let mut value = U256::ZERO;
        for &b in bytes {
            value = value
                .checked_mul(base)
                .and_then(|v| v.checked_add(U256::from(b as u64)))
                .ok_or_else(|| {
                    ConvertError::Overflow(format!("{} byte value exceeds 256 bits", bytes.len()))
                })?;
        }
        Ok(Self::new(false, value))
    }

    /// Interpret big-endian bytes as a signed value.
    ///
    /// Only an 8-byte input with its top bit set is read as two's
    /// complement; every other width is unsigned.
    pub fn from_signed_bytes(bytes: &[u8]) -> Result<Self, ConvertError> {
        let is_minus = bytes.len() == SIGNED_WIDTH && bytes[0] >= 0x80;
        if !is_minus {
            return Self::from_bytes(bytes);
        }

        let complement: Vec<u8> = bytes.iter().map(|b| !b).collect();
        let magnitude = Self::from_bytes(&complement)?.magnitude + U256::from(1u64);
        Ok(Self::new(true, magnitude))
    }

    /// Write a non-negative value into exactly `length` big-endian bytes.
    pub fn to_bytes(&self, length: usize) -> Result<Vec<u8>, ConvertError> {
        if self.negative {
            return Err(self.out_of_range(length));
        }

        let mut rest = self.magnitude;
        let mut bytes = vec![0u8; length];
        for k in (0..length).rev() {
            bytes[k] = low_byte(rest);
            rest >>= 8usize;
        }

        if rest != U256::ZERO {
            return Err(self.out_of_range(length));
        }
        Ok(bytes)
    }

    /// Write the value as 8 big-endian two's-complement bytes.
    pub fn to_signed_bytes(&self) -> Result<[u8; SIGNED_WIDTH], ConvertError> {
        let limit = U256::from(1u64) << 63usize;
        let fits = if self.negative {
            self.magnitude <= limit
        } else {
            self.magnitude < limit
        };
        if !fits {
            return Err(self.out_of_range(SIGNED_WIDTH));
        }

        // -n is stored as the complement of n - 1.
        let mut rest = if self.negative {
            self.magnitude - U256::from(1u64)
        } else {
            self.magnitude
        };

        let mut bytes = [0u8; SIGNED_WIDTH];
        for k in (0..SIGNED_WIDTH).rev() {
            let b = low_byte(rest);
            bytes[k] = if self.negative { !b } else { b };
            rest >>= 8usize;
        }
        Ok(bytes)
    }

    fn out_of_range(&self, length: usize) -> ConvertError {
        ConvertError::OutOfRange {
            value: self.to_string(),
            bits: length * 8,
        }
    }
}

/// Lowest byte of `value` (`value AND 255`).
fn low_byte(value: U256) -> u8 {
    (value & U256::from(0xffu64)).as_limbs()[0] as u8
}

impl Ord for BigInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.magnitude.cmp(&other.magnitude),
            (true, true) => other.magnitude.cmp(&self.magnitude),
        }
    }
}

impl PartialOrd for BigInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Neg for BigInteger {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(!self.negative, self.magnitude)
    }
}

impl Default for BigInteger {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<u64> for BigInteger {
    fn from(value: u64) -> Self {
        Self::new(false, U256::from(value))
    }
}

impl From<i64> for BigInteger {
    fn from(value: i64) -> Self {
        Self::new(value < 0, U256::from(value.unsigned_abs()))
    }
}

impl From<U256> for BigInteger {
    fn from(value: U256) -> Self {
        Self::new(false, value)
    }
}

impl FromStr for BigInteger {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_radix(s, 10)
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.magnitude)
        } else {
            write!(f, "{}", self.magnitude)
        }
    }
}

impl Serialize for BigInteger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
