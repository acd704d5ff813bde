//! # codec-primitives
//!
//! Byte-level building blocks for the transaction codec: hex, hand-rolled
//! UTF-8, fixed-width integers, 32-bit word packing and arbitrary-precision
//! integers with their byte representations.

pub mod bigint;
pub mod error;
pub mod hex;
pub mod int;
pub mod utf8;
pub mod words;

pub use alloy_primitives::U256;
pub use bigint::BigInteger;
pub use error::ConvertError;
pub use utf8::{decode_utf8, encode_utf8, text_to_bytes, MalformedText, Text};
