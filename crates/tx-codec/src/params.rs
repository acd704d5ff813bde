use serde::Serialize;

use crate::error::CodecError;

/// Width of every count and length prefix (big-endian, unsigned).
pub const LENGTH_SIZE: usize = 2;

/// Width of amounts and signed data integers.
pub const LONG_BYTES_SIZE: usize = 8;

/// Marker byte opening an alias in an address-or-alias field.
pub const ALIAS_VERSION: u8 = 2;

/// Marker byte opening a raw address.
pub const ADDRESS_VERSION: u8 = 1;

/// Raw address length, marker byte included.
pub const ADDRESS_LENGTH: usize = 26;

/// Span read by a base58 field when no explicit length is given.
pub const DEFAULT_BASE58_LENGTH: usize = 32;

/// Version byte written in front of a non-empty script.
pub const SCRIPT_VERSION: u8 = 1;

/// Prefix on every base64-rendered payload.
pub const BASE64_PREFIX: &str = "base64:";

/// Type tag of a data entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFieldType {
    Integer,
    Boolean,
    Binary,
    String,
}

impl DataFieldType {
    /// Wire tag for this type.
    pub fn code(self) -> u8 {
        match self {
            DataFieldType::Integer => 0,
            DataFieldType::Boolean => 1,
            DataFieldType::Binary => 2,
            DataFieldType::String => 3,
        }
    }

    /// Look up a wire tag. Unknown tags are unrecoverable.
    pub fn from_code(code: u8) -> Result<Self, CodecError> {
        match code {
            0 => Ok(DataFieldType::Integer),
            1 => Ok(DataFieldType::Boolean),
            2 => Ok(DataFieldType::Binary),
            3 => Ok(DataFieldType::String),
            other => Err(CodecError::UnknownFieldType(other)),
        }
    }
}

impl std::fmt::Display for DataFieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataFieldType::Integer => write!(f, "integer"),
            DataFieldType::Boolean => write!(f, "boolean"),
            DataFieldType::Binary => write!(f, "binary"),
            DataFieldType::String => write!(f, "string"),
        }
    }
}
