use codec_primitives::ConvertError;
use thiserror::Error;

/// Transaction encode/decode errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("need at least {required} bytes, only {available} available")]
    InsufficientBytes { required: usize, available: usize },

    #[error("value out of range: {0}")]
    OutOfRange(String),

    #[error("field {field}: expected {expected} value, got {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unknown data field code {0}")]
    UnknownFieldType(u8),

    #[error("wrong bytes length: expected {expected}, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type CodecResult<T> = Result<T, CodecError>;

impl From<ConvertError> for CodecError {
    fn from(e: ConvertError) -> Self {
        match e {
            ConvertError::InsufficientBytes {
                required,
                available,
            } => CodecError::InsufficientBytes {
                required,
                available,
            },
            ConvertError::OutOfRange { .. } | ConvertError::Overflow(_) => {
                CodecError::OutOfRange(e.to_string())
            }
            other => CodecError::InvalidInput(other.to_string()),
        }
    }
}
