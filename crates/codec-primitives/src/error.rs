use thiserror::Error;

/// Errors raised by the primitive byte and number conversions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("need at least {required} bytes, only {available} available")]
    InsufficientBytes { required: usize, available: usize },

    #[error("{value} is not a {bits} bit integer")]
    OutOfRange { value: String, bits: usize },

    #[error("integer overflow: {0}")]
    Overflow(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid hex character: {0:?}")]
    InvalidHex(char),

    #[error("unsupported radix: {0}")]
    InvalidRadix(u32),

    #[error("cannot parse big integer: {0}")]
    ParseBigInteger(String),
}
