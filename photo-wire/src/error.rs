// SPDX-License-Identifier: MIT
//! Error types for the wire layer

/// Errors raised by the compression codec
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Decode error: all strategies failed (last: {0})")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(#[from] std::io::Error),
}

/// Errors raised while reading or rebuilding the length-prefixed envelope
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FramingError {
    #[error("Packet too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },

    #[error("Negative length prefix: {0}")]
    NegativeLength(i32),

    #[error("Truncated payload: declared {declared} bytes, {available} available")]
    Truncated { declared: usize, available: usize },

    #[error("Payload too large for length prefix: {0} bytes")]
    PayloadTooLarge(usize),

    #[error("Invalid UTF-8 in string field: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
