//! lewire error types

use thiserror::Error;

/// Decode errors
///
/// Encoding never fails at this layer; every variant describes why a byte
/// sequence could not be turned back into a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Source ran out before the required bytes were available
    #[error("insufficient data: need {needed} more bytes")]
    InsufficientData {
        /// Bytes requested by the failing read
        needed: usize,
    },

    /// Length prefix implies a payload that cannot be sized
    #[error("invalid length prefix: {count} elements of {element_size} bytes")]
    InvalidLength {
        /// Decoded element count
        count: u64,
        /// Width of one element in bytes
        element_size: usize,
    },

    /// Length prefix exceeds the configured container limit
    #[error("container length {count} exceeds limit {limit}")]
    LengthLimitExceeded {
        /// Decoded element count
        count: u64,
        /// Configured maximum
        limit: u64,
    },

    /// String payload is not UTF-8
    #[error("invalid UTF-8 in string payload")]
    InvalidUtf8,

    /// Bytes left over after a strict top-level decode
    #[error("{remaining} trailing bytes after value")]
    TrailingBytes {
        /// Unconsumed byte count
        remaining: usize,
    },
}

impl Error {
    /// Whether more input could turn this failure into a success.
    ///
    /// Transports use this to decide between waiting for the next read and
    /// dropping the connection.
    #[must_use]
    pub const fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }

    /// Whether the input carried an implausible length prefix.
    #[must_use]
    pub const fn is_invalid_length(&self) -> bool {
        matches!(
            self,
            Self::InvalidLength { .. } | Self::LengthLimitExceeded { .. }
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
