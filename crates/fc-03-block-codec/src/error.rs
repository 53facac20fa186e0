//! Error types for the block codec.

use shared_crypto::CryptoError;
use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors that can occur encoding, validating or signing blocks.
#[derive(Debug, Error)]
pub enum CodecError {
    /// One or more schema constraints violated; every violation is listed.
    #[error("Failed to validate block schema: {}", .0.join(", "))]
    SchemaViolation(Vec<String>),

    /// A hex-encoded field failed to decode.
    #[error("Invalid hex in {field}: {reason}")]
    InvalidHex {
        /// The offending field.
        field: &'static str,
        /// Decoder error detail.
        reason: String,
    },

    /// A fixed-width field decoded to the wrong byte length.
    #[error("Invalid {field} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// The offending field.
        field: &'static str,
        /// Expected byte length.
        expected: usize,
        /// Actual byte length.
        actual: usize,
    },

    /// A numeric field could not be represented on the wire.
    #[error("Invalid number in {field}: {value}")]
    InvalidNumber {
        /// The offending field.
        field: &'static str,
        /// The value as supplied.
        value: String,
    },

    /// A required field was absent for the requested operation.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The signing/verification primitive failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
