//! Error types for block production.

use fc_01_slot_clock::SlotClockError;
use fc_03_block_codec::CodecError;
use thiserror::Error;

/// Result type alias for block production operations.
pub type Result<T> = std::result::Result<T, ProductionError>;

/// Errors that can occur assembling or forging blocks.
#[derive(Debug, Error)]
pub enum ProductionError {
    /// A non-genesis block was requested without a usable parent.
    #[error("Previous block is required and must carry an id")]
    MissingPreviousBlock,

    /// The forgeable instant cannot be expressed as a block timestamp.
    #[error("Instant {0} is outside the forgeable epoch")]
    InvalidTimestamp(i64),

    /// Packing totals overflowed the amount domain.
    #[error("Transaction totals overflow while packing block")]
    AmountOverflow,

    /// A forge call arrived while another was still running.
    #[error("Forging already in progress")]
    ForgeInProgress,

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Transaction pool communication error.
    #[error("Transaction pool error: {0}")]
    PoolError(String),

    /// Block sink communication error.
    #[error("Block sink error: {0}")]
    SinkError(String),

    /// Codec failure while encoding, signing or normalizing.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Slot clock construction failure.
    #[error(transparent)]
    Clock(#[from] SlotClockError),
}

impl ProductionError {
    /// Check if the error is transient (a later slot may succeed).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ForgeInProgress | Self::PoolError(_) | Self::SinkError(_)
        )
    }
}
