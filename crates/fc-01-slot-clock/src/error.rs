//! Error types for the slot clock.

use thiserror::Error;

/// Result type alias for slot clock operations.
pub type Result<T> = std::result::Result<T, SlotClockError>;

/// Errors that can occur constructing a slot clock.
///
/// Once constructed, every clock operation is total.
#[derive(Debug, Error)]
pub enum SlotClockError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
