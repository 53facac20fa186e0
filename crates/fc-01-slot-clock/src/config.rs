//! Configuration types for the slot clock.

use crate::error::{Result, SlotClockError};
use serde::Deserialize;
use shared_types::constants::{ACTIVE_DELEGATES, BLOCK_TIME_SECS, EPOCH_START_UNIX};

/// Runtime configuration for the slot grid.
#[derive(Clone, Debug, Deserialize)]
pub struct SlotClockConfig {
    /// Chain epoch reference instant as a unix timestamp.
    pub epoch_start_unix: i64,

    /// Seconds per slot. Must be > 0.
    pub slot_duration: u32,

    /// Active delegates per round. Must be > 0.
    pub delegate_count: u32,
}

impl Default for SlotClockConfig {
    fn default() -> Self {
        Self {
            epoch_start_unix: EPOCH_START_UNIX,
            slot_duration: BLOCK_TIME_SECS,
            delegate_count: ACTIVE_DELEGATES,
        }
    }
}

impl SlotClockConfig {
    /// Validate parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.slot_duration == 0 {
            return Err(SlotClockError::InvalidConfig(
                "slot_duration must be greater than zero".into(),
            ));
        }
        if self.delegate_count == 0 {
            return Err(SlotClockError::InvalidConfig(
                "delegate_count must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
