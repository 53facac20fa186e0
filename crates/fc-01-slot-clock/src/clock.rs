//! Slot grid arithmetic.

use crate::config::SlotClockConfig;
use crate::error::Result;
use chrono::{DateTime, Utc};

/// Deterministic mapping between wall time and the DPoS slot grid.
///
/// All operations are pure functions of the input time and the
/// configuration captured at construction.
#[derive(Clone, Debug)]
pub struct SlotClock {
    epoch_start_unix: i64,
    slot_duration: i64,
    delegate_count: i64,
}

impl SlotClock {
    /// Build a clock from a validated configuration.
    pub fn new(config: SlotClockConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            epoch_start_unix: config.epoch_start_unix,
            slot_duration: i64::from(config.slot_duration),
            delegate_count: i64::from(config.delegate_count),
        })
    }

    /// Whole seconds elapsed since the chain epoch at `time`, floored.
    /// Instants before the epoch are negative.
    pub fn epoch_seconds(&self, time: DateTime<Utc>) -> i64 {
        (time.timestamp_millis() - self.epoch_start_unix * 1000).div_euclid(1000)
    }

    /// Epoch seconds at the current wall-clock instant.
    pub fn epoch_seconds_now(&self) -> i64 {
        self.epoch_seconds(Utc::now())
    }

    /// Slot containing the given epoch second.
    pub fn slot_number(&self, epoch_seconds: i64) -> i64 {
        epoch_seconds.div_euclid(self.slot_duration)
    }

    /// Whether the given instant falls in the forging window of its slot.
    ///
    /// Forging is allowed only during the first half of a slot: the slot of
    /// `t` and the slot of `t + slot_duration/2` must agree.
    pub fn is_forging_window(&self, epoch_seconds: i64) -> bool {
        let d = self.slot_duration;
        (2 * epoch_seconds + d).div_euclid(2 * d) == epoch_seconds.div_euclid(d)
    }

    /// Epoch second at which `slot` begins.
    pub fn slot_start_epoch_seconds(&self, slot: i64) -> i64 {
        slot * self.slot_duration
    }

    /// The slot after the one containing the current instant.
    pub fn next_slot(&self) -> i64 {
        self.slot_number(self.epoch_seconds_now()) + 1
    }

    /// Last slot of the round that begins at `next_slot`.
    pub fn last_slot_of_round(&self, next_slot: i64) -> i64 {
        next_slot + self.delegate_count
    }

    /// Absolute UTC instant of the given epoch second.
    pub fn real_time(&self, epoch_seconds: i64) -> DateTime<Utc> {
        // In range for any epoch second reachable from a u32 block
        // timestamp; saturates to the unix epoch otherwise.
        DateTime::from_timestamp(self.epoch_start_unix + epoch_seconds, 0).unwrap_or_default()
    }
}
