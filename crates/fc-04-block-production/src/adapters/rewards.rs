//! Milestone reward schedule.
//!
//! Rewards start at a fixed height offset and step down through the
//! milestone table every `distance` blocks, holding the last milestone
//! forever: a monotonic non-increasing step function of height.

use crate::ports::RewardSchedule;
use shared_types::constants::{REWARD_DISTANCE, REWARD_MILESTONES, REWARD_OFFSET};

/// The chain's milestone-based forging reward schedule.
#[derive(Clone, Debug)]
pub struct MilestoneRewardSchedule {
    offset: u64,
    distance: u64,
    milestones: Vec<u64>,
}

impl Default for MilestoneRewardSchedule {
    fn default() -> Self {
        Self {
            offset: REWARD_OFFSET,
            distance: REWARD_DISTANCE,
            milestones: REWARD_MILESTONES.to_vec(),
        }
    }
}

impl MilestoneRewardSchedule {
    /// A schedule with custom parameters (test networks).
    pub fn new(offset: u64, distance: u64, milestones: Vec<u64>) -> Self {
        Self {
            offset,
            distance,
            milestones,
        }
    }

    fn milestone_index(&self, height: u64) -> usize {
        let steps = (height.saturating_sub(self.offset)) / self.distance;
        (steps as usize).min(self.milestones.len() - 1)
    }
}

impl RewardSchedule for MilestoneRewardSchedule {
    fn reward_for_height(&self, height: u64) -> u64 {
        if height < self.offset || self.milestones.is_empty() {
            return 0;
        }
        self.milestones[self.milestone_index(height)]
    }
}
