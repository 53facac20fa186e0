//! Ports for block production (driven side - SPI).

use crate::error::Result;
use async_trait::async_trait;
use shared_types::{Block, Transaction};

/// Port: read and prune the pending transaction set.
#[async_trait]
pub trait TransactionPool: Send + Sync {
    /// Snapshot of pending candidates, at most `max_count`.
    async fn pending_transactions(&self, max_count: u32) -> Result<Vec<Transaction>>;

    /// Drop transactions that made it into an accepted block.
    async fn remove_transactions(&self, ids: &[String]) -> Result<()>;
}

/// Port: hand a finished block to the consensus layer.
#[async_trait]
pub trait BlockSink: Send + Sync {
    /// Submit a signed, normalized block for acceptance.
    async fn submit_block(&self, block: Block) -> Result<()>;
}

/// Port: the external reward-schedule collaborator.
///
/// A monotonic step function of height; the exact schedule is chain
/// policy, not core logic.
pub trait RewardSchedule: Send + Sync {
    /// Forging reward in base units for a block at `height`.
    fn reward_for_height(&self, height: u64) -> u64;
}
