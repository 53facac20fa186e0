//! Reference adapters for the production ports.

mod memory_pool;
mod rewards;

pub use memory_pool::MemoryTransactionPool;
pub use rewards::MilestoneRewardSchedule;
