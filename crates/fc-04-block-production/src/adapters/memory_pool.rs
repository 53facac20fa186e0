//! In-memory transaction pool for tests and single-process nodes.

use crate::error::Result;
use crate::ports::TransactionPool;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::Transaction;

/// A transaction pool held entirely in memory.
#[derive(Default)]
pub struct MemoryTransactionPool {
    pending: RwLock<Vec<Transaction>>,
}

impl MemoryTransactionPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transaction to the pending set.
    pub fn add(&self, transaction: Transaction) {
        self.pending.write().push(transaction);
    }

    /// Number of pending transactions.
    pub fn len(&self) -> usize {
        self.pending.read().len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.pending.read().is_empty()
    }
}

#[async_trait]
impl TransactionPool for MemoryTransactionPool {
    async fn pending_transactions(&self, max_count: u32) -> Result<Vec<Transaction>> {
        let pending = self.pending.read();
        Ok(pending.iter().take(max_count as usize).cloned().collect())
    }

    async fn remove_transactions(&self, ids: &[String]) -> Result<()> {
        let mut pending = self.pending.write();
        pending.retain(|t| !ids.contains(&t.id));
        Ok(())
    }
}
