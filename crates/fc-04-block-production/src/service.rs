//! The slot-gated forging service.

use crate::config::BlockProductionConfig;
use crate::domain::{BlockData, BlockFactory};
use crate::error::{ProductionError, Result};
use crate::ports::{BlockSink, TransactionPool};
use fc_01_slot_clock::SlotClock;
use shared_crypto::KeyPair;
use shared_types::Block;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Orchestrates forging: gate on the slot window, snapshot the pool,
/// assemble through the factory, hand the block to the sink.
///
/// Assembly reads a shared snapshot of the pending set, so the service is
/// non-reentrant: a forge call overlapping another fails with
/// [`ProductionError::ForgeInProgress`].
pub struct ForgingService {
    clock: SlotClock,
    factory: BlockFactory,
    pool: Arc<dyn TransactionPool>,
    sink: Arc<dyn BlockSink>,
    keypair: KeyPair,
    config: BlockProductionConfig,
    in_flight: AtomicBool,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ForgingService {
    /// Build the service around its collaborators.
    pub fn new(
        clock: SlotClock,
        factory: BlockFactory,
        pool: Arc<dyn TransactionPool>,
        sink: Arc<dyn BlockSink>,
        keypair: KeyPair,
        config: BlockProductionConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            clock,
            factory,
            pool,
            sink,
            keypair,
            config,
            in_flight: AtomicBool::new(false),
        })
    }

    /// Attempt to forge at the current wall-clock instant.
    ///
    /// Returns `Ok(None)` outside the forging window.
    pub async fn forge_once(&self, previous_block: Option<&Block>) -> Result<Option<Block>> {
        self.forge_at(self.clock.epoch_seconds_now(), previous_block)
            .await
    }

    /// Attempt to forge at an explicit epoch second.
    #[tracing::instrument(skip(self, previous_block))]
    pub async fn forge_at(
        &self,
        epoch_seconds: i64,
        previous_block: Option<&Block>,
    ) -> Result<Option<Block>> {
        if !self.clock.is_forging_window(epoch_seconds) {
            debug!(epoch_seconds, "outside forging window");
            return Ok(None);
        }

        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(ProductionError::ForgeInProgress);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let slot = self.clock.slot_number(epoch_seconds);
        let timestamp = u32::try_from(self.clock.slot_start_epoch_seconds(slot))
            .map_err(|_| ProductionError::InvalidTimestamp(epoch_seconds))?;

        let candidates = self
            .pool
            .pending_transactions(self.config.max_transaction_candidates)
            .await?;

        let block = self.factory.create(BlockData {
            keypair: &self.keypair,
            timestamp,
            previous_block,
            transactions: candidates,
        })?;

        self.sink.submit_block(block.clone()).await?;

        let included: Vec<String> = block.transactions.iter().map(|t| t.id.clone()).collect();
        if !included.is_empty() {
            self.pool.remove_transactions(&included).await?;
        }

        info!(
            slot,
            height = block.height,
            transactions = block.number_of_transactions,
            id = block.id.as_deref().unwrap_or_default(),
            "forged block"
        );
        Ok(Some(block))
    }
}
