//! The block factory.

use crate::config::BlockProductionConfig;
use crate::error::{ProductionError, Result};
use crate::ports::RewardSchedule;
use crate::BLOCK_VERSION;
use fc_03_block_codec::{BlockCodec, TransactionCodec};
use shared_crypto::{KeyPair, Sha256Hasher};
use shared_types::{Block, Transaction};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

/// Inputs for one block assembly.
pub struct BlockData<'a> {
    /// The forging delegate's keypair.
    pub keypair: &'a KeyPair,
    /// Slot-aligned epoch timestamp for the new block.
    pub timestamp: u32,
    /// Parent block; `None` only when building genesis.
    pub previous_block: Option<&'a Block>,
    /// Candidate transactions from the pending pool.
    pub transactions: Vec<Transaction>,
}

/// Assembles signed candidate blocks from pending transactions.
pub struct BlockFactory {
    codec: Arc<BlockCodec>,
    transaction_codec: Arc<dyn TransactionCodec>,
    rewards: Arc<dyn RewardSchedule>,
    config: BlockProductionConfig,
}

impl BlockFactory {
    /// Build a factory with its collaborators.
    pub fn new(
        codec: Arc<BlockCodec>,
        transaction_codec: Arc<dyn TransactionCodec>,
        rewards: Arc<dyn RewardSchedule>,
        config: BlockProductionConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            codec,
            transaction_codec,
            rewards,
            config,
        })
    }

    /// Assemble, sign and normalize one candidate block.
    ///
    /// Candidates sort by `(type, id)`; the accepted set is the longest
    /// prefix of that order whose identifier bytes fit the payload cap.
    /// Overflowing transactions stay pending for a future block. An empty
    /// accepted set still yields a valid block.
    #[tracing::instrument(skip_all, fields(candidates = data.transactions.len()))]
    pub fn create(&self, data: BlockData<'_>) -> Result<Block> {
        let mut candidates = data.transactions;
        candidates.sort_by(compare_candidates);

        let (next_height, previous_id) = match data.previous_block {
            Some(parent) => {
                let id = parent
                    .id
                    .clone()
                    .ok_or(ProductionError::MissingPreviousBlock)?;
                (parent.height + 1, Some(id))
            }
            None => (1, None),
        };

        let reward = self.rewards.reward_for_height(next_height);

        let mut payload_hasher = Sha256Hasher::new();
        let mut payload_length: u32 = 0;
        let mut total_fee: u64 = 0;
        let mut total_amount: u64 = 0;
        let mut included = Vec::with_capacity(candidates.len());

        for transaction in candidates {
            let identifier = self.transaction_codec.identifier_bytes(&transaction)?;
            let length = identifier.len() as u32;
            if payload_length + length > self.config.max_payload_length {
                // Back-pressure valve: the rest of the prefix stays pending.
                debug!(
                    included = included.len(),
                    payload_length, "payload cap reached"
                );
                break;
            }

            payload_length += length;
            total_fee = total_fee
                .checked_add(transaction.fee)
                .ok_or(ProductionError::AmountOverflow)?;
            total_amount = total_amount
                .checked_add(transaction.amount)
                .ok_or(ProductionError::AmountOverflow)?;

            payload_hasher.update(&identifier);
            included.push(transaction);
        }

        let mut block = Block {
            version: BLOCK_VERSION,
            timestamp: data.timestamp,
            height: next_height,
            previous_block: previous_id,
            number_of_transactions: included.len() as u32,
            total_amount,
            total_fee,
            reward,
            payload_length,
            payload_hash: hex::encode(payload_hasher.finalize()),
            generator_public_key: data.keypair.public_key().to_hex(),
            block_signature: None,
            transactions: included,
            id: None,
        };

        block.block_signature = Some(self.codec.sign(&block, data.keypair)?);
        let mut block = self.codec.object_normalize(block)?;
        block.id = Some(self.codec.id(&block)?);

        Ok(block)
    }
}

fn compare_candidates(a: &Transaction, b: &Transaction) -> Ordering {
    a.tx_type.cmp(&b.tx_type).then_with(|| a.id.cmp(&b.id))
}
