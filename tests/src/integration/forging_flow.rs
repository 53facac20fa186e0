//! # Integration: pool → factory → codec → ledger
//!
//! Exercises the full forging choreography: transactions enter the pool,
//! the slot-gated service assembles and signs a block, the codec verifies
//! and normalizes it, and the ledger credits the forger.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fc_01_slot_clock::{SlotClock, SlotClockConfig};
    use fc_02_account_ledger::{Account, AccountDiff, AccountLedger, MemoryAccountStore};
    use fc_03_block_codec::{BlockCodec, TransferTransactionCodec};
    use fc_04_block_production::{
        BlockData, BlockFactory, BlockProductionConfig, BlockSink, ForgingService,
        MemoryTransactionPool, MilestoneRewardSchedule, Result as ProductionResult,
    };
    use parking_lot::Mutex;
    use shared_crypto::{derive_address, KeyPair};
    use shared_types::{Block, Transaction};

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    struct RecordingSink {
        blocks: Mutex<Vec<Block>>,
    }

    #[async_trait::async_trait]
    impl BlockSink for RecordingSink {
        async fn submit_block(&self, block: Block) -> ProductionResult<()> {
            self.blocks.lock().push(block);
            Ok(())
        }
    }

    fn forger() -> KeyPair {
        KeyPair::from_passphrase("wolf canal reopen urge ticket select tide").unwrap()
    }

    fn transfer(seed: u64, amount: u64, fee: u64) -> Transaction {
        Transaction {
            id: format!("{seed:064x}"),
            tx_type: 0,
            amount,
            fee,
            sender_public_key: forger().public_key().to_hex(),
            signature: Some("3044".into()),
        }
    }

    fn codec() -> BlockCodec {
        BlockCodec::new(Arc::new(TransferTransactionCodec::new()))
    }

    fn factory(config: BlockProductionConfig) -> BlockFactory {
        let transaction_codec = Arc::new(TransferTransactionCodec::new());
        BlockFactory::new(
            Arc::new(BlockCodec::new(transaction_codec.clone())),
            transaction_codec,
            Arc::new(MilestoneRewardSchedule::default()),
            config,
        )
        .unwrap()
    }

    fn forging_service(
        pool: Arc<MemoryTransactionPool>,
        sink: Arc<RecordingSink>,
        config: BlockProductionConfig,
    ) -> ForgingService {
        ForgingService::new(
            SlotClock::new(SlotClockConfig::default()).unwrap(),
            factory(config.clone()),
            pool,
            sink,
            forger(),
            config,
        )
        .unwrap()
    }

    // =========================================================================
    // INTEGRATION TESTS: FORGE → VERIFY → APPLY
    // =========================================================================

    /// A forged block survives independent verification and normalization,
    /// and its fees/reward land on the forger's account.
    #[tokio::test]
    async fn test_forged_block_confirms_into_ledger() {
        crate::init_test_logging();

        let pool = Arc::new(MemoryTransactionPool::new());
        pool.add(transfer(7, 2_000, 10_000_000));
        pool.add(transfer(3, 1_000, 10_000_000));
        let sink = Arc::new(RecordingSink {
            blocks: Mutex::new(vec![]),
        });
        let service = forging_service(pool.clone(), sink.clone(), Default::default());

        let block = service.forge_at(0, None).await.unwrap().unwrap();

        // An independent codec instance reproduces signature and id.
        let codec = codec();
        assert!(codec.verify_signature(&block).unwrap());
        assert_eq!(codec.id(&block).unwrap(), block.id.clone().unwrap());
        let block = codec.object_normalize(block).unwrap();

        // Confirm the block into the ledger: the forger collects fees.
        let ledger = AccountLedger::new(Arc::new(MemoryAccountStore::new()));
        let forger_address = derive_address(&forger().public_key());
        ledger
            .set(
                &forger_address,
                Account::with_public_key(&forger_address, forger().public_key().to_hex()),
            )
            .unwrap();

        let credited = ledger
            .merge(
                &forger_address,
                AccountDiff {
                    balance: Some(block.total_forged() as i64),
                    u_balance: Some(block.total_forged() as i64),
                    fees: Some(block.total_fee as i64),
                    rewards: Some(block.reward as i64),
                    produced_blocks: Some(1),
                    block_id: block.id.clone(),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(credited.balance, 20_000_000);
        assert_eq!(credited.fees, 20_000_000);
        assert_eq!(credited.produced_blocks, 1);
        assert_eq!(credited.block_id, block.id);
        // Credits never clear virginity.
        assert!(credited.virgin);
    }

    /// The payload cap excludes the tail of the sorted candidate set, and
    /// excluded transactions stay pending.
    #[tokio::test]
    async fn test_payload_cap_leaves_tail_pending() {
        let pool = Arc::new(MemoryTransactionPool::new());
        for seed in 1u64..=4 {
            pool.add(transfer(seed, 100, 1));
        }
        let sink = Arc::new(RecordingSink {
            blocks: Mutex::new(vec![]),
        });
        // 32-byte identifiers: a 100-byte cap fits exactly three.
        let config = BlockProductionConfig {
            max_payload_length: 100,
            ..Default::default()
        };
        let service = forging_service(pool.clone(), sink, config);

        let block = service.forge_at(0, None).await.unwrap().unwrap();
        assert_eq!(block.number_of_transactions, 3);
        assert_eq!(block.payload_length, 96);
        assert_eq!(pool.len(), 1);
    }

    /// Child blocks chain through the derived decimal id.
    #[tokio::test]
    async fn test_child_block_references_parent_id() {
        let factory = factory(Default::default());
        let keypair = forger();

        let genesis = factory
            .create(BlockData {
                keypair: &keypair,
                timestamp: 0,
                previous_block: None,
                transactions: vec![],
            })
            .unwrap();
        assert_eq!(genesis.height, 1);

        let child = factory
            .create(BlockData {
                keypair: &keypair,
                timestamp: 8,
                previous_block: Some(&genesis),
                transactions: vec![],
            })
            .unwrap();
        assert_eq!(child.height, 2);
        assert_eq!(child.previous_block, genesis.id);

        // The parent id round-trips through the 8-byte wire encoding.
        let codec = codec();
        let child_bytes = codec.bytes(&child, false).unwrap();
        let parent_id: u64 = genesis.id.unwrap().parse().unwrap();
        assert_eq!(&child_bytes[12..20], &parent_id.to_be_bytes());
    }

    /// Stored blocks round-trip their transaction payload through JSON.
    #[tokio::test]
    async fn test_block_json_roundtrip() {
        let pool = Arc::new(MemoryTransactionPool::new());
        pool.add(transfer(9, 500, 10));
        let sink = Arc::new(RecordingSink {
            blocks: Mutex::new(vec![]),
        });
        let service = forging_service(pool, sink, Default::default());

        let block = service.forge_at(0, None).await.unwrap().unwrap();
        let json = serde_json::to_string(&block).unwrap();
        let restored: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, block);
        assert!(json.contains("\"previousBlock\"") || block.previous_block.is_none());
    }
}
