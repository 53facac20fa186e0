//! # Forge-Chain - Block Production (Subsystem 04)
//!
//! **Bounded Context:** Candidate block assembly & forging
//!
//! ## Purpose
//!
//! Assembles a deterministic, maximally-packed candidate block from the
//! pending transaction set and drives it through signing, normalization and
//! id derivation. The async [`ForgingService`] gates assembly on the slot
//! clock's forging window.
//!
//! ## Key Design Principles
//!
//! 1. **Deterministic packing**: candidates sort by `(type, id)` and the
//!    accepted set is a prefix of that order, so every honest node packs
//!    identically from the same pending set
//! 2. **Silent back-pressure**: a transaction that would overflow the
//!    payload cap is left pending for a future block, not rejected
//! 3. **Non-reentrant forging**: assembly reads a shared snapshot of the
//!    pool and never runs concurrently with itself
//!
//! ## Module Structure
//!
//! - [`domain`]: the [`BlockFactory`] packing algorithm
//! - [`ports`]: transaction pool, block sink and reward schedule contracts
//! - [`adapters`]: milestone reward schedule, in-memory pool
//! - [`service`]: the slot-gated [`ForgingService`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
mod config;
pub mod domain;
mod error;
pub mod ports;
pub mod service;

pub use adapters::{MemoryTransactionPool, MilestoneRewardSchedule};
pub use config::BlockProductionConfig;
pub use domain::{BlockData, BlockFactory};
pub use error::{ProductionError, Result};
pub use ports::{BlockSink, RewardSchedule, TransactionPool};
pub use service::ForgingService;

/// Protocol version stamped into every assembled block.
pub const BLOCK_VERSION: u32 = 0;
