//! # Forge-Chain - Shared Types
//!
//! Single source of truth for the entities and protocol constants shared by
//! every subsystem crate.
//!
//! ## Contents
//!
//! - [`entities`]: the [`Block`] and [`Transaction`] records as they travel
//!   between block production, the codec and the ledger
//! - [`constants`]: chain parameters (epoch, slot duration, payload cap,
//!   supply cap, reward milestones)
//!
//! Field names serialize in the wire's camelCase form so that encoded blocks
//! round-trip against the historical chain data unchanged.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constants;
pub mod entities;

pub use entities::{Block, Transaction};
