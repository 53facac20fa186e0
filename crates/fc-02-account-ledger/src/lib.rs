//! # Forge-Chain - Account Ledger (Subsystem 02)
//!
//! **Bounded Context:** Account state mutation
//!
//! ## Purpose
//!
//! The single point of mutation for account records. Every balance change,
//! vote and multisignature membership edit funnels through
//! [`AccountLedger::merge`], which applies one diff as one atomic unit:
//! the scalar update and all relation-table edits commit together or not
//! at all.
//!
//! ## Key Design Principles
//!
//! 1. **Typed diffs**: every editable field has a statically-typed slot in
//!    [`AccountDiff`]; field kinds (string / flag / numeric / relation set)
//!    are resolved by the type system, never by runtime value inspection
//! 2. **Set semantics for relations**: adding a present member or removing
//!    an absent one is a conflict, not a no-op
//! 3. **Single writer per address**: merges to one address are serialized;
//!    merges to distinct addresses may run in parallel
//! 4. **Storage stays behind a port**: callers speak [`AccountFilter`],
//!    never storage-engine syntax
//!
//! ## Module Structure
//!
//! - [`domain`]: account entity, diff types, set-delta codec, filters
//! - [`ports`]: the [`AccountStore`] contract the backing store implements
//! - [`adapters`]: in-memory reference store
//! - [`service`]: the [`AccountLedger`] itself

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;
mod validation;

pub use adapters::MemoryAccountStore;
pub use domain::{
    set_diff, Account, AccountDiff, AccountFilter, DiffAction, DiffConflict, DiffToken,
    LedgerError, RelationRecord, Result, SetDelta, SortBy, SortField,
};
pub use ports::{AccountStore, MergeBatch, Relation, RelationRow, ScalarOp, StoreError};
pub use service::AccountLedger;
