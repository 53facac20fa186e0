//! The relational storage contract behind the ledger.
//!
//! A backing store must offer keyed upsert/read/delete, filtered reads, and
//! atomic multi-statement execution of a merge batch: every relation-table
//! edit plus the scalar update commits together, or nothing does.

use crate::domain::{Account, AccountFilter};
use thiserror::Error;

/// Numeric account columns addressable by a merge batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum NumericField {
    Balance,
    UBalance,
    Fees,
    Rewards,
    ProducedBlocks,
    MissedBlocks,
    Multimin,
    UMultimin,
    Multilifetime,
    UMultilifetime,
}

/// String account columns addressable by a merge batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum StringField {
    Username,
    UUsername,
    BlockId,
}

/// Boolean account columns addressable by a merge batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum FlagField {
    IsDelegate,
    UIsDelegate,
    SecondSignature,
    USecondSignature,
    NameExist,
    UNameExist,
    Virgin,
}

/// One scalar statement of a merge batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScalarOp {
    /// Replace a string column.
    SetString(StringField, String),
    /// Replace a flag column.
    SetFlag(FlagField, bool),
    /// Add to a numeric column; overflow or a supply-cap breach aborts the
    /// batch.
    Increment(NumericField, u64),
    /// Subtract from a numeric column; underflow aborts the batch.
    Decrement(NumericField, u64),
}

/// The relation tables hanging off the account row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Relation {
    Delegates,
    UDelegates,
    Multisignatures,
    UMultisignatures,
}

/// One relation-table row touched by a merge batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelationRow {
    /// Which relation table.
    pub relation: Relation,
    /// The related member.
    pub dependent_id: String,
    /// Extra column values for stores that persist them.
    pub columns: Vec<(String, String)>,
}

/// Everything one merge commits atomically.
#[derive(Clone, Debug, Default)]
pub struct MergeBatch {
    /// Scalar statements, applied in order.
    pub scalars: Vec<ScalarOp>,
    /// Relation rows to insert.
    pub inserts: Vec<RelationRow>,
    /// Relation rows to delete.
    pub removes: Vec<RelationRow>,
}

impl MergeBatch {
    /// Whether the batch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.inserts.is_empty() && self.removes.is_empty()
    }
}

/// Store-level failures. The ledger wraps these; raw storage errors never
/// reach API callers verbatim.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A batch statement violated a constraint; nothing was committed.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// No account row for the given address.
    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    /// The storage engine itself failed.
    #[error("Storage failure: {0}")]
    Backend(String),
}

/// Account storage abstraction.
pub trait AccountStore: Send + Sync {
    /// Read one account by address.
    fn get(&self, address: &str) -> Result<Option<Account>, StoreError>;

    /// Insert or fully replace an account row.
    fn upsert(&self, account: Account) -> Result<(), StoreError>;

    /// Delete by address; returns whether a row existed.
    fn delete(&self, address: &str) -> Result<bool, StoreError>;

    /// Apply a merge batch to one account as a single transaction and
    /// return the post-state row. On any error the account is unchanged.
    fn apply_merge(&self, address: &str, batch: MergeBatch) -> Result<Account, StoreError>;

    /// Filtered, sorted, paginated read.
    fn query(&self, filter: &AccountFilter) -> Result<Vec<Account>, StoreError>;
}
