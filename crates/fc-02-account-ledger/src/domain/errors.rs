//! Error types for the account ledger.

use thiserror::Error;

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// A relation-set edit that contradicts the existing membership.
///
/// Signals a forged or stale diff; the whole merge it belongs to is
/// rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Conflicting '{action}{member}' against current relation set")]
pub struct DiffConflict {
    /// The sign of the offending token.
    pub action: super::DiffAction,
    /// The member the token named.
    pub member: String,
}

/// Errors that can occur mutating or reading account state.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// One or more schema constraints violated; every violation is listed.
    #[error("Failed to validate account schema: {}", .0.join(", "))]
    SchemaViolation(Vec<String>),

    /// Numeric diff outside the representable protocol range.
    #[error("Encountered unsane number for {field}: {value}")]
    InvalidNumber {
        /// The field the delta targeted.
        field: &'static str,
        /// The offending delta.
        value: i64,
    },

    /// Malformed public key supplied with a diff or upsert.
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Relation-set add/remove inconsistent with current state.
    #[error(transparent)]
    DiffConflict(#[from] DiffConflict),

    /// The atomic mutation could not commit; account state is unchanged.
    #[error("Merge failed: {0}")]
    MergeFailed(String),

    /// A read could not be served by the backing store.
    #[error("Query failed: {0}")]
    QueryFailed(String),
}
