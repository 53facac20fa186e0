//! Outbound ports (driven side - SPI).

use crate::error::Result;
use shared_types::Transaction;

/// Port: the external transaction-validation collaborator.
///
/// The block codec consumes, never reimplements, transaction semantics:
/// type-specific schema checks happen behind this trait, and the payload
/// hash is computed over the identifier bytes it reports.
pub trait TransactionCodec: Send + Sync {
    /// Validate and normalize one transaction, reporting every violated
    /// constraint on failure.
    fn object_normalize(&self, transaction: Transaction) -> Result<Transaction>;

    /// The canonical identifier bytes hashed into the block payload.
    fn identifier_bytes(&self, transaction: &Transaction) -> Result<Vec<u8>>;
}
