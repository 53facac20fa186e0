//! Transaction codec for the built-in transfer shape.
//!
//! Type-specific asset validation lives with the owning transaction type;
//! this adapter covers the fields every transaction shares.

use crate::error::{CodecError, Result};
use crate::ports::TransactionCodec;
use shared_types::constants::{PUBLIC_KEY_LENGTH, TOTAL_SUPPLY};
use shared_types::Transaction;

/// Length in bytes of a transaction identifier digest.
const IDENTIFIER_LENGTH: usize = 32;

/// Schema validation and identifier bytes for transfer transactions.
#[derive(Default)]
pub struct TransferTransactionCodec;

impl TransferTransactionCodec {
    /// Create the adapter.
    pub fn new() -> Self {
        Self
    }

    fn validate(transaction: &Transaction) -> Vec<String> {
        let mut violations = Vec::new();

        match hex::decode(&transaction.id) {
            Ok(raw) if raw.len() == IDENTIFIER_LENGTH => {}
            Ok(raw) => violations.push(format!(
                "id must be {IDENTIFIER_LENGTH} bytes, got {}",
                raw.len()
            )),
            Err(_) => violations.push("id must be a hex string".to_string()),
        }

        match hex::decode(&transaction.sender_public_key) {
            Ok(raw) if raw.len() == PUBLIC_KEY_LENGTH => {}
            Ok(raw) => violations.push(format!(
                "senderPublicKey must be {PUBLIC_KEY_LENGTH} bytes, got {}",
                raw.len()
            )),
            Err(_) => violations.push("senderPublicKey must be a hex string".to_string()),
        }

        if transaction.amount > TOTAL_SUPPLY {
            violations.push(format!("amount {} exceeds total supply", transaction.amount));
        }
        if transaction.fee > TOTAL_SUPPLY {
            violations.push(format!("fee {} exceeds total supply", transaction.fee));
        }

        if let Some(signature) = &transaction.signature {
            if hex::decode(signature).is_err() {
                violations.push("signature must be a hex string".to_string());
            }
        }

        violations
    }
}

impl TransactionCodec for TransferTransactionCodec {
    fn object_normalize(&self, transaction: Transaction) -> Result<Transaction> {
        let violations = Self::validate(&transaction);
        if violations.is_empty() {
            Ok(transaction)
        } else {
            Err(CodecError::SchemaViolation(violations))
        }
    }

    fn identifier_bytes(&self, transaction: &Transaction) -> Result<Vec<u8>> {
        let raw = hex::decode(&transaction.id).map_err(|e| CodecError::InvalidHex {
            field: "id",
            reason: e.to_string(),
        })?;
        if raw.len() != IDENTIFIER_LENGTH {
            return Err(CodecError::InvalidLength {
                field: "id",
                expected: IDENTIFIER_LENGTH,
                actual: raw.len(),
            });
        }
        Ok(raw)
    }
}
