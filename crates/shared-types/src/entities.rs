//! Block and transaction entities.
//!
//! These are the in-memory records the codec serializes and the ledger
//! consumes. Optional fields are absent (not null) on the wire; ids are the
//! decimal strings derived by the codec, never assigned by hand.

use serde::{Deserialize, Serialize};

/// A block as assembled by block production and accepted by consensus.
///
/// Lifecycle: built in memory, signed once, hashed to obtain `id`, then
/// immutable. `previous_block`, `block_signature` and `id` are `None` only
/// during assembly (and `previous_block` stays `None` for genesis).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Protocol version of the byte layout. Currently always 0.
    pub version: u32,

    /// Seconds since the chain epoch, slot-aligned.
    pub timestamp: u32,

    /// Chain height: 1 for genesis, parent height + 1 otherwise.
    pub height: u64,

    /// Id of the parent block; `None` for genesis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_block: Option<String>,

    /// Number of transactions included in the payload.
    pub number_of_transactions: u32,

    /// Sum of included transaction amounts, in base units.
    pub total_amount: u64,

    /// Sum of included transaction fees, in base units.
    pub total_fee: u64,

    /// Forging reward for this height, in base units.
    pub reward: u64,

    /// Exact byte length of the payload (summed identifier bytes).
    pub payload_length: u32,

    /// SHA-256 digest over included transaction identifiers, hex encoded.
    pub payload_hash: String,

    /// Compressed public key of the forging delegate, hex encoded.
    pub generator_public_key: String,

    /// DER signature over the unsigned block hash, hex encoded.
    /// Absent until the block has been signed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_signature: Option<String>,

    /// Included transactions, in payload order.
    pub transactions: Vec<Transaction>,

    /// Derived decimal id. Absent until derived from the signed bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Block {
    /// Total base units created for the forger by this block.
    pub fn total_forged(&self) -> u64 {
        self.total_fee.saturating_add(self.reward)
    }

    /// Whether this block claims the genesis position.
    pub fn is_genesis(&self) -> bool {
        self.previous_block.is_none()
    }
}

/// Core projection of a transaction.
///
/// Type-specific payloads, fee policy and full signature validation live
/// behind the transaction-codec port; the core only needs the identifier,
/// ordering key and monetary totals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Canonical identifier: lowercase hex digest of the signed transaction
    /// bytes. Its decoded bytes are what the block payload hashes.
    pub id: String,

    /// Transaction type discriminant (primary ordering key).
    #[serde(rename = "type")]
    pub tx_type: u8,

    /// Transferred amount in base units.
    pub amount: u64,

    /// Fee in base units.
    pub fee: u64,

    /// Compressed public key of the sender, hex encoded.
    pub sender_public_key: String,

    /// Sender signature, hex encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_block() -> Block {
        Block {
            version: 0,
            timestamp: 32,
            height: 2,
            previous_block: Some("6524861224470851795".to_string()),
            number_of_transactions: 0,
            total_amount: 0,
            total_fee: 10_000_000,
            reward: 200_000_000,
            payload_length: 0,
            payload_hash: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
                .to_string(),
            generator_public_key:
                "0279b2b938dcb26b0055c79ef02d188fbaa8d0f1b7bafa2d72aed65064e966ad4c".to_string(),
            block_signature: None,
            transactions: vec![],
            id: None,
        }
    }

    #[test]
    fn test_total_forged() {
        let block = sample_block();
        assert_eq!(block.total_forged(), 210_000_000);
    }

    #[test]
    fn test_genesis_detection() {
        let mut block = sample_block();
        assert!(!block.is_genesis());
        block.previous_block = None;
        assert!(block.is_genesis());
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_string(&sample_block()).unwrap();
        assert!(json.contains("\"previousBlock\""));
        assert!(json.contains("\"generatorPublicKey\""));
        // Unsigned block: absent fields are stripped, not null.
        assert!(!json.contains("\"blockSignature\""));
    }

    #[test]
    fn test_transaction_type_serializes_as_type() {
        let tx = Transaction {
            id: "aa".repeat(32),
            tx_type: 0,
            amount: 100,
            fee: 10_000_000,
            sender_public_key: "02".repeat(33),
            signature: None,
        };
        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains("\"type\":0"));
    }
}
