//! Canonical block serialization and derived digests.

use crate::error::{CodecError, Result};
use crate::ports::TransactionCodec;
use crate::validation::validate_block;
use rayon::prelude::*;
use shared_crypto::{sha256, Hash, KeyPair, PublicKey, Signature};
use shared_types::constants::{PAYLOAD_HASH_LENGTH, PUBLIC_KEY_LENGTH};
use shared_types::Block;
use std::sync::Arc;
use tracing::debug;

/// Byte length of the unsigned canonical layout.
const UNSIGNED_LAYOUT_LENGTH: usize = 4 + 4 + 4 + 8 + 4 + 8 + 8 + 8 + 4 + 32 + 33;

/// Canonical, versioned, fixed-layout binary codec for blocks.
///
/// Holds the transaction collaborator used to normalize contained
/// transactions; everything else is pure and parallel-safe.
pub struct BlockCodec {
    transaction_codec: Arc<dyn TransactionCodec>,
}

impl BlockCodec {
    /// Build a codec around the transaction collaborator.
    pub fn new(transaction_codec: Arc<dyn TransactionCodec>) -> Self {
        Self { transaction_codec }
    }

    /// The transaction collaborator this codec normalizes with.
    pub fn transaction_codec(&self) -> Arc<dyn TransactionCodec> {
        Arc::clone(&self.transaction_codec)
    }

    /// Canonical bytes of `block`'s signable fields.
    ///
    /// With `include_signature` the DER signature is appended; the block
    /// must then already carry one.
    pub fn bytes(&self, block: &Block, include_signature: bool) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(UNSIGNED_LAYOUT_LENGTH + 72);

        out.extend_from_slice(&block.version.to_le_bytes());
        out.extend_from_slice(&block.timestamp.to_le_bytes());

        let height = u32::try_from(block.height).map_err(|_| CodecError::InvalidNumber {
            field: "height",
            value: block.height.to_string(),
        })?;
        out.extend_from_slice(&height.to_le_bytes());

        // Parent id as an 8-byte big-endian magnitude; genesis is all-zero.
        match &block.previous_block {
            Some(id) => {
                let id: u64 = id.parse().map_err(|_| CodecError::InvalidNumber {
                    field: "previousBlock",
                    value: id.clone(),
                })?;
                out.extend_from_slice(&id.to_be_bytes());
            }
            None => out.extend_from_slice(&[0u8; 8]),
        }

        out.extend_from_slice(&block.number_of_transactions.to_le_bytes());
        out.extend_from_slice(&block.total_amount.to_le_bytes());
        out.extend_from_slice(&block.total_fee.to_le_bytes());
        out.extend_from_slice(&block.reward.to_le_bytes());
        out.extend_from_slice(&block.payload_length.to_le_bytes());

        out.extend_from_slice(&decode_fixed(
            "payloadHash",
            &block.payload_hash,
            PAYLOAD_HASH_LENGTH,
        )?);
        out.extend_from_slice(&decode_fixed(
            "generatorPublicKey",
            &block.generator_public_key,
            PUBLIC_KEY_LENGTH,
        )?);

        if include_signature {
            let signature = block
                .block_signature
                .as_deref()
                .ok_or(CodecError::MissingField("blockSignature"))?;
            let raw = hex::decode(signature).map_err(|e| CodecError::InvalidHex {
                field: "blockSignature",
                reason: e.to_string(),
            })?;
            out.extend_from_slice(&raw);
        }

        Ok(out)
    }

    /// [`bytes`](Self::bytes) with the historical default: the signature is
    /// included exactly when the block carries one.
    pub fn bytes_auto(&self, block: &Block) -> Result<Vec<u8>> {
        self.bytes(block, block.block_signature.is_some())
    }

    /// SHA-256 digest of the unsigned layout: the value that gets signed.
    pub fn hash(&self, block: &Block) -> Result<Hash> {
        Ok(sha256(&self.bytes(block, false)?))
    }

    /// Sign `block`'s hash with the forging keypair, returning the hex DER
    /// signature.
    pub fn sign(&self, block: &Block, keypair: &KeyPair) -> Result<String> {
        let hash = self.hash(block)?;
        Ok(keypair.sign(&hash).to_hex())
    }

    /// Verify the stored signature against `generator_public_key`.
    ///
    /// An invalid or malformed signature/key on untrusted data reports
    /// `false`; malformed block payload fields (which make the hash itself
    /// uncomputable) are fatal.
    pub fn verify_signature(&self, block: &Block) -> Result<bool> {
        let hash = self.hash(block)?;

        let Some(signature_hex) = block.block_signature.as_deref() else {
            return Ok(false);
        };
        let Ok(signature) = Signature::from_hex(signature_hex) else {
            debug!(id = ?block.id, "unparseable block signature");
            return Ok(false);
        };
        let Ok(public_key) = PublicKey::from_hex(&block.generator_public_key) else {
            debug!(id = ?block.id, "unparseable generator public key");
            return Ok(false);
        };

        Ok(public_key.verify(&hash, &signature).is_ok())
    }

    /// Verify many blocks concurrently, e.g. over historical batches
    /// during sync. Order is preserved.
    pub fn verify_signatures_parallel(&self, blocks: &[Block]) -> Result<Vec<bool>> {
        blocks
            .par_iter()
            .map(|block| self.verify_signature(block))
            .collect()
    }

    /// Derive the block's decimal id from its signed bytes.
    ///
    /// First 8 digest bytes, byte-reversed, read as a big-endian u64 and
    /// rendered in decimal. Used verbatim as the `previousBlock` encoding
    /// of any child block.
    pub fn id(&self, block: &Block) -> Result<String> {
        let hash = sha256(&self.bytes(block, true)?);
        let mut temp = [0u8; 8];
        for (i, byte) in temp.iter_mut().enumerate() {
            *byte = hash[7 - i];
        }
        Ok(u64::from_be_bytes(temp).to_string())
    }

    /// Validate the full block schema and normalize every contained
    /// transaction through the transaction collaborator.
    ///
    /// Fails with the complete violation list; never partially normalizes.
    pub fn object_normalize(&self, block: Block) -> Result<Block> {
        let violations = validate_block(&block);
        if !violations.is_empty() {
            return Err(CodecError::SchemaViolation(violations));
        }

        let mut block = block;
        let transactions = std::mem::take(&mut block.transactions);
        let mut normalized = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            normalized.push(self.transaction_codec.object_normalize(transaction)?);
        }
        block.transactions = normalized;
        Ok(block)
    }
}

fn decode_fixed(field: &'static str, value: &str, expected: usize) -> Result<Vec<u8>> {
    let raw = hex::decode(value).map_err(|e| CodecError::InvalidHex {
        field,
        reason: e.to_string(),
    })?;
    if raw.len() != expected {
        return Err(CodecError::InvalidLength {
            field,
            expected,
            actual: raw.len(),
        });
    }
    Ok(raw)
}
