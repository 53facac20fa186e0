//! Block schema checks.
//!
//! Collects every violated constraint so a rejected block can be diagnosed
//! from one log line, without leaking anything storage-internal.

use shared_types::constants::{
    MAX_PAYLOAD_LENGTH, PAYLOAD_HASH_LENGTH, PUBLIC_KEY_LENGTH, TOTAL_SUPPLY,
};
use shared_types::Block;

fn check_hex(violations: &mut Vec<String>, field: &str, value: &str, expected: Option<usize>) {
    match hex::decode(value) {
        Ok(raw) => {
            if let Some(expected) = expected {
                if raw.len() != expected {
                    violations.push(format!(
                        "{field} must be {expected} bytes, got {}",
                        raw.len()
                    ));
                }
            }
        }
        Err(_) => violations.push(format!("{field} must be a hex string")),
    }
}

fn check_id(violations: &mut Vec<String>, field: &str, value: &str) {
    if value.parse::<u64>().is_err() {
        violations.push(format!("{field} '{value}' is not a decimal id"));
    }
}

/// All schema violations of a block record; empty means valid.
pub fn validate_block(block: &Block) -> Vec<String> {
    let mut violations = Vec::new();

    match block.block_signature.as_deref() {
        Some(signature) => check_hex(&mut violations, "blockSignature", signature, None),
        None => violations.push("blockSignature is required".to_string()),
    }

    check_hex(
        &mut violations,
        "generatorPublicKey",
        &block.generator_public_key,
        Some(PUBLIC_KEY_LENGTH),
    );
    check_hex(
        &mut violations,
        "payloadHash",
        &block.payload_hash,
        Some(PAYLOAD_HASH_LENGTH),
    );

    if block.payload_length > MAX_PAYLOAD_LENGTH {
        violations.push(format!(
            "payloadLength {} above maximum {MAX_PAYLOAD_LENGTH}",
            block.payload_length
        ));
    }

    if block.total_amount > TOTAL_SUPPLY {
        violations.push(format!("totalAmount {} exceeds total supply", block.total_amount));
    }
    if block.total_fee > TOTAL_SUPPLY {
        violations.push(format!("totalFee {} exceeds total supply", block.total_fee));
    }

    if block.number_of_transactions as usize != block.transactions.len() {
        violations.push(format!(
            "numberOfTransactions {} does not match payload of {}",
            block.number_of_transactions,
            block.transactions.len()
        ));
    }

    if block.height == 0 {
        violations.push("height must be at least 1".to_string());
    }
    match &block.previous_block {
        Some(id) => check_id(&mut violations, "previousBlock", id),
        None => {
            if block.height != 1 {
                violations.push(format!(
                    "previousBlock is required at height {}",
                    block.height
                ));
            }
        }
    }
    if let Some(id) = &block.id {
        check_id(&mut violations, "id", id);
    }

    for index in 0..block.transactions.len() {
        let id = &block.transactions[index].id;
        if block.transactions[index + 1..].iter().any(|t| &t.id == id) {
            violations.push(format!("transactions contain duplicate '{id}'"));
        }
    }

    violations
}
