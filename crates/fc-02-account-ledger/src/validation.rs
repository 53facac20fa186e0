//! Account schema checks.
//!
//! Validation collects every violated constraint before failing, so a
//! rejected account can be diagnosed from a single log line.

use crate::domain::{Account, LedgerError, Result};
use shared_types::constants::{
    MAX_MULTISIG_KEYSGROUP, MAX_MULTISIG_LIFETIME, MAX_USERNAME_LENGTH, MIN_MULTISIG_LIFETIME,
    MIN_USERNAME_LENGTH, PUBLIC_KEY_LENGTH, TOTAL_SUPPLY,
};

/// Require a well-formed hex public key of the expected length when one is
/// supplied. `None` passes: keys are optional until first use.
pub fn verify_public_key(public_key: Option<&str>) -> Result<()> {
    let Some(key) = public_key else {
        return Ok(());
    };
    let raw = hex::decode(key)
        .map_err(|_| LedgerError::InvalidPublicKey("must be a hex string".into()))?;
    if raw.len() != PUBLIC_KEY_LENGTH {
        return Err(LedgerError::InvalidPublicKey(format!(
            "must be {} bytes long, got {}",
            PUBLIC_KEY_LENGTH,
            raw.len()
        )));
    }
    Ok(())
}

fn valid_username(username: &str) -> bool {
    (MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&username.len())
        && username
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b"!@$&_.".contains(&b))
}

fn check_key(violations: &mut Vec<String>, field: &str, key: Option<&str>) {
    if let Some(key) = key {
        match hex::decode(key) {
            Ok(raw) if raw.len() == PUBLIC_KEY_LENGTH => {}
            Ok(raw) => violations.push(format!(
                "{field} must be {PUBLIC_KEY_LENGTH} bytes, got {}",
                raw.len()
            )),
            Err(_) => violations.push(format!("{field} must be a hex string")),
        }
    }
}

fn check_relation(violations: &mut Vec<String>, field: &str, members: Option<&[String]>) {
    let Some(members) = members else { return };
    if members.is_empty() {
        violations.push(format!("{field} must hold rows or be absent"));
    }
    for pair in 0..members.len() {
        if members[pair + 1..].contains(&members[pair]) {
            violations.push(format!("{field} contains duplicate '{}'", members[pair]));
        }
    }
}

/// All schema violations of a full account record; empty means valid.
pub fn validate_account(account: &Account) -> Vec<String> {
    let mut violations = Vec::new();

    if !shared_crypto::is_valid_address(&account.address) {
        violations.push(format!("address '{}' is malformed", account.address));
    }

    check_key(&mut violations, "publicKey", account.public_key.as_deref());
    check_key(
        &mut violations,
        "secondPublicKey",
        account.second_public_key.as_deref(),
    );

    for (field, username) in [
        ("username", account.username.as_deref()),
        ("u_username", account.u_username.as_deref()),
    ] {
        if let Some(username) = username {
            if !valid_username(username) {
                violations.push(format!("{field} '{username}' is malformed"));
            }
        }
    }

    for (field, balance) in [("balance", account.balance), ("u_balance", account.u_balance)] {
        if balance > TOTAL_SUPPLY {
            violations.push(format!("{field} {balance} exceeds total supply"));
        }
    }

    for (field, value) in [("multimin", account.multimin), ("u_multimin", account.u_multimin)] {
        if value > MAX_MULTISIG_KEYSGROUP {
            violations.push(format!("{field} {value} above maximum"));
        }
    }
    for (field, value) in [
        ("multilifetime", account.multilifetime),
        ("u_multilifetime", account.u_multilifetime),
    ] {
        if value != 0 && !(MIN_MULTISIG_LIFETIME..=MAX_MULTISIG_LIFETIME).contains(&value) {
            violations.push(format!("{field} {value} outside allowed range"));
        }
    }

    if let Some(block_id) = &account.block_id {
        if block_id.is_empty()
            || block_id.len() > 20
            || !block_id.bytes().all(|b| b.is_ascii_digit())
        {
            violations.push(format!("blockId '{block_id}' is malformed"));
        }
    }

    check_relation(&mut violations, "delegates", account.delegates.as_deref());
    check_relation(&mut violations, "u_delegates", account.u_delegates.as_deref());
    check_relation(
        &mut violations,
        "multisignatures",
        account.multisignatures.as_deref(),
    );
    check_relation(
        &mut violations,
        "u_multisignatures",
        account.u_multisignatures.as_deref(),
    );

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_public_key_accepts_absent() {
        assert!(verify_public_key(None).is_ok());
    }

    #[test]
    fn test_verify_public_key_rejects_bad_hex() {
        assert!(verify_public_key(Some("zz")).is_err());
    }

    #[test]
    fn test_verify_public_key_rejects_wrong_length() {
        assert!(verify_public_key(Some("02ab")).is_err());
        assert!(verify_public_key(Some(&"02".repeat(33))).is_ok());
    }

    #[test]
    fn test_validate_account_collects_all_violations() {
        let mut account = Account::new("not-an-address");
        account.username = Some("UPPER".into());
        account.multimin = 99;
        let violations = validate_account(&account);
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_valid_account_passes() {
        let mut account = Account::new("18160565574430594874F");
        account.username = Some("genesis_1".into());
        account.public_key = Some("02".repeat(33));
        assert!(validate_account(&account).is_empty());
    }

    #[test]
    fn test_empty_relation_set_is_a_violation() {
        let mut account = Account::new("18160565574430594874F");
        account.delegates = Some(vec![]);
        assert_eq!(validate_account(&account).len(), 1);
    }
}
