//! In-memory implementation of [`AccountStore`].
//!
//! The relation "tables" live inside the account rows; extra record columns
//! are accepted and dropped, since only a persistent engine has anywhere to
//! put them. Batch application is staged on a clone, so a failed statement
//! leaves the stored row untouched.

use crate::domain::{Account, AccountFilter, SortField};
use crate::ports::{
    AccountStore, FlagField, MergeBatch, NumericField, Relation, RelationRow, ScalarOp,
    StoreError, StringField,
};
use parking_lot::RwLock;
use shared_types::constants::TOTAL_SUPPLY;
use std::collections::HashMap;

/// In-memory account store for tests and single-process nodes.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryAccountStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    /// Whether the store holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

fn numeric_mut(account: &mut Account, field: NumericField) -> NumericSlot<'_> {
    match field {
        NumericField::Balance => NumericSlot::Wide(&mut account.balance),
        NumericField::UBalance => NumericSlot::Wide(&mut account.u_balance),
        NumericField::Fees => NumericSlot::Wide(&mut account.fees),
        NumericField::Rewards => NumericSlot::Wide(&mut account.rewards),
        NumericField::ProducedBlocks => NumericSlot::Wide(&mut account.produced_blocks),
        NumericField::MissedBlocks => NumericSlot::Wide(&mut account.missed_blocks),
        NumericField::Multimin => NumericSlot::Narrow(&mut account.multimin),
        NumericField::UMultimin => NumericSlot::Narrow(&mut account.u_multimin),
        NumericField::Multilifetime => NumericSlot::Narrow(&mut account.multilifetime),
        NumericField::UMultilifetime => NumericSlot::Narrow(&mut account.u_multilifetime),
    }
}

/// Numeric account columns come in two widths.
enum NumericSlot<'a> {
    Wide(&'a mut u64),
    Narrow(&'a mut u32),
}

impl NumericSlot<'_> {
    fn increment(&mut self, amount: u64, capped: bool) -> Result<(), StoreError> {
        match self {
            NumericSlot::Wide(slot) => {
                let next = slot
                    .checked_add(amount)
                    .ok_or_else(|| StoreError::ConstraintViolation("numeric overflow".into()))?;
                if capped && next > TOTAL_SUPPLY {
                    return Err(StoreError::ConstraintViolation(
                        "balance exceeds total supply".into(),
                    ));
                }
                **slot = next;
            }
            NumericSlot::Narrow(slot) => {
                let amount = u32::try_from(amount)
                    .map_err(|_| StoreError::ConstraintViolation("numeric overflow".into()))?;
                **slot = slot
                    .checked_add(amount)
                    .ok_or_else(|| StoreError::ConstraintViolation("numeric overflow".into()))?;
            }
        }
        Ok(())
    }

    fn decrement(&mut self, amount: u64) -> Result<(), StoreError> {
        match self {
            NumericSlot::Wide(slot) => {
                **slot = slot
                    .checked_sub(amount)
                    .ok_or_else(|| StoreError::ConstraintViolation("numeric underflow".into()))?;
            }
            NumericSlot::Narrow(slot) => {
                let amount = u32::try_from(amount)
                    .map_err(|_| StoreError::ConstraintViolation("numeric underflow".into()))?;
                **slot = slot
                    .checked_sub(amount)
                    .ok_or_else(|| StoreError::ConstraintViolation("numeric underflow".into()))?;
            }
        }
        Ok(())
    }
}

fn relation_mut(account: &mut Account, relation: Relation) -> &mut Option<Vec<String>> {
    match relation {
        Relation::Delegates => &mut account.delegates,
        Relation::UDelegates => &mut account.u_delegates,
        Relation::Multisignatures => &mut account.multisignatures,
        Relation::UMultisignatures => &mut account.u_multisignatures,
    }
}

fn apply_scalar(account: &mut Account, op: &ScalarOp) -> Result<(), StoreError> {
    match op {
        ScalarOp::SetString(field, value) => match field {
            StringField::Username => {
                if account.username.as_deref().is_some_and(|u| u != value.as_str()) {
                    return Err(StoreError::ConstraintViolation(
                        "username is immutable once set".into(),
                    ));
                }
                account.username = Some(value.clone());
            }
            StringField::UUsername => {
                if account.u_username.as_deref().is_some_and(|u| u != value.as_str()) {
                    return Err(StoreError::ConstraintViolation(
                        "u_username is immutable once set".into(),
                    ));
                }
                account.u_username = Some(value.clone());
            }
            StringField::BlockId => account.block_id = Some(value.clone()),
        },
        ScalarOp::SetFlag(field, value) => match field {
            FlagField::IsDelegate => account.is_delegate = *value,
            FlagField::UIsDelegate => account.u_is_delegate = *value,
            FlagField::SecondSignature => account.second_signature = *value,
            FlagField::USecondSignature => account.u_second_signature = *value,
            FlagField::NameExist => account.name_exist = *value,
            FlagField::UNameExist => account.u_name_exist = *value,
            FlagField::Virgin => {
                if account.virgin || !*value {
                    account.virgin = *value;
                } else {
                    return Err(StoreError::ConstraintViolation(
                        "virginity cannot be restored".into(),
                    ));
                }
            }
        },
        ScalarOp::Increment(field, amount) => {
            let capped = matches!(field, NumericField::Balance | NumericField::UBalance);
            numeric_mut(account, *field).increment(*amount, capped)?;
        }
        ScalarOp::Decrement(field, amount) => {
            numeric_mut(account, *field).decrement(*amount)?;
        }
    }
    Ok(())
}

fn apply_insert(account: &mut Account, row: &RelationRow) -> Result<(), StoreError> {
    let set = relation_mut(account, row.relation);
    let members = set.get_or_insert_with(Vec::new);
    if members.iter().any(|m| m == &row.dependent_id) {
        return Err(StoreError::ConstraintViolation(format!(
            "duplicate relation row '{}'",
            row.dependent_id
        )));
    }
    members.push(row.dependent_id.clone());
    Ok(())
}

fn apply_remove(account: &mut Account, row: &RelationRow) -> Result<(), StoreError> {
    let set = relation_mut(account, row.relation);
    let Some(members) = set.as_mut() else {
        return Err(StoreError::ConstraintViolation(format!(
            "missing relation row '{}'",
            row.dependent_id
        )));
    };
    let Some(index) = members.iter().position(|m| m == &row.dependent_id) else {
        return Err(StoreError::ConstraintViolation(format!(
            "missing relation row '{}'",
            row.dependent_id
        )));
    };
    members.remove(index);
    if members.is_empty() {
        *set = None;
    }
    Ok(())
}

fn matches(filter: &AccountFilter, account: &Account) -> bool {
    if let Some(address) = &filter.address {
        if &account.address != address {
            return false;
        }
    }
    if let Some(addresses) = &filter.addresses {
        if !addresses.iter().any(|a| a == &account.address) {
            return false;
        }
    }
    if let Some(public_key) = &filter.public_key {
        if account.public_key.as_deref() != Some(public_key.as_str()) {
            return false;
        }
    }
    if let Some(username) = &filter.username {
        if account.username.as_deref() != Some(username.as_str()) {
            return false;
        }
    }
    if let Some(is_delegate) = filter.is_delegate {
        if account.is_delegate != is_delegate {
            return false;
        }
    }
    if let Some(min) = filter.min_balance {
        if account.balance < min {
            return false;
        }
    }
    if let Some(max) = filter.max_balance {
        if account.balance > max {
            return false;
        }
    }
    true
}

impl AccountStore for MemoryAccountStore {
    fn get(&self, address: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().get(address).cloned())
    }

    fn upsert(&self, account: Account) -> Result<(), StoreError> {
        self.accounts
            .write()
            .insert(account.address.clone(), account);
        Ok(())
    }

    fn delete(&self, address: &str) -> Result<bool, StoreError> {
        Ok(self.accounts.write().remove(address).is_some())
    }

    fn apply_merge(&self, address: &str, batch: MergeBatch) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write();
        let current = accounts
            .get(address)
            .ok_or_else(|| StoreError::UnknownAccount(address.to_string()))?;

        // Stage every statement on a clone; commit only a fully applied row.
        let mut staged = current.clone();
        for op in &batch.scalars {
            apply_scalar(&mut staged, op)?;
        }
        for row in &batch.removes {
            apply_remove(&mut staged, row)?;
        }
        for row in &batch.inserts {
            apply_insert(&mut staged, row)?;
        }

        accounts.insert(address.to_string(), staged.clone());
        Ok(staged)
    }

    fn query(&self, filter: &AccountFilter) -> Result<Vec<Account>, StoreError> {
        let accounts = self.accounts.read();
        let mut rows: Vec<Account> = accounts
            .values()
            .filter(|a| matches(filter, a))
            .cloned()
            .collect();

        match filter.sort {
            Some(sort) => {
                rows.sort_by(|a, b| {
                    let ordering = match sort.field {
                        SortField::Address => a.address.cmp(&b.address),
                        SortField::Balance => a.balance.cmp(&b.balance),
                        SortField::Username => match (&a.username, &b.username) {
                            (Some(x), Some(y)) => x.cmp(y),
                            (Some(_), None) => std::cmp::Ordering::Less,
                            (None, Some(_)) => std::cmp::Ordering::Greater,
                            (None, None) => a.address.cmp(&b.address),
                        },
                    };
                    if sort.descending {
                        ordering.reverse()
                    } else {
                        ordering
                    }
                });
            }
            // Deterministic reads even without an explicit sort.
            None => rows.sort_by(|a, b| a.address.cmp(&b.address)),
        }

        let offset = filter.offset.unwrap_or(0);
        let rows: Vec<Account> = match filter.limit {
            Some(limit) => rows.into_iter().skip(offset).take(limit).collect(),
            None => rows.into_iter().skip(offset).collect(),
        };
        Ok(rows)
    }
}
