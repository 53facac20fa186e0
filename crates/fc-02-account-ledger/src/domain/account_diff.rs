//! Typed account diffs.
//!
//! One statically-typed slot per editable field; the merge path dispatches
//! on the slot's type, never on runtime value inspection. Immutable fields
//! (address, keys, virginity) have no slot here by construction.

use super::set_diff::{DiffAction, DiffToken};

/// A structured relation edit for tables carrying auxiliary columns.
///
/// Unlike [`DiffToken`] lists, record lists do not pass through set-diff
/// conflict checking; they map one-to-one onto relation rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelationRecord {
    /// Add or remove; untagged records default to add.
    pub action: DiffAction,
    /// The related member (co-signer public key, delegate key, ...).
    pub dependent_id: String,
    /// Extra column values carried alongside the membership row.
    pub columns: Vec<(String, String)>,
}

impl RelationRecord {
    /// An add record with no extra columns.
    pub fn add(dependent_id: impl Into<String>) -> Self {
        Self {
            action: DiffAction::Add,
            dependent_id: dependent_id.into(),
            columns: Vec::new(),
        }
    }

    /// A remove record with no extra columns.
    pub fn remove(dependent_id: impl Into<String>) -> Self {
        Self {
            action: DiffAction::Remove,
            dependent_id: dependent_id.into(),
            columns: Vec::new(),
        }
    }
}

/// An edit against one relation-set field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetDelta {
    /// Signed-token form; set-diff semantics, conflicts are fatal.
    Tokens(Vec<DiffToken>),
    /// Structured-record form for relations with extra columns.
    Records(Vec<RelationRecord>),
}

impl SetDelta {
    /// Parse a list of wire tokens (`"+X"` / `"-X"` / bare member).
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        SetDelta::Tokens(tokens.iter().map(|t| DiffToken::parse(t.as_ref())).collect())
    }
}

/// One atomic edit against a single account.
///
/// Numeric slots are signed deltas (positive increments, negative
/// decrements, zero is a no-op). String and flag slots replace. Relation
/// slots apply a [`SetDelta`]. `public_key` is verified, never written:
/// key assignment happens on upsert.
#[derive(Clone, Debug, Default)]
pub struct AccountDiff {
    /// Supplied for verification when the caller knows the key.
    pub public_key: Option<String>,

    /// Delegate username; settable only while unset.
    pub username: Option<String>,
    /// Unconfirmed username mirror.
    pub u_username: Option<String>,

    /// Last block to touch the account.
    pub block_id: Option<String>,

    /// Delegate flag.
    pub is_delegate: Option<bool>,
    /// Unconfirmed delegate flag.
    pub u_is_delegate: Option<bool>,
    /// Second-signature flag.
    pub second_signature: Option<bool>,
    /// Unconfirmed second-signature flag.
    pub u_second_signature: Option<bool>,
    /// Name-exists flag.
    pub name_exist: Option<bool>,
    /// Unconfirmed name-exists flag.
    pub u_name_exist: Option<bool>,

    /// Confirmed balance delta.
    pub balance: Option<i64>,
    /// Unconfirmed balance delta. A decrement clears virginity.
    pub u_balance: Option<i64>,
    /// Collected-fees delta.
    pub fees: Option<i64>,
    /// Collected-rewards delta.
    pub rewards: Option<i64>,
    /// Produced-blocks delta (±1 per update).
    pub produced_blocks: Option<i64>,
    /// Missed-blocks delta (±1 per update).
    pub missed_blocks: Option<i64>,
    /// Multisig minimum-signatures delta.
    pub multimin: Option<i64>,
    /// Unconfirmed multimin delta.
    pub u_multimin: Option<i64>,
    /// Multisig lifetime delta.
    pub multilifetime: Option<i64>,
    /// Unconfirmed lifetime delta.
    pub u_multilifetime: Option<i64>,

    /// Votes edit.
    pub delegates: Option<SetDelta>,
    /// Unconfirmed votes edit.
    pub u_delegates: Option<SetDelta>,
    /// Multisignature membership edit.
    pub multisignatures: Option<SetDelta>,
    /// Unconfirmed multisignature membership edit.
    pub u_multisignatures: Option<SetDelta>,
}

impl AccountDiff {
    /// A diff that only moves the confirmed balance.
    pub fn balance_delta(delta: i64) -> Self {
        Self {
            balance: Some(delta),
            ..Default::default()
        }
    }

    /// A diff that only moves the unconfirmed balance.
    pub fn unconfirmed_balance_delta(delta: i64) -> Self {
        Self {
            u_balance: Some(delta),
            ..Default::default()
        }
    }
}
