//! The account record.

use serde::{Deserialize, Serialize};

/// An account as held in the ledger, keyed by address.
///
/// Confirmed fields and their unconfirmed `u_` mirrors may diverge only
/// while a transaction sits in the pending pool; they converge again once a
/// block confirms. Relation sets are duplicate-free and normalize to `None`
/// when empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Address derived from the public key. Immutable.
    pub address: String,

    /// Compressed public key, hex. Immutable, optional until first use.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "publicKey")]
    pub public_key: Option<String>,

    /// Second-signature public key, hex. Immutable once registered.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "secondPublicKey")]
    pub second_public_key: Option<String>,

    /// Confirmed balance in base units.
    pub balance: u64,

    /// Unconfirmed balance mirror.
    pub u_balance: u64,

    /// Whether the account is a registered delegate.
    #[serde(rename = "isDelegate")]
    pub is_delegate: bool,
    /// Unconfirmed delegate-flag mirror.
    #[serde(rename = "u_isDelegate")]
    pub u_is_delegate: bool,

    /// Delegate username, lowercase. Immutable once set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Unconfirmed username mirror.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub u_username: Option<String>,

    /// Public keys of delegates this account votes for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegates: Option<Vec<String>>,
    /// Unconfirmed votes mirror.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub u_delegates: Option<Vec<String>>,

    /// Co-signer public keys of the account's multisignature group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multisignatures: Option<Vec<String>>,
    /// Unconfirmed co-signer mirror.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub u_multisignatures: Option<Vec<String>>,

    /// Minimum signatures required to spend (0 when not multisig).
    pub multimin: u32,
    /// Unconfirmed multimin mirror.
    pub u_multimin: u32,

    /// Multisignature registration lifetime in hours (0 when not multisig).
    pub multilifetime: u32,
    /// Unconfirmed lifetime mirror.
    pub u_multilifetime: u32,

    /// Whether a second signature is registered.
    #[serde(rename = "secondSignature")]
    pub second_signature: bool,
    /// Unconfirmed second-signature mirror.
    #[serde(rename = "u_secondSignature")]
    pub u_second_signature: bool,

    /// Id of the last block that touched this account.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "blockId")]
    pub block_id: Option<String>,

    /// Whether the delegate name is already taken.
    #[serde(rename = "nameexist")]
    pub name_exist: bool,
    /// Unconfirmed name-exists mirror.
    #[serde(rename = "u_nameexist")]
    pub u_name_exist: bool,

    /// Blocks forged by this delegate, accumulated via ±1 deltas.
    #[serde(rename = "producedblocks")]
    pub produced_blocks: u64,

    /// Slots missed by this delegate, accumulated via ±1 deltas.
    #[serde(rename = "missedblocks")]
    pub missed_blocks: u64,

    /// Fees collected from forged blocks, base units.
    pub fees: u64,

    /// Rewards collected from forged blocks, base units.
    pub rewards: u64,

    /// True until the first unconfirmed-balance decrement, then
    /// irreversibly false: the account has spent at least once.
    pub virgin: bool,
}

impl Account {
    /// A fresh, never-spent account with zero balances.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            public_key: None,
            second_public_key: None,
            balance: 0,
            u_balance: 0,
            is_delegate: false,
            u_is_delegate: false,
            username: None,
            u_username: None,
            delegates: None,
            u_delegates: None,
            multisignatures: None,
            u_multisignatures: None,
            multimin: 0,
            u_multimin: 0,
            multilifetime: 0,
            u_multilifetime: 0,
            second_signature: false,
            u_second_signature: false,
            block_id: None,
            name_exist: false,
            u_name_exist: false,
            produced_blocks: 0,
            missed_blocks: 0,
            fees: 0,
            rewards: 0,
            virgin: true,
        }
    }

    /// A fresh account whose address and key are both known.
    pub fn with_public_key(address: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            public_key: Some(public_key.into()),
            ..Self::new(address)
        }
    }
}
