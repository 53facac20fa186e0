//! High-level read filters.
//!
//! Callers describe what they want; the store port translates into its own
//! query language. Storage syntax never crosses this boundary.

/// Sortable account fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    /// Sort by address.
    Address,
    /// Sort by confirmed balance.
    Balance,
    /// Sort by delegate username (accounts without one sort last).
    Username,
}

/// A sort directive.
#[derive(Clone, Copy, Debug)]
pub struct SortBy {
    /// Field to sort on.
    pub field: SortField,
    /// Descending when true, ascending otherwise.
    pub descending: bool,
}

/// Filter, pagination and sort for account reads.
///
/// Equality conditions combine conjunctively; absent conditions match
/// everything.
#[derive(Clone, Debug, Default)]
pub struct AccountFilter {
    /// Exact address.
    pub address: Option<String>,
    /// Any of these addresses.
    pub addresses: Option<Vec<String>>,
    /// Exact public key (hex).
    pub public_key: Option<String>,
    /// Exact username.
    pub username: Option<String>,
    /// Delegate flag.
    pub is_delegate: Option<bool>,
    /// Inclusive lower balance bound.
    pub min_balance: Option<u64>,
    /// Inclusive upper balance bound.
    pub max_balance: Option<u64>,
    /// Maximum rows returned.
    pub limit: Option<usize>,
    /// Rows skipped before the first returned.
    pub offset: Option<usize>,
    /// Sort directive applied before pagination.
    pub sort: Option<SortBy>,
}

impl AccountFilter {
    /// Filter matching a single address.
    pub fn by_address(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Default::default()
        }
    }

    /// Filter matching a single public key.
    pub fn by_public_key(public_key: impl Into<String>) -> Self {
        Self {
            public_key: Some(public_key.into()),
            ..Default::default()
        }
    }
}
