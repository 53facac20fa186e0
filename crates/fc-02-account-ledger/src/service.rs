//! The account ledger service.

use crate::domain::{
    set_diff, Account, AccountDiff, AccountFilter, DiffAction, LedgerError, Result, SetDelta,
};
use crate::ports::{
    AccountStore, FlagField, MergeBatch, NumericField, Relation, RelationRow, ScalarOp,
    StoreError, StringField,
};
use crate::validation;
use parking_lot::Mutex;
use shared_types::constants::TOTAL_SUPPLY;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

/// The single point of mutation for account records.
///
/// Merges to the same address are serialized through a per-address lock;
/// merges to distinct addresses proceed in parallel. Each merge is one
/// atomic unit against the backing store.
pub struct AccountLedger {
    store: Arc<dyn AccountStore>,
    address_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl AccountLedger {
    /// Build a ledger over the given store.
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self {
            store,
            address_locks: Mutex::new(HashMap::new()),
        }
    }

    fn address_lock(&self, address: &str) -> Arc<Mutex<()>> {
        let mut locks = self.address_locks.lock();
        locks
            .entry(address.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Apply one diff to one account atomically and return the
    /// post-mutation snapshot.
    ///
    /// On any failure the account is left exactly as it was.
    #[tracing::instrument(skip(self, diff), fields(address = %address))]
    pub fn merge(&self, address: &str, diff: AccountDiff) -> Result<Account> {
        validation::verify_public_key(diff.public_key.as_deref())?;

        let lock = self.address_lock(address);
        let _guard = lock.lock();

        let current = self
            .store
            .get(address)
            .map_err(Self::wrap_read)?
            .ok_or_else(|| LedgerError::MergeFailed(format!("unknown account {address}")))?;

        let batch = build_batch(&current, &diff)?;
        if batch.is_empty() {
            debug!("empty diff, nothing to commit");
            return Ok(current);
        }

        self.store.apply_merge(address, batch).map_err(|err| match err {
            StoreError::ConstraintViolation(msg) => LedgerError::MergeFailed(msg),
            StoreError::UnknownAccount(addr) => {
                LedgerError::MergeFailed(format!("unknown account {addr}"))
            }
            StoreError::Backend(msg) => {
                error!(%msg, "account store failed to commit merge");
                LedgerError::MergeFailed("account merge could not commit".into())
            }
        })
    }

    /// [`merge`](Self::merge) without the read-back, for callers that only
    /// need an acknowledgement.
    pub fn merge_ack(&self, address: &str, diff: AccountDiff) -> Result<()> {
        self.merge(address, diff).map(|_| ())
    }

    /// First account matching `filter`, if any.
    pub fn get(&self, mut filter: AccountFilter) -> Result<Option<Account>> {
        filter.limit = Some(1);
        Ok(self.get_all(filter)?.into_iter().next())
    }

    /// All accounts matching `filter`, honoring sort/limit/offset.
    pub fn get_all(&self, filter: AccountFilter) -> Result<Vec<Account>> {
        self.store.query(&filter).map_err(Self::wrap_read)
    }

    /// Insert or fully replace the account stored under `address`.
    pub fn set(&self, address: &str, mut account: Account) -> Result<()> {
        validation::verify_public_key(account.public_key.as_deref())?;
        account.address = address.to_string();

        let lock = self.address_lock(address);
        let _guard = lock.lock();
        self.store.upsert(account).map_err(|err| {
            error!(%err, "account store failed to upsert");
            LedgerError::MergeFailed("account upsert could not commit".into())
        })
    }

    /// Delete the account stored under `address`; returns whether one
    /// existed.
    pub fn remove(&self, address: &str) -> Result<bool> {
        let lock = self.address_lock(address);
        let _guard = lock.lock();
        self.store.delete(address).map_err(Self::wrap_read)
    }

    /// Validate a full account record before it is surfaced externally.
    ///
    /// Reports every violated constraint; never partially normalizes.
    pub fn object_normalize(&self, account: Account) -> Result<Account> {
        let violations = validation::validate_account(&account);
        if violations.is_empty() {
            Ok(account)
        } else {
            Err(LedgerError::SchemaViolation(violations))
        }
    }

    /// Require a well-formed public key when one is supplied.
    pub fn verify_public_key(public_key: Option<&str>) -> Result<()> {
        validation::verify_public_key(public_key)
    }

    fn wrap_read(err: StoreError) -> LedgerError {
        error!(%err, "account store read failed");
        LedgerError::QueryFailed("account store unavailable".into())
    }
}

fn numeric_delta(
    scalars: &mut Vec<ScalarOp>,
    field: NumericField,
    name: &'static str,
    delta: Option<i64>,
) -> Result<()> {
    let Some(delta) = delta else { return Ok(()) };
    if delta == 0 {
        return Ok(());
    }
    let magnitude = delta.unsigned_abs();
    if magnitude > TOTAL_SUPPLY {
        return Err(LedgerError::InvalidNumber { field: name, value: delta });
    }
    if delta > 0 {
        scalars.push(ScalarOp::Increment(field, magnitude));
    } else {
        scalars.push(ScalarOp::Decrement(field, magnitude));
    }
    Ok(())
}

fn relation_delta(
    batch: &mut MergeBatch,
    current: Option<&[String]>,
    relation: Relation,
    delta: Option<&SetDelta>,
) -> Result<()> {
    let Some(delta) = delta else { return Ok(()) };
    match delta {
        SetDelta::Tokens(tokens) => {
            // Conflict check against current membership before any row edit
            // is staged.
            set_diff::merge(current, tokens)?;
            for token in tokens {
                let row = RelationRow {
                    relation,
                    dependent_id: token.member().to_string(),
                    columns: Vec::new(),
                };
                match token.action() {
                    DiffAction::Add => batch.inserts.push(row),
                    DiffAction::Remove => batch.removes.push(row),
                }
            }
        }
        SetDelta::Records(records) => {
            for record in records {
                let row = RelationRow {
                    relation,
                    dependent_id: record.dependent_id.clone(),
                    columns: record.columns.clone(),
                };
                match record.action {
                    DiffAction::Add => batch.inserts.push(row),
                    DiffAction::Remove => batch.removes.push(row),
                }
            }
        }
    }
    Ok(())
}

/// Translate a typed diff into the store's batch language.
fn build_batch(current: &Account, diff: &AccountDiff) -> Result<MergeBatch> {
    let mut batch = MergeBatch::default();

    for (field, value) in [
        (StringField::Username, &diff.username),
        (StringField::UUsername, &diff.u_username),
        (StringField::BlockId, &diff.block_id),
    ] {
        if let Some(value) = value {
            batch.scalars.push(ScalarOp::SetString(field, value.clone()));
        }
    }

    for (field, value) in [
        (FlagField::IsDelegate, diff.is_delegate),
        (FlagField::UIsDelegate, diff.u_is_delegate),
        (FlagField::SecondSignature, diff.second_signature),
        (FlagField::USecondSignature, diff.u_second_signature),
        (FlagField::NameExist, diff.name_exist),
        (FlagField::UNameExist, diff.u_name_exist),
    ] {
        if let Some(value) = value {
            batch.scalars.push(ScalarOp::SetFlag(field, value));
        }
    }

    numeric_delta(&mut batch.scalars, NumericField::Balance, "balance", diff.balance)?;
    numeric_delta(&mut batch.scalars, NumericField::UBalance, "u_balance", diff.u_balance)?;
    numeric_delta(&mut batch.scalars, NumericField::Fees, "fees", diff.fees)?;
    numeric_delta(&mut batch.scalars, NumericField::Rewards, "rewards", diff.rewards)?;
    numeric_delta(
        &mut batch.scalars,
        NumericField::ProducedBlocks,
        "producedblocks",
        diff.produced_blocks,
    )?;
    numeric_delta(
        &mut batch.scalars,
        NumericField::MissedBlocks,
        "missedblocks",
        diff.missed_blocks,
    )?;
    numeric_delta(&mut batch.scalars, NumericField::Multimin, "multimin", diff.multimin)?;
    numeric_delta(&mut batch.scalars, NumericField::UMultimin, "u_multimin", diff.u_multimin)?;
    numeric_delta(
        &mut batch.scalars,
        NumericField::Multilifetime,
        "multilifetime",
        diff.multilifetime,
    )?;
    numeric_delta(
        &mut batch.scalars,
        NumericField::UMultilifetime,
        "u_multilifetime",
        diff.u_multilifetime,
    )?;

    // Spending unconfirmed funds irreversibly marks the account as no
    // longer virgin.
    if diff.u_balance.is_some_and(|d| d < 0) {
        batch.scalars.push(ScalarOp::SetFlag(FlagField::Virgin, false));
    }

    relation_delta(
        &mut batch,
        current.delegates.as_deref(),
        Relation::Delegates,
        diff.delegates.as_ref(),
    )?;
    relation_delta(
        &mut batch,
        current.u_delegates.as_deref(),
        Relation::UDelegates,
        diff.u_delegates.as_ref(),
    )?;
    relation_delta(
        &mut batch,
        current.multisignatures.as_deref(),
        Relation::Multisignatures,
        diff.multisignatures.as_ref(),
    )?;
    relation_delta(
        &mut batch,
        current.u_multisignatures.as_deref(),
        Relation::UMultisignatures,
        diff.u_multisignatures.as_ref(),
    )?;

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryAccountStore;
    use crate::domain::{RelationRecord, SortBy, SortField};

    fn ledger_with(address: &str, balance: u64) -> AccountLedger {
        let store = Arc::new(MemoryAccountStore::new());
        let mut account = Account::new(address);
        account.balance = balance;
        account.u_balance = balance;
        store.upsert(account).unwrap();
        AccountLedger::new(store)
    }

    #[test]
    fn test_balance_decrement() {
        let ledger = ledger_with("1F", 100);
        let account = ledger.merge("1F", AccountDiff::balance_delta(-40)).unwrap();
        assert_eq!(account.balance, 60);
    }

    #[test]
    fn test_balance_increment_leaves_virgin() {
        let ledger = ledger_with("1F", 0);
        let account = ledger.merge("1F", AccountDiff::balance_delta(40)).unwrap();
        assert_eq!(account.balance, 40);
        assert!(account.virgin);
    }

    #[test]
    fn test_unconfirmed_decrement_clears_virgin() {
        let ledger = ledger_with("1F", 100);
        let account = ledger
            .merge("1F", AccountDiff::unconfirmed_balance_delta(-40))
            .unwrap();
        assert_eq!(account.u_balance, 60);
        assert!(!account.virgin);
    }

    #[test]
    fn test_insufficient_debit_is_atomic() {
        let ledger = ledger_with("1F", 100);
        ledger
            .merge("1F", AccountDiff::unconfirmed_balance_delta(-80))
            .unwrap();

        let err = ledger
            .merge("1F", AccountDiff::unconfirmed_balance_delta(-80))
            .unwrap_err();
        assert!(matches!(err, LedgerError::MergeFailed(_)));

        let account = ledger
            .get(AccountFilter::by_address("1F"))
            .unwrap()
            .unwrap();
        assert_eq!(account.u_balance, 20);
    }

    #[test]
    fn test_zero_delta_is_noop() {
        let ledger = ledger_with("1F", 100);
        let account = ledger.merge("1F", AccountDiff::balance_delta(0)).unwrap();
        assert_eq!(account.balance, 100);
    }

    #[test]
    fn test_unsane_delta_rejected() {
        let ledger = ledger_with("1F", 100);
        let err = ledger
            .merge("1F", AccountDiff::balance_delta(i64::MAX))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidNumber { .. }));
    }

    #[test]
    fn test_vote_diff_lifecycle() {
        let ledger = ledger_with("1F", 0);
        let vote = |tokens: &[&str]| AccountDiff {
            delegates: Some(SetDelta::from_tokens(tokens)),
            ..Default::default()
        };

        let account = ledger.merge("1F", vote(&["+pub1"])).unwrap();
        assert_eq!(account.delegates, Some(vec!["pub1".to_string()]));

        let err = ledger.merge("1F", vote(&["+pub1"])).unwrap_err();
        assert!(matches!(err, LedgerError::DiffConflict(_)));

        let account = ledger.merge("1F", vote(&["-pub1"])).unwrap();
        assert_eq!(account.delegates, None);
    }

    #[test]
    fn test_record_form_defaults_to_insert() {
        let ledger = ledger_with("1F", 0);
        let diff = AccountDiff {
            multisignatures: Some(SetDelta::Records(vec![RelationRecord::add("cosigner1")])),
            ..Default::default()
        };
        let account = ledger.merge("1F", diff).unwrap();
        assert_eq!(account.multisignatures, Some(vec!["cosigner1".to_string()]));
    }

    #[test]
    fn test_merge_rejects_malformed_public_key() {
        let ledger = ledger_with("1F", 0);
        let diff = AccountDiff {
            public_key: Some("zz".into()),
            ..Default::default()
        };
        let err = ledger.merge("1F", diff).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidPublicKey(_)));
    }

    #[test]
    fn test_merge_unknown_account_fails() {
        let ledger = ledger_with("1F", 0);
        let err = ledger.merge("404F", AccountDiff::balance_delta(1)).unwrap_err();
        assert!(matches!(err, LedgerError::MergeFailed(_)));
    }

    #[test]
    fn test_username_set_once() {
        let ledger = ledger_with("1F", 0);
        let name = |n: &str| AccountDiff {
            username: Some(n.into()),
            ..Default::default()
        };
        ledger.merge("1F", name("carbon")).unwrap();
        assert!(ledger.merge("1F", name("carbon")).is_ok());
        assert!(matches!(
            ledger.merge("1F", name("other")).unwrap_err(),
            LedgerError::MergeFailed(_)
        ));
    }

    #[test]
    fn test_set_get_remove_roundtrip() {
        let ledger = AccountLedger::new(Arc::new(MemoryAccountStore::new()));
        let account = Account::new("7F");
        ledger.set("7F", account).unwrap();

        assert!(ledger.get(AccountFilter::by_address("7F")).unwrap().is_some());
        assert!(ledger.remove("7F").unwrap());
        assert!(ledger.get(AccountFilter::by_address("7F")).unwrap().is_none());
    }

    #[test]
    fn test_get_all_sorted() {
        let ledger = AccountLedger::new(Arc::new(MemoryAccountStore::new()));
        for (address, balance) in [("1F", 5u64), ("2F", 50), ("3F", 25)] {
            let mut account = Account::new(address);
            account.balance = balance;
            ledger.set(address, account).unwrap();
        }
        let rows = ledger
            .get_all(AccountFilter {
                sort: Some(SortBy {
                    field: SortField::Balance,
                    descending: true,
                }),
                ..Default::default()
            })
            .unwrap();
        let balances: Vec<u64> = rows.iter().map(|a| a.balance).collect();
        assert_eq!(balances, vec![50, 25, 5]);
    }

    #[test]
    fn test_object_normalize_reports_everything() {
        let ledger = AccountLedger::new(Arc::new(MemoryAccountStore::new()));
        let mut account = Account::new("bogus");
        account.multimin = 40;
        let err = ledger.object_normalize(account).unwrap_err();
        let LedgerError::SchemaViolation(violations) = err else {
            panic!("expected schema violation");
        };
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_concurrent_merges_serialize_per_address() {
        let ledger = ledger_with("1F", 0);
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    ledger.merge("1F", AccountDiff::balance_delta(1)).unwrap();
                });
            }
        });
        let account = ledger
            .get(AccountFilter::by_address("1F"))
            .unwrap()
            .unwrap();
        assert_eq!(account.balance, 8);
    }
}
