//! # Integration: diff application and rollback
//!
//! Exercises the unconfirmed/confirmed mirror dance: a pending transaction
//! moves unconfirmed state, confirmation converges the mirrors, and pool
//! eviction rolls unconfirmed state back with the reversed diff.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fc_02_account_ledger::{
        set_diff, Account, AccountDiff, AccountFilter, AccountLedger, DiffToken, LedgerError,
        MemoryAccountStore, SetDelta,
    };
    use shared_crypto::{derive_address, KeyPair};

    fn voter() -> KeyPair {
        KeyPair::from_passphrase("lunar theme arch useful fringe mention sad").unwrap()
    }

    fn ledger_with_account(balance: u64) -> (AccountLedger, String) {
        let ledger = AccountLedger::new(Arc::new(MemoryAccountStore::new()));
        let address = derive_address(&voter().public_key());
        let mut account = Account::with_public_key(&address, voter().public_key().to_hex());
        account.balance = balance;
        account.u_balance = balance;
        ledger.set(&address, account).unwrap();
        (ledger, address)
    }

    /// A pending vote moves only the unconfirmed set; eviction from the
    /// pool undoes it with the reversed diff, restoring the original state.
    #[test]
    fn test_unconfirmed_vote_rolls_back_on_eviction() {
        let (ledger, address) = ledger_with_account(100_000_000);
        let delegate_key = "03".repeat(33);
        let tokens = vec![DiffToken::Add(delegate_key.clone())];

        // Pending: unconfirmed vote plus the unconfirmed fee debit.
        let pending = ledger
            .merge(
                &address,
                AccountDiff {
                    u_delegates: Some(SetDelta::Tokens(tokens.clone())),
                    u_balance: Some(-100_000_000),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(pending.u_delegates, Some(vec![delegate_key.clone()]));
        assert_eq!(pending.u_balance, 0);
        assert_eq!(pending.delegates, None);
        assert_eq!(pending.balance, 100_000_000);
        assert!(!pending.virgin);

        // Evicted: apply the reversed diff to unconfirmed state.
        let rolled_back = ledger
            .merge(
                &address,
                AccountDiff {
                    u_delegates: Some(SetDelta::Tokens(set_diff::reverse(&tokens))),
                    u_balance: Some(100_000_000),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(rolled_back.u_delegates, None);
        assert_eq!(rolled_back.u_balance, 100_000_000);
        // Virginity does not come back.
        assert!(!rolled_back.virgin);
    }

    /// Confirmation converges the confirmed mirror onto the unconfirmed
    /// one applied at pending time.
    #[test]
    fn test_mirrors_converge_on_confirmation() {
        let (ledger, address) = ledger_with_account(50_000_000);
        let delegate_key = "02".repeat(33);

        ledger
            .merge(
                &address,
                AccountDiff {
                    u_delegates: Some(SetDelta::from_tokens(&[format!("+{delegate_key}")])),
                    u_balance: Some(-10_000_000),
                    ..Default::default()
                },
            )
            .unwrap();

        let confirmed = ledger
            .merge(
                &address,
                AccountDiff {
                    delegates: Some(SetDelta::from_tokens(&[format!("+{delegate_key}")])),
                    balance: Some(-10_000_000),
                    block_id: Some("6524861224470851795".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(confirmed.balance, confirmed.u_balance);
        assert_eq!(confirmed.delegates, confirmed.u_delegates);
        assert_eq!(confirmed.block_id.as_deref(), Some("6524861224470851795"));
    }

    /// A stale double-vote is rejected wholesale: neither the relation nor
    /// the balance moves.
    #[test]
    fn test_conflicting_diff_leaves_account_untouched() {
        let (ledger, address) = ledger_with_account(30_000_000);
        let delegate_key = "02".repeat(33);
        let vote = AccountDiff {
            u_delegates: Some(SetDelta::from_tokens(&[format!("+{delegate_key}")])),
            u_balance: Some(-10_000_000),
            ..Default::default()
        };

        ledger.merge(&address, vote.clone()).unwrap();
        let err = ledger.merge(&address, vote).unwrap_err();
        assert!(matches!(err, LedgerError::DiffConflict(_)));

        let account = ledger
            .get(AccountFilter::by_address(&address))
            .unwrap()
            .unwrap();
        // Only the first merge's debit went through.
        assert_eq!(account.u_balance, 20_000_000);
        assert_eq!(account.u_delegates, Some(vec![delegate_key]));
    }

    /// Reads translate high-level filters without exposing the store.
    #[test]
    fn test_delegate_directory_read() {
        let ledger = AccountLedger::new(Arc::new(MemoryAccountStore::new()));
        for (seed, name) in [(1u8, "alpha"), (2, "bravo"), (3, "charlie")] {
            let keypair = KeyPair::from_bytes([seed; 32]).unwrap();
            let address = derive_address(&keypair.public_key());
            let mut account = Account::with_public_key(&address, keypair.public_key().to_hex());
            account.is_delegate = true;
            account.username = Some(name.into());
            ledger.set(&address, account).unwrap();
        }

        let delegates = ledger
            .get_all(AccountFilter {
                is_delegate: Some(true),
                sort: Some(fc_02_account_ledger::SortBy {
                    field: fc_02_account_ledger::SortField::Username,
                    descending: false,
                }),
                limit: Some(2),
                ..Default::default()
            })
            .unwrap();

        let names: Vec<&str> = delegates
            .iter()
            .filter_map(|a| a.username.as_deref())
            .collect();
        assert_eq!(names, vec!["alpha", "bravo"]);
    }
}
