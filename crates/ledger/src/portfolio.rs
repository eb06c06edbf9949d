use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use minibank_core::{AccountId, LedgerError, LedgerResult, ValueObject};

use crate::account::{Account, TxKind, TxRecord};

/// Note suffixes distinguishing the two legs of a transfer in each account's
/// independent audit log.
const TRANSFER_OUT_SUFFIX: &str = "Transfer Out!";
const TRANSFER_IN_SUFFIX: &str = "Transfer In!.";

/// A requested movement of funds between two accounts.
///
/// Never persisted as a single record: it decomposes into a withdrawal on the
/// source and a deposit on the destination, each audited separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub from: AccountId,
    pub to: AccountId,
    pub amount_cents: i64,
    pub timestamp: i64,
    pub note: String,
}

impl ValueObject for TransferRecord {}

/// A set of exclusively-owned accounts keyed by identifier, plus a
/// batch-level audit of every routed record.
#[derive(Debug, Default)]
pub struct Portfolio {
    accounts: HashMap<AccountId, Account>,
    batch_audit: Vec<TxRecord>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `account` under its own identifier.
    ///
    /// Adding a second account with an identifier already present silently
    /// replaces the first one, state and all.
    pub fn add_account(&mut self, account: Account) {
        self.accounts.insert(account.id().clone(), account);
    }

    /// Number of distinct account identifiers currently held.
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Look up an account.
    ///
    /// Absence is a normal outcome for this accessor; in batch routing a
    /// missing identifier is an error.
    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn account_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.get_mut(id)
    }

    fn apply_tx(&mut self, tx: &TxRecord) -> LedgerResult<()> {
        let account = self
            .accounts
            .get_mut(tx.account_id.as_str())
            .ok_or_else(|| LedgerError::unknown_account(tx.account_id.as_str()))?;
        account.apply(tx);
        self.batch_audit.push(tx.clone());
        Ok(())
    }

    /// Route each record, in input order, to its target account.
    ///
    /// Fails fast at the first unknown identifier: earlier records stay
    /// applied, nothing is rolled back, and the error names the offending id.
    pub fn apply_all(&mut self, txs: &[TxRecord]) -> LedgerResult<()> {
        for tx in txs {
            self.apply_tx(tx)?;
        }
        Ok(())
    }

    /// Zip parallel ledger-import columns into records and apply them.
    ///
    /// Timestamps default to zero and notes to empty. Rows beyond the
    /// shortest column are not read; callers supply matching lengths.
    pub fn apply_from_ledger(
        &mut self,
        account_ids: &[String],
        kind_codes: &[i32],
        amounts_cents: &[i64],
    ) -> LedgerResult<()> {
        let mut txs = Vec::with_capacity(account_ids.len());
        for ((id, code), amount) in account_ids.iter().zip(kind_codes).zip(amounts_cents) {
            txs.push(TxRecord {
                kind: TxKind::from_code(*code)?,
                amount_cents: *amount,
                timestamp: 0,
                note: None,
                account_id: AccountId::from(id.as_str()),
            });
        }
        self.apply_all(&txs)
    }

    /// Move funds between two accounts.
    ///
    /// Returns `false` without touching anything if either endpoint is
    /// unknown. Otherwise the source is debited and the destination credited
    /// unconditionally (no sufficiency check, sequential execution only).
    /// The legs land in each account's own audit log, not the batch audit.
    pub fn transfer(&mut self, transfer: &TransferRecord) -> bool {
        if !self.accounts.contains_key(transfer.from.as_str())
            || !self.accounts.contains_key(transfer.to.as_str())
        {
            return false;
        }

        if let Some(from) = self.accounts.get_mut(transfer.from.as_str()) {
            from.withdraw(
                transfer.amount_cents,
                transfer.timestamp,
                Some(format!("{}{}", transfer.note, TRANSFER_OUT_SUFFIX)),
            );
        }
        if let Some(to) = self.accounts.get_mut(transfer.to.as_str()) {
            to.deposit(
                transfer.amount_cents,
                transfer.timestamp,
                Some(format!("{}{}", transfer.note, TRANSFER_IN_SUFFIX)),
            );
        }
        true
    }

    /// Sum of every managed account's balance, recomputed on each call.
    pub fn total_exposure(&self) -> i64 {
        self.accounts.values().map(Account::balance_cents).sum()
    }

    /// Batch-level audit of records routed through [`Self::apply_all`],
    /// oldest first. Transfer legs are not recorded here.
    pub fn batch_audit(&self) -> &[TxRecord] {
        &self.batch_audit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tx(kind: TxKind, amount_cents: i64, account_id: &str) -> TxRecord {
        TxRecord {
            kind,
            amount_cents,
            timestamp: 0,
            note: None,
            account_id: AccountId::from(account_id),
        }
    }

    fn seeded() -> Portfolio {
        let mut portfolio = Portfolio::new();
        portfolio.add_account(Account::checking("CHK-001", 150, 1_000));
        portfolio.add_account(Account::savings("SAV-010", 0.05, 5_000));
        portfolio
    }

    #[test]
    fn add_and_count_accounts() {
        let portfolio = seeded();
        assert_eq!(portfolio.account_count(), 2);
    }

    #[test]
    fn duplicate_id_silently_replaces() {
        let mut portfolio = seeded();
        portfolio.add_account(Account::checking("CHK-001", 0, 999_999));
        assert_eq!(portfolio.account_count(), 2);
        assert_eq!(
            portfolio.account("CHK-001").unwrap().balance_cents(),
            999_999
        );
    }

    #[test]
    fn lookup_by_id() {
        let portfolio = seeded();
        assert!(portfolio.account("CHK-001").is_some());
        assert!(portfolio.account("NOPE").is_none());
    }

    #[test]
    fn apply_all_routes_in_order() {
        let mut portfolio = seeded();
        let txs = vec![
            tx(TxKind::Deposit, 100_000, "CHK-001"),
            tx(TxKind::Withdrawal, 25_000, "CHK-001"),
            tx(TxKind::Fee, 1_500, "CHK-001"),
        ];
        portfolio.apply_all(&txs).unwrap();

        assert_eq!(portfolio.account("CHK-001").unwrap().balance_cents(), 73_500);
        assert_eq!(portfolio.batch_audit().len(), 3);
    }

    #[test]
    fn apply_all_fails_fast_on_unknown_account() {
        let mut portfolio = seeded();
        let txs = vec![
            tx(TxKind::Deposit, 100, "CHK-001"),
            tx(TxKind::Deposit, 200, "GHOST"),
            tx(TxKind::Deposit, 300, "CHK-001"),
        ];
        let err = portfolio.apply_all(&txs).unwrap_err();
        assert_eq!(err, LedgerError::unknown_account("GHOST"));

        // The record before the failure is applied; the one after is not.
        assert_eq!(portfolio.account("CHK-001").unwrap().balance_cents(), 1_100);
        assert_eq!(portfolio.batch_audit().len(), 1);
    }

    #[test]
    fn ledger_import_zips_parallel_columns() {
        let mut portfolio = Portfolio::new();
        portfolio.add_account(Account::checking("CHK-001", 150, 1_000));
        portfolio.add_account(Account::checking("CHK-002", 0, 0));
        portfolio.add_account(Account::savings("SAV-010", 0.05, 500_000));

        let ids = [
            "CHK-001".to_string(),
            "CHK-002".to_string(),
            "SAV-010".to_string(),
        ];
        let kinds = [
            TxKind::Withdrawal.code(),
            TxKind::Deposit.code(),
            TxKind::Deposit.code(),
        ];
        let amounts = [60_000, 30_000, 29_877];

        portfolio.apply_from_ledger(&ids, &kinds, &amounts).unwrap();

        assert_eq!(portfolio.account("CHK-001").unwrap().balance_cents(), -59_000);
        assert_eq!(portfolio.account("CHK-002").unwrap().balance_cents(), 30_000);
        assert_eq!(portfolio.account("SAV-010").unwrap().balance_cents(), 529_877);

        // Adapter defaults: zero timestamp, empty note.
        let routed = portfolio.batch_audit().first().unwrap();
        assert_eq!(routed.timestamp, 0);
        assert_eq!(routed.note, None);
    }

    #[test]
    fn ledger_import_rejects_unknown_kind_code() {
        let mut portfolio = seeded();
        let ids = ["CHK-001".to_string()];
        let err = portfolio
            .apply_from_ledger(&ids, &[9], &[1_000])
            .unwrap_err();
        assert_eq!(err, LedgerError::unknown_tx_kind(9));
        // Nothing was routed.
        assert!(portfolio.batch_audit().is_empty());
        assert_eq!(portfolio.account("CHK-001").unwrap().balance_cents(), 1_000);
    }

    #[test]
    fn transfer_moves_funds_between_accounts() {
        let mut portfolio = seeded();
        portfolio.add_account(Account::checking("CHK-002", 0, 777));
        let ok = portfolio.transfer(&TransferRecord {
            from: AccountId::from("SAV-010"),
            to: AccountId::from("CHK-001"),
            amount_cents: 30_000,
            timestamp: 7,
            note: "rebalance ".to_string(),
        });
        assert!(ok);
        assert_eq!(portfolio.account("SAV-010").unwrap().balance_cents(), -25_000);
        assert_eq!(portfolio.account("CHK-001").unwrap().balance_cents(), 31_000);
        // Uninvolved accounts are untouched.
        assert_eq!(portfolio.account("CHK-002").unwrap().balance_cents(), 777);

        // Each leg is audited in its own account, with the distinguishing
        // suffix, and stays out of the batch audit.
        let out = portfolio.account("SAV-010").unwrap().audit().last().unwrap().clone();
        assert_eq!(out.kind, TxKind::Withdrawal);
        assert_eq!(out.note.as_deref(), Some("rebalance Transfer Out!"));
        let into = portfolio.account("CHK-001").unwrap().audit().last().unwrap().clone();
        assert_eq!(into.kind, TxKind::Deposit);
        assert_eq!(into.note.as_deref(), Some("rebalance Transfer In!."));
        assert!(portfolio.batch_audit().is_empty());
    }

    #[test]
    fn transfer_with_unknown_endpoint_mutates_nothing() {
        let mut portfolio = seeded();
        let attempts = [
            TransferRecord {
                from: AccountId::from("GHOST"),
                to: AccountId::from("CHK-001"),
                amount_cents: 100,
                timestamp: 0,
                note: String::new(),
            },
            TransferRecord {
                from: AccountId::from("SAV-010"),
                to: AccountId::from("GHOST"),
                amount_cents: 100,
                timestamp: 0,
                note: String::new(),
            },
        ];
        for attempt in &attempts {
            assert!(!portfolio.transfer(attempt));
        }
        assert_eq!(portfolio.account("CHK-001").unwrap().balance_cents(), 1_000);
        assert_eq!(portfolio.account("SAV-010").unwrap().balance_cents(), 5_000);
    }

    #[test]
    fn exposure_of_empty_portfolio_is_zero() {
        assert_eq!(Portfolio::new().total_exposure(), 0);
    }

    #[test]
    fn exposure_sums_all_balances() {
        let mut portfolio = seeded();
        portfolio.add_account(Account::checking("CHK-002", 0, -2_500));
        assert_eq!(portfolio.total_exposure(), 1_000 + 5_000 - 2_500);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: total exposure equals the arithmetic sum of every
        /// account's balance, for any account count including zero.
        #[test]
        fn exposure_equals_sum_of_balances(
            openings in prop::collection::vec(-1_000_000i64..1_000_000, 0..16)
        ) {
            let mut portfolio = Portfolio::new();
            for (i, opening) in openings.iter().enumerate() {
                portfolio.add_account(Account::checking(format!("ACC-{i}"), 0, *opening));
            }
            prop_assert_eq!(portfolio.total_exposure(), openings.iter().sum::<i64>());
        }

        /// Property: a successful transfer conserves total exposure and moves
        /// exactly the requested amount between the two endpoints.
        #[test]
        fn transfer_conserves_exposure(amount in 1i64..1_000_000) {
            let mut portfolio = Portfolio::new();
            portfolio.add_account(Account::savings("SAV-010", 0.05, 2_000_000));
            portfolio.add_account(Account::checking("CHK-001", 0, 0));
            let before = portfolio.total_exposure();

            let ok = portfolio.transfer(&TransferRecord {
                from: AccountId::from("SAV-010"),
                to: AccountId::from("CHK-001"),
                amount_cents: amount,
                timestamp: 0,
                note: String::new(),
            });

            prop_assert!(ok);
            prop_assert_eq!(portfolio.total_exposure(), before);
            prop_assert_eq!(portfolio.account("CHK-001").unwrap().balance_cents(), amount);
            prop_assert_eq!(
                portfolio.account("SAV-010").unwrap().balance_cents(),
                2_000_000 - amount
            );
        }
    }
}
