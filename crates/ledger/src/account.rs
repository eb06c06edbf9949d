use serde::{Deserialize, Serialize};

use minibank_core::{AccountId, Entity, LedgerError, LedgerResult, ValueObject};

use crate::math;

/// Maximum number of audit records kept per account.
///
/// Once the log is full, the oldest record is dropped before the next append.
/// The front shift is O(n), acceptable at this small fixed bound.
pub const MAX_AUDIT: usize = 1000;

/// Day-count convention used when an Interest record arrives through
/// [`Account::apply`], which carries no day parameters of its own.
const REPLAY_INTEREST_DAYS: i32 = 30;
const REPLAY_INTEREST_BASIS: i32 = 365;

/// High-level account kind (determines which settings field is live).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Checking,
    Savings,
}

/// Transaction kind.
///
/// The kind fully determines whether the amount credits or debits the
/// balance; the sign of the amount itself is never consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    Deposit,
    Withdrawal,
    Fee,
    Interest,
    TransferIn,
    TransferOut,
}

impl TxKind {
    /// Decode a ledger-import code (0..=5, declaration order).
    pub fn from_code(code: i32) -> LedgerResult<Self> {
        match code {
            0 => Ok(Self::Deposit),
            1 => Ok(Self::Withdrawal),
            2 => Ok(Self::Fee),
            3 => Ok(Self::Interest),
            4 => Ok(Self::TransferIn),
            5 => Ok(Self::TransferOut),
            _ => Err(LedgerError::unknown_tx_kind(code)),
        }
    }

    /// The wire code this kind decodes from.
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Account configuration, fixed at construction.
///
/// `apr` only matters for savings accounts and `fee_flat_cents` only for
/// checking; the inactive field stays at its zero value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountSettings {
    pub kind: AccountKind,
    /// Annual percentage rate as a decimal fraction (0.05 = 5%).
    pub apr: f64,
    /// Flat fee in cents.
    pub fee_flat_cents: i64,
}

impl ValueObject for AccountSettings {}

/// One applied operation, as remembered by the account itself.
///
/// Amounts are stored positive; the kind carries the sign of the effect.
/// The routing identifier is not kept: once a record has reached its
/// account, the account is implicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub kind: TxKind,
    pub amount_cents: i64,
    /// Opaque caller-supplied instant; not validated or ordered here.
    pub timestamp: i64,
    pub note: Option<String>,
}

impl ValueObject for AuditEntry {}

/// A transaction addressed to an account, ready for portfolio routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxRecord {
    pub kind: TxKind,
    /// Always positive; the kind decides credit vs debit.
    pub amount_cents: i64,
    pub timestamp: i64,
    pub note: Option<String>,
    /// Routing target, consumed by the portfolio. Not copied into the
    /// account's own audit entry.
    pub account_id: AccountId,
}

impl ValueObject for TxRecord {}

/// A single bank account: balance, settings, and a bounded audit trail.
///
/// The balance always equals the opening balance plus the signed sum of every
/// operation ever applied. The audit log is diagnostic, never authoritative:
/// entries evicted at the bound do not un-happen.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: AccountId,
    settings: AccountSettings,
    balance_cents: i64,
    audit: Vec<AuditEntry>,
}

impl Account {
    pub fn new(
        id: impl Into<AccountId>,
        settings: AccountSettings,
        opening_balance_cents: i64,
    ) -> Self {
        Self {
            id: id.into(),
            settings,
            balance_cents: opening_balance_cents,
            audit: Vec::new(),
        }
    }

    /// Checking account with a flat maintenance fee.
    pub fn checking(
        id: impl Into<AccountId>,
        fee_flat_cents: i64,
        opening_balance_cents: i64,
    ) -> Self {
        Self::new(
            id,
            AccountSettings {
                kind: AccountKind::Checking,
                apr: 0.0,
                fee_flat_cents,
            },
            opening_balance_cents,
        )
    }

    /// Savings account earning simple interest at `apr`.
    pub fn savings(id: impl Into<AccountId>, apr: f64, opening_balance_cents: i64) -> Self {
        Self::new(
            id,
            AccountSettings {
                kind: AccountKind::Savings,
                apr,
                fee_flat_cents: 0,
            },
            opening_balance_cents,
        )
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn kind(&self) -> AccountKind {
        self.settings.kind
    }

    pub fn settings(&self) -> &AccountSettings {
        &self.settings
    }

    pub fn balance_cents(&self) -> i64 {
        self.balance_cents
    }

    /// Ordered audit log, oldest first.
    ///
    /// Read-only view; any subsequent mutating call may evict or append.
    pub fn audit(&self) -> &[AuditEntry] {
        &self.audit
    }

    fn record(&mut self, entry: AuditEntry) {
        if self.audit.len() >= MAX_AUDIT {
            // Real front truncation, not a ring buffer.
            self.audit.remove(0);
        }
        self.audit.push(entry);
    }

    /// Credit `amount_cents` and append a Deposit entry.
    ///
    /// No sign check: a negative deposit behaves as a withdrawal. That is a
    /// consequence of the generic add, not a validated business rule.
    pub fn deposit(&mut self, amount_cents: i64, timestamp: i64, note: Option<String>) {
        self.balance_cents = math::deposit(self.balance_cents, amount_cents);
        self.record(AuditEntry {
            kind: TxKind::Deposit,
            amount_cents,
            timestamp,
            note,
        });
    }

    /// Debit `amount_cents` and append a Withdrawal entry.
    ///
    /// The balance may go negative; overdraft is permitted by design.
    pub fn withdraw(&mut self, amount_cents: i64, timestamp: i64, note: Option<String>) {
        self.balance_cents = math::withdraw(self.balance_cents, amount_cents);
        self.record(AuditEntry {
            kind: TxKind::Withdrawal,
            amount_cents,
            timestamp,
            note,
        });
    }

    /// Debit `fee_cents` and append a Fee entry.
    pub fn charge_fee(&mut self, fee_cents: i64, timestamp: i64, note: Option<String>) {
        self.balance_cents = math::fee(self.balance_cents, fee_cents);
        self.record(AuditEntry {
            kind: TxKind::Fee,
            amount_cents: fee_cents,
            timestamp,
            note,
        });
    }

    /// Post simple interest at the account's own APR over `days`/`basis`.
    ///
    /// The audit entry's amount is the computed interest, not the balance.
    pub fn post_simple_interest(
        &mut self,
        days: i32,
        basis: i32,
        timestamp: i64,
        note: Option<String>,
    ) {
        let interest = math::simple_interest(self.balance_cents, self.settings.apr, days, basis);
        self.balance_cents = math::deposit(self.balance_cents, interest);
        self.record(AuditEntry {
            kind: TxKind::Interest,
            amount_cents: interest,
            timestamp,
            note,
        });
    }

    /// Charge the settings' flat fee (the checking-account convenience).
    pub fn charge_flat_fee(&mut self, timestamp: i64, note: Option<String>) {
        self.charge_fee(self.settings.fee_flat_cents, timestamp, note);
    }

    /// Post one month of simple interest at the account's APR (the
    /// savings-account convenience).
    pub fn post_monthly_interest(&mut self, timestamp: i64, note: Option<String>) {
        self.post_simple_interest(REPLAY_INTEREST_DAYS, REPLAY_INTEREST_BASIS, timestamp, note);
    }

    /// Replay a routed record against this account.
    ///
    /// Interest records always post the fixed 30/365 convention; their own
    /// amount field is ignored. Transfer legs adjust the balance directly and
    /// append their own correctly-kinded entry, so replaying records does not
    /// need the portfolio level reconstructed.
    pub fn apply(&mut self, tx: &TxRecord) {
        match tx.kind {
            TxKind::Deposit => self.deposit(tx.amount_cents, tx.timestamp, tx.note.clone()),
            TxKind::Withdrawal => self.withdraw(tx.amount_cents, tx.timestamp, tx.note.clone()),
            TxKind::Fee => self.charge_fee(tx.amount_cents, tx.timestamp, tx.note.clone()),
            TxKind::Interest => self.post_simple_interest(
                REPLAY_INTEREST_DAYS,
                REPLAY_INTEREST_BASIS,
                tx.timestamp,
                tx.note.clone(),
            ),
            TxKind::TransferIn => {
                self.balance_cents = math::deposit(self.balance_cents, tx.amount_cents);
                self.record(AuditEntry {
                    kind: TxKind::TransferIn,
                    amount_cents: tx.amount_cents,
                    timestamp: tx.timestamp,
                    note: tx.note.clone(),
                });
            }
            TxKind::TransferOut => {
                self.balance_cents = math::withdraw(self.balance_cents, tx.amount_cents);
                self.record(AuditEntry {
                    kind: TxKind::TransferOut,
                    amount_cents: tx.amount_cents,
                    timestamp: tx.timestamp,
                    note: tx.note.clone(),
                });
            }
        }
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
