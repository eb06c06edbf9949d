//! Ledger error model.

use thiserror::Error;

/// Result type used across the ledger domain.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Domain-level error.
///
/// Batch routing reports failures through this type rather than halting the
/// process: every record is either applied, or the caller is told which one
/// failed and why.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A transaction was routed to an identifier no account is registered under.
    #[error("unknown account: {id}")]
    UnknownAccount { id: String },

    /// A ledger-import kind code outside the known range.
    #[error("unknown transaction kind code: {code}")]
    UnknownTxKind { code: i32 },
}

impl LedgerError {
    pub fn unknown_account(id: impl Into<String>) -> Self {
        Self::UnknownAccount { id: id.into() }
    }

    pub fn unknown_tx_kind(code: i32) -> Self {
        Self::UnknownTxKind { code }
    }
}
