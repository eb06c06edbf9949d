//! Demonstration entry point: seeds a portfolio and walks the core flows.

use anyhow::{Context, Result};
use chrono::Utc;

use minibank_core::AccountId;
use minibank_ledger::{Account, Portfolio, TransferRecord, TxKind, TxRecord};

fn main() -> Result<()> {
    minibank_observability::init();

    let now = Utc::now().timestamp();

    let mut portfolio = Portfolio::new();
    portfolio.add_account(Account::checking("CHK-001", 150, 1_000));
    portfolio.add_account(Account::savings("SAV-010", 0.05, 5_000));
    tracing::info!(accounts = portfolio.account_count(), "portfolio seeded");

    let batch = vec![
        TxRecord {
            kind: TxKind::Deposit,
            amount_cents: 100_000,
            timestamp: now,
            note: Some("payroll".to_string()),
            account_id: AccountId::from("CHK-001"),
        },
        TxRecord {
            kind: TxKind::Withdrawal,
            amount_cents: 25_000,
            timestamp: now,
            note: Some("rent".to_string()),
            account_id: AccountId::from("CHK-001"),
        },
        TxRecord {
            kind: TxKind::Fee,
            amount_cents: 1_500,
            timestamp: now,
            note: Some("maintenance".to_string()),
            account_id: AccountId::from("CHK-001"),
        },
    ];
    portfolio
        .apply_all(&batch)
        .context("batch application failed")?;
    tracing::info!(
        routed = portfolio.batch_audit().len(),
        balance_cents = portfolio.account("CHK-001").map(Account::balance_cents),
        "batch applied to CHK-001"
    );

    if let Some(savings) = portfolio.account_mut("SAV-010") {
        savings.deposit(500_000, now, Some("opening top-up".to_string()));
        savings.post_simple_interest(31, 365, now, Some("31 days at 5%".to_string()));
        tracing::info!(
            balance_cents = savings.balance_cents(),
            "interest posted to SAV-010"
        );
    }

    let transfer = TransferRecord {
        from: AccountId::from("SAV-010"),
        to: AccountId::from("CHK-001"),
        amount_cents: 30_000,
        timestamp: now,
        note: "monthly sweep ".to_string(),
    };
    if portfolio.transfer(&transfer) {
        tracing::info!(
            from = %transfer.from,
            to = %transfer.to,
            amount_cents = transfer.amount_cents,
            "transfer settled"
        );
    } else {
        tracing::warn!(
            from = %transfer.from,
            to = %transfer.to,
            "transfer refused: unknown endpoint"
        );
    }

    tracing::info!(
        total_exposure_cents = portfolio.total_exposure(),
        "portfolio totals"
    );

    let checking = portfolio
        .account("CHK-001")
        .context("CHK-001 disappeared from the portfolio")?;
    println!("{}", serde_json::to_string_pretty(checking.audit())?);

    Ok(())
}
