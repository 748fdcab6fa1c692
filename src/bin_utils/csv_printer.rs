use std::io::Write;

use crate::{
    account::AccountNumber,
    ledger::{AccountSummary, Statement},
    transaction::TransactionKind,
};
use anyhow::Context;
use chrono::SecondsFormat;
use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Account {
    pub branch: String,
    pub account: AccountNumber,
    pub client: String,
    pub holder: String,
    pub balance: Decimal,
}

impl From<AccountSummary> for Account {
    fn from(summary: AccountSummary) -> Self {
        Self {
            branch: summary.branch,
            account: summary.number,
            client: summary.client.to_string(),
            holder: summary.holder,
            balance: summary.balance,
        }
    }
}

/// One statement row. The closing `balance` row has no timestamp.
#[derive(Debug, Serialize)]
pub struct StatementLine {
    pub account: AccountNumber,
    pub kind: &'static str,
    pub amount: Decimal,
    pub timestamp: Option<String>,
}

pub fn print_accounts<W>(
    output: &mut W,
    accounts: impl Iterator<Item = Account>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for acc in accounts {
        writer.serialize(acc).context("Failed to write account")?;
    }
    writer.flush().context("Failed to flush account listing")?;
    Ok(())
}

pub fn print_statement<W>(
    output: &mut W,
    account: AccountNumber,
    statement: Statement<'_>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let entries = statement.history.entries().map(|entry| StatementLine {
        account,
        kind: match entry.kind {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
        },
        amount: entry.amount,
        timestamp: Some(entry.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)),
    });
    let closing = StatementLine {
        account,
        kind: "balance",
        amount: statement.balance,
        timestamp: None,
    };

    let mut writer = Writer::from_writer(output);
    for line in entries.chain(std::iter::once(closing)) {
        writer
            .serialize(line)
            .with_context(|| format!("Failed to write statement of account {account}"))?;
    }
    writer.flush().context("Failed to flush statement")?;
    Ok(())
}
