use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::account::{Account, AccountError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

/// A requested balance movement.
///
/// Applying a transaction only touches the balance. Recording it in the
/// account history is up to [`crate::client::Client::execute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Deposit { amount: Decimal },
    Withdrawal { amount: Decimal },
}

impl Transaction {
    pub fn kind(&self) -> TransactionKind {
        match self {
            Transaction::Deposit { .. } => TransactionKind::Deposit,
            Transaction::Withdrawal { .. } => TransactionKind::Withdrawal,
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Transaction::Deposit { amount } | Transaction::Withdrawal { amount } => *amount,
        }
    }

    pub(crate) fn apply(
        &self,
        account: &mut Account,
        now: DateTime<Utc>,
    ) -> Result<(), AccountError> {
        match *self {
            Transaction::Deposit { amount } => account.deposit(amount),
            Transaction::Withdrawal { amount } => account.withdraw(amount, now),
        }
    }
}
