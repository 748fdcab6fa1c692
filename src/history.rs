use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::transaction::TransactionKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// Append-only log of the transactions applied to one account.
///
/// Entries are kept in the order they were recorded, which is also the order
/// they are displayed in.
#[derive(Debug, Default, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn record(&mut self, kind: TransactionKind, amount: Decimal, at: DateTime<Utc>) {
        self.entries.push(HistoryEntry {
            kind,
            amount,
            timestamp: at,
        });
    }

    /// Entries in insertion order. The iterator is cheap to clone, so it can be
    /// walked more than once.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> + Clone {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of withdrawals recorded on the given UTC day.
    pub fn withdrawals_on(&self, day: NaiveDate) -> usize {
        self.entries()
            .filter(|entry| {
                entry.kind == TransactionKind::Withdrawal && entry.timestamp.date_naive() == day
            })
            .count()
    }

    /// Sum of deposits minus sum of withdrawals, `None` if it does not fit
    /// in a [`Decimal`].
    pub fn net_amount(&self) -> Option<Decimal> {
        self.entries()
            .try_fold(Decimal::ZERO, |total, entry| match entry.kind {
                TransactionKind::Deposit => total.checked_add(entry.amount),
                TransactionKind::Withdrawal => total.checked_sub(entry.amount),
            })
    }
}
