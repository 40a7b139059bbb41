use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::transactions::TransactionKind;

/// One completed monetary movement. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    kind: TransactionKind,
    amount: Decimal,
    timestamp: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Append-only log of entries for one account.
///
/// Insertion order is chronological order: the ledger is single-threaded and
/// entries are stamped as they are appended.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<LedgerEntry>,
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Records one entry stamped with the current time. Only a successfully
    /// applied transaction may append, so this stays crate-internal.
    pub(crate) fn append(&mut self, kind: TransactionKind, amount: Decimal) {
        self.entries.push(LedgerEntry {
            kind,
            amount,
            timestamp: Utc::now(),
        });
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn total_count(&self) -> usize {
        self.entries.len()
    }

    pub fn withdrawal_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.kind == TransactionKind::Withdrawal)
            .count()
    }

    /// Entries posted on the given UTC calendar day.
    pub fn count_on(&self, day: NaiveDate) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.timestamp.date_naive() == day)
            .count()
    }

    /// Withdrawal entries posted on the given UTC calendar day.
    pub fn withdrawal_count_on(&self, day: NaiveDate) -> usize {
        self.entries
            .iter()
            .filter(|entry| {
                entry.kind == TransactionKind::Withdrawal && entry.timestamp.date_naive() == day
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    fn decimal(amount: f64) -> Decimal {
        Decimal::from_f64(amount).unwrap()
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut history = History::new();
        history.append(TransactionKind::Deposit, decimal(100.0));
        history.append(TransactionKind::Withdrawal, decimal(40.0));
        history.append(TransactionKind::Deposit, decimal(5.0));

        let kinds: Vec<TransactionKind> = history.entries().iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                TransactionKind::Deposit,
                TransactionKind::Withdrawal,
                TransactionKind::Deposit
            ]
        );
        assert_eq!(history.entries()[1].amount(), decimal(40.0));
    }

    #[test]
    fn test_counts() {
        let mut history = History::new();
        assert_eq!(history.total_count(), 0);
        assert_eq!(history.withdrawal_count(), 0);

        history.append(TransactionKind::Deposit, decimal(100.0));
        history.append(TransactionKind::Withdrawal, decimal(10.0));
        history.append(TransactionKind::Withdrawal, decimal(20.0));

        assert_eq!(history.total_count(), 3);
        assert_eq!(history.withdrawal_count(), 2);

        let today = Utc::now().date_naive();
        assert_eq!(history.count_on(today), 3);
        assert_eq!(history.withdrawal_count_on(today), 2);
    }

    #[test]
    fn test_entries_reads_are_idempotent() {
        let mut history = History::new();
        history.append(TransactionKind::Deposit, decimal(1.0));
        history.append(TransactionKind::Withdrawal, decimal(1.0));

        let first: Vec<LedgerEntry> = history.entries().to_vec();
        let second: Vec<LedgerEntry> = history.entries().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn test_other_day_counts_are_zero() {
        let mut history = History::new();
        history.append(TransactionKind::Withdrawal, decimal(1.0));

        let yesterday = Utc::now().date_naive().pred_opt().unwrap();
        assert_eq!(history.count_on(yesterday), 0);
        assert_eq!(history.withdrawal_count_on(yesterday), 0);
    }
}
