use std::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::accounts::account::Account;
use crate::errors::BankError;

/// Explicit kind tag carried by a transaction and mirrored verbatim into
/// the ledger entry it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "Deposit"),
            TransactionKind::Withdrawal => write!(f, "Withdrawal"),
        }
    }
}

/// Transient command object: applies an amount to one account and, on
/// success, records itself in that account's history.
#[derive(Debug, Clone)]
pub struct Transaction {
    kind: TransactionKind,
    amount: Decimal,
}

impl Transaction {
    pub fn deposit(amount: Decimal) -> Self {
        Self {
            kind: TransactionKind::Deposit,
            amount,
        }
    }

    pub fn withdrawal(amount: Decimal) -> Self {
        Self {
            kind: TransactionKind::Withdrawal,
            amount,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Applies the amount to the account and mirrors the movement into its
    /// history. A rejected application leaves the history untouched.
    ///
    /// Takes `self` by value: a transaction is consumed exactly once.
    pub fn register_against(self, account: &mut Account) -> Result<(), BankError> {
        match self.kind {
            TransactionKind::Deposit => account.deposit(self.amount)?,
            TransactionKind::Withdrawal => account.withdraw(self.amount)?,
        }
        account.history_mut().append(self.kind, self.amount);
        Ok(())
    }
}

/// Operation requested by one row of the input CSV.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Register,
    Open,
    OpenChecking,
    Deposit,
    Withdraw,
    Statement,
}

/// One row of the input CSV. Fields beyond `op` and `tax_id` are optional
/// and only consulted by the operations that need them.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationRecord {
    #[serde(rename = "op")]
    pub op_type: OperationType,
    pub tax_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub account: Option<u32>,
    #[serde(default)]
    pub amount: Option<Decimal>,
}
