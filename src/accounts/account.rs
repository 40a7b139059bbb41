use chrono::Utc;
use rust_decimal::Decimal;

use crate::errors::BankError;
use crate::history::History;

/// Every account is opened at the same fixed branch.
pub const BRANCH: &str = "0001";

/// Maximum number of ledger entries an account may post per calendar day.
pub const DAILY_TRANSACTION_CAP: usize = 10;

/// Extra withdrawal rules carried by checking accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckingPolicy {
    pub withdrawal_ceiling: Decimal,
    pub daily_withdrawal_cap: usize,
}

impl Default for CheckingPolicy {
    fn default() -> Self {
        Self {
            withdrawal_ceiling: Decimal::from(500),
            daily_withdrawal_cap: 3,
        }
    }
}

/// A single bank account: a balance, its history, and the rules that guard
/// both. The balance never goes negative; mutation happens only through
/// `deposit` and `withdraw`.
#[derive(Debug)]
pub struct Account {
    number: u32,
    branch: &'static str,
    owner_tax_id: String,
    balance: Decimal,
    history: History,
    checking: Option<CheckingPolicy>,
}

impl Account {
    pub fn new(number: u32, owner_tax_id: impl Into<String>) -> Self {
        Self {
            number,
            branch: BRANCH,
            owner_tax_id: owner_tax_id.into(),
            balance: Decimal::ZERO,
            history: History::new(),
            checking: None,
        }
    }

    pub fn new_checking(number: u32, owner_tax_id: impl Into<String>) -> Self {
        Self {
            checking: Some(CheckingPolicy::default()),
            ..Self::new(number, owner_tax_id)
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn branch(&self) -> &str {
        self.branch
    }

    pub fn owner_tax_id(&self) -> &str {
        &self.owner_tax_id
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn checking(&self) -> Option<&CheckingPolicy> {
        self.checking.as_ref()
    }

    /// True while the account may still post transactions today.
    pub fn check_transaction_limit(&self) -> bool {
        self.history.count_on(Utc::now().date_naive()) < DAILY_TRANSACTION_CAP
    }

    /// Credits the amount. The ledger entry is appended by the transaction
    /// that drives this call, not here.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), BankError> {
        if !self.check_transaction_limit() {
            return Err(BankError::TransactionLimitExceeded {
                cap: DAILY_TRANSACTION_CAP,
            });
        }
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidAmount { amount });
        }
        self.balance += amount;
        Ok(())
    }

    /// Debits the amount. Checking accounts evaluate their own count cap
    /// and per-operation ceiling before the shared rules, so a ceiling
    /// violation never consumes a daily-cap slot.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), BankError> {
        if let Some(policy) = &self.checking {
            let today = Utc::now().date_naive();
            if self.history.withdrawal_count_on(today) >= policy.daily_withdrawal_cap {
                return Err(BankError::WithdrawalLimitExceeded {
                    cap: policy.daily_withdrawal_cap,
                });
            }
            if amount > policy.withdrawal_ceiling {
                return Err(BankError::WithdrawalCeilingExceeded {
                    requested: amount,
                    ceiling: policy.withdrawal_ceiling,
                });
            }
        }
        self.withdraw_base(amount)
    }

    // Funds-sufficiency and daily-cap rules shared by every account kind.
    fn withdraw_base(&mut self, amount: Decimal) -> Result<(), BankError> {
        if !self.check_transaction_limit() {
            return Err(BankError::TransactionLimitExceeded {
                cap: DAILY_TRANSACTION_CAP,
            });
        }
        if amount > self.balance {
            return Err(BankError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidAmount { amount });
        }
        self.balance -= amount;
        Ok(())
    }

    pub(crate) fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }
}
