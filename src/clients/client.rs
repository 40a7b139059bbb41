use crate::accounts::account::Account;
use crate::errors::BankError;
use crate::transactions::Transaction;

/// An account holder. Identity fields are opaque strings to the core; the
/// tax id doubles as the lookup key and is kept unique by the bank registry.
///
/// Accounts are stored in creation order, and the only way a transaction
/// reaches one of them is through `submit_transaction`.
#[derive(Debug)]
pub struct Client {
    name: String,
    birth_date: String,
    tax_id: String,
    address: String,
    accounts: Vec<Account>,
}

impl Client {
    pub fn new(
        name: impl Into<String>,
        birth_date: impl Into<String>,
        tax_id: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            birth_date: birth_date.into(),
            tax_id: tax_id.into(),
            address: address.into(),
            accounts: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_date(&self) -> &str {
        &self.birth_date
    }

    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn add_account(&mut self, account: Account) {
        self.accounts.push(account);
    }

    pub fn account(&self, number: u32) -> Option<&Account> {
        self.accounts.iter().find(|acc| acc.number() == number)
    }

    fn account_mut(&mut self, number: u32) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|acc| acc.number() == number)
    }

    /// Registers a transaction against one of this client's accounts.
    /// A number the client does not own fails with `AccountNotOwned`.
    pub fn submit_transaction(
        &mut self,
        number: u32,
        transaction: Transaction,
    ) -> Result<(), BankError> {
        let account = self
            .account_mut(number)
            .ok_or(BankError::AccountNotOwned { number })?;
        transaction.register_against(account)
    }
}
