use std::collections::HashMap;

use csv::Writer;
use rust_decimal::Decimal;

use crate::accounts::account::{Account, DAILY_TRANSACTION_CAP};
use crate::clients::client::Client;
use crate::errors::BankError;
use crate::transactions::{OperationRecord, OperationType, Transaction};

/// Registry that owns every client and acts as the account factory.
///
/// This is the collaborator that enforces tax-id uniqueness and hands out
/// sequential account numbers; the per-account rules live in `Account`.
pub struct Bank {
    pub clients: HashMap<String, Client>,
    next_account_number: u32,
}

impl Bank {
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
            next_account_number: 1,
        }
    }

    pub fn register_client(
        &mut self,
        name: &str,
        birth_date: &str,
        tax_id: &str,
        address: &str,
    ) -> Result<(), BankError> {
        if self.clients.contains_key(tax_id) {
            return Err(BankError::DuplicateClient {
                tax_id: tax_id.to_string(),
            });
        }
        self.clients.insert(
            tax_id.to_string(),
            Client::new(name, birth_date, tax_id, address),
        );
        Ok(())
    }

    pub fn client(&self, tax_id: &str) -> Option<&Client> {
        self.clients.get(tax_id)
    }

    pub fn open_account(&mut self, tax_id: &str) -> Result<u32, BankError> {
        self.open(tax_id, false)
    }

    pub fn open_checking_account(&mut self, tax_id: &str) -> Result<u32, BankError> {
        self.open(tax_id, true)
    }

    fn open(&mut self, tax_id: &str, checking: bool) -> Result<u32, BankError> {
        let client = self
            .clients
            .get_mut(tax_id)
            .ok_or_else(|| BankError::UnknownClient {
                tax_id: tax_id.to_string(),
            })?;
        let number = self.next_account_number;
        let account = if checking {
            Account::new_checking(number, tax_id)
        } else {
            Account::new(number, tax_id)
        };
        client.add_account(account);
        self.next_account_number += 1;
        Ok(number)
    }

    pub fn deposit(&mut self, tax_id: &str, number: u32, amount: Decimal) -> Result<(), BankError> {
        self.submit(tax_id, number, Transaction::deposit(amount))
    }

    pub fn withdraw(
        &mut self,
        tax_id: &str,
        number: u32,
        amount: Decimal,
    ) -> Result<(), BankError> {
        self.submit(tax_id, number, Transaction::withdrawal(amount))
    }

    fn submit(
        &mut self,
        tax_id: &str,
        number: u32,
        transaction: Transaction,
    ) -> Result<(), BankError> {
        let client = self
            .clients
            .get_mut(tax_id)
            .ok_or_else(|| BankError::UnknownClient {
                tax_id: tax_id.to_string(),
            })?;
        client.submit_transaction(number, transaction)
    }

    /// Process a single operation record from the input CSV.
    pub fn process_operation(&mut self, record: OperationRecord) -> Result<(), BankError> {
        match record.op_type {
            OperationType::Register => self.register_client(
                record.name.as_deref().unwrap_or_default(),
                record.birth_date.as_deref().unwrap_or_default(),
                &record.tax_id,
                record.address.as_deref().unwrap_or_default(),
            ),
            OperationType::Open => self.open_account(&record.tax_id).map(|_| ()),
            OperationType::OpenChecking => self.open_checking_account(&record.tax_id).map(|_| ()),
            OperationType::Deposit | OperationType::Withdraw => {
                let (Some(number), Some(amount)) = (record.account, record.amount) else {
                    return Ok(());
                };
                // Fail fast on the cap before building a transaction, the
                // same pre-check the original menu flow performs.
                let account = self
                    .client(&record.tax_id)
                    .ok_or_else(|| BankError::UnknownClient {
                        tax_id: record.tax_id.clone(),
                    })?
                    .account(number)
                    .ok_or(BankError::AccountNotOwned { number })?;
                if !account.check_transaction_limit() {
                    return Err(BankError::TransactionLimitExceeded {
                        cap: DAILY_TRANSACTION_CAP,
                    });
                }
                match record.op_type {
                    OperationType::Deposit => self.deposit(&record.tax_id, number, amount),
                    _ => self.withdraw(&record.tax_id, number, amount),
                }
            }
            OperationType::Statement => {
                let Some(number) = record.account else {
                    return Ok(());
                };
                self.print_statement(&record.tax_id, number)
            }
        }
    }

    /// Prints an account statement to stdout: every ledger entry in
    /// chronological order, then the balance.
    fn print_statement(&self, tax_id: &str, number: u32) -> Result<(), BankError> {
        let client = self.client(tax_id).ok_or_else(|| BankError::UnknownClient {
            tax_id: tax_id.to_string(),
        })?;
        let account = client
            .account(number)
            .ok_or(BankError::AccountNotOwned { number })?;

        println!(
            "===== statement {}/{} ({}) =====",
            account.branch(),
            account.number(),
            client.name()
        );
        if account.history().entries().is_empty() {
            println!("no transactions recorded");
        }
        for entry in account.history().entries() {
            println!(
                "[{}] {}: {}",
                entry.timestamp().format("%d/%m/%Y %H:%M:%S"),
                entry.kind(),
                entry.amount().round_dp(2)
            );
        }
        println!("balance: {}", account.balance().round_dp(2));
        Ok(())
    }

    /// Output a summary of all accounts to stdout in CSV format,
    /// sorted by account number.
    pub fn output_accounts(&self) -> csv::Result<()> {
        let mut wtr = Writer::from_writer(std::io::stdout());
        wtr.write_record(["client", "account", "branch", "balance", "transactions"])?;

        let mut accounts: Vec<&Account> = self
            .clients
            .values()
            .flat_map(|client| client.accounts())
            .collect();
        accounts.sort_by_key(|account| account.number());

        for account in accounts {
            wtr.serialize((
                account.owner_tax_id(),
                account.number(),
                account.branch(),
                account.balance().round_dp(2),
                account.history().total_count(),
            ))?;
        }

        wtr.flush()?;
        Ok(())
    }
}

impl Default for Bank {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    const CPF: &str = "12345678901";

    fn decimal(amount: f64) -> Decimal {
        Decimal::from_f64(amount).unwrap()
    }

    fn bank_with_client() -> Bank {
        let mut bank = Bank::new();
        bank.register_client("Jo Soares", "01/01/1990", CPF, "Rua A, 1")
            .unwrap();
        bank
    }

    #[test]
    fn test_duplicate_tax_id_rejected() {
        let mut bank = bank_with_client();
        let err = bank
            .register_client("Outro Nome", "02/02/1992", CPF, "Rua B, 2")
            .unwrap_err();
        assert_eq!(
            err,
            BankError::DuplicateClient {
                tax_id: CPF.to_string()
            }
        );
        assert_eq!(bank.clients.len(), 1);
    }

    #[test]
    fn test_account_numbers_are_sequential_across_clients() {
        let mut bank = bank_with_client();
        bank.register_client("Maria Silva", "03/03/1993", "98765432100", "Rua C, 3")
            .unwrap();

        assert_eq!(bank.open_account(CPF).unwrap(), 1);
        assert_eq!(bank.open_checking_account("98765432100").unwrap(), 2);
        assert_eq!(bank.open_account(CPF).unwrap(), 3);

        let client = bank.client(CPF).unwrap();
        assert_eq!(client.accounts().len(), 2);
        assert_eq!(client.account(1).unwrap().branch(), "0001");
    }

    #[test]
    fn test_open_account_for_unknown_client() {
        let mut bank = Bank::new();
        let err = bank.open_account(CPF).unwrap_err();
        assert_eq!(
            err,
            BankError::UnknownClient {
                tax_id: CPF.to_string()
            }
        );
    }

    #[test]
    fn test_end_to_end_deposit_and_withdrawals() {
        let mut bank = bank_with_client();
        let number = bank.open_account(CPF).unwrap();

        bank.deposit(CPF, number, decimal(100.0)).unwrap();
        let account = bank.client(CPF).unwrap().account(number).unwrap();
        assert_eq!(account.balance(), decimal(100.0));
        assert_eq!(account.history().total_count(), 1);

        bank.withdraw(CPF, number, decimal(40.0)).unwrap();
        let account = bank.client(CPF).unwrap().account(number).unwrap();
        assert_eq!(account.balance(), decimal(60.0));
        assert_eq!(account.history().total_count(), 2);

        let err = bank.withdraw(CPF, number, decimal(1000.0)).unwrap_err();
        assert_eq!(
            err,
            BankError::InsufficientFunds {
                requested: decimal(1000.0),
                available: decimal(60.0),
            }
        );
        let account = bank.client(CPF).unwrap().account(number).unwrap();
        assert_eq!(account.balance(), decimal(60.0));
        assert_eq!(account.history().total_count(), 2);
    }

    #[test]
    fn test_daily_transaction_cap() {
        let mut bank = bank_with_client();
        let number = bank.open_account(CPF).unwrap();

        for _ in 0..DAILY_TRANSACTION_CAP {
            bank.deposit(CPF, number, decimal(1.0)).unwrap();
        }
        let err = bank.deposit(CPF, number, decimal(1.0)).unwrap_err();
        assert_eq!(
            err,
            BankError::TransactionLimitExceeded {
                cap: DAILY_TRANSACTION_CAP
            }
        );
        let err = bank.withdraw(CPF, number, decimal(1.0)).unwrap_err();
        assert_eq!(
            err,
            BankError::TransactionLimitExceeded {
                cap: DAILY_TRANSACTION_CAP
            }
        );

        let account = bank.client(CPF).unwrap().account(number).unwrap();
        assert_eq!(account.balance(), decimal(10.0));
        assert_eq!(account.history().total_count(), DAILY_TRANSACTION_CAP);
        assert!(!account.check_transaction_limit());
    }

    #[test]
    fn test_transaction_against_someone_elses_account() {
        let mut bank = bank_with_client();
        bank.register_client("Maria Silva", "03/03/1993", "98765432100", "Rua C, 3")
            .unwrap();
        let number = bank.open_account(CPF).unwrap();

        let err = bank
            .deposit("98765432100", number, decimal(10.0))
            .unwrap_err();
        assert_eq!(err, BankError::AccountNotOwned { number });
    }

    #[test]
    fn test_process_operation_records() {
        let mut bank = Bank::new();
        bank.process_operation(OperationRecord {
            op_type: OperationType::Register,
            tax_id: CPF.to_string(),
            name: Some("Jo Soares".to_string()),
            birth_date: Some("01/01/1990".to_string()),
            address: Some("Rua A, 1".to_string()),
            account: None,
            amount: None,
        })
        .unwrap();
        bank.process_operation(OperationRecord {
            op_type: OperationType::OpenChecking,
            tax_id: CPF.to_string(),
            name: None,
            birth_date: None,
            address: None,
            account: None,
            amount: None,
        })
        .unwrap();
        bank.process_operation(OperationRecord {
            op_type: OperationType::Deposit,
            tax_id: CPF.to_string(),
            name: None,
            birth_date: None,
            address: None,
            account: Some(1),
            amount: Some(decimal(250.0)),
        })
        .unwrap();

        let account = bank.client(CPF).unwrap().account(1).unwrap();
        assert!(account.checking().is_some());
        assert_eq!(account.balance(), decimal(250.0));
    }

    #[test]
    fn test_operation_without_amount_is_skipped() {
        let mut bank = bank_with_client();
        let number = bank.open_account(CPF).unwrap();
        bank.process_operation(OperationRecord {
            op_type: OperationType::Deposit,
            tax_id: CPF.to_string(),
            name: None,
            birth_date: None,
            address: None,
            account: Some(number),
            amount: None,
        })
        .unwrap();
        let account = bank.client(CPF).unwrap().account(number).unwrap();
        assert_eq!(account.history().total_count(), 0);
    }
}
