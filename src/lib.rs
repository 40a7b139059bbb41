pub mod accounts;
pub mod clients;
pub mod engine;
pub mod errors;
pub mod history;
pub mod orchestrator;
pub mod transactions;

pub use orchestrator::run;
pub use engine::Bank;
pub use errors::BankError;
pub use accounts::{Account, CheckingPolicy};
pub use clients::Client;
pub use history::{History, LedgerEntry};
pub use transactions::{OperationRecord, Transaction, TransactionKind};
