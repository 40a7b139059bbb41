pub mod transaction;

pub use transaction::{OperationRecord, OperationType, Transaction, TransactionKind};
