use rust_decimal::Decimal;
use thiserror::Error;

/// Error type that captures every recoverable ledger failure.
///
/// All variants are local, retryable conditions: the caller decides whether
/// to surface the message, skip the operation, or abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    #[error("invalid amount: {amount}")]
    InvalidAmount { amount: Decimal },
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("daily transaction cap of {cap} reached")]
    TransactionLimitExceeded { cap: usize },
    #[error("daily withdrawal cap of {cap} reached")]
    WithdrawalLimitExceeded { cap: usize },
    #[error("withdrawal of {requested} exceeds the {ceiling} per-operation ceiling")]
    WithdrawalCeilingExceeded {
        requested: Decimal,
        ceiling: Decimal,
    },
    #[error("account {number} does not belong to this client")]
    AccountNotOwned { number: u32 },
    #[error("no client registered under tax id {tax_id}")]
    UnknownClient { tax_id: String },
    #[error("a client with tax id {tax_id} already exists")]
    DuplicateClient { tax_id: String },
}
