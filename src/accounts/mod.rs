pub mod account;

pub use account::{Account, CheckingPolicy, BRANCH, DAILY_TRANSACTION_CAP};
