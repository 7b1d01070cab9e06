//! Ledger domain logic.
//!
//! This module implements the core ledger functionality:
//! - Account and transaction aggregates
//! - Balance arithmetic on exact minor units
//! - Amount validation at the workflow boundary
//! - Error types for balance rules

pub mod account;
pub mod balance;
pub mod error;
pub mod transaction;
pub mod validation;

#[cfg(test)]
mod balance_props;

pub use account::Account;
pub use balance::{apply, balance_of, credit, debit};
pub use error::BalanceError;
pub use transaction::Transaction;
pub use validation::validate_amount;
