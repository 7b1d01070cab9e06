//! Error types for balance arithmetic and amount validation.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by balance rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// Amount is zero, negative, or rounds to nothing at storage scale.
    #[error("Amount must be positive, got {amount}")]
    InvalidAmount {
        /// The offending amount.
        amount: Decimal,
    },

    /// Amount does not fit the representable range of a stored balance.
    #[error("Amount {amount} is out of the representable range")]
    AmountOutOfRange {
        /// The offending amount.
        amount: Decimal,
    },

    /// Debit exceeds the live balance at the instant of execution.
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// The amount the debit asked for.
        requested: Decimal,
        /// The balance at the instant of the debit.
        available: Decimal,
    },
}
