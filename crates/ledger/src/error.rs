//! Error types for ledger operations.
//!
//! Domain failures are typed outcomes the caller is expected to handle;
//! storage faults pass through as [`LedgerError::Database`] untouched.

use rust_decimal::Decimal;
use sea_orm::DbErr;

use vestra_core::auth::AuthError;
use vestra_core::ledger::BalanceError;
use vestra_core::simulation::SimulationError;
use vestra_core::workflow::{TransactionKind, TransactionStatus};
use vestra_db::repositories::{AccountError, TransactionError};

/// Error types for ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Amount is zero, negative, or not representable in minor units.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending amount.
        amount: Decimal,
    },

    /// Debit exceeds the live balance.
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// What the withdrawal asked for.
        requested: Decimal,
        /// What the account held at decision time.
        available: Decimal,
    },

    /// Account does not exist.
    #[error("Account not found: {username}")]
    AccountNotFound {
        /// The unknown username.
        username: String,
    },

    /// Username already taken.
    #[error("Account already exists: {username}")]
    AccountExists {
        /// The taken username.
        username: String,
    },

    /// Transaction does not exist.
    #[error("Transaction not found: {id}")]
    TransactionNotFound {
        /// The unknown id.
        id: i64,
    },

    /// Decision attempted on a record that is no longer pending.
    #[error("Transaction {id} is not pending (status: {status})")]
    NotPending {
        /// The record id.
        id: i64,
        /// The status the record already reached.
        status: TransactionStatus,
    },

    /// Decision attempted on something other than a withdrawal.
    #[error("Transaction {id} is not a withdrawal (kind: {kind})")]
    NotAWithdrawal {
        /// The record id.
        id: i64,
        /// The record's actual kind.
        kind: TransactionKind,
    },

    /// Caller lacks the admin role.
    #[error("Not authorized: {username}")]
    Forbidden {
        /// The caller that was refused.
        username: String,
    },

    /// Growth rate outside the accepted range.
    #[error("Invalid growth rate: {rate}")]
    InvalidRate {
        /// The offending rate, in percent.
        rate: Decimal,
    },

    /// The account's lock could not be acquired within the bounded wait.
    #[error("Account busy: {username}")]
    Busy {
        /// The contended account.
        username: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Role directory error.
    #[error(transparent)]
    Directory(#[from] anyhow::Error),
}

impl From<BalanceError> for LedgerError {
    fn from(err: BalanceError) -> Self {
        match err {
            BalanceError::InvalidAmount { amount }
            | BalanceError::AmountOutOfRange { amount } => Self::InvalidAmount { amount },
            BalanceError::InsufficientFunds {
                requested,
                available,
            } => Self::InsufficientFunds {
                requested,
                available,
            },
        }
    }
}

impl From<AccountError> for LedgerError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(username) => Self::AccountNotFound { username },
            AccountError::AlreadyExists(username) => Self::AccountExists { username },
            AccountError::Database(e) => Self::Database(e),
        }
    }
}

impl From<TransactionError> for LedgerError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::NotFound(id) => Self::TransactionNotFound { id },
            TransactionError::Database(e) => Self::Database(e),
        }
    }
}

impl From<AuthError> for LedgerError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotAuthorized { username } => Self::Forbidden { username },
        }
    }
}

impl From<SimulationError> for LedgerError {
    fn from(err: SimulationError) -> Self {
        match err {
            SimulationError::InvalidRate { rate } => Self::InvalidRate { rate },
        }
    }
}
