//! Workflow error types for the transaction lifecycle.

use thiserror::Error;

use crate::workflow::types::{TransactionKind, TransactionStatus};

/// Errors that can occur during workflow transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: TransactionStatus,
        /// The attempted target status.
        to: TransactionStatus,
    },

    /// Attempted to approve a transaction that is not a withdrawal.
    /// Deposits settle instantly and never need a decision.
    #[error("Only withdrawals can be approved, not a {kind}")]
    NotAWithdrawal {
        /// The offending transaction kind.
        kind: TransactionKind,
    },
}
