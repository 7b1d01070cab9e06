//! Workflow domain types for the transaction lifecycle.
//!
//! This module defines the types used for managing transaction
//! status transitions and decision actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction status in the withdrawal approval workflow.
///
/// The valid transitions are:
/// - Pending → Approved (approve)
/// - Pending → Rejected (reject)
///
/// Deposits settle instantly and are created directly in `Approved`;
/// withdrawals are created in `Pending`. `Approved` and `Rejected` are
/// terminal: no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Withdrawal is awaiting an admin decision.
    Pending,
    /// Transaction has settled and affected the balance.
    Approved,
    /// Transaction was declined and never affected the balance.
    Rejected,
}

impl TransactionStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if the status can never change again.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The direction of a transaction relative to the account balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money entering the account.
    Deposit,
    /// Money leaving the account.
    Withdrawal,
}

impl TransactionKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
        }
    }

    /// Parses a kind from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "deposit" => Some(Self::Deposit),
            "withdrawal" => Some(Self::Withdrawal),
            _ => None,
        }
    }

    /// Returns true if this kind waits for an admin decision before settling.
    #[must_use]
    pub fn requires_approval(&self) -> bool {
        matches!(self, Self::Withdrawal)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Workflow action representing a decision on a pending withdrawal,
/// with the audit data to persist alongside the status change.
#[derive(Debug, Clone)]
pub enum WorkflowAction {
    /// Approve a pending withdrawal.
    Approve {
        /// The new status after approval.
        new_status: TransactionStatus,
        /// The admin who made the decision.
        decided_by: String,
        /// When the decision was made.
        decided_at: DateTime<Utc>,
    },
    /// Reject a pending withdrawal.
    Reject {
        /// The new status after rejection.
        new_status: TransactionStatus,
        /// The admin who made the decision.
        decided_by: String,
        /// When the decision was made.
        decided_at: DateTime<Utc>,
    },
}

impl WorkflowAction {
    /// Returns the status the transaction moves to.
    #[must_use]
    pub fn new_status(&self) -> TransactionStatus {
        match self {
            Self::Approve { new_status, .. } | Self::Reject { new_status, .. } => *new_status,
        }
    }

    /// Returns the admin who made the decision.
    #[must_use]
    pub fn decided_by(&self) -> &str {
        match self {
            Self::Approve { decided_by, .. } | Self::Reject { decided_by, .. } => decided_by,
        }
    }

    /// Returns when the decision was made.
    #[must_use]
    pub fn decided_at(&self) -> DateTime<Utc> {
        match self {
            Self::Approve { decided_at, .. } | Self::Reject { decided_at, .. } => *decided_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in [
            TransactionStatus::Pending,
            TransactionStatus::Approved,
            TransactionStatus::Rejected,
        ] {
            assert_eq!(TransactionStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TransactionStatus::parse("PENDING"), Some(TransactionStatus::Pending));
        assert_eq!(TransactionStatus::parse("unknown"), None);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!TransactionStatus::Pending.is_terminal());
        assert!(TransactionStatus::Approved.is_terminal());
        assert!(TransactionStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_kind_round_trips_through_strings() {
        for kind in [TransactionKind::Deposit, TransactionKind::Withdrawal] {
            assert_eq!(TransactionKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(TransactionKind::parse("bogus"), None);
    }

    #[test]
    fn test_only_withdrawals_require_approval() {
        assert!(!TransactionKind::Deposit.requires_approval());
        assert!(TransactionKind::Withdrawal.requires_approval());
    }
}
