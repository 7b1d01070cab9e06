//! Workflow service for transaction state transitions.
//!
//! This module implements the state machine logic for moving
//! transactions through the withdrawal approval lifecycle.

use chrono::Utc;

use crate::workflow::error::WorkflowError;
use crate::workflow::types::{TransactionKind, TransactionStatus, WorkflowAction};

/// Stateless service for validating transaction workflow transitions.
///
/// All methods are associated functions that validate a transition against
/// the transaction's current state and return the `WorkflowAction` to
/// persist, including the audit trail fields.
pub struct WorkflowService;

impl WorkflowService {
    /// Returns the status a newly created transaction starts in.
    ///
    /// Deposits settle instantly (`Approved`); withdrawals wait for an
    /// admin decision (`Pending`).
    #[must_use]
    pub fn initial_status(kind: TransactionKind) -> TransactionStatus {
        if kind.requires_approval() {
            TransactionStatus::Pending
        } else {
            TransactionStatus::Approved
        }
    }

    /// Approve a pending withdrawal.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the transaction
    /// * `kind` - The transaction's kind
    /// * `decided_by` - The admin making the decision
    ///
    /// # Returns
    /// * `Ok(WorkflowAction::Approve)` if the transition is valid
    /// * `Err(WorkflowError::NotAWithdrawal)` for deposits
    /// * `Err(WorkflowError::InvalidTransition)` if not in Pending status
    pub fn approve(
        current_status: TransactionStatus,
        kind: TransactionKind,
        decided_by: &str,
    ) -> Result<WorkflowAction, WorkflowError> {
        if !kind.requires_approval() {
            return Err(WorkflowError::NotAWithdrawal { kind });
        }

        match current_status {
            TransactionStatus::Pending => Ok(WorkflowAction::Approve {
                new_status: TransactionStatus::Approved,
                decided_by: decided_by.to_string(),
                decided_at: Utc::now(),
            }),
            _ => Err(WorkflowError::InvalidTransition {
                from: current_status,
                to: TransactionStatus::Approved,
            }),
        }
    }

    /// Reject a pending transaction.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the transaction
    /// * `decided_by` - The admin making the decision
    ///
    /// # Returns
    /// * `Ok(WorkflowAction::Reject)` if the transition is valid
    /// * `Err(WorkflowError::InvalidTransition)` if not in Pending status
    pub fn reject(
        current_status: TransactionStatus,
        decided_by: &str,
    ) -> Result<WorkflowAction, WorkflowError> {
        match current_status {
            TransactionStatus::Pending => Ok(WorkflowAction::Reject {
                new_status: TransactionStatus::Rejected,
                decided_by: decided_by.to_string(),
                decided_at: Utc::now(),
            }),
            _ => Err(WorkflowError::InvalidTransition {
                from: current_status,
                to: TransactionStatus::Rejected,
            }),
        }
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Pending → Approved (approve)
    /// - Pending → Rejected (reject)
    ///
    /// # Arguments
    /// * `from` - The current status
    /// * `to` - The target status
    ///
    /// # Returns
    /// `true` if the transition is valid, `false` otherwise
    #[must_use]
    pub fn is_valid_transition(from: TransactionStatus, to: TransactionStatus) -> bool {
        matches!(
            (from, to),
            (
                TransactionStatus::Pending,
                TransactionStatus::Approved | TransactionStatus::Rejected
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposits_start_approved() {
        assert_eq!(
            WorkflowService::initial_status(TransactionKind::Deposit),
            TransactionStatus::Approved
        );
    }

    #[test]
    fn test_withdrawals_start_pending() {
        assert_eq!(
            WorkflowService::initial_status(TransactionKind::Withdrawal),
            TransactionStatus::Pending
        );
    }

    #[test]
    fn test_approve_from_pending() {
        let result =
            WorkflowService::approve(TransactionStatus::Pending, TransactionKind::Withdrawal, "admin");
        assert!(result.is_ok());
        let action = result.unwrap();
        assert_eq!(action.new_status(), TransactionStatus::Approved);
        assert_eq!(action.decided_by(), "admin");
    }

    #[test]
    fn test_approve_from_terminal_fails() {
        for status in [TransactionStatus::Approved, TransactionStatus::Rejected] {
            let result = WorkflowService::approve(status, TransactionKind::Withdrawal, "admin");
            assert!(matches!(
                result,
                Err(WorkflowError::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn test_approve_deposit_fails() {
        let result =
            WorkflowService::approve(TransactionStatus::Pending, TransactionKind::Deposit, "admin");
        assert!(matches!(result, Err(WorkflowError::NotAWithdrawal { .. })));
    }

    #[test]
    fn test_reject_from_pending() {
        let result = WorkflowService::reject(TransactionStatus::Pending, "admin");
        assert!(result.is_ok());
        let action = result.unwrap();
        assert_eq!(action.new_status(), TransactionStatus::Rejected);
        assert_eq!(action.decided_by(), "admin");
    }

    #[test]
    fn test_reject_from_terminal_fails() {
        for status in [TransactionStatus::Approved, TransactionStatus::Rejected] {
            let result = WorkflowService::reject(status, "admin");
            assert!(matches!(
                result,
                Err(WorkflowError::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn test_is_valid_transition() {
        assert!(WorkflowService::is_valid_transition(
            TransactionStatus::Pending,
            TransactionStatus::Approved
        ));
        assert!(WorkflowService::is_valid_transition(
            TransactionStatus::Pending,
            TransactionStatus::Rejected
        ));
        assert!(!WorkflowService::is_valid_transition(
            TransactionStatus::Approved,
            TransactionStatus::Rejected
        ));
        assert!(!WorkflowService::is_valid_transition(
            TransactionStatus::Rejected,
            TransactionStatus::Approved
        ));
        assert!(!WorkflowService::is_valid_transition(
            TransactionStatus::Approved,
            TransactionStatus::Pending
        ));
    }
}
