//! Property-based tests for `WorkflowService`.
//!
//! Randomized checks that the state machine never leaves a terminal state
//! and that decisions are only reachable from `Pending`.

use proptest::prelude::*;

use crate::workflow::error::WorkflowError;
use crate::workflow::service::WorkflowService;
use crate::workflow::types::{TransactionKind, TransactionStatus};

/// Strategy for generating random `TransactionStatus` values.
fn arb_status() -> impl Strategy<Value = TransactionStatus> {
    prop_oneof![
        Just(TransactionStatus::Pending),
        Just(TransactionStatus::Approved),
        Just(TransactionStatus::Rejected),
    ]
}

/// Strategy for generating random `TransactionKind` values.
fn arb_kind() -> impl Strategy<Value = TransactionKind> {
    prop_oneof![
        Just(TransactionKind::Deposit),
        Just(TransactionKind::Withdrawal),
    ]
}

/// Strategy for generating usernames.
fn arb_username() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{2,15}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A terminal status never transitions again, whatever the decision.
    #[test]
    fn prop_terminal_statuses_are_immutable(
        status in arb_status(),
        kind in arb_kind(),
        admin in arb_username(),
    ) {
        prop_assume!(status.is_terminal());

        prop_assert!(WorkflowService::approve(status, kind, &admin).is_err());
        prop_assert!(matches!(
            WorkflowService::reject(status, &admin),
            Err(WorkflowError::InvalidTransition { .. })
        ));
    }

    /// Approval succeeds exactly when the transaction is a pending withdrawal.
    #[test]
    fn prop_approve_requires_pending_withdrawal(
        status in arb_status(),
        kind in arb_kind(),
        admin in arb_username(),
    ) {
        let result = WorkflowService::approve(status, kind, &admin);
        let should_succeed =
            status == TransactionStatus::Pending && kind == TransactionKind::Withdrawal;
        prop_assert_eq!(result.is_ok(), should_succeed);
    }

    /// Decisions always land in a terminal state and carry the deciding admin.
    #[test]
    fn prop_decisions_are_terminal(admin in arb_username()) {
        let approve =
            WorkflowService::approve(TransactionStatus::Pending, TransactionKind::Withdrawal, &admin)
                .unwrap();
        prop_assert!(approve.new_status().is_terminal());
        prop_assert_eq!(approve.decided_by(), &admin);

        let reject = WorkflowService::reject(TransactionStatus::Pending, &admin).unwrap();
        prop_assert!(reject.new_status().is_terminal());
        prop_assert_eq!(reject.decided_by(), &admin);
    }

    /// `is_valid_transition` agrees with the decision functions.
    #[test]
    fn prop_transition_table_matches_decisions(from in arb_status(), to in arb_status()) {
        let valid = WorkflowService::is_valid_transition(from, to);
        let reachable = from == TransactionStatus::Pending && to.is_terminal();
        prop_assert_eq!(valid, reachable);
    }
}
