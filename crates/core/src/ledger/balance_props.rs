//! Property-based tests for balance arithmetic.
//!
//! Randomized checks of the non-negativity invariant and of the agreement
//! between the running balance and the transaction history it is derived
//! from.

use chrono::Utc;
use proptest::prelude::*;
use vestra_shared::types::money::from_minor_units;

use super::balance::{apply, balance_of, credit, debit};
use super::error::BalanceError;
use super::transaction::Transaction;
use crate::workflow::types::{TransactionKind, TransactionStatus};

fn arb_amount_minor() -> impl Strategy<Value = i64> {
    1_i64..=1_000_000_000
}

fn arb_balance_minor() -> impl Strategy<Value = i64> {
    0_i64..=1_000_000_000
}

fn arb_kind() -> impl Strategy<Value = TransactionKind> {
    prop_oneof![
        Just(TransactionKind::Deposit),
        Just(TransactionKind::Withdrawal),
    ]
}

/// One randomized ledger step: a kind, an amount, and for withdrawals
/// whether the admin decides it (undecided ones stay pending).
fn arb_op() -> impl Strategy<Value = (TransactionKind, i64, bool)> {
    (arb_kind(), arb_amount_minor(), any::<bool>())
}

fn record(id: i64, kind: TransactionKind, amount_minor: i64, status: TransactionStatus) -> Transaction {
    Transaction {
        id,
        username: "investor".to_string(),
        kind,
        amount: from_minor_units(amount_minor),
        status,
        memo: None,
        created_at: Utc::now(),
        decided_at: None,
        decided_by: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A debit either leaves a non-negative balance or fails without effect.
    #[test]
    fn prop_debit_never_overdraws(
        balance in arb_balance_minor(),
        amount in arb_amount_minor(),
    ) {
        match debit(balance, amount) {
            Ok(remaining) => {
                prop_assert!(remaining >= 0);
                prop_assert_eq!(remaining, balance - amount);
            }
            Err(BalanceError::InsufficientFunds { .. }) => {
                prop_assert!(amount > balance);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    /// Crediting then debiting the same amount restores the balance.
    #[test]
    fn prop_credit_then_debit_round_trips(
        balance in arb_balance_minor(),
        amount in arb_amount_minor(),
    ) {
        let credited = credit(balance, amount).unwrap();
        prop_assert_eq!(debit(credited, amount), Ok(balance));
    }

    /// The running balance always equals the sum of approved effects in the
    /// transaction history, and never goes negative. Pending and rejected
    /// records contribute nothing.
    #[test]
    fn prop_balance_matches_history(ops in prop::collection::vec(arb_op(), 1..40)) {
        let mut balance = 0_i64;
        let mut history = Vec::new();

        for (id, (kind, amount, decide)) in (1..).zip(ops) {
            match kind {
                TransactionKind::Deposit => {
                    balance = apply(balance, kind, amount).unwrap();
                    history.push(record(id, kind, amount, TransactionStatus::Approved));
                }
                TransactionKind::Withdrawal if !decide => {
                    // Requested but not yet decided: no balance effect.
                    history.push(record(id, kind, amount, TransactionStatus::Pending));
                }
                TransactionKind::Withdrawal => match apply(balance, kind, amount) {
                    Ok(remaining) => {
                        balance = remaining;
                        history.push(record(id, kind, amount, TransactionStatus::Approved));
                    }
                    Err(BalanceError::InsufficientFunds { .. }) => {
                        history.push(record(id, kind, amount, TransactionStatus::Rejected));
                    }
                    Err(other) => prop_assert!(false, "unexpected error: {other}"),
                },
            }

            prop_assert!(balance >= 0);
            prop_assert_eq!(balance_of(&history), from_minor_units(balance));
        }
    }
}
