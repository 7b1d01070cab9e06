//! Account balance arithmetic.
//!
//! All balance math happens on stored integer minor units so it is exact;
//! decimals appear only in the errors and the audit-side recomputation.

use rust_decimal::Decimal;
use vestra_shared::types::money::from_minor_units;

use super::error::BalanceError;
use super::transaction::Transaction;
use crate::workflow::types::{TransactionKind, TransactionStatus};

/// Applies a credit to a balance.
///
/// # Errors
///
/// Returns [`BalanceError::InvalidAmount`] for non-positive amounts and
/// [`BalanceError::AmountOutOfRange`] if the new balance would overflow.
pub fn credit(balance_minor: i64, amount_minor: i64) -> Result<i64, BalanceError> {
    ensure_positive(amount_minor)?;

    balance_minor
        .checked_add(amount_minor)
        .ok_or(BalanceError::AmountOutOfRange {
            amount: from_minor_units(amount_minor),
        })
}

/// Applies a debit to a balance.
///
/// The sufficiency check happens here, against the balance passed in, so the
/// caller decides *when* the live balance is read. A debit of the exact
/// balance is allowed and leaves zero.
///
/// # Errors
///
/// Returns [`BalanceError::InvalidAmount`] for non-positive amounts and
/// [`BalanceError::InsufficientFunds`] if the amount exceeds the balance.
pub fn debit(balance_minor: i64, amount_minor: i64) -> Result<i64, BalanceError> {
    ensure_positive(amount_minor)?;

    if amount_minor > balance_minor {
        return Err(BalanceError::InsufficientFunds {
            requested: from_minor_units(amount_minor),
            available: from_minor_units(balance_minor),
        });
    }

    Ok(balance_minor - amount_minor)
}

/// Applies a transaction effect to a balance: deposits credit, withdrawals
/// debit.
pub fn apply(
    balance_minor: i64,
    kind: TransactionKind,
    amount_minor: i64,
) -> Result<i64, BalanceError> {
    match kind {
        TransactionKind::Deposit => credit(balance_minor, amount_minor),
        TransactionKind::Withdrawal => debit(balance_minor, amount_minor),
    }
}

/// Recomputes an account balance from its transaction history.
///
/// Only `approved` transactions have an effect: deposits add, withdrawals
/// subtract. The stored per-account balance must always equal this sum.
#[must_use]
pub fn balance_of<'a, I>(transactions: I) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|tx| tx.status == TransactionStatus::Approved)
        .map(Transaction::signed_amount)
        .sum()
}

fn ensure_positive(amount_minor: i64) -> Result<(), BalanceError> {
    if amount_minor <= 0 {
        return Err(BalanceError::InvalidAmount {
            amount: from_minor_units(amount_minor),
        });
    }
    Ok(())
}
