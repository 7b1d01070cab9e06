//! Business rule validation for ledger operations.

use rust_decimal::Decimal;
use vestra_shared::types::money::to_minor_units;

use super::error::BalanceError;

/// Validates a caller-supplied amount and converts it to minor units.
///
/// This is the single boundary where decimal amounts become stored integers:
/// the amount must be strictly positive, fit the representable range, and not
/// round away to zero at storage scale.
///
/// # Errors
///
/// Returns [`BalanceError::InvalidAmount`] for amounts ≤ 0 or amounts that
/// round to zero, and [`BalanceError::AmountOutOfRange`] for amounts too
/// large to store.
pub fn validate_amount(amount: Decimal) -> Result<i64, BalanceError> {
    if amount <= Decimal::ZERO {
        return Err(BalanceError::InvalidAmount { amount });
    }

    let minor = to_minor_units(amount).ok_or(BalanceError::AmountOutOfRange { amount })?;
    if minor == 0 {
        return Err(BalanceError::InvalidAmount { amount });
    }

    Ok(minor)
}
