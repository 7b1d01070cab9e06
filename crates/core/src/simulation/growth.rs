//! Simulated return calculation.

use rust_decimal::{Decimal, RoundingStrategy};
use vestra_shared::types::money::MINOR_UNIT_SCALE;

use super::error::SimulationError;

/// Validates a return rate, in percent.
///
/// Rates are bounded to the range the simulator ever offered: strictly
/// positive and at most 200%.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidRate`] outside (0, 200].
pub fn validate_rate(rate_percent: Decimal) -> Result<(), SimulationError> {
    if rate_percent <= Decimal::ZERO || rate_percent > Decimal::from(200) {
        return Err(SimulationError::InvalidRate { rate: rate_percent });
    }
    Ok(())
}

/// Computes the simulated return on a balance at the given percentage rate,
/// rounded to storage scale with banker's rounding.
///
/// The result can legitimately round to zero on a dust balance; the caller
/// decides whether that is worth posting.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidRate`] if the rate is out of range.
pub fn growth_amount(balance: Decimal, rate_percent: Decimal) -> Result<Decimal, SimulationError> {
    validate_rate(rate_percent)?;

    let amount = balance * rate_percent / Decimal::ONE_HUNDRED;
    Ok(amount.round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::MidpointNearestEven))
}
