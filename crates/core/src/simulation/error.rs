//! Simulation error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Simulation-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// Invalid return rate (must be > 0 and at most 200%).
    #[error("Return rate must be between 0 and 200 percent, got {rate}")]
    InvalidRate {
        /// The offending rate.
        rate: Decimal,
    },
}
