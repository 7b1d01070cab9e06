//! Simulated return calculation.

pub mod error;
pub mod growth;

pub use error::SimulationError;
pub use growth::{growth_amount, validate_rate};
