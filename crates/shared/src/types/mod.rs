//! Common types used across the application.

pub mod money;

pub use money::{MINOR_UNIT_SCALE, from_minor_units, to_minor_units};
