//! Core business logic for Vestra.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Accounts, transactions, and balance arithmetic
//! - `workflow` - The transaction lifecycle state machine
//! - `auth` - Roles and the identity-store seam
//! - `simulation` - Simulated return calculation

pub mod auth;
pub mod ledger;
pub mod simulation;
pub mod workflow;
