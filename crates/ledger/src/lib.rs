//! Ledger services for Vestra.
//!
//! This crate wires the pure rules from `vestra-core` to the persistence
//! layer in `vestra-db`:
//!
//! - `engine` - the balance engine, sole writer of account balances
//! - `service` - the caller-facing workflow (deposits, withdrawal
//!   requests, decisions, balances, accrual)
//! - `approval` - the admin batch approval service
//! - `locks` - per-account mutual exclusion with bounded waits
//! - `roles` - the accounts-table-backed role directory

pub mod approval;
mod convert;
pub mod engine;
pub mod error;
pub mod locks;
pub mod roles;
pub mod service;

pub use approval::{ApprovalService, BatchDecision, BatchOutcome};
pub use engine::BalanceEngine;
pub use error::LedgerError;
pub use locks::AccountLocks;
pub use roles::AccountRoles;
pub use service::{LedgerService, LedgerStats};
