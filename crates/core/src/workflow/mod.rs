//! Transaction workflow management for Vestra.
//!
//! This module implements the transaction lifecycle state machine:
//! deposits settle instantly, withdrawals move from `pending` to a
//! terminal `approved` or `rejected` through an admin decision.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (status, kind, decision actions)
//! - `error` - Workflow-specific error types
//! - `service` - State transition logic

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::WorkflowError;
pub use service::WorkflowService;
pub use types::{TransactionKind, TransactionStatus, WorkflowAction};
