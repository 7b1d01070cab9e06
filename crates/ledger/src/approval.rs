//! Admin batch approval service.
//!
//! A thin client of the balance engine: it lists the pending withdrawal
//! queue and applies `approve` to a set of ids, reporting a per-id
//! outcome. One underfunded or already-decided id never blocks the rest
//! of the batch; a storage fault aborts it.

use serde::Serialize;
use tracing::info;

use vestra_core::auth::RoleDirectory;
use vestra_core::ledger::Transaction;
use vestra_db::repositories::TransactionRepository;

use crate::convert;
use crate::engine::BalanceEngine;
use crate::error::LedgerError;
use crate::roles;

/// How a single id in a batch was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchDecision {
    /// Debit succeeded; the withdrawal is settled.
    Approved,
    /// Funds no longer covered the amount; the record is rejected.
    Rejected,
    /// No pending withdrawal under that id.
    NotFound,
}

/// Per-id result of a batch approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    /// The record id the decision applied to.
    pub id: i64,
    /// What happened to it.
    pub decision: BatchDecision,
}

/// The admin approval service.
#[derive(Debug, Clone)]
pub struct ApprovalService<R: RoleDirectory> {
    engine: BalanceEngine,
    transactions: TransactionRepository,
    roles: R,
}

impl<R: RoleDirectory> ApprovalService<R> {
    /// Built through [`crate::LedgerService::approvals`] so the engine,
    /// and with it the per-account locks, stay shared.
    pub(crate) const fn new(
        engine: BalanceEngine,
        transactions: TransactionRepository,
        roles: R,
    ) -> Self {
        Self {
            engine,
            transactions,
            roles,
        }
    }

    /// Lists pending withdrawals in request order.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not an admin or the store fails.
    pub async fn list_pending(&self, admin: &str) -> Result<Vec<Transaction>, LedgerError> {
        roles::authorize(&self.roles, admin).await?;

        let records = self.transactions.list_pending_withdrawals().await?;
        Ok(records.into_iter().map(convert::to_transaction).collect())
    }

    /// Applies `approve` to each id independently.
    ///
    /// Ids resolve to `approved`, `rejected` (insufficient funds at
    /// decision time) or `notfound` (unknown, already decided, or not a
    /// withdrawal). Every id is attempted; already-recorded outcomes are
    /// never rolled back by a later id.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not an admin, or if a lock
    /// timeout or storage fault aborts the batch.
    pub async fn approve_batch(
        &self,
        admin: &str,
        ids: &[i64],
    ) -> Result<Vec<BatchOutcome>, LedgerError> {
        roles::authorize(&self.roles, admin).await?;

        let mut outcomes = Vec::with_capacity(ids.len());
        for &id in ids {
            let decision = match self.engine.settle_withdrawal(id, admin).await {
                Ok(_) => BatchDecision::Approved,
                Err(LedgerError::InsufficientFunds { .. }) => BatchDecision::Rejected,
                Err(
                    LedgerError::TransactionNotFound { .. }
                    | LedgerError::NotPending { .. }
                    | LedgerError::NotAWithdrawal { .. },
                ) => BatchDecision::NotFound,
                Err(e) => return Err(e),
            };
            outcomes.push(BatchOutcome { id, decision });
        }

        info!(admin = %admin, decided = outcomes.len(), "Approval batch processed");
        Ok(outcomes)
    }
}
