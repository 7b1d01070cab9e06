//! Balance engine: the single writer of account balances.
//!
//! Every mutation follows one discipline: acquire the account's lock with
//! a bounded wait, open one database transaction, re-read state through
//! that transaction, apply the rules from `vestra-core`, then write the
//! ledger record and the balance together and commit. A withdrawal is
//! therefore judged against the balance at decision time, not against
//! whatever the caller saw when the request was made.

use std::time::Duration;

use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tokio::sync::OwnedMutexGuard;

use vestra_core::ledger::{self, BalanceError, Transaction};
use vestra_core::simulation;
use vestra_core::workflow::{WorkflowError, WorkflowService};
use vestra_db::entities::sea_orm_active_enums::{TransactionKind, TransactionStatus};
use vestra_db::repositories::{AccountRepository, NewTransaction, TransactionRepository};
use vestra_shared::types::money::from_minor_units;

use crate::convert;
use crate::error::LedgerError;
use crate::locks::AccountLocks;

/// The single writer of account balances.
#[derive(Debug, Clone)]
pub struct BalanceEngine {
    db: DatabaseConnection,
    accounts: AccountRepository,
    transactions: TransactionRepository,
    locks: AccountLocks,
    lock_wait: Duration,
}

impl BalanceEngine {
    /// Creates an engine over the shared connection pool.
    #[must_use]
    pub fn new(db: DatabaseConnection, lock_wait: Duration) -> Self {
        Self {
            accounts: AccountRepository::new(db.clone()),
            transactions: TransactionRepository::new(db.clone()),
            locks: AccountLocks::new(),
            lock_wait,
            db,
        }
    }

    /// Credits an account: one approved deposit record plus the balance
    /// update, committed as a unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is invalid, the account is unknown,
    /// the lock cannot be acquired in time, or the store fails.
    pub async fn credit(
        &self,
        username: &str,
        amount: Decimal,
        memo: Option<String>,
    ) -> Result<Transaction, LedgerError> {
        let amount_minor = ledger::validate_amount(amount)?;
        let _guard = self.lock(username).await?;

        let txn = self.db.begin().await?;
        let account = self.accounts.get_in_txn(&txn, username).await?;
        let balance_minor = ledger::credit(account.balance_minor, amount_minor)?;

        let record = self
            .transactions
            .insert(
                &txn,
                NewTransaction {
                    username: username.to_string(),
                    kind: TransactionKind::Deposit,
                    amount_minor,
                    status: TransactionStatus::Approved,
                    memo,
                },
            )
            .await?;
        self.accounts
            .update_balance(&txn, account, balance_minor)
            .await?;
        txn.commit().await?;

        Ok(convert::to_transaction(record))
    }

    /// Records a withdrawal request as a pending ledger entry.
    ///
    /// No funds are checked and no balance changes here; the debit is
    /// validated when an admin decides the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is invalid, the account is unknown,
    /// the lock cannot be acquired in time, or the store fails.
    pub async fn request_withdrawal(
        &self,
        username: &str,
        amount: Decimal,
    ) -> Result<Transaction, LedgerError> {
        let amount_minor = ledger::validate_amount(amount)?;
        let _guard = self.lock(username).await?;

        let txn = self.db.begin().await?;
        self.accounts.get_in_txn(&txn, username).await?;

        let record = self
            .transactions
            .insert(
                &txn,
                NewTransaction {
                    username: username.to_string(),
                    kind: TransactionKind::Withdrawal,
                    amount_minor,
                    status: TransactionStatus::Pending,
                    memo: None,
                },
            )
            .await?;
        txn.commit().await?;

        Ok(convert::to_transaction(record))
    }

    /// Approves a pending withdrawal, debiting the live balance.
    ///
    /// If the account no longer covers the amount, the record is committed
    /// as rejected and [`LedgerError::InsufficientFunds`] surfaces to the
    /// caller; the decision is made either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is unknown, not a pending
    /// withdrawal, underfunded, the lock cannot be acquired in time, or
    /// the store fails.
    pub async fn settle_withdrawal(
        &self,
        id: i64,
        decided_by: &str,
    ) -> Result<Transaction, LedgerError> {
        let username = self.username_of(id).await?;
        let _guard = self.lock(&username).await?;

        let txn = self.db.begin().await?;
        let record = self.transactions.get_in_txn(&txn, id).await?;
        let action = WorkflowService::approve(record.status.into(), record.kind.into(), decided_by)
            .map_err(|err| decision_error(id, err))?;

        let account = self.accounts.get_in_txn(&txn, &record.username).await?;
        match ledger::debit(account.balance_minor, record.amount_minor) {
            Ok(balance_minor) => {
                let record = self
                    .transactions
                    .decide(
                        &txn,
                        record,
                        action.new_status().into(),
                        action.decided_by(),
                        action.decided_at(),
                    )
                    .await?;
                self.accounts
                    .update_balance(&txn, account, balance_minor)
                    .await?;
                txn.commit().await?;
                Ok(convert::to_transaction(record))
            }
            Err(err @ BalanceError::InsufficientFunds { .. }) => {
                self.transactions
                    .decide(
                        &txn,
                        record,
                        TransactionStatus::Rejected,
                        action.decided_by(),
                        action.decided_at(),
                    )
                    .await?;
                txn.commit().await?;
                Err(err.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Rejects a pending withdrawal. The balance never changes; the record
    /// is stamped with the decision and kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is unknown or already decided, the
    /// lock cannot be acquired in time, or the store fails.
    pub async fn reject_withdrawal(
        &self,
        id: i64,
        decided_by: &str,
    ) -> Result<Transaction, LedgerError> {
        let username = self.username_of(id).await?;
        let _guard = self.lock(&username).await?;

        let txn = self.db.begin().await?;
        let record = self.transactions.get_in_txn(&txn, id).await?;
        let action = WorkflowService::reject(record.status.into(), decided_by)
            .map_err(|err| decision_error(id, err))?;

        let record = self
            .transactions
            .decide(
                &txn,
                record,
                action.new_status().into(),
                action.decided_by(),
                action.decided_at(),
            )
            .await?;
        txn.commit().await?;

        Ok(convert::to_transaction(record))
    }

    /// Credits the simulated return on the current balance as an approved
    /// deposit, computed from the balance as of this call.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate is out of range, the return rounds to
    /// zero, the account is unknown, the lock cannot be acquired in time,
    /// or the store fails.
    pub async fn accrue(
        &self,
        username: &str,
        rate_percent: Decimal,
        memo: Option<String>,
    ) -> Result<Transaction, LedgerError> {
        simulation::validate_rate(rate_percent)?;
        let _guard = self.lock(username).await?;

        let txn = self.db.begin().await?;
        let account = self.accounts.get_in_txn(&txn, username).await?;

        let amount =
            simulation::growth_amount(from_minor_units(account.balance_minor), rate_percent)?;
        let amount_minor = ledger::validate_amount(amount)?;
        let balance_minor = ledger::credit(account.balance_minor, amount_minor)?;

        let record = self
            .transactions
            .insert(
                &txn,
                NewTransaction {
                    username: username.to_string(),
                    kind: TransactionKind::Deposit,
                    amount_minor,
                    status: TransactionStatus::Approved,
                    memo,
                },
            )
            .await?;
        self.accounts
            .update_balance(&txn, account, balance_minor)
            .await?;
        txn.commit().await?;

        Ok(convert::to_transaction(record))
    }

    /// Finds which account a record belongs to, to know which lock to take.
    async fn username_of(&self, id: i64) -> Result<String, LedgerError> {
        let record = self
            .transactions
            .find_by_id(id)
            .await?
            .ok_or(LedgerError::TransactionNotFound { id })?;
        Ok(record.username)
    }

    async fn lock(&self, username: &str) -> Result<OwnedMutexGuard<()>, LedgerError> {
        self.locks
            .acquire(username, self.lock_wait)
            .await
            .ok_or_else(|| LedgerError::Busy {
                username: username.to_string(),
            })
    }
}

fn decision_error(id: i64, err: WorkflowError) -> LedgerError {
    match err {
        WorkflowError::InvalidTransition { from, .. } => LedgerError::NotPending { id, status: from },
        WorkflowError::NotAWithdrawal { kind } => LedgerError::NotAWithdrawal { id, kind },
    }
}
