//! Caller-facing ledger workflow.
//!
//! `LedgerService` is the surface a UI layer calls: deposits settle
//! instantly, withdrawal requests go pending, and admin decisions run
//! through the balance engine. Authorization happens here, at the
//! workflow boundary, against the injected role directory; nothing
//! below this layer checks who is calling.

use std::time::Duration;

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{error, info, warn};

use vestra_core::auth::{Role, RoleDirectory};
use vestra_core::ledger::{Account, Transaction};
use vestra_core::workflow::TransactionStatus;
use vestra_db::entities::sea_orm_active_enums::AccountRole;
use vestra_db::repositories::{AccountRepository, TransactionFilter, TransactionRepository};
use vestra_shared::types::money::from_minor_units;
use vestra_shared::AppConfig;

use crate::approval::ApprovalService;
use crate::convert;
use crate::engine::BalanceEngine;
use crate::error::LedgerError;
use crate::roles;

/// Aggregate figures across the whole ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerStats {
    /// Sum of every account balance.
    pub total_balance: Decimal,
    /// Sum of every approved withdrawal ever paid out.
    pub total_paid_out: Decimal,
    /// Number of investor accounts. Admins are not counted.
    pub investors: u64,
}

/// The ledger workflow service.
#[derive(Debug, Clone)]
pub struct LedgerService<R: RoleDirectory> {
    engine: BalanceEngine,
    accounts: AccountRepository,
    transactions: TransactionRepository,
    roles: R,
    return_percent: Decimal,
}

impl<R: RoleDirectory> LedgerService<R> {
    /// Creates the service over a connection pool and a role directory.
    pub fn new(db: DatabaseConnection, roles: R, config: &AppConfig) -> Self {
        let lock_wait = Duration::from_millis(config.engine.lock_wait_ms);
        Self {
            engine: BalanceEngine::new(db.clone(), lock_wait),
            accounts: AccountRepository::new(db.clone()),
            transactions: TransactionRepository::new(db),
            roles,
            return_percent: config.simulation.return_percent,
        }
    }

    /// Opens an account with a zero balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is taken or the store fails.
    pub async fn open_account(&self, username: &str, role: Role) -> Result<Account, LedgerError> {
        match self.accounts.create(username, role.into()).await {
            Ok(account) => {
                info!(username = %username, role = role.as_str(), "Account opened");
                Ok(convert::to_account(account))
            }
            Err(e) => {
                error!(error = %e, username = %username, "Failed to open account");
                Err(e.into())
            }
        }
    }

    /// Deposits into an account. Deposits settle instantly as approved.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is invalid, the account is unknown,
    /// or the store fails.
    pub async fn deposit(&self, username: &str, amount: Decimal) -> Result<Transaction, LedgerError> {
        match self.engine.credit(username, amount, None).await {
            Ok(record) => {
                info!(username = %username, transaction_id = record.id, "Deposit settled");
                Ok(record)
            }
            Err(e) => {
                error!(error = %e, username = %username, "Failed to settle deposit");
                Err(e)
            }
        }
    }

    /// Requests a withdrawal. The record goes pending; the balance does
    /// not move until an admin approves.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is invalid, the account is unknown,
    /// or the store fails.
    pub async fn request_withdrawal(
        &self,
        username: &str,
        amount: Decimal,
    ) -> Result<Transaction, LedgerError> {
        match self.engine.request_withdrawal(username, amount).await {
            Ok(record) => {
                info!(username = %username, transaction_id = record.id, "Withdrawal requested");
                Ok(record)
            }
            Err(e) => {
                error!(error = %e, username = %username, "Failed to request withdrawal");
                Err(e)
            }
        }
    }

    /// Approves a pending withdrawal on behalf of an admin.
    ///
    /// The debit is re-validated against the live balance; a request that
    /// no longer fits is committed as rejected and the insufficiency is
    /// returned to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not an admin, the record is not a
    /// pending withdrawal, the funds no longer cover it, or the store
    /// fails.
    pub async fn approve_withdrawal(
        &self,
        admin: &str,
        id: i64,
    ) -> Result<Transaction, LedgerError> {
        self.authorize(admin).await?;

        match self.engine.settle_withdrawal(id, admin).await {
            Ok(record) => {
                info!(admin = %admin, transaction_id = id, "Withdrawal approved");
                Ok(record)
            }
            Err(e @ LedgerError::InsufficientFunds { .. }) => {
                warn!(admin = %admin, transaction_id = id, "Withdrawal rejected: insufficient funds at decision time");
                Err(e)
            }
            Err(e) => {
                error!(error = %e, admin = %admin, transaction_id = id, "Failed to approve withdrawal");
                Err(e)
            }
        }
    }

    /// Rejects a pending withdrawal on behalf of an admin.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not an admin, the record is not a
    /// pending withdrawal, or the store fails.
    pub async fn reject_withdrawal(
        &self,
        admin: &str,
        id: i64,
    ) -> Result<Transaction, LedgerError> {
        self.authorize(admin).await?;

        match self.engine.reject_withdrawal(id, admin).await {
            Ok(record) => {
                info!(admin = %admin, transaction_id = id, "Withdrawal rejected");
                Ok(record)
            }
            Err(e) => {
                error!(error = %e, admin = %admin, transaction_id = id, "Failed to reject withdrawal");
                Err(e)
            }
        }
    }

    /// Reads an account's balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is unknown or the store fails.
    pub async fn get_balance(&self, username: &str) -> Result<Decimal, LedgerError> {
        let account = self.accounts.get(username).await?;
        Ok(from_minor_units(account.balance_minor))
    }

    /// Reads an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is unknown or the store fails.
    pub async fn get_account(&self, username: &str) -> Result<Account, LedgerError> {
        let account = self.accounts.get(username).await?;
        Ok(convert::to_account(account))
    }

    /// Lists ledger records, optionally filtered by account and status,
    /// oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn list_transactions(
        &self,
        username: Option<&str>,
        status: Option<TransactionStatus>,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let filter = TransactionFilter {
            username: username.map(str::to_string),
            status: status.map(Into::into),
            kind: None,
        };

        match self.transactions.list(filter).await {
            Ok(records) => Ok(records.into_iter().map(convert::to_transaction).collect()),
            Err(e) => {
                error!(error = %e, "Failed to list transactions");
                Err(e.into())
            }
        }
    }

    /// Credits the simulated return on an account's current balance.
    ///
    /// Admin-gated: the simulator's "profit" is a privileged credit, not
    /// something a user can grant themselves. Defaults to the configured
    /// rate when none is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not an admin, the rate is out of
    /// range, the return rounds to zero, the account is unknown, or the
    /// store fails.
    pub async fn accrue_return(
        &self,
        admin: &str,
        username: &str,
        rate_percent: Option<Decimal>,
    ) -> Result<Transaction, LedgerError> {
        self.authorize(admin).await?;

        let rate = rate_percent.unwrap_or(self.return_percent);
        let memo = format!("Simulated return at {rate}%");

        match self.engine.accrue(username, rate, Some(memo)).await {
            Ok(record) => {
                info!(
                    admin = %admin,
                    username = %username,
                    transaction_id = record.id,
                    rate = %rate,
                    "Return accrued"
                );
                Ok(record)
            }
            Err(e) => {
                error!(error = %e, username = %username, "Failed to accrue return");
                Err(e)
            }
        }
    }

    /// Aggregates ledger-wide totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn stats(&self) -> Result<LedgerStats, LedgerError> {
        let total_balance = self.accounts.total_balance_minor().await?;
        let total_paid_out = self.transactions.total_paid_out_minor().await?;
        let investors = self.accounts.count_by_role(AccountRole::User).await?;

        Ok(LedgerStats {
            total_balance: from_minor_units(total_balance),
            total_paid_out: from_minor_units(total_paid_out),
            investors,
        })
    }

    async fn authorize(&self, admin: &str) -> Result<(), LedgerError> {
        if let Err(e) = roles::authorize(&self.roles, admin).await {
            warn!(username = %admin, "Refused admin operation");
            return Err(e);
        }
        Ok(())
    }
}

impl<R: RoleDirectory + Clone> LedgerService<R> {
    /// Builds the admin approval service over this service's engine.
    ///
    /// Sharing the engine means batch decisions take the same per-account
    /// locks as everything else.
    #[must_use]
    pub fn approvals(&self) -> ApprovalService<R> {
        ApprovalService::new(
            self.engine.clone(),
            self.transactions.clone(),
            self.roles.clone(),
        )
    }
}
