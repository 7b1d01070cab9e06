//! Account repository for account-row database operations.
//!
//! Stores the username, role and the running balance in minor units. The
//! balance column is only ever written through [`AccountRepository::update_balance`],
//! which the balance engine calls inside a database transaction.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QuerySelect, Set,
};

use crate::entities::{accounts, sea_orm_active_enums::AccountRole};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// Username already taken.
    #[error("Account '{0}' already exists")]
    AlreadyExists(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account with a zero balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is already taken or the insert fails.
    pub async fn create(
        &self,
        username: &str,
        role: AccountRole,
    ) -> Result<accounts::Model, AccountError> {
        let existing = accounts::Entity::find_by_id(username).one(&self.db).await?;

        if existing.is_some() {
            return Err(AccountError::AlreadyExists(username.to_string()));
        }

        let now = chrono::Utc::now().into();
        let account = accounts::ActiveModel {
            username: Set(username.to_string()),
            role: Set(role),
            balance_minor: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let account = account.insert(&self.db).await?;
        Ok(account)
    }

    /// Finds an account by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<accounts::Model>, DbErr> {
        accounts::Entity::find_by_id(username).one(&self.db).await
    }

    /// Gets an account by username, failing if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing or the query fails.
    pub async fn get(&self, username: &str) -> Result<accounts::Model, AccountError> {
        self.find_by_username(username)
            .await?
            .ok_or_else(|| AccountError::NotFound(username.to_string()))
    }

    /// Fetches an account inside an open database transaction.
    ///
    /// The engine reads the row through the transaction so the balance it
    /// decides against is the one the commit will replace.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing or the query fails.
    pub async fn get_in_txn(
        &self,
        txn: &DatabaseTransaction,
        username: &str,
    ) -> Result<accounts::Model, AccountError> {
        accounts::Entity::find_by_id(username)
            .one(txn)
            .await?
            .ok_or_else(|| AccountError::NotFound(username.to_string()))
    }

    /// Writes a new balance for the account inside an open transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update_balance(
        &self,
        txn: &DatabaseTransaction,
        account: accounts::Model,
        balance_minor: i64,
    ) -> Result<accounts::Model, DbErr> {
        let mut account: accounts::ActiveModel = account.into();
        account.balance_minor = Set(balance_minor);
        account.updated_at = Set(chrono::Utc::now().into());
        account.update(txn).await
    }

    /// Counts accounts holding a given role.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_by_role(&self, role: AccountRole) -> Result<u64, DbErr> {
        accounts::Entity::find()
            .filter(accounts::Column::Role.eq(role))
            .count(&self.db)
            .await
    }

    /// Sums every account balance, in minor units.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn total_balance_minor(&self) -> Result<i64, DbErr> {
        let total: Option<Option<i64>> = accounts::Entity::find()
            .select_only()
            .column_as(accounts::Column::BalanceMinor.sum(), "total")
            .into_tuple()
            .one(&self.db)
            .await?;

        Ok(total.flatten().unwrap_or(0))
    }
}
