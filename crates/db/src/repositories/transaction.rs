//! Transaction repository for ledger record database operations.
//!
//! Records are append-only: the only update a row ever sees is the
//! pending -> approved/rejected decision stamp. Nothing here deletes.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::{
    sea_orm_active_enums::{TransactionKind, TransactionStatus},
    transactions,
};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(i64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for inserting a ledger record.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// Owning account.
    pub username: String,
    /// Deposit or withdrawal.
    pub kind: TransactionKind,
    /// Amount in minor units, positive.
    pub amount_minor: i64,
    /// Status the record is born with.
    pub status: TransactionStatus,
    /// Free-form note, e.g. the source of an accrued return.
    pub memo: Option<String>,
}

/// Filter for listing ledger records.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by owning account.
    pub username: Option<String>,
    /// Filter by status.
    pub status: Option<TransactionStatus>,
    /// Filter by kind.
    pub kind: Option<TransactionKind>,
}

/// Transaction repository for append and decision operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends a ledger record inside an open database transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn insert(
        &self,
        txn: &DatabaseTransaction,
        input: NewTransaction,
    ) -> Result<transactions::Model, DbErr> {
        let record = transactions::ActiveModel {
            username: Set(input.username),
            kind: Set(input.kind),
            amount_minor: Set(input.amount_minor),
            status: Set(input.status),
            memo: Set(input.memo),
            created_at: Set(Utc::now().into()),
            decided_at: Set(None),
            decided_by: Set(None),
            ..Default::default()
        };

        record.insert(txn).await
    }

    /// Finds a record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<transactions::Model>, DbErr> {
        transactions::Entity::find_by_id(id).one(&self.db).await
    }

    /// Fetches a record inside an open database transaction.
    ///
    /// Decisions re-read the row through the transaction so a decision
    /// committed moments earlier cannot be decided twice.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is missing or the query fails.
    pub async fn get_in_txn(
        &self,
        txn: &DatabaseTransaction,
        id: i64,
    ) -> Result<transactions::Model, TransactionError> {
        transactions::Entity::find_by_id(id)
            .one(txn)
            .await?
            .ok_or(TransactionError::NotFound(id))
    }

    /// Stamps a decision onto a record inside an open transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn decide(
        &self,
        txn: &DatabaseTransaction,
        record: transactions::Model,
        status: TransactionStatus,
        decided_by: &str,
        decided_at: DateTime<Utc>,
    ) -> Result<transactions::Model, DbErr> {
        let mut record: transactions::ActiveModel = record.into();
        record.status = Set(status);
        record.decided_at = Set(Some(decided_at.into()));
        record.decided_by = Set(Some(decided_by.to_string()));
        record.update(txn).await
    }

    /// Lists records matching the filter, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, filter: TransactionFilter) -> Result<Vec<transactions::Model>, DbErr> {
        let mut query = transactions::Entity::find().order_by_asc(transactions::Column::Id);

        if let Some(username) = filter.username {
            query = query.filter(transactions::Column::Username.eq(username));
        }

        if let Some(status) = filter.status {
            query = query.filter(transactions::Column::Status.eq(status));
        }

        if let Some(kind) = filter.kind {
            query = query.filter(transactions::Column::Kind.eq(kind));
        }

        query.all(&self.db).await
    }

    /// Lists pending withdrawals in request order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_pending_withdrawals(&self) -> Result<Vec<transactions::Model>, DbErr> {
        transactions::Entity::find()
            .filter(transactions::Column::Status.eq(TransactionStatus::Pending))
            .filter(transactions::Column::Kind.eq(TransactionKind::Withdrawal))
            .order_by_asc(transactions::Column::Id)
            .all(&self.db)
            .await
    }

    /// Sums approved withdrawals, in minor units.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn total_paid_out_minor(&self) -> Result<i64, DbErr> {
        let total: Option<Option<i64>> = transactions::Entity::find()
            .select_only()
            .column_as(transactions::Column::AmountMinor.sum(), "total")
            .filter(transactions::Column::Status.eq(TransactionStatus::Approved))
            .filter(transactions::Column::Kind.eq(TransactionKind::Withdrawal))
            .into_tuple()
            .one(&self.db)
            .await?;

        Ok(total.flatten().unwrap_or(0))
    }
}
