//! Initial database migration.
//!
//! Creates the accounts and transactions tables. The schema is SQLite
//! dialect; timestamps are stored as RFC 3339 text and money as integer
//! minor units (1 whole = 10^4 minor).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS transactions;")
            .await?;
        db.execute_unprepared("DROP TABLE IF EXISTS accounts;").await?;
        Ok(())
    }
}

const ACCOUNTS_SQL: &str = r"
-- Accounts: one row per user; balance_minor is maintained exclusively
-- by the balance engine, never written directly by callers
CREATE TABLE accounts (
    username VARCHAR(64) PRIMARY KEY,
    role VARCHAR(16) NOT NULL DEFAULT 'user',
    balance_minor BIGINT NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    CONSTRAINT chk_role CHECK (role IN ('admin', 'user')),
    CONSTRAINT chk_balance_non_negative CHECK (balance_minor >= 0)
);
";

const TRANSACTIONS_SQL: &str = r"
-- Transactions: append-only ledger; rows are never updated except for
-- the pending -> approved/rejected decision, and never deleted
CREATE TABLE transactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username VARCHAR(64) NOT NULL REFERENCES accounts(username),
    kind VARCHAR(16) NOT NULL,
    amount_minor BIGINT NOT NULL,
    status VARCHAR(16) NOT NULL,
    memo TEXT,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    decided_at TEXT,
    decided_by VARCHAR(64),
    CONSTRAINT chk_kind CHECK (kind IN ('deposit', 'withdrawal')),
    CONSTRAINT chk_status CHECK (status IN ('pending', 'approved', 'rejected')),
    CONSTRAINT chk_amount_positive CHECK (amount_minor > 0),
    CONSTRAINT chk_pending_undecided CHECK (
        status <> 'pending' OR (decided_at IS NULL AND decided_by IS NULL)
    )
);

-- Index for per-account history in insertion order
CREATE INDEX idx_transactions_username ON transactions(username, id);

-- Index for the pending withdrawal queue
CREATE INDEX idx_transactions_status_kind ON transactions(status, kind);
";
