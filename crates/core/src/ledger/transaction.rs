//! Transaction aggregate.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::workflow::types::{TransactionKind, TransactionStatus};

/// A single ledger movement: one deposit or one withdrawal.
///
/// Records are append-only. A transaction is never edited after reaching a
/// terminal status and never deleted; the full history is the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, monotonically increasing, assigned at creation.
    pub id: i64,
    /// The account this transaction belongs to.
    pub username: String,
    /// Deposit or withdrawal.
    pub kind: TransactionKind,
    /// Positive amount.
    pub amount: Decimal,
    /// Current lifecycle status.
    pub status: TransactionStatus,
    /// Optional free-text annotation (e.g. set by simulated returns).
    pub memo: Option<String>,
    /// When the transaction was created.
    pub created_at: DateTime<Utc>,
    /// When a pending withdrawal was decided, if it has been.
    pub decided_at: Option<DateTime<Utc>>,
    /// The admin who decided a pending withdrawal, if it has been.
    pub decided_by: Option<String>,
}

impl Transaction {
    /// Returns true if the transaction is awaiting an admin decision.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == TransactionStatus::Pending
    }

    /// Returns true if the transaction can never change again.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns the amount with the sign of its balance effect: positive for
    /// deposits, negative for withdrawals.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Deposit => self.amount,
            TransactionKind::Withdrawal => -self.amount,
        }
    }
}
