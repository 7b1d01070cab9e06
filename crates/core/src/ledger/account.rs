//! Account aggregate.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::auth::Role;

/// An account holding spendable funds.
///
/// `balance` is a derived quantity: it must always equal the sum of effects
/// of the account's approved transactions. Only the balance engine writes
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique, immutable identifier.
    pub username: String,
    /// The account holder's role.
    pub role: Role,
    /// Current spendable funds; never negative.
    pub balance: Decimal,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Returns true if the account holder may decide pending withdrawals.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
