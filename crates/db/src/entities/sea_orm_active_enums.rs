//! String-backed active enums shared by the entities.
//!
//! These mirror the domain enums in `vestra-core`; the `From` impls are the
//! single place the two worlds convert.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account role column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// Can decide pending withdrawals.
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Regular account holder.
    #[sea_orm(string_value = "user")]
    User,
}

/// Transaction kind column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money entering the account.
    #[sea_orm(string_value = "deposit")]
    Deposit,
    /// Money leaving the account.
    #[sea_orm(string_value = "withdrawal")]
    Withdrawal,
}

/// Transaction status column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Awaiting an admin decision.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Settled and reflected in the balance.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Declined; never affected the balance.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl From<vestra_core::auth::Role> for AccountRole {
    fn from(role: vestra_core::auth::Role) -> Self {
        match role {
            vestra_core::auth::Role::Admin => Self::Admin,
            vestra_core::auth::Role::User => Self::User,
        }
    }
}

impl From<AccountRole> for vestra_core::auth::Role {
    fn from(role: AccountRole) -> Self {
        match role {
            AccountRole::Admin => Self::Admin,
            AccountRole::User => Self::User,
        }
    }
}

impl From<vestra_core::workflow::TransactionKind> for TransactionKind {
    fn from(kind: vestra_core::workflow::TransactionKind) -> Self {
        match kind {
            vestra_core::workflow::TransactionKind::Deposit => Self::Deposit,
            vestra_core::workflow::TransactionKind::Withdrawal => Self::Withdrawal,
        }
    }
}

impl From<TransactionKind> for vestra_core::workflow::TransactionKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Deposit => Self::Deposit,
            TransactionKind::Withdrawal => Self::Withdrawal,
        }
    }
}

impl From<vestra_core::workflow::TransactionStatus> for TransactionStatus {
    fn from(status: vestra_core::workflow::TransactionStatus) -> Self {
        match status {
            vestra_core::workflow::TransactionStatus::Pending => Self::Pending,
            vestra_core::workflow::TransactionStatus::Approved => Self::Approved,
            vestra_core::workflow::TransactionStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<TransactionStatus> for vestra_core::workflow::TransactionStatus {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Pending => Self::Pending,
            TransactionStatus::Approved => Self::Approved,
            TransactionStatus::Rejected => Self::Rejected,
        }
    }
}
