//! Roles and the identity-store seam.
//!
//! This module provides:
//! - User role definitions
//! - The role-gating check for admin operations
//! - The `RoleDirectory` trait the external identity store plugs into

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User roles within the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Can decide pending withdrawals and accrue simulated returns.
    Admin,
    /// Can deposit and request withdrawals on their own account.
    User,
}

impl Role {
    /// Parse a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "user" => Some(Self::User),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Returns true if this role can approve or reject withdrawals.
    #[must_use]
    pub const fn can_decide(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors raised by role gating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// A role-gated operation was invoked by a non-admin or unknown caller.
    #[error("{username} is not authorized for this operation")]
    NotAuthorized {
        /// The caller that was turned away.
        username: String,
    },
}

/// Checks that the caller holds a role allowed to decide withdrawals.
///
/// `role` is `None` when the directory does not know the caller; that is
/// also a refusal, not a not-found, so callers cannot probe for accounts.
///
/// # Errors
///
/// Returns [`AuthError::NotAuthorized`] unless the role can decide.
pub fn ensure_admin(username: &str, role: Option<Role>) -> Result<(), AuthError> {
    match role {
        Some(role) if role.can_decide() => Ok(()),
        _ => Err(AuthError::NotAuthorized {
            username: username.to_string(),
        }),
    }
}

/// Read-side seam to the external identity store.
///
/// The ledger only ever asks one question of the identity store: what is
/// this username's role? Authentication itself (passwords, sessions) stays
/// outside.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Looks up the role assigned to `username`, `None` if unknown.
    async fn role(&self, username: &str) -> anyhow::Result<Option<Role>>;
}

/// In-memory role directory for tests and embedded use.
#[derive(Debug, Clone, Default)]
pub struct MemoryRoles {
    roles: HashMap<String, Role>,
}

impl MemoryRoles {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a role assignment, builder-style.
    #[must_use]
    pub fn with(mut self, username: &str, role: Role) -> Self {
        self.roles.insert(username.to_string(), role);
        self
    }
}

#[async_trait]
impl RoleDirectory for MemoryRoles {
    async fn role(&self, username: &str) -> anyhow::Result<Option<Role>> {
        Ok(self.roles.get(username).copied())
    }
}
