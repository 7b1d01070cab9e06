//! Role lookups backed by the accounts table.

use async_trait::async_trait;

use vestra_core::auth::{ensure_admin, Role, RoleDirectory};
use vestra_db::repositories::AccountRepository;

use crate::error::LedgerError;

/// [`RoleDirectory`] that reads roles straight off account rows.
#[derive(Debug, Clone)]
pub struct AccountRoles {
    accounts: AccountRepository,
}

impl AccountRoles {
    /// Creates a directory over the account repository.
    #[must_use]
    pub const fn new(accounts: AccountRepository) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl RoleDirectory for AccountRoles {
    async fn role(&self, username: &str) -> anyhow::Result<Option<Role>> {
        let account = self.accounts.find_by_username(username).await?;
        Ok(account.map(|account| account.role.into()))
    }
}

/// Looks up the caller's role and requires admin.
pub(crate) async fn authorize<R: RoleDirectory>(
    roles: &R,
    username: &str,
) -> Result<(), LedgerError> {
    let role = roles.role(username).await?;
    ensure_admin(username, role)?;
    Ok(())
}
