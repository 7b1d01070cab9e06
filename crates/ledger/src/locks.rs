//! Per-account lock registry.
//!
//! SQLite has no row-level `SELECT ... FOR UPDATE`, so per-account mutual
//! exclusion lives in-process: every balance mutation for an account runs
//! under that account's async mutex. Acquisition is bounded; a task that
//! cannot get the lock in time gets an error instead of queueing forever.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-account mutexes.
///
/// Cloning shares the registry; every clone hands out the same lock for
/// the same username.
#[derive(Debug, Clone, Default)]
pub struct AccountLocks {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl AccountLocks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for an account, waiting at most `wait`.
    ///
    /// Returns `None` if the lock could not be acquired in time. The lock
    /// is held until the returned guard drops.
    pub async fn acquire(&self, username: &str, wait: Duration) -> Option<OwnedMutexGuard<()>> {
        let lock = self
            .locks
            .entry(username.to_string())
            .or_default()
            .clone();

        tokio::time::timeout(wait, lock.lock_owned()).await.ok()
    }
}
