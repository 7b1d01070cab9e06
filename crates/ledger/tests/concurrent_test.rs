//! Concurrency tests for the balance engine.
//!
//! Drives the service from many tasks at once to show that per-account
//! serialization holds: concurrent mutations never corrupt a balance and
//! jointly-overdrawing approvals resolve to exactly one success.

use std::sync::Arc;

use futures::future::join_all;
use rust_decimal_macros::dec;
use tempfile::TempDir;
use tokio::sync::Barrier;

use vestra_core::auth::Role;
use vestra_core::ledger::balance_of;
use vestra_core::workflow::TransactionStatus;
use vestra_db::migration::{Migrator, MigratorTrait};
use vestra_db::AccountRepository;
use vestra_ledger::{AccountRoles, BatchDecision, LedgerError, LedgerService};
use vestra_shared::config::{AppConfig, DatabaseConfig};

async fn setup() -> (TempDir, Arc<LedgerService<AccountRoles>>) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = AppConfig {
        database: DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", dir.path().join("vestra.db").display()),
            ..DatabaseConfig::default()
        },
        ..AppConfig::default()
    };

    let db = vestra_db::connect(&config.database)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    let roles = AccountRoles::new(AccountRepository::new(db.clone()));
    let service = LedgerService::new(db, roles, &config);

    service
        .open_account("admin", Role::Admin)
        .await
        .expect("Failed to open admin account");
    service
        .open_account("alice", Role::User)
        .await
        .expect("Failed to open account");

    (dir, Arc::new(service))
}

#[tokio::test]
async fn test_concurrent_deposits_settle_exactly() {
    let (_dir, service) = setup().await;

    const TASKS: usize = 20;

    service
        .deposit("alice", dec!(100))
        .await
        .expect("Failed to deposit");

    let barrier = Arc::new(Barrier::new(TASKS));
    let mut handles = Vec::with_capacity(TASKS);

    for _ in 0..TASKS {
        let service = Arc::clone(&service);
        let barrier = Arc::clone(&barrier);

        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            service.deposit("alice", dec!(10)).await
        }));
    }

    for result in join_all(handles).await {
        result.expect("Task panicked").expect("Deposit should succeed");
    }

    let balance = service.get_balance("alice").await.expect("Failed to read balance");
    assert_eq!(balance, dec!(300));

    let history = service
        .list_transactions(Some("alice"), None)
        .await
        .expect("Failed to list transactions");
    assert_eq!(history.len(), TASKS + 1);
    assert_eq!(balance_of(&history), balance);
}

#[tokio::test]
async fn test_jointly_overdrawing_approvals_resolve_once() {
    let (_dir, service) = setup().await;

    service
        .deposit("alice", dec!(100))
        .await
        .expect("Failed to deposit");

    // Each request fits the balance on its own; together they overdraw.
    let first = service
        .request_withdrawal("alice", dec!(100))
        .await
        .expect("Failed to request withdrawal");
    let second = service
        .request_withdrawal("alice", dec!(100))
        .await
        .expect("Failed to request withdrawal");

    let barrier = Arc::new(Barrier::new(2));
    let mut handles = Vec::with_capacity(2);

    for id in [first.id, second.id] {
        let service = Arc::clone(&service);
        let barrier = Arc::clone(&barrier);

        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            service.approve_withdrawal("admin", id).await
        }));
    }

    let mut approved = 0;
    let mut rejected = 0;
    for outcome in join_all(handles).await {
        match outcome.expect("Task panicked") {
            Ok(_) => approved += 1,
            Err(LedgerError::InsufficientFunds { .. }) => rejected += 1,
            Err(e) => panic!("Unexpected error: {e}"),
        }
    }

    assert_eq!(approved, 1);
    assert_eq!(rejected, 1);

    let balance = service.get_balance("alice").await.expect("Failed to read balance");
    assert_eq!(balance, dec!(0));

    let settled = service
        .list_transactions(Some("alice"), Some(TransactionStatus::Approved))
        .await
        .expect("Failed to list transactions");
    // The seed deposit plus exactly one settled withdrawal.
    assert_eq!(settled.len(), 2);

    let bounced = service
        .list_transactions(Some("alice"), Some(TransactionStatus::Rejected))
        .await
        .expect("Failed to list transactions");
    assert_eq!(bounced.len(), 1);
}

#[tokio::test]
async fn test_interleaved_deposits_and_requests_keep_invariant() {
    let (_dir, service) = setup().await;
    let approvals = service.approvals();

    const TASKS: usize = 10;

    service
        .deposit("alice", dec!(50))
        .await
        .expect("Failed to deposit");

    let barrier = Arc::new(Barrier::new(TASKS * 2));

    let mut deposit_handles = Vec::with_capacity(TASKS);
    let mut request_handles = Vec::with_capacity(TASKS);

    for _ in 0..TASKS {
        let service_d = Arc::clone(&service);
        let barrier_d = Arc::clone(&barrier);
        deposit_handles.push(tokio::spawn(async move {
            barrier_d.wait().await;
            service_d.deposit("alice", dec!(7.25)).await
        }));

        let service_r = Arc::clone(&service);
        let barrier_r = Arc::clone(&barrier);
        request_handles.push(tokio::spawn(async move {
            barrier_r.wait().await;
            service_r.request_withdrawal("alice", dec!(3)).await
        }));
    }

    for result in join_all(deposit_handles).await {
        result.expect("Task panicked").expect("Deposit should succeed");
    }

    let mut pending_ids = Vec::with_capacity(TASKS);
    for result in join_all(request_handles).await {
        let record = result.expect("Task panicked").expect("Request should succeed");
        pending_ids.push(record.id);
    }

    // Requests changed nothing yet.
    let balance = service.get_balance("alice").await.expect("Failed to read balance");
    assert_eq!(balance, dec!(122.5));

    let outcomes = approvals
        .approve_batch("admin", &pending_ids)
        .await
        .expect("Batch should run to completion");
    assert!(outcomes
        .iter()
        .all(|o| o.decision == BatchDecision::Approved));

    let balance = service.get_balance("alice").await.expect("Failed to read balance");
    assert_eq!(balance, dec!(92.5));

    let history = service
        .list_transactions(Some("alice"), None)
        .await
        .expect("Failed to list transactions");
    assert_eq!(balance_of(&history), balance);

    let stats = service.stats().await.expect("Failed to read stats");
    assert_eq!(stats.total_paid_out, dec!(30));
}

#[tokio::test]
async fn test_accounts_do_not_block_each_other() {
    let (_dir, service) = setup().await;

    const TASKS: usize = 10;

    service
        .open_account("bob", Role::User)
        .await
        .expect("Failed to open account");

    let barrier = Arc::new(Barrier::new(TASKS * 2));
    let mut handles = Vec::with_capacity(TASKS * 2);

    for username in ["alice", "bob"] {
        for _ in 0..TASKS {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);

            handles.push(tokio::spawn(async move {
                barrier.wait().await;
                service.deposit(username, dec!(5)).await
            }));
        }
    }

    for result in join_all(handles).await {
        result.expect("Task panicked").expect("Deposit should succeed");
    }

    let alice = service.get_balance("alice").await.expect("Failed to read balance");
    let bob = service.get_balance("bob").await.expect("Failed to read balance");
    assert_eq!(alice, dec!(50));
    assert_eq!(bob, dec!(50));
}
