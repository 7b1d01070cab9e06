//! Database seeder for Vestra development and testing.
//!
//! Runs pending migrations, then opens a demo admin plus two investor
//! accounts and posts a small opening ledger through the service layer.
//! One withdrawal is left pending so the approval queue has content.
//!
//! Usage: cargo run --bin seeder

use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vestra_core::auth::Role;
use vestra_db::migration::{Migrator, MigratorTrait};
use vestra_db::AccountRepository;
use vestra_ledger::{AccountRoles, LedgerError, LedgerService};
use vestra_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Service-layer events are worth seeing while seeding
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vestra=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    println!("Connecting to database...");
    let db = vestra_db::connect(&config.database).await?;

    println!("Running migrations...");
    Migrator::up(&db, None).await?;

    let roles = AccountRoles::new(AccountRepository::new(db.clone()));
    let service = LedgerService::new(db, roles, &config);

    println!("Seeding accounts...");
    seed_account(&service, "admin", Role::Admin).await?;
    seed_account(&service, "alice", Role::User).await?;
    seed_account(&service, "bob", Role::User).await?;

    println!("Seeding opening ledger...");
    seed_ledger(&service).await?;

    println!("Seeding complete!");
    Ok(())
}

/// Opens one account, tolerating reruns.
async fn seed_account(
    service: &LedgerService<AccountRoles>,
    username: &str,
    role: Role,
) -> anyhow::Result<()> {
    match service.open_account(username, role).await {
        Ok(account) => {
            println!("  Opened account '{}' ({})", account.username, account.role);
            Ok(())
        }
        Err(LedgerError::AccountExists { .. }) => {
            println!("  Account '{username}' already exists, skipping...");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Posts the demo opening position.
///
/// Alice ends up with a settled deposit, an approved withdrawal, and one
/// simulated return; Bob with a deposit and a pending withdrawal request.
async fn seed_ledger(service: &LedgerService<AccountRoles>) -> anyhow::Result<()> {
    let history = service.list_transactions(Some("alice"), None).await?;
    if !history.is_empty() {
        println!("  Ledger already seeded, skipping...");
        return Ok(());
    }

    service.deposit("alice", Decimal::from(1_000)).await?;
    service.deposit("bob", Decimal::from(750)).await?;

    let settled = service
        .request_withdrawal("alice", Decimal::from(200))
        .await?;
    service.approve_withdrawal("admin", settled.id).await?;
    service.request_withdrawal("bob", Decimal::from(500)).await?;

    service.accrue_return("admin", "alice", None).await?;

    let stats = service.stats().await?;
    println!(
        "  {} investors, {} total balance, {} paid out",
        stats.investors, stats.total_balance, stats.total_paid_out
    );

    Ok(())
}
