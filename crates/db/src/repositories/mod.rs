//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! They persist and query rows as told; balance rules live in the engine
//! that drives them.

pub mod account;
pub mod transaction;

pub use account::{AccountError, AccountRepository};
pub use transaction::{NewTransaction, TransactionError, TransactionFilter, TransactionRepository};
