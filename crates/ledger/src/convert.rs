//! Conversions from storage rows to domain values.

use vestra_core::ledger::{Account, Transaction};
use vestra_db::entities::{accounts, transactions};
use vestra_shared::types::money::from_minor_units;

pub(crate) fn to_transaction(model: transactions::Model) -> Transaction {
    Transaction {
        id: model.id,
        username: model.username,
        kind: model.kind.into(),
        amount: from_minor_units(model.amount_minor),
        status: model.status.into(),
        memo: model.memo,
        created_at: model.created_at.to_utc(),
        decided_at: model.decided_at.map(|at| at.to_utc()),
        decided_by: model.decided_by,
    }
}

pub(crate) fn to_account(model: accounts::Model) -> Account {
    Account {
        username: model.username,
        role: model.role.into(),
        balance: from_minor_units(model.balance_minor),
        created_at: model.created_at.to_utc(),
    }
}
