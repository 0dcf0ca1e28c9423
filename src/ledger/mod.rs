// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Create, update and delete operations for categories, orders and
//! transactions, plus the read queries the listing screens use.
//!
//! Every operation validates its input before touching the store and returns
//! a [`LedgerResult`](crate::error::LedgerResult).

pub mod categories;
pub mod orders;
pub mod transactions;

pub use categories::{NewCategory, create_category, delete_category, get_category, list_categories};
pub use orders::{
    NewOrder, OrderDetail, OrderPatch, OrderSummary, count_active_orders, create_order, get_order,
    list_orders, order_detail, update_order,
};
pub use transactions::{
    DeletedTransaction, NewTransaction, TransactionRow, create_transaction, delete_transaction,
    get_transaction, list_transactions, update_transaction,
};

use crate::models::{Order, Transaction};
use rusqlite::Row;
use rusqlite::types::Type;
use rust_decimal::Decimal;

pub(crate) const TX_COLUMNS: &str =
    "t.id, t.amount, t.type, t.description, t.category_id, t.order_id, t.date, t.suppressed, t.tags";

pub(crate) const ORDER_COLUMNS: &str = "o.id, o.description, o.customer_name, o.status, \
     o.market_place, o.notes, o.is_job_lot, o.suppressed, o.created_at";

/// Reads the [`TX_COLUMNS`] starting at `offset`.
pub(crate) fn transaction_from_row(r: &Row<'_>, offset: usize) -> rusqlite::Result<Transaction> {
    let amount_s: String = r.get(offset + 1)?;
    let amount = amount_s
        .parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(offset + 1, Type::Text, Box::new(e)))?;
    Ok(Transaction {
        id: r.get(offset)?,
        amount,
        r#type: r.get(offset + 2)?,
        description: r.get(offset + 3)?,
        category_id: r.get(offset + 4)?,
        order_id: r.get(offset + 5)?,
        date: r.get(offset + 6)?,
        suppressed: r.get(offset + 7)?,
        tags: r.get(offset + 8)?,
    })
}

/// Reads the [`ORDER_COLUMNS`] starting at `offset`.
pub(crate) fn order_from_row(r: &Row<'_>, offset: usize) -> rusqlite::Result<Order> {
    Ok(Order {
        id: r.get(offset)?,
        description: r.get(offset + 1)?,
        customer_name: r.get(offset + 2)?,
        status: r.get(offset + 3)?,
        market_place: r.get(offset + 4)?,
        notes: r.get(offset + 5)?,
        is_job_lot: r.get(offset + 6)?,
        suppressed: r.get(offset + 7)?,
        created_at: r.get(offset + 8)?,
    })
}

/// Trims free-text input; blank becomes `None`.
pub(crate) fn clean_opt(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
