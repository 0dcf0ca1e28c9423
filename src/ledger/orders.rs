// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::transactions::{TransactionRow, select_rows};
use super::{ORDER_COLUMNS, clean_opt, order_from_row};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Order, OrderStatus};
use crate::stats::{StatEntry, Totals, totals};
use crate::visibility::Visibility;
use rusqlite::{Connection, OptionalExtension, ToSql, params};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct NewOrder {
    pub description: String,
    pub customer_name: Option<String>,
    pub status: Option<OrderStatus>,
    pub market_place: Option<String>,
    pub notes: Option<String>,
    pub is_job_lot: Option<bool>,
}

/// Partial update. `None` leaves a field alone; for the optional text fields
/// `Some("")` clears the value.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub description: Option<String>,
    pub customer_name: Option<String>,
    pub status: Option<OrderStatus>,
    pub market_place: Option<String>,
    pub notes: Option<String>,
    pub is_job_lot: Option<bool>,
    pub suppressed: Option<bool>,
}

impl OrderPatch {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.customer_name.is_none()
            && self.status.is_none()
            && self.market_place.is_none()
            && self.notes.is_none()
            && self.is_job_lot.is_none()
            && self.suppressed.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    #[serde(flatten)]
    pub order: Order,
    pub transaction_count: usize,
    pub totals: Totals,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub transactions: Vec<TransactionRow>,
    pub totals: Totals,
}

fn required_description(raw: &str) -> LedgerResult<String> {
    let d = raw.trim();
    if d.is_empty() {
        return Err(LedgerError::validation(
            "description",
            "Description is required",
        ));
    }
    Ok(d.to_string())
}

/// New orders start `OPEN`, not a job lot, not suppressed unless told otherwise.
pub fn create_order(conn: &Connection, new: NewOrder) -> LedgerResult<Order> {
    let description = required_description(&new.description)?;
    let status = new.status.unwrap_or_default();
    let is_job_lot = new.is_job_lot.unwrap_or(false);
    conn.execute(
        "INSERT INTO orders(description, customer_name, status, market_place, notes, is_job_lot, suppressed)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0)",
        params![
            description,
            clean_opt(new.customer_name),
            status,
            clean_opt(new.market_place),
            clean_opt(new.notes),
            is_job_lot
        ],
    )
    .map_err(|e| LedgerError::storage("Failed to create order", &e))?;
    let id = conn.last_insert_rowid();
    tracing::info!(id, %description, "order created");
    get_order(conn, id)
}

pub fn get_order(conn: &Connection, id: i64) -> LedgerResult<Order> {
    let sql = format!("SELECT {} FROM orders o WHERE o.id=?1", ORDER_COLUMNS);
    conn.query_row(&sql, params![id], |r| order_from_row(r, 0))
        .optional()?
        .ok_or_else(|| LedgerError::not_found("Order", id))
}

/// Applies the fields present in `patch`. Status may move between any two
/// values.
pub fn update_order(conn: &Connection, id: i64, patch: OrderPatch) -> LedgerResult<Order> {
    let current = get_order(conn, id)?;
    if patch.is_empty() {
        return Ok(current);
    }

    let mut sets: Vec<&str> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();
    if let Some(d) = patch.description {
        sets.push("description=?");
        values.push(Box::new(required_description(&d)?));
    }
    if let Some(c) = patch.customer_name {
        sets.push("customer_name=?");
        values.push(Box::new(clean_opt(Some(c))));
    }
    if let Some(s) = patch.status {
        sets.push("status=?");
        values.push(Box::new(s));
    }
    if let Some(m) = patch.market_place {
        sets.push("market_place=?");
        values.push(Box::new(clean_opt(Some(m))));
    }
    if let Some(n) = patch.notes {
        sets.push("notes=?");
        values.push(Box::new(clean_opt(Some(n))));
    }
    if let Some(j) = patch.is_job_lot {
        sets.push("is_job_lot=?");
        values.push(Box::new(j));
    }
    if let Some(s) = patch.suppressed {
        sets.push("suppressed=?");
        values.push(Box::new(s));
    }
    values.push(Box::new(id));

    let sql = format!("UPDATE orders SET {} WHERE id=?", sets.join(", "));
    conn.execute(
        &sql,
        rusqlite::params_from_iter(values.iter().map(|v| v.as_ref())),
    )
    .map_err(|e| LedgerError::storage("Failed to update order", &e))?;

    let updated = get_order(conn, id)?;
    tracing::info!(
        id,
        status = %updated.status,
        suppressed = updated.suppressed,
        suppression_changed = updated.suppressed != current.suppressed,
        "order updated"
    );
    Ok(updated)
}

/// Orders newest first, each with totals over the transactions `visibility`
/// admits.
pub fn list_orders(conn: &Connection, visibility: Visibility) -> LedgerResult<Vec<OrderSummary>> {
    let sql = format!(
        "SELECT {} FROM orders o WHERE {} ORDER BY o.created_at DESC, o.id DESC",
        ORDER_COLUMNS,
        visibility.order_sql()
    );
    let mut stmt = conn.prepare(&sql)?;
    let orders = stmt.query_map([], |r| order_from_row(r, 0))?;

    let mut by_order: HashMap<i64, Vec<StatEntry>> = HashMap::new();
    for row in select_rows(conn, visibility, None, None)? {
        if let Some(order_id) = row.transaction.order_id {
            by_order
                .entry(order_id)
                .or_default()
                .push(StatEntry::from(&row.transaction));
        }
    }

    let mut out = Vec::new();
    for order in orders {
        let order = order?;
        let entries = by_order.remove(&order.id).unwrap_or_default();
        out.push(OrderSummary {
            transaction_count: entries.len(),
            totals: totals(&entries)?,
            order,
        });
    }
    Ok(out)
}

pub fn order_detail(conn: &Connection, id: i64, visibility: Visibility) -> LedgerResult<OrderDetail> {
    let order = get_order(conn, id)?;
    let transactions = select_rows(conn, visibility, Some(id), None)?;
    let entries: Vec<StatEntry> = transactions
        .iter()
        .map(|r| StatEntry::from(&r.transaction))
        .collect();
    Ok(OrderDetail {
        totals: totals(&entries)?,
        order,
        transactions,
    })
}

/// Visible orders still `OPEN`.
pub fn count_active_orders(conn: &Connection) -> LedgerResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM orders o WHERE o.status='OPEN' AND o.suppressed=0",
        [],
        |r| r.get(0),
    )?;
    Ok(n)
}
