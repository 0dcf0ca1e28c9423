// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::categories::get_category;
use super::{TX_COLUMNS, clean_opt, transaction_from_row};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{EntryType, Transaction};
use crate::visibility::Visibility;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, ToSql, params};
use rust_decimal::Decimal;
use serde::Serialize;

/// Smallest amount accepted for a transaction: one penny.
pub fn min_amount() -> Decimal {
    Decimal::new(1, 2)
}

/// Largest amount accepted: twelve integer digits.
pub fn max_amount() -> Decimal {
    Decimal::new(99_999_999_999_999, 2)
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub r#type: EntryType,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub order_id: Option<i64>,
    pub date: NaiveDate,
    pub tags: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub category: String,
    pub order: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeletedTransaction {
    pub id: i64,
    /// Parent order whose views need refreshing, if there was one.
    pub order_id: Option<i64>,
}

/// Validates and stores a transaction. The amount is persisted exactly as
/// given; its direction comes from `type` alone.
pub fn create_transaction(conn: &Connection, new: NewTransaction) -> LedgerResult<Transaction> {
    if new.amount < min_amount() {
        tracing::warn!(amount = %new.amount, "transaction rejected, non-positive amount");
        return Err(LedgerError::validation("amount", "Amount must be positive"));
    }
    if new.amount > max_amount() {
        tracing::warn!(amount = %new.amount, "transaction rejected, amount too large");
        return Err(LedgerError::validation(
            "amount",
            format!("Amount must not exceed {}", max_amount()),
        ));
    }
    let category_id = new
        .category_id
        .ok_or_else(|| LedgerError::validation("categoryId", "Category is required"))?;
    let category = match get_category(conn, category_id) {
        Ok(c) => c,
        Err(e) if e.is_not_found() => {
            return Err(LedgerError::Storage(format!(
                "Failed to create transaction: category {} does not exist",
                category_id
            )));
        }
        Err(e) => return Err(e),
    };
    if category.r#type != new.r#type {
        return Err(LedgerError::validation(
            "categoryId",
            format!(
                "Category '{}' is {}, transaction is {}",
                category.name, category.r#type, new.r#type
            ),
        ));
    }

    let description = clean_opt(new.description);
    let tags = clean_opt(new.tags);
    conn.execute(
        "INSERT INTO transactions(amount, type, description, category_id, order_id, date, suppressed, tags)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7)",
        params![
            new.amount.to_string(),
            new.r#type,
            description,
            category_id,
            new.order_id,
            new.date,
            tags
        ],
    )
    .map_err(|e| LedgerError::storage("Failed to create transaction", &e))?;
    let id = conn.last_insert_rowid();
    tracing::info!(
        id,
        amount = %new.amount,
        kind = %new.r#type,
        order_id = ?new.order_id,
        "transaction recorded"
    );
    Ok(Transaction {
        id,
        amount: new.amount,
        r#type: new.r#type,
        description,
        category_id,
        order_id: new.order_id,
        date: new.date,
        suppressed: false,
        tags,
    })
}

pub fn get_transaction(conn: &Connection, id: i64) -> LedgerResult<Transaction> {
    let sql = format!("SELECT {} FROM transactions t WHERE t.id=?1", TX_COLUMNS);
    conn.query_row(&sql, params![id], |r| transaction_from_row(r, 0))
        .optional()?
        .ok_or_else(|| LedgerError::not_found("Transaction", id))
}

/// Only the suppression flag is mutable after creation.
pub fn update_transaction(conn: &Connection, id: i64, suppressed: bool) -> LedgerResult<Transaction> {
    let changed = conn
        .execute(
            "UPDATE transactions SET suppressed=?1 WHERE id=?2",
            params![suppressed, id],
        )
        .map_err(|e| LedgerError::storage("Failed to update transaction", &e))?;
    if changed == 0 {
        return Err(LedgerError::not_found("Transaction", id));
    }
    tracing::info!(id, suppressed, "transaction suppression changed");
    get_transaction(conn, id)
}

pub fn delete_transaction(conn: &Connection, id: i64) -> LedgerResult<DeletedTransaction> {
    let existing = get_transaction(conn, id)?;
    conn.execute("DELETE FROM transactions WHERE id=?1", params![id])
        .map_err(|e| LedgerError::storage("Failed to delete transaction", &e))?;
    tracing::info!(id, order_id = ?existing.order_id, "transaction deleted");
    Ok(DeletedTransaction {
        id,
        order_id: existing.order_id,
    })
}

/// Transactions newest first with their category and order labels.
pub fn list_transactions(
    conn: &Connection,
    visibility: Visibility,
    limit: Option<usize>,
) -> LedgerResult<Vec<TransactionRow>> {
    select_rows(conn, visibility, None, limit)
}

pub(crate) fn select_rows(
    conn: &Connection,
    visibility: Visibility,
    order_id: Option<i64>,
    limit: Option<usize>,
) -> LedgerResult<Vec<TransactionRow>> {
    let mut sql = format!(
        "SELECT {}, c.name, o.description FROM transactions t \
         JOIN categories c ON t.category_id=c.id \
         LEFT JOIN orders o ON t.order_id=o.id \
         WHERE {}",
        TX_COLUMNS,
        visibility.transaction_sql()
    );
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();
    if let Some(oid) = order_id {
        sql.push_str(" AND t.order_id=?");
        values.push(Box::new(oid));
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = limit {
        sql.push_str(" LIMIT ?");
        values.push(Box::new(limit as i64));
    }
    tracing::debug!(%sql, "listing transactions");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        rusqlite::params_from_iter(values.iter().map(|v| v.as_ref())),
        |r| {
            Ok(TransactionRow {
                transaction: transaction_from_row(r, 0)?,
                category: r.get(9)?,
                order: r.get(10)?,
            })
        },
    )?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}
