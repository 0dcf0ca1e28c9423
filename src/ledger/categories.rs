// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::clean_opt;
use crate::error::{LedgerError, LedgerResult, is_constraint_violation};
use crate::models::{Category, EntryType};
use rusqlite::{Connection, OptionalExtension, params};

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub r#type: EntryType,
    pub context: Option<String>,
}

/// Names are unique ignoring case. There is deliberately no update: a
/// category's type is fixed once created.
pub fn create_category(conn: &Connection, new: NewCategory) -> LedgerResult<Category> {
    let name = new.name.trim().to_string();
    if name.is_empty() {
        return Err(LedgerError::validation("name", "Name is required"));
    }
    let context = clean_opt(new.context);
    conn.execute(
        "INSERT INTO categories(name, type, context) VALUES (?1, ?2, ?3)",
        params![name, new.r#type, context],
    )
    .map_err(|e| {
        if is_constraint_violation(&e) {
            tracing::warn!(%name, "duplicate category rejected");
            LedgerError::Conflict(format!("Category '{}' already exists", name))
        } else {
            LedgerError::storage("Failed to create category", &e)
        }
    })?;
    let id = conn.last_insert_rowid();
    tracing::info!(id, %name, kind = %new.r#type, "category created");
    Ok(Category {
        id,
        name,
        r#type: new.r#type,
        context,
    })
}

pub fn get_category(conn: &Connection, id: i64) -> LedgerResult<Category> {
    conn.query_row(
        "SELECT id, name, type, context FROM categories WHERE id=?1",
        params![id],
        |r| {
            Ok(Category {
                id: r.get(0)?,
                name: r.get(1)?,
                r#type: r.get(2)?,
                context: r.get(3)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| LedgerError::not_found("Category", id))
}

/// Categories ordered by name; `kind` narrows to the ones offerable for
/// that transaction type.
pub fn list_categories(conn: &Connection, kind: Option<EntryType>) -> LedgerResult<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, type, context FROM categories
         WHERE ?1 IS NULL OR type=?1
         ORDER BY name COLLATE NOCASE",
    )?;
    let rows = stmt.query_map(params![kind], |r| {
        Ok(Category {
            id: r.get(0)?,
            name: r.get(1)?,
            r#type: r.get(2)?,
            context: r.get(3)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Fails with `Conflict` while any transaction still references the
/// category; the foreign key in the store is what rejects it.
pub fn delete_category(conn: &Connection, id: i64) -> LedgerResult<()> {
    let category = get_category(conn, id)?;
    match conn.execute("DELETE FROM categories WHERE id=?1", params![id]) {
        Ok(_) => {
            tracing::info!(id, name = %category.name, "category deleted");
            Ok(())
        }
        Err(e) if is_constraint_violation(&e) => {
            let used: i64 = conn.query_row(
                "SELECT COUNT(*) FROM transactions WHERE category_id=?1",
                params![id],
                |r| r.get(0),
            )?;
            tracing::warn!(id, used, "category delete rejected, still referenced");
            Err(LedgerError::Conflict(format!(
                "Category '{}' is used by {} transaction(s)",
                category.name, used
            )))
        }
        Err(e) => Err(LedgerError::storage("Failed to delete category", &e)),
    }
}
