// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, LedgerResult};
use directories::{BaseDirs, ProjectDirs};
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Repairledger", "repairledger"));

pub const DB_FILE_NAME: &str = "repairledger.sqlite";

pub fn project_dirs() -> LedgerResult<ProjectDirs> {
    ProjectDirs::from(APP.0, APP.1, APP.2).ok_or_else(|| {
        LedgerError::Config("Could not determine platform-specific data dir".into())
    })
}

/// Default location of the live data file.
pub fn default_db_path() -> LedgerResult<PathBuf> {
    let proj = project_dirs()?;
    Ok(proj.data_dir().join(DB_FILE_NAME))
}

/// Default backup directory: a fixed folder under the user's home.
pub fn default_backup_dir() -> LedgerResult<PathBuf> {
    let base = BaseDirs::new()
        .ok_or_else(|| LedgerError::Config("Could not determine home directory".into()))?;
    Ok(base.home_dir().join("RepairLedger").join("backups"))
}

pub fn open_or_init(path: &Path) -> LedgerResult<Connection> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| LedgerError::io(dir, e))?;
    }
    let mut conn = Connection::open(path)
        .map_err(|e| LedgerError::storage(&format!("Open DB at {}", path.display()), &e))?;
    init_schema(&mut conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> LedgerResult<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        description TEXT
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE COLLATE NOCASE,
        type TEXT NOT NULL CHECK(type IN ('INCOME','EXPENSE')),
        context TEXT
    );

    CREATE TABLE IF NOT EXISTS orders(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        description TEXT NOT NULL,
        customer_name TEXT,
        status TEXT NOT NULL DEFAULT 'OPEN' CHECK(status IN ('OPEN','COMPLETED','CANCELLED')),
        market_place TEXT,
        notes TEXT,
        is_job_lot INTEGER NOT NULL DEFAULT 0,
        suppressed INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_orders_created_at ON orders(created_at);

    -- amount is a positive decimal magnitude; direction lives in type
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        amount TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('INCOME','EXPENSE')),
        description TEXT,
        category_id INTEGER NOT NULL,
        order_id INTEGER,
        date TEXT NOT NULL,
        suppressed INTEGER NOT NULL DEFAULT 0,
        tags TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(category_id) REFERENCES categories(id),
        FOREIGN KEY(order_id) REFERENCES orders(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    CREATE INDEX IF NOT EXISTS idx_transactions_order ON transactions(order_id);
    "#,
    )
    .map_err(|e| LedgerError::storage("Failed to initialize schema", &e))?;
    Ok(())
}
