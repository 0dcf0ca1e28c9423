// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Flat key/value settings stored alongside the ledger.
//!
//! The ledger and stats code never read these. Presentation code gets them
//! through a [`SettingsProvider`] it is handed, and calls
//! [`SettingsProvider::reload`] when it wants fresh values.

use crate::error::{LedgerError, LedgerResult};
use crate::models::Setting;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashMap;

pub const CURRENCY_SYMBOL_KEY: &str = "currency_symbol";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "£";

pub fn list_settings(conn: &Connection) -> LedgerResult<Vec<Setting>> {
    let mut stmt = conn.prepare("SELECT key, value, description FROM settings ORDER BY key")?;
    let rows = stmt.query_map([], |r| {
        Ok(Setting {
            key: r.get(0)?,
            value: r.get(1)?,
            description: r.get(2)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn get_setting(conn: &Connection, key: &str) -> LedgerResult<Option<Setting>> {
    let s = conn
        .query_row(
            "SELECT key, value, description FROM settings WHERE key=?1",
            params![key],
            |r| {
                Ok(Setting {
                    key: r.get(0)?,
                    value: r.get(1)?,
                    description: r.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(s)
}

pub fn upsert_setting(
    conn: &Connection,
    key: &str,
    value: &str,
    description: Option<&str>,
) -> LedgerResult<Setting> {
    let key = key.trim();
    if key.is_empty() {
        return Err(LedgerError::validation("key", "Key is required"));
    }
    conn.execute(
        "INSERT INTO settings(key, value, description) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, description=excluded.description",
        params![key, value, description],
    )
    .map_err(|e| LedgerError::storage(&format!("Failed to update setting {}", key), &e))?;
    tracing::info!(%key, %value, "setting updated");
    Ok(Setting {
        key: key.to_string(),
        value: value.to_string(),
        description: description.map(str::to_string),
    })
}

/// Snapshot of the settings table.
#[derive(Debug, Clone, Default)]
pub struct SettingsProvider {
    values: HashMap<String, String>,
}

impl SettingsProvider {
    pub fn load(conn: &Connection) -> LedgerResult<Self> {
        let mut provider = Self::default();
        provider.reload(conn)?;
        Ok(provider)
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn reload(&mut self, conn: &Connection) -> LedgerResult<()> {
        self.values = list_settings(conn)?
            .into_iter()
            .map(|s| (s.key, s.value))
            .collect();
        tracing::debug!(count = self.values.len(), "settings reloaded");
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn currency_symbol(&self) -> &str {
        self.get_or(CURRENCY_SYMBOL_KEY, DEFAULT_CURRENCY_SYMBOL)
    }
}
