// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerResult;
use crate::ledger::{OrderSummary, TransactionRow, count_active_orders, list_orders, list_transactions};
use crate::stats::{Totals, load_stats};
use crate::visibility::Visibility;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub lifetime: Totals,
    pub current_month: Totals,
    pub active_orders: i64,
    pub recent_orders: Vec<OrderSummary>,
    pub recent_transactions: Vec<TransactionRow>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Sidebar {
    pub lifetime: Totals,
    pub last_60_days: Totals,
    pub last_30_days: Totals,
}

/// Home screen figures. Only visible orders and transactions are counted.
pub fn dashboard(conn: &Connection, today: NaiveDate) -> LedgerResult<Dashboard> {
    let stats = load_stats(conn, today)?;
    let mut recent_orders = list_orders(conn, Visibility::Visible)?;
    recent_orders.truncate(RECENT_LIMIT);
    Ok(Dashboard {
        lifetime: stats.lifetime,
        current_month: stats.current_month,
        active_orders: count_active_orders(conn)?,
        recent_orders,
        recent_transactions: list_transactions(conn, Visibility::Visible, Some(RECENT_LIMIT))?,
    })
}

pub fn sidebar(conn: &Connection, today: NaiveDate) -> LedgerResult<Sidebar> {
    let stats = load_stats(conn, today)?;
    Ok(Sidebar {
        lifetime: stats.lifetime,
        last_60_days: stats.last_60_days,
        last_30_days: stats.last_30_days,
    })
}
