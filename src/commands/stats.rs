// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::settings::SettingsProvider;
use crate::stats::{Totals, load_stats};
use crate::utils::{fmt_money, maybe_print_json, pretty_table, reference_date};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, settings: &SettingsProvider, sub: &clap::ArgMatches) -> Result<()> {
    let today = reference_date(sub)?;
    let report = load_stats(conn, today)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let sym = settings.currency_symbol();
    let row = |label: &str, t: &Totals| {
        vec![
            label.to_string(),
            fmt_money(&t.income, sym),
            fmt_money(&t.expense, sym),
            fmt_money(&t.profit, sym),
        ]
    };
    let month_label = today.format("%B %Y").to_string();
    let rows = vec![
        row("Lifetime", &report.lifetime),
        row("Last 60 days", &report.last_60_days),
        row("Last 30 days", &report.last_30_days),
        row(&month_label, &report.current_month),
    ];
    println!(
        "{}",
        pretty_table(&["Window", "Income", "Expense", "Profit"], rows)
    );
    Ok(())
}
