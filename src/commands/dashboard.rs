// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::dashboard::{dashboard, sidebar};
use crate::settings::SettingsProvider;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, reference_date};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, settings: &SettingsProvider, sub: &clap::ArgMatches) -> Result<()> {
    let today = reference_date(sub)?;
    let d = dashboard(conn, today)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &d)? {
        return Ok(());
    }
    let sym = settings.currency_symbol();
    println!(
        "{}",
        pretty_table(
            &["Total Profit", "Monthly Profit", "Total Revenue", "Active Orders"],
            vec![vec![
                fmt_money(&d.lifetime.profit, sym),
                fmt_money(&d.current_month.profit, sym),
                fmt_money(&d.lifetime.income, sym),
                d.active_orders.to_string(),
            ]],
        )
    );

    let orders = d
        .recent_orders
        .iter()
        .map(|s| {
            vec![
                s.order.id.to_string(),
                s.order.description.clone(),
                s.order.customer_name.clone().unwrap_or_default(),
                s.order.status.to_string(),
            ]
        })
        .collect();
    println!("Recent orders");
    println!("{}", pretty_table(&["ID", "Description", "Customer", "Status"], orders));

    let txns = d
        .recent_transactions
        .iter()
        .map(|r| {
            vec![
                r.transaction.date.to_string(),
                r.category.clone(),
                r.transaction.description.clone().unwrap_or_default(),
                fmt_money(&r.transaction.signed_amount(), sym),
            ]
        })
        .collect();
    println!("Recent transactions");
    println!("{}", pretty_table(&["Date", "Category", "Description", "Amount"], txns));
    Ok(())
}

pub fn handle_sidebar(
    conn: &Connection,
    settings: &SettingsProvider,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let today = reference_date(sub)?;
    let s = sidebar(conn, today)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let sym = settings.currency_symbol();
    println!("Total profit:  {}", fmt_money(&s.lifetime.profit, sym));
    println!("Last 60 days:  {}", fmt_money(&s.last_60_days.profit, sym));
    println!("Last 30 days:  {}", fmt_money(&s.last_30_days.profit, sym));
    Ok(())
}
