// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, NewOrder, OrderPatch};
use crate::models::OrderStatus;
use crate::settings::SettingsProvider;
use crate::utils::{arg_id, fmt_money, maybe_print_json, parse_bool, pretty_table, yes_no};
use crate::visibility::Visibility;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, settings: &SettingsProvider, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, settings, sub)?,
        Some(("show", sub)) => show(conn, settings, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("suppress", sub)) => set_suppressed(conn, sub, true)?,
        Some(("unsuppress", sub)) => set_suppressed(conn, sub, false)?,
        _ => {}
    }
    Ok(())
}

fn opt_string(sub: &clap::ArgMatches, name: &str) -> Option<String> {
    sub.get_one::<String>(name).cloned()
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let status = sub
        .get_one::<String>("status")
        .map(|s| s.parse::<OrderStatus>())
        .transpose()?;
    let order = ledger::create_order(
        conn,
        NewOrder {
            description: opt_string(sub, "description").unwrap_or_default(),
            customer_name: opt_string(sub, "customer"),
            status,
            market_place: opt_string(sub, "market"),
            notes: opt_string(sub, "notes"),
            is_job_lot: Some(sub.get_flag("job_lot")),
        },
    )?;
    println!(
        "Created order {} '{}' ({})",
        order.id, order.description, order.status
    );
    Ok(())
}

pub fn patch_from_args(sub: &clap::ArgMatches) -> Result<OrderPatch> {
    Ok(OrderPatch {
        description: opt_string(sub, "description"),
        customer_name: opt_string(sub, "customer"),
        status: sub
            .get_one::<String>("status")
            .map(|s| s.parse::<OrderStatus>())
            .transpose()?,
        market_place: opt_string(sub, "market"),
        notes: opt_string(sub, "notes"),
        is_job_lot: sub
            .get_one::<String>("job_lot")
            .map(|s| parse_bool("isJobLot", s))
            .transpose()?,
        suppressed: sub
            .get_one::<String>("suppressed")
            .map(|s| parse_bool("suppressed", s))
            .transpose()?,
    })
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg_id(sub, "id")?;
    let patch = patch_from_args(sub)?;
    let order = ledger::update_order(conn, id, patch)?;
    println!(
        "Updated order {} '{}' ({}, job lot: {}, suppressed: {})",
        order.id,
        order.description,
        order.status,
        yes_no(order.is_job_lot),
        yes_no(order.suppressed)
    );
    Ok(())
}

fn set_suppressed(conn: &Connection, sub: &clap::ArgMatches, suppressed: bool) -> Result<()> {
    let id = arg_id(sub, "id")?;
    let order = ledger::update_order(
        conn,
        id,
        OrderPatch {
            suppressed: Some(suppressed),
            ..OrderPatch::default()
        },
    )?;
    if suppressed {
        println!("Suppressed order {} and its transactions", order.id);
    } else {
        println!("Order {} is visible again", order.id);
    }
    Ok(())
}

fn list(conn: &Connection, settings: &SettingsProvider, sub: &clap::ArgMatches) -> Result<()> {
    let visibility = Visibility::from_include_suppressed(sub.get_flag("all"));
    let data = ledger::list_orders(conn, visibility)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let sym = settings.currency_symbol();
        let rows = data
            .into_iter()
            .map(|s| {
                vec![
                    s.order.id.to_string(),
                    s.order.created_at.format("%Y-%m-%d").to_string(),
                    s.order.description,
                    s.order.customer_name.unwrap_or_default(),
                    s.order.status.to_string(),
                    yes_no(s.order.is_job_lot),
                    yes_no(s.order.suppressed),
                    s.transaction_count.to_string(),
                    fmt_money(&s.totals.profit, sym),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID", "Created", "Description", "Customer", "Status", "Job Lot", "Suppressed",
                    "Txns", "Profit",
                ],
                rows,
            )
        );
    }
    Ok(())
}

fn show(conn: &Connection, settings: &SettingsProvider, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg_id(sub, "id")?;
    let visibility = Visibility::from_include_suppressed(sub.get_flag("all"));
    let detail = ledger::order_detail(conn, id, visibility)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &detail)? {
        return Ok(());
    }
    let sym = settings.currency_symbol();
    let o = &detail.order;
    println!("Order {}: {}", o.id, o.description);
    println!(
        "Customer: {}  Marketplace: {}  Status: {}  Job lot: {}  Suppressed: {}",
        o.customer_name.as_deref().unwrap_or("-"),
        o.market_place.as_deref().unwrap_or("-"),
        o.status,
        yes_no(o.is_job_lot),
        yes_no(o.suppressed)
    );
    if let Some(notes) = &o.notes {
        println!("Notes: {}", notes);
    }
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Profit"],
            vec![vec![
                fmt_money(&detail.totals.income, sym),
                fmt_money(&detail.totals.expense, sym),
                fmt_money(&detail.totals.profit, sym),
            ]],
        )
    );
    let rows = detail
        .transactions
        .iter()
        .map(|r| {
            vec![
                r.transaction.id.to_string(),
                r.transaction.date.to_string(),
                r.transaction.r#type.to_string(),
                r.category.clone(),
                r.transaction.description.clone().unwrap_or_default(),
                fmt_money(&r.transaction.signed_amount(), sym),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Date", "Type", "Category", "Description", "Amount"],
            rows
        )
    );
    Ok(())
}
