// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerResult;
use crate::ledger::{self, NewTransaction, TransactionRow};
use crate::models::EntryType;
use crate::settings::SettingsProvider;
use crate::utils::{
    arg_id, arg_opt_id, fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table,
    yes_no,
};
use crate::visibility::Visibility;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, settings: &SettingsProvider, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, settings, sub)?,
        Some(("list", sub)) => list(conn, settings, sub)?,
        Some(("suppress", sub)) => set_suppressed(conn, sub, true)?,
        Some(("unsuppress", sub)) => set_suppressed(conn, sub, false)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Builds the insert from CLI arguments, checking fields in the same order
/// the ledger does.
pub fn new_transaction_from_args(sub: &clap::ArgMatches) -> LedgerResult<NewTransaction> {
    let amount = parse_decimal("amount", sub.get_one::<String>("amount").map_or("", String::as_str))?;
    let kind = sub
        .get_one::<String>("type")
        .map_or("", String::as_str)
        .parse::<EntryType>()?;
    let category_id = arg_opt_id(sub, "category_id")?;
    let order_id = arg_opt_id(sub, "order_id")?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date("date", s)?,
        None => chrono::Local::now().date_naive(),
    };
    Ok(NewTransaction {
        amount,
        r#type: kind,
        description: sub.get_one::<String>("description").cloned(),
        category_id,
        order_id,
        date,
        tags: sub.get_one::<String>("tags").cloned(),
    })
}

fn add(conn: &Connection, settings: &SettingsProvider, sub: &clap::ArgMatches) -> Result<()> {
    let new = new_transaction_from_args(sub)?;
    let t = ledger::create_transaction(conn, new)?;
    println!(
        "Recorded {} {} on {} (id {})",
        t.r#type,
        fmt_money(&t.amount, settings.currency_symbol()),
        t.date,
        t.id
    );
    Ok(())
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> LedgerResult<Vec<TransactionRow>> {
    let visibility = Visibility::from_include_suppressed(sub.get_flag("all"));
    let limit = sub.get_one::<usize>("limit").copied();
    ledger::list_transactions(conn, visibility, limit)
}

fn list(conn: &Connection, settings: &SettingsProvider, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let sym = settings.currency_symbol();
        let rows = data
            .into_iter()
            .map(|r| {
                vec![
                    r.transaction.id.to_string(),
                    r.transaction.date.to_string(),
                    r.transaction.r#type.to_string(),
                    r.category,
                    r.order.unwrap_or_default(),
                    r.transaction.description.clone().unwrap_or_default(),
                    fmt_money(&r.transaction.signed_amount(), sym),
                    yes_no(r.transaction.suppressed),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID", "Date", "Type", "Category", "Order", "Description", "Amount",
                    "Suppressed",
                ],
                rows,
            )
        );
    }
    Ok(())
}

fn set_suppressed(conn: &Connection, sub: &clap::ArgMatches, suppressed: bool) -> Result<()> {
    let id = arg_id(sub, "id")?;
    let t = ledger::update_transaction(conn, id, suppressed)?;
    println!(
        "Transaction {} {}",
        t.id,
        if t.suppressed { "suppressed" } else { "visible again" }
    );
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg_id(sub, "id")?;
    let deleted = ledger::delete_transaction(conn, id)?;
    match deleted.order_id {
        Some(order_id) => println!("Deleted transaction {} (order {})", deleted.id, order_id),
        None => println!("Deleted transaction {}", deleted.id),
    }
    Ok(())
}
