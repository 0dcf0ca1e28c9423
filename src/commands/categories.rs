// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, NewCategory};
use crate::models::EntryType;
use crate::utils::{arg_id, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").cloned().unwrap_or_default();
            let kind = sub
                .get_one::<String>("type")
                .map(|s| s.parse::<EntryType>())
                .transpose()?
                .unwrap_or(EntryType::Expense);
            let context = sub.get_one::<String>("context").cloned();
            let c = ledger::create_category(
                conn,
                NewCategory {
                    name,
                    r#type: kind,
                    context,
                },
            )?;
            println!("Added category '{}' ({}, id {})", c.name, c.r#type, c.id);
        }
        Some(("list", sub)) => {
            let kind = sub
                .get_one::<String>("type")
                .map(|s| s.parse::<EntryType>())
                .transpose()?;
            let data = ledger::list_categories(conn, kind)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .into_iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            c.name,
                            c.r#type.to_string(),
                            c.context.unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["ID", "Category", "Type", "Context"], rows));
            }
        }
        Some(("rm", sub)) => {
            let id = arg_id(sub, "id")?;
            ledger::delete_category(conn, id)?;
            println!("Removed category {}", id);
        }
        _ => {}
    }
    Ok(())
}
