// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::settings::{get_setting, list_settings, upsert_setting};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let data = list_settings(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .into_iter()
                    .map(|s| vec![s.key, s.value, s.description.unwrap_or_default()])
                    .collect();
                println!("{}", pretty_table(&["Key", "Value", "Description"], rows));
            }
        }
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("key").map_or("", String::as_str);
            match get_setting(conn, key)? {
                Some(s) => println!("{}", s.value),
                None => eprintln!("Setting '{}' is not set", key),
            }
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").map_or("", String::as_str);
            let value = sub.get_one::<String>("value").map_or("", String::as_str);
            let description = sub.get_one::<String>("description").map(String::as_str);
            let s = upsert_setting(conn, key, value, description)?;
            println!("Updated setting {}: {}", s.key, s.value);
        }
        _ => {}
    }
    Ok(())
}
