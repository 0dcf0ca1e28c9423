// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::backup::BackupService;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

/// Runs without an open connection so a restore never overwrites a file this
/// process is holding.
pub fn handle(service: &BackupService, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let data = service.list_backups()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .into_iter()
                    .map(|b| {
                        vec![
                            b.name,
                            b.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                            format!("{:.1} KiB", b.size_bytes as f64 / 1024.0),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Name", "Created", "Size"], rows));
            }
        }
        Some(("create", sub)) => {
            let label = sub.get_one::<String>("label").map(String::as_str);
            let created = service.create_backup(label)?;
            println!("Backup written to {}", created.path.display());
        }
        Some(("restore", sub)) => {
            let name = sub.get_one::<String>("name").map_or("", String::as_str);
            service.restore_backup(name)?;
            println!("Restored {} (previous state saved first)", name);
        }
        _ => {}
    }
    Ok(())
}
