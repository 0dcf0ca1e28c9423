// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use repairledger::auth::{LocalUser, require_auth};
use repairledger::backup::BackupService;
use repairledger::config::AppConfig;
use repairledger::settings::SettingsProvider;
use repairledger::{cli, commands, db};

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut cfg = AppConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    if let Some(p) = matches.get_one::<PathBuf>("db") {
        cfg.database_path = Some(p.clone());
    }
    if let Some(p) = matches.get_one::<PathBuf>("backup_dir") {
        cfg.backup_dir = Some(p.clone());
    }
    init_logging(&cfg.log_level);

    let user = require_auth(&LocalUser)?;
    let db_path = cfg.db_path()?;
    debug!(%user, db = %db_path.display(), "starting");

    // Backups copy the data file itself, so no connection may be held.
    if let Some(("backup", sub)) = matches.subcommand() {
        let service = BackupService::new(db_path.clone(), cfg.backup_dir()?);
        return commands::backups::handle(&service, sub);
    }

    let conn = db::open_or_init(&db_path)?;
    let settings = SettingsProvider::load(&conn)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            info!(path = %db_path.display(), "database ready");
            println!("Database initialized at {}", db_path.display());
        }
        Some(("category", sub)) => commands::categories::handle(&conn, sub)?,
        Some(("order", sub)) => commands::orders::handle(&conn, &settings, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, &settings, sub)?,
        Some(("stats", sub)) => commands::stats::handle(&conn, &settings, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&conn, &settings, sub)?,
        Some(("sidebar", sub)) => commands::dashboard::handle_sidebar(&conn, &settings, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
