// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::error::{LedgerError, LedgerResult};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "REPAIRLEDGER";
pub const CONFIG_FILE_NAME: &str = "repairledger.toml";

/// Where the data lives and how loud to log.
///
/// Sources, lowest precedence first: `repairledger.toml` in the platform
/// config dir, an explicit `--config` file, `REPAIRLEDGER_*` env vars.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    #[serde(default)]
    pub backup_dir: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            backup_dir: None,
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn load(explicit: Option<&Path>) -> LedgerResult<Self> {
        let mut builder = Config::builder();
        if let Ok(proj) = db::project_dirs() {
            builder = builder
                .add_source(File::from(proj.config_dir().join(CONFIG_FILE_NAME)).required(false));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));
        Self::from_config(builder.build())
    }

    fn from_config(built: Result<Config, config::ConfigError>) -> LedgerResult<Self> {
        built
            .and_then(|c| c.try_deserialize::<AppConfig>())
            .map_err(|e| LedgerError::Config(e.to_string()))
    }

    pub fn db_path(&self) -> LedgerResult<PathBuf> {
        match &self.database_path {
            Some(p) => Ok(p.clone()),
            None => db::default_db_path(),
        }
    }

    pub fn backup_dir(&self) -> LedgerResult<PathBuf> {
        match &self.backup_dir {
            Some(p) => Ok(p.clone()),
            None => db::default_backup_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn explicit_file_overrides_defaults() {
        let mut f = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(f, "database_path = \"/tmp/ledger-test.sqlite\"\nlog_level = \"debug\"").unwrap();
        let cfg = AppConfig::load(Some(f.path())).unwrap();
        assert_eq!(cfg.database_path, Some(PathBuf::from("/tmp/ledger-test.sqlite")));
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.backup_dir, None);
    }

    #[test]
    fn missing_explicit_file_is_a_config_error() {
        let err = AppConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }
}
