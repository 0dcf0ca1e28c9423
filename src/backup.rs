// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! File copies of the live data file.
//!
//! Restore copies over the live file without coordinating with other open
//! connections. That is only safe with a single interactive user, so callers
//! should close their own connection before restoring.

use crate::error::{LedgerError, LedgerResult};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const BACKUP_EXTENSION: &str = "db";
pub const SAFETY_LABEL: &str = "SAFETY-PRE-RESTORE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupFile {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedBackup {
    pub path: PathBuf,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct BackupService {
    db_path: PathBuf,
    backup_dir: PathBuf,
}

impl BackupService {
    pub fn new(db_path: impl Into<PathBuf>, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            backup_dir: backup_dir.into(),
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Backups newest first. A missing directory just means no backups yet.
    pub fn list_backups(&self) -> LedgerResult<Vec<BackupFile>> {
        let entries = match fs::read_dir(&self.backup_dir) {
            Ok(e) => e,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LedgerError::io(&self.backup_dir, e)),
        };
        let mut out = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| LedgerError::io(&self.backup_dir, e))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            let meta = match entry.metadata() {
                Ok(m) if m.is_file() => m,
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable backup");
                    continue;
                }
            };
            let created_at = meta
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());
            out.push(BackupFile {
                name: entry.file_name().to_string_lossy().into_owned(),
                created_at,
                size_bytes: meta.len(),
            });
        }
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.name.cmp(&a.name)));
        Ok(out)
    }

    pub fn create_backup(&self, label: Option<&str>) -> LedgerResult<CreatedBackup> {
        self.create_backup_at(label, Utc::now())
    }

    pub fn create_backup_at(&self, label: Option<&str>, now: DateTime<Utc>) -> LedgerResult<CreatedBackup> {
        let label = match label.map(str::trim).filter(|l| !l.is_empty()) {
            Some(l) => {
                check_file_name(l, "label")?;
                l
            }
            None => "backup",
        };
        if !self.db_path.is_file() {
            return Err(LedgerError::not_found(
                "Database file",
                self.db_path.display(),
            ));
        }
        fs::create_dir_all(&self.backup_dir).map_err(|e| LedgerError::io(&self.backup_dir, e))?;

        let name = backup_file_name(label, now);
        let path = self.backup_dir.join(&name);
        fs::copy(&self.db_path, &path).map_err(|e| LedgerError::io(&path, e))?;
        tracing::info!(path = %path.display(), "backup created");
        Ok(CreatedBackup { path, name })
    }

    /// Replaces the live file with the named backup, after taking a safety
    /// backup of the current state. A failed safety backup aborts the restore.
    pub fn restore_backup(&self, name: &str) -> LedgerResult<()> {
        check_file_name(name, "name")?;
        let source = self.backup_dir.join(name);
        if !source.is_file() {
            tracing::warn!(%name, "restore requested for missing backup");
            return Err(LedgerError::not_found("Backup", name));
        }

        let safety = self.create_backup(Some(SAFETY_LABEL))?;
        tracing::info!(safety = %safety.name, "safety backup taken before restore");

        fs::copy(&source, &self.db_path).map_err(|e| LedgerError::io(&self.db_path, e))?;
        tracing::info!(%name, db = %self.db_path.display(), "backup restored");
        Ok(())
    }
}

/// `<label>-<ISO timestamp with ':' and '.' replaced by '-'>.db`
pub fn backup_file_name(label: &str, now: DateTime<Utc>) -> String {
    let stamp = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("{}-{}.{}", label, stamp, BACKUP_EXTENSION)
}

fn check_file_name(name: &str, field: &'static str) -> LedgerResult<()> {
    if name.is_empty()
        || name.contains(['/', '\\'])
        || name == "."
        || name == ".."
    {
        return Err(LedgerError::validation(
            field,
            format!("'{}' is not a plain file name", name),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn file_name_format() {
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(
            backup_file_name("backup", now),
            "backup-2025-03-04T05-06-07-000Z.db"
        );
    }

    #[test]
    fn rejects_path_traversal() {
        assert!(check_file_name("../x.db", "name").is_err());
        assert!(check_file_name("a\\b.db", "name").is_err());
        assert!(check_file_name("ok.db", "name").is_ok());
    }
}
