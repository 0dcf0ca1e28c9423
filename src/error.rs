// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::ffi::ErrorCode;
use std::path::PathBuf;
use thiserror::Error;

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Failures surfaced by every ledger, settings and backup operation.
///
/// The `Display` output is short enough to show to the user as-is.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Storage(String),
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not signed in")]
    Unauthenticated,
    #[error("configuration error: {0}")]
    Config(String),
}

impl LedgerError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wraps a store failure behind a generic, user-facing message.
    pub fn storage(context: &str, err: &rusqlite::Error) -> Self {
        tracing::debug!(error = %err, "{}", context);
        Self::Storage(format!("{}: {}", context, err))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<rusqlite::Error> for LedgerError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(format!("Database error: {}", err))
    }
}

pub fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(err.sqlite_error_code(), Some(ErrorCode::ConstraintViolation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_field() {
        let err = LedgerError::validation("amount", "Amount must be positive");
        assert_eq!(err.to_string(), "amount: Amount must be positive");
    }

    #[test]
    fn not_found_message() {
        let err = LedgerError::not_found("Order", 7);
        assert_eq!(err.to_string(), "Order '7' not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn detects_constraint_violations() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t(name TEXT UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();
        let err = conn
            .execute("INSERT INTO t VALUES ('a')", [])
            .unwrap_err();
        assert!(is_constraint_violation(&err));
        let other = conn.execute("INSERT INTO missing VALUES (1)", []).unwrap_err();
        assert!(!is_constraint_violation(&other));
    }
}
