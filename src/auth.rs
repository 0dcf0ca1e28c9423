// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Access gate. Session handling belongs to whatever provider sits behind
//! [`AuthProvider`]; the ledger only asks whether the caller is signed in and
//! who they are.

use crate::error::{LedgerError, LedgerResult};

pub trait AuthProvider {
    fn is_authenticated(&self) -> bool;
    fn identity(&self) -> Option<String>;
}

/// The local OS user, always signed in.
#[derive(Debug, Clone, Default)]
pub struct LocalUser;

impl AuthProvider for LocalUser {
    fn is_authenticated(&self) -> bool {
        true
    }

    fn identity(&self) -> Option<String> {
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .ok()
            .filter(|u| !u.is_empty())
    }
}

/// Fixed answer, for embedding and tests.
#[derive(Debug, Clone)]
pub struct StaticAuth {
    pub user: Option<String>,
}

impl AuthProvider for StaticAuth {
    fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    fn identity(&self) -> Option<String> {
        self.user.clone()
    }
}

/// Returns the display identity, or `Unauthenticated`.
pub fn require_auth(provider: &dyn AuthProvider) -> LedgerResult<String> {
    if !provider.is_authenticated() {
        tracing::warn!("unauthenticated access rejected");
        return Err(LedgerError::Unauthenticated);
    }
    Ok(provider.identity().unwrap_or_else(|| "local".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_follows_provider() {
        let anon = StaticAuth { user: None };
        assert!(matches!(require_auth(&anon), Err(LedgerError::Unauthenticated)));
        let dana = StaticAuth {
            user: Some("dana".into()),
        };
        assert_eq!(require_auth(&dana).unwrap(), "dana");
        assert!(require_auth(&LocalUser).is_ok());
    }
}
