// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Cascading suppression.
//!
//! A transaction is visible when it is not suppressed itself and its parent
//! order, if any, is not suppressed either. Visibility is always derived on
//! read; nothing caches it.
//!
//! Listing screens may ask for [`Visibility::All`], which drops both halves
//! of the rule. Aggregation always runs with [`Visibility::Visible`].

use crate::models::{Order, Transaction};

/// SQL predicate equivalent to [`is_visible`]. Expects the transaction
/// aliased as `t` and its order left-joined as `o`.
pub const VISIBLE_TRANSACTION_SQL: &str =
    "t.suppressed = 0 AND (t.order_id IS NULL OR o.suppressed = 0)";

/// SQL predicate for visible orders, with the order aliased as `o`.
pub const VISIBLE_ORDER_SQL: &str = "o.suppressed = 0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Apply the full cascading rule.
    #[default]
    Visible,
    /// Show everything, suppressed rows and rows under suppressed orders included.
    All,
}

impl Visibility {
    pub fn from_include_suppressed(include_suppressed: bool) -> Self {
        if include_suppressed {
            Visibility::All
        } else {
            Visibility::Visible
        }
    }

    pub fn transaction_sql(&self) -> &'static str {
        match self {
            Visibility::Visible => VISIBLE_TRANSACTION_SQL,
            Visibility::All => "1=1",
        }
    }

    pub fn order_sql(&self) -> &'static str {
        match self {
            Visibility::Visible => VISIBLE_ORDER_SQL,
            Visibility::All => "1=1",
        }
    }
}

pub fn is_visible(tx: &Transaction, order: Option<&Order>) -> bool {
    is_visible_flags(tx.suppressed, order.map(|o| o.suppressed))
}

/// Flag-level form of [`is_visible`]; `order_suppressed` is `None` for
/// transactions without a parent order.
pub fn is_visible_flags(tx_suppressed: bool, order_suppressed: Option<bool>) -> bool {
    !tx_suppressed && !order_suppressed.unwrap_or(false)
}
