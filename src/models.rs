// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of money movement. Also the kind of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "INCOME",
            EntryType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INCOME" => Ok(EntryType::Income),
            "EXPENSE" => Ok(EntryType::Expense),
            other => Err(LedgerError::validation(
                "type",
                format!("Invalid type '{}', expected INCOME or EXPENSE", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Open,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "OPEN",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OPEN" => Ok(OrderStatus::Open),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(LedgerError::validation(
                "status",
                format!(
                    "Invalid status '{}', expected OPEN, COMPLETED or CANCELLED",
                    other
                ),
            )),
        }
    }
}

macro_rules! text_enum_sql {
    ($ty:ty) => {
        impl ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $ty {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                let s = value.as_str()?;
                s.parse::<$ty>()
                    .map_err(|e| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

text_enum_sql!(EntryType);
text_enum_sql!(OrderStatus);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub r#type: EntryType,
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub description: String,
    pub customer_name: Option<String>,
    pub status: OrderStatus,
    pub market_place: Option<String>,
    pub notes: Option<String>,
    pub is_job_lot: bool,
    pub suppressed: bool,
    pub created_at: NaiveDateTime,
}

/// A single ledger entry. `amount` is always a positive magnitude; the
/// direction comes from `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    pub r#type: EntryType,
    pub description: Option<String>,
    pub category_id: i64,
    pub order_id: Option<i64>,
    pub date: NaiveDate,
    pub suppressed: bool,
    pub tags: Option<String>,
}

impl Transaction {
    /// Amount with the sign implied by the entry type.
    pub fn signed_amount(&self) -> Decimal {
        match self.r#type {
            EntryType::Income => self.amount,
            EntryType::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn entry_type_parses_case_insensitively() {
        assert_eq!("income".parse::<EntryType>().unwrap(), EntryType::Income);
        assert_eq!(" EXPENSE ".parse::<EntryType>().unwrap(), EntryType::Expense);
        let err = "refund".parse::<EntryType>().unwrap_err();
        assert!(matches!(err, LedgerError::Validation { field: "type", .. }));
    }

    #[test]
    fn order_status_round_trips_through_sqlite() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let back: OrderStatus = conn
            .query_row("SELECT ?1", [OrderStatus::Cancelled], |r| r.get(0))
            .unwrap();
        assert_eq!(back, OrderStatus::Cancelled);
    }

    #[test]
    fn signed_amount_follows_type() {
        let mut t = Transaction {
            id: 1,
            amount: d("40.00"),
            r#type: EntryType::Expense,
            description: None,
            category_id: 1,
            order_id: None,
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            suppressed: false,
            tags: None,
        };
        assert_eq!(t.signed_amount(), d("-40.00"));
        t.r#type = EntryType::Income;
        assert_eq!(t.signed_amount(), d("40.00"));
    }
}
