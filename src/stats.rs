// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Income, expense and profit rollups over visible transactions.
//!
//! Everything is recomputed from the store on each call; there is no cached
//! aggregate to invalidate. Sums use `Decimal` end to end.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{EntryType, Transaction};
use crate::visibility::VISIBLE_TRANSACTION_SQL;
use chrono::{Datelike, Duration, NaiveDate};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

/// The part of a transaction the aggregator looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatEntry {
    pub amount: Decimal,
    pub r#type: EntryType,
    pub date: NaiveDate,
}

impl From<&Transaction> for StatEntry {
    fn from(t: &Transaction) -> Self {
        StatEntry {
            amount: t.amount,
            r#type: t.r#type,
            date: t.date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub profit: Decimal,
}

fn overflow() -> LedgerError {
    LedgerError::Storage("Stored amounts are too large to total".into())
}

impl Totals {
    fn record(&mut self, entry: &StatEntry) -> LedgerResult<()> {
        match entry.r#type {
            EntryType::Income => {
                self.income = self.income.checked_add(entry.amount).ok_or_else(overflow)?
            }
            EntryType::Expense => {
                self.expense = self.expense.checked_add(entry.amount).ok_or_else(overflow)?
            }
        }
        self.profit = self.income.checked_sub(self.expense).ok_or_else(overflow)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatsReport {
    pub lifetime: Totals,
    pub last_30_days: Totals,
    pub last_60_days: Totals,
    pub current_month: Totals,
}

/// `true` when `date` falls in `[today - days, today]`.
pub fn in_last_days(date: NaiveDate, today: NaiveDate, days: i64) -> bool {
    let start = today - Duration::days(days);
    date >= start && date <= today
}

pub fn in_same_month(date: NaiveDate, today: NaiveDate) -> bool {
    date.year() == today.year() && date.month() == today.month()
}

/// Single pass over already-filtered entries.
///
/// Callers must drop non-visible transactions first; see
/// [`load_visible_entries`].
pub fn compute_stats(entries: &[StatEntry], today: NaiveDate) -> LedgerResult<StatsReport> {
    let mut report = StatsReport::default();
    for e in entries {
        report.lifetime.record(e)?;
        if in_last_days(e.date, today, 30) {
            report.last_30_days.record(e)?;
        }
        if in_last_days(e.date, today, 60) {
            report.last_60_days.record(e)?;
        }
        if in_same_month(e.date, today) {
            report.current_month.record(e)?;
        }
    }
    Ok(report)
}

pub fn totals<'a>(entries: impl IntoIterator<Item = &'a StatEntry>) -> LedgerResult<Totals> {
    let mut t = Totals::default();
    for e in entries {
        t.record(e)?;
    }
    Ok(t)
}

pub fn load_visible_entries(conn: &Connection) -> LedgerResult<Vec<StatEntry>> {
    let sql = format!(
        "SELECT t.amount, t.type, t.date FROM transactions t \
         LEFT JOIN orders o ON t.order_id = o.id WHERE {}",
        VISIBLE_TRANSACTION_SQL
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, EntryType>(1)?,
            r.get::<_, NaiveDate>(2)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (amount_s, kind, date) = row?;
        let amount = amount_s.parse::<Decimal>().map_err(|_| {
            LedgerError::Storage(format!("Invalid stored amount '{}'", amount_s))
        })?;
        out.push(StatEntry {
            amount,
            r#type: kind,
            date,
        });
    }
    tracing::debug!(count = out.len(), "loaded visible transactions for stats");
    Ok(out)
}

pub fn load_stats(conn: &Connection, today: NaiveDate) -> LedgerResult<StatsReport> {
    let entries = load_visible_entries(conn)?;
    compute_stats(&entries, today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn day(y: i32, m: u32, dd: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, dd).unwrap()
    }

    fn entry(amount: &str, kind: EntryType, date: NaiveDate) -> StatEntry {
        StatEntry {
            amount: d(amount),
            r#type: kind,
            date,
        }
    }

    #[test]
    fn empty_input_is_all_zero() {
        let report = compute_stats(&[], day(2025, 6, 15)).unwrap();
        assert_eq!(report, StatsReport::default());
        assert_eq!(report.lifetime.profit, Decimal::ZERO);
    }

    #[test]
    fn window_edges_are_inclusive() {
        let today = day(2025, 6, 15);
        let entries = vec![
            entry("1", EntryType::Income, today - Duration::days(29)),
            entry("2", EntryType::Income, today - Duration::days(30)),
            entry("4", EntryType::Income, today - Duration::days(31)),
            entry("8", EntryType::Income, today - Duration::days(60)),
            entry("16", EntryType::Income, today - Duration::days(61)),
        ];
        let r = compute_stats(&entries, today).unwrap();
        assert_eq!(r.last_30_days.income, d("3"));
        assert_eq!(r.last_60_days.income, d("15"));
        assert_eq!(r.lifetime.income, d("31"));
    }

    #[test]
    fn future_dates_skip_rolling_windows() {
        let today = day(2025, 6, 15);
        let r = compute_stats(&[entry("5", EntryType::Expense, day(2025, 6, 16))], today).unwrap();
        assert_eq!(r.lifetime.expense, d("5"));
        assert_eq!(r.last_30_days.expense, Decimal::ZERO);
        // same calendar month still counts
        assert_eq!(r.current_month.expense, d("5"));
    }

    #[test]
    fn calendar_month_differs_from_rolling_window() {
        let today = day(2025, 6, 2);
        let entries = vec![
            entry("10", EntryType::Income, day(2025, 5, 30)),
            entry("20", EntryType::Income, day(2025, 6, 1)),
            entry("40", EntryType::Income, day(2024, 6, 1)),
        ];
        let r = compute_stats(&entries, today).unwrap();
        assert_eq!(r.current_month.income, d("20"));
        assert_eq!(r.last_30_days.income, d("30"));
    }

    #[test]
    fn decimal_sums_do_not_drift() {
        let today = day(2025, 6, 15);
        let entries: Vec<StatEntry> = (0..10)
            .map(|_| entry("0.10", EntryType::Income, today))
            .chain(std::iter::once(entry("0.30", EntryType::Expense, today)))
            .collect();
        let r = compute_stats(&entries, today).unwrap();
        assert_eq!(r.lifetime.income, d("1.00"));
        assert_eq!(r.lifetime.profit, d("0.70"));
    }

    #[test]
    fn profit_is_income_minus_expense_everywhere() {
        let today = day(2025, 6, 15);
        let entries = vec![
            entry("100.00", EntryType::Income, today),
            entry("40.00", EntryType::Expense, today),
            entry("15.50", EntryType::Expense, day(2025, 1, 3)),
        ];
        let r = compute_stats(&entries, today).unwrap();
        for t in [r.lifetime, r.last_30_days, r.last_60_days, r.current_month] {
            assert_eq!(t.profit, t.income - t.expense);
        }
        assert_eq!(r.lifetime.profit, d("44.50"));
        assert_eq!(compute_stats(&entries, today).unwrap(), r);
    }

    #[test]
    fn overflowing_totals_are_an_error_not_a_panic() {
        let today = day(2025, 6, 15);
        let entries = vec![
            StatEntry {
                amount: Decimal::MAX,
                r#type: EntryType::Income,
                date: today,
            },
            StatEntry {
                amount: Decimal::MAX,
                r#type: EntryType::Income,
                date: today,
            },
        ];
        let err = compute_stats(&entries, today).unwrap_err();
        assert!(matches!(err, LedgerError::Storage(_)));
        assert!(totals(&entries).is_err());
    }
}
