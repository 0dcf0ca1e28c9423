// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate};
use repairledger::dashboard::{dashboard, sidebar};
use repairledger::ledger::transactions::max_amount;
use repairledger::{LedgerError, db};
use repairledger::ledger::{self, NewCategory, NewOrder, NewTransaction, OrderPatch};
use repairledger::models::EntryType;
use repairledger::stats::{Totals, load_stats};
use repairledger::visibility::Visibility;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

struct Fixture {
    conn: Connection,
    income: i64,
    expense: i64,
}

fn setup() -> Fixture {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let mk = |name: &str, kind: EntryType| {
        ledger::create_category(
            &conn,
            NewCategory {
                name: name.into(),
                r#type: kind,
                context: None,
            },
        )
        .unwrap()
        .id
    };
    let income = mk("Sales", EntryType::Income);
    let expense = mk("Parts", EntryType::Expense);
    Fixture {
        conn,
        income,
        expense,
    }
}

impl Fixture {
    fn order(&self, description: &str) -> i64 {
        ledger::create_order(
            &self.conn,
            NewOrder {
                description: description.into(),
                ..NewOrder::default()
            },
        )
        .unwrap()
        .id
    }

    fn record(&self, amount: &str, kind: EntryType, order_id: Option<i64>, date: NaiveDate) -> i64 {
        let category_id = match kind {
            EntryType::Income => self.income,
            EntryType::Expense => self.expense,
        };
        ledger::create_transaction(
            &self.conn,
            NewTransaction {
                amount: dec(amount),
                r#type: kind,
                description: None,
                category_id: Some(category_id),
                order_id,
                date,
                tags: None,
            },
        )
        .unwrap()
        .id
    }

    fn suppress_order(&self, id: i64, suppressed: bool) {
        ledger::update_order(
            &self.conn,
            id,
            OrderPatch {
                suppressed: Some(suppressed),
                ..OrderPatch::default()
            },
        )
        .unwrap();
    }
}

fn totals(income: &str, expense: &str) -> Totals {
    Totals {
        income: dec(income),
        expense: dec(expense),
        profit: dec(income) - dec(expense),
    }
}

#[test]
fn suppressing_an_order_hides_its_transactions_from_stats() {
    let f = setup();
    let a = f.order("Order A");
    f.record("100.00", EntryType::Income, Some(a), today());
    f.record("40.00", EntryType::Expense, Some(a), today());

    let report = load_stats(&f.conn, today()).unwrap();
    assert_eq!(report.lifetime, totals("100.00", "40.00"));
    assert_eq!(report.lifetime.profit, dec("60.00"));

    f.suppress_order(a, true);
    let report = load_stats(&f.conn, today()).unwrap();
    assert_eq!(report.lifetime, Totals::default());
    assert_eq!(report.last_30_days, Totals::default());
    assert_eq!(report.current_month, Totals::default());

    // The transactions themselves keep their own flag untouched.
    let all = ledger::list_transactions(&f.conn, Visibility::All, None).unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|r| !r.transaction.suppressed));

    f.suppress_order(a, false);
    let report = load_stats(&f.conn, today()).unwrap();
    assert_eq!(report.lifetime.profit, dec("60.00"));
}

#[test]
fn suppressed_transaction_is_excluded_even_under_a_visible_order() {
    let f = setup();
    let a = f.order("Order A");
    f.record("100", EntryType::Income, Some(a), today());
    let t = f.record("30", EntryType::Income, Some(a), today());
    ledger::update_transaction(&f.conn, t, true).unwrap();

    let report = load_stats(&f.conn, today()).unwrap();
    assert_eq!(report.lifetime.income, dec("100"));

    let detail = ledger::order_detail(&f.conn, a, Visibility::Visible).unwrap();
    assert_eq!(detail.transactions.len(), 1);
    let detail = ledger::order_detail(&f.conn, a, Visibility::All).unwrap();
    assert_eq!(detail.transactions.len(), 2);
    assert_eq!(detail.totals.income, dec("130"));
}

#[test]
fn rolling_windows_include_day_29_and_exclude_day_31() {
    let f = setup();
    f.record("10", EntryType::Income, None, today() - Duration::days(29));
    f.record("20", EntryType::Income, None, today() - Duration::days(31));
    f.record("40", EntryType::Income, None, today() - Duration::days(61));

    let report = load_stats(&f.conn, today()).unwrap();
    assert_eq!(report.last_30_days.income, dec("10"));
    assert_eq!(report.last_60_days.income, dec("30"));
    assert_eq!(report.lifetime.income, dec("70"));
    // 2025-05-17 and earlier fall outside June.
    assert_eq!(report.current_month.income, dec("0"));
}

#[test]
fn current_month_is_a_calendar_month() {
    let f = setup();
    f.record("5", EntryType::Expense, None, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    f.record("7", EntryType::Expense, None, NaiveDate::from_ymd_opt(2025, 5, 31).unwrap());
    f.record("9", EntryType::Expense, None, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());

    let report = load_stats(&f.conn, today()).unwrap();
    assert_eq!(report.current_month, totals("0", "5"));
    assert_eq!(report.last_30_days, totals("0", "12"));
    assert_eq!(report.lifetime.profit, dec("-21"));
}

#[test]
fn listing_all_shows_what_visible_hides() {
    let f = setup();
    let a = f.order("Order A");
    let b = f.order("Order B");
    f.record("50", EntryType::Income, Some(a), today());
    f.record("60", EntryType::Income, Some(b), today());
    let loose = f.record("70", EntryType::Income, None, today());
    ledger::update_transaction(&f.conn, loose, true).unwrap();
    f.suppress_order(b, true);

    let visible = ledger::list_transactions(&f.conn, Visibility::Visible, None).unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].order.as_deref(), Some("Order A"));
    assert_eq!(visible[0].category, "Sales");

    let all = ledger::list_transactions(&f.conn, Visibility::All, None).unwrap();
    assert_eq!(all.len(), 3);

    let orders = ledger::list_orders(&f.conn, Visibility::Visible).unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order.id, a);
    assert_eq!(orders[0].transaction_count, 1);
    assert_eq!(orders[0].totals.profit, dec("50"));

    let orders = ledger::list_orders(&f.conn, Visibility::All).unwrap();
    assert_eq!(orders.len(), 2);
    // Newest first.
    assert_eq!(orders[0].order.id, b);
}

#[test]
fn transactions_list_newest_first_with_limit() {
    let f = setup();
    for d in 1..=3 {
        f.record("1", EntryType::Income, None, NaiveDate::from_ymd_opt(2025, 1, d).unwrap());
    }
    let rows = ledger::list_transactions(&f.conn, Visibility::Visible, Some(2)).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].transaction.date, NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
}

#[test]
fn dashboard_and_sidebar_agree_with_stats() {
    let f = setup();
    let a = f.order("Order A");
    let hidden = f.order("Hidden");
    f.record("100", EntryType::Income, Some(a), today());
    f.record("25", EntryType::Expense, None, today() - Duration::days(45));
    f.record("999", EntryType::Income, Some(hidden), today());
    f.suppress_order(hidden, true);
    for i in 0..6 {
        f.order(&format!("extra {}", i));
    }

    let d = dashboard(&f.conn, today()).unwrap();
    assert_eq!(d.lifetime, totals("100", "25"));
    assert_eq!(d.current_month, totals("100", "0"));
    assert_eq!(d.active_orders, 7);
    assert_eq!(d.recent_orders.len(), 5);
    assert!(d.recent_orders.iter().all(|o| o.order.id != hidden));
    assert_eq!(d.recent_transactions.len(), 2);

    let s = sidebar(&f.conn, today()).unwrap();
    assert_eq!(s.lifetime.profit, dec("75"));
    assert_eq!(s.last_60_days.profit, dec("75"));
    assert_eq!(s.last_30_days.profit, dec("100"));
}

#[test]
fn oversized_amounts_are_rejected_and_stored_ones_cannot_crash_reports() {
    let f = setup();
    let huge = NewTransaction {
        amount: Decimal::MAX,
        r#type: EntryType::Income,
        description: None,
        category_id: Some(f.income),
        order_id: None,
        date: today(),
        tags: None,
    };
    let err = ledger::create_transaction(&f.conn, huge).unwrap_err();
    assert!(matches!(err, LedgerError::Validation { field: "amount", .. }));

    f.record(&max_amount().to_string(), EntryType::Income, None, today());
    assert_eq!(load_stats(&f.conn, today()).unwrap().lifetime.income, max_amount());

    // Rows written before the bound existed.
    for _ in 0..2 {
        f.conn
            .execute(
                "INSERT INTO transactions(amount,type,category_id,date) VALUES (?1,'INCOME',?2,?3)",
                rusqlite::params![Decimal::MAX.to_string(), f.income, today()],
            )
            .unwrap();
    }
    assert!(matches!(load_stats(&f.conn, today()), Err(LedgerError::Storage(_))));
    assert!(dashboard(&f.conn, today()).is_err());
    assert!(sidebar(&f.conn, today()).is_err());
}
