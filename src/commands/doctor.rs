// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub kind: &'static str,
    pub detail: String,
}

pub fn counts(conn: &Connection) -> Result<(i64, i64)> {
    let orders: i64 = conn.query_row("SELECT COUNT(*) FROM orders", [], |r| r.get(0))?;
    let txns: i64 = conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))?;
    Ok((orders, txns))
}

pub fn find_issues(conn: &Connection) -> Result<Vec<Issue>> {
    let mut issues = Vec::new();

    // 1) Transactions filed under a category of the other type
    let mut stmt = conn.prepare(
        "SELECT t.id, t.type, c.name, c.type FROM transactions t
         JOIN categories c ON t.category_id=c.id
         WHERE t.type != c.type ORDER BY t.id",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let t_type: String = r.get(1)?;
        let c_name: String = r.get(2)?;
        let c_type: String = r.get(3)?;
        issues.push(Issue {
            kind: "category_type_mismatch",
            detail: format!("tx {} is {} but '{}' is {}", id, t_type, c_name, c_type),
        });
    }

    // 2) Stored amounts that are unreadable or not positive
    let mut stmt2 = conn.prepare("SELECT id, amount FROM transactions ORDER BY id")?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let raw: String = r.get(1)?;
        match raw.parse::<Decimal>() {
            Ok(a) if a > Decimal::ZERO => {}
            Ok(_) => issues.push(Issue {
                kind: "non_positive_amount",
                detail: format!("tx {} amount {}", id, raw),
            }),
            Err(_) => issues.push(Issue {
                kind: "unreadable_amount",
                detail: format!("tx {} amount '{}'", id, raw),
            }),
        }
    }

    Ok(issues)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let (orders, txns) = counts(conn)?;
    println!("Orders: {}", orders);
    println!("Transactions: {}", txns);

    let issues = find_issues(conn)?;
    if issues.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        let rows = issues
            .into_iter()
            .map(|i| vec![i.kind.to_string(), i.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
