// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, LedgerResult};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::{Decimal, RoundingStrategy};

pub fn parse_date(field: &'static str, s: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::validation(field, format!("Invalid date '{}', expected YYYY-MM-DD", s))
    })
}

pub fn parse_decimal(field: &'static str, s: &str) -> LedgerResult<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_| LedgerError::validation(field, format!("Invalid decimal '{}'", s)))
}

pub fn parse_id(field: &'static str, s: &str) -> LedgerResult<i64> {
    s.trim()
        .parse::<i64>()
        .map_err(|_| LedgerError::validation(field, format!("Invalid id '{}'", s)))
}

pub fn parse_bool(field: &'static str, s: &str) -> LedgerResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(LedgerError::validation(
            field,
            format!("Invalid flag '{}', expected true or false", s),
        )),
    }
}

/// Two decimal places, half away from zero, behind the currency symbol.
pub fn fmt_money(d: &Decimal, symbol: &str) -> String {
    let r = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if r.is_sign_negative() && !r.is_zero() {
        format!("-{}{:.2}", symbol, r.abs())
    } else {
        format!("{}{:.2}", symbol, r.abs())
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> anyhow::Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Reads an id argument; a missing one reports the argument as the failing field.
pub fn arg_id(sub: &clap::ArgMatches, name: &'static str) -> LedgerResult<i64> {
    match sub.get_one::<String>(name) {
        Some(raw) => parse_id(name, raw),
        None => Err(LedgerError::validation(name, "is required")),
    }
}

/// Optional id argument.
pub fn arg_opt_id(sub: &clap::ArgMatches, name: &'static str) -> LedgerResult<Option<i64>> {
    sub.get_one::<String>(name)
        .map(|raw| parse_id(name, raw))
        .transpose()
}

/// `--today` if given, else the local calendar date.
pub fn reference_date(sub: &clap::ArgMatches) -> LedgerResult<NaiveDate> {
    match sub.get_one::<String>("today") {
        Some(s) => parse_date("today", s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn yes_no(b: bool) -> String {
    if b { "yes".into() } else { "no".into() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_rounds_at_the_boundary() {
        let d: Decimal = "1234.005".parse().unwrap();
        assert_eq!(fmt_money(&d, "£"), "£1234.01");
        let neg: Decimal = "-40".parse().unwrap();
        assert_eq!(fmt_money(&neg, "£"), "-£40.00");
        assert_eq!(fmt_money(&Decimal::ZERO, "$"), "$0.00");
        let tiny: Decimal = "-0.001".parse().unwrap();
        assert_eq!(fmt_money(&tiny, "£"), "£0.00");
    }

    #[test]
    fn parse_errors_name_the_field() {
        let err = parse_date("date", "2025/01/01").unwrap_err();
        assert!(matches!(err, LedgerError::Validation { field: "date", .. }));
        let err = parse_decimal("amount", "ten").unwrap_err();
        assert!(matches!(err, LedgerError::Validation { field: "amount", .. }));
        assert!(parse_bool("suppressed", "On").unwrap());
        assert!(parse_bool("suppressed", "maybe").is_err());
    }
}
