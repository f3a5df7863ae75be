// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, Months, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::models::Transaction;

const UA: &str = concat!(
    "finanscan/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/finanscan)"
);

pub fn http_client(timeout_secs: u64) -> reqwest::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .user_agent(UA)
        .build()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    if s.len() != 7 {
        return Err(anyhow::anyhow!("Invalid month '{}', expected YYYY-MM", s));
    }
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Brazilian real formatting: `R$ 1.234,56`, negative as `-R$ 1.234,56`.
pub fn fmt_money(d: &Decimal) -> String {
    let rounded = d.round_dp(2);
    let s = format!("{:.2}", rounded.abs());
    let (int_part, frac) = s.split_once('.').unwrap_or((s.as_str(), "00"));
    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}R$ {},{}", sign, grouped, frac)
}

/// First and last day of the month containing `d`.
pub fn month_bounds(d: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let first = d
        .with_day(1)
        .with_context(|| format!("No first day for {}", d))?;
    let next = first
        .checked_add_months(Months::new(1))
        .with_context(|| format!("Month after {} out of range", first))?;
    let last = next
        .pred_opt()
        .with_context(|| format!("No day before {}", next))?;
    Ok((first, last))
}

/// `dd/mm/yyyy`
pub fn fmt_date(d: &NaiveDate) -> String {
    d.format("%d/%m/%Y").to_string()
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

pub fn transaction_rows(txs: &[Transaction]) -> Vec<Vec<String>> {
    txs.iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                t.code.clone(),
                t.description.clone(),
                t.category.to_string(),
                t.r#type.to_string(),
                fmt_money(&t.amount),
            ]
        })
        .collect()
}

pub const TRANSACTION_HEADERS: [&str; 6] =
    ["Date", "Code", "Description", "Category", "Type", "Amount"];

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(fmt_money(&Decimal::new(550000, 2)), "R$ 5.500,00");
        assert_eq!(fmt_money(&Decimal::new(1234567, 1)), "R$ 123.456,70");
        assert_eq!(fmt_money(&Decimal::new(-8050, 2)), "-R$ 80,50");
        assert_eq!(fmt_money(&Decimal::ZERO), "R$ 0,00");
    }

    #[test]
    fn month_must_be_seven_chars() {
        assert!(parse_month("2024-07").is_ok());
        assert!(parse_month("2024-7").is_err());
        assert!(parse_month("2024-13").is_err());
    }

    #[test]
    fn month_bounds_handles_leap_february() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let (first, last) = month_bounds(d).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }
}
