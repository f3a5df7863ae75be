// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Report documents built from already filtered rows and their summary.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;
use std::str::FromStr;

use crate::ledger::Summary;
use crate::models::Transaction;
use crate::utils::{fmt_date, fmt_money};

const TITLE: &str = "Financial Report - FinanScan";
const RULE: &str = "----------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Html,
    Csv,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Html => "html",
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "txt" | "text" => Ok(ReportFormat::Text),
            "html" | "pdf" => Ok(ReportFormat::Html),
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            other => Err(anyhow!("Unknown format: {} (use txt|html|csv|json)", other)),
        }
    }
}

pub struct Report<'a> {
    pub transactions: &'a [Transaction],
    pub summary: Summary,
    pub range: ReportRange,
    pub generated: NaiveDate,
}

pub fn default_file_name(generated: NaiveDate, format: ReportFormat) -> String {
    format!("finanscan_report_{}.{}", generated, format.extension())
}

fn type_label(t: &Transaction) -> &'static str {
    if t.is_income() { "Income" } else { "Expense" }
}

fn pad(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

pub fn render_text(r: &Report<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", TITLE);
    let _ = writeln!(out, "========================================\n");
    let _ = writeln!(out, "Generated: {}", fmt_date(&r.generated));
    let _ = writeln!(
        out,
        "Period: {} to {}\n",
        fmt_date(&r.range.from),
        fmt_date(&r.range.to)
    );
    let _ = writeln!(out, "{}\nTransactions\n{}", RULE, RULE);
    for t in r.transactions {
        let _ = writeln!(
            out,
            "{} | #{} | {} | {} | {} | {:>14}",
            fmt_date(&t.date),
            pad(&t.code, 12),
            pad(&t.description, 30),
            pad(t.category.as_str(), 10),
            pad(type_label(t), 7),
            fmt_money(&t.amount)
        );
    }
    let _ = writeln!(out, "\n{}\nSummary\n{}", RULE, RULE);
    let _ = writeln!(out, "Total income: {}", fmt_money(&r.summary.total_income));
    let _ = writeln!(out, "Total expenses: {}", fmt_money(&r.summary.total_expenses));
    let _ = writeln!(out, "Period balance: {}", fmt_money(&r.summary.balance()));
    out
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Print-ready HTML page.
pub fn render_html(r: &Report<'_>) -> String {
    let mut rows = String::new();
    for t in r.transactions {
        let color = if t.is_income() { "green" } else { "red" };
        let _ = writeln!(
            rows,
            "<tr><td>{}</td><td>#{}</td><td>{}</td><td>{}</td><td>{}</td><td style=\"text-align: right; color: {};\">{}</td></tr>",
            fmt_date(&t.date),
            escape_html(&t.code),
            escape_html(&t.description),
            t.category,
            type_label(t),
            color,
            fmt_money(&t.amount)
        );
    }
    let balance = r.summary.balance();
    let balance_color = if balance.is_sign_negative() && !balance.is_zero() {
        "red"
    } else {
        "blue"
    };
    format!(
        r#"<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
h1, h2 {{ color: #1f2937; }}
table {{ width: 100%; border-collapse: collapse; margin-top: 1rem; }}
th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}
th {{ background-color: #f2f2f2; }}
.summary {{ margin-top: 2rem; border-top: 2px solid #333; padding-top: 1rem; }}
@media print {{ body {{ margin: 1rem; }} }}
</style>
</head>
<body>
<h1>{title}</h1>
<p><strong>Generated:</strong> {generated}</p>
<p><strong>Period:</strong> {from} to {to}</p>
<h2>Transactions</h2>
<table>
<thead><tr><th>Date</th><th>Code</th><th>Description</th><th>Category</th><th>Type</th><th style="text-align: right;">Amount</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
<div class="summary">
<h2>Summary</h2>
<p><strong>Total income:</strong> <span style="color: green;">{income}</span></p>
<p><strong>Total expenses:</strong> <span style="color: red;">{expenses}</span></p>
<p><strong>Period balance:</strong> <strong style="color: {balance_color};">{balance}</strong></p>
</div>
</body>
</html>
"#,
        title = TITLE,
        generated = fmt_date(&r.generated),
        from = fmt_date(&r.range.from),
        to = fmt_date(&r.range.to),
        rows = rows,
        income = fmt_money(&r.summary.total_income),
        expenses = fmt_money(&r.summary.total_expenses),
        balance_color = balance_color,
        balance = fmt_money(&balance),
    )
}

pub fn write_csv<W: Write>(r: &Report<'_>, w: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(["date", "code", "description", "category", "type", "amount"])?;
    for t in r.transactions {
        wtr.write_record([
            t.date.to_string(),
            t.code.clone(),
            t.description.clone(),
            t.category.to_string(),
            t.r#type.to_string(),
            t.amount.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    range: ReportRange,
    generated: NaiveDate,
    transactions: &'a [Transaction],
    total_income: String,
    total_expenses: String,
    balance: String,
}

pub fn render_json(r: &Report<'_>) -> Result<String> {
    let doc = JsonReport {
        range: r.range,
        generated: r.generated,
        transactions: r.transactions,
        total_income: r.summary.total_income.to_string(),
        total_expenses: r.summary.total_expenses.to_string(),
        balance: r.summary.balance().to_string(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Render `r` in `format` into `w`.
pub fn write_report<W: Write>(r: &Report<'_>, format: ReportFormat, mut w: W) -> Result<()> {
    match format {
        ReportFormat::Text => w.write_all(render_text(r).as_bytes())?,
        ReportFormat::Html => w.write_all(render_html(r).as_bytes())?,
        ReportFormat::Json => w.write_all(render_json(r)?.as_bytes())?,
        ReportFormat::Csv => write_csv(r, &mut w)?,
    }
    w.flush()?;
    Ok(())
}
