// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, EVOLUTION_MONTHS, Period};
use crate::report::{self, Report, ReportFormat, ReportRange};
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, month_bounds, parse_date, pretty_table};
use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let today = Utc::now().date_naive();
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub, today)?,
        Some(("trend", sub)) => trend(conn, sub, today)?,
        Some(("evolution", sub)) => evolution(conn, sub)?,
        Some(("by-category", sub)) => by_category(conn, sub, today)?,
        Some(("export", sub)) => {
            let path = export(conn, sub, today)?;
            println!("Exported report to {}", path.display());
        }
        _ => {}
    }
    Ok(())
}

fn period_of(sub: &clap::ArgMatches) -> Result<Period> {
    sub.get_one::<String>("period").unwrap().parse()
}

fn summary(conn: &Connection, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let txs = ledger::filter_period(&store::load(conn)?, period_of(sub)?, today);
    let s = ledger::summarize(&txs);
    let data = vec![vec![
        fmt_money(&s.total_income),
        fmt_money(&s.total_expenses),
        fmt_money(&s.balance()),
    ]];
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        println!("{}", pretty_table(&["Income", "Expenses", "Balance"], data));
    }
    Ok(())
}

fn trend(conn: &Connection, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let points = ledger::bucket_fixed_window(&store::load(conn)?, today);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &points)? {
        let rows = points
            .iter()
            .map(|p| {
                vec![
                    p.label.clone(),
                    fmt_money(&p.income),
                    fmt_money(&p.expense),
                    fmt_money(&p.balance),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Balance"], rows)
        );
    }
    Ok(())
}

fn evolution(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let buckets = ledger::bucket_trailing_months(&store::load(conn)?, EVOLUTION_MONTHS);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &buckets)? {
        let rows = buckets
            .iter()
            .map(|b| vec![b.label.clone(), fmt_money(&b.income), fmt_money(&b.expense)])
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expenses"], rows));
    }
    Ok(())
}

fn by_category(conn: &Connection, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let txs = ledger::filter_period(&store::load(conn)?, period_of(sub)?, today);
    let mut items = ledger::expenses_by_category(&txs);
    items.sort_by(|a, b| b.1.cmp(&a.1));
    let data: Vec<Vec<String>> = items
        .iter()
        .map(|(c, v)| vec![c.to_string(), fmt_money(v)])
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!("{}", pretty_table(&["Category", "Spent"], data));
    }
    Ok(())
}

/// Write the range report and return where it went.
pub fn export(conn: &Connection, sub: &clap::ArgMatches, today: NaiveDate) -> Result<PathBuf> {
    let format: ReportFormat = sub.get_one::<String>("format").unwrap().parse()?;
    let (month_first, month_last) = month_bounds(today)?;
    let from = match sub.get_one::<String>("from") {
        Some(s) => parse_date(s)?,
        None => month_first,
    };
    let to = match sub.get_one::<String>("to") {
        Some(s) => parse_date(s)?,
        None => month_last,
    };
    if to < from {
        return Err(anyhow!("Report range ends ({}) before it starts ({})", to, from));
    }
    let code = sub.get_one::<String>("code").map(String::as_str);

    let rows = ledger::filter_range(&store::load(conn)?, from, to, code);
    let doc = Report {
        transactions: &rows,
        summary: ledger::summarize(&rows),
        range: ReportRange { from, to },
        generated: today,
    };

    let out = match sub.get_one::<String>("out") {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(report::default_file_name(today, format)),
    };
    let file = File::create(&out).with_context(|| format!("Create {}", out.display()))?;
    report::write_report(&doc, format, BufWriter::new(file))
        .with_context(|| format!("Write report to {}", out.display()))?;
    tracing::info!(path = %out.display(), rows = rows.len(), "report exported");
    Ok(out)
}
