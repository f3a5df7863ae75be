// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::codes::generate_unique_code;
use crate::drafts::TransactionDraft;
use crate::ledger::{self, Criteria};
use crate::models::{Category, Transaction, TransactionType};
use crate::store;
use crate::utils::{
    TRANSACTION_HEADERS, fmt_money, maybe_print_json, parse_date, parse_decimal, parse_month,
    pretty_table, transaction_rows,
};
use anyhow::{Result, anyhow};
use chrono::{NaiveDate, Utc};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let today = Utc::now().date_naive();
    match m.subcommand() {
        Some(("add", sub)) => {
            let t = add(conn, sub, today)?;
            println!(
                "Recorded {} {} on {} '{}' (code {})",
                t.r#type,
                fmt_money(&t.amount),
                t.date,
                t.description,
                t.code
            );
        }
        Some(("edit", sub)) => {
            let t = edit(conn, sub)?;
            println!("Updated transaction {}", t.code);
        }
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("months", sub)) => {
            let months = ledger::available_months(&store::load(conn)?);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &months)? {
                let rows = months.into_iter().map(|m| vec![m.key, m.label]).collect();
                println!("{}", pretty_table(&["Month", "Label"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}

/// Overlay whichever draft fields were given on the command line.
fn apply_args(draft: &mut TransactionDraft, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(d) = sub.get_one::<String>("date") {
        draft.date = Some(parse_date(d)?);
    }
    if let Some(d) = sub.get_one::<String>("description") {
        draft.description = d.clone();
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        draft.amount = Some(parse_decimal(a)?);
    }
    if let Some(c) = sub.get_one::<String>("category") {
        draft.category = c.parse::<Category>()?;
    }
    if let Some(t) = sub.get_one::<String>("type") {
        draft.r#type = t.parse::<TransactionType>()?;
    }
    Ok(())
}

pub fn add(conn: &Connection, sub: &clap::ArgMatches, today: NaiveDate) -> Result<Transaction> {
    let code = match sub.get_one::<String>("code") {
        Some(c) => c.trim().to_string(),
        None => generate_unique_code(&mut rand::thread_rng(), &store::load(conn)?),
    };
    let mut draft = TransactionDraft::manual(TransactionType::Expense, code, today);
    apply_args(&mut draft, sub)?;
    store::create(conn, &draft)
}

pub fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<Transaction> {
    let code = sub.get_one::<String>("code").unwrap();
    let current = store::find_by_code(conn, code)?
        .ok_or_else(|| anyhow!("Transaction '{}' not found", code))?;
    let mut draft = TransactionDraft::from_transaction(&current);
    apply_args(&mut draft, sub)?;
    if let Some(c) = sub.get_one::<String>("new-code") {
        draft.code = c.trim().to_string();
    }
    store::update(conn, &current.id, &draft)
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let code = sub.get_one::<String>("code").unwrap();
    let t = store::find_by_code(conn, code)?
        .ok_or_else(|| anyhow!("Transaction '{}' not found", code))?;
    if !sub.get_flag("yes") {
        return Err(anyhow!(
            "Deleting '{}' ({}) cannot be undone; re-run with --yes to confirm",
            t.description,
            t.code
        ));
    }
    store::delete(conn, &t.id)?;
    println!("Removed transaction {}", t.code);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&TRANSACTION_HEADERS, transaction_rows(&data))
        );
    }
    Ok(())
}

pub fn criteria_from_args(sub: &clap::ArgMatches) -> Result<Criteria> {
    Ok(Criteria {
        category: sub
            .get_one::<String>("category")
            .map(|c| c.parse::<Category>())
            .transpose()?,
        month: sub
            .get_one::<String>("month")
            .map(|m| parse_month(m))
            .transpose()?,
        search: sub.get_one::<String>("search").cloned().unwrap_or_default(),
        search_codes: !sub.get_flag("description-only"),
    })
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let criteria = criteria_from_args(sub)?;
    let mut rows = ledger::filter(&store::load(conn)?, &criteria);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}
