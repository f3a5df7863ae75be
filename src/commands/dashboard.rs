// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, EVOLUTION_MONTHS, MonthBucket, Period, RECENT_LIMIT, Summary};
use crate::models::Transaction;
use crate::store;
use crate::utils::{TRANSACTION_HEADERS, fmt_money, maybe_print_json, pretty_table, transaction_rows};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub month: Summary,
    pub balance: Decimal,
    pub expenses_by_category: Vec<(String, Decimal)>,
    pub evolution: Vec<MonthBucket>,
    pub recent: Vec<Transaction>,
}

/// Current-month cards and category split, evolution over all data, and the
/// latest entries.
pub fn build(transactions: &[Transaction], today: NaiveDate) -> Dashboard {
    let this_month = ledger::filter_period(transactions, Period::ThisMonth, today);
    let month = ledger::summarize(&this_month);
    Dashboard {
        month,
        balance: month.balance(),
        expenses_by_category: ledger::expenses_by_category(&this_month)
            .into_iter()
            .map(|(c, v)| (c.to_string(), v))
            .collect(),
        evolution: ledger::bucket_trailing_months(transactions, EVOLUTION_MONTHS),
        recent: ledger::recent(transactions, RECENT_LIMIT),
    }
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let data = build(&store::load(conn)?, Utc::now().date_naive());
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &data)? {
        return Ok(());
    }

    println!(
        "{}",
        pretty_table(
            &["Month income", "Month expenses", "Month balance"],
            vec![vec![
                fmt_money(&data.month.total_income),
                fmt_money(&data.month.total_expenses),
                fmt_money(&data.balance),
            ]],
        )
    );

    if data.expenses_by_category.is_empty() {
        println!("No expenses this month.");
    } else {
        let rows = data
            .expenses_by_category
            .iter()
            .map(|(c, v)| vec![c.clone(), fmt_money(v)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }

    let rows = data
        .evolution
        .iter()
        .map(|b| vec![b.label.clone(), fmt_money(&b.income), fmt_money(&b.expense)])
        .collect();
    println!("{}", pretty_table(&["Month", "Income", "Expenses"], rows));

    println!("Recent transactions");
    println!(
        "{}",
        pretty_table(&TRANSACTION_HEADERS, transaction_rows(&data.recent))
    );
    Ok(())
}
