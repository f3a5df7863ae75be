// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Sample and randomly generated transactions for trying the app out.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::codes::generate_unique_code;
use crate::models::{Category, Transaction, TransactionType};

const DAYS_BACK: i64 = 90;

fn sample(
    code: &str,
    date: (i32, u32, u32),
    description: &str,
    cents: i64,
    r#type: TransactionType,
    category: Category,
) -> Option<Transaction> {
    Some(Transaction {
        id: Uuid::new_v4().to_string(),
        code: code.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)?,
        description: description.to_string(),
        amount: Decimal::new(cents, 2),
        r#type,
        category,
    })
}

/// The starter data set shown on first launch.
pub fn sample_transactions() -> Vec<Transaction> {
    use Category::*;
    use TransactionType::*;
    [
        sample("SPM75A3B", (2024, 7, 20), "Monthly groceries", 35075, Expense, Food),
        sample("GAS150C4", (2024, 7, 18), "Petrol", 15000, Expense, Transport),
        sample("CIN80D5E", (2024, 7, 15), "Cinema", 8050, Expense, Leisure),
        sample("ALU180F6", (2024, 7, 12), "Rent", 180000, Expense, Housing),
        sample("FAR95G7H", (2024, 7, 10), "Pharmacy", 9520, Expense, Health),
        sample("SAL550I8", (2024, 7, 5), "July salary", 550000, Income, Salary),
        sample("JAN120J9", (2024, 7, 22), "Dinner with friends", 12000, Expense, Food),
        sample("CUR250K1", (2024, 6, 25), "Online course", 25000, Expense, Education),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn descriptions(category: Category) -> &'static [&'static str] {
    match category {
        Category::Food => &["Corner bakery", "Sabor Divino restaurant", "Central market", "Food delivery"],
        Category::Transport => &["Ride share", "Taxi", "Shell station", "Metro"],
        Category::Housing => &["Electricity bill", "Fibre internet", "Condo fee", "Cooking gas"],
        Category::Leisure => &["Cinema ticket", "Rock concert", "Streaming subscription", "Water park"],
        Category::Health => &["Doctor's appointment", "Pharmacy", "Health plan"],
        Category::Education => &["Programming book", "Online course fee", "School supplies"],
        Category::Salary => &["Salary advance", "Company X payment"],
        Category::Other => &["Birthday present", "Charity donation", "Pet shop"],
    }
}

/// `count` random transactions from the last 90 days with codes unique
/// against `existing` and each other. Income is always salary; expenses use
/// the first six categories.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    today: NaiveDate,
    existing: &[Transaction],
) -> Vec<Transaction> {
    let mut taken: Vec<Transaction> = existing.to_vec();
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let r#type = if rng.gen_bool(0.7) {
            TransactionType::Expense
        } else {
            TransactionType::Income
        };
        let category = match r#type {
            TransactionType::Income => Category::Salary,
            TransactionType::Expense => Category::ALL[rng.gen_range(0..Category::ALL.len() - 2)],
        };
        let pool = descriptions(category);
        let description = pool[rng.gen_range(0..pool.len())].to_string();
        let max_cents: i64 = match r#type {
            TransactionType::Expense => 20_000,
            TransactionType::Income => 200_000,
        };
        let amount = Decimal::new(rng.gen_range(0..max_cents) + 1_000, 2);
        let date = today - Duration::days(rng.gen_range(0..DAYS_BACK));
        let t = Transaction {
            id: Uuid::new_v4().to_string(),
            code: generate_unique_code(rng, &taken),
            date,
            description,
            amount,
            r#type,
            category,
        };
        taken.push(t.clone());
        out.push(t);
    }
    out
}
