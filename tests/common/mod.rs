// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::NaiveDate;
use finanscan::models::{Category, Transaction, TransactionType};
use rust_decimal::Decimal;

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn tx(
    id: &str,
    code: &str,
    date: &str,
    description: &str,
    cents: i64,
    r#type: TransactionType,
    category: Category,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        code: code.to_string(),
        date: d(date),
        description: description.to_string(),
        amount: Decimal::new(cents, 2),
        r#type,
        category,
    }
}

pub fn expense(id: &str, date: &str, cents: i64) -> Transaction {
    tx(
        id,
        &format!("EXP{:0>5}", id),
        date,
        "expense",
        cents,
        TransactionType::Expense,
        Category::Other,
    )
}

pub fn income(id: &str, date: &str, cents: i64) -> Transaction {
    tx(
        id,
        &format!("INC{:0>5}", id),
        date,
        "income",
        cents,
        TransactionType::Income,
        Category::Salary,
    )
}

/// The July 2024 starter set, ids "1".."8".
pub fn july() -> Vec<Transaction> {
    use Category::*;
    use TransactionType::*;
    vec![
        tx("1", "SPM75A3B", "2024-07-20", "Supermercado do Mês", 35075, Expense, Food),
        tx("2", "GAS150C4", "2024-07-18", "Gasolina", 15000, Expense, Transport),
        tx("3", "CIN80D5E", "2024-07-15", "Cinema", 8050, Expense, Leisure),
        tx("4", "ALU180F6", "2024-07-12", "Aluguel", 180000, Expense, Housing),
        tx("5", "FAR95G7H", "2024-07-10", "Farmácia", 9520, Expense, Health),
        tx("6", "SAL550I8", "2024-07-05", "Salário Julho", 550000, Income, Salary),
        tx("7", "JAN120J9", "2024-07-22", "Jantar com amigos", 12000, Expense, Food),
    ]
}
