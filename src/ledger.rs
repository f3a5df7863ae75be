// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only queries over a snapshot of transactions.
//!
//! Nothing here touches the database: every function takes the collection it
//! works on and, where "now" matters, the current date. Results are freshly
//! allocated and the input is never reordered.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Category, Transaction, TransactionType};

/// Months shown by the dashboard evolution chart.
pub const EVOLUTION_MONTHS: usize = 6;
/// Months covered by the trend chart.
pub const TREND_MONTHS: u32 = 12;
/// Rows in the dashboard's recent list.
pub const RECENT_LIMIT: usize = 5;

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Filter for list views. `None` means "all" for category and month.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub category: Option<Category>,
    /// `YYYY-MM`
    pub month: Option<String>,
    pub search: String,
    /// Also match the search term against the transaction code.
    pub search_codes: bool,
}

impl Criteria {
    fn matches(&self, t: &Transaction, needle: &str) -> bool {
        let category_ok = self.category.is_none_or(|c| c == t.category);
        let month_ok = self.month.as_deref().is_none_or(|m| t.month_key() == m);
        let search_ok = needle.is_empty()
            || t.description.to_lowercase().contains(needle)
            || (self.search_codes && t.code.to_lowercase().contains(needle));
        category_ok && month_ok && search_ok
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
}

impl Summary {
    pub fn balance(&self) -> Decimal {
        self.total_income - self.total_expenses
    }
}

/// One month of the evolution chart, keyed `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub month: String,
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
}

/// One month of the trend chart, labelled like `Jul 24`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthOption {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    ThisMonth,
    LastThreeMonths,
    ThisYear,
}

impl std::str::FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "month" => Ok(Period::ThisMonth),
            "3months" => Ok(Period::LastThreeMonths),
            "year" => Ok(Period::ThisYear),
            other => Err(anyhow::anyhow!(
                "Invalid period '{}', expected month|3months|year",
                other
            )),
        }
    }
}

/// Matching transactions, most recent first. Same-day transactions keep their
/// input order.
pub fn filter(transactions: &[Transaction], criteria: &Criteria) -> Vec<Transaction> {
    let needle = criteria.search.to_lowercase();
    let mut out: Vec<Transaction> = transactions
        .iter()
        .filter(|t| criteria.matches(t, &needle))
        .cloned()
        .collect();
    sort_newest_first(&mut out);
    out
}

pub fn summarize<'a, I>(transactions: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold(Summary::default(), |mut acc, t| {
            if t.is_income() {
                acc.total_income += t.amount;
            } else {
                acc.total_expenses += t.amount;
            }
            acc
        })
}

/// Buckets for the last `months` months that actually have data. Months
/// without transactions are skipped, not zero-filled.
pub fn bucket_trailing_months(transactions: &[Transaction], months: usize) -> Vec<MonthBucket> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|t| t.date);

    let mut buckets: Vec<MonthBucket> = Vec::new();
    for t in sorted {
        let key = t.month_key();
        let idx = match buckets.iter().position(|b| b.month == key) {
            Some(i) => i,
            None => {
                buckets.push(MonthBucket {
                    month: key,
                    label: month_label(t.date.year(), t.date.month()),
                    income: Decimal::ZERO,
                    expense: Decimal::ZERO,
                });
                buckets.len() - 1
            }
        };
        let bucket = &mut buckets[idx];
        match t.r#type {
            TransactionType::Income => bucket.income += t.amount,
            TransactionType::Expense => bucket.expense += t.amount,
        }
    }

    let keep_from = buckets.len().saturating_sub(months);
    buckets.split_off(keep_from)
}

/// Twelve zero-initialised months ending with the month of `today`, oldest
/// first. Transactions outside that span are ignored.
pub fn bucket_fixed_window(transactions: &[Transaction], today: NaiveDate) -> Vec<TrendPoint> {
    let (start_y, start_m) = shift_month(today.year(), today.month(), -(TREND_MONTHS as i32 - 1));

    let mut points: Vec<TrendPoint> = (0..TREND_MONTHS as i32)
        .map(|i| {
            let (y, m) = shift_month(start_y, start_m, i);
            TrendPoint {
                label: month_label(y, m),
                income: Decimal::ZERO,
                expense: Decimal::ZERO,
                balance: Decimal::ZERO,
            }
        })
        .collect();

    for t in transactions {
        let offset = months_between((start_y, start_m), (t.date.year(), t.date.month()));
        if !(0..TREND_MONTHS as i32).contains(&offset) {
            continue;
        }
        let point = &mut points[offset as usize];
        match t.r#type {
            TransactionType::Income => point.income += t.amount,
            TransactionType::Expense => point.expense += t.amount,
        }
    }

    for p in &mut points {
        p.balance = p.income - p.expense;
    }
    points
}

/// Transactions in the reporting period, input order preserved.
pub fn filter_period(
    transactions: &[Transaction],
    period: Period,
    today: NaiveDate,
) -> Vec<Transaction> {
    let (y, m) = (today.year(), today.month());
    transactions
        .iter()
        .filter(|t| match period {
            Period::ThisMonth => t.date.year() == y && t.date.month() == m,
            Period::LastThreeMonths => {
                let (sy, sm) = shift_month(y, m, -2);
                months_between((sy, sm), (t.date.year(), t.date.month())) >= 0
            }
            Period::ThisYear => t.date.year() == y,
        })
        .cloned()
        .collect()
}

/// Inclusive date range with an optional case-insensitive code fragment,
/// oldest first.
pub fn filter_range(
    transactions: &[Transaction],
    from: NaiveDate,
    to: NaiveDate,
    code_term: Option<&str>,
) -> Vec<Transaction> {
    let needle = code_term
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty());
    let mut out: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.date >= from && t.date <= to)
        .filter(|t| {
            needle
                .as_deref()
                .is_none_or(|n| t.code.to_lowercase().contains(n))
        })
        .cloned()
        .collect();
    out.sort_by_key(|t| t.date);
    out
}

pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut out = transactions.to_vec();
    sort_newest_first(&mut out);
    out.truncate(limit);
    out
}

/// Expense totals per category, in order of first appearance.
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<(Category, Decimal)> {
    let mut out: Vec<(Category, Decimal)> = Vec::new();
    for t in transactions.iter().filter(|t| !t.is_income()) {
        match out.iter_mut().find(|(c, _)| *c == t.category) {
            Some((_, total)) => *total += t.amount,
            None => out.push((t.category, t.amount)),
        }
    }
    out
}

/// Distinct months present in the collection, newest first.
pub fn available_months(transactions: &[Transaction]) -> Vec<MonthOption> {
    let mut keys: Vec<(i32, u32)> = transactions
        .iter()
        .map(|t| (t.date.year(), t.date.month()))
        .collect();
    keys.sort_unstable_by(|a, b| b.cmp(a));
    keys.dedup();
    keys.into_iter()
        .map(|(y, m)| MonthOption {
            key: format!("{:04}-{:02}", y, m),
            label: format!("{} {}", MONTH_NAMES[(m - 1) as usize], y),
        })
        .collect()
}

pub fn month_label(year: i32, month: u32) -> String {
    format!(
        "{} {:02}",
        MONTH_ABBR[(month - 1) as usize],
        year.rem_euclid(100)
    )
}

fn sort_newest_first(v: &mut [Transaction]) {
    v.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Move `delta` calendar months from (year, month).
fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let idx = year * 12 + (month as i32 - 1) + delta;
    (idx.div_euclid(12), (idx.rem_euclid(12) + 1) as u32)
}

fn months_between(from: (i32, u32), to: (i32, u32)) -> i32 {
    (to.0 - from.0) * 12 + (to.1 as i32 - from.1 as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_month_crosses_year_boundaries() {
        assert_eq!(shift_month(2024, 1, -1), (2023, 12));
        assert_eq!(shift_month(2024, 3, -11), (2023, 4));
        assert_eq!(shift_month(2023, 12, 1), (2024, 1));
        assert_eq!(shift_month(2024, 5, 0), (2024, 5));
    }

    #[test]
    fn months_between_is_signed() {
        assert_eq!(months_between((2023, 11), (2024, 2)), 3);
        assert_eq!(months_between((2024, 2), (2023, 11)), -3);
    }

    #[test]
    fn labels_use_two_digit_years() {
        assert_eq!(month_label(2024, 7), "Jul 24");
        assert_eq!(month_label(2009, 12), "Dec 09");
    }
}
