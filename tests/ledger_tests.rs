// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{d, expense, income, july, tx};
use finanscan::ledger::{self, Criteria, Period};
use finanscan::models::{Category, Transaction, TransactionType};
use rust_decimal::Decimal;

fn ids(txs: &[Transaction]) -> Vec<&str> {
    txs.iter().map(|t| t.id.as_str()).collect()
}

#[test]
fn filter_by_category_returns_only_matches() {
    let txs = vec![
        tx(
            "1",
            "SPM75A3B",
            "2024-07-20",
            "Supermercado do Mês",
            35075,
            TransactionType::Expense,
            "Alimentação".parse().unwrap(),
        ),
        tx(
            "2",
            "SAL550I8",
            "2024-07-05",
            "Salário Julho",
            550000,
            TransactionType::Income,
            "Salário".parse().unwrap(),
        ),
    ];
    let criteria = Criteria {
        category: Some(Category::Food),
        ..Default::default()
    };
    let out = ledger::filter(&txs, &criteria);
    assert_eq!(ids(&out), vec!["1"]);
}

#[test]
fn filter_sorts_newest_first_and_keeps_ties_stable() {
    let txs = vec![
        expense("a", "2024-05-01", 100),
        expense("b", "2024-06-10", 100),
        expense("c", "2024-05-01", 100),
        expense("d", "2024-06-10", 100),
    ];
    let out = ledger::filter(&txs, &Criteria::default());
    assert_eq!(ids(&out), vec!["b", "d", "a", "c"]);
    // input untouched
    assert_eq!(ids(&txs), vec!["a", "b", "c", "d"]);
}

#[test]
fn filter_is_idempotent() {
    let mut txs = july();
    txs.push(expense("9", "2024-06-25", 25000));
    let criteria = Criteria {
        category: None,
        month: Some("2024-07".into()),
        search: "a".into(),
        search_codes: true,
    };
    let once = ledger::filter(&txs, &criteria);
    let twice = ledger::filter(&once, &criteria);
    assert_eq!(once, twice);
    assert!(once.iter().all(|t| t.month_key() == "2024-07"));
}

#[test]
fn search_is_case_insensitive_and_optionally_covers_codes() {
    let txs = july();
    let by_desc = Criteria {
        search: "CINEMA".into(),
        ..Default::default()
    };
    assert_eq!(ids(&ledger::filter(&txs, &by_desc)), vec!["3"]);

    let by_code = Criteria {
        search: "spm75".into(),
        search_codes: true,
        ..Default::default()
    };
    assert_eq!(ids(&ledger::filter(&txs, &by_code)), vec!["1"]);

    let desc_only = Criteria {
        search: "spm75".into(),
        search_codes: false,
        ..Default::default()
    };
    assert!(ledger::filter(&txs, &desc_only).is_empty());
}

#[test]
fn month_filter_matches_year_month_prefix() {
    let txs = vec![
        expense("1", "2024-07-31", 100),
        expense("2", "2024-08-01", 100),
        expense("3", "2023-07-15", 100),
    ];
    let criteria = Criteria {
        month: Some("2024-07".into()),
        ..Default::default()
    };
    assert_eq!(ids(&ledger::filter(&txs, &criteria)), vec!["1"]);
}

#[test]
fn summary_matches_starter_month() {
    let s = ledger::summarize(&july());
    assert_eq!(s.total_income, Decimal::new(550000, 2));
    assert_eq!(s.total_expenses, Decimal::new(259645, 2));
    assert_eq!(s.balance(), Decimal::new(290355, 2));
}

#[test]
fn summary_of_nothing_is_zero() {
    let s = ledger::summarize(&Vec::<Transaction>::new());
    assert_eq!(s.total_income, Decimal::ZERO);
    assert_eq!(s.total_expenses, Decimal::ZERO);
}

#[test]
fn summary_is_additive_over_partitions() {
    let all = july();
    let (a, b): (Vec<_>, Vec<_>) = all.iter().cloned().partition(|t| t.id.as_str() < "4");
    let sa = ledger::summarize(&a);
    let sb = ledger::summarize(&b);
    let sall = ledger::summarize(&all);
    assert_eq!(sa.total_income + sb.total_income, sall.total_income);
    assert_eq!(sa.total_expenses + sb.total_expenses, sall.total_expenses);
}

#[test]
fn trailing_buckets_skip_empty_months_and_keep_last_six() {
    let txs = vec![
        expense("1", "2024-08-03", 1000),
        expense("2", "2024-01-10", 500),
        income("3", "2024-03-01", 9000),
        expense("4", "2024-04-01", 100),
        expense("5", "2024-05-01", 200),
        expense("6", "2024-06-01", 300),
        expense("7", "2024-07-01", 400),
        expense("8", "2024-03-20", 50),
    ];
    let buckets = ledger::bucket_trailing_months(&txs, 6);
    let months: Vec<&str> = buckets.iter().map(|b| b.month.as_str()).collect();
    assert_eq!(
        months,
        vec!["2024-03", "2024-04", "2024-05", "2024-06", "2024-07", "2024-08"]
    );
    assert_eq!(buckets[0].label, "Mar 24");
    assert_eq!(buckets[0].income, Decimal::new(9000, 2));
    assert_eq!(buckets[0].expense, Decimal::new(50, 2));
}

#[test]
fn trailing_buckets_do_not_zero_fill_gaps() {
    let txs = vec![
        expense("1", "2024-01-10", 500),
        expense("2", "2024-04-10", 500),
    ];
    let buckets = ledger::bucket_trailing_months(&txs, 6);
    let months: Vec<&str> = buckets.iter().map(|b| b.month.as_str()).collect();
    assert_eq!(months, vec!["2024-01", "2024-04"]);
}

#[test]
fn fixed_window_has_twelve_zeroed_months_oldest_first() {
    let points = ledger::bucket_fixed_window(&[], d("2024-07-15"));
    assert_eq!(points.len(), 12);
    assert_eq!(points[0].label, "Aug 23");
    assert_eq!(points[11].label, "Jul 24");
    assert!(points.iter().all(|p| p.income.is_zero() && p.expense.is_zero()));
}

#[test]
fn fixed_window_edges() {
    let today = d("2024-07-15");
    let txs = vec![
        expense("in", "2023-08-31", 700),
        expense("out", "2023-07-31", 900),
        expense("future", "2024-08-01", 300),
        income("now", "2024-07-01", 1000),
    ];
    let points = ledger::bucket_fixed_window(&txs, today);
    assert_eq!(points[0].expense, Decimal::new(700, 2));
    assert_eq!(points[11].income, Decimal::new(1000, 2));
    assert_eq!(points[11].balance, Decimal::new(1000, 2));
    assert_eq!(points[0].balance, Decimal::new(-700, 2));
    let total_expense: Decimal = points.iter().map(|p| p.expense).sum();
    assert_eq!(total_expense, Decimal::new(700, 2));
}

#[test]
fn fixed_window_conserves_totals() {
    let today = d("2025-02-10");
    let txs = vec![
        income("1", "2024-03-01", 100_000),
        expense("2", "2024-12-24", 4_550),
        expense("3", "2025-01-02", 1_999),
        income("4", "2025-02-09", 50_000),
        expense("5", "2024-02-29", 77_777),
    ];
    let points = ledger::bucket_fixed_window(&txs, today);
    let within: Vec<_> = txs.iter().filter(|t| t.date >= d("2024-03-01")).collect();
    let s = ledger::summarize(within);
    let income_total: Decimal = points.iter().map(|p| p.income).sum();
    let expense_total: Decimal = points.iter().map(|p| p.expense).sum();
    assert_eq!(income_total, s.total_income);
    assert_eq!(expense_total, s.total_expenses);
}

#[test]
fn periods_follow_calendar_months() {
    let today = d("2024-03-15");
    let txs = vec![
        expense("dec", "2023-12-31", 100),
        expense("jan", "2024-01-01", 100),
        expense("mar", "2024-03-02", 100),
        expense("apr", "2024-04-01", 100),
    ];
    assert_eq!(
        ids(&ledger::filter_period(&txs, Period::ThisMonth, today)),
        vec!["mar"]
    );
    assert_eq!(
        ids(&ledger::filter_period(&txs, Period::LastThreeMonths, today)),
        vec!["jan", "mar", "apr"]
    );
    assert_eq!(
        ids(&ledger::filter_period(&txs, Period::ThisYear, today)),
        vec!["jan", "mar", "apr"]
    );
}

#[test]
fn range_filter_is_inclusive_and_oldest_first() {
    let txs = july();
    let out = ledger::filter_range(&txs, d("2024-07-10"), d("2024-07-20"), None);
    assert_eq!(ids(&out), vec!["5", "4", "3", "2", "1"]);

    let coded = ledger::filter_range(&txs, d("2024-07-01"), d("2024-07-31"), Some("alu"));
    assert_eq!(ids(&coded), vec!["4"]);
}

#[test]
fn recent_takes_newest_five() {
    let out = ledger::recent(&july(), 5);
    assert_eq!(ids(&out), vec!["7", "1", "2", "3", "4"]);
}

#[test]
fn expenses_grouped_by_category_in_first_seen_order() {
    let groups = ledger::expenses_by_category(&july());
    assert_eq!(groups[0], (Category::Food, Decimal::new(47075, 2)));
    assert_eq!(groups.len(), 5);
    assert!(groups.iter().all(|(c, _)| *c != Category::Salary));
}

#[test]
fn available_months_are_distinct_and_newest_first() {
    let mut txs = july();
    txs.push(expense("9", "2024-06-25", 25000));
    txs.push(expense("10", "2023-12-01", 100));
    let months = ledger::available_months(&txs);
    let keys: Vec<&str> = months.iter().map(|m| m.key.as_str()).collect();
    assert_eq!(keys, vec!["2024-07", "2024-06", "2023-12"]);
    assert_eq!(months[0].label, "July 2024");
}
