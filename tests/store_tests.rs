// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{d, july};
use finanscan::drafts::TransactionDraft;
use finanscan::error::ValidationError;
use finanscan::models::{Category, TransactionType};
use finanscan::{db, seed, store};
use rust_decimal::Decimal;

fn draft(code: &str, description: &str, cents: i64) -> TransactionDraft {
    let mut dr = TransactionDraft::manual(TransactionType::Expense, code.into(), d("2024-08-02"));
    dr.description = description.into();
    dr.amount = Some(Decimal::new(cents, 2));
    dr.category = Category::Food;
    dr
}

#[test]
fn create_assigns_ids_and_lists_newest_first() {
    let conn = db::open_in_memory().unwrap();
    let a = store::create(&conn, &draft("FIRST001", "Bakery", 1250)).unwrap();
    let b = store::create(&conn, &draft("SECOND01", "Market", 9900)).unwrap();
    assert_ne!(a.id, b.id);

    let all = store::load(&conn).unwrap();
    let codes: Vec<&str> = all.iter().map(|t| t.code.as_str()).collect();
    assert_eq!(codes, vec!["SECOND01", "FIRST001"]);
    assert_eq!(all[1].amount, Decimal::new(1250, 2));
    assert_eq!(all[1].date, d("2024-08-02"));
}

#[test]
fn create_rejects_duplicate_code_in_any_case() {
    let conn = db::open_in_memory().unwrap();
    store::create(&conn, &draft("SPM75A3B", "Groceries", 100)).unwrap();
    let err = store::create(&conn, &draft("spm75a3b", "Groceries again", 100)).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ValidationError>(),
        Some(&ValidationError::DuplicateCode {
            code: "spm75a3b".into()
        })
    );
    assert_eq!(store::count(&conn).unwrap(), 1);
}

#[test]
fn update_replaces_fields_but_keeps_id() {
    let conn = db::open_in_memory().unwrap();
    let t = store::create(&conn, &draft("EDITME01", "Typo", 100)).unwrap();

    let mut changed = TransactionDraft::from_transaction(&t);
    changed.description = "Fixed".into();
    changed.code = "editme01".into();
    changed.r#type = TransactionType::Income;
    changed.category = Category::Salary;
    let updated = store::update(&conn, &t.id, &changed).unwrap();
    assert_eq!(updated.id, t.id);

    let reloaded = store::find_by_id(&conn, &t.id).unwrap().unwrap();
    assert_eq!(reloaded.description, "Fixed");
    assert_eq!(reloaded.code, "editme01");
    assert_eq!(reloaded.r#type, TransactionType::Income);
    assert_eq!(reloaded.category, Category::Salary);
}

#[test]
fn update_unknown_id_fails() {
    let conn = db::open_in_memory().unwrap();
    assert!(store::update(&conn, "nope", &draft("ABCDEF12", "x", 1)).is_err());
}

#[test]
fn delete_by_id() {
    let conn = db::open_in_memory().unwrap();
    let t = store::create(&conn, &draft("GONE0001", "Temp", 100)).unwrap();
    store::delete(&conn, &t.id).unwrap();
    assert!(store::find_by_code(&conn, "gone0001").unwrap().is_none());
    assert!(store::delete(&conn, &t.id).is_err());
}

#[test]
fn save_replaces_collection_and_keeps_order() {
    let mut conn = db::open_in_memory().unwrap();
    store::create(&conn, &draft("OLDONE01", "Old", 100)).unwrap();

    let txs = july();
    store::save(&mut conn, &txs).unwrap();
    let loaded = store::load(&conn).unwrap();
    assert_eq!(loaded, txs);
}

#[test]
fn save_with_clashing_codes_leaves_store_untouched() {
    let mut conn = db::open_in_memory().unwrap();
    let kept = store::create(&conn, &draft("KEEP0001", "Keep", 100)).unwrap();

    let mut txs = july();
    txs[1].code = txs[0].code.to_lowercase();
    assert!(store::save(&mut conn, &txs).is_err());
    assert_eq!(store::load(&conn).unwrap(), vec![kept]);
}

#[test]
fn starter_samples_load_and_append_generated() {
    let mut conn = db::open_in_memory().unwrap();
    let samples = seed::sample_transactions();
    assert_eq!(samples.len(), 8);
    store::save(&mut conn, &samples).unwrap();

    let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(42);
    let extra = seed::generate(&mut rng, 10, d("2024-08-01"), &samples);
    store::append(&mut conn, &extra).unwrap();

    let all = store::load(&conn).unwrap();
    assert_eq!(all.len(), 18);
    assert_eq!(all[0].code, "SPM75A3B");
    assert!(extra.iter().all(|t| t.date <= d("2024-08-01") && t.date > d("2024-05-02")));
    assert!(
        extra
            .iter()
            .all(|t| t.r#type == TransactionType::Expense || t.category == Category::Salary)
    );
}
