// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SQLite-backed transaction collection. The engine in `ledger` only ever
//! sees the snapshot returned by [`load`].

use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::info;
use uuid::Uuid;

use crate::drafts::{TransactionDraft, ValidDraft};
use crate::models::Transaction;
use crate::utils::{parse_date, parse_decimal};

const SELECT_COLUMNS: &str =
    "SELECT id, code, date, description, amount, type, category FROM transactions";

type RawRow = (String, String, String, String, String, String, String);

fn read_raw(r: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
    ))
}

fn from_raw(raw: RawRow) -> Result<Transaction> {
    let (id, code, date, description, amount, typ, category) = raw;
    Ok(Transaction {
        date: parse_date(&date).with_context(|| format!("Transaction {}", code))?,
        amount: parse_decimal(&amount).with_context(|| format!("Transaction {}", code))?,
        r#type: typ.parse()?,
        category: category.parse()?,
        id,
        code,
        description,
    })
}

/// The whole collection, most recently created first.
pub fn load(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY seq DESC", SELECT_COLUMNS))?;
    let rows = stmt.query_map([], read_raw)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(from_raw(row?)?);
    }
    Ok(out)
}

/// Replace the stored collection with `transactions`, keeping their order.
pub fn save(conn: &mut Connection, transactions: &[Transaction]) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM transactions", [])?;
    // load() reads newest seq first, so insert back to front.
    for t in transactions.iter().rev() {
        insert_row(&tx, t)?;
    }
    tx.commit().context("Write transactions")?;
    info!(count = transactions.len(), "collection saved");
    Ok(())
}

fn insert_row(conn: &Connection, t: &Transaction) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions(id, code, date, description, amount, type, category)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            t.id,
            t.code,
            t.date.to_string(),
            t.description,
            t.amount.to_string(),
            t.r#type.as_str(),
            t.category.as_str(),
        ],
    )
    .with_context(|| format!("Insert transaction {}", t.code))?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: &str) -> Result<Option<Transaction>> {
    let raw = conn
        .query_row(
            &format!("{} WHERE id=?1", SELECT_COLUMNS),
            params![id],
            read_raw,
        )
        .optional()?;
    raw.map(from_raw).transpose()
}

pub fn find_by_code(conn: &Connection, code: &str) -> Result<Option<Transaction>> {
    let raw = conn
        .query_row(
            &format!("{} WHERE code=?1 COLLATE NOCASE", SELECT_COLUMNS),
            params![code.trim()],
            read_raw,
        )
        .optional()?;
    raw.map(from_raw).transpose()
}

/// Validate `draft` against the current collection and store it under a
/// fresh id.
pub fn create(conn: &Connection, draft: &TransactionDraft) -> Result<Transaction> {
    let snapshot = load(conn)?;
    let valid = draft.validate(&snapshot, None)?;
    let t = valid.into_transaction(Uuid::new_v4().to_string());
    insert_row(conn, &t)?;
    info!(code = %t.code, amount = %t.amount, kind = %t.r#type, "transaction created");
    Ok(t)
}

/// Replace every field of transaction `id` except the id itself.
pub fn update(conn: &Connection, id: &str, draft: &TransactionDraft) -> Result<Transaction> {
    let snapshot = load(conn)?;
    if !snapshot.iter().any(|t| t.id == id) {
        return Err(anyhow!("Transaction '{}' not found", id));
    }
    let ValidDraft {
        code,
        date,
        description,
        amount,
        r#type,
        category,
    } = draft.validate(&snapshot, Some(id))?;
    conn.execute(
        "UPDATE transactions SET code=?2, date=?3, description=?4, amount=?5, type=?6, category=?7
         WHERE id=?1",
        params![
            id,
            code,
            date.to_string(),
            description,
            amount.to_string(),
            r#type.as_str(),
            category.as_str(),
        ],
    )?;
    info!(%code, "transaction updated");
    Ok(Transaction {
        id: id.to_string(),
        code,
        date,
        description,
        amount,
        r#type,
        category,
    })
}

pub fn delete(conn: &Connection, id: &str) -> Result<()> {
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(anyhow!("Transaction '{}' not found", id));
    }
    info!(id, "transaction deleted");
    Ok(())
}

/// Append already-validated records (e.g. generated test data) after the
/// existing ones.
pub fn append(conn: &mut Connection, extra: &[Transaction]) -> Result<()> {
    let mut all = load(conn)?;
    all.extend_from_slice(extra);
    save(conn, &all)
}

pub fn count(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))?)
}
