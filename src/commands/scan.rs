// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::codes::generate_unique_code;
use crate::config::Config;
use crate::drafts::TransactionDraft;
use crate::error::ExtractionError;
use crate::extractor::{self, ReceiptExtractor};
use crate::models::{Category, TransactionType};
use crate::store;
use crate::utils::{fmt_money, pretty_table};
use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use std::path::Path;
use tracing::warn;

/// Draft for a scanned receipt. A failed extraction still yields an empty
/// expense draft so the entry can be completed by hand.
pub fn draft_from_receipt(
    extractor: &dyn ReceiptExtractor,
    image: &[u8],
    mime_type: &str,
    code: String,
    today: NaiveDate,
) -> (TransactionDraft, Option<ExtractionError>) {
    match extractor.extract(image, mime_type) {
        Ok(data) => (TransactionDraft::from_extracted(&data, code, today), None),
        Err(e) => {
            warn!(error = %e, "receipt extraction failed");
            (
                TransactionDraft::manual(TransactionType::Expense, code, today),
                Some(e),
            )
        }
    }
}

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    let path = Path::new(m.get_one::<String>("file").unwrap());
    let mime_type = extractor::guess_mime(path)
        .ok_or_else(|| anyhow!("Unsupported receipt file type: {}", path.display()))?;
    let image = std::fs::read(path).with_context(|| format!("Read {}", path.display()))?;

    let code = match m.get_one::<String>("code") {
        Some(c) => c.trim().to_string(),
        None => generate_unique_code(&mut rand::thread_rng(), &store::load(conn)?),
    };
    let today = Utc::now().date_naive();
    let (mut draft, failure) = draft_from_receipt(
        extractor::from_config(cfg).as_ref(),
        &image,
        mime_type,
        code,
        today,
    );
    if let Some(e) = &failure {
        eprintln!("Could not read the receipt ({}); fill in the fields manually.", e);
    }
    if let Some(c) = m.get_one::<String>("category") {
        draft.category = c.parse::<Category>()?;
    }

    println!(
        "{}",
        pretty_table(
            &["Code", "Date", "Description", "Amount", "Category"],
            vec![vec![
                draft.code.clone(),
                draft.date.map(|d| d.to_string()).unwrap_or_default(),
                draft.description.clone(),
                draft.amount.map(|a| fmt_money(&a)).unwrap_or_default(),
                draft.category.to_string(),
            ]],
        )
    );

    if m.get_flag("save") {
        let t = store::create(conn, &draft)?;
        println!("Saved transaction {}", t.code);
    } else {
        println!("Draft not saved; re-run with --save or record it with `finanscan tx add`.");
    }
    Ok(())
}
