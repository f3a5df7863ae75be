// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::codes::{generate_unique_code, validate_code};
use crate::store;
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let existing = store::load(conn)?;
    match m.subcommand() {
        Some(("new", _)) => {
            println!("{}", generate_unique_code(&mut rand::thread_rng(), &existing));
        }
        Some(("check", sub)) => {
            let code = sub.get_one::<String>("code").unwrap();
            // Editing a record: its own code must not count as a duplicate.
            let editing = match sub.get_one::<String>("for") {
                Some(c) => Some(
                    store::find_by_code(conn, c)?
                        .ok_or_else(|| anyhow!("Transaction '{}' not found", c))?
                        .id,
                ),
                None => None,
            };
            validate_code(code, &existing, editing.as_deref())?;
            println!("Code '{}' is available", code);
        }
        _ => {}
    }
    Ok(())
}
