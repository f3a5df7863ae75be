// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::seed;
use crate::store;
use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let count = *m.get_one::<usize>("count").unwrap();
    let existing = store::load(conn)?;
    let extra = seed::generate(
        &mut rand::thread_rng(),
        count,
        Utc::now().date_naive(),
        &existing,
    );
    store::append(conn, &extra)?;
    println!("Generated {} test transactions", extra.len());
    Ok(())
}

/// Load the starter data set when the database is empty.
pub fn samples(conn: &mut Connection) -> Result<usize> {
    if store::count(conn)? > 0 {
        return Ok(0);
    }
    let samples = seed::sample_transactions();
    store::save(conn, &samples)?;
    Ok(samples.len())
}
