// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use finanscan::{cli, commands, config::Config, db};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let cfg = Config::from_env()?;
    let mut conn = db::open_or_init(&cfg.db_path)?;

    match matches.subcommand() {
        Some(("init", sub)) => {
            println!("Database initialized at {}", cfg.db_path.display());
            if sub.get_flag("with-samples") {
                let n = commands::seed::samples(&mut conn)?;
                println!("Loaded {} sample transactions", n);
            }
        }
        Some(("tx", sub)) => commands::transactions::handle(&conn, sub)?,
        Some(("scan", sub)) => commands::scan::handle(&conn, &cfg, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&conn, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, sub)?,
        Some(("seed", sub)) => commands::seed::handle(&mut conn, sub)?,
        Some(("categories", _)) => commands::categories::handle()?,
        Some(("code", sub)) => commands::codes::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
