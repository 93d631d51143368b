// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use rusqlite::Connection;

use crate::store;
use crate::utils::required_str;

pub const CSV_HEADER: [&str; 5] = ["date", "kind", "amount", "category", "description"];

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        Some(("backup", sub)) => export_backup(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required_str(sub, "format")?.to_lowercase();
    let out = required_str(sub, "out")?;

    // oldest first
    let mut txs = store::transactions::all(conn)?;
    txs.reverse();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Create CSV {}", out))?;
            wtr.write_record(CSV_HEADER)?;
            for t in &txs {
                wtr.write_record([
                    t.date.to_string(),
                    t.kind.to_string(),
                    t.amount.to_string(),
                    t.category.clone(),
                    t.description.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&txs)?)
                .with_context(|| format!("Write {}", out))?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} transaction(s) to {}", txs.len(), out);
    Ok(())
}

fn export_backup(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let out = required_str(sub, "out")?;
    let backup = store::backup::export(conn, Utc::now())?;
    std::fs::write(out, serde_json::to_string_pretty(&backup)?)
        .with_context(|| format!("Write {}", out))?;
    println!("Backup written to {}", out);
    Ok(())
}
