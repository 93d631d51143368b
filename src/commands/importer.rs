// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Utc;
use csv::ReaderBuilder;
use rusqlite::Connection;

use super::notifications::print_fresh;
use crate::models::{NewTransaction, TxKind};
use crate::store::{self, backup::Backup};
use crate::utils::{parse_date, parse_decimal, required_str};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sub),
        Some(("backup", sub)) => import_backup(conn, sub),
        _ => Ok(()),
    }
}

/// Columns: date, kind, amount, category, description. The whole file is
/// rejected if any row is invalid.
fn import_transactions(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = required_str(sub, "path")?.trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut count = 0usize;
    for (i, result) in rdr.records().enumerate() {
        let line = i + 2;
        let rec = result?;
        let date_raw = rec.get(0).context("date missing")?;
        let kind_raw = rec.get(1).context("kind missing")?;
        let amount_raw = rec.get(2).context("amount missing")?;
        let category = rec.get(3).context("category missing")?.trim().to_string();
        let description = rec
            .get(4)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        let date = parse_date(date_raw).with_context(|| format!("Line {}", line))?;
        let kind: TxKind = kind_raw
            .trim()
            .to_lowercase()
            .parse()
            .with_context(|| format!("Line {}", line))?;
        let amount = parse_decimal(amount_raw).with_context(|| format!("Line {}", line))?;

        store::transactions::add(
            &tx,
            &NewTransaction {
                kind,
                amount,
                category,
                description,
                date,
            },
        )
        .with_context(|| format!("Line {}", line))?;
        count += 1;
    }
    tx.commit()?;
    println!("Imported {} transaction(s) from {}", count, path);
    print_fresh(&store::notifications::refresh(conn, Utc::now())?);
    Ok(())
}

fn import_backup(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = required_str(sub, "path")?.trim();
    let raw = std::fs::read_to_string(path).with_context(|| format!("Read {}", path))?;
    let backup: Backup =
        serde_json::from_str(&raw).with_context(|| format!("Parse backup {}", path))?;
    let stats = store::backup::restore(conn, &backup)?;
    println!(
        "Restored {} transaction(s), {} goal(s), {} setting(s) from {}",
        stats.transactions, stats.goals, stats.settings, path
    );
    print_fresh(&store::notifications::refresh(conn, Utc::now())?);
    Ok(())
}
