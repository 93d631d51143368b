// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use rusqlite::Connection;
use serde::Serialize;

use super::notifications::print_fresh;
use crate::models::{NewTransaction, Transaction, TxKind};
use crate::store::{self, transactions::TxFilter};
use crate::utils::{
    fmt_money, maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table,
    required_str,
};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TxKind = required_str(sub, "kind")?.parse()?;
    let amount = parse_decimal(required_str(sub, "amount")?)?;
    let category = required_str(sub, "category")?.to_string();
    let description = sub.get_one::<String>("description").cloned();
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => Local::now().date_naive(),
    };

    let id = store::transactions::add(
        conn,
        &NewTransaction {
            kind,
            amount,
            category: category.clone(),
            description,
            date,
        },
    )
    .context("Could not record transaction")?;
    let ccy = store::settings::currency(conn)?;
    println!(
        "Recorded {} #{}: {} in '{}' on {}",
        kind,
        id,
        fmt_money(&amount, &ccy),
        category.trim(),
        date
    );
    print_fresh(&store::notifications::refresh(conn, Utc::now())?);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing --id")?;
    store::transactions::remove(conn, id)?;
    println!("Removed transaction #{}", id);
    print_fresh(&store::notifications::refresh(conn, Utc::now())?);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Kind", "Amount", "Category", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

impl From<Transaction> for TransactionRow {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id,
            date: t.date.to_string(),
            kind: t.kind.to_string(),
            amount: t.amount.to_string(),
            category: t.category,
            description: t.description.unwrap_or_default(),
        }
    }
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let filter = TxFilter {
        kind: sub
            .get_one::<String>("kind")
            .map(|k| k.parse::<TxKind>())
            .transpose()?,
        category: sub.get_one::<String>("category").map(|c| c.trim().to_string()),
        month: sub
            .get_one::<String>("month")
            .map(|m| parse_month(m))
            .transpose()?,
        limit: sub.get_one::<usize>("limit").copied(),
    };
    let data = store::transactions::list(conn, &filter)?;
    Ok(data.into_iter().map(TransactionRow::from).collect())
}
