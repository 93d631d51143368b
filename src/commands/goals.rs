// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;

use super::notifications::print_fresh;
use crate::metrics;
use crate::models::NewGoal;
use crate::store;
use crate::utils::{
    fmt_money, fmt_pct, maybe_print_json, parse_date, parse_decimal, pretty_table, required_str,
};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("progress", sub)) => progress(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let title = required_str(sub, "title")?.to_string();
    let target_amount = parse_decimal(required_str(sub, "target")?)?;
    let deadline = sub
        .get_one::<String>("deadline")
        .map(|d| parse_date(d))
        .transpose()?;
    let id = store::goals::add(
        conn,
        &NewGoal {
            title: title.clone(),
            target_amount,
            deadline,
        },
    )
    .context("Could not create goal")?;
    let ccy = store::settings::currency(conn)?;
    println!(
        "Created goal #{} '{}' with target {}",
        id,
        title.trim(),
        fmt_money(&target_amount, &ccy)
    );
    print_fresh(&store::notifications::refresh(conn, Utc::now())?);
    Ok(())
}

fn progress(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing --id")?;
    let delta = parse_decimal(required_str(sub, "amount")?)?;
    let goal = store::goals::add_progress(conn, id, delta)?;
    let ccy = store::settings::currency(conn)?;
    println!(
        "Goal '{}': {} of {} ({})",
        goal.title,
        fmt_money(&goal.current_amount, &ccy),
        fmt_money(&goal.target_amount, &ccy),
        fmt_pct(&goal.progress_pct())
    );
    print_fresh(&store::notifications::refresh(conn, Utc::now())?);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing --id")?;
    store::goals::remove(conn, id)?;
    println!("Removed goal #{}", id);
    print_fresh(&store::notifications::refresh(conn, Utc::now())?);
    Ok(())
}

#[derive(Serialize)]
pub struct GoalRow {
    pub id: i64,
    pub title: String,
    pub target: String,
    pub saved: String,
    pub progress_pct: String,
    pub deadline: Option<String>,
    /// Months left at the current surplus, if it is positive.
    pub months_left: Option<u32>,
}

pub fn query_rows(conn: &Connection) -> Result<Vec<GoalRow>> {
    let txs = store::transactions::all(conn)?;
    let surplus = metrics::compute(&txs).balance;
    let goals = store::goals::list(conn)?;
    Ok(goals
        .iter()
        .map(|g| GoalRow {
            id: g.id,
            title: g.title.clone(),
            target: g.target_amount.to_string(),
            saved: g.current_amount.to_string(),
            progress_pct: g.progress_pct().round_dp(1).normalize().to_string(),
            deadline: g.deadline.map(|d| d.to_string()),
            months_left: metrics::months_to_goal(g, surplus),
        })
        .collect())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|g| {
                vec![
                    g.id.to_string(),
                    g.title.clone(),
                    g.saved.clone(),
                    g.target.clone(),
                    format!("{}%", g.progress_pct),
                    g.deadline.clone().unwrap_or_default(),
                    g.months_left.map(|n| n.to_string()).unwrap_or_else(|| "-".into()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Goal", "Saved", "Target", "Progress", "Deadline", "Months left"],
                rows,
            )
        );
    }
    Ok(())
}
