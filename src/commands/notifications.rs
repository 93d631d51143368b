// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;

use crate::models::NewNotification;
use crate::store;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("read", sub)) => {
            if sub.get_flag("all") {
                let n = store::notifications::mark_all_read(conn)?;
                println!("Marked {} notification(s) as read", n);
            } else {
                let id = *sub.get_one::<i64>("id").context("Missing --id")?;
                store::notifications::mark_read(conn, id)?;
                println!("Marked notification #{} as read", id);
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("Missing --id")?;
            store::notifications::remove(conn, id)?;
            println!("Removed notification #{}", id);
        }
        Some(("clear", _)) => {
            let n = store::notifications::clear(conn)?;
            println!("Cleared {} notification(s)", n);
        }
        Some(("check", _)) => {
            let fresh = store::notifications::refresh(conn, Utc::now())?;
            if fresh.is_empty() {
                println!("No new notifications");
            } else {
                print_fresh(&fresh);
            }
        }
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = store::notifications::list(conn, sub.get_flag("unread"))?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|n| {
                vec![
                    n.id.to_string(),
                    if n.read { "" } else { "*" }.to_string(),
                    n.category.to_string(),
                    n.created_at.format("%Y-%m-%d %H:%M").to_string(),
                    n.title.clone(),
                    n.message.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "New", "Type", "When", "Title", "Message"], rows)
        );
        println!("{} unread", store::notifications::unread_count(conn)?);
    }
    Ok(())
}

/// Echo notifications raised by the command that just ran.
pub fn print_fresh(fresh: &[NewNotification]) {
    for n in fresh {
        println!("[{}] {}: {}", n.category, n.title, n.message);
    }
}
