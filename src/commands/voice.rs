// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Local, Utc};
use rusqlite::Connection;

use super::assistant::words;
use super::notifications::print_fresh;
use crate::metrics;
use crate::models::NewTransaction;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json};
use crate::voice::{self, Command};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let utterance = words(m, "utterance");
    let dry_run = m.get_flag("dry_run");
    let Some(cmd) = interpret(conn, &utterance)? else {
        println!("Sorry, I didn't catch that. Try \"spent 500 on groceries\" or \"what is my balance\".");
        return Ok(());
    };

    let printed = maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &cmd)?;
    match cmd {
        Command::Inquiry { display, .. } => {
            if !printed {
                println!("{}", display);
            }
        }
        Command::Transaction(draft) => {
            let ccy = store::settings::currency(conn)?;
            if dry_run {
                if !printed {
                    println!(
                        "Would record {} of {} in '{}'",
                        draft.kind,
                        fmt_money(&draft.amount, &ccy),
                        draft.category
                    );
                }
                return Ok(());
            }
            let id = store::transactions::add(
                conn,
                &NewTransaction {
                    kind: draft.kind,
                    amount: draft.amount,
                    category: draft.category.clone(),
                    description: Some(draft.description),
                    date: Local::now().date_naive(),
                },
            )?;
            println!(
                "Recorded {} #{}: {} in '{}'",
                draft.kind,
                id,
                fmt_money(&draft.amount, &ccy),
                draft.category
            );
            print_fresh(&store::notifications::refresh(conn, Utc::now())?);
        }
    }
    Ok(())
}

/// Parse an utterance against the current stored numbers.
pub fn interpret(conn: &Connection, utterance: &str) -> Result<Option<Command>> {
    let txs = store::transactions::all(conn)?;
    let ccy = store::settings::currency(conn)?;
    let cmd = voice::parse(utterance, &metrics::compute(&txs), &ccy);
    tracing::debug!(utterance, understood = cmd.is_some(), "Voice command parsed");
    Ok(cmd)
}
