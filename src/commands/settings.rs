// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use rusqlite::Connection;

use crate::store;
use crate::utils::{parse_toggle, pretty_table, required_str};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(conn)?,
        Some(("currency", sub)) => {
            let code = required_str(sub, "code")?.trim();
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                bail!("Currency must be a 3-letter code like USD, got '{}'", code);
            }
            store::settings::set_currency(conn, code)?;
            println!("Currency set to {}", store::settings::currency(conn)?);
        }
        Some(("notify", sub)) => notify(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection) -> Result<()> {
    let flags = store::settings::notification_settings(conn)?;
    let on_off = |b: bool| if b { "on" } else { "off" }.to_string();
    let last = store::settings::last_report_at(conn)?
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "never".into());
    let rows = vec![
        vec!["Currency".into(), store::settings::currency(conn)?],
        vec!["Budget alerts".into(), on_off(flags.budget_alerts)],
        vec!["Goal reminders".into(), on_off(flags.goal_reminders)],
        vec!["Weekly report".into(), on_off(flags.weekly_report)],
        vec!["Last weekly report".into(), last],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}

fn notify(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut flags = store::settings::notification_settings(conn)?;
    if let Some(v) = sub.get_one::<String>("budget_alerts") {
        flags.budget_alerts = parse_toggle(v)?;
    }
    if let Some(v) = sub.get_one::<String>("goal_reminders") {
        flags.goal_reminders = parse_toggle(v)?;
    }
    if let Some(v) = sub.get_one::<String>("weekly_report") {
        flags.weekly_report = parse_toggle(v)?;
    }
    store::settings::set_notification_settings(conn, &flags)?;
    show(conn)
}
