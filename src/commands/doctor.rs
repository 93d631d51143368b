// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::store::settings;
use crate::utils::pretty_table;

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = find_issues(conn)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Each issue is `[kind, detail]`.
pub fn find_issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Amounts that do not parse; everything else refuses to load these
    let mut stmt = conn.prepare("SELECT id, amount FROM transactions ORDER BY id")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let amount: String = r.get(1)?;
        if amount.parse::<Decimal>().is_err() {
            rows.push(vec!["bad_amount".into(), format!("#{} '{}'", id, amount)]);
        }
    }

    // 2) Category names that differ only by case; totals keep them apart
    let mut stmt = conn.prepare("SELECT DISTINCT category FROM transactions ORDER BY category")?;
    let mut variants: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let name: String = r.get(0)?;
        variants.entry(name.to_lowercase()).or_default().push(name);
    }
    for names in variants.values().filter(|v| v.len() > 1) {
        rows.push(vec!["category_case_variant".into(), names.join(" / ")]);
    }

    // 3) Unread notifications repeating the same message
    let mut stmt = conn.prepare(
        "SELECT message, COUNT(*) FROM notifications WHERE read=0
         GROUP BY message HAVING COUNT(*) > 1 ORDER BY message",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let message: String = r.get(0)?;
        let n: i64 = r.get(1)?;
        rows.push(vec!["duplicate_unread".into(), format!("{}x {}", n, message)]);
    }

    // 4) Goals saved past their target
    let mut stmt =
        conn.prepare("SELECT id, title, target_amount, current_amount FROM goals ORDER BY id")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let title: String = r.get(1)?;
        let target: String = r.get(2)?;
        let current: String = r.get(3)?;
        match (target.parse::<Decimal>(), current.parse::<Decimal>()) {
            (Ok(t), Ok(c)) if c > t => rows.push(vec![
                "goal_over_target".into(),
                format!("#{} '{}' {} of {}", id, title, c, t),
            ]),
            (Ok(t), _) if t <= Decimal::ZERO => rows.push(vec![
                "goal_bad_target".into(),
                format!("#{} '{}' target {}", id, title, t),
            ]),
            (Err(_), _) | (_, Err(_)) => rows.push(vec![
                "goal_bad_amount".into(),
                format!("#{} '{}'", id, title),
            ]),
            _ => {}
        }
    }

    // 5) Preference flags that are not true/false
    for key in [
        settings::BUDGET_ALERTS,
        settings::GOAL_REMINDERS,
        settings::WEEKLY_REPORT,
    ] {
        if let Some(v) = settings::get(conn, key)? {
            if !matches!(v.trim(), "true" | "false") {
                rows.push(vec!["bad_setting".into(), format!("{}='{}'", key, v)]);
            }
        }
    }

    Ok(rows)
}
