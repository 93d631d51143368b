// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use super::{goals, settings, timestamp_column, timestamp_text, transactions};
use crate::error::{Error, Result};
use crate::metrics;
use crate::models::{NewNotification, Notification};
use crate::notify::{NotificationEngine, RuleContext};

/// Newest first.
pub fn list(conn: &Connection, unread_only: bool) -> Result<Vec<Notification>> {
    let sql = if unread_only {
        "SELECT id, category, title, message, created_at, read FROM notifications
         WHERE read=0 ORDER BY created_at DESC, id DESC"
    } else {
        "SELECT id, category, title, message, created_at, read FROM notifications
         ORDER BY created_at DESC, id DESC"
    };
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(from_row(r)?);
    }
    Ok(data)
}

pub fn unread_count(conn: &Connection) -> Result<usize> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM notifications WHERE read=0",
        [],
        |r| r.get(0),
    )?;
    Ok(n as usize)
}

pub fn mark_read(conn: &Connection, id: i64) -> Result<()> {
    let n = conn.execute("UPDATE notifications SET read=1 WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(Error::NotFound(format!("Notification {}", id)));
    }
    Ok(())
}

pub fn mark_all_read(conn: &Connection) -> Result<usize> {
    Ok(conn.execute("UPDATE notifications SET read=1 WHERE read=0", [])?)
}

pub fn remove(conn: &Connection, id: i64) -> Result<()> {
    let n = conn.execute("DELETE FROM notifications WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(Error::NotFound(format!("Notification {}", id)));
    }
    Ok(())
}

pub fn clear(conn: &Connection) -> Result<usize> {
    Ok(conn.execute("DELETE FROM notifications", [])?)
}

/// Store one evaluation batch atomically, together with the report cooldown.
pub fn insert_batch(
    conn: &Connection,
    batch: &[NewNotification],
    report_issued_at: Option<DateTime<Utc>>,
) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    for n in batch {
        tx.execute(
            "INSERT INTO notifications(category, title, message, created_at, read)
             VALUES (?1, ?2, ?3, ?4, 0)",
            params![
                n.category.as_str(),
                n.title,
                n.message,
                timestamp_text(n.created_at)
            ],
        )?;
    }
    if let Some(at) = report_issued_at {
        settings::set_last_report_at(&tx, at)?;
    }
    tx.commit()?;
    Ok(())
}

/// Re-run every notification rule against the stored data and persist what
/// fired. Returns the notifications that were added.
pub fn refresh(conn: &Connection, now: DateTime<Utc>) -> Result<Vec<NewNotification>> {
    let txs = transactions::all(conn)?;
    let goals = goals::list(conn).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Unreadable goals, evaluating without them");
        Vec::new()
    });
    let existing = list(conn, false)?;
    let metrics = metrics::compute(&txs);

    let ctx = RuleContext {
        metrics: &metrics,
        goals: &goals,
        settings: settings::notification_settings(conn)?,
        existing: &existing,
        last_report_at: settings::last_report_at(conn)?,
        now,
    };
    let eval = NotificationEngine::new().evaluate(&ctx);
    insert_batch(conn, &eval.fresh, eval.report_issued_at)?;
    if !eval.fresh.is_empty() {
        tracing::info!(added = eval.fresh.len(), "Notifications added");
    }
    Ok(eval.fresh)
}

fn from_row(r: &Row<'_>) -> Result<Notification> {
    let category: String = r.get(1)?;
    let created_at: String = r.get(4)?;
    let read: i64 = r.get(5)?;
    Ok(Notification {
        id: r.get(0)?,
        category: category.parse()?,
        title: r.get(2)?,
        message: r.get(3)?,
        created_at: timestamp_column(&created_at)?,
        read: read != 0,
    })
}
