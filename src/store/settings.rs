// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Key/value preferences. Readers fall back to defaults when a value is
//! missing or unreadable, so a damaged preference never blocks the engine.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::{timestamp_column, timestamp_text};
use crate::error::Result;
use crate::models::NotificationSettings;

pub const CURRENCY: &str = "currency";
pub const BUDGET_ALERTS: &str = "notify.budget_alerts";
pub const GOAL_REMINDERS: &str = "notify.goal_reminders";
pub const WEEKLY_REPORT: &str = "notify.weekly_report";
pub const LAST_REPORT_AT: &str = "last_report_at";

const DEFAULT_CURRENCY: &str = "USD";

pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// All stored preferences, ordered by key.
pub fn all(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut stmt = conn.prepare("SELECT key, value FROM settings ORDER BY key")?;
    let rows = stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

pub fn currency(conn: &Connection) -> Result<String> {
    Ok(get(conn, CURRENCY)?
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
}

pub fn set_currency(conn: &Connection, ccy: &str) -> Result<()> {
    set(conn, CURRENCY, &ccy.trim().to_uppercase())
}

fn flag(conn: &Connection, key: &str) -> Result<bool> {
    let Some(raw) = get(conn, key)? else {
        return Ok(true);
    };
    match raw.trim() {
        "false" => Ok(false),
        "true" => Ok(true),
        other => {
            tracing::warn!(key, value = other, "Unreadable notification flag, treating as enabled");
            Ok(true)
        }
    }
}

pub fn notification_settings(conn: &Connection) -> Result<NotificationSettings> {
    Ok(NotificationSettings {
        budget_alerts: flag(conn, BUDGET_ALERTS)?,
        goal_reminders: flag(conn, GOAL_REMINDERS)?,
        weekly_report: flag(conn, WEEKLY_REPORT)?,
    })
}

pub fn set_notification_settings(conn: &Connection, s: &NotificationSettings) -> Result<()> {
    set(conn, BUDGET_ALERTS, &s.budget_alerts.to_string())?;
    set(conn, GOAL_REMINDERS, &s.goal_reminders.to_string())?;
    set(conn, WEEKLY_REPORT, &s.weekly_report.to_string())?;
    Ok(())
}

/// Start of the weekly-report cooldown; `None` when never reported or unreadable.
pub fn last_report_at(conn: &Connection) -> Result<Option<DateTime<Utc>>> {
    let Some(raw) = get(conn, LAST_REPORT_AT)? else {
        return Ok(None);
    };
    match timestamp_column(&raw) {
        Ok(t) => Ok(Some(t)),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring unreadable report timestamp");
            Ok(None)
        }
    }
}

pub fn set_last_report_at(conn: &Connection, at: DateTime<Utc>) -> Result<()> {
    set(conn, LAST_REPORT_AT, &timestamp_text(at))
}
