// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use super::{date_column, decimal_column};
use crate::error::{Error, Result};
use crate::models::{Goal, NewGoal};

const SELECT: &str = "SELECT id, title, target_amount, current_amount, deadline FROM goals";

/// Create a goal with nothing saved yet.
pub fn add(conn: &Connection, goal: &NewGoal) -> Result<i64> {
    let title = goal.title.trim();
    if title.is_empty() {
        return Err(Error::InvalidData("Goal title must not be empty".into()));
    }
    if goal.target_amount <= Decimal::ZERO {
        return Err(Error::InvalidData(format!(
            "Goal target must be positive, got {}",
            goal.target_amount
        )));
    }
    conn.execute(
        "INSERT INTO goals(title, target_amount, current_amount, deadline) VALUES (?1, ?2, '0', ?3)",
        params![
            title,
            goal.target_amount.to_string(),
            goal.deadline.map(|d| d.to_string())
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, title, target = %goal.target_amount, "Goal added");
    Ok(id)
}

pub fn list(conn: &Connection) -> Result<Vec<Goal>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT))?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(from_row(r)?);
    }
    Ok(data)
}

pub fn get(conn: &Connection, id: i64) -> Result<Goal> {
    let mut stmt = conn.prepare(&format!("{} WHERE id=?1", SELECT))?;
    let found = stmt
        .query_row(params![id], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, Option<String>>(4)?,
            ))
        })
        .optional()?;
    let (id, title, target, current, deadline) =
        found.ok_or_else(|| Error::NotFound(format!("Goal {}", id)))?;
    build(id, title, &target, &current, deadline.as_deref())
}

/// Add a positive amount to a goal's savings, clamped at the target.
pub fn add_progress(conn: &Connection, id: i64, delta: Decimal) -> Result<Goal> {
    if delta <= Decimal::ZERO {
        return Err(Error::InvalidData(format!(
            "Progress must be positive, got {}",
            delta
        )));
    }
    let mut goal = get(conn, id)?;
    goal.current_amount = goal.progress_after(delta);
    conn.execute(
        "UPDATE goals SET current_amount=?1 WHERE id=?2",
        params![goal.current_amount.to_string(), id],
    )?;
    tracing::debug!(id, saved = %goal.current_amount, target = %goal.target_amount, "Goal progress updated");
    Ok(goal)
}

pub fn remove(conn: &Connection, id: i64) -> Result<()> {
    let n = conn.execute("DELETE FROM goals WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(Error::NotFound(format!("Goal {}", id)));
    }
    Ok(())
}

fn from_row(r: &Row<'_>) -> Result<Goal> {
    let target: String = r.get(2)?;
    let current: String = r.get(3)?;
    let deadline: Option<String> = r.get(4)?;
    build(r.get(0)?, r.get(1)?, &target, &current, deadline.as_deref())
}

fn build(
    id: i64,
    title: String,
    target: &str,
    current: &str,
    deadline: Option<&str>,
) -> Result<Goal> {
    Ok(Goal {
        id,
        title,
        target_amount: decimal_column(target, "goal target")?,
        current_amount: decimal_column(current, "goal progress")?,
        deadline: deadline.map(date_column).transpose()?,
    })
}
