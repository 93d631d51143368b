// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Whole-database JSON backups.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{goals, settings, transactions};
use crate::error::{Error, Result};
use crate::models::{Goal, Transaction};

/// Sections missing from an imported file leave the matching store untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    #[serde(default)]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default)]
    pub goals: Option<Vec<Goal>>,
    #[serde(default)]
    pub settings: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub exported_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RestoreStats {
    pub transactions: usize,
    pub goals: usize,
    pub settings: usize,
}

pub fn export(conn: &Connection, now: DateTime<Utc>) -> Result<Backup> {
    Ok(Backup {
        transactions: Some(transactions::all(conn)?),
        goals: Some(goals::list(conn)?),
        settings: Some(settings::all(conn)?.into_iter().collect()),
        exported_at: Some(now),
    })
}

/// Replace the stores present in `backup`, keeping record ids.
pub fn restore(conn: &Connection, backup: &Backup) -> Result<RestoreStats> {
    let tx = conn.unchecked_transaction()?;
    let mut stats = RestoreStats::default();

    if let Some(items) = &backup.transactions {
        tx.execute("DELETE FROM transactions", [])?;
        for t in items {
            if t.amount < Decimal::ZERO {
                return Err(Error::InvalidData(format!(
                    "Transaction {} has a negative amount",
                    t.id
                )));
            }
            tx.execute(
                "INSERT INTO transactions(id, kind, amount, category, description, date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    t.id,
                    t.kind.as_str(),
                    t.amount.to_string(),
                    t.category.trim(),
                    t.description,
                    t.date.to_string()
                ],
            )?;
        }
        stats.transactions = items.len();
    }

    if let Some(items) = &backup.goals {
        tx.execute("DELETE FROM goals", [])?;
        for g in items {
            if g.target_amount <= Decimal::ZERO {
                return Err(Error::InvalidData(format!(
                    "Goal {} has a non-positive target",
                    g.id
                )));
            }
            let current = g.current_amount.max(Decimal::ZERO).min(g.target_amount);
            tx.execute(
                "INSERT INTO goals(id, title, target_amount, current_amount, deadline)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    g.id,
                    g.title,
                    g.target_amount.to_string(),
                    current.to_string(),
                    g.deadline.map(|d| d.to_string())
                ],
            )?;
        }
        stats.goals = items.len();
    }

    if let Some(map) = &backup.settings {
        for (k, v) in map {
            settings::set(&tx, k, v)?;
        }
        stats.settings = map.len();
    }

    tx.commit()?;
    tracing::info!(
        transactions = stats.transactions,
        goals = stats.goals,
        settings = stats.settings,
        "Backup restored"
    );
    Ok(stats)
}

/// Delete every record in every store.
pub fn wipe(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;
         DELETE FROM transactions;
         DELETE FROM goals;
         DELETE FROM notifications;
         DELETE FROM settings;
         COMMIT;",
    )?;
    tracing::info!("All data cleared");
    Ok(())
}
