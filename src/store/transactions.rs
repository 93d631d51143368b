// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;

use super::{date_column, decimal_column};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, TxKind};

#[derive(Debug, Clone, Default)]
pub struct TxFilter {
    pub kind: Option<TxKind>,
    pub category: Option<String>,
    /// YYYY-MM
    pub month: Option<String>,
    pub limit: Option<usize>,
}

/// Insert a transaction and return its id. Surrounding whitespace is stripped
/// from the category; its case is kept.
pub fn add(conn: &Connection, tx: &NewTransaction) -> Result<i64> {
    if tx.amount < Decimal::ZERO {
        return Err(Error::InvalidData(format!(
            "Amount must not be negative, got {}",
            tx.amount
        )));
    }
    let category = tx.category.trim();
    if category.is_empty() {
        return Err(Error::InvalidData("Category must not be empty".into()));
    }
    let description = tx
        .description
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    conn.execute(
        "INSERT INTO transactions(kind, amount, category, description, date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            tx.kind.as_str(),
            tx.amount.to_string(),
            category,
            description,
            tx.date.to_string()
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, kind = %tx.kind, amount = %tx.amount, category, "Transaction added");
    Ok(id)
}

pub fn remove(conn: &Connection, id: i64) -> Result<()> {
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(Error::NotFound(format!("Transaction {}", id)));
    }
    tracing::debug!(id, "Transaction removed");
    Ok(())
}

/// Every transaction, newest first.
pub fn all(conn: &Connection) -> Result<Vec<Transaction>> {
    list(conn, &TxFilter::default())
}

pub fn list(conn: &Connection, filter: &TxFilter) -> Result<Vec<Transaction>> {
    let mut sql = String::from(
        "SELECT id, kind, amount, category, description, date FROM transactions WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(kind) = filter.kind {
        sql.push_str(" AND kind=?");
        params_vec.push(kind.as_str().into());
    }
    if let Some(cat) = &filter.category {
        sql.push_str(" AND category=?");
        params_vec.push(cat.clone());
    }
    if let Some(month) = &filter.month {
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(month.clone());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(params_vec.iter()))?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(from_row(r)?);
    }
    Ok(data)
}

fn from_row(r: &Row<'_>) -> Result<Transaction> {
    let kind: String = r.get(1)?;
    let amount: String = r.get(2)?;
    let date: String = r.get(5)?;
    Ok(Transaction {
        id: r.get(0)?,
        kind: kind.parse()?,
        amount: decimal_column(&amount, "amount")?,
        category: r.get(3)?,
        description: r.get(4)?,
        date: date_column(&date)?,
    })
}
