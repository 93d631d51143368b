// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::assistant::Assistant;
use crate::store;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let query = words(m, "query");
    println!("{}", reply(conn, &query)?);
    Ok(())
}

pub fn reply(conn: &Connection, query: &str) -> Result<String> {
    let txs = store::transactions::all(conn)?;
    let ccy = store::settings::currency(conn)?;
    tracing::debug!(query, transactions = txs.len(), "Answering question");
    Ok(Assistant::new(&txs, ccy).respond(query))
}

/// Join a multi-value positional back into one sentence.
pub(crate) fn words(m: &clap::ArgMatches, id: &str) -> String {
    m.get_many::<String>(id)
        .map(|vals| vals.map(String::as_str).collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}
