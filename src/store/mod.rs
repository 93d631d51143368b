// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SQLite-backed stores. Each store owns one table; the engine only ever sees
//! the snapshots they return.

pub mod backup;
pub mod goals;
pub mod notifications;
pub mod settings;
pub mod transactions;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;

use crate::error::{Error, Result};

pub(crate) fn decimal_column(raw: &str, what: &str) -> Result<Decimal> {
    raw.parse::<Decimal>()
        .map_err(|_| Error::InvalidData(format!("Invalid {} '{}'", what, raw)))
}

pub(crate) fn date_column(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| Error::InvalidData(format!("Invalid date '{}'", raw)))
}

pub(crate) fn timestamp_column(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| Error::InvalidData(format!("Invalid timestamp '{}'", raw)))
}

/// Fixed-width UTC text so stored timestamps sort chronologically.
pub(crate) fn timestamp_text(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}
