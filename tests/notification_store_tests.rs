// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use finpulse::db;
use finpulse::models::{NewTransaction, NotificationCategory, TxKind};
use finpulse::notify::WEEKLY_REPORT_MESSAGE;
use finpulse::store::{notifications, settings, transactions};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn record(conn: &Connection, kind: TxKind, amount: i64, category: &str) {
    transactions::add(
        conn,
        &NewTransaction {
            kind,
            amount: Decimal::from(amount),
            category: category.into(),
            description: None,
            date: NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(),
        },
    )
    .unwrap();
}

#[test]
fn refresh_persists_once_and_refires_after_read() {
    let conn = setup();
    record(&conn, TxKind::Income, 1000, "Salary");
    record(&conn, TxKind::Expense, 900, "Rent");

    let fresh = notifications::refresh(&conn, now()).unwrap();
    let msgs: Vec<_> = fresh.iter().map(|n| n.message.as_str()).collect();
    assert_eq!(
        msgs,
        vec![
            "Warning: You have spent 90% of your income.",
            WEEKLY_REPORT_MESSAGE
        ]
    );
    assert_eq!(notifications::unread_count(&conn).unwrap(), 2);
    assert_eq!(settings::last_report_at(&conn).unwrap(), Some(now()));

    // nothing new while both are unread
    let later = now() + Duration::hours(1);
    assert!(notifications::refresh(&conn, later).unwrap().is_empty());

    // reading acknowledges only until the next evaluation
    notifications::mark_all_read(&conn).unwrap();
    let again = notifications::refresh(&conn, later).unwrap();
    assert_eq!(again.len(), 1);
    assert_eq!(again[0].category, NotificationCategory::Budget);

    let all = notifications::list(&conn, false).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].created_at, later);
    assert!(!all[0].read);
}

#[test]
fn stored_flags_disable_rules() {
    let conn = setup();
    record(&conn, TxKind::Income, 1000, "Salary");
    record(&conn, TxKind::Expense, 900, "Rent");
    settings::set(&conn, settings::BUDGET_ALERTS, "false").unwrap();
    settings::set(&conn, settings::WEEKLY_REPORT, "false").unwrap();

    assert!(notifications::refresh(&conn, now()).unwrap().is_empty());
    assert_eq!(settings::last_report_at(&conn).unwrap(), None);
}

#[test]
fn unreadable_settings_fail_open() {
    let conn = setup();
    record(&conn, TxKind::Income, 1000, "Salary");
    record(&conn, TxKind::Expense, 900, "Rent");
    settings::set(&conn, settings::BUDGET_ALERTS, "maybe").unwrap();
    settings::set(&conn, settings::LAST_REPORT_AT, "last tuesday").unwrap();

    let s = settings::notification_settings(&conn).unwrap();
    assert!(s.budget_alerts);
    assert_eq!(settings::last_report_at(&conn).unwrap(), None);
    assert_eq!(notifications::refresh(&conn, now()).unwrap().len(), 2);
}

#[test]
fn unreadable_goal_rows_fail_open() {
    let conn = setup();
    record(&conn, TxKind::Income, 1000, "Salary");
    record(&conn, TxKind::Expense, 900, "Rent");
    conn.execute(
        "INSERT INTO goals(title, target_amount, current_amount) VALUES ('x', 'abc', '0')",
        [],
    )
    .unwrap();

    let fresh = notifications::refresh(&conn, now()).unwrap();
    let msgs: Vec<_> = fresh.iter().map(|n| n.message.as_str()).collect();
    assert_eq!(
        msgs,
        vec![
            "Warning: You have spent 90% of your income.",
            WEEKLY_REPORT_MESSAGE
        ]
    );
}

#[test]
fn mark_read_and_remove_unknown_ids_fail() {
    let conn = setup();
    assert!(notifications::mark_read(&conn, 42).is_err());
    assert!(notifications::remove(&conn, 42).is_err());
}

#[test]
fn clear_empties_the_list() {
    let conn = setup();
    notifications::refresh(&conn, now()).unwrap();
    assert_eq!(notifications::list(&conn, true).unwrap().len(), 1);
    assert_eq!(notifications::clear(&conn).unwrap(), 1);
    assert!(notifications::list(&conn, false).unwrap().is_empty());
}
