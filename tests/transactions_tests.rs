// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finpulse::models::{NewTransaction, TxKind};
use finpulse::store::transactions::{self as store, TxFilter};
use finpulse::{cli, commands::transactions, db};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    for i in 1..=3 {
        store::add(
            &conn,
            &NewTransaction {
                kind: TxKind::Expense,
                amount: Decimal::from(10),
                category: "Food".into(),
                description: None,
                date: NaiveDate::from_ymd_opt(2025, 1, i).unwrap(),
            },
        )
        .unwrap();
    }
    store::add(
        &conn,
        &NewTransaction {
            kind: TxKind::Income,
            amount: Decimal::from(500),
            category: "Salary".into(),
            description: Some("January".into()),
            date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        },
    )
    .unwrap();
    conn
}

fn list_rows(conn: &Connection, args: &[&str]) -> Vec<transactions::TransactionRow> {
    let mut argv = vec!["finpulse", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            return transactions::query_rows(conn, list_m).unwrap();
        }
    }
    panic!("no tx list subcommand");
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let rows = list_rows(&conn, &["--limit", "2"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-02-01");
    assert_eq!(rows[1].date, "2025-01-03");
}

#[test]
fn list_filters_by_kind_and_month() {
    let conn = setup();
    let rows = list_rows(&conn, &["--kind", "expense", "--month", "2025-01"]);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.kind == "expense"));

    let rows = list_rows(&conn, &["--category", "Salary"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "January");
}

#[test]
fn bad_month_is_rejected() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from(["finpulse", "tx", "list", "--month", "2025-13"]);
    let (_, tx_m) = matches.subcommand().unwrap();
    let (_, list_m) = tx_m.subcommand().unwrap();
    assert!(transactions::query_rows(&conn, list_m).is_err());
}

#[test]
fn add_via_cli_trims_category_and_raises_alert() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let run = |args: &[&str]| {
        let mut argv = vec!["finpulse", "tx", "add"];
        argv.extend_from_slice(args);
        let matches = cli::build_cli().get_matches_from(argv);
        let (_, tx_m) = matches.subcommand().unwrap();
        transactions::handle(&conn, tx_m)
    };
    run(&["--kind", "income", "--amount", "1000", "--category", "Salary"]).unwrap();
    run(&[
        "--kind", "expense", "--amount", "900", "--category", "  Rent ", "--date", "2025-03-04",
    ])
    .unwrap();

    let all = store::all(&conn).unwrap();
    assert!(all.iter().any(|t| t.category == "Rent"));
    let unread: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM notifications WHERE category='budget' AND read=0",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(unread, 1);

    assert!(run(&["--kind", "expense", "--amount=-5", "--category", "Food"]).is_err());
    assert!(run(&["--kind", "expense", "--amount", "5", "--category", "  "]).is_err());
}

#[test]
fn remove_unknown_transaction_fails() {
    let conn = setup();
    assert!(store::remove(&conn, 99).is_err());
    let first = store::list(
        &conn,
        &TxFilter {
            limit: Some(1),
            ..Default::default()
        },
    )
    .unwrap();
    store::remove(&conn, first[0].id).unwrap();
    assert_eq!(store::all(&conn).unwrap().len(), 3);
}
