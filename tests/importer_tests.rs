// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finpulse::store::{goals, settings, transactions};
use finpulse::{cli, commands::importer, db};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn run(conn: &mut Connection, what: &str, path: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(["finpulse", "import", what, "--path", path]);
    let (_, import_m) = matches.subcommand().unwrap();
    importer::handle(conn, import_m)
}

#[test]
fn import_transactions_from_csv() {
    let mut conn = base_conn();
    let file = write_temp(
        "date,kind,amount,category,description\n\
         2025-01-01,income,3000,Salary,\n\
         2025-01-05,Expense,45.20, Food ,Groceries\n",
    );
    run(&mut conn, "transactions", file.path().to_str().unwrap()).unwrap();

    let all = transactions::all(&conn).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].category, "Food");
    assert_eq!(all[0].amount, Decimal::new(4520, 2));
    assert_eq!(all[0].description.as_deref(), Some("Groceries"));
    assert_eq!(all[1].description, None);
}

#[test]
fn bad_row_rolls_back_whole_file() {
    let mut conn = base_conn();
    let file = write_temp(
        "date,kind,amount,category,description\n\
         2025-01-01,income,3000,Salary,\n\
         2025-01-02,refund,10,Food,\n",
    );
    let err = run(&mut conn, "transactions", file.path().to_str().unwrap()).unwrap_err();
    assert!(format!("{:#}", err).contains("Line 3"), "{:#}", err);
    assert!(transactions::all(&conn).unwrap().is_empty());
}

#[test]
fn import_backup_replaces_present_sections_only() {
    let mut conn = base_conn();
    settings::set_currency(&conn, "USD").unwrap();
    let file = write_temp(
        r#"{
            "transactions": [
                {"id": 7, "kind": "expense", "amount": "120.5", "category": "Bills",
                 "description": null, "date": "2025-02-10"}
            ],
            "goals": [
                {"id": 3, "title": "Car", "target_amount": "500",
                 "current_amount": "900", "deadline": null}
            ]
        }"#,
    );
    run(&mut conn, "backup", file.path().to_str().unwrap()).unwrap();

    let txs = transactions::all(&conn).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].id, 7);
    let g = goals::get(&conn, 3).unwrap();
    assert_eq!(g.current_amount, Decimal::from(500));
    // no settings section: currency untouched
    assert_eq!(settings::currency(&conn).unwrap(), "USD");
}

#[test]
fn backup_with_negative_amount_is_rejected() {
    let mut conn = base_conn();
    let file = write_temp(
        r#"{"transactions": [
            {"id": 1, "kind": "income", "amount": "-1", "category": "Salary",
             "description": null, "date": "2025-02-10"}
        ]}"#,
    );
    assert!(run(&mut conn, "backup", file.path().to_str().unwrap()).is_err());
    assert!(transactions::all(&conn).unwrap().is_empty());
}
