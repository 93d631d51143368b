// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finpulse::metrics::{self, DerivedMetrics};
use finpulse::models::{Transaction, TxKind};
use finpulse::voice::{self, Command, InquiryTopic};
use rust_decimal::Decimal;

fn metrics_with(income: i64, expense: i64) -> DerivedMetrics {
    let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    metrics::compute(&[
        Transaction {
            id: 1,
            kind: TxKind::Income,
            amount: Decimal::from(income),
            category: "Salary".into(),
            description: None,
            date,
        },
        Transaction {
            id: 2,
            kind: TxKind::Expense,
            amount: Decimal::from(expense),
            category: "Rent".into(),
            description: None,
            date,
        },
    ])
}

#[test]
fn spent_on_groceries_is_a_food_expense() {
    let m = metrics_with(0, 0);
    match voice::parse("spent 500 on groceries", &m, "USD") {
        Some(Command::Transaction(draft)) => {
            assert_eq!(draft.kind, TxKind::Expense);
            assert_eq!(draft.amount, Decimal::from(500));
            assert_eq!(draft.category, "Food");
            assert_eq!(draft.description, "Voice: spent 500 on groceries");
        }
        other => panic!("expected a transaction, got {:?}", other),
    }
}

#[test]
fn received_salary_is_income() {
    let m = metrics_with(0, 0);
    match voice::parse("Received 2000 salary", &m, "USD") {
        Some(Command::Transaction(draft)) => {
            assert_eq!(draft.kind, TxKind::Income);
            assert_eq!(draft.amount, Decimal::from(2000));
            assert_eq!(draft.category, "Salary");
        }
        other => panic!("expected a transaction, got {:?}", other),
    }
}

#[test]
fn unknown_category_falls_back_to_others() {
    let m = metrics_with(0, 0);
    match voice::parse("paid 75 to a friend", &m, "USD") {
        Some(Command::Transaction(draft)) => assert_eq!(draft.category, "Others"),
        other => panic!("expected a transaction, got {:?}", other),
    }
}

#[test]
fn balance_question_answers_with_current_balance() {
    let m = metrics_with(5000, 1410);
    match voice::parse("What is my balance?", &m, "USD") {
        Some(Command::Inquiry {
            topic,
            display,
            speech,
        }) => {
            assert_eq!(topic, InquiryTopic::Balance);
            assert!(display.contains("USD 3590.00"), "{}", display);
            assert!(speech.contains("3590 USD"), "{}", speech);
        }
        other => panic!("expected an inquiry, got {:?}", other),
    }
}

#[test]
fn budget_question_reflects_spending_level() {
    let tight = metrics_with(1000, 900);
    let Some(Command::Inquiry { display, .. }) = voice::parse("how is my budget", &tight, "USD")
    else {
        panic!("expected an inquiry");
    };
    assert!(display.starts_with("Careful!"));

    let fine = metrics_with(1000, 100);
    let Some(Command::Inquiry { display, .. }) = voice::parse("how is my budget", &fine, "USD")
    else {
        panic!("expected an inquiry");
    };
    assert!(display.contains("under control"));
}

#[test]
fn gibberish_and_empty_input_are_not_understood() {
    let m = metrics_with(0, 0);
    assert_eq!(voice::parse("play some music", &m, "USD"), None);
    assert_eq!(voice::parse("   ", &m, "USD"), None);
}

#[test]
fn oversized_amount_is_not_understood() {
    let m = metrics_with(0, 0);
    assert_eq!(
        voice::parse("spent 99999999999999999999999999999 on food", &m, "USD"),
        None
    );
}
