// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::metrics::{self, DerivedMetrics};
use crate::store;
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        Some(("health", sub)) => health(conn, sub)?,
        Some(("plan", sub)) => plan(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn load(conn: &Connection) -> Result<(DerivedMetrics, String)> {
    let txs = store::transactions::all(conn)?;
    Ok((metrics::compute(&txs), store::settings::currency(conn)?))
}

#[derive(Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub savings_rate: Decimal,
    pub top_category: Option<String>,
    pub top_category_amount: Option<Decimal>,
    pub transactions: usize,
    pub unread_notifications: usize,
}

pub fn summary_data(conn: &Connection) -> Result<Summary> {
    let (m, _) = load(conn)?;
    let top = metrics::top_expense_category(&m.category_breakdown);
    Ok(Summary {
        total_income: m.total_income,
        total_expense: m.total_expense,
        balance: m.balance,
        savings_rate: m.savings_rate.round_dp(1),
        top_category: top.map(|(c, _)| c.to_string()),
        top_category_amount: top.map(|(_, a)| a),
        transactions: m.transaction_count,
        unread_notifications: store::notifications::unread_count(conn)?,
    })
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let s = summary_data(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let ccy = store::settings::currency(conn)?;
    let top = match (&s.top_category, s.top_category_amount) {
        (Some(c), Some(a)) => format!("{} ({})", c, fmt_money(&a, &ccy)),
        _ => "-".into(),
    };
    let rows = vec![
        vec!["Income".into(), fmt_money(&s.total_income, &ccy)],
        vec!["Expenses".into(), fmt_money(&s.total_expense, &ccy)],
        vec!["Balance".into(), fmt_money(&s.balance, &ccy)],
        vec!["Savings rate".into(), fmt_pct(&s.savings_rate)],
        vec!["Top expense".into(), top],
        vec!["Transactions".into(), s.transactions.to_string()],
        vec!["Unread notifications".into(), s.unread_notifications.to_string()],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    Ok(())
}

#[derive(Serialize)]
pub struct CategoryRow {
    pub category: String,
    pub amount: Decimal,
    pub share_pct: Decimal,
}

pub fn category_rows(conn: &Connection) -> Result<Vec<CategoryRow>> {
    let (m, _) = load(conn)?;
    Ok(m.category_breakdown
        .sorted_desc()
        .into_iter()
        .map(|(cat, amt)| CategoryRow {
            category: cat.to_string(),
            amount: amt,
            share_pct: if m.total_expense > Decimal::ZERO {
                (amt / m.total_expense * Decimal::ONE_HUNDRED).round_dp(1)
            } else {
                Decimal::ZERO
            },
        })
        .collect())
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = category_rows(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = store::settings::currency(conn)?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.category.clone(),
                    fmt_money(&r.amount, &ccy),
                    fmt_pct(&r.share_pct),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }
    Ok(())
}

fn health(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (m, ccy) = load(conn)?;
    let score = metrics::health_score(&m);
    let fund = metrics::emergency_fund(&m);
    if maybe_print_json(
        sub.get_flag("json"),
        sub.get_flag("jsonl"),
        &serde_json::json!({ "health": score, "emergency_fund": fund }),
    )? {
        return Ok(());
    }
    let yes_no = |ok: bool| if ok { "yes" } else { "no" }.to_string();
    let rows = vec![
        vec!["Score".into(), format!("{}/100", score.score.round_dp(0))],
        vec!["Grade".into(), score.grade.as_str().into()],
        vec!["Saving 20%+ of income".into(), yes_no(score.saves_twenty_pct)],
        vec!["3+ months emergency fund".into(), yes_no(score.has_emergency_fund)],
        vec!["Living below your means".into(), yes_no(score.below_means)],
        vec!["Emergency fund target".into(), fmt_money(&fund.three_months, &ccy)],
        vec!["Emergency fund progress".into(), fmt_pct(&fund.progress_pct)],
    ];
    println!("{}", pretty_table(&["Check", "Result"], rows));
    Ok(())
}

fn plan(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (m, ccy) = load(conn)?;
    let plan = metrics::budget_plan(m.total_income);
    let fund = metrics::emergency_fund(&m);
    if maybe_print_json(
        sub.get_flag("json"),
        sub.get_flag("jsonl"),
        &serde_json::json!({ "budget": plan, "emergency_fund": fund }),
    )? {
        return Ok(());
    }
    let rows = vec![
        vec!["Needs (50%)".into(), fmt_money(&plan.needs, &ccy)],
        vec!["Wants (30%)".into(), fmt_money(&plan.wants, &ccy)],
        vec!["Savings (20%)".into(), fmt_money(&plan.savings, &ccy)],
        vec!["Emergency fund, 1 month".into(), fmt_money(&fund.one_month, &ccy)],
        vec!["Emergency fund, 3 months".into(), fmt_money(&fund.three_months, &ccy)],
        vec!["Emergency fund, 6 months".into(), fmt_money(&fund.six_months, &ccy)],
    ];
    println!("{}", pretty_table(&["Bucket", "Amount"], rows));
    Ok(())
}
