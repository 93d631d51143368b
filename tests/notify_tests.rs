// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use finpulse::metrics::{self, DerivedMetrics};
use finpulse::models::{
    Goal, Notification, NotificationCategory, NotificationSettings, Transaction, TxKind,
};
use finpulse::notify::{Evaluation, NotificationEngine, RuleContext, WEEKLY_REPORT_MESSAGE};
use rust_decimal::Decimal;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn spend(income: i64, expense: i64) -> DerivedMetrics {
    let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
    let txs = vec![
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
            category: "Food".into(),
            description: None,
            date,
        },
    ];
    metrics::compute(&txs)
}

fn goal(title: &str, target: i64, current: i64) -> Goal {
    Goal {
        id: 1,
        title: title.into(),
        target_amount: Decimal::from(target),
        current_amount: Decimal::from(current),
        deadline: None,
    }
}

fn existing(message: &str, read: bool) -> Notification {
    Notification {
        id: 1,
        category: NotificationCategory::Budget,
        title: "Budget Alert".into(),
        message: message.into(),
        created_at: now() - Duration::hours(1),
        read,
    }
}

/// Evaluate with the weekly report already on cooldown.
fn run(
    m: &DerivedMetrics,
    goals: &[Goal],
    settings: NotificationSettings,
    existing: &[Notification],
) -> Evaluation {
    NotificationEngine::new().evaluate(&RuleContext {
        metrics: m,
        goals,
        settings,
        existing,
        last_report_at: Some(now() - Duration::days(1)),
        now: now(),
    })
}

fn messages(eval: &Evaluation) -> Vec<&str> {
    eval.fresh.iter().map(|n| n.message.as_str()).collect()
}

#[test]
fn budget_alert_reports_rounded_percent() {
    let eval = run(&spend(1000, 850), &[], NotificationSettings::default(), &[]);
    assert_eq!(
        messages(&eval),
        vec!["Warning: You have spent 85% of your income."]
    );
    assert_eq!(eval.fresh[0].category, NotificationCategory::Budget);
    assert_eq!(eval.fresh[0].title, "Budget Alert");
    assert_eq!(eval.fresh[0].created_at, now());
}

#[test]
fn spending_exactly_at_threshold_is_quiet() {
    let eval = run(&spend(1000, 800), &[], NotificationSettings::default(), &[]);
    assert!(eval.fresh.is_empty());
}

#[test]
fn unread_duplicate_is_suppressed_but_read_one_is_not() {
    let msg = "Warning: You have spent 85% of your income.";
    let m = spend(1000, 850);

    let eval = run(&m, &[], NotificationSettings::default(), &[existing(msg, false)]);
    assert!(eval.fresh.is_empty());

    let eval = run(&m, &[], NotificationSettings::default(), &[existing(msg, true)]);
    assert_eq!(messages(&eval), vec![msg]);
}

#[test]
fn goal_near_completion_and_reached() {
    let m = spend(1000, 100);
    let eval = run(
        &m,
        &[goal("Car", 1000, 850), goal("Trip", 500, 500), goal("House", 1000, 790)],
        NotificationSettings::default(),
        &[],
    );
    assert_eq!(
        messages(&eval),
        vec![
            "Almost there! You are at 85% of your goal: Car",
            "Congratulations! You've reached your goal: Trip",
        ]
    );
    assert_eq!(eval.fresh[0].title, "Goal Reminder");
    assert_eq!(eval.fresh[1].title, "Goal Reached!");
}

#[test]
fn goals_with_same_message_fire_once() {
    let eval = run(
        &spend(1000, 100),
        &[goal("Car", 1000, 1000), goal("Car", 2000, 2000)],
        NotificationSettings::default(),
        &[],
    );
    assert_eq!(eval.fresh.len(), 1);
}

#[test]
fn goal_without_positive_target_is_skipped() {
    let eval = run(
        &spend(1000, 100),
        &[goal("Broken", 0, 0)],
        NotificationSettings::default(),
        &[],
    );
    assert!(eval.fresh.is_empty());
}

#[test]
fn disabled_rules_stay_silent() {
    let off = NotificationSettings {
        budget_alerts: false,
        goal_reminders: false,
        weekly_report: false,
    };
    let eval = NotificationEngine::new().evaluate(&RuleContext {
        metrics: &spend(1000, 950),
        goals: &[goal("Car", 1000, 1000)],
        settings: off,
        existing: &[],
        last_report_at: None,
        now: now(),
    });
    assert!(eval.fresh.is_empty());
    assert_eq!(eval.report_issued_at, None);
}

#[test]
fn weekly_report_respects_cooldown() {
    let m = spend(1000, 100);
    let no_goals: Vec<Goal> = Vec::new();
    let no_existing: Vec<Notification> = Vec::new();
    let ctx = |last: Option<DateTime<Utc>>| RuleContext {
        metrics: &m,
        goals: &no_goals,
        settings: NotificationSettings::default(),
        existing: &no_existing,
        last_report_at: last,
        now: now(),
    };
    let engine = NotificationEngine::new();

    let eval = engine.evaluate(&ctx(Some(now() - Duration::days(3))));
    assert!(eval.fresh.is_empty());
    assert_eq!(eval.report_issued_at, None);

    let eval = engine.evaluate(&ctx(Some(now() - Duration::days(8))));
    assert_eq!(messages(&eval), vec![WEEKLY_REPORT_MESSAGE]);
    assert_eq!(eval.fresh[0].category, NotificationCategory::Report);
    assert_eq!(eval.report_issued_at, Some(now()));

    let eval = engine.evaluate(&ctx(None));
    assert_eq!(eval.report_issued_at, Some(now()));
}

#[test]
fn cooldown_restarts_even_when_report_is_deduplicated() {
    let m = spend(1000, 100);
    let pending = existing(WEEKLY_REPORT_MESSAGE, false);
    let eval = NotificationEngine::new().evaluate(&RuleContext {
        metrics: &m,
        goals: &[],
        settings: NotificationSettings::default(),
        existing: std::slice::from_ref(&pending),
        last_report_at: None,
        now: now(),
    });
    assert!(eval.fresh.is_empty());
    assert_eq!(eval.report_issued_at, Some(now()));
}

#[test]
fn rules_run_in_registration_order() {
    assert_eq!(
        NotificationEngine::new().rule_names(),
        vec!["budget_alert", "goal_progress", "weekly_report"]
    );
}
