// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Notification rules evaluated against the current metrics and goals.
//!
//! The engine keeps no state between runs. Every evaluation recomputes all
//! candidates and drops those whose message is already present as an unread
//! notification, so reading a notification acknowledges it only until the
//! condition is evaluated again. The weekly report is the exception: it carries
//! its own cooldown timestamp, which the caller persists.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::metrics::DerivedMetrics;
use crate::models::{
    Goal, NewNotification, Notification, NotificationCategory, NotificationSettings,
};
use crate::utils::round_pct;

pub const REPORT_COOLDOWN_DAYS: i64 = 7;

pub const WEEKLY_REPORT_MESSAGE: &str =
    "Your weekly spending summary is ready! Check your insights for the past 7 days.";

/// Share of income above which spending raises a budget alert.
fn budget_alert_ratio() -> Decimal {
    Decimal::new(8, 1)
}

fn near_completion_pct() -> Decimal {
    Decimal::from(80)
}

/// Snapshot handed to every rule.
pub struct RuleContext<'a> {
    pub metrics: &'a DerivedMetrics,
    pub goals: &'a [Goal],
    pub settings: NotificationSettings,
    pub existing: &'a [Notification],
    pub last_report_at: Option<DateTime<Utc>>,
    pub now: DateTime<Utc>,
}

/// A notification a rule wants to raise.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub category: NotificationCategory,
    pub title: String,
    pub message: String,
}

impl Candidate {
    fn new(
        category: NotificationCategory,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            title: title.into(),
            message: message.into(),
        }
    }
}

pub trait Rule {
    fn name(&self) -> &'static str;

    fn enabled(&self, settings: &NotificationSettings) -> bool;

    fn candidates(&self, ctx: &RuleContext<'_>) -> Vec<Candidate>;
}

pub struct BudgetAlertRule;

impl Rule for BudgetAlertRule {
    fn name(&self) -> &'static str {
        "budget_alert"
    }

    fn enabled(&self, settings: &NotificationSettings) -> bool {
        settings.budget_alerts
    }

    fn candidates(&self, ctx: &RuleContext<'_>) -> Vec<Candidate> {
        let m = ctx.metrics;
        if m.total_income <= Decimal::ZERO
            || m.total_expense <= m.total_income * budget_alert_ratio()
        {
            return vec![];
        }
        let spent = m.spent_pct().map(round_pct).unwrap_or_default();
        vec![Candidate::new(
            NotificationCategory::Budget,
            "Budget Alert",
            format!("Warning: You have spent {}% of your income.", spent),
        )]
    }
}

/// Goal reached and goal near-completion; at most one of the two per goal.
pub struct GoalProgressRule;

impl Rule for GoalProgressRule {
    fn name(&self) -> &'static str {
        "goal_progress"
    }

    fn enabled(&self, settings: &NotificationSettings) -> bool {
        settings.goal_reminders
    }

    fn candidates(&self, ctx: &RuleContext<'_>) -> Vec<Candidate> {
        let mut out = Vec::new();
        for goal in ctx.goals {
            if goal.target_amount <= Decimal::ZERO {
                tracing::warn!(goal = goal.id, "Skipping goal without a positive target");
                continue;
            }
            if goal.is_complete() {
                out.push(Candidate::new(
                    NotificationCategory::Goal,
                    "Goal Reached!",
                    format!("Congratulations! You've reached your goal: {}", goal.title),
                ));
            } else if goal.progress_pct() >= near_completion_pct() {
                out.push(Candidate::new(
                    NotificationCategory::Goal,
                    "Goal Reminder",
                    format!(
                        "Almost there! You are at {}% of your goal: {}",
                        round_pct(goal.progress_pct()),
                        goal.title
                    ),
                ));
            }
        }
        out
    }
}

pub struct WeeklyReportRule;

impl WeeklyReportRule {
    fn due(last_report_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match last_report_at {
            None => true,
            Some(last) => last < now - Duration::days(REPORT_COOLDOWN_DAYS),
        }
    }
}

impl Rule for WeeklyReportRule {
    fn name(&self) -> &'static str {
        "weekly_report"
    }

    fn enabled(&self, settings: &NotificationSettings) -> bool {
        settings.weekly_report
    }

    fn candidates(&self, ctx: &RuleContext<'_>) -> Vec<Candidate> {
        if !Self::due(ctx.last_report_at, ctx.now) {
            return vec![];
        }
        vec![Candidate::new(
            NotificationCategory::Report,
            "Weekly Insights",
            WEEKLY_REPORT_MESSAGE,
        )]
    }
}

/// Result of one evaluation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    /// New notifications, to be stored ahead of the existing ones.
    pub fresh: Vec<NewNotification>,
    /// Set when the weekly report fired; the caller stores it as the new
    /// cooldown start.
    pub report_issued_at: Option<DateTime<Utc>>,
}

pub struct NotificationEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for NotificationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationEngine {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(BudgetAlertRule),
                Box::new(GoalProgressRule),
                Box::new(WeeklyReportRule),
            ],
        }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Evaluation {
        let mut eval = Evaluation::default();

        for rule in &self.rules {
            if !rule.enabled(&ctx.settings) {
                tracing::debug!(rule = rule.name(), "Rule disabled");
                continue;
            }
            let candidates = rule.candidates(ctx);
            tracing::debug!(rule = rule.name(), count = candidates.len(), "Rule evaluated");

            for c in candidates {
                if c.category == NotificationCategory::Report {
                    eval.report_issued_at = Some(ctx.now);
                }
                if is_pending(ctx.existing, &eval.fresh, &c.message) {
                    continue;
                }
                eval.fresh.push(NewNotification {
                    category: c.category,
                    title: c.title,
                    message: c.message,
                    created_at: ctx.now,
                });
            }
        }
        eval
    }
}

fn is_pending(existing: &[Notification], fresh: &[NewNotification], message: &str) -> bool {
    existing.iter().any(|n| !n.read && n.message == message)
        || fresh.iter().any(|n| n.message == message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekly_report_due_only_after_seven_days() {
        let now = Utc::now();
        assert!(WeeklyReportRule::due(None, now));
        assert!(!WeeklyReportRule::due(Some(now - Duration::days(7)), now));
        assert!(WeeklyReportRule::due(
            Some(now - Duration::days(7) - Duration::seconds(1)),
            now
        ));
    }

    #[test]
    fn engine_registers_all_rules() {
        let engine = NotificationEngine::new();
        assert_eq!(
            engine.rule_names(),
            vec!["budget_alert", "goal_progress", "weekly_report"]
        );
    }
}
