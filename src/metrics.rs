// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived financial metrics computed from a transaction snapshot.
//!
//! Everything here is a pure function of its inputs and safe to call on every
//! data change.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::models::{Goal, Transaction, TxKind};

/// Amounts summed per category label, in first-seen order.
///
/// Labels are compared exactly: "Food", "food" and "Food " are three
/// different keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    entries: Vec<(String, Decimal)>,
}

impl CategoryBreakdown {
    pub fn add(&mut self, category: &str, amount: Decimal) {
        match self.entries.iter_mut().find(|(c, _)| c == category) {
            Some((_, total)) => *total += amount,
            None => self.entries.push((category.to_string(), amount)),
        }
    }

    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, a)| *a)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(c, a)| (c.as_str(), *a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|(_, a)| *a).sum()
    }

    /// Largest first. Equal amounts keep their first-seen order.
    pub fn sorted_desc(&self) -> Vec<(&str, Decimal)> {
        let mut items: Vec<_> = self.iter().collect();
        items.sort_by(|a, b| b.1.cmp(&a.1));
        items
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    /// Percent of income not spent; zero when there is no income.
    pub savings_rate: Decimal,
    pub category_breakdown: CategoryBreakdown,
    pub transaction_count: usize,
    pub expense_count: usize,
}

impl DerivedMetrics {
    /// Percent of income already spent, if there is any income.
    pub fn spent_pct(&self) -> Option<Decimal> {
        if self.total_income > Decimal::ZERO {
            Some(self.total_expense / self.total_income * Decimal::ONE_HUNDRED)
        } else {
            None
        }
    }
}

pub fn compute(transactions: &[Transaction]) -> DerivedMetrics {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    let mut expense_count = 0;
    let mut category_breakdown = CategoryBreakdown::default();

    for tx in transactions {
        match tx.kind {
            TxKind::Income => total_income += tx.amount,
            TxKind::Expense => {
                total_expense += tx.amount;
                expense_count += 1;
                category_breakdown.add(&tx.category, tx.amount);
            }
        }
    }

    let balance = total_income - total_expense;
    let savings_rate = if total_income > Decimal::ZERO {
        balance / total_income * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    DerivedMetrics {
        total_income,
        total_expense,
        balance,
        savings_rate,
        category_breakdown,
        transaction_count: transactions.len(),
        expense_count,
    }
}

/// The expense category with the largest total, `None` when nothing was spent.
pub fn top_expense_category(breakdown: &CategoryBreakdown) -> Option<(&str, Decimal)> {
    let mut top: Option<(&str, Decimal)> = None;
    for (cat, amt) in breakdown.iter() {
        match top {
            Some((_, best)) if amt <= best => {}
            _ => top = Some((cat, amt)),
        }
    }
    top
}

pub fn income_sources(transactions: &[Transaction]) -> CategoryBreakdown {
    let mut sources = CategoryBreakdown::default();
    for tx in transactions.iter().filter(|t| t.kind == TxKind::Income) {
        sources.add(&tx.category, tx.amount);
    }
    sources
}

/// 50/30/20 split of total income.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetPlan {
    pub needs: Decimal,
    pub wants: Decimal,
    pub savings: Decimal,
}

pub fn budget_plan(total_income: Decimal) -> BudgetPlan {
    BudgetPlan {
        needs: total_income * Decimal::new(5, 1),
        wants: total_income * Decimal::new(3, 1),
        savings: total_income * Decimal::new(2, 1),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmergencyFund {
    pub one_month: Decimal,
    pub three_months: Decimal,
    pub six_months: Decimal,
    /// Balance as a percent of the three-month target, capped at 100.
    pub progress_pct: Decimal,
}

pub fn emergency_fund(metrics: &DerivedMetrics) -> EmergencyFund {
    let one_month = metrics.total_expense;
    let three_months = one_month * Decimal::from(3);
    let progress_pct = if three_months > Decimal::ZERO {
        (metrics.balance / three_months * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };
    EmergencyFund {
        one_month,
        three_months,
        six_months: one_month * Decimal::from(6),
        progress_pct,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl Grade {
    fn from_score(score: Decimal) -> Self {
        if score >= Decimal::from(80) {
            Grade::A
        } else if score >= Decimal::from(60) {
            Grade::B
        } else if score >= Decimal::from(40) {
            Grade::C
        } else {
            Grade::D
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthScore {
    pub score: Decimal,
    pub grade: Grade,
    pub saves_twenty_pct: bool,
    pub has_emergency_fund: bool,
    pub below_means: bool,
}

/// Four components worth 25 points each: savings rate, emergency fund
/// coverage, spending under 80% of income, and a fixed baseline.
pub fn health_score(metrics: &DerivedMetrics) -> HealthScore {
    let quarter = Decimal::from(25);
    let twenty = Decimal::from(20);
    let income = metrics.total_income;
    let expense = metrics.total_expense;
    let balance = metrics.balance;
    let three_months = expense * Decimal::from(3);
    let eighty_pct = income * Decimal::new(8, 1);

    let savings_part = if metrics.savings_rate >= twenty {
        quarter
    } else {
        metrics.savings_rate
    };
    let fund_part = if balance > three_months {
        quarter
    } else if three_months > Decimal::ZERO {
        balance / three_months * quarter
    } else {
        // no expenses and no positive balance
        Decimal::ZERO
    };
    let means_part = if expense < eighty_pct {
        quarter
    } else if income > Decimal::ZERO {
        (Decimal::ONE - expense / income) * quarter
    } else {
        Decimal::ZERO
    };

    let score = (savings_part + fund_part + means_part + quarter)
        .max(Decimal::ZERO)
        .min(Decimal::ONE_HUNDRED);

    HealthScore {
        score,
        grade: Grade::from_score(score),
        saves_twenty_pct: metrics.savings_rate >= twenty,
        has_emergency_fund: balance >= three_months,
        below_means: expense < eighty_pct,
    }
}

/// Whole months until `goal` is reached at `monthly_surplus` per month.
pub fn months_to_goal(goal: &Goal, monthly_surplus: Decimal) -> Option<u32> {
    if goal.is_complete() || monthly_surplus <= Decimal::ZERO {
        return None;
    }
    (goal.remaining() / monthly_surplus).ceil().to_u32()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(kind: TxKind, amount: i64, category: &str) -> Transaction {
        Transaction {
            id: 0,
            kind,
            amount: Decimal::from(amount),
            category: category.to_string(),
            description: None,
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }

    #[test]
    fn breakdown_keeps_first_seen_order_on_ties() {
        let txs = vec![
            tx(TxKind::Expense, 100, "Food"),
            tx(TxKind::Expense, 100, "Rent"),
        ];
        let m = compute(&txs);
        assert_eq!(
            top_expense_category(&m.category_breakdown),
            Some(("Food", Decimal::from(100)))
        );
        let sorted = m.category_breakdown.sorted_desc();
        assert_eq!(sorted[0].0, "Food");
    }

    #[test]
    fn months_to_goal_rounds_up() {
        let goal = Goal {
            id: 1,
            title: "Bike".into(),
            target_amount: Decimal::from(1000),
            current_amount: Decimal::from(100),
            deadline: None,
        };
        assert_eq!(months_to_goal(&goal, Decimal::from(200)), Some(5));
        assert_eq!(months_to_goal(&goal, Decimal::ZERO), None);
    }
}
