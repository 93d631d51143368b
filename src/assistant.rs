// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Rule-based chat assistant. Questions are matched against an ordered table
//! of patterns and answered from the current metrics; the first matching
//! pattern wins.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::metrics::{self, DerivedMetrics};
use crate::models::Transaction;
use crate::utils::{fmt_money, fmt_pct};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Balance,
    Spending,
    Income,
    Budget,
    Savings,
    EmergencyFund,
    Investing,
    Debt,
    Goals,
    HealthCheck,
    Thanks,
    Help,
}

static INTENTS: Lazy<Vec<(Intent, Regex)>> = Lazy::new(|| {
    [
        (
            Intent::Greeting,
            r"^(hi|hello|hey|greetings|good morning|good evening|good afternoon)",
        ),
        (
            Intent::Balance,
            r"(balance|money|how much.*have|what.*have|remaining|left|kitna.*balance|mera.*balance)",
        ),
        (
            Intent::Spending,
            r"(spend|spent|spending|expense|where.*money|money.*go|kharch)",
        ),
        (
            Intent::Income,
            r"(how much|what|show).*(income|earn|made|salary|received)|kitna.*kamaya",
        ),
        (Intent::Budget, r"(budget|budgeting)"),
        (
            Intent::Savings,
            r"(how.*save|save more|saving tips|increase savings|saving advice|tips.*save)",
        ),
        (
            Intent::EmergencyFund,
            r"(emergency fund|rainy day|safety net|unexpected expense)",
        ),
        (
            Intent::Investing,
            r"(invest|investing|stock|mutual fund|etf|sip|portfolio|retirement)",
        ),
        (
            Intent::Debt,
            r"(debt|loan|credit card|emi|mortgage|pay off|owe|owing)",
        ),
        (
            Intent::Goals,
            r"(goal|target|save for|saving for|plan for|vacation|car|house|wedding|education)",
        ),
        (
            Intent::HealthCheck,
            r"(financial health|money health|check.*finance|review|status|overview|summary)",
        ),
        (
            Intent::Thanks,
            r"(thank|thanks|bye|goodbye|see you|appreciate|helpful)",
        ),
        (
            Intent::Help,
            r"(what can you|help me|what do you|capabilities|features|options)",
        ),
    ]
    .into_iter()
    .map(|(intent, pat)| {
        let re = Regex::new(&format!("(?i){}", pat)).expect("valid intent pattern");
        (intent, re)
    })
    .collect()
});

const QUESTION_WORDS: &[&str] = &["how", "what", "why", "when", "where", "who"];

pub fn classify(query: &str) -> Option<Intent> {
    let q = query.trim().to_lowercase();
    INTENTS
        .iter()
        .find(|(_, re)| re.is_match(&q))
        .map(|(intent, _)| *intent)
}

pub struct Assistant<'a> {
    transactions: &'a [Transaction],
    metrics: DerivedMetrics,
    currency: String,
}

impl<'a> Assistant<'a> {
    pub fn new(transactions: &'a [Transaction], currency: impl Into<String>) -> Self {
        Self {
            transactions,
            metrics: metrics::compute(transactions),
            currency: currency.into(),
        }
    }

    pub fn respond(&self, query: &str) -> String {
        let intent = classify(query);
        tracing::debug!(?intent, "Assistant query classified");
        match intent {
            Some(Intent::Greeting) => self.greeting(),
            Some(Intent::Balance) => self.balance(),
            Some(Intent::Spending) => self.spending(),
            Some(Intent::Income) => self.income(),
            Some(Intent::Budget) => self.budget(),
            Some(Intent::Savings) => self.savings(),
            Some(Intent::EmergencyFund) => self.emergency_fund(),
            Some(Intent::Investing) => self.investing(),
            Some(Intent::Debt) => debt(),
            Some(Intent::Goals) => self.goals(),
            Some(Intent::HealthCheck) => self.health_check(),
            Some(Intent::Thanks) => thanks(),
            Some(Intent::Help) => help(),
            None => fallback(query),
        }
    }

    fn money(&self, d: Decimal) -> String {
        fmt_money(&d, &self.currency)
    }

    fn greeting(&self) -> String {
        "Hello! I'm your finance assistant.\n\n\
         I can look at your balance, break down your spending, suggest a budget, \
         and help you plan savings goals.\n\nHow can I help today?"
            .to_string()
    }

    fn balance(&self) -> String {
        let m = &self.metrics;
        let status = if m.balance > Decimal::ZERO {
            "Positive balance"
        } else {
            "Needs attention"
        };
        let count = if m.transaction_count > 0 {
            format!("Transactions recorded: {}", m.transaction_count)
        } else {
            "No transactions recorded yet".to_string()
        };
        let tip = if m.savings_rate >= Decimal::from(20) {
            "Excellent! You're saving more than 20% - keep it up!"
        } else if m.savings_rate > Decimal::ZERO {
            "Tip: try to raise your savings rate to 20%."
        } else {
            "Start tracking your income and expenses to see insights."
        };
        format!(
            "Your Financial Overview\n\n\
             Current balance: {} ({})\n\n\
             Total income:   {}\n\
             Total expenses: {}\n\
             Savings rate:   {}\n\n\
             {}\n\n{}",
            self.money(m.balance),
            status,
            self.money(m.total_income),
            self.money(m.total_expense),
            fmt_pct(&m.savings_rate),
            count,
            tip
        )
    }

    fn spending(&self) -> String {
        let m = &self.metrics;
        let sorted = m.category_breakdown.sorted_desc();
        if sorted.is_empty() {
            return format!(
                "Spending Analysis\n\nTotal spent: {}\n\n\
                 No expenses recorded yet. Add some transactions to see your breakdown.",
                self.money(m.total_expense)
            );
        }
        let lines: Vec<String> = sorted
            .iter()
            .take(5)
            .enumerate()
            .map(|(i, (cat, amt))| {
                format!(
                    "{}. {}: {} ({})",
                    i + 1,
                    cat,
                    self.money(*amt),
                    fmt_pct(&share_pct(*amt, m.total_expense))
                )
            })
            .collect();
        let (top_cat, top_amt) = sorted[0];
        format!(
            "Spending Analysis\n\nTotal spent: {}\n\nTop categories:\n{}\n\n\
             Expense transactions: {}\n\n\
             Tip: your highest expense is {}. Cutting it by 10% would save {}.",
            self.money(m.total_expense),
            lines.join("\n"),
            m.expense_count,
            top_cat,
            self.money(top_amt * Decimal::new(1, 1))
        )
    }

    fn income(&self) -> String {
        let sources = metrics::income_sources(self.transactions);
        let list = if sources.is_empty() {
            "- No income recorded yet".to_string()
        } else {
            sources
                .iter()
                .map(|(cat, amt)| format!("- {}: {}", cat, self.money(amt)))
                .collect::<Vec<_>>()
                .join("\n")
        };
        let tip = if self.metrics.savings_rate >= Decimal::from(20) {
            "You're on track with healthy savings!"
        } else {
            "Consider diversifying your income streams."
        };
        format!(
            "Income Report\n\nTotal income: {}\n\nSources:\n{}\n\nSavings rate: {}\n\n{}",
            self.money(self.metrics.total_income),
            list,
            fmt_pct(&self.metrics.savings_rate),
            tip
        )
    }

    fn budget(&self) -> String {
        let m = &self.metrics;
        let plan = metrics::budget_plan(m.total_income);
        let spent = m.spent_pct().unwrap_or_default();
        format!(
            "50/30/20 Budget\n\nBased on income: {}\n\n\
             Needs (50%):   {}  housing, utilities, groceries, insurance\n\
             Wants (30%):   {}  entertainment, dining, subscriptions\n\
             Savings (20%): {}  emergency fund, investments, retirement\n\n\
             Your current status:\n\
             - Spending: {} ({})\n\
             - Saved: {} ({})",
            self.money(m.total_income),
            self.money(plan.needs),
            self.money(plan.wants),
            self.money(plan.savings),
            self.money(m.total_expense),
            fmt_pct(&spent),
            self.money(m.balance),
            fmt_pct(&m.savings_rate)
        )
    }

    fn savings(&self) -> String {
        let quick_win = match metrics::top_expense_category(&self.metrics.category_breakdown) {
            Some((cat, amt)) => format!(
                "\n\nQuick win: your largest expense is {} at {}. Reducing it by 10% saves {} a month.",
                cat,
                self.money(amt),
                self.money(amt * Decimal::new(1, 1))
            ),
            None => String::new(),
        };
        format!(
            "Saving Strategies\n\n\
             1. Audit subscriptions and cancel unused ones\n\
             2. Meal prep to cut food costs\n\
             3. Negotiate recurring bills\n\
             4. Auto-transfer to savings on payday\n\
             5. Wait 24 hours before purchases over 50\n\
             6. Set specific savings goals{}",
            quick_win
        )
    }

    fn emergency_fund(&self) -> String {
        let fund = metrics::emergency_fund(&self.metrics);
        format!(
            "Emergency Fund\n\nMonthly expenses: {}\n\n\
             Targets:\n\
             - Starter (1 month): {}\n\
             - Basic (3 months):  {}\n\
             - Full (6 months):   {}\n\n\
             Current savings: {}\n\
             3-month goal: {} complete",
            self.money(fund.one_month),
            self.money(fund.one_month),
            self.money(fund.three_months),
            self.money(fund.six_months),
            self.money(self.metrics.balance),
            fmt_pct(&fund.progress_pct)
        )
    }

    fn investing(&self) -> String {
        let m = &self.metrics;
        let investable = (m.balance - m.total_expense * Decimal::from(3)).max(Decimal::ZERO);
        let closing = if investable > Decimal::ZERO {
            format!("Potential investable amount: {}", self.money(investable))
        } else {
            "Build your emergency fund first, then start investing.".to_string()
        };
        format!(
            "Investing Basics\n\nBefore you invest:\n\
             - Emergency fund of 3-6 months\n\
             - High-interest debt paid off\n\
             - Stable income\n\n\
             Start with broad index funds, invest consistently, think in decades.\n\n{}",
            closing
        )
    }

    fn goals(&self) -> String {
        let m = &self.metrics;
        format!(
            "Goal Planning\n\nMonthly surplus: {}\nCurrent savings: {}\n\n\
             Formula: (target - current savings) / months = monthly amount\n\n\
             Add a goal with `goal add` and track it with `goal progress`.",
            self.money(m.balance.max(Decimal::ZERO)),
            self.money(m.balance)
        )
    }

    fn health_check(&self) -> String {
        let m = &self.metrics;
        let health = metrics::health_score(m);
        let mark = |ok: bool| if ok { "[x]" } else { "[ ]" };
        let top = metrics::top_expense_category(&m.category_breakdown)
            .map(|(cat, amt)| format!("\n- Top expense: {} ({})", cat, self.money(amt)))
            .unwrap_or_default();
        format!(
            "Financial Health\n\nScore: {}/100\nGrade: {}\n\n\
             - Balance: {}\n- Income: {}\n- Expenses: {}\n- Savings rate: {}{}\n\n\
             {} Saving 20%+ of income\n\
             {} 3+ months emergency fund\n\
             {} Living below your means",
            health.score.round_dp(0),
            health.grade.as_str(),
            self.money(m.balance),
            self.money(m.total_income),
            self.money(m.total_expense),
            fmt_pct(&m.savings_rate),
            top,
            mark(health.saves_twenty_pct),
            mark(health.has_emergency_fund),
            mark(health.below_means)
        )
    }
}

fn share_pct(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        part / whole * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

fn debt() -> String {
    "Debt Payoff\n\n\
     Avalanche: pay minimums everywhere, put extra money on the highest interest rate.\n\
     Snowball: pay minimums everywhere, put extra money on the smallest balance.\n\n\
     Always pay more than the minimum and avoid new debt while paying off."
        .to_string()
}

fn thanks() -> String {
    "You're welcome!\n\nTrack expenses daily, review your budget weekly, check goals monthly."
        .to_string()
}

fn help() -> String {
    "I can help with:\n\
     - Balance and expense analysis\n\
     - Budget recommendations\n\
     - Savings and emergency fund planning\n\
     - Investing and debt basics\n\n\
     Try: \"What's my balance?\", \"Analyze my spending\", \"How can I save more?\""
        .to_string()
}

fn fallback(query: &str) -> String {
    let q = query.to_lowercase();
    if QUESTION_WORDS.iter().any(|w| q.contains(w)) {
        format!("That topic is outside what I know.\n\n{}", help())
    } else {
        format!("I'm not sure what you mean.\n\n{}", help())
    }
}
