// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spoken or typed commands: either a question about the current numbers or a
//! transaction to record.
//!
//! This is keyword matching, not a grammar. Keywords match as substrings, so
//! "bus" also matches "business"; the tables are scanned in a fixed order and
//! the first hit wins.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::metrics::DerivedMetrics;
use crate::models::TxKind;
use crate::utils::fmt_money;

pub const DEFAULT_CATEGORY: &str = "Others";

static AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid amount regex"));

static CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Food",
        &[
            "food", "grocery", "groceries", "dinner", "lunch", "khana", "rashan", "restaurant",
            "zomato", "swiggy", "maggi", "chai",
        ],
    ),
    (
        "Transport",
        &[
            "petrol", "diesel", "fuel", "uber", "ola", "auto", "bus", "train", "travel", "gadi",
            "bike",
        ],
    ),
    ("Rent", &["rent", "kiraya", "room"]),
    (
        "Bills",
        &["bill", "recharge", "electricity", "bijli", "water", "internet", "wifi"],
    ),
    (
        "Shopping",
        &["shopping", "clothes", "kapde", "amazon", "flipkart", "mall"],
    ),
    ("Salary", &["salary", "bonus", "paisa", "kamai", "tkhwah"]),
];

static INCOME_KEYWORDS: &[&str] = &[
    "income", "salary", "got", "received", "aaye", "mili", "mile", "prapt", "bhaida", "mil gaya",
];

static INQUIRY_KEYWORDS: &[(InquiryTopic, &[&str])] = &[
    (InquiryTopic::Balance, &["balance", "bacha", "kitne paise"]),
    (InquiryTopic::Spending, &["spent", "kharch", "expens"]),
    (InquiryTopic::Income, &["income", "kamai", "salary"]),
    (InquiryTopic::Budget, &["budget"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryTopic {
    Balance,
    Spending,
    Income,
    Budget,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDraft {
    pub kind: TxKind,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Command {
    Inquiry {
        topic: InquiryTopic,
        display: String,
        speech: String,
    },
    Transaction(TransactionDraft),
}

/// Interpret an utterance. `None` means it was not understood.
///
/// An utterance that carries a non-zero number is treated as a transaction; a
/// number too large to be an amount is not understood at all. Without a
/// usable number it can only be an inquiry.
pub fn parse(utterance: &str, metrics: &DerivedMetrics, currency: &str) -> Option<Command> {
    let text = utterance.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }
    if let Some(amount) = extract_amount(&text)? {
        return Some(Command::Transaction(TransactionDraft {
            kind: infer_kind(&text),
            amount,
            category: infer_category(&text).to_string(),
            description: format!("Voice: {}", text),
        }));
    }
    let topic = INQUIRY_KEYWORDS
        .iter()
        .find(|(_, kws)| contains_any(&text, kws))
        .map(|(topic, _)| *topic)?;
    Some(answer(topic, metrics, currency))
}

/// First run of digits as a non-zero amount.
///
/// `Some(None)` when there is no usable amount (no digits, or zero); `None`
/// when the digits overflow a decimal.
pub fn extract_amount(text: &str) -> Option<Option<Decimal>> {
    let Some(m) = AMOUNT.find(text) else {
        return Some(None);
    };
    let amount = m.as_str().parse::<Decimal>().ok()?;
    Some(Some(amount).filter(|d| *d > Decimal::ZERO))
}

pub fn infer_category(text: &str) -> &'static str {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, kws)| contains_any(text, kws))
        .map(|(cat, _)| *cat)
        .unwrap_or(DEFAULT_CATEGORY)
}

pub fn infer_kind(text: &str) -> TxKind {
    if contains_any(text, INCOME_KEYWORDS) {
        TxKind::Income
    } else {
        TxKind::Expense
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

fn answer(topic: InquiryTopic, m: &DerivedMetrics, currency: &str) -> Command {
    let plain = |d: Decimal| format!("{} {}", d.round_dp(2).normalize(), currency);
    let (display, speech) = match topic {
        InquiryTopic::Balance => (
            format!("Your current balance is {}.", fmt_money(&m.balance, currency)),
            format!("Your current balance is {}.", plain(m.balance)),
        ),
        InquiryTopic::Spending => (
            format!("You have spent {} in total.", fmt_money(&m.total_expense, currency)),
            format!("You have spent {} in total.", plain(m.total_expense)),
        ),
        InquiryTopic::Income => (
            format!("Your total income is {}.", fmt_money(&m.total_income, currency)),
            format!("Your total income is {}.", plain(m.total_income)),
        ),
        InquiryTopic::Budget => {
            let msg = if m.total_expense > m.total_income * Decimal::new(8, 1) {
                "Careful! Your spending is close to your budget limit."
            } else {
                "Your budget is under control. Everything looks fine."
            };
            (msg.to_string(), msg.to_string())
        }
    };
    Command::Inquiry {
        topic,
        display,
        speech,
    }
}
