// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use super::trend::{CategoryShare, Trend};
use crate::utils::format_currency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceKind {
    Critical,
    Warning,
    Positive,
}

impl AdviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdviceKind::Critical => "critical",
            AdviceKind::Warning => "warning",
            AdviceKind::Positive => "positive",
        }
    }
}

/// Lower priority surfaces first.
#[derive(Debug, Clone, Serialize)]
pub struct AdviceItem {
    pub kind: AdviceKind,
    pub priority: u8,
    pub title: String,
    pub message: String,
    pub action: String,
}

#[derive(Debug, Clone)]
pub struct AdviceInput<'a> {
    /// Base currency code, used to render amounts inside messages.
    pub currency: &'a str,
    pub savings_rate: Decimal,
    pub emergency_fund_months: Decimal,
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    pub total_assets: Decimal,
    pub trend: Trend,
    pub category_warnings: &'a [CategoryShare],
    pub ytd_average_expense: Decimal,
}

/// Synthesize advice from the month's aggregates. Rules run in a fixed
/// order; overlapping findings are all kept, and the final list is sorted
/// ascending by priority with insertion order preserved on ties.
pub fn generate_advice(input: &AdviceInput<'_>) -> Vec<AdviceItem> {
    let mut items = Vec::new();

    if input.savings_rate < Decimal::ZERO {
        items.push(AdviceItem {
            kind: AdviceKind::Critical,
            priority: 1,
            title: "Spending exceeds income".to_string(),
            message: format!(
                "This month's expenses of {} are more than your income of {}.",
                format_currency(input.monthly_expenses, input.currency),
                format_currency(input.monthly_income, input.currency)
            ),
            action: "Cut non-essential spending until the balance is positive".to_string(),
        });
    } else if input.savings_rate < Decimal::from(10) {
        items.push(AdviceItem {
            kind: AdviceKind::Warning,
            priority: 2,
            title: "Low savings rate".to_string(),
            message: format!(
                "You are saving {:.1}% of income; 10% or more builds a buffer faster.",
                input.savings_rate
            ),
            action: "Automate a transfer to savings on payday".to_string(),
        });
    } else if input.savings_rate >= Decimal::from(20) {
        items.push(AdviceItem {
            kind: AdviceKind::Positive,
            priority: 5,
            title: "Healthy savings rate".to_string(),
            message: format!(
                "You are saving {:.1}% of income this month. Keep it up.",
                input.savings_rate
            ),
            action: "Consider putting the surplus to work in longer-term assets".to_string(),
        });
    }

    if input.emergency_fund_months < Decimal::from(3) {
        items.push(AdviceItem {
            kind: AdviceKind::Warning,
            priority: 2,
            title: "Emergency fund below 3 months".to_string(),
            message: format!(
                "Your assets cover {:.1} months of expenses; 3 to 6 months is the usual cushion.",
                input.emergency_fund_months
            ),
            action: "Direct part of each month's balance into liquid savings".to_string(),
        });
    } else if input.emergency_fund_months >= Decimal::from(6) {
        items.push(AdviceItem {
            kind: AdviceKind::Positive,
            priority: 5,
            title: "Solid emergency fund".to_string(),
            message: format!(
                "Your assets cover {:.1} months of expenses.",
                input.emergency_fund_months
            ),
            action: "Further surplus can go toward longer-term goals".to_string(),
        });
    }

    match input.trend {
        Trend::Increasing => items.push(AdviceItem {
            kind: AdviceKind::Warning,
            priority: 3,
            title: "Spending is trending up".to_string(),
            message: "Recent months show a clear rise in spending.".to_string(),
            action: "Review the top categories below for what changed".to_string(),
        }),
        Trend::Decreasing => items.push(AdviceItem {
            kind: AdviceKind::Positive,
            priority: 4,
            title: "Spending is trending down".to_string(),
            message: "Recent months show a clear drop in spending.".to_string(),
            action: "Lock in the gains by moving the difference to savings".to_string(),
        }),
        _ => {}
    }

    for w in input.category_warnings {
        items.push(AdviceItem {
            kind: AdviceKind::Warning,
            priority: 3,
            title: format!("High {} spending", w.category),
            message: format!(
                "{} accounts for {:.0}% of this month's spending ({}).",
                w.category,
                w.percentage,
                format_currency(w.total, input.currency)
            ),
            action: format!("Set a monthly limit for {}", w.category),
        });
    }

    if input.monthly_income > Decimal::ZERO {
        let ratio = input.monthly_expenses / input.monthly_income;
        if ratio > Decimal::new(9, 1) {
            items.push(AdviceItem {
                kind: AdviceKind::Warning,
                priority: 2,
                title: "Expenses close to income".to_string(),
                message: format!(
                    "Expenses are {:.0}% of income, leaving almost no margin.",
                    ratio * Decimal::from(100)
                ),
                action: "Target the largest category for a cut".to_string(),
            });
        }
        let asset_ratio = input.total_assets / (input.monthly_income * Decimal::from(12));
        if asset_ratio < Decimal::new(5, 1) {
            items.push(AdviceItem {
                kind: AdviceKind::Warning,
                priority: 4,
                title: "Asset base is thin".to_string(),
                message: format!(
                    "Total assets of {} are under half a year's income.",
                    format_currency(input.total_assets, input.currency)
                ),
                action: "Grow assets steadily from each month's balance".to_string(),
            });
        }
    }

    if input.ytd_average_expense > Decimal::ZERO {
        let threshold = input.ytd_average_expense * Decimal::new(11, 1);
        if input.monthly_expenses > threshold {
            let over = (input.monthly_expenses - input.ytd_average_expense)
                / input.ytd_average_expense
                * Decimal::from(100);
            items.push(AdviceItem {
                kind: AdviceKind::Warning,
                priority: 3,
                title: "Above-average month".to_string(),
                message: format!(
                    "You spent {} this month, {:.0}% above your monthly average of {}.",
                    format_currency(input.monthly_expenses, input.currency),
                    over,
                    format_currency(input.ytd_average_expense, input.currency)
                ),
                action: "Check for one-off purchases that can be planned next time".to_string(),
            });
        }
    }

    items.sort_by_key(|i| i.priority);
    items
}
