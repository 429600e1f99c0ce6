// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use super::aggregate::Summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Critical,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Critical => "critical",
            HealthStatus::Poor => "poor",
            HealthStatus::Fair => "fair",
            HealthStatus::Good => "good",
            HealthStatus::Excellent => "excellent",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthFactor {
    pub name: &'static str,
    pub score: u32,
    pub max: u32,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct HealthInput {
    pub total_assets: Decimal,
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    /// Percentage, e.g. 25 for 25%.
    pub savings_rate: Decimal,
    pub emergency_fund_months: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub score: u32,
    pub status: HealthStatus,
    pub factors: Vec<HealthFactor>,
}

/// Monthly balance over income, as a percentage. Zero without income.
pub fn savings_rate(summary: &Summary) -> Decimal {
    if summary.total_income <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        summary.balance / summary.total_income * Decimal::from(100)
    }
}

/// Months of expense coverage held in assets. Zero without expenses.
pub fn emergency_fund_months(total_assets: Decimal, monthly_expenses: Decimal) -> Decimal {
    if monthly_expenses <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        total_assets / monthly_expenses
    }
}

/// Weighted four-factor score in [0, 100]. Every factor is reported even
/// when it cannot be scored, so the factor list always explains the total.
pub fn health_score(input: &HealthInput) -> HealthReport {
    let mut factors = Vec::with_capacity(4);

    let sr = input.savings_rate;
    let (score, status) = if sr >= Decimal::from(20) {
        (30, "excellent")
    } else if sr >= Decimal::from(15) {
        (25, "good")
    } else if sr >= Decimal::from(10) {
        (20, "fair")
    } else if sr >= Decimal::from(5) {
        (10, "low")
    } else if sr > Decimal::ZERO {
        (5, "minimal")
    } else {
        (0, "not saving")
    };
    factors.push(HealthFactor {
        name: "Savings rate",
        score,
        max: 30,
        status: status.to_string(),
    });

    let ef = input.emergency_fund_months;
    let (score, status) = if ef >= Decimal::from(6) {
        (25, "excellent")
    } else if ef >= Decimal::from(3) {
        (15, "adequate")
    } else if ef >= Decimal::from(1) {
        (8, "thin")
    } else {
        (0, "none")
    };
    factors.push(HealthFactor {
        name: "Emergency fund",
        score,
        max: 25,
        status: status.to_string(),
    });

    let (score, status) = if input.monthly_income > Decimal::ZERO {
        let ratio = input.monthly_expenses / input.monthly_income;
        if ratio <= Decimal::new(5, 1) {
            (25, "excellent".to_string())
        } else if ratio <= Decimal::new(7, 1) {
            (18, "good".to_string())
        } else if ratio <= Decimal::new(9, 1) {
            (10, "tight".to_string())
        } else if ratio < Decimal::ONE {
            (5, "break-even".to_string())
        } else {
            (0, "spending exceeds income".to_string())
        }
    } else {
        (0, "no income recorded".to_string())
    };
    factors.push(HealthFactor {
        name: "Expense-to-income",
        score,
        max: 25,
        status,
    });

    let (score, status) = if input.total_assets > Decimal::ZERO && input.monthly_income > Decimal::ZERO
    {
        let ratio = input.total_assets / (input.monthly_income * Decimal::from(12));
        if ratio >= Decimal::from(2) {
            (20, "strong".to_string())
        } else if ratio >= Decimal::ONE {
            (14, "solid".to_string())
        } else if ratio >= Decimal::new(5, 1) {
            (8, "building".to_string())
        } else {
            (0, "low".to_string())
        }
    } else if input.total_assets <= Decimal::ZERO {
        (0, "no assets recorded".to_string())
    } else {
        (0, "no income recorded".to_string())
    };
    factors.push(HealthFactor {
        name: "Assets-to-annual-income",
        score,
        max: 20,
        status,
    });

    let score: u32 = factors.iter().map(|f| f.score).sum::<u32>().min(100);
    let status = if score < 40 {
        HealthStatus::Critical
    } else if score < 60 {
        HealthStatus::Poor
    } else if score < 75 {
        HealthStatus::Fair
    } else if score < 90 {
        HealthStatus::Good
    } else {
        HealthStatus::Excellent
    };
    HealthReport {
        score,
        status,
        factors,
    }
}
