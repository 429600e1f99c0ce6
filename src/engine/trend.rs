// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use super::aggregate::CategoryTotal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    SlightlyIncreasing,
    Stable,
    SlightlyDecreasing,
    Decreasing,
    InsufficientData,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::SlightlyIncreasing => "slightly_increasing",
            Trend::Stable => "stable",
            Trend::SlightlyDecreasing => "slightly_decreasing",
            Trend::Decreasing => "decreasing",
            Trend::InsufficientData => "insufficient_data",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Stable,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendReport {
    pub trend: Trend,
    pub direction: Direction,
    pub change_percent: Decimal,
}

fn average(values: &[Decimal]) -> Decimal {
    values.iter().copied().sum::<Decimal>() / Decimal::from(values.len() as i64)
}

/// Classify a chronological sequence of monthly totals by comparing the
/// average of the first half (split at `floor(n/2)`) against the second.
/// Fewer than two points cannot be classified.
pub fn classify_trend(monthly_totals: &[Decimal]) -> TrendReport {
    if monthly_totals.len() < 2 {
        return TrendReport {
            trend: Trend::InsufficientData,
            direction: Direction::Stable,
            change_percent: Decimal::ZERO,
        };
    }
    let (first, second) = monthly_totals.split_at(monthly_totals.len() / 2);
    let first_avg = average(first);
    let second_avg = average(second);
    let change_percent = if first_avg.is_zero() {
        Decimal::ZERO
    } else {
        (second_avg - first_avg) / first_avg * Decimal::from(100)
    };

    let (trend, direction) = if change_percent > Decimal::from(15) {
        (Trend::Increasing, Direction::Up)
    } else if change_percent >= Decimal::from(5) {
        (Trend::SlightlyIncreasing, Direction::Up)
    } else if change_percent < Decimal::from(-15) {
        (Trend::Decreasing, Direction::Down)
    } else if change_percent <= Decimal::from(-5) {
        (Trend::SlightlyDecreasing, Direction::Down)
    } else {
        (Trend::Stable, Direction::Stable)
    };
    TrendReport {
        trend,
        direction,
        change_percent,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryAnalysis {
    pub top_categories: Vec<CategoryShare>,
    /// Shares above 40% of total spending.
    pub warnings: Vec<CategoryShare>,
    /// Shares between 25% and 40%.
    pub recommendations: Vec<CategoryShare>,
}

/// Share analysis over ranked category totals (descending, as produced by
/// the aggregation engine); only the top five are considered. A zero
/// expense total yields zero percentages and no flags.
pub fn analyze_category_spending(
    category_totals: &[CategoryTotal],
    total_expenses: Decimal,
) -> CategoryAnalysis {
    let mut top_categories = Vec::new();
    for ct in category_totals.iter().take(5) {
        let percentage = if total_expenses.is_zero() {
            Decimal::ZERO
        } else {
            ct.total / total_expenses * Decimal::from(100)
        };
        top_categories.push(CategoryShare {
            category: ct.category.clone(),
            total: ct.total,
            percentage,
        });
    }
    let warnings = top_categories
        .iter()
        .filter(|s| s.percentage > Decimal::from(40))
        .cloned()
        .collect();
    let recommendations = top_categories
        .iter()
        .filter(|s| s.percentage >= Decimal::from(25) && s.percentage <= Decimal::from(40))
        .cloned()
        .collect();
    CategoryAnalysis {
        top_categories,
        warnings,
        recommendations,
    }
}
