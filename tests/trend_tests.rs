// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketledger::engine::aggregate::CategoryTotal;
use pocketledger::engine::trend::{analyze_category_spending, classify_trend, Direction, Trend};
use rust_decimal::Decimal;

fn series(values: &[i64]) -> Vec<Decimal> {
    values.iter().map(|v| Decimal::from(*v)).collect()
}

#[test]
fn too_few_points_is_insufficient_data() {
    for input in [vec![], vec![Decimal::from(100)]] {
        let r = classify_trend(&input);
        assert_eq!(r.trend, Trend::InsufficientData);
        assert_eq!(r.direction, Direction::Stable);
        assert_eq!(r.change_percent, Decimal::ZERO);
    }
}

#[test]
fn flat_series_is_stable() {
    let r = classify_trend(&series(&[100, 100, 100, 100]));
    assert_eq!(r.trend, Trend::Stable);
    assert_eq!(r.change_percent, Decimal::ZERO);
}

#[test]
fn doubling_is_increasing() {
    let r = classify_trend(&series(&[100, 200]));
    assert_eq!(r.trend, Trend::Increasing);
    assert_eq!(r.direction, Direction::Up);
    assert_eq!(r.change_percent, Decimal::from(100));
}

#[test]
fn threshold_bands() {
    // +10% lands in the slight band
    let r = classify_trend(&series(&[100, 110]));
    assert_eq!(r.trend, Trend::SlightlyIncreasing);
    assert_eq!(r.direction, Direction::Up);

    // +15% is still slight; the strict band starts above it
    assert_eq!(classify_trend(&series(&[100, 115])).trend, Trend::SlightlyIncreasing);
    assert_eq!(classify_trend(&series(&[100, 116])).trend, Trend::Increasing);

    // symmetric on the way down
    assert_eq!(classify_trend(&series(&[100, 90])).trend, Trend::SlightlyDecreasing);
    assert_eq!(classify_trend(&series(&[100, 85])).trend, Trend::SlightlyDecreasing);
    assert_eq!(classify_trend(&series(&[100, 84])).trend, Trend::Decreasing);
    assert_eq!(classify_trend(&series(&[200, 100])).trend, Trend::Decreasing);

    // +-4% stays stable
    assert_eq!(classify_trend(&series(&[100, 104])).trend, Trend::Stable);
    assert_eq!(classify_trend(&series(&[100, 96])).trend, Trend::Stable);
}

#[test]
fn zero_first_half_reports_zero_change() {
    let r = classify_trend(&series(&[0, 500]));
    assert_eq!(r.change_percent, Decimal::ZERO);
    assert_eq!(r.trend, Trend::Stable);
}

#[test]
fn odd_length_splits_at_floor_midpoint() {
    // first half [100], second half [200, 300] -> +150%
    let r = classify_trend(&series(&[100, 200, 300]));
    assert_eq!(r.trend, Trend::Increasing);
    assert_eq!(r.change_percent, Decimal::from(150));
}

fn totals(pairs: &[(&str, i64)]) -> Vec<CategoryTotal> {
    pairs
        .iter()
        .map(|(name, v)| CategoryTotal {
            category: name.to_string(),
            total: Decimal::from(*v),
        })
        .collect()
}

#[test]
fn category_analysis_flags_shares() {
    let ranked = totals(&[
        ("Rent", 500),
        ("Food", 300),
        ("Transport", 100),
        ("Fun", 50),
        ("Misc", 30),
        ("Ignored", 20),
    ]);
    let analysis = analyze_category_spending(&ranked, Decimal::from(1000));
    assert_eq!(analysis.top_categories.len(), 5);

    // Rent at 50% is a warning, Food at 30% a recommendation
    assert_eq!(analysis.warnings.len(), 1);
    assert_eq!(analysis.warnings[0].category, "Rent");
    assert_eq!(analysis.recommendations.len(), 1);
    assert_eq!(analysis.recommendations[0].category, "Food");
}

#[test]
fn category_analysis_with_zero_total_is_quiet() {
    let ranked = totals(&[("Rent", 500)]);
    let analysis = analyze_category_spending(&ranked, Decimal::ZERO);
    assert_eq!(analysis.top_categories[0].percentage, Decimal::ZERO);
    assert!(analysis.warnings.is_empty());
    assert!(analysis.recommendations.is_empty());
}

#[test]
fn category_analysis_boundary_shares() {
    // exactly 40% is a recommendation, just above is a warning
    let analysis = analyze_category_spending(&totals(&[("A", 40)]), Decimal::from(100));
    assert!(analysis.warnings.is_empty());
    assert_eq!(analysis.recommendations.len(), 1);

    let analysis = analyze_category_spending(&totals(&[("A", 41)]), Decimal::from(100));
    assert_eq!(analysis.warnings.len(), 1);

    // exactly 25% is the lower edge of the recommendation band
    let analysis = analyze_category_spending(&totals(&[("A", 25)]), Decimal::from(100));
    assert_eq!(analysis.recommendations.len(), 1);
    let analysis = analyze_category_spending(&totals(&[("A", 24)]), Decimal::from(100));
    assert!(analysis.recommendations.is_empty());
}
