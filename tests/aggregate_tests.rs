// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use pocketledger::engine::aggregate::{
    build_dashboard, filter_by_month, month_bounds, month_key, monthly_expense_totals,
    sort_by_recency, summarize, top_asset_categories, top_expense_categories, total_assets,
    ytd_average_expense,
};
use pocketledger::models::{Asset, AssetCategory, Category, Transaction, TxType};
use pocketledger::utils::format_currency;
use rust_decimal::Decimal;

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn tx(id: i64, tx_type: TxType, amount: &str, date: &str, category_id: i64) -> Transaction {
    Transaction {
        id,
        tx_type,
        amount_original: amount.parse().unwrap(),
        currency: "USD".into(),
        amount_converted: amount.parse().unwrap(),
        fx_rate: None,
        category_id,
        account_id: None,
        note: None,
        date: ts(date),
        created_at: ts(date),
        updated_at: ts(date),
        attachments: vec![],
    }
}

fn category(id: i64, name: &str) -> Category {
    Category {
        id,
        name: name.into(),
        tx_type: TxType::Expense,
        subtype: None,
        icon: String::new(),
        color: String::new(),
    }
}

#[test]
fn summarize_empty_is_all_zero() {
    let s = summarize(&[]);
    assert_eq!(s.total_income, Decimal::ZERO);
    assert_eq!(s.total_expenses, Decimal::ZERO);
    assert_eq!(s.balance, Decimal::ZERO);
}

#[test]
fn summarize_month_scenario() {
    let txs = vec![
        tx(1, TxType::Income, "1000", "2025-08-05 09:00:00", 1),
        tx(2, TxType::Expense, "400", "2025-08-12 18:30:00", 2),
    ];
    let s = summarize(&txs);
    assert_eq!(s.total_income, Decimal::from(1000));
    assert_eq!(s.total_expenses, Decimal::from(400));
    assert_eq!(s.balance, Decimal::from(600));
    assert_eq!(s.balance, s.total_income - s.total_expenses);
    assert_eq!(format_currency(s.balance, "USD"), "$600.00");
}

#[test]
fn month_key_uses_calendar_fields() {
    assert_eq!(month_key(&ts("2025-08-31 23:59:59")), "2025-08");
    assert_eq!(month_key(&ts("2025-01-01 00:00:00")), "2025-01");
}

#[test]
fn month_bounds_cover_whole_month() {
    let (start, end) = month_bounds("2024-02").unwrap();
    assert_eq!(start, ts("2024-02-01 00:00:00"));
    // 2024 is a leap year
    assert_eq!(end.date().to_string(), "2024-02-29");
    assert!(month_bounds("2024-13").is_none());
    assert!(month_bounds("garbage").is_none());
}

#[test]
fn filter_by_month_is_inclusive_and_idempotent() {
    let txs = vec![
        tx(1, TxType::Expense, "10", "2025-07-31 23:59:59", 1),
        tx(2, TxType::Expense, "20", "2025-08-01 00:00:00", 1),
        tx(3, TxType::Expense, "30", "2025-08-31 23:59:59", 1),
        tx(4, TxType::Expense, "40", "2025-09-01 00:00:00", 1),
    ];
    let filtered = filter_by_month(&txs, "2025-08");
    let ids: Vec<i64> = filtered.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 3]);
    let twice = filter_by_month(&filtered, "2025-08");
    assert_eq!(twice.len(), filtered.len());

    assert!(filter_by_month(&txs, "not-a-month").is_empty());
}

#[test]
fn sort_by_recency_breaks_date_ties_by_creation() {
    let mut a = tx(1, TxType::Expense, "10", "2025-08-10 12:00:00", 1);
    a.created_at = ts("2025-08-10 12:00:00");
    let mut b = tx(2, TxType::Expense, "20", "2025-08-10 12:00:00", 1);
    b.created_at = ts("2025-08-10 15:00:00");
    let c = tx(3, TxType::Expense, "30", "2025-08-11 08:00:00", 1);

    let sorted = sort_by_recency(&[a, b, c]);
    let ids: Vec<i64> = sorted.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn top_categories_drop_missing_and_keep_stable_tie_order() {
    let txs = vec![
        tx(1, TxType::Expense, "50", "2025-08-01 10:00:00", 1),
        tx(2, TxType::Expense, "50", "2025-08-02 10:00:00", 2),
        tx(3, TxType::Expense, "70", "2025-08-03 10:00:00", 3),
        // category 9 no longer exists
        tx(4, TxType::Expense, "500", "2025-08-04 10:00:00", 9),
        // income never ranks
        tx(5, TxType::Income, "900", "2025-08-05 10:00:00", 1),
    ];
    let cats = vec![category(1, "Food"), category(2, "Transport"), category(3, "Rent")];
    let ranked = top_expense_categories(&txs, &cats, 10);
    let names: Vec<&str> = ranked.iter().map(|c| c.category.as_str()).collect();
    // Rent first, then the 50/50 tie keeps first-occurrence order
    assert_eq!(names, vec!["Rent", "Food", "Transport"]);

    let top2 = top_expense_categories(&txs, &cats, 2);
    assert_eq!(top2.len(), 2);
}

#[test]
fn top_asset_categories_rank_by_value() {
    let cats = vec![
        AssetCategory { id: 1, name: "Savings".into(), icon: String::new(), color: String::new() },
        AssetCategory { id: 2, name: "Stocks".into(), icon: String::new(), color: String::new() },
    ];
    let assets = vec![
        Asset {
            id: 1,
            name: "Deposit".into(),
            amount: Decimal::from(4000),
            category_id: 1,
            note: None,
            last_updated_date: None,
            current_updated_date: None,
            last_total_assets_value: None,
        },
        Asset {
            id: 2,
            name: "Index fund".into(),
            amount: Decimal::from(9000),
            category_id: 2,
            note: None,
            last_updated_date: None,
            current_updated_date: None,
            last_total_assets_value: None,
        },
    ];
    assert_eq!(total_assets(&assets), Decimal::from(13000));
    let ranked = top_asset_categories(&assets, &cats, 3);
    assert_eq!(ranked[0].category, "Stocks");
    assert_eq!(ranked[0].total, Decimal::from(9000));
}

#[test]
fn ytd_average_zero_fills_missing_months() {
    let txs = vec![
        tx(1, TxType::Expense, "300", "2025-01-15 10:00:00", 1),
        tx(2, TxType::Expense, "100", "2025-03-10 10:00:00", 1),
        // outside the year
        tx(3, TxType::Expense, "999", "2024-12-31 10:00:00", 1),
    ];
    // (300 + 0 + 100) / 3
    let avg = ytd_average_expense(&txs, "2025-03");
    assert_eq!(format!("{:.2}", avg), "133.33");
    assert_eq!(ytd_average_expense(&txs, "bogus"), Decimal::ZERO);
}

#[test]
fn monthly_totals_cross_year_boundary() {
    let txs = vec![
        tx(1, TxType::Expense, "50", "2024-12-20 10:00:00", 1),
        tx(2, TxType::Expense, "70", "2025-01-05 10:00:00", 1),
    ];
    let totals = monthly_expense_totals(&txs, "2025-02", 3);
    let months: Vec<&str> = totals.iter().map(|mt| mt.month.as_str()).collect();
    assert_eq!(months, vec!["2024-12", "2025-01", "2025-02"]);
    assert_eq!(totals[0].total, Decimal::from(50));
    assert_eq!(totals[1].total, Decimal::from(70));
    assert_eq!(totals[2].total, Decimal::ZERO);
}

#[test]
fn dashboard_assembles_month_view() {
    let txs = vec![
        tx(1, TxType::Income, "2000", "2025-08-01 09:00:00", 1),
        tx(2, TxType::Expense, "500", "2025-08-02 09:00:00", 2),
        tx(3, TxType::Expense, "700", "2025-07-02 09:00:00", 2),
    ];
    let cats = vec![AssetCategory {
        id: 1,
        name: "Savings".into(),
        icon: String::new(),
        color: String::new(),
    }];
    let assets = vec![Asset {
        id: 1,
        name: "Deposit".into(),
        amount: Decimal::from(6000),
        category_id: 1,
        note: None,
        last_updated_date: None,
        current_updated_date: Some(ts("2025-08-01 08:00:00")),
        last_total_assets_value: Some(Decimal::from(5500)),
    }];

    let snap = build_dashboard(&txs, &assets, &cats, "2025-08");
    assert_eq!(snap.total_assets, Decimal::from(6000));
    assert_eq!(snap.assets_delta, Some(Decimal::from(500)));
    assert_eq!(snap.summary.balance, Decimal::from(1500));
    assert_eq!(snap.top_asset_categories[0].category, "Savings");
    assert_eq!(snap.recent_expense_totals.len(), 3);
    assert_eq!(
        snap.recent_expense_totals.last().unwrap().total,
        Decimal::from(500)
    );
    // (700 + 500) / 8 months elapsed
    assert_eq!(format!("{:.2}", snap.ytd_average_expense), "150.00");
}

#[test]
fn dashboard_skips_delta_without_snapshot() {
    let assets = vec![Asset {
        id: 1,
        name: "Deposit".into(),
        amount: Decimal::from(6000),
        category_id: 1,
        note: None,
        last_updated_date: None,
        current_updated_date: None,
        last_total_assets_value: None,
    }];
    let snap = build_dashboard(&[], &assets, &[], "2025-08");
    assert_eq!(snap.assets_delta, None);
    assert!(snap.top_asset_categories.is_empty());
}
