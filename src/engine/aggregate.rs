// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Asset, AssetCategory, Category, Transaction, TxType};

#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthTotal {
    pub month: String,
    pub total: Decimal,
}

/// Aggregates recomputed on demand for the dashboard screen.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub month: String,
    pub total_assets: Decimal,
    /// Change against the last recorded total-assets snapshot; `None` when
    /// no asset carries snapshot metadata yet.
    pub assets_delta: Option<Decimal>,
    pub top_asset_categories: Vec<CategoryTotal>,
    pub summary: Summary,
    pub ytd_average_expense: Decimal,
    pub recent_expense_totals: Vec<MonthTotal>,
}

/// Canonical `YYYY-MM` bucket for a record's wall-clock date. Bucketing is
/// uniformly local-calendar: timestamps are stored as the user's wall clock
/// and the key reads those fields back.
pub fn month_key(date: &NaiveDateTime) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

fn parse_month_key(month: &str) -> Option<(i32, u32)> {
    let (y, m) = month.split_once('-')?;
    let y: i32 = y.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    if !(1..=12).contains(&m) {
        return None;
    }
    Some((y, m))
}

/// First and last instant of the month (end is 23:59:59.999).
pub fn month_bounds(month: &str) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let (y, m) = parse_month_key(month)?;
    let last_day = match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(y, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => return None,
    };
    let start = NaiveDate::from_ymd_opt(y, m, 1)?.and_hms_opt(0, 0, 0)?;
    let end = NaiveDate::from_ymd_opt(y, m, last_day)?.and_hms_milli_opt(23, 59, 59, 999)?;
    Some((start, end))
}

/// Records whose date falls inside the month; a malformed key selects
/// nothing rather than failing.
pub fn filter_by_month(records: &[Transaction], month: &str) -> Vec<Transaction> {
    match month_bounds(month) {
        Some((start, end)) => filter_by_date_range(records, start, end),
        None => Vec::new(),
    }
}

/// Inclusive on both bounds.
pub fn filter_by_date_range(
    records: &[Transaction],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<Transaction> {
    records
        .iter()
        .filter(|t| t.date >= start && t.date <= end)
        .cloned()
        .collect()
}

/// Income/expense/balance over converted amounts. Empty input is a valid
/// all-zero summary.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut s = Summary::default();
    for t in transactions {
        match t.tx_type {
            TxType::Income => s.total_income += t.amount_converted,
            TxType::Expense => s.total_expenses += t.amount_converted,
        }
    }
    s.balance = s.total_income - s.total_expenses;
    s
}

/// Newest first; same-day entries fall back to creation order (newest
/// first). Stable for fully equal keys.
pub fn sort_by_recency(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut out = transactions.to_vec();
    out.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.created_at.cmp(&a.created_at)));
    out
}

pub fn total_assets(assets: &[Asset]) -> Decimal {
    assets.iter().map(|a| a.amount).sum()
}

/// Group by category, sum, drop groups whose category no longer exists,
/// rank descending. Ties keep the first-occurrence order of the input.
fn rank_totals<I>(pairs: I, names: &HashMap<i64, &str>, n: usize) -> Vec<CategoryTotal>
where
    I: Iterator<Item = (i64, Decimal)>,
{
    let mut order: Vec<i64> = Vec::new();
    let mut totals: HashMap<i64, Decimal> = HashMap::new();
    for (id, amount) in pairs {
        if !names.contains_key(&id) {
            continue;
        }
        if let Some(t) = totals.get_mut(&id) {
            *t += amount;
        } else {
            totals.insert(id, amount);
            order.push(id);
        }
    }
    let mut ranked: Vec<CategoryTotal> = order
        .iter()
        .map(|id| CategoryTotal {
            category: names[id].to_string(),
            total: totals[id],
        })
        .collect();
    ranked.sort_by(|a, b| b.total.cmp(&a.total));
    ranked.truncate(n);
    ranked
}

pub fn top_expense_categories(
    transactions: &[Transaction],
    categories: &[Category],
    n: usize,
) -> Vec<CategoryTotal> {
    let names: HashMap<i64, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();
    rank_totals(
        transactions
            .iter()
            .filter(|t| t.tx_type == TxType::Expense)
            .map(|t| (t.category_id, t.amount_converted)),
        &names,
        n,
    )
}

pub fn top_asset_categories(
    assets: &[Asset],
    categories: &[AssetCategory],
    n: usize,
) -> Vec<CategoryTotal> {
    let names: HashMap<i64, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();
    rank_totals(assets.iter().map(|a| (a.category_id, a.amount)), &names, n)
}

/// Mean of per-month expense totals for the key's calendar year through the
/// key's month. Months without records weigh in as zero.
pub fn ytd_average_expense(transactions: &[Transaction], month: &str) -> Decimal {
    let Some((y, m)) = parse_month_key(month) else {
        return Decimal::ZERO;
    };
    let mut total = Decimal::ZERO;
    for t in transactions {
        if t.tx_type == TxType::Expense && t.date.year() == y && t.date.month() <= m {
            total += t.amount_converted;
        }
    }
    total / Decimal::from(m)
}

/// Expense totals for the `n` calendar months ending at `end_month`,
/// oldest first, zero-filled.
pub fn monthly_expense_totals(
    transactions: &[Transaction],
    end_month: &str,
    n: usize,
) -> Vec<MonthTotal> {
    let Some((mut y, mut m)) = parse_month_key(end_month) else {
        return Vec::new();
    };
    let mut keys = Vec::with_capacity(n);
    for _ in 0..n {
        keys.push(format!("{:04}-{:02}", y, m));
        if m == 1 {
            y -= 1;
            m = 12;
        } else {
            m -= 1;
        }
    }
    keys.reverse();
    keys.into_iter()
        .map(|k| {
            let total = summarize(&filter_by_month(transactions, &k)).total_expenses;
            MonthTotal { month: k, total }
        })
        .collect()
}

pub fn build_dashboard(
    transactions: &[Transaction],
    assets: &[Asset],
    asset_categories: &[AssetCategory],
    month: &str,
) -> DashboardSnapshot {
    let total = total_assets(assets);
    let assets_delta = assets
        .iter()
        .filter(|a| a.current_updated_date.is_some())
        .max_by_key(|a| a.current_updated_date)
        .and_then(|a| a.last_total_assets_value)
        .map(|prev| total - prev);
    DashboardSnapshot {
        month: month.to_string(),
        total_assets: total,
        assets_delta,
        top_asset_categories: top_asset_categories(assets, asset_categories, 3),
        summary: summarize(&filter_by_month(transactions, month)),
        ytd_average_expense: ytd_average_expense(transactions, month),
        recent_expense_totals: monthly_expense_totals(transactions, month, 3),
    }
}
