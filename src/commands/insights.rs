// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::advice::{generate_advice, AdviceInput};
use crate::engine::aggregate::{
    filter_by_month, month_key, monthly_expense_totals, summarize, top_expense_categories,
    total_assets, MonthTotal,
};
use crate::engine::health::{emergency_fund_months, health_score, savings_rate, HealthInput};
use crate::engine::trend::{analyze_category_spending, classify_trend, TrendReport};
use crate::store::Store;
use crate::utils::{format_currency, maybe_print_json, now_local, parse_month, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("trend", sub)) => trend(store, sub)?,
        Some(("health", sub)) => health(store, sub)?,
        Some(("advice", sub)) => advice(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn month_arg(sub: &clap::ArgMatches) -> Result<String> {
    match sub.get_one::<String>("month") {
        Some(m) => parse_month(m),
        None => Ok(month_key(&now_local())),
    }
}

#[derive(Serialize)]
struct TrendView {
    months: Vec<MonthTotal>,
    report: TrendReport,
}

fn trend(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&6);
    let records = if sub.get_flag("daily") {
        store.list_expenses()?
    } else {
        store.list_transactions()?
    };
    let end_month = month_key(&now_local());
    let totals = monthly_expense_totals(&records, &end_month, months);
    let series: Vec<Decimal> = totals.iter().map(|mt| mt.total).collect();
    let report = classify_trend(&series);

    let view = TrendView {
        months: totals,
        report,
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        return Ok(());
    }
    let rows = view
        .months
        .iter()
        .map(|mt| vec![mt.month.clone(), format!("{:.2}", mt.total)])
        .collect();
    println!("{}", pretty_table(&["Month", "Spent"], rows));
    println!(
        "Trend: {} ({}), change {:.1}%",
        view.report.trend.as_str(),
        view.report.direction.as_str(),
        view.report.change_percent
    );
    Ok(())
}

fn health(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let txs = store.list_transactions()?;
    let assets = store.list_assets()?;

    let summary = summarize(&filter_by_month(&txs, &month));
    let assets_total = total_assets(&assets);
    let input = HealthInput {
        total_assets: assets_total,
        monthly_income: summary.total_income,
        monthly_expenses: summary.total_expenses,
        savings_rate: savings_rate(&summary),
        emergency_fund_months: emergency_fund_months(assets_total, summary.total_expenses),
    };
    let report = health_score(&input);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let rows = report
        .factors
        .iter()
        .map(|f| {
            vec![
                f.name.to_string(),
                format!("{}/{}", f.score, f.max),
                f.status.clone(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Factor", "Score", "Status"], rows));
    println!(
        "Financial health for {}: {}/100 ({})",
        month,
        report.score,
        report.status.as_str()
    );
    Ok(())
}

fn advice(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let trend_months: usize = *sub.get_one::<usize>("months").unwrap_or(&6);
    let txs = store.list_transactions()?;
    let assets = store.list_assets()?;
    let categories = store.list_categories()?;
    let base = store.base_currency()?;

    let month_txs = filter_by_month(&txs, &month);
    let summary = summarize(&month_txs);
    let assets_total = total_assets(&assets);

    let ranked = top_expense_categories(&month_txs, &categories, 5);
    let analysis = analyze_category_spending(&ranked, summary.total_expenses);

    let series: Vec<Decimal> = monthly_expense_totals(&txs, &month, trend_months)
        .iter()
        .map(|mt| mt.total)
        .collect();
    let trend = classify_trend(&series);

    let input = AdviceInput {
        currency: &base,
        savings_rate: savings_rate(&summary),
        emergency_fund_months: emergency_fund_months(assets_total, summary.total_expenses),
        monthly_income: summary.total_income,
        monthly_expenses: summary.total_expenses,
        total_assets: assets_total,
        trend: trend.trend,
        category_warnings: &analysis.warnings,
        ytd_average_expense: crate::engine::aggregate::ytd_average_expense(&txs, &month),
    };
    let items = generate_advice(&input);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        return Ok(());
    }
    if items.is_empty() {
        println!("No advice for {}; not enough recorded activity.", month);
        return Ok(());
    }
    for item in &items {
        println!(
            "[{}] ({}) {}\n    {}\n    Next step: {}",
            item.priority,
            item.kind.as_str(),
            item.title,
            item.message,
            item.action
        );
    }
    if !analysis.recommendations.is_empty() {
        println!();
        for r in &analysis.recommendations {
            println!(
                "Worth watching: {} at {:.0}% of spending ({})",
                r.category,
                r.percentage,
                format_currency(r.total, &base)
            );
        }
    }
    Ok(())
}
