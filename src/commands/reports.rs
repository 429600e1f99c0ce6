// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use anyhow::Result;
use rust_decimal::Decimal;

use crate::engine::aggregate::{
    build_dashboard, filter_by_month, month_key, summarize, top_expense_categories,
};
use crate::store::Store;
use crate::utils::{format_currency, maybe_print_json, now_local, parse_month, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub)?,
        Some(("cashflow", sub)) => cashflow(store, sub)?,
        Some(("top-categories", sub)) => top_categories(store, sub)?,
        Some(("dashboard", sub)) => dashboard(store, sub)?,
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

fn summary(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let txs = store.list_transactions()?;
    let s = summarize(&filter_by_month(&txs, &month));
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let base = store.base_currency()?;
    let rows = vec![
        vec!["Income".to_string(), format_currency(s.total_income, &base)],
        vec![
            "Expenses".to_string(),
            format_currency(s.total_expenses, &base),
        ],
        vec!["Balance".to_string(), format_currency(s.balance, &base)],
    ];
    println!("{}", pretty_table(&[month.as_str(), ""], rows));
    Ok(())
}

fn cashflow(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&12);
    let txs = store.list_transactions()?;

    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for t in &txs {
        let s = map.entry(month_key(&t.date)).or_default();
        match t.tx_type {
            crate::models::TxType::Income => s.0 += t.amount_converted,
            crate::models::TxType::Expense => s.1 += t.amount_converted,
        }
    }
    let mut data = Vec::new();
    for (m, (inc, exp)) in map.iter().rev().take(months) {
        data.push(vec![
            m.clone(),
            format!("{:.2}", inc),
            format!("{:.2}", exp),
        ]);
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!("{}", pretty_table(&["Month", "Income", "Expense"], data));
    }
    Ok(())
}

fn top_categories(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let limit: usize = *sub.get_one::<usize>("limit").unwrap_or(&5);
    let records = if sub.get_flag("daily") {
        store.list_expenses()?
    } else {
        store.list_transactions()?
    };
    let categories = store.list_categories()?;
    let ranked = top_expense_categories(&filter_by_month(&records, &month), &categories, limit);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &ranked)? {
        return Ok(());
    }
    let base = store.base_currency()?;
    let rows = ranked
        .iter()
        .map(|ct| vec![ct.category.clone(), format_currency(ct.total, &base)])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent"], rows));
    Ok(())
}

fn dashboard(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let txs = store.list_transactions()?;
    let assets = store.list_assets()?;
    let asset_categories = store.list_asset_categories()?;
    let snapshot = build_dashboard(&txs, &assets, &asset_categories, &month);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &snapshot)? {
        return Ok(());
    }
    let base = store.base_currency()?;

    match snapshot.assets_delta {
        Some(delta) => println!(
            "Total assets: {} ({}{} since last update)",
            format_currency(snapshot.total_assets, &base),
            if delta >= Decimal::ZERO { "+" } else { "" },
            format_currency(delta, &base)
        ),
        None => println!(
            "Total assets: {}",
            format_currency(snapshot.total_assets, &base)
        ),
    }

    if !snapshot.top_asset_categories.is_empty() {
        let rows = snapshot
            .top_asset_categories
            .iter()
            .map(|ct| vec![ct.category.clone(), format_currency(ct.total, &base)])
            .collect();
        println!("{}", pretty_table(&["Asset category", "Value"], rows));
    }

    let s = &snapshot.summary;
    println!(
        "{}: income {}, expenses {}, balance {}",
        snapshot.month,
        format_currency(s.total_income, &base),
        format_currency(s.total_expenses, &base),
        format_currency(s.balance, &base)
    );
    println!(
        "Average monthly spend this year: {}",
        format_currency(snapshot.ytd_average_expense, &base)
    );

    let rows = snapshot
        .recent_expense_totals
        .iter()
        .map(|mt| vec![mt.month.clone(), format_currency(mt.total, &base)])
        .collect();
    println!("{}", pretty_table(&["Month", "Spent"], rows));
    Ok(())
}
