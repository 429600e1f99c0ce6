// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::engine::aggregate::{filter_by_month, sort_by_recency};
use crate::engine::validate::validate_entry;
use crate::store::Store;
use crate::utils::{amount_input_parse, maybe_print_json, parse_date, parse_datetime, pretty_table};

use super::transactions::entry_rows;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.delete_expense(id)?;
            println!("Deleted expense #{}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let amount = amount_input_parse(sub.get_one::<String>("amount").unwrap());
    let category = sub.get_one::<String>("category").map(|s| s.as_str()).unwrap_or("");

    let errors = validate_entry(amount, category);
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{}", e);
        }
        return Ok(());
    }

    let currency = match sub.get_one::<String>("currency") {
        Some(c) => c.to_uppercase(),
        None => store.base_currency()?,
    };
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_datetime(d)?,
        None => crate::utils::now_local(),
    };
    let note = sub.get_one::<String>("note").map(|s| s.as_str());

    let id = store.create_expense(amount, &currency, category, note, date)?;
    println!("Recorded expense {} {} in '{}' (#{})", amount, currency, category, id);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let from = sub.get_one::<String>("from");
    let to = sub.get_one::<String>("to");
    let entries = match (from, to) {
        // Push the range down to the store when both bounds are given.
        (Some(f), Some(t)) => {
            let start = parse_date(f)?
                .and_hms_opt(0, 0, 0)
                .context("Invalid range start")?;
            let end = parse_date(t)?
                .and_hms_milli_opt(23, 59, 59, 999)
                .context("Invalid range end")?;
            store.list_expenses_by_date_range(start, end)?
        }
        _ => {
            let mut entries = store.list_expenses()?;
            if let Some(month) = sub.get_one::<String>("month") {
                entries = filter_by_month(&entries, month);
            }
            entries
        }
    };
    let data = entry_rows(store, &sort_by_recency(&entries))?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.amount.clone(),
                    r.currency.clone(),
                    r.converted.clone(),
                    r.category.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Amount", "CCY", "Base", "Category", "Note"],
                rows,
            )
        );
    }
    Ok(())
}
