// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use anyhow::Result;

use crate::engine::aggregate::total_assets;
use crate::engine::validate::validate_asset;
use crate::store::Store;
use crate::utils::{amount_input_parse, fmt_ts, format_currency, maybe_print_json, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("set-amount", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let amount = amount_input_parse(sub.get_one::<String>("amount").unwrap());
            store.update_asset_amount(name, amount)?;
            println!("Updated asset '{}' to {}", name, amount);
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            store.delete_asset(name)?;
            println!("Removed asset '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let amount = amount_input_parse(sub.get_one::<String>("amount").unwrap());
    let errors = validate_asset(name, amount);
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{}", e);
        }
        return Ok(());
    }
    let category = sub.get_one::<String>("category").map(|s| s.as_str()).unwrap_or("");
    let note = sub.get_one::<String>("note").map(|s| s.as_str());
    store.create_asset(name, amount, category, note)?;
    println!("Added asset '{}' ({})", name, amount);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let assets = store.list_assets()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &assets)? {
        return Ok(());
    }
    let categories: HashMap<i64, String> = store
        .list_asset_categories()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    let rows = assets
        .iter()
        .map(|a| {
            vec![
                a.name.clone(),
                format!("{:.2}", a.amount),
                categories.get(&a.category_id).cloned().unwrap_or_default(),
                a.current_updated_date.as_ref().map(fmt_ts).unwrap_or_default(),
                a.note.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Name", "Amount", "Category", "Updated", "Note"], rows)
    );
    let base = store.base_currency()?;
    println!("Total: {}", format_currency(total_assets(&assets), &base));
    Ok(())
}
