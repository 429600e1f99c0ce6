// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxType;
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{anyhow, Result};

fn parse_type(s: &str) -> Result<TxType> {
    TxType::parse(s).ok_or_else(|| anyhow!("Invalid category type '{}', expected income|expense", s))
}

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let tx_type = parse_type(sub.get_one::<String>("type").unwrap())?;
            let daily = sub.get_flag("daily");
            let icon = sub.get_one::<String>("icon").unwrap();
            let color = sub.get_one::<String>("color").unwrap();
            store.create_category(name, tx_type, daily, icon, color)?;
            println!("Added {} category '{}'", tx_type.as_str(), name);
        }
        Some(("list", sub)) => {
            let categories = store.list_categories()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &categories)? {
                let rows = categories
                    .iter()
                    .map(|c| {
                        vec![
                            c.name.clone(),
                            c.tx_type.as_str().to_string(),
                            c.subtype.map(|s| s.as_str()).unwrap_or("").to_string(),
                            c.icon.clone(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Name", "Type", "Subtype", "Icon"], rows));
            }
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let tx_type = parse_type(sub.get_one::<String>("type").unwrap())?;
            store.delete_category(name, tx_type)?;
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

pub fn handle_asset(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let icon = sub.get_one::<String>("icon").unwrap();
            let color = sub.get_one::<String>("color").unwrap();
            store.create_asset_category(name, icon, color)?;
            println!("Added asset category '{}'", name);
        }
        Some(("list", sub)) => {
            let categories = store.list_asset_categories()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &categories)? {
                let rows = categories
                    .iter()
                    .map(|c| vec![c.name.clone(), c.icon.clone(), c.color.clone()])
                    .collect();
                println!("{}", pretty_table(&["Name", "Icon", "Color"], rows));
            }
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            store.delete_asset_category(name)?;
            println!("Removed asset category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
