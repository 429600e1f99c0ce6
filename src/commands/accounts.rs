// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::AccountKind;
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{anyhow, Result};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let kind_s = sub.get_one::<String>("type").unwrap();
            let kind = AccountKind::parse(kind_s)
                .ok_or_else(|| anyhow!("Invalid account type '{}', expected cash|bank|card", kind_s))?;
            store.create_account(name, kind)?;
            println!("Added account '{}' ({})", name, kind.as_str());
        }
        Some(("list", sub)) => {
            let accounts = store.list_accounts()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &accounts)? {
                let rows = accounts
                    .iter()
                    .map(|a| vec![a.name.clone(), a.kind.as_str().to_string()])
                    .collect();
                println!("{}", pretty_table(&["Name", "Type"], rows));
            }
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            store.delete_account(name)?;
            println!("Removed account '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
