// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::json;

use crate::store::Store;
use crate::utils::fmt_ts;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export(store, sub, false),
        Some(("expenses", sub)) => export(store, sub, true),
        _ => Ok(()),
    }
}

fn export(store: &Store, sub: &clap::ArgMatches, daily: bool) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let entries = if daily {
        store.list_expenses()?
    } else {
        store.list_transactions()?
    };
    let rows = super::transactions::entry_rows(store, &entries)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date",
                "type",
                "amount",
                "currency",
                "converted",
                "category",
                "account",
                "note",
            ])?;
            for (r, t) in rows.iter().zip(entries.iter()) {
                wtr.write_record([
                    fmt_ts(&t.date),
                    r.kind.clone(),
                    t.amount_original.to_string(),
                    r.currency.clone(),
                    t.amount_converted.to_string(),
                    r.category.clone(),
                    r.account.clone(),
                    r.note.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for (r, t) in rows.iter().zip(entries.iter()) {
                items.push(json!({
                    "date": fmt_ts(&t.date),
                    "type": r.kind,
                    "amount": t.amount_original.to_string(),
                    "currency": r.currency,
                    "converted": t.amount_converted.to_string(),
                    "category": r.category,
                    "account": r.account,
                    "note": r.note,
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => anyhow::bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!(
        "Exported {} to {}",
        if daily { "expenses" } else { "transactions" },
        out
    );
    Ok(())
}
