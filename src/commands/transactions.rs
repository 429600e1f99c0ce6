// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::engine::aggregate::{filter_by_month, sort_by_recency};
use crate::engine::validate::validate_entry;
use crate::models::{Transaction, TxType};
use crate::store::{EntryPatch, Store};
use crate::utils::{amount_input_parse, fmt_ts, maybe_print_json, parse_datetime, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.delete_transaction(id)?;
            println!("Deleted transaction #{}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let tx_type_s = sub.get_one::<String>("type").unwrap();
    let tx_type = TxType::parse(tx_type_s)
        .ok_or_else(|| anyhow!("Invalid type '{}', expected income|expense", tx_type_s))?;
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
    let account = sub.get_one::<String>("account").map(|s| s.as_str());
    let note = sub.get_one::<String>("note").map(|s| s.as_str());
    let attachments: Vec<String> = sub
        .get_many::<String>("attach")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();

    let id = store.create_transaction(
        tx_type,
        amount,
        &currency,
        category,
        account,
        note,
        date,
        &attachments,
    )?;
    println!(
        "Recorded {} {} {} in '{}' (#{})",
        tx_type.as_str(),
        amount,
        currency,
        category,
        id
    );
    Ok(())
}

#[derive(Serialize)]
pub struct EntryRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub currency: String,
    pub converted: String,
    pub category: String,
    pub account: String,
    pub note: String,
}

pub fn entry_rows(store: &Store, entries: &[Transaction]) -> Result<Vec<EntryRow>> {
    let categories: HashMap<i64, String> = store
        .list_categories()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    let accounts: HashMap<i64, String> = store
        .list_accounts()?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();
    Ok(entries
        .iter()
        .map(|t| EntryRow {
            id: t.id,
            date: fmt_ts(&t.date),
            kind: t.tx_type.as_str().to_string(),
            amount: format!("{:.2}", t.amount_original),
            currency: t.currency.clone(),
            converted: format!("{:.2}", t.amount_converted),
            category: categories.get(&t.category_id).cloned().unwrap_or_default(),
            account: t
                .account_id
                .and_then(|id| accounts.get(&id).cloned())
                .unwrap_or_default(),
            note: t.note.clone().unwrap_or_default(),
        })
        .collect())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let mut entries = store.list_transactions()?;
    if let Some(month) = sub.get_one::<String>("month") {
        entries = filter_by_month(&entries, month);
    }
    let mut entries = sort_by_recency(&entries);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        entries.truncate(*limit);
    }
    let data = entry_rows(store, &entries)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.currency.clone(),
                    r.converted.clone(),
                    r.category.clone(),
                    r.account.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Amount", "CCY", "Base", "Category", "Account", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

fn edit(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let patch = EntryPatch {
        amount_original: sub
            .get_one::<String>("amount")
            .map(|a| amount_input_parse(a)),
        currency: sub.get_one::<String>("currency").map(|c| c.to_uppercase()),
        category: sub.get_one::<String>("category").cloned(),
        note: sub.get_one::<String>("note").cloned(),
        date: sub
            .get_one::<String>("date")
            .map(|d| parse_datetime(d))
            .transpose()?,
    };
    if let Some(amount) = patch.amount_original {
        let errors = validate_entry(amount, "-");
        if !errors.is_empty() {
            for e in &errors {
                eprintln!("{}", e);
            }
            return Ok(());
        }
    }
    store.update_transaction(id, patch)?;
    println!("Updated transaction #{}", id);
    Ok(())
}
