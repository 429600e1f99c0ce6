// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use serde::Deserialize;

use crate::store::Store;
use crate::utils::{amount_input_parse, parse_date, pretty_table};

const UA: &str = concat!(
    "pocketledger/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/pocketledger/pocketledger)"
);

fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-base", sub)) => {
            let ccy = sub.get_one::<String>("currency").unwrap().to_uppercase();
            store.set_base_currency(&ccy)?;
            println!("Base currency set to {}", ccy);
        }
        Some(("fetch", sub)) => {
            let days: usize = *sub.get_one::<usize>("days").unwrap_or(&120);
            fetch_rates(store, days)?;
        }
        Some(("list", _)) => list_rates(store)?,
        Some(("convert", sub)) => convert_amount(store, sub)?,
        _ => {}
    }
    Ok(())
}

/// Currencies seen on stored records, base excluded.
fn distinct_currencies(store: &Store) -> Result<Vec<String>> {
    let mut out = Vec::<String>::new();
    for sql in [
        "SELECT DISTINCT currency FROM transactions",
        "SELECT DISTINCT currency FROM expenses",
    ] {
        let mut stmt = store.conn().prepare(sql)?;
        let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
        for row in rows {
            let c: String = row?;
            if !c.is_empty() && !out.contains(&c) {
                out.push(c);
            }
        }
    }
    Ok(out)
}

#[derive(Debug, Deserialize)]
struct Series {
    rates: std::collections::HashMap<String, std::collections::HashMap<String, f64>>,
    #[serde(rename = "base")]
    _base: String,
}

fn fetch_rates(store: &Store, days: usize) -> Result<()> {
    let base = store.base_currency()?;
    let today = Utc::now().date_naive();
    let start = today - chrono::Duration::days(days as i64);
    let ccy_list = distinct_currencies(store)?;
    let targets: Vec<String> = ccy_list.into_iter().filter(|c| c != &base).collect();
    if targets.is_empty() {
        println!("No non-base currencies found; nothing to fetch.");
        return Ok(());
    }
    let to_param = targets.join(",");
    let url = format!("https://api.frankfurter.dev/{start}..{today}?from={base}&to={to_param}");
    let client = http_client()?;
    let resp = client.get(url).send()?.error_for_status()?;
    let s: Series = resp.json()?;
    for (date, mp) in s.rates {
        let date = parse_date(&date)?;
        for (quote, rate) in mp {
            store.insert_fx_rate(date, &base, &quote, &rate.to_string())?;
        }
    }
    println!("FX rates fetched via Frankfurter (ECB).");
    Ok(())
}

fn list_rates(store: &Store) -> Result<()> {
    let mut stmt = store.conn().prepare(
        "SELECT date, base, quote, rate FROM fx_rates ORDER BY date DESC, base, quote LIMIT 50",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (d, b, q, r) = row?;
        data.push(vec![d, b, q, r]);
    }
    println!("{}", pretty_table(&["Date", "Base", "Quote", "Rate"], data));
    Ok(())
}

fn convert_amount(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let amount = amount_input_parse(sub.get_one::<String>("amount").unwrap());
    let from = sub.get_one::<String>("from").unwrap().to_uppercase();
    let (converted, rate) = store.convert_to_base(date, amount, &from)?;
    let base = store.base_currency()?;
    match rate {
        Some(r) => println!("{} {} -> {:.4} {} (rate {:.6})", amount, from, converted, base, r),
        None => println!("{} {} -> {:.4} {}", amount, from, converted, base),
    }
    Ok(())
}
