// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use numfmt::{Formatter, Precision};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

pub const TS_FMT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD HH:MM`, or a bare date
/// (midnight). Entry timestamps are wall-clock local time.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, TS_FMT) {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Ok(dt);
    }
    let date = parse_date(s)?;
    date.and_hms_opt(0, 0, 0)
        .with_context(|| format!("Invalid datetime '{}'", s))
}

pub fn fmt_ts(dt: &NaiveDateTime) -> String {
    dt.format(TS_FMT).to_string()
}

pub fn parse_ts(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TS_FMT)
        .with_context(|| format!("Invalid stored timestamp '{}'", s))
}

pub fn now_local() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub fn parse_month(s: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

static AMOUNT_CLEANUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9.]").expect("amount cleanup pattern"));

/// Normalize free-form currency text entry into a decimal.
///
/// Strips everything except digits and dots, keeps only the first dot,
/// truncates the fraction to 2 digits, and falls back to zero when nothing
/// parseable remains. Partial input such as a trailing dot is accepted.
pub fn amount_input_parse(text: &str) -> Decimal {
    let cleaned = AMOUNT_CLEANUP.replace_all(text, "");
    let (int_part, frac_part) = match cleaned.find('.') {
        Some(idx) => {
            let (head, tail) = cleaned.split_at(idx);
            let frac: String = tail[1..].chars().filter(|c| *c != '.').collect();
            (head.to_string(), frac)
        }
        None => (cleaned.to_string(), String::new()),
    };
    let mut frac_part = frac_part;
    frac_part.truncate(2);
    let candidate = if frac_part.is_empty() {
        int_part
    } else if int_part.is_empty() {
        format!("0.{}", frac_part)
    } else {
        format!("{}.{}", int_part, frac_part)
    };
    candidate.parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

fn currency_symbol(code: &str) -> String {
    match code {
        "USD" => "$".to_string(),
        "EUR" => "\u{20ac}".to_string(),
        "GBP" => "\u{a3}".to_string(),
        "JPY" => "\u{a5}".to_string(),
        "KRW" => "\u{20a9}".to_string(),
        "INR" => "\u{20b9}".to_string(),
        other => format!("{} ", other),
    }
}

/// Render an amount as a grouped, 2-fraction-digit currency string,
/// e.g. `format_currency(Decimal::from(600), "USD")` -> `"$600.00"`.
pub fn format_currency(amount: Decimal, code: &str) -> String {
    let symbol = currency_symbol(code);
    if amount.is_zero() {
        // numfmt hardcodes zero as "0", so spell out the zero string
        return format!("{}0.00", symbol);
    }
    let prefix = if amount.is_sign_negative() {
        format!("-{}", symbol)
    } else {
        symbol
    };
    let value = amount.abs().to_f64().unwrap_or(0.0);
    let fmt = match Formatter::currency(&prefix) {
        Ok(f) => f.precision(Precision::Decimals(2)),
        Err(_) => return format!("{}{:.2}", prefix, amount.abs()),
    };
    let mut out = fmt.fmt_string(value);
    // numfmt omits the last trailing zero ("12.30" is rendered as "12.3")
    if out.len() >= 3 && out.as_bytes()[out.len() - 3] != b'.' {
        out.push('0');
    }
    out
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
