// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::store::Store;
use crate::utils::pretty_table;

pub fn handle(store: &Store) -> Result<()> {
    let conn = store.conn();
    let mut rows = Vec::new();

    // 1) Entries pointing at a category that no longer exists
    for table in ["transactions", "expenses"] {
        let sql = format!(
            "SELECT t.id FROM {table} t LEFT JOIN categories c ON t.category_id=c.id WHERE c.id IS NULL"
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut cur = stmt.query([])?;
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            rows.push(vec!["missing_category".into(), format!("{} #{}", table, id)]);
        }
    }

    // 2) Daily expenses whose category lost its daily subtype
    let mut stmt = conn.prepare(
        "SELECT e.id, c.name FROM expenses e JOIN categories c ON e.category_id=c.id
         WHERE c.subtype IS NULL OR c.subtype != 'daily'",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        rows.push(vec![
            "expense_category_not_daily".into(),
            format!("#{} ({})", id, name),
        ]);
    }

    // 3) Assets pointing at a missing asset category
    let mut stmt = conn.prepare(
        "SELECT a.name FROM assets a LEFT JOIN asset_categories c ON a.category_id=c.id
         WHERE c.id IS NULL",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let name: String = r.get(0)?;
        rows.push(vec!["missing_asset_category".into(), name]);
    }

    // 4) Foreign-currency entries stored without a conversion rate
    let base = store.base_currency()?;
    for table in ["transactions", "expenses"] {
        let sql = format!(
            "SELECT id, date, currency FROM {table} WHERE currency != ?1 AND fx_rate IS NULL ORDER BY date"
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut cur = stmt.query([&base])?;
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            let d: String = r.get(1)?;
            let ccy: String = r.get(2)?;
            rows.push(vec![
                "missing_fx".into(),
                format!("{} #{} {} {}", table, id, d, ccy),
            ]);
        }
    }

    // 5) Amounts that should never have been accepted
    for table in ["transactions", "expenses"] {
        let sql = format!("SELECT id, amount_original FROM {table}");
        let mut stmt = conn.prepare(&sql)?;
        let mut cur = stmt.query([])?;
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            let a: String = r.get(1)?;
            let bad = a
                .parse::<rust_decimal::Decimal>()
                .map(|d| d <= rust_decimal::Decimal::ZERO)
                .unwrap_or(true);
            if bad {
                rows.push(vec![
                    "non_positive_amount".into(),
                    format!("{} #{} '{}'", table, id, a),
                ]);
            }
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
