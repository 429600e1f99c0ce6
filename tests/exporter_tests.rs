// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use pocketledger::models::TxType;
use pocketledger::store::Store;
use pocketledger::{cli, commands::exporter, db};
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::tempdir;

fn setup() -> Store {
    let store = Store::new(db::open_in_memory().unwrap());
    store.set_base_currency("USD").unwrap();
    store
        .create_category("Groceries", TxType::Expense, false, "", "")
        .unwrap();
    store
        .create_transaction(
            TxType::Expense,
            "12.34".parse::<Decimal>().unwrap(),
            "USD",
            "Groceries",
            None,
            Some("Weekly run"),
            NaiveDateTime::parse_from_str("2025-01-02 09:30:00", "%Y-%m-%d %H:%M:%S").unwrap(),
            &[],
        )
        .unwrap();
    store
}

#[test]
fn export_transactions_streams_pretty_json() {
    let store = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "pocketledger",
        "export",
        "transactions",
        "--format",
        "json",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&store, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "date": "2025-01-02 09:30:00",
                "type": "expense",
                "amount": "12.34",
                "currency": "USD",
                "converted": "12.34",
                "category": "Groceries",
                "account": "",
                "note": "Weekly run"
            }
        ])
    );
}

#[test]
fn export_writes_csv_with_headers() {
    let store = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "pocketledger",
        "export",
        "transactions",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&store, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "date,type,amount,currency,converted,category,account,note"
    );
    assert!(lines.next().unwrap().contains("Groceries"));
}

#[test]
fn export_rejects_unknown_format() {
    let store = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "pocketledger",
        "export",
        "expenses",
        "--format",
        "xml",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(exporter::handle(&store, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out_path.exists());
}
