// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use pocketledger::db;
use pocketledger::models::{AccountKind, TxType};
use pocketledger::store::{EntryPatch, Store};
use rust_decimal::Decimal;

fn setup() -> Store {
    let store = Store::new(db::open_in_memory().unwrap());
    store.set_base_currency("USD").unwrap();
    store
}

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

#[test]
fn duplicate_category_names_refused_per_type() {
    let store = setup();
    store
        .create_category("Food", TxType::Expense, true, "", "")
        .unwrap();
    // case-insensitive within the same type
    let err = store
        .create_category("food", TxType::Expense, false, "", "")
        .unwrap_err();
    assert!(err.to_string().contains("already exists"));
    // the same name under the other type is a different category
    store
        .create_category("Food", TxType::Income, false, "", "")
        .unwrap();
    assert_eq!(store.list_categories().unwrap().len(), 2);
}

#[test]
fn category_deletion_refused_while_referenced() {
    let store = setup();
    store
        .create_category("Food", TxType::Expense, true, "", "")
        .unwrap();
    let id = store
        .create_transaction(
            TxType::Expense,
            Decimal::from(20),
            "USD",
            "Food",
            None,
            None,
            ts("2025-08-10 12:00:00"),
            &[],
        )
        .unwrap();

    let err = store.delete_category("Food", TxType::Expense).unwrap_err();
    assert!(err.to_string().contains("still referenced"));
    assert_eq!(store.list_categories().unwrap().len(), 1);

    store.delete_transaction(id).unwrap();
    store.delete_category("Food", TxType::Expense).unwrap();
    assert!(store.list_categories().unwrap().is_empty());
}

#[test]
fn asset_category_deletion_refused_while_asset_references_it() {
    let store = setup();
    store.create_asset_category("Savings", "", "").unwrap();
    store
        .create_asset("Deposit", Decimal::from(5000), "Savings", None)
        .unwrap();

    let err = store.delete_asset_category("Savings").unwrap_err();
    assert!(err.to_string().contains("still referenced"));
    // collection unchanged
    assert_eq!(store.list_asset_categories().unwrap().len(), 1);
    assert_eq!(store.list_assets().unwrap().len(), 1);

    store.delete_asset("Deposit").unwrap();
    store.delete_asset_category("Savings").unwrap();
}

#[test]
fn daily_expenses_require_a_daily_category() {
    let store = setup();
    store
        .create_category("Rent", TxType::Expense, false, "", "")
        .unwrap();
    store
        .create_category("Snacks", TxType::Expense, true, "", "")
        .unwrap();

    let err = store
        .create_expense(
            Decimal::from(12),
            "USD",
            "Rent",
            None,
            ts("2025-08-03 09:00:00"),
        )
        .unwrap_err();
    assert!(err.to_string().contains("not a daily"));

    store
        .create_expense(
            Decimal::from(12),
            "USD",
            "Snacks",
            None,
            ts("2025-08-03 09:00:00"),
        )
        .unwrap();
    assert_eq!(store.list_expenses().unwrap().len(), 1);
}

#[test]
fn transactions_reject_category_of_wrong_kind() {
    let store = setup();
    store
        .create_category("Salary", TxType::Income, false, "", "")
        .unwrap();
    let err = store
        .create_transaction(
            TxType::Expense,
            Decimal::from(10),
            "USD",
            "Salary",
            None,
            None,
            ts("2025-08-01 08:00:00"),
            &[],
        )
        .unwrap_err();
    assert!(err.to_string().contains("not an expense category"));
}

#[test]
fn entry_conversion_derived_from_fx_rates() {
    let store = setup();
    store
        .create_category("Travel", TxType::Expense, false, "", "")
        .unwrap();
    store
        .insert_fx_rate(
            "2025-08-01".parse().unwrap(),
            "USD",
            "EUR",
            "0.90",
        )
        .unwrap();

    // 9 EUR on a later date uses the closest on-or-before rate: 10 USD
    store
        .create_transaction(
            TxType::Expense,
            Decimal::from(9),
            "EUR",
            "Travel",
            None,
            None,
            ts("2025-08-10 12:00:00"),
            &[],
        )
        .unwrap();
    let tx = &store.list_transactions().unwrap()[0];
    assert_eq!(format!("{:.2}", tx.amount_converted), "10.00");
    assert_eq!(format!("{:.4}", tx.fx_rate.unwrap()), "1.1111");

    // base-currency entries carry no rate
    store
        .create_transaction(
            TxType::Expense,
            Decimal::from(5),
            "USD",
            "Travel",
            None,
            None,
            ts("2025-08-11 12:00:00"),
            &[],
        )
        .unwrap();
    let txs = store.list_transactions().unwrap();
    let usd = txs.iter().find(|t| t.currency == "USD").unwrap();
    assert_eq!(usd.fx_rate, None);
    assert_eq!(usd.amount_converted, Decimal::from(5));
}

#[test]
fn expense_range_listing_is_inclusive() {
    let store = setup();
    store
        .create_category("Snacks", TxType::Expense, true, "", "")
        .unwrap();
    for (i, date) in [
        "2025-08-01 00:00:00",
        "2025-08-05 12:00:00",
        "2025-08-09 23:59:59",
        "2025-08-10 00:00:00",
    ]
    .iter()
    .enumerate()
    {
        store
            .create_expense(
                Decimal::from(i as i64 + 1),
                "USD",
                "Snacks",
                None,
                ts(date),
            )
            .unwrap();
    }
    let hits = store
        .list_expenses_by_date_range(ts("2025-08-01 00:00:00"), ts("2025-08-09 23:59:59"))
        .unwrap();
    assert_eq!(hits.len(), 3);
}

#[test]
fn asset_amount_update_rolls_snapshot() {
    let store = setup();
    store.create_asset_category("Savings", "", "").unwrap();
    store
        .create_asset("Deposit", Decimal::from(100), "Savings", None)
        .unwrap();
    store
        .create_asset("Fund", Decimal::from(50), "Savings", None)
        .unwrap();

    store
        .update_asset_amount("Deposit", Decimal::from(120))
        .unwrap();
    let assets = store.list_assets().unwrap();
    let deposit = assets.iter().find(|a| a.name == "Deposit").unwrap();
    assert_eq!(deposit.amount, Decimal::from(120));
    assert_eq!(deposit.last_total_assets_value, Some(Decimal::from(150)));
    assert!(deposit.current_updated_date.is_some());
    assert_eq!(deposit.last_updated_date, None);

    let first_update = deposit.current_updated_date;
    store
        .update_asset_amount("Deposit", Decimal::from(130))
        .unwrap();
    let assets = store.list_assets().unwrap();
    let deposit = assets.iter().find(|a| a.name == "Deposit").unwrap();
    assert_eq!(deposit.last_updated_date, first_update);
    assert_eq!(deposit.last_total_assets_value, Some(Decimal::from(170)));
}

#[test]
fn account_removal_unlinks_transactions() {
    let store = setup();
    store.create_account("Wallet", AccountKind::Cash).unwrap();
    store
        .create_category("Food", TxType::Expense, false, "", "")
        .unwrap();
    store
        .create_transaction(
            TxType::Expense,
            Decimal::from(10),
            "USD",
            "Food",
            Some("Wallet"),
            None,
            ts("2025-08-02 10:00:00"),
            &[],
        )
        .unwrap();
    assert!(store.list_transactions().unwrap()[0].account_id.is_some());

    store.delete_account("Wallet").unwrap();
    let txs = store.list_transactions().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].account_id, None);
}

#[test]
fn transaction_patch_rederives_conversion() {
    let store = setup();
    store
        .create_category("Travel", TxType::Expense, false, "", "")
        .unwrap();
    store
        .insert_fx_rate("2025-08-01".parse().unwrap(), "USD", "EUR", "0.90")
        .unwrap();
    let id = store
        .create_transaction(
            TxType::Expense,
            Decimal::from(5),
            "USD",
            "Travel",
            None,
            Some("lunch"),
            ts("2025-08-10 12:00:00"),
            &[],
        )
        .unwrap();

    store
        .update_transaction(
            id,
            EntryPatch {
                amount_original: Some(Decimal::from(9)),
                currency: Some("EUR".into()),
                ..Default::default()
            },
        )
        .unwrap();
    let tx = &store.list_transactions().unwrap()[0];
    assert_eq!(format!("{:.2}", tx.amount_converted), "10.00");
    assert_eq!(tx.currency, "EUR");
    // untouched fields survive the patch
    assert_eq!(tx.note.as_deref(), Some("lunch"));
    assert!(tx.updated_at >= tx.created_at);
}

#[test]
fn deleting_unknown_records_errors() {
    let store = setup();
    assert!(store.delete_transaction(42).is_err());
    assert!(store.delete_expense(42).is_err());
    assert!(store.delete_asset("nope").is_err());
}
