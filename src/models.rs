// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a balance-sheet entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<TxType> {
        match s {
            "income" => Some(TxType::Income),
            "expense" => Some(TxType::Expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Cash,
    Bank,
    Card,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Cash => "cash",
            AccountKind::Bank => "bank",
            AccountKind::Card => "card",
        }
    }

    pub fn parse(s: &str) -> Option<AccountKind> {
        match s {
            "cash" => Some(AccountKind::Cash),
            "bank" => Some(AccountKind::Bank),
            "card" => Some(AccountKind::Card),
            _ => None,
        }
    }
}

/// Marks a category as usable by the daily expense tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategorySubtype {
    Daily,
}

impl CategorySubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategorySubtype::Daily => "daily",
        }
    }

    pub fn parse(s: &str) -> Option<CategorySubtype> {
        match s {
            "daily" => Some(CategorySubtype::Daily),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub kind: AccountKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub tx_type: TxType,
    pub subtype: Option<CategorySubtype>,
    pub icon: String,
    pub color: String,
}

/// Category set scoped to assets only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetCategory {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub color: String,
}

/// A balance-sheet entry. Rows of the daily `expenses` collection share this
/// shape with `tx_type` fixed to `Expense`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub tx_type: TxType,
    /// Entered amount in `currency`; always positive.
    pub amount_original: Decimal,
    pub currency: String,
    /// `amount_original` converted to the base currency at entry time.
    pub amount_converted: Decimal,
    /// Rate used for the conversion; `None` when entered in the base currency.
    pub fx_rate: Option<Decimal>,
    pub category_id: i64,
    pub account_id: Option<i64>,
    pub note: Option<String>,
    /// Wall-clock time of the entry; drives month bucketing.
    pub date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub attachments: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub category_id: i64,
    pub note: Option<String>,
    /// Snapshot metadata rolled on amount updates; all-`None` means no prior
    /// snapshot and period-over-period delta reporting is skipped.
    pub last_updated_date: Option<NaiveDateTime>,
    pub current_updated_date: Option<NaiveDateTime>,
    pub last_total_assets_value: Option<Decimal>,
}
