// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    Account, AccountKind, Asset, AssetCategory, Category, CategorySubtype, Transaction, TxType,
};
use crate::utils::{fmt_ts, now_local, parse_ts};

/// Refusal results surfaced to the user as messages, never as panics.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("category '{0}' already exists")]
    DuplicateCategory(String),
    #[error("asset category '{0}' already exists")]
    DuplicateAssetCategory(String),
    #[error("category '{name}' is still referenced by {count} record(s)")]
    CategoryInUse { name: String, count: i64 },
    #[error("asset category '{name}' is still referenced by {count} asset(s)")]
    AssetCategoryInUse { name: String, count: i64 },
    #[error("category '{0}' not found")]
    CategoryNotFound(String),
    #[error("asset category '{0}' not found")]
    AssetCategoryNotFound(String),
    #[error("account '{0}' not found")]
    AccountNotFound(String),
    #[error("'{0}' is not a daily expense category")]
    NotDailyCategory(String),
    #[error("category '{name}' is not an {expected} category")]
    WrongCategoryKind { name: String, expected: &'static str },
    #[error("entry {0} not found")]
    EntryNotFound(i64),
    #[error("asset '{0}' not found")]
    AssetNotFound(String),
}

/// Partial-field update for a balance-sheet entry; `None` leaves a field
/// untouched. Conversion is re-derived from the merged row.
#[derive(Debug, Default)]
pub struct EntryPatch {
    pub amount_original: Option<Decimal>,
    pub currency: Option<String>,
    pub category: Option<String>,
    pub note: Option<String>,
    pub date: Option<NaiveDateTime>,
}

/// The record store: owns the SQLite connection and every collection.
/// Commands receive it by reference; nothing in the crate holds record
/// state outside of it.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn new(conn: Connection) -> Self {
        Store { conn }
    }

    pub fn open_default() -> Result<Self> {
        Ok(Store::new(crate::db::open_or_init()?))
    }

    /// Raw connection handle for maintenance queries (doctor, fx fetch).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // ----- settings -----------------------------------------------------

    pub fn base_currency(&self) -> Result<String> {
        let v: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key='base_currency'",
                [],
                |r| r.get(0),
            )
            .optional()?;
        Ok(v.unwrap_or_else(|| "USD".to_string()))
    }

    pub fn set_base_currency(&self, ccy: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES('base_currency', ?1)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![ccy],
        )?;
        Ok(())
    }

    // ----- fx -----------------------------------------------------------

    pub fn insert_fx_rate(&self, date: NaiveDate, base: &str, quote: &str, rate: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO fx_rates(date, base, quote, rate) VALUES (?1, ?2, ?3, ?4)",
            params![date.to_string(), base, quote, rate],
        )?;
        Ok(())
    }

    fn find_rate(&self, date: NaiveDate, base: &str, quote: &str) -> Result<Option<Decimal>> {
        let mut stmt = self.conn.prepare(
            "SELECT rate FROM fx_rates WHERE base=?1 AND quote=?2 AND date<=?3 ORDER BY date DESC LIMIT 1",
        )?;
        let r: Option<String> = stmt
            .query_row(params![base, quote, date.to_string()], |r| r.get(0))
            .optional()?;
        match r {
            Some(s) => {
                let d = s
                    .parse::<Decimal>()
                    .with_context(|| format!("Invalid rate '{}' for {}/{}", s, base, quote))?;
                Ok(Some(d))
            }
            None => Ok(None),
        }
    }

    /// Convert an amount to the base currency using the closest on-or-before
    /// rate. Returns the converted amount and the effective to-base rate;
    /// the rate is `None` when the amount is already in base. Without rate
    /// coverage the amount passes through unconverted (`doctor` flags this).
    pub fn convert_to_base(
        &self,
        date: NaiveDate,
        amount: Decimal,
        ccy: &str,
    ) -> Result<(Decimal, Option<Decimal>)> {
        let base = self.base_currency()?;
        if ccy == base {
            return Ok((amount, None));
        }
        // Rates are stored base->quote (1 base = rate quote).
        if let Some(rate) = self.find_rate(date, &base, ccy)? {
            if !rate.is_zero() {
                return Ok((amount / rate, Some(Decimal::ONE / rate)));
            }
        }
        // Reciprocal pair stored directly.
        if let Some(rate) = self.find_rate(date, ccy, &base)? {
            return Ok((amount * rate, Some(rate)));
        }
        Ok((amount, None))
    }

    // ----- accounts -----------------------------------------------------

    pub fn create_account(&self, name: &str, kind: AccountKind) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO accounts(name, kind) VALUES (?1, ?2)",
            params![name, kind.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_accounts(&self) -> Result<Vec<Account>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, kind FROM accounts ORDER BY name")?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let id: i64 = r.get(0)?;
            let name: String = r.get(1)?;
            let kind_s: String = r.get(2)?;
            let kind = AccountKind::parse(&kind_s)
                .with_context(|| format!("Invalid account kind '{}'", kind_s))?;
            out.push(Account { id, name, kind });
        }
        Ok(out)
    }

    pub fn account_id(&self, name: &str) -> Result<i64> {
        let id: Option<i64> = self
            .conn
            .query_row("SELECT id FROM accounts WHERE name=?1", params![name], |r| {
                r.get(0)
            })
            .optional()?;
        id.ok_or_else(|| StoreError::AccountNotFound(name.to_string()).into())
    }

    /// Transactions keep a non-owning reference; deleting the account nulls it.
    pub fn delete_account(&self, name: &str) -> Result<()> {
        let id = self.account_id(name)?;
        self.conn
            .execute("DELETE FROM accounts WHERE id=?1", params![id])?;
        Ok(())
    }

    // ----- categories ---------------------------------------------------

    pub fn create_category(
        &self,
        name: &str,
        tx_type: TxType,
        daily: bool,
        icon: &str,
        color: &str,
    ) -> Result<i64> {
        let dup: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM categories WHERE LOWER(name)=LOWER(?1) AND tx_type=?2",
                params![name, tx_type.as_str()],
                |r| r.get(0),
            )
            .optional()?;
        if dup.is_some() {
            return Err(StoreError::DuplicateCategory(name.to_string()).into());
        }
        let subtype = if daily { Some("daily") } else { None };
        self.conn.execute(
            "INSERT INTO categories(name, tx_type, subtype, icon, color) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![name, tx_type.as_str(), subtype, icon, color],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, tx_type, subtype, icon, color FROM categories ORDER BY tx_type, name",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(category_from_row(r)?);
        }
        Ok(out)
    }

    pub fn category_for(&self, name: &str, tx_type: TxType) -> Result<Category> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, tx_type, subtype, icon, color FROM categories WHERE name=?1",
        )?;
        let mut rows = stmt.query(params![name])?;
        let mut found = None;
        while let Some(r) = rows.next()? {
            let cat = category_from_row(r)?;
            if cat.tx_type == tx_type {
                return Ok(cat);
            }
            found = Some(cat);
        }
        match found {
            Some(_) => Err(StoreError::WrongCategoryKind {
                name: name.to_string(),
                expected: tx_type.as_str(),
            }
            .into()),
            None => Err(StoreError::CategoryNotFound(name.to_string()).into()),
        }
    }

    /// Refused while any transaction or expense still references the category.
    pub fn delete_category(&self, name: &str, tx_type: TxType) -> Result<()> {
        let cat = self.category_for(name, tx_type)?;
        let count: i64 = self.conn.query_row(
            "SELECT (SELECT COUNT(*) FROM transactions WHERE category_id=?1)
                  + (SELECT COUNT(*) FROM expenses WHERE category_id=?1)",
            params![cat.id],
            |r| r.get(0),
        )?;
        if count > 0 {
            return Err(StoreError::CategoryInUse {
                name: name.to_string(),
                count,
            }
            .into());
        }
        self.conn
            .execute("DELETE FROM categories WHERE id=?1", params![cat.id])?;
        Ok(())
    }

    // ----- asset categories ---------------------------------------------

    pub fn create_asset_category(&self, name: &str, icon: &str, color: &str) -> Result<i64> {
        let dup: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM asset_categories WHERE LOWER(name)=LOWER(?1)",
                params![name],
                |r| r.get(0),
            )
            .optional()?;
        if dup.is_some() {
            return Err(StoreError::DuplicateAssetCategory(name.to_string()).into());
        }
        self.conn.execute(
            "INSERT INTO asset_categories(name, icon, color) VALUES (?1, ?2, ?3)",
            params![name, icon, color],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_asset_categories(&self) -> Result<Vec<AssetCategory>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, icon, color FROM asset_categories ORDER BY name")?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(AssetCategory {
                id: r.get(0)?,
                name: r.get(1)?,
                icon: r.get(2)?,
                color: r.get(3)?,
            });
        }
        Ok(out)
    }

    pub fn asset_category_for(&self, name: &str) -> Result<AssetCategory> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, icon, color FROM asset_categories WHERE name=?1")?;
        let cat = stmt
            .query_row(params![name], |r| {
                Ok(AssetCategory {
                    id: r.get(0)?,
                    name: r.get(1)?,
                    icon: r.get(2)?,
                    color: r.get(3)?,
                })
            })
            .optional()?;
        cat.ok_or_else(|| StoreError::AssetCategoryNotFound(name.to_string()).into())
    }

    /// Refused while any asset still references the category.
    pub fn delete_asset_category(&self, name: &str) -> Result<()> {
        let cat = self.asset_category_for(name)?;
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM assets WHERE category_id=?1",
            params![cat.id],
            |r| r.get(0),
        )?;
        if count > 0 {
            return Err(StoreError::AssetCategoryInUse {
                name: name.to_string(),
                count,
            }
            .into());
        }
        self.conn
            .execute("DELETE FROM asset_categories WHERE id=?1", params![cat.id])?;
        Ok(())
    }

    // ----- transactions & expenses --------------------------------------

    #[allow(clippy::too_many_arguments)]
    pub fn create_transaction(
        &self,
        tx_type: TxType,
        amount_original: Decimal,
        currency: &str,
        category: &str,
        account: Option<&str>,
        note: Option<&str>,
        date: NaiveDateTime,
        attachments: &[String],
    ) -> Result<i64> {
        let cat = self.category_for(category, tx_type)?;
        let account_id = match account {
            Some(a) => Some(self.account_id(a)?),
            None => None,
        };
        self.insert_entry(
            "transactions",
            tx_type,
            amount_original,
            currency,
            cat.id,
            account_id,
            note,
            date,
            attachments,
        )
    }

    pub fn create_expense(
        &self,
        amount_original: Decimal,
        currency: &str,
        category: &str,
        note: Option<&str>,
        date: NaiveDateTime,
    ) -> Result<i64> {
        let cat = self.category_for(category, TxType::Expense)?;
        if cat.subtype != Some(CategorySubtype::Daily) {
            return Err(StoreError::NotDailyCategory(category.to_string()).into());
        }
        self.insert_entry(
            "expenses",
            TxType::Expense,
            amount_original,
            currency,
            cat.id,
            None,
            note,
            date,
            &[],
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn insert_entry(
        &self,
        table: &str,
        tx_type: TxType,
        amount_original: Decimal,
        currency: &str,
        category_id: i64,
        account_id: Option<i64>,
        note: Option<&str>,
        date: NaiveDateTime,
        attachments: &[String],
    ) -> Result<i64> {
        let (converted, rate) = self.convert_to_base(date.date(), amount_original, currency)?;
        let now = now_local();
        let sql = format!(
            "INSERT INTO {table}(tx_type, amount_original, currency, amount_converted, fx_rate,
                                 category_id, account_id, note, date, created_at, updated_at, attachments)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
        );
        self.conn.execute(
            &sql,
            params![
                tx_type.as_str(),
                amount_original.to_string(),
                currency,
                converted.to_string(),
                rate.map(|r| r.to_string()),
                category_id,
                account_id,
                note,
                fmt_ts(&date),
                fmt_ts(&now),
                fmt_ts(&now),
                serde_json::to_string(attachments)?,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.read_entries("transactions", None)
    }

    pub fn list_expenses(&self) -> Result<Vec<Transaction>> {
        self.read_entries("expenses", None)
    }

    /// Server-side equivalent of the engine's date-range filter (inclusive).
    pub fn list_expenses_by_date_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Transaction>> {
        self.read_entries("expenses", Some((start, end)))
    }

    fn read_entries(
        &self,
        table: &str,
        range: Option<(NaiveDateTime, NaiveDateTime)>,
    ) -> Result<Vec<Transaction>> {
        let base = format!(
            "SELECT id, tx_type, amount_original, currency, amount_converted, fx_rate,
                    category_id, account_id, note, date, created_at, updated_at, attachments
             FROM {table}"
        );
        let (sql, args): (String, Vec<String>) = match &range {
            // Stored timestamps sort lexicographically, so BETWEEN on the
            // TEXT column matches the inclusive engine semantics.
            Some((start, end)) => (
                format!("{base} WHERE date>=?1 AND date<=?2 ORDER BY date, id"),
                vec![fmt_ts(start), fmt_ts(end)],
            ),
            None => (format!("{base} ORDER BY date, id"), Vec::new()),
        };
        let mut stmt = self.conn.prepare(&sql)?;
        let params: Vec<&dyn rusqlite::ToSql> =
            args.iter().map(|s| s as &dyn rusqlite::ToSql).collect();
        let mut rows = stmt.query(rusqlite::params_from_iter(params))?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(entry_from_row(r)?);
        }
        Ok(out)
    }

    pub fn update_transaction(&self, id: i64, patch: EntryPatch) -> Result<()> {
        self.update_entry("transactions", id, patch)
    }

    fn update_entry(&self, table: &str, id: i64, patch: EntryPatch) -> Result<()> {
        let existing = self
            .read_entries(table, None)?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or(StoreError::EntryNotFound(id))?;

        let category_id = match &patch.category {
            Some(name) => self.category_for(name, existing.tx_type)?.id,
            None => existing.category_id,
        };
        let amount = patch.amount_original.unwrap_or(existing.amount_original);
        let currency = patch.currency.unwrap_or(existing.currency);
        let date = patch.date.unwrap_or(existing.date);
        let note = patch.note.or(existing.note);
        let (converted, rate) = self.convert_to_base(date.date(), amount, &currency)?;

        let sql = format!(
            "UPDATE {table} SET amount_original=?1, currency=?2, amount_converted=?3, fx_rate=?4,
                                category_id=?5, note=?6, date=?7, updated_at=?8
             WHERE id=?9"
        );
        self.conn.execute(
            &sql,
            params![
                amount.to_string(),
                currency,
                converted.to_string(),
                rate.map(|r| r.to_string()),
                category_id,
                note,
                fmt_ts(&date),
                fmt_ts(&now_local()),
                id
            ],
        )?;
        Ok(())
    }

    pub fn delete_transaction(&self, id: i64) -> Result<()> {
        self.delete_entry("transactions", id)
    }

    pub fn delete_expense(&self, id: i64) -> Result<()> {
        self.delete_entry("expenses", id)
    }

    fn delete_entry(&self, table: &str, id: i64) -> Result<()> {
        let sql = format!("DELETE FROM {table} WHERE id=?1");
        let n = self.conn.execute(&sql, params![id])?;
        if n == 0 {
            return Err(StoreError::EntryNotFound(id).into());
        }
        Ok(())
    }

    // ----- assets -------------------------------------------------------

    pub fn create_asset(
        &self,
        name: &str,
        amount: Decimal,
        category: &str,
        note: Option<&str>,
    ) -> Result<i64> {
        let cat = self.asset_category_for(category)?;
        self.conn.execute(
            "INSERT INTO assets(name, amount, category_id, note) VALUES (?1, ?2, ?3, ?4)",
            params![name, amount.to_string(), cat.id, note],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_assets(&self) -> Result<Vec<Asset>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, amount, category_id, note,
                    last_updated_date, current_updated_date, last_total_assets_value
             FROM assets ORDER BY name",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let amount_s: String = r.get(2)?;
            let last_upd: Option<String> = r.get(5)?;
            let cur_upd: Option<String> = r.get(6)?;
            let last_total: Option<String> = r.get(7)?;
            out.push(Asset {
                id: r.get(0)?,
                name: r.get(1)?,
                amount: amount_s
                    .parse::<Decimal>()
                    .with_context(|| format!("Invalid asset amount '{}'", amount_s))?,
                category_id: r.get(3)?,
                note: r.get(4)?,
                last_updated_date: last_upd.as_deref().map(parse_ts).transpose()?,
                current_updated_date: cur_upd.as_deref().map(parse_ts).transpose()?,
                last_total_assets_value: last_total
                    .as_deref()
                    .map(|s| {
                        s.parse::<Decimal>()
                            .with_context(|| format!("Invalid snapshot value '{}'", s))
                    })
                    .transpose()?,
            });
        }
        Ok(out)
    }

    /// Update an asset's value and roll the snapshot metadata: the previous
    /// update instant becomes `last_updated_date`, now becomes
    /// `current_updated_date`, and the pre-update total of all assets is
    /// recorded for period-over-period delta reporting.
    pub fn update_asset_amount(&self, name: &str, amount: Decimal) -> Result<()> {
        let assets = self.list_assets()?;
        let asset = assets
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| StoreError::AssetNotFound(name.to_string()))?;
        let prior_total: Decimal = assets.iter().map(|a| a.amount).sum();
        let now = now_local();
        self.conn.execute(
            "UPDATE assets SET amount=?1, last_updated_date=?2, current_updated_date=?3,
                               last_total_assets_value=?4
             WHERE id=?5",
            params![
                amount.to_string(),
                asset.current_updated_date.as_ref().map(fmt_ts),
                fmt_ts(&now),
                prior_total.to_string(),
                asset.id
            ],
        )?;
        Ok(())
    }

    pub fn delete_asset(&self, name: &str) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM assets WHERE name=?1", params![name])?;
        if n == 0 {
            return Err(StoreError::AssetNotFound(name.to_string()).into());
        }
        Ok(())
    }
}

fn category_from_row(r: &rusqlite::Row<'_>) -> Result<Category> {
    let id: i64 = r.get(0)?;
    let name: String = r.get(1)?;
    let tx_type_s: String = r.get(2)?;
    let subtype_s: Option<String> = r.get(3)?;
    let tx_type = TxType::parse(&tx_type_s)
        .with_context(|| format!("Invalid category type '{}'", tx_type_s))?;
    let subtype = match subtype_s {
        Some(s) => Some(
            CategorySubtype::parse(&s)
                .with_context(|| format!("Invalid category subtype '{}'", s))?,
        ),
        None => None,
    };
    Ok(Category {
        id,
        name,
        tx_type,
        subtype,
        icon: r.get(4)?,
        color: r.get(5)?,
    })
}

fn entry_from_row(r: &rusqlite::Row<'_>) -> Result<Transaction> {
    let tx_type_s: String = r.get(1)?;
    let amount_s: String = r.get(2)?;
    let converted_s: String = r.get(4)?;
    let rate_s: Option<String> = r.get(5)?;
    let date_s: String = r.get(9)?;
    let created_s: String = r.get(10)?;
    let updated_s: String = r.get(11)?;
    let attachments_s: String = r.get(12)?;
    Ok(Transaction {
        id: r.get(0)?,
        tx_type: TxType::parse(&tx_type_s)
            .with_context(|| format!("Invalid entry type '{}'", tx_type_s))?,
        amount_original: amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}'", amount_s))?,
        currency: r.get(3)?,
        amount_converted: converted_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid converted amount '{}'", converted_s))?,
        fx_rate: rate_s
            .map(|s| {
                s.parse::<Decimal>()
                    .with_context(|| format!("Invalid fx rate '{}'", s))
            })
            .transpose()?,
        category_id: r.get(6)?,
        account_id: r.get(7)?,
        note: r.get(8)?,
        date: parse_ts(&date_s)?,
        created_at: parse_ts(&created_s)?,
        updated_at: parse_ts(&updated_s)?,
        attachments: serde_json::from_str(&attachments_s)
            .with_context(|| format!("Invalid attachments '{}'", attachments_s))?,
    })
}
