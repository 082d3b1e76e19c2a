// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::aggregate;
use crate::db;
use crate::error::{Result, SpendError, ValidationError};
use crate::export::{self, ExportSink};
use crate::models::{
    Account, AccountBalance, ArchiveRow, Category, CategoryTotal, Dashboard, MonthlySummary,
    NewTransaction, Transaction, TrendPoint, TxType,
};
use crate::month::MonthKey;
use crate::store::{self, DeleteScope, TxFilter};
use crate::validate;

/// Entry point for everything that reads or changes recorded money.
///
/// Each query reads the store once and computes its figures from that read.
pub struct Ledger {
    conn: Connection,
}

impl Ledger {
    pub fn open(path: &Path) -> Result<Self> {
        let conn =
            db::open_at(path).map_err(|e| SpendError::StorageUnavailable(format!("{:#}", e)))?;
        Ok(Ledger { conn })
    }

    pub fn open_default() -> Result<Self> {
        let conn =
            db::open_or_init().map_err(|e| SpendError::StorageUnavailable(format!("{:#}", e)))?;
        Ok(Ledger { conn })
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        db::init_schema(&conn).map_err(|e| SpendError::StorageUnavailable(e.to_string()))?;
        Ok(Ledger { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn transactions(&self, month: Option<&MonthKey>) -> Result<Vec<Transaction>> {
        let filter = match month {
            Some(m) => TxFilter::month(m.clone()),
            None => TxFilter::all(),
        };
        store::query_transactions(&self.conn, &filter)
    }

    /// Validates and records a transaction, returning its id.
    ///
    /// An expense larger than the account's current balance is refused and nothing
    /// is written.
    pub fn add_transaction(&self, entry: NewTransaction) -> Result<i64> {
        let entry = validate::normalize(entry);
        validate::check_fields(&entry)?;
        if entry.tx_type == TxType::Expense {
            let available = self.balance_for_account(&entry.account)?;
            if let Err(e) = validate::check_funds(&entry, available) {
                warn!(account = %entry.account, %available, requested = %entry.amount, "expense refused");
                return Err(e.into());
            }
        }
        store::insert_transaction(&self.conn, &entry)
    }

    pub fn delete_transaction(&self, id: i64) -> Result<bool> {
        store::delete_transaction(&self.conn, id)
    }

    pub fn reset(&self, scope: &DeleteScope) -> Result<usize> {
        store::delete_transactions(&self.conn, scope)
    }

    pub fn monthly_summary(&self, month: &MonthKey) -> Result<MonthlySummary> {
        let txs = self.transactions(Some(month))?;
        Ok(aggregate::monthly_summary(&txs, month))
    }

    pub fn account_balances(&self, month: Option<&MonthKey>) -> Result<Vec<AccountBalance>> {
        let txs = self.transactions(None)?;
        Ok(aggregate::account_balances(&txs, month))
    }

    pub fn balance_for_account(&self, account: &str) -> Result<Decimal> {
        let account = account.trim();
        let txs = store::query_transactions(&self.conn, &TxFilter::account(account))?;
        let balance = aggregate::balance_for_account(&txs, account);
        debug!(account, %balance, "account balance");
        Ok(balance)
    }

    pub fn expenses_by_category(&self, month: &MonthKey) -> Result<Vec<CategoryTotal>> {
        let txs = self.transactions(Some(month))?;
        Ok(aggregate::expenses_by_category(&txs, month))
    }

    pub fn trend(&self, today: NaiveDate, window: u32) -> Result<Vec<TrendPoint>> {
        let txs = self.transactions(None)?;
        Ok(aggregate::trailing_trend(&txs, today, window))
    }

    pub fn archive_history(&self) -> Result<Vec<ArchiveRow>> {
        let txs = self.transactions(None)?;
        Ok(aggregate::archive_history(&txs))
    }

    /// Month summary plus account cards, all from the same read.
    pub fn dashboard(&self, month: &MonthKey) -> Result<Dashboard> {
        let txs = self.transactions(None)?;
        let accounts = aggregate::account_balances(&txs, Some(month));
        let total_balance = accounts.iter().map(|a| a.balance).sum();
        Ok(Dashboard {
            month: month.clone(),
            summary: aggregate::monthly_summary(&txs, month),
            accounts,
            total_balance,
        })
    }

    pub fn accounts(&self) -> Result<Vec<Account>> {
        store::list_accounts(&self.conn)
    }

    pub fn add_account(&self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingAccount.into());
        }
        store::add_account(&self.conn, name)
    }

    pub fn categories(&self) -> Result<Vec<Category>> {
        store::list_categories(&self.conn)
    }

    pub fn add_category(&self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingCategory.into());
        }
        store::add_category(&self.conn, name)
    }

    pub fn remove_category(&self, name: &str) -> Result<bool> {
        store::delete_category_by_name(&self.conn, name.trim())
    }

    pub fn remove_category_id(&self, id: i64) -> Result<bool> {
        store::delete_category(&self.conn, id)
    }

    /// Formats and delivers the report for one month.
    pub fn export_month(&self, month: &MonthKey, sink: &dyn ExportSink) -> Result<PathBuf> {
        let label = month.display_name();
        let txs = self.transactions(Some(month))?;
        let content = export::format_monthly_report(&txs, &label)?;
        sink.deliver(&export::monthly_file_name(&label), &content)
    }

    /// Formats and delivers the report over every transaction.
    pub fn export_all(&self, today: NaiveDate, sink: &dyn ExportSink) -> Result<PathBuf> {
        let txs = self.transactions(None)?;
        let content = export::format_all_time_report(&txs)?;
        sink.deliver(&export::all_time_file_name(today), &content)
    }
}
