// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Parameterized SQL against the local store. No aggregation happens here.

use rusqlite::types::{Type, ValueRef};
use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{Result, SpendError};
use crate::models::{Account, Category, DEFAULT_ACCOUNT, NewTransaction, Transaction, TxType};
use crate::month::MonthKey;

/// Narrows a transaction read. Empty filter reads everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxFilter {
    pub month: Option<MonthKey>,
    pub account: Option<String>,
}

impl TxFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn month(month: MonthKey) -> Self {
        TxFilter {
            month: Some(month),
            account: None,
        }
    }

    pub fn account(name: &str) -> Self {
        TxFilter {
            month: None,
            account: Some(name.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteScope {
    Month(MonthKey),
    All,
}

pub fn insert_transaction(conn: &Connection, tx: &NewTransaction) -> Result<i64> {
    conn.execute(
        "INSERT INTO transactions(date, description, amount, type, account, category)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            tx.date,
            tx.description,
            tx.amount.normalize().to_string(),
            tx.tx_type,
            tx.account,
            tx.category
        ],
    )?;
    let id = conn.last_insert_rowid();
    info!(id, date = %tx.date, kind = %tx.tx_type, amount = %tx.amount, "transaction recorded");
    Ok(id)
}

/// Reads transactions newest first (date, then id, descending).
pub fn query_transactions(conn: &Connection, filter: &TxFilter) -> Result<Vec<Transaction>> {
    let mut sql = String::from(
        "SELECT id, date, description, amount, type, account, category FROM transactions WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = &filter.month {
        params_vec.push(month.to_string());
        sql.push_str(&format!(" AND substr(date,1,7)=?{}", params_vec.len()));
    }
    if let Some(account) = &filter.account {
        params_vec.push(account.clone());
        sql.push_str(&format!(
            " AND COALESCE(NULLIF(TRIM(account),''),'{}')=?{}",
            DEFAULT_ACCOUNT,
            params_vec.len()
        ));
    }
    sql.push_str(" ORDER BY date DESC, id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params_vec.iter()), read_transaction)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row.map_err(decode_error)?);
    }
    debug!(?filter, rows = data.len(), "transactions read");
    Ok(data)
}

fn read_transaction(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        date: r.get(1)?,
        description: r.get::<_, Option<String>>(2)?.unwrap_or_default(),
        amount: read_amount(r, 3)?,
        tx_type: r.get::<_, Option<TxType>>(4)?.unwrap_or(TxType::Expense),
        account: r.get(5)?,
        category: r.get(6)?,
    })
}

// Amounts are written as decimal text; stores created before that hold REAL values.
fn read_amount(r: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let parsed = match r.get_ref(idx)? {
        ValueRef::Integer(i) => Ok(Decimal::from(i)),
        ValueRef::Real(f) => f.to_string().parse::<Decimal>(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).trim().parse::<Decimal>(),
        ValueRef::Null => {
            return Err(rusqlite::Error::InvalidColumnType(
                idx,
                "amount".into(),
                Type::Null,
            ));
        }
        ValueRef::Blob(_) => {
            return Err(rusqlite::Error::InvalidColumnType(
                idx,
                "amount".into(),
                Type::Blob,
            ));
        }
    };
    parsed.map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn decode_error(e: rusqlite::Error) -> SpendError {
    match e {
        rusqlite::Error::FromSqlConversionFailure(idx, _, err) => {
            SpendError::Corrupt(format!("column {}: {}", idx, err))
        }
        rusqlite::Error::InvalidColumnType(idx, name, ty) => {
            SpendError::Corrupt(format!("column {} ({}) holds {}", idx, name, ty))
        }
        other => SpendError::Db(other),
    }
}

pub fn delete_transaction(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    info!(id, removed = n, "transaction deleted");
    Ok(n > 0)
}

pub fn delete_transactions(conn: &Connection, scope: &DeleteScope) -> Result<usize> {
    let n = match scope {
        DeleteScope::Month(month) => conn.execute(
            "DELETE FROM transactions WHERE substr(date,1,7)=?1",
            params![month.as_str()],
        )?,
        DeleteScope::All => conn.execute("DELETE FROM transactions", [])?,
    };
    info!(?scope, removed = n, "transactions deleted");
    Ok(n)
}

pub fn list_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare("SELECT id, name FROM accounts ORDER BY id ASC")?;
    let rows = stmt.query_map([], |r| {
        Ok(Account {
            id: r.get(0)?,
            name: r.get(1)?,
        })
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Returns false when an account with that name already exists.
pub fn add_account(conn: &Connection, name: &str) -> Result<bool> {
    let n = conn.execute(
        "INSERT OR IGNORE INTO accounts(name) VALUES (?1)",
        params![name],
    )?;
    Ok(n > 0)
}

pub fn list_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT id, name FROM categories ORDER BY name ASC")?;
    let rows = stmt.query_map([], |r| {
        Ok(Category {
            id: r.get(0)?,
            name: r.get(1)?,
        })
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Returns false when a category with that name already exists.
pub fn add_category(conn: &Connection, name: &str) -> Result<bool> {
    let n = conn.execute(
        "INSERT OR IGNORE INTO categories(name) VALUES (?1)",
        params![name],
    )?;
    Ok(n > 0)
}

pub fn delete_category(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM categories WHERE id=?1", params![id])?;
    Ok(n > 0)
}

pub fn delete_category_by_name(conn: &Connection, name: &str) -> Result<bool> {
    let n = conn.execute("DELETE FROM categories WHERE name=?1", params![name])?;
    Ok(n > 0)
}
