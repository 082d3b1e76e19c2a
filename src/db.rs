// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.spendlog", "Spendlog", "spendlog"));

pub const SCHEMA_VERSION: i32 = 3;

pub const SEED_ACCOUNTS: [&str; 3] = ["Cash", "ALAT", "OPAY"];

/// Overrides the database location.
pub const DB_ENV: &str = "SPENDLOG_DB";

fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.to_path_buf())
}

pub fn db_path() -> Result<PathBuf> {
    match std::env::var(DB_ENV) {
        Ok(p) if !p.trim().is_empty() => Ok(PathBuf::from(p.trim())),
        _ => Ok(data_dir()?.join("spendlog.sqlite")),
    }
}

pub fn export_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join("exports"))
}

pub fn open_or_init() -> Result<Connection> {
    open_at(&db_path()?)
}

pub fn open_at(path: &Path) -> Result<Connection> {
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if mode.eq_ignore_ascii_case("wal") {
        debug!(path = %path.display(), "journal mode wal");
    } else {
        warn!(path = %path.display(), %mode, "WAL journal mode refused");
    }
    init_schema(&conn).with_context(|| format!("Initialize schema at {}", path.display()))?;
    Ok(conn)
}

/// Brings the schema up to `SCHEMA_VERSION`, tracked in `PRAGMA user_version`.
///
/// Version 1 stores only had transactions, version 2 added categories, version 3
/// added accounts. Seed accounts are inserted whenever the accounts table is created.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    let tx = conn.unchecked_transaction()?;

    if version < 1 {
        tx.execute_batch(
            r#"
        CREATE TABLE IF NOT EXISTS transactions(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            amount TEXT NOT NULL,
            type TEXT CHECK(type IN ('income', 'expense')) DEFAULT 'expense',
            account TEXT,
            category TEXT
        );
        "#,
        )?;
    }
    if version < 2 {
        tx.execute_batch(
            r#"
        CREATE TABLE IF NOT EXISTS categories(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT UNIQUE NOT NULL
        );
        "#,
        )?;
    }
    if version < 3 {
        tx.execute_batch(
            r#"
        CREATE TABLE IF NOT EXISTS accounts(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT UNIQUE NOT NULL
        );
        "#,
        )?;
        for name in SEED_ACCOUNTS {
            tx.execute("INSERT OR IGNORE INTO accounts(name) VALUES (?1)", [name])?;
        }
    }

    tx.execute_batch(
        r#"
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
    "#,
    )?;
    if version < SCHEMA_VERSION {
        tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    }
    tx.commit()
}
