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
use tracing::debug;

use crate::models::{RawTransaction, StoredTransaction};

pub const DB_ENV: &str = "MONEYLENS_DB";

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Moneylens", "moneylens"));

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("moneylens.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    open_at(&db_path()?)
}

pub fn open_at(path: &Path) -> Result<Connection> {
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        amount TEXT NOT NULL,
        category INTEGER NOT NULL,
        date TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    "#,
    )?;
    Ok(())
}

/// All stored rows, newest date first (ties: newest insert first).
pub fn load_transactions(conn: &Connection) -> Result<Vec<StoredTransaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, CAST(amount AS TEXT), CAST(category AS TEXT), CAST(date AS TEXT),
                COALESCE(description,'')
         FROM transactions
         ORDER BY date DESC, id DESC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(StoredTransaction {
            id: r.get(0)?,
            amount: r.get(1)?,
            category: r.get(2)?,
            date: r.get(3)?,
            description: r.get(4)?,
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

/// Snapshot handed to the insight engine. Row order is the query order
/// above; the trend prediction depends on it.
pub fn load_raw_transactions(conn: &Connection) -> Result<Vec<RawTransaction>> {
    Ok(load_transactions(conn)?
        .into_iter()
        .map(RawTransaction::from)
        .collect())
}
