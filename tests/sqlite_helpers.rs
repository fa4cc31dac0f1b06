#![allow(dead_code)]

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;

pub fn db_path(home: &TempDir) -> PathBuf {
    home.path().join(".adledger").join("data.db")
}

pub fn open_conn(home: &TempDir) -> Result<Connection> {
    let path = db_path(home);
    Connection::open(path).context("failed to open test database")
}

pub fn count_records(conn: &Connection, account_id: i64) -> Result<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM daily_records WHERE account_id = ?1",
        [account_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Write a raw date straight into the store, bypassing CLI validation
pub fn corrupt_record_date(conn: &Connection, record_id: i64, raw_date: &str) -> Result<()> {
    conn.execute(
        "UPDATE daily_records SET record_date = ?1 WHERE id = ?2",
        rusqlite::params![raw_date, record_id],
    )?;
    Ok(())
}
