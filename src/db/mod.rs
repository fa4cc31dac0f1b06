// Database module - SQLite record store for accounts and daily records

pub mod models;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::LedgerError;
use crate::metrics::MAX_AMOUNT;
pub use models::{Account, DailyRecord};

/// Keyed storage of accounts and their daily records.
///
/// The report core only reads snapshots through `list_records_for_account`;
/// write ordering is entirely the store's business.
pub trait RecordStore {
    fn list_accounts(&self) -> Result<Vec<Account>>;
    fn add_account(&self, account: &Account) -> Result<i64>;
    fn find_account(&self, id: i64) -> Result<Option<Account>>;
    fn list_records_for_account(&self, account_id: i64) -> Result<Vec<DailyRecord>>;
    fn find_record(&self, id: i64) -> Result<Option<DailyRecord>>;
    fn append_record(&self, record: &DailyRecord) -> Result<i64>;
    fn update_record(&self, record: &DailyRecord) -> Result<()>;
    fn delete_record(&self, id: i64) -> Result<()>;
}

/// Get the default database path (~/.adledger/data.db)
pub fn get_default_db_path() -> Result<PathBuf> {
    Ok(crate::config::app_dir()?.join("data.db"))
}

/// Open database connection
pub fn open_db(db_path: Option<PathBuf>) -> Result<Connection> {
    let path = match db_path {
        Some(path) => path,
        None => get_default_db_path()?,
    };
    let conn = Connection::open(&path).context(format!("Failed to open database at {:?}", path))?;

    // Enable foreign keys
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("Failed to enable foreign keys")?;

    Ok(conn)
}

/// Initialize the database with schema
///
/// Creates the database file if needed and runs the (idempotent) schema SQL.
pub fn init_database(db_path: Option<PathBuf>) -> Result<()> {
    let path = match db_path {
        Some(path) => path,
        None => get_default_db_path()?,
    };

    info!("Initializing database at: {:?}", path);

    let conn = open_db(Some(path))?;
    apply_schema(&conn)?;

    info!("Database initialized successfully");
    Ok(())
}

fn apply_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(include_str!("schema.sql"))
        .context("Failed to execute schema")
}

/// Helper to read Decimal from SQLite (handles both INTEGER, REAL and TEXT)
///
/// Values whose magnitude exceeds [`MAX_AMOUNT`] are rejected.
pub fn get_decimal_value(row: &rusqlite::Row, idx: usize) -> Result<Decimal, rusqlite::Error> {
    use rusqlite::types::{Type, ValueRef};

    let (value, ty) = match row.get_ref(idx)? {
        ValueRef::Text(bytes) => {
            let s = std::str::from_utf8(bytes)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))?;
            let value = Decimal::from_str(s)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))?;
            (value, Type::Text)
        }
        ValueRef::Integer(i) => (Decimal::from(i), Type::Integer),
        ValueRef::Real(f) => {
            let value = Decimal::try_from(f)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Real, Box::new(e)))?;
            (value, Type::Real)
        }
        _ => {
            return Err(rusqlite::Error::InvalidColumnType(
                idx,
                "decimal".to_string(),
                Type::Null,
            ))
        }
    };

    if value.abs() > MAX_AMOUNT {
        return Err(rusqlite::Error::FromSqlConversionFailure(
            idx,
            ty,
            format!("amount {} exceeds the maximum of {}", value, MAX_AMOUNT).into(),
        ));
    }
    Ok(value)
}

/// Helper to read optional Decimal from SQLite
fn get_optional_decimal_value(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<Option<Decimal>, rusqlite::Error> {
    use rusqlite::types::ValueRef;

    match row.get_ref(idx)? {
        ValueRef::Null => Ok(None),
        _ => get_decimal_value(row, idx).map(Some),
    }
}

const RECORD_COLUMNS: &str =
    "id, account_id, record_date, ad_spend, revenue, other_costs, notes";

fn record_from_row(row: &rusqlite::Row) -> Result<DailyRecord, rusqlite::Error> {
    Ok(DailyRecord {
        id: row.get(0)?,
        account_id: row.get(1)?,
        date: row.get(2)?,
        ad_spend: get_decimal_value(row, 3)?,
        revenue: get_decimal_value(row, 4)?,
        other_costs: get_optional_decimal_value(row, 5)?,
        notes: row.get(6)?,
    })
}

fn account_from_row(row: &rusqlite::Row) -> Result<Account, rusqlite::Error> {
    Ok(Account {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: row.get(3)?,
    })
}

/// SQLite-backed record store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (and initialize if needed) the store at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let conn = open_db(Some(path.to_path_buf()))?;
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Open the store at the default location
    pub fn open_default() -> Result<Self> {
        Self::open(&get_default_db_path()?)
    }

    /// Fresh in-memory store, used by tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run `f` inside a single SQLite transaction.
    ///
    /// Everything `f` writes through this store is committed together when it
    /// returns `Ok`, and rolled back when it returns an error.
    pub fn in_transaction<T>(&self, f: impl FnOnce(&Self) -> Result<T>) -> Result<T> {
        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to begin transaction")?;
        let value = f(self)?;
        tx.commit().context("Failed to commit transaction")?;
        Ok(value)
    }
}

impl RecordStore for SqliteStore {
    fn list_accounts(&self) -> Result<Vec<Account>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, description, created_at FROM accounts ORDER BY id ASC")?;
        let accounts = stmt
            .query_map([], account_from_row)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read accounts")?;
        Ok(accounts)
    }

    fn add_account(&self, account: &Account) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO accounts (name, description, created_at) VALUES (?1, ?2, ?3)",
            params![account.name, account.description, account.created_at],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("Added account {} ({})", id, account.name);
        Ok(id)
    }

    fn find_account(&self, id: i64) -> Result<Option<Account>> {
        let account = self
            .conn
            .query_row(
                "SELECT id, name, description, created_at FROM accounts WHERE id = ?1",
                [id],
                account_from_row,
            )
            .optional()?;
        Ok(account)
    }

    fn list_records_for_account(&self, account_id: i64) -> Result<Vec<DailyRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM daily_records WHERE account_id = ?1 ORDER BY record_date ASC, id ASC",
            RECORD_COLUMNS
        ))?;
        let records = stmt
            .query_map([account_id], record_from_row)?
            .collect::<Result<Vec<_>, _>>()
            .context(format!("Failed to read records for account {}", account_id))?;
        Ok(records)
    }

    fn find_record(&self, id: i64) -> Result<Option<DailyRecord>> {
        let record = self
            .conn
            .query_row(
                &format!("SELECT {} FROM daily_records WHERE id = ?1", RECORD_COLUMNS),
                [id],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    fn append_record(&self, record: &DailyRecord) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO daily_records (
                    account_id, record_date, ad_spend, revenue, other_costs, notes
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.account_id,
                    record.date,
                    record.ad_spend.to_string(),
                    record.revenue.to_string(),
                    record.other_costs.as_ref().map(|d| d.to_string()),
                    record.notes,
                ],
            )
            .context(format!(
                "Failed to insert record for account {}",
                record.account_id
            ))?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_record(&self, record: &DailyRecord) -> Result<()> {
        let id = record
            .id
            .ok_or_else(|| LedgerError::ValidationError("record has no id".to_string()))?;
        let changed = self.conn.execute(
            "UPDATE daily_records
             SET account_id = ?1, record_date = ?2, ad_spend = ?3, revenue = ?4,
                 other_costs = ?5, notes = ?6
             WHERE id = ?7",
            params![
                record.account_id,
                record.date,
                record.ad_spend.to_string(),
                record.revenue.to_string(),
                record.other_costs.as_ref().map(|d| d.to_string()),
                record.notes,
                id,
            ],
        )?;
        if changed == 0 {
            return Err(LedgerError::NotFound(format!("record #{}", id)).into());
        }
        Ok(())
    }

    fn delete_record(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM daily_records WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(LedgerError::NotFound(format!("record #{}", id)).into());
        }
        Ok(())
    }
}
