//! Import of the flat `accounts.json` / `transactions.json` files
//!
//! The legacy files hold camelCase objects with millisecond-timestamp ids.
//! Accounts get fresh store ids and every transaction is re-pointed at its
//! account's new id.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use super::validation::{amount_issues, ValidationIssue};
use crate::db::{Account, DailyRecord, RecordStore};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAccount {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyTransaction {
    #[serde(default)]
    pub id: Option<i64>,
    pub account_id: i64,
    #[serde(default)]
    pub date: String,
    pub ad_spend: Decimal,
    pub revenue: Decimal,
    #[serde(default)]
    pub other_costs: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LegacyData {
    pub accounts: Vec<LegacyAccount>,
    pub transactions: Vec<LegacyTransaction>,
}

/// Outcome of one import run
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub accounts: usize,
    pub records: usize,
    pub skipped: Vec<ValidationIssue>,
}

/// Read both legacy files
pub fn load_files(accounts_path: &Path, transactions_path: &Path) -> Result<LegacyData> {
    let accounts_raw = std::fs::read_to_string(accounts_path)
        .context(format!("Failed to read {:?}", accounts_path))?;
    let transactions_raw = std::fs::read_to_string(transactions_path)
        .context(format!("Failed to read {:?}", transactions_path))?;
    parse(&accounts_raw, &transactions_raw)
}

pub fn parse(accounts_json: &str, transactions_json: &str) -> Result<LegacyData> {
    let accounts: Vec<LegacyAccount> =
        serde_json::from_str(accounts_json).context("Invalid accounts JSON")?;
    let transactions: Vec<LegacyTransaction> =
        serde_json::from_str(transactions_json).context("Invalid transactions JSON")?;
    Ok(LegacyData {
        accounts,
        transactions,
    })
}

/// Insert the legacy data into `store`.
///
/// Transactions pointing at an unknown account or carrying out-of-range amounts
/// are skipped and reported. Empty notes are dropped. Dates are kept as
/// written. Callers wanting all-or-nothing behaviour run this inside
/// [`crate::db::SqliteStore::in_transaction`].
pub fn import_into(store: &impl RecordStore, data: LegacyData) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();
    let mut id_map: HashMap<i64, i64> = HashMap::new();

    for legacy in &data.accounts {
        let mut account = Account::new(
            legacy.name.trim(),
            legacy.description.clone().filter(|d| !d.trim().is_empty()),
        );
        if let Some(created_at) = legacy.created_at {
            account.created_at = created_at;
        }
        let new_id = store
            .add_account(&account)
            .context(format!("Failed to import account '{}'", legacy.name))?;
        id_map.insert(legacy.id, new_id);
        summary.accounts += 1;
    }

    for (idx, tx) in data.transactions.into_iter().enumerate() {
        let row = idx + 1;
        let Some(&account_id) = id_map.get(&tx.account_id) else {
            summary.skipped.push(ValidationIssue::new(
                row,
                "account_id",
                tx.account_id.to_string(),
                "Unknown account",
            ));
            continue;
        };
        let record = DailyRecord {
            id: None,
            account_id,
            date: tx.date,
            ad_spend: tx.ad_spend,
            revenue: tx.revenue,
            other_costs: tx.other_costs,
            notes: tx.notes.filter(|n| !n.trim().is_empty()),
        };

        let issues = amount_issues(row, &record);
        if !issues.is_empty() {
            summary.skipped.extend(issues);
            continue;
        }
        store.append_record(&record)?;
        summary.records += 1;
    }

    for issue in &summary.skipped {
        warn!("Skipped legacy transaction: {}", issue);
    }
    info!(
        "Imported {} account(s) and {} record(s), {} skipped",
        summary.accounts,
        summary.records,
        summary.skipped.len()
    );

    Ok(summary)
}
