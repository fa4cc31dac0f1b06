//! Command dispatcher that routes parsed clap commands to their handlers.
//!
//! Handlers open the record store themselves, print either terminal tables
//! or JSON, and return `anyhow` errors with context for the binary to report.

mod accounts;
mod export;
mod inspect;
mod legacy;
mod records;
mod reports;

use anyhow::{anyhow, bail, Context, Result};
use rust_decimal::Decimal;

use crate::cli::Commands;
use crate::config::Config;
use crate::db::{Account, RecordStore, SqliteStore};
use crate::metrics;
use crate::utils::parse_idr_amount;

/// Route a parsed command to its handler
pub async fn dispatch_command(command: Commands, config: &Config, json_output: bool) -> Result<()> {
    match command {
        Commands::Accounts { action } => accounts::dispatch_accounts(action, config, json_output).await,
        Commands::Records { action } => records::dispatch_records(action, config, json_output).await,
        Commands::Summary { account } => reports::dispatch_summary(&account, config, json_output).await,
        Commands::Monthly { account } => reports::dispatch_monthly(&account, config, json_output).await,
        Commands::Trend { account } => reports::dispatch_trend(&account, config, json_output).await,
        Commands::Export { account, out } => {
            export::dispatch_export(&account, out, config, json_output).await
        }
        Commands::ImportLegacy {
            accounts,
            transactions,
        } => legacy::dispatch_import_legacy(&accounts, &transactions, config, json_output).await,
        Commands::Inspect { file, full } => inspect::dispatch_inspect(&file, full).await,
    }
}

/// Open the configured store, creating the schema on first use
pub(crate) fn open_store(config: &Config) -> Result<SqliteStore> {
    let path = config.db_path()?;
    SqliteStore::open(&path)
}

/// Find an account by numeric id, falling back to an exact name match
pub(crate) fn resolve_account(store: &impl RecordStore, reference: &str) -> Result<Account> {
    let reference = reference.trim();

    if let Ok(id) = reference.parse::<i64>() {
        if let Some(account) = store.find_account(id)? {
            return Ok(account);
        }
    }

    store
        .list_accounts()?
        .into_iter()
        .find(|a| a.name == reference)
        .ok_or_else(|| anyhow!("Account '{}' not found", reference))
}

/// Parse an amount argument written in Indonesian notation
pub(crate) fn parse_amount(field: &str, raw: &str) -> Result<Decimal> {
    let amount = parse_idr_amount(raw).context(format!("Invalid {}", field))?;
    if !metrics::is_storable_amount(amount) {
        bail!(
            "Invalid {}: {} exceeds the maximum of {}",
            field,
            raw.trim(),
            metrics::MAX_AMOUNT
        );
    }
    Ok(amount)
}
