use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::open_store;
use crate::config::Config;
use crate::importers::{import_into, load_files};

pub async fn dispatch_import_legacy(
    accounts_path: &Path,
    transactions_path: &Path,
    config: &Config,
    json_output: bool,
) -> Result<()> {
    tracing::info!(
        "Importing legacy data from {:?} and {:?}",
        accounts_path,
        transactions_path
    );

    let data = load_files(accounts_path, transactions_path)?;
    let store = open_store(config)?;
    let summary = store.in_transaction(|store| import_into(store, data))?;

    if json_output {
        let skipped: Vec<String> = summary.skipped.iter().map(|i| i.to_string()).collect();
        println!(
            "{}",
            serde_json::json!({
                "accounts": summary.accounts,
                "records": summary.records,
                "skipped": skipped,
            })
        );
        return Ok(());
    }

    println!("\n{} Import complete!", "✓".green().bold());
    println!("  Accounts: {}", summary.accounts.to_string().green());
    println!("  Records:  {}", summary.records.to_string().green());
    if !summary.skipped.is_empty() {
        println!("  Skipped:  {}", summary.skipped.len().to_string().yellow());
        for issue in &summary.skipped {
            println!("    {} {}", "⚠".yellow(), issue);
        }
    }
    println!();

    Ok(())
}
