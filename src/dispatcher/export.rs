use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use super::{open_store, resolve_account};
use crate::config::Config;
use crate::db::RecordStore;
use crate::export::{export_report, ExportOptions, XlsxSink};

pub async fn dispatch_export(
    account_ref: &str,
    out: Option<PathBuf>,
    config: &Config,
    json_output: bool,
) -> Result<()> {
    let store = open_store(config)?;
    let account = resolve_account(&store, account_ref)?;
    let records = store.list_records_for_account(account.id.unwrap_or_default())?;
    let record_count = records.len();

    let options = ExportOptions::from_config(&config.export, chrono::Local::now().date_naive());
    let document = export_report(&account.name, records, &XlsxSink, &options)
        .await
        .context(format!("Export failed for account '{}'", account.name))?;

    let dir = out.unwrap_or_else(|| config.output_dir());
    let path = document
        .save_to(&dir)
        .context(format!("Failed to save report into {:?}", dir))?;

    if json_output {
        println!(
            "{}",
            serde_json::json!({
                "account": account.name,
                "records": record_count,
                "file": path.display().to_string(),
                "bytes": document.bytes.len(),
            })
        );
    } else {
        println!("\n{} Report exported", "✓".green().bold());
        println!("  Account: {}", account.name.cyan().bold());
        println!("  Records: {}", record_count);
        println!("  File:    {}\n", path.display().to_string().green());
    }
    Ok(())
}
