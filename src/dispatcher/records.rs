use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use colored::Colorize;
use itertools::Itertools;

use super::{open_store, parse_amount, resolve_account};
use crate::cli::formatters::{format_records_table, to_json};
use crate::cli::RecordCommands;
use crate::config::Config;
use crate::db::{DailyRecord, RecordStore};
use crate::importers::record_issues;
use crate::metrics::DerivedMetrics;
use crate::utils::{format_currency, format_percentage};

pub async fn dispatch_records(
    action: RecordCommands,
    config: &Config,
    json_output: bool,
) -> Result<()> {
    match action {
        RecordCommands::Add {
            account,
            date,
            ad_spend,
            revenue,
            other_costs,
            notes,
        } => {
            let input = RecordInput {
                date: Some(date),
                ad_spend: Some(ad_spend),
                revenue: Some(revenue),
                other_costs,
                notes,
            };
            dispatch_record_add(&account, input, config, json_output).await
        }
        RecordCommands::List { account } => {
            dispatch_records_list(&account, config, json_output).await
        }
        RecordCommands::Update {
            id,
            date,
            ad_spend,
            revenue,
            other_costs,
            notes,
        } => {
            let input = RecordInput {
                date,
                ad_spend,
                revenue,
                other_costs,
                notes,
            };
            dispatch_record_update(id, input, config, json_output).await
        }
        RecordCommands::Delete { id } => dispatch_record_delete(id, config, json_output).await,
    }
}

/// Raw record fields as typed on the command line
struct RecordInput {
    date: Option<String>,
    ad_spend: Option<String>,
    revenue: Option<String>,
    other_costs: Option<String>,
    notes: Option<String>,
}

impl RecordInput {
    /// Overwrite the fields of `record` that were given
    fn apply(self, record: &mut DailyRecord) -> Result<()> {
        if let Some(date) = self.date {
            let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
                .context("Invalid date format. Use YYYY-MM-DD")?;
            record.date = parsed.format("%Y-%m-%d").to_string();
        }
        if let Some(raw) = self.ad_spend {
            record.ad_spend = parse_amount("ad spend", &raw)?;
        }
        if let Some(raw) = self.revenue {
            record.revenue = parse_amount("revenue", &raw)?;
        }
        if let Some(raw) = self.other_costs {
            record.other_costs = Some(parse_amount("other costs", &raw)?);
        }
        if let Some(notes) = self.notes {
            let notes = notes.trim().to_string();
            record.notes = (!notes.is_empty()).then_some(notes);
        }

        let issues = record_issues(1, record);
        if !issues.is_empty() {
            return Err(anyhow!(
                "{}",
                issues.iter().map(|i| i.reason.as_str()).join("; ")
            ));
        }
        Ok(())
    }
}

async fn dispatch_record_add(
    account_ref: &str,
    input: RecordInput,
    config: &Config,
    json_output: bool,
) -> Result<()> {
    let store = open_store(config)?;
    let account = resolve_account(&store, account_ref)?;
    let account_id = account
        .id
        .ok_or_else(|| anyhow!("Account '{}' has no id", account.name))?;

    tracing::info!("Adding daily record for account {}", account.name);

    let mut record = DailyRecord {
        id: None,
        account_id,
        date: String::new(),
        ad_spend: Default::default(),
        revenue: Default::default(),
        other_costs: None,
        notes: None,
    };
    input.apply(&mut record)?;
    record.id = Some(store.append_record(&record)?);

    print_record("Record added successfully!", &record, json_output);
    Ok(())
}

async fn dispatch_record_update(
    id: i64,
    input: RecordInput,
    config: &Config,
    json_output: bool,
) -> Result<()> {
    let store = open_store(config)?;
    let mut record = store
        .find_record(id)?
        .ok_or_else(|| anyhow!("Record #{} not found", id))?;

    input.apply(&mut record)?;
    store.update_record(&record)?;

    print_record("Record updated", &record, json_output);
    Ok(())
}

async fn dispatch_record_delete(id: i64, config: &Config, json_output: bool) -> Result<()> {
    let store = open_store(config)?;
    store.delete_record(id)?;

    if json_output {
        println!("{}", serde_json::json!({ "deleted": id }));
    } else {
        println!("\n{} Record #{} deleted\n", "✓".green().bold(), id);
    }
    Ok(())
}

async fn dispatch_records_list(account_ref: &str, config: &Config, json_output: bool) -> Result<()> {
    let store = open_store(config)?;
    let account = resolve_account(&store, account_ref)?;
    let records = store.list_records_for_account(account.id.unwrap_or_default())?;

    if json_output {
        let newest_first: Vec<&DailyRecord> = records.iter().rev().collect();
        println!("{}", to_json(&newest_first));
    } else {
        print!("{}", format_records_table(&account, &records));
    }
    Ok(())
}

fn print_record(headline: &str, record: &DailyRecord, json_output: bool) {
    if json_output {
        println!("{}", to_json(record));
        return;
    }

    let m = DerivedMetrics::of(record);
    println!("\n{} {}", "✓".green().bold(), headline);
    println!("  Record ID:    {}", record.id.unwrap_or_default());
    println!("  Date:         {}", record.date);
    println!("  Ad spend:     {}", format_currency(record.ad_spend).cyan());
    println!(
        "  Other costs:  {}",
        format_currency(record.other_costs_or_zero()).cyan()
    );
    println!("  Tax (11%):    {}", format_currency(m.tax));
    println!("  Revenue:      {}", format_currency(record.revenue).cyan());
    println!(
        "  Profit:       {} ({})",
        format_currency(m.profit).bold(),
        format_percentage(m.profit_rate)
    );
    if let Some(n) = &record.notes {
        println!("  Notes:        {}", n);
    }
    println!();
}
