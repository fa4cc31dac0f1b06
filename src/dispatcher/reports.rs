use anyhow::Result;
use serde::Serialize;

use super::{open_store, resolve_account};
use crate::cli::formatters::{
    format_monthly_table, format_summary, format_trend_table, to_json,
};
use crate::config::Config;
use crate::db::{Account, DailyRecord, RecordStore};
use crate::export::{chart_points, sections::date_range_label};
use crate::reports::{group_by_month, summarize, PeriodSummary};

fn load(account_ref: &str, config: &Config) -> Result<(Account, Vec<DailyRecord>)> {
    let store = open_store(config)?;
    let account = resolve_account(&store, account_ref)?;
    let records = store.list_records_for_account(account.id.unwrap_or_default())?;
    Ok((account, records))
}

pub async fn dispatch_summary(account_ref: &str, config: &Config, json_output: bool) -> Result<()> {
    let (account, records) = load(account_ref, config)?;
    tracing::info!("Summarizing {} record(s) for {}", records.len(), account.name);

    let summary = summarize(&records);
    let period = date_range_label(&records)?;

    if json_output {
        #[derive(Serialize)]
        struct JsonSummary<'a> {
            account: &'a str,
            period: &'a str,
            #[serde(flatten)]
            summary: &'a PeriodSummary,
            profit_rate: rust_decimal::Decimal,
        }

        println!(
            "{}",
            to_json(&JsonSummary {
                account: &account.name,
                period: &period,
                summary: &summary,
                profit_rate: summary.blended_profit_rate(),
            })
        );
    } else {
        print!("{}", format_summary(&account, &summary, &period));
    }
    Ok(())
}

pub async fn dispatch_monthly(account_ref: &str, config: &Config, json_output: bool) -> Result<()> {
    let (account, records) = load(account_ref, config)?;
    let months = group_by_month(&records)?;

    if json_output {
        println!("{}", to_json(&months));
    } else {
        print!("{}", format_monthly_table(&account, &months));
    }
    Ok(())
}

pub async fn dispatch_trend(account_ref: &str, config: &Config, json_output: bool) -> Result<()> {
    let (account, records) = load(account_ref, config)?;
    let points = chart_points(&records)?;

    if json_output {
        println!("{}", to_json(&points));
    } else {
        print!("{}", format_trend_table(&account, &points));
    }
    Ok(())
}
