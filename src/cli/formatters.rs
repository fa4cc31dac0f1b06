//! Output formatting module for CLI display
//!
//! This module handles all terminal output formatting, separating
//! the concerns of data calculation from presentation.

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use crate::db::{Account, DailyRecord};
use crate::export::ChartPoint;
use crate::metrics::DerivedMetrics;
use crate::reports::{MonthlyAggregate, PeriodSummary};
use crate::utils::{format_currency, format_date, format_percentage};

/// Pretty JSON, or an error object if serialization fails
pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

/// Green when non-negative, red otherwise
fn signed(text: String, value: Decimal) -> String {
    if value >= Decimal::ZERO {
        text.green().to_string()
    } else {
        text.red().to_string()
    }
}

/// Stored dates are shown in long form when they parse, raw otherwise
fn display_date(record: &DailyRecord) -> String {
    record
        .parsed_date()
        .map(format_date)
        .unwrap_or_else(|_| record.date.clone())
}

pub fn format_accounts_table(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return format!(
            "\n{} No accounts yet. Add one with 'adledger accounts add <name>'\n",
            "ℹ".blue().bold()
        );
    }

    #[derive(Tabled)]
    struct AccountRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Description")]
        description: String,
        #[tabled(rename = "Created")]
        created: String,
    }

    let rows: Vec<AccountRow> = accounts
        .iter()
        .map(|a| AccountRow {
            id: a.id.map(|id| id.to_string()).unwrap_or_default(),
            name: a.name.clone(),
            description: a.description.clone().unwrap_or_default(),
            created: a.created_at.format("%Y-%m-%d").to_string(),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    format!("\n{}\n", table)
}

/// Records table, most recent first
pub fn format_records_table(account: &Account, records: &[DailyRecord]) -> String {
    let mut output = format!("\n{} Records - {}\n\n", "📒".cyan().bold(), account.name.bold());

    if records.is_empty() {
        output.push_str("  No records for this account\n");
        return output;
    }

    #[derive(Tabled)]
    struct RecordRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Ad Spend")]
        ad_spend: String,
        #[tabled(rename = "Other Costs")]
        other_costs: String,
        #[tabled(rename = "Tax (11%)")]
        tax: String,
        #[tabled(rename = "Revenue")]
        revenue: String,
        #[tabled(rename = "Profit")]
        profit: String,
        #[tabled(rename = "Rate")]
        rate: String,
        #[tabled(rename = "Notes")]
        notes: String,
    }

    let rows: Vec<RecordRow> = records
        .iter()
        .rev()
        .map(|r| {
            let m = DerivedMetrics::of(r);
            RecordRow {
                id: r.id.map(|id| id.to_string()).unwrap_or_default(),
                date: display_date(r),
                ad_spend: format_currency(r.ad_spend),
                other_costs: format_currency(r.other_costs_or_zero()),
                tax: format_currency(m.tax),
                revenue: format_currency(r.revenue),
                profit: signed(format_currency(m.profit), m.profit),
                rate: signed(format_percentage(m.profit_rate), m.profit_rate),
                notes: r.notes.clone().unwrap_or_default(),
            }
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(2..8), Alignment::right());
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

/// Dashboard totals for one account
pub fn format_summary(account: &Account, summary: &PeriodSummary, period: &str) -> String {
    let mut output = format!("\n{} Summary - {}\n", "📊".cyan().bold(), account.name.bold());
    output.push_str(&format!("{:<22} {}\n", "Period:".bold(), period));
    output.push_str(&format!(
        "{:<22} {}\n",
        "Records:".bold(),
        summary.record_count
    ));
    output.push_str(&format!("{}\n", "━".repeat(50).bright_black()));

    output.push_str(&format!(
        "{:<22} {:>20}\n",
        "Total Costs:".bold(),
        format_currency(summary.total_costs)
    ));
    output.push_str(&format!(
        "{:<22} {:>20}\n",
        "Tax (11%):".bold(),
        format_currency(summary.total_tax)
    ));
    output.push_str(&format!(
        "{:<22} {:>20}\n",
        "Revenue:".bold(),
        format_currency(summary.total_revenue)
    ));
    output.push_str(&format!(
        "{:<22} {:>20}\n",
        "Net Profit:".bold(),
        signed(format_currency(summary.total_profit), summary.total_profit)
    ));

    let blended = summary.blended_profit_rate();
    output.push_str(&format!(
        "{:<22} {:>20}\n",
        "Profit Rate:".bold(),
        signed(format_percentage(blended), blended)
    ));
    output.push_str(&format!(
        "{:<22} {:>20}\n",
        "Avg Record Rate:".bold(),
        signed(
            format_percentage(summary.average_profit_rate),
            summary.average_profit_rate
        )
    ));
    output
}

pub fn format_monthly_table(account: &Account, months: &[MonthlyAggregate]) -> String {
    let mut output = format!(
        "\n{} Monthly Report - {}\n\n",
        "📅".cyan().bold(),
        account.name.bold()
    );

    if months.is_empty() {
        output.push_str("  No records for this account\n");
        return output;
    }

    #[derive(Tabled)]
    struct MonthRow {
        #[tabled(rename = "Month")]
        month: String,
        #[tabled(rename = "Costs")]
        costs: String,
        #[tabled(rename = "Tax")]
        tax: String,
        #[tabled(rename = "Revenue")]
        revenue: String,
        #[tabled(rename = "Profit")]
        profit: String,
        #[tabled(rename = "Rate")]
        rate: String,
        #[tabled(rename = "Records")]
        transactions: usize,
    }

    let rows: Vec<MonthRow> = months
        .iter()
        .map(|m| MonthRow {
            month: m.key.label(),
            costs: format_currency(m.costs),
            tax: format_currency(m.tax),
            revenue: format_currency(m.revenue),
            profit: signed(format_currency(m.profit), m.profit),
            rate: signed(format_percentage(m.profit_rate), m.profit_rate),
            transactions: m.transactions,
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(1..), Alignment::right());
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

pub fn format_trend_table(account: &Account, points: &[ChartPoint]) -> String {
    let mut output = format!(
        "\n{} Last {} records - {}\n\n",
        "📈".cyan().bold(),
        points.len(),
        account.name.bold()
    );

    #[derive(Tabled)]
    struct PointRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Costs")]
        costs: String,
        #[tabled(rename = "Revenue")]
        revenue: String,
        #[tabled(rename = "Profit")]
        profit: String,
        #[tabled(rename = "Rate")]
        rate: String,
    }

    let rows: Vec<PointRow> = points
        .iter()
        .map(|p| PointRow {
            date: p.date.format("%d/%m/%Y").to_string(),
            costs: format_currency(p.total_costs),
            revenue: format_currency(p.revenue),
            profit: signed(format_currency(p.profit), p.profit),
            rate: signed(format_percentage(p.profit_rate), p.profit_rate),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(1..), Alignment::right());
    output.push_str(&table.to_string());
    output.push('\n');
    output
}
