//! Report section builders
//!
//! Each builder recomputes its figures from the same immutable record
//! snapshot, so sections can be built independently and in any order.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::sheet::{Cell, Column, Row, RowStyle, Section, SectionKind};
use crate::db::DailyRecord;
use crate::error::InvalidRecords;
use crate::metrics::DerivedMetrics;
use crate::reports::{date_bounds, dated_records, group_by_month, summarize};
use crate::utils::{date_range_string, format_number, format_percentage};

/// Number of most recent records plotted in the chart section
pub const CHART_WINDOW: usize = 30;

/// Input shared by all section builders for one export
#[derive(Debug, Clone)]
pub struct ReportInput {
    pub account_label: String,
    pub records: Vec<DailyRecord>,
}

/// Build one section from the snapshot
pub fn build_section(kind: SectionKind, input: &ReportInput) -> Result<Section, InvalidRecords> {
    match kind {
        SectionKind::Detail => build_detail_section(&input.records),
        SectionKind::Monthly => build_monthly_section(&input.records),
        SectionKind::Summary => build_summary_section(&input.account_label, &input.records),
        SectionKind::Chart => build_chart_section(&input.records),
    }
}

/// Formatted min/max date of the collection, or the "no data" sentinel
pub fn date_range_label(records: &[DailyRecord]) -> Result<String, InvalidRecords> {
    let dated = dated_records(records)?;
    Ok(date_range_string(date_bounds(&dated)))
}

const DETAIL_COLUMNS: [Column; 10] = [
    Column::new("No", 5),
    Column::new("Tanggal", 12),
    Column::new("Modal Iklan", 15),
    Column::new("Biaya Lain", 15),
    Column::new("Total Modal", 15),
    Column::new("Estimasi Pajak", 15),
    Column::new("Pendapatan", 15),
    Column::new("Profit Bersih", 15),
    Column::new("Profit Rate", 12),
    Column::new("Catatan", 30),
];

/// Column positions in the detail section
pub mod detail_col {
    pub const NO: usize = 0;
    pub const DATE: usize = 1;
    pub const TOTAL_COSTS: usize = 4;
    pub const TAX: usize = 5;
    pub const REVENUE: usize = 6;
    pub const PROFIT: usize = 7;
    pub const PROFIT_RATE: usize = 8;
}

/// One row per record by ascending date, then a totals block
pub fn build_detail_section(records: &[DailyRecord]) -> Result<Section, InvalidRecords> {
    let dated = dated_records(records)?;
    let mut section = Section::new(SectionKind::Detail, DETAIL_COLUMNS.to_vec());

    section.push(Row::banner(RowStyle::Header, "DATA TRANSAKSI HARIAN"));
    section.push(Row::banner(
        RowStyle::Subheader,
        format!("Total Data: {} transaksi", dated.len()),
    ));
    section.push(Row::banner(
        RowStyle::Subheader,
        format!("Periode: {}", date_range_string(date_bounds(&dated))),
    ));
    section.push_column_headers();

    for (index, entry) in dated.iter().enumerate() {
        let record = entry.record;
        let m = DerivedMetrics::of(record);
        section.push(Row::new(
            RowStyle::striped(index),
            vec![
                Cell::Count(index as u64 + 1),
                Cell::Date(entry.date),
                Cell::Money(record.ad_spend),
                Cell::Money(record.other_costs_or_zero()),
                Cell::Money(m.total_costs),
                Cell::Money(m.tax),
                Cell::Money(record.revenue),
                Cell::Money(m.profit),
                Cell::Percentage(m.profit_rate),
                Cell::Text(record.notes.clone().unwrap_or_default()),
            ],
        ));
    }

    let summary = summarize(records);
    section.push(Row::blank());
    section.push(Row::banner(RowStyle::Header, "RINGKASAN"));
    for (label, column, value) in [
        ("Total Modal", detail_col::TOTAL_COSTS, Cell::Money(summary.total_costs)),
        ("Total Pajak", detail_col::TAX, Cell::Money(summary.total_tax)),
        ("Total Pendapatan", detail_col::REVENUE, Cell::Money(summary.total_revenue)),
        ("Total Profit", detail_col::PROFIT, Cell::Money(summary.total_profit)),
        (
            "Rata-rata Profit Rate",
            detail_col::PROFIT_RATE,
            Cell::Percentage(summary.average_profit_rate),
        ),
    ] {
        section.push(total_row(label, column, value));
    }

    Ok(section)
}

fn total_row(label: &str, column: usize, value: Cell) -> Row {
    let mut cells = vec![Cell::Empty; column + 1];
    cells[0] = Cell::label(label);
    cells[column] = value;
    Row::new(RowStyle::Total, cells)
}

const MONTHLY_COLUMNS: [Column; 8] = [
    Column::new("No", 5),
    Column::new("Bulan", 15),
    Column::new("Modal", 15),
    Column::new("Pajak", 15),
    Column::new("Pendapatan", 15),
    Column::new("Profit", 15),
    Column::new("Profit Rate", 12),
    Column::new("Jumlah Transaksi", 15),
];

/// One row per month, most recent first
pub fn build_monthly_section(records: &[DailyRecord]) -> Result<Section, InvalidRecords> {
    let period = date_range_label(records)?;
    let months = group_by_month(records)?;
    let mut section = Section::new(SectionKind::Monthly, MONTHLY_COLUMNS.to_vec());

    section.push(Row::banner(RowStyle::Header, "LAPORAN BULANAN FB ADS"));
    section.push(Row::banner(RowStyle::Subheader, format!("Periode: {}", period)));
    section.push(Row::blank());
    section.push_column_headers();

    for (index, month) in months.iter().enumerate() {
        section.push(Row::new(
            RowStyle::striped(index),
            vec![
                Cell::Count(index as u64 + 1),
                Cell::Label(month.key.label()),
                Cell::Money(month.costs),
                Cell::Money(month.tax),
                Cell::Money(month.revenue),
                Cell::Money(month.profit),
                Cell::Percentage(month.profit_rate),
                Cell::Count(month.transactions as u64),
            ],
        ));
    }

    Ok(section)
}

const SUMMARY_COLUMNS: [Column; 3] = [
    Column::new("Metrik", 25),
    Column::new("Nilai", 22),
    Column::new("Keterangan", 35),
];

/// Account information plus the financial metric table
pub fn build_summary_section(
    account_label: &str,
    records: &[DailyRecord],
) -> Result<Section, InvalidRecords> {
    let period = date_range_label(records)?;
    let summary = summarize(records);
    let mut section = Section::new(SectionKind::Summary, SUMMARY_COLUMNS.to_vec());

    section.push(Row::banner(RowStyle::Header, "RINGKASAN FB ADS MANAGER"));
    section.push(Row::banner(RowStyle::Subheader, "Informasi Akun"));
    section.push(info_row("Nama Akun", Cell::Text(account_label.to_string())));
    section.push(info_row("Periode", Cell::Text(period)));
    section.push(info_row("Total Transaksi", Cell::Count(records.len() as u64)));
    section.push(Row::blank());

    section.push(Row::banner(RowStyle::Subheader, "Ringkasan Keuangan"));
    section.push_column_headers();
    for (label, value, description) in [
        (
            "Total Modal",
            format_number(summary.total_costs),
            "Total biaya iklan dan biaya lain",
        ),
        (
            "Estimasi Pajak",
            format_number(summary.total_tax),
            "11% dari total modal",
        ),
        (
            "Total Pendapatan",
            format_number(summary.total_revenue),
            "Total pendapatan kotor",
        ),
        (
            "Profit Bersih",
            format_number(summary.total_profit),
            "Pendapatan - (Modal + Pajak)",
        ),
        (
            "Profit Rate",
            format_percentage(summary.average_profit_rate),
            "Persentase keuntungan bersih",
        ),
    ] {
        section.push(Row::new(
            RowStyle::Body,
            vec![
                Cell::label(label),
                Cell::Text(value),
                Cell::Text(description.to_string()),
            ],
        ));
    }

    Ok(section)
}

fn info_row(label: &str, value: Cell) -> Row {
    Row::new(RowStyle::Body, vec![Cell::label(label), value])
}

/// One plotted day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub total_costs: Decimal,
    pub revenue: Decimal,
    pub profit: Decimal,
    pub profit_rate: Decimal,
}

/// The last [`CHART_WINDOW`] records by ascending date
pub fn chart_points(records: &[DailyRecord]) -> Result<Vec<ChartPoint>, InvalidRecords> {
    let dated = dated_records(records)?;
    let start = dated.len().saturating_sub(CHART_WINDOW);

    Ok(dated[start..]
        .iter()
        .map(|entry| {
            let m = DerivedMetrics::of(entry.record);
            ChartPoint {
                date: entry.date,
                total_costs: m.total_costs,
                revenue: entry.record.revenue,
                profit: m.profit,
                profit_rate: m.profit_rate,
            }
        })
        .collect())
}

const CHART_COLUMNS: [Column; 4] = [
    Column::new("Tanggal", 15),
    Column::new("Modal", 20),
    Column::new("Pendapatan", 20),
    Column::new("Profit", 20),
];

/// Plotting data: date, total costs, revenue and profit
pub fn build_chart_section(records: &[DailyRecord]) -> Result<Section, InvalidRecords> {
    let points = chart_points(records)?;
    let mut section = Section::new(SectionKind::Chart, CHART_COLUMNS.to_vec());

    section.push(Row::banner(
        RowStyle::Header,
        format!("DATA GRAFIK ({} HARI TERAKHIR)", CHART_WINDOW),
    ));
    section.push_column_headers();

    for point in points {
        section.push(Row::new(
            RowStyle::Body,
            vec![
                Cell::Date(point.date),
                Cell::Money(point.total_costs),
                Cell::Money(point.revenue),
                Cell::Money(point.profit),
            ],
        ));
    }

    Ok(section)
}
