//! Integration tests for adledger
//!
//! These tests verify end-to-end functionality:
//! - Records stored in SQLite and read back as snapshots
//! - Full export to an in-memory workbook, read back with calamine
//! - Failure reporting for empty and malformed collections

use adledger::db::{init_database, open_db, Account, DailyRecord, RecordStore, SqliteStore};
use adledger::error::ExportError;
use adledger::export::{export_report, ExportOptions, SectionKind, XlsxSink};
use adledger::reports::{group_by_month, summarize};
use anyhow::Result;
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Cursor;
use tempfile::TempDir;

/// Test helper: Create a temporary store with one account
fn create_test_store() -> Result<(TempDir, SqliteStore, i64)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    init_database(Some(db_path.clone()))?;
    let store = SqliteStore::open(&db_path)?;
    let account_id = store.add_account(&Account::new("Toko Batik", None))?;
    Ok((temp_dir, store, account_id))
}

fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

fn options() -> ExportOptions {
    ExportOptions {
        file_prefix: "FB_Ads".to_string(),
        author: "FB Ads Manager".to_string(),
        today: day(6, 30),
    }
}

fn float(value: Option<&Data>) -> f64 {
    match value {
        Some(Data::Float(f)) => *f,
        Some(Data::Int(i)) => *i as f64,
        other => panic!("expected number, got {:?}", other),
    }
}

fn text(value: Option<&Data>) -> String {
    match value {
        Some(Data::String(s)) => s.clone(),
        other => panic!("expected text, got {:?}", other),
    }
}

fn seed(store: &SqliteStore, account_id: i64) -> Result<()> {
    store.append_record(&DailyRecord::new(
        account_id,
        day(1, 5),
        dec!(1000000),
        dec!(1500000),
        Some(dec!(50000)),
    ))?;
    store.append_record(
        &DailyRecord::new(account_id, day(2, 1), dec!(100), dec!(150), None)
            .with_notes("promo"),
    )?;
    store.append_record(&DailyRecord::new(
        account_id,
        day(2, 2),
        dec!(200),
        dec!(100),
        None,
    ))?;
    Ok(())
}

#[test]
fn test_init_database_is_idempotent() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    init_database(Some(db_path.clone()))?;
    init_database(Some(db_path.clone()))?;

    let conn = open_db(Some(db_path))?;
    let tables: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('accounts', 'daily_records')",
        [],
        |row| row.get(0),
    )?;
    assert_eq!(tables, 2);
    Ok(())
}

#[test]
fn test_store_snapshot_feeds_reports() -> Result<()> {
    let (_dir, store, account_id) = create_test_store()?;
    seed(&store, account_id)?;

    let records = store.list_records_for_account(account_id)?;
    let summary = summarize(&records);
    assert_eq!(summary.record_count, 3);
    assert_eq!(summary.total_costs, dec!(1050300));

    let months = group_by_month(&records)?;
    assert_eq!(months.len(), 2);
    assert_eq!(months[0].key.label(), "Februari 2024");
    assert_eq!(months[0].profit, dec!(-83));
    assert_eq!(months[1].profit, dec!(334500));
    Ok(())
}

#[tokio::test]
async fn test_export_round_trip_through_xlsx() -> Result<()> {
    let (_dir, store, account_id) = create_test_store()?;
    seed(&store, account_id)?;
    let records = store.list_records_for_account(account_id)?;
    let summary = summarize(&records);

    let doc = export_report("Toko Batik", records, &XlsxSink, &options()).await?;
    assert_eq!(doc.file_name, "FB_Ads_Toko Batik_2024-06-30.xlsx");

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(doc.bytes))?;
    assert_eq!(
        workbook.sheet_names(),
        vec!["Ringkasan", "Data Bulanan", "Data Harian", "Grafik"]
    );

    // Detail: banner, two subheaders, column header, then one row per record
    let detail = workbook.worksheet_range("Data Harian")?;
    assert_eq!(text(detail.get_value((0, 0))), "DATA TRANSAKSI HARIAN");
    assert_eq!(text(detail.get_value((1, 0))), "Total Data: 3 transaksi");
    assert_eq!(
        text(detail.get_value((2, 0))),
        "Periode: 5 Januari 2024 sampai 2 Februari 2024"
    );
    assert_eq!(text(detail.get_value((3, 1))), "Tanggal");
    assert_eq!(float(detail.get_value((4, 0))), 1.0);
    assert_eq!(float(detail.get_value((4, 4))), 1_050_000.0);
    assert_eq!(float(detail.get_value((4, 5))), 115_500.0);
    assert_eq!(float(detail.get_value((4, 7))), 334_500.0);
    assert!((float(detail.get_value((4, 8))) - 0.287001).abs() < 1e-6);
    assert_eq!(text(detail.get_value((5, 9))), "promo");

    let profit_sum: f64 = (4..7).map(|r| float(detail.get_value((r, 7)))).sum();
    assert!((profit_sum - summary.total_profit.to_f64().unwrap()).abs() < 1e-6);

    // Monthly: newest month first
    let monthly = workbook.worksheet_range("Data Bulanan")?;
    assert_eq!(text(monthly.get_value((0, 0))), "LAPORAN BULANAN FB ADS");
    assert_eq!(text(monthly.get_value((4, 1))), "Februari 2024");
    assert_eq!(float(monthly.get_value((4, 5))), -83.0);
    assert_eq!(float(monthly.get_value((4, 7))), 2.0);
    assert_eq!(text(monthly.get_value((5, 1))), "Januari 2024");

    // Summary: formatted values in the metric table
    let overview = workbook.worksheet_range("Ringkasan")?;
    assert_eq!(text(overview.get_value((2, 1))), "Toko Batik");
    let cells: Vec<String> = overview
        .rows()
        .flat_map(|row| row.iter())
        .filter_map(|cell| match cell {
            Data::String(s) => Some(s.clone()),
            _ => None,
        })
        .collect();
    assert!(cells.contains(&"1.050.300,00".to_string()));
    assert!(cells.contains(&"11% dari total modal".to_string()));

    // Chart: date column plus three series
    let chart = workbook.worksheet_range("Grafik")?;
    assert_eq!(text(chart.get_value((1, 3))), "Profit");
    assert!(matches!(chart.get_value((2, 0)), Some(Data::DateTime(_))));
    assert_eq!(float(chart.get_value((4, 2))), 100.0);
    Ok(())
}

#[tokio::test]
async fn test_empty_account_export_fails() -> Result<()> {
    let (_dir, store, account_id) = create_test_store()?;
    let records = store.list_records_for_account(account_id)?;

    let err = export_report("Toko Batik", records, &XlsxSink, &options())
        .await
        .unwrap_err();
    assert!(matches!(err, ExportError::EmptyExport));
    Ok(())
}

#[tokio::test]
async fn test_malformed_stored_date_fails_all_sections() -> Result<()> {
    let (_dir, store, account_id) = create_test_store()?;
    seed(&store, account_id)?;
    let bad_id = store.append_record(&DailyRecord::new(
        account_id,
        day(3, 1),
        dec!(1),
        dec!(1),
        None,
    ))?;
    store.connection().execute(
        "UPDATE daily_records SET record_date = 'Maret 2024' WHERE id = ?1",
        [bad_id],
    )?;

    let records = store.list_records_for_account(account_id)?;
    assert_eq!(records.len(), 4);

    let err = export_report("Toko Batik", records, &XlsxSink, &options())
        .await
        .unwrap_err();
    assert_eq!(err.failed_sections(), SectionKind::ALL.to_vec());
    assert!(err.to_string().contains(&format!("record #{}", bad_id)));
    Ok(())
}

#[tokio::test]
async fn test_zero_spend_records_export() -> Result<()> {
    let (_dir, store, account_id) = create_test_store()?;
    store.append_record(&DailyRecord::new(
        account_id,
        day(4, 1),
        Decimal::ZERO,
        dec!(500),
        None,
    ))?;
    let records = store.list_records_for_account(account_id)?;

    let doc = export_report("Toko Batik", records, &XlsxSink, &options()).await?;
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(doc.bytes))?;
    let detail = workbook.worksheet_range("Data Harian")?;
    assert_eq!(float(detail.get_value((4, 8))), 0.0);
    Ok(())
}
