use assert_cmd::{cargo, prelude::*};
use calamine::{open_workbook, Reader, Xlsx};
use predicates::prelude::*;
use rust_decimal::Decimal;
use serde_json::Value;
use std::process::Command;
use std::str::FromStr;
use tempfile::TempDir;

mod sqlite_helpers;

use cli_helpers::{add_account, add_record, base_cmd, list_records_json, run_cmd, summary_json};

fn setup_temp_home() -> TempDir {
    TempDir::new().expect("failed to create temp home")
}

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal as string")).expect("valid decimal")
}

#[test]
fn accounts_list_empty_no_color_when_piped() {
    // Arrange: temp HOME so the app uses an isolated DB
    let home = setup_temp_home();

    // Act: run the CLI with stdout captured (piped)
    let mut cmd = Command::new(cargo::cargo_bin!("adledger"));
    cmd.env("HOME", home.path());
    cmd.arg("accounts").arg("list");

    // Assert: success and friendly empty message without ANSI escapes
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No accounts yet"))
        .stdout(predicate::str::contains("\u{001b}[").not());
}

#[test]
fn add_account_and_list_by_table() {
    let home = setup_temp_home();
    add_account(&home, "Toko Batik").unwrap();

    base_cmd(&home)
        .args(["accounts", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Toko Batik"));

    assert!(sqlite_helpers::db_path(&home).exists());
}

#[test]
fn records_then_summary_json() {
    let home = setup_temp_home();
    add_account(&home, "Toko Batik").unwrap();

    add_record(
        &home,
        "Toko Batik",
        "2024-01-05",
        "1.000.000",
        "1.500.000",
        Some("50.000"),
    )
    .unwrap();
    add_record(&home, "1", "2024-01-06", "100", "150", None).unwrap();

    let summary = summary_json(&home, "Toko Batik").unwrap();
    assert_eq!(summary["record_count"], 2);
    assert_eq!(decimal(&summary["total_costs"]), Decimal::from(1_050_100));
    assert_eq!(decimal(&summary["total_revenue"]), Decimal::from(1_500_150));
    assert_eq!(
        decimal(&summary["total_profit"]),
        Decimal::from_str("334539").unwrap()
    );
    assert_eq!(summary["period"], "5 Januari 2024 sampai 6 Januari 2024");
}

#[test]
fn records_list_is_most_recent_first() {
    let home = setup_temp_home();
    add_account(&home, "Kopi").unwrap();
    add_record(&home, "Kopi", "2024-03-02", "10", "20", None).unwrap();
    add_record(&home, "Kopi", "2024-03-01", "10", "20", None).unwrap();

    let records = list_records_json(&home, "Kopi").unwrap();
    let dates: Vec<&str> = records.iter().filter_map(|r| r["date"].as_str()).collect();
    assert_eq!(dates, vec!["2024-03-02", "2024-03-01"]);
}

#[test]
fn record_with_bad_date_is_rejected() {
    let home = setup_temp_home();
    add_account(&home, "Kopi").unwrap();

    base_cmd(&home)
        .args([
            "records",
            "add",
            "Kopi",
            "--date",
            "2024-13-01",
            "--ad-spend",
            "10",
            "--revenue",
            "10",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn record_with_oversized_amount_is_rejected() {
    let home = setup_temp_home();
    add_account(&home, "Kopi").unwrap();

    base_cmd(&home)
        .args([
            "records",
            "add",
            "Kopi",
            "--date",
            "2024-03-01",
            "--ad-spend",
            "75000000000000000000000000000",
            "--revenue",
            "10",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum"));

    // The account stays usable
    assert!(list_records_json(&home, "Kopi").unwrap().is_empty());
    base_cmd(&home).args(["summary", "Kopi"]).assert().success();
}

#[test]
fn update_and_delete_record() {
    let home = setup_temp_home();
    add_account(&home, "Kopi").unwrap();
    let added = add_record(&home, "Kopi", "2024-03-01", "10", "20", None).unwrap();
    let id = added["id"].as_i64().unwrap().to_string();

    let updated = cli_helpers::run_cmd_json(
        &home,
        &["--json", "records", "update", &id, "--revenue", "99", "--notes", "promo"],
    )
    .unwrap();
    assert_eq!(decimal(&updated["revenue"]), Decimal::from(99));
    assert_eq!(updated["notes"], "promo");
    assert_eq!(updated["date"], "2024-03-01");

    run_cmd(&home, &["records", "delete", &id]).unwrap();
    assert!(list_records_json(&home, "Kopi").unwrap().is_empty());

    base_cmd(&home)
        .args(["records", "delete", id.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn unknown_account_fails() {
    let home = setup_temp_home();
    base_cmd(&home)
        .args(["summary", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Account 'Nope' not found"));
}

#[test]
fn monthly_and_trend_tables() {
    let home = setup_temp_home();
    add_account(&home, "Kopi").unwrap();
    add_record(&home, "Kopi", "2024-01-10", "100", "150", None).unwrap();
    add_record(&home, "Kopi", "2024-02-10", "200", "100", None).unwrap();

    base_cmd(&home)
        .args(["monthly", "Kopi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Februari 2024"))
        .stdout(predicate::str::contains("Januari 2024"));

    let points = cli_helpers::run_cmd_json(&home, &["--json", "trend", "Kopi"]).unwrap();
    let points = points.as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["date"], "2024-01-10");
}

#[test]
fn export_writes_workbook() {
    let home = setup_temp_home();
    let out = home.path().join("reports");
    add_account(&home, "Toko Batik").unwrap();
    add_record(&home, "Toko Batik", "2024-01-05", "1.000.000", "1.500.000", None).unwrap();

    let result = cli_helpers::run_cmd_json(
        &home,
        &["--json", "export", "Toko Batik", "--out", out.to_str().unwrap()],
    )
    .unwrap();

    let file = result["file"].as_str().unwrap();
    assert!(file.contains("FB_Ads_Toko Batik_"));
    assert!(file.ends_with(".xlsx"));

    let workbook: Xlsx<_> = open_workbook(file).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec!["Ringkasan", "Data Bulanan", "Data Harian", "Grafik"]
    );
}

#[test]
fn export_without_records_fails() {
    let home = setup_temp_home();
    add_account(&home, "Kosong").unwrap();

    base_cmd(&home)
        .args(["export", "Kosong", "--out", home.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no records to export"));
}

#[test]
fn export_reports_corrupted_record() {
    let home = setup_temp_home();
    add_account(&home, "Kopi").unwrap();
    let added = add_record(&home, "Kopi", "2024-03-01", "10", "20", None).unwrap();
    let id = added["id"].as_i64().unwrap();

    let conn = sqlite_helpers::open_conn(&home).unwrap();
    sqlite_helpers::corrupt_record_date(&conn, id, "01/03/2024").unwrap();
    drop(conn);

    base_cmd(&home)
        .args(["export", "Kopi", "--out", home.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!("record #{}", id)));
}

#[test]
fn import_legacy_files() {
    let home = setup_temp_home();
    let accounts = home.path().join("accounts.json");
    let transactions = home.path().join("transactions.json");
    std::fs::write(
        &accounts,
        r#"[{"id": 1718000000000, "name": "Toko Batik", "description": "batik"}]"#,
    )
    .unwrap();
    std::fs::write(
        &transactions,
        r#"[
            {"id": 1, "accountId": 1718000000000, "date": "2024-06-01", "adSpend": 150000, "revenue": 400000, "otherCosts": 5000, "notes": "awal"},
            {"id": 2, "accountId": 1718000000000, "date": "2024-06-02", "adSpend": 1000, "revenue": 0}
        ]"#,
    )
    .unwrap();

    let result = cli_helpers::run_cmd_json(
        &home,
        &[
            "--json",
            "import-legacy",
            accounts.to_str().unwrap(),
            transactions.to_str().unwrap(),
        ],
    )
    .unwrap();
    assert_eq!(result["accounts"], 1);
    assert_eq!(result["records"], 2);

    let conn = sqlite_helpers::open_conn(&home).unwrap();
    assert_eq!(sqlite_helpers::count_records(&conn, 1).unwrap(), 2);

    let records = list_records_json(&home, "Toko Batik").unwrap();
    assert_eq!(records[1]["notes"], "awal");
}
