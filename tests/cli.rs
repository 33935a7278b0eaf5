//! End-to-end tests of the caja binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn caja(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("caja").unwrap();
    cmd.env("CAJA_CLI_DATA_DIR", dir.path());
    cmd
}

#[test]
fn add_then_list_shows_movement_and_totals() {
    let dir = TempDir::new().unwrap();

    caja(&dir)
        .args([
            "movement",
            "add",
            "Sale deposit",
            "2500.00",
            "--date",
            "2025-03-10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Sale deposit"));

    caja(&dir)
        .args(["movement", "list", "--date", "2025-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sale deposit"))
        .stdout(predicate::str::contains("Running balance: $2500.00"));
}

#[test]
fn rejects_non_numeric_amount() {
    let dir = TempDir::new().unwrap();

    caja(&dir)
        .args(["movement", "add", "Broken", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be a number"));
}

#[test]
fn summary_reports_breakdown_by_method() {
    let dir = TempDir::new().unwrap();

    caja(&dir)
        .args([
            "movement",
            "add",
            "Sale",
            "1000.00",
            "--date",
            "2025-03-10",
        ])
        .assert()
        .success();
    caja(&dir)
        .args([
            "movement",
            "add",
            "Parts",
            "300.00",
            "--expense",
            "--method",
            "transfer",
            "--date",
            "2025-03-10",
        ])
        .assert()
        .success();

    caja(&dir)
        .args(["export", "summary", "--date", "2025-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Net:     $700.00"))
        .stdout(predicate::str::contains("Transfer"))
        .stdout(predicate::str::contains("Running balance: $700.00"));
}

#[test]
fn spreadsheet_export_writes_both_sheets() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out").join("caja-test");

    caja(&dir)
        .args(["movement", "add", "Sale", "100.00", "--date", "2025-03-10"])
        .assert()
        .success();

    caja(&dir)
        .args([
            "export",
            "spreadsheet",
            "--date",
            "2025-03-10",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(dir.path().join("out").join("caja-test-movements.csv").exists());
    assert!(dir.path().join("out").join("caja-test-summary.csv").exists());
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();

    caja(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Data directory"));
}
