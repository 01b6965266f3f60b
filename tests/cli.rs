use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "finreport";

fn command(base: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("FINREPORT_DATA_DIR", base);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn seed(base: &Path) {
    let remote = base.join("remote");
    fs::create_dir_all(&remote).unwrap();
    fs::write(
        remote.join("debts.json"),
        r#"[
            {"name": "Visa", "type": "credit_card", "balance": 500, "creditLimit": 2000, "interestRate": 19.9},
            {"name": "Amex", "type": "credit_card", "balance": 1000, "creditLimit": 5000}
        ]"#,
    )
    .unwrap();
    fs::write(
        remote.join("savingsGoals.json"),
        r#"{"goals": [{"name": "Emergency fund", "target": 4000, "saved": 1000}]}"#,
    )
    .unwrap();
    fs::write(
        base.join("profile.json"),
        r#"{"displayName": "Ada Lovelace", "email": "ada@example.com"}"#,
    )
    .unwrap();
}

fn only_file(dir: &Path) -> std::path::PathBuf {
    let entries: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1, "expected one artifact in {}", dir.display());
    entries[0].clone()
}

#[test]
fn cli_without_command_prints_hint() {
    let temp_dir = TempDir::new().unwrap();
    command(temp_dir.path())
        .assert()
        .success()
        .stdout(contains("finreport --help"));
}

#[test]
fn cli_export_snapshot_writes_json() {
    let temp_dir = TempDir::new().unwrap();
    seed(temp_dir.path());

    command(temp_dir.path())
        .args(["export", "--format", "snapshot"])
        .assert()
        .success()
        .stdout(contains("Exported snapshot"));

    let path = only_file(&temp_dir.path().join("exports"));
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("finreport-financial-data-"));
    assert!(name.ends_with(".json"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["account"]["displayName"], "Ada Lovelace");
    assert_eq!(json["summary"]["datasetCounts"]["debts"], 2);
    assert_eq!(json["summary"]["metrics"]["savingsProgress"], 25.0);
}

#[test]
fn cli_export_document_to_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    seed(temp_dir.path());
    let out = temp_dir.path().join("out");

    command(temp_dir.path())
        .args(["export", "--format", "pdf", "--output"])
        .arg(&out)
        .assert()
        .success();

    let path = only_file(&out);
    assert!(path.to_string_lossy().ends_with(".pdf"));
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
    assert!(bytes.ends_with(b"%%EOF\n"));
}

#[test]
fn cli_export_tabular_from_explicit_source() {
    let temp_dir = TempDir::new().unwrap();
    seed(temp_dir.path());

    command(temp_dir.path())
        .args(["export", "--format", "csv", "--source"])
        .arg(temp_dir.path().join("remote"))
        .assert()
        .success();

    let path = only_file(&temp_dir.path().join("exports"));
    let csv = fs::read_to_string(path).unwrap();
    assert!(csv.starts_with("category,field,value,timestamp"));
    assert!(csv.contains("debts,0.name,Visa,"));
}

#[test]
fn cli_invalid_format_fails_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    seed(temp_dir.path());

    command(temp_dir.path())
        .args(["export", "--format", "xml"])
        .assert()
        .failure()
        .stderr(contains("Invalid export mode").and(contains("xml")));

    assert!(!temp_dir.path().join("exports").exists());
}

#[test]
fn cli_invalid_format_reported_before_reading_profile() {
    let temp_dir = TempDir::new().unwrap();
    seed(temp_dir.path());
    fs::write(temp_dir.path().join("profile.json"), "{ broken").unwrap();
    fs::write(temp_dir.path().join("config.json"), "{ broken").unwrap();

    command(temp_dir.path())
        .args(["export", "--format", "xml"])
        .assert()
        .failure()
        .stderr(contains("Invalid export mode").and(contains("xml")));

    assert!(!temp_dir.path().join("exports").exists());
}

#[test]
fn cli_valid_format_with_corrupt_profile_reports_profile() {
    let temp_dir = TempDir::new().unwrap();
    seed(temp_dir.path());
    fs::write(temp_dir.path().join("profile.json"), "{ broken").unwrap();

    command(temp_dir.path())
        .args(["export", "--format", "json"])
        .assert()
        .failure()
        .stderr(contains("Invalid export mode").not());

    assert!(!temp_dir.path().join("exports").exists());
}

#[test]
fn cli_summary_prints_tables() {
    let temp_dir = TempDir::new().unwrap();
    seed(temp_dir.path());

    command(temp_dir.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(contains("Total debt").and(contains("$1,500.00")));
}

#[test]
fn cli_config_init_writes_settings() {
    let temp_dir = TempDir::new().unwrap();

    command(temp_dir.path())
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(contains("Settings written to"));

    assert!(temp_dir.path().join("config.json").exists());
}
