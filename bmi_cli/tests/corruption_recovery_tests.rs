//! Corruption recovery tests for the bmi binary.
//!
//! These tests verify the system can handle:
//! - Corrupted preferences files
//! - Corrupted event log files
//! - Missing files
//! - Partial writes

use assert_cmd::Command;
use std::fs;
use std::io::Write as IoWrite;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bmi"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_corrupted_prefs_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    fs::create_dir_all(&data_dir).unwrap();

    // Write corrupted preferences file
    let prefs_path = data_dir.join("prefs.json");
    fs::write(&prefs_path, "{ invalid json }}}}").expect("Failed to write corrupted prefs");

    // Calculation still works, falling back to default units
    cli()
        .arg("calc")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--weight")
        .arg("70")
        .arg("--height")
        .arg("175")
        .assert()
        .success();
}

#[test]
fn test_corrupted_log_lines_ignored_during_read() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Write corrupted event log (invalid JSON lines)
    fs::create_dir_all(data_dir.join("analytics")).unwrap();
    let log_path = data_dir.join("analytics/bmi_calculations.jsonl");
    fs::write(&log_path, "{ invalid json }\n{ more invalid }")
        .expect("Failed to write corrupted log");

    // History reads past the bad lines (they are logged as warnings)
    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--days")
        .arg("7")
        .assert()
        .success()
        .stdout(predicates::str::contains("No calculations"));
}

#[test]
fn test_partial_log_line() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Log a real calculation first
    cli()
        .arg("calc")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--weight")
        .arg("70")
        .arg("--height")
        .arg("175")
        .assert()
        .success();

    // Simulate a crash during write: partial line with no newline
    let log_path = data_dir.join("analytics/bmi_calculations.jsonl");
    let mut file = fs::OpenOptions::new().append(true).open(&log_path).unwrap();
    write!(file, r#"{{"id":"partial"#).unwrap();
    drop(file);

    // The intact record is still visible
    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--days")
        .arg("7")
        .assert()
        .success()
        .stdout(predicates::str::contains("BMI  22.9"));

    // And new calculations can still be appended
    cli()
        .arg("calc")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--weight")
        .arg("80")
        .arg("--height")
        .arg("175")
        .assert()
        .success();
}

#[test]
fn test_corrupted_csv_rows_skipped() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // CSV archive with a header and one garbage row
    let csv_path = data_dir.join("calculations.csv");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(
        &csv_path,
        "id,recorded_at,bmi,category,weight_kg,height_m,weight_unit,height_unit\n\
         not-a-uuid,not-a-date,??,nothing,a,b,c,d\n",
    )
    .expect("Failed to write corrupted CSV");

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--days")
        .arg("7")
        .assert()
        .success()
        .stdout(predicates::str::contains("No calculations"));
}

#[test]
fn test_missing_data_dir() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("does-not-exist-yet");

    // First run creates everything it needs
    cli()
        .arg("calc")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--weight")
        .arg("70")
        .arg("--height")
        .arg("175")
        .assert()
        .success();

    assert!(data_dir.join("analytics/bmi_calculations.jsonl").exists());
}

#[test]
fn test_rollup_with_corrupted_lines_archives_valid_records() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // One valid record
    cli()
        .arg("calc")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--weight")
        .arg("70")
        .arg("--height")
        .arg("175")
        .assert()
        .success();

    // Plus a corrupted line
    let log_path = data_dir.join("analytics/bmi_calculations.jsonl");
    let mut file = fs::OpenOptions::new().append(true).open(&log_path).unwrap();
    writeln!(file, "{{ invalid json }}").unwrap();
    drop(file);

    cli()
        .arg("rollup")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicates::str::contains("Rolled up 1 calculations"));
}
