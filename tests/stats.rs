mod common;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

use common::{SALES_CSV, TestWorkspace};

#[test]
fn stats_defaults_to_numeric_columns() {
    let workspace = TestWorkspace::new();
    let csv_path = workspace.write_file("sales.csv", SALES_CSV);
    Command::cargo_bin("csv-insight")
        .expect("binary exists")
        .args(["stats", "-i", csv_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            contains("column")
                .and(contains("id"))
                .and(contains("revenue"))
                .and(contains("mean")),
        );
}

#[test]
fn stats_reports_known_quantities() {
    let workspace = TestWorkspace::new();
    let csv_path = workspace.write_file("values.csv", "v\n1\n2\n3\n4\n5\n");
    let output = Command::cargo_bin("csv-insight")
        .expect("binary exists")
        .args(["stats", "-i", csv_path.to_str().unwrap(), "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stats: serde_json::Value = serde_json::from_slice(&output).expect("json output");
    let stat = &stats[0];
    assert_eq!(stat["column"], "v");
    assert_eq!(stat["mean"], 3.0);
    assert_eq!(stat["min"], 1.0);
    assert_eq!(stat["max"], 5.0);
    let std_dev = stat["std_dev"].as_f64().expect("std_dev");
    assert!((std_dev - 1.4142135623730951).abs() < 1e-12);
    assert_eq!(stat["outlier_count"], 0);
}

#[test]
fn stats_counts_a_genuine_outlier() {
    let workspace = TestWorkspace::new();
    let csv_path = workspace.write_file("outlier.csv", "v\n1\n2\n3\n4\n5\n100\n");
    let output = Command::cargo_bin("csv-insight")
        .expect("binary exists")
        .args(["stats", "-i", csv_path.to_str().unwrap(), "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stats: serde_json::Value = serde_json::from_slice(&output).expect("json output");
    assert_eq!(stats[0]["outlier_count"], 1);
}

#[test]
fn stats_treats_unparseable_numeric_values_as_zero() {
    let workspace = TestWorkspace::new();
    // "oops" coerces to 0, dragging the minimum down.
    let csv_path = workspace.write_file("dirty.csv", "v\n10\n20\n30\n40\noops\n");
    let output = Command::cargo_bin("csv-insight")
        .expect("binary exists")
        .args(["stats", "-i", csv_path.to_str().unwrap(), "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stats: serde_json::Value = serde_json::from_slice(&output).expect("json output");
    assert_eq!(stats[0]["min"], 0.0);
    assert_eq!(stats[0]["mean"], 20.0);
}

#[test]
fn stats_rejects_unknown_and_categorical_columns() {
    let workspace = TestWorkspace::new();
    let csv_path = workspace.write_file("sales.csv", SALES_CSV);
    Command::cargo_bin("csv-insight")
        .expect("binary exists")
        .args(["stats", "-i", csv_path.to_str().unwrap(), "-C", "missing"])
        .assert()
        .failure()
        .stderr(contains("Column 'missing' not found"));

    Command::cargo_bin("csv-insight")
        .expect("binary exists")
        .args(["stats", "-i", csv_path.to_str().unwrap(), "-C", "region"])
        .assert()
        .failure()
        .stderr(contains("Column 'region' is categorical"));
}

#[test]
fn stats_errors_when_no_numeric_columns_exist() {
    let workspace = TestWorkspace::new();
    let csv_path = workspace.write_file("labels.csv", "a,b\nx,y\nu,v\n");
    Command::cargo_bin("csv-insight")
        .expect("binary exists")
        .args(["stats", "-i", csv_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("No numeric columns available"));
}

#[test]
fn stats_limit_bounds_ingested_rows() {
    let workspace = TestWorkspace::new();
    let csv_path = workspace.write_file("values.csv", "v\n1\n2\n3\n4\n5\n100\n");
    let output = Command::cargo_bin("csv-insight")
        .expect("binary exists")
        .args([
            "stats",
            "-i",
            csv_path.to_str().unwrap(),
            "--limit",
            "5",
            "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stats: serde_json::Value = serde_json::from_slice(&output).expect("json output");
    assert_eq!(stats[0]["max"], 5.0);
    assert_eq!(stats[0]["mean"], 3.0);
}
