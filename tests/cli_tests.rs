//! Binary-level tests: exit codes and emitted files

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SAMPLE_REPORT: &str = "\
Scientific Real-time Determinism Test

=== Pure Computation ===
Min: 1000, Max: 1080, Avg: 1020
Jitter: 80, Std Dev: 15.2
95th percentile: 1050, 99th percentile: 1070
Coefficient of Variation: 0.0149

=== Nested Branch Pattern ===
Min: 1300, Max: 2600, Avg: 1700
Jitter: 1300, Std Dev: 260.1
95th percentile: 2300, 99th percentile: 2500
Coefficient of Variation: 0.1530
";

fn write_report(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn experiment_dir(result_dir: &std::path::Path) -> std::path::PathBuf {
    let mut entries: Vec<_> = fs::read_dir(result_dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    entries.sort();
    assert_eq!(entries.len(), 1, "expected exactly one experiment dir");
    entries.pop().unwrap()
}

#[test]
fn test_single_run_produces_csv_and_summary() {
    let dir = TempDir::new().unwrap();
    let report = write_report(&dir, "bench.txt", SAMPLE_REPORT);
    let result_dir = dir.path().join("result");

    Command::cargo_bin("tasar")
        .unwrap()
        .arg(&report)
        .arg("--result-dir")
        .arg(&result_dir)
        .arg("--no-html")
        .assert()
        .success()
        .stdout(predicate::str::contains("Real-time analysis summary"))
        .stdout(predicate::str::contains("Pure Computation"));

    let experiment = experiment_dir(&result_dir);
    let csv = fs::read_to_string(experiment.join("rt_analysis.csv")).unwrap();
    assert!(csv.starts_with("Test_Case,Min_Cycles"));
    assert!(csv.contains("Pure Computation,1000,1080,1020"));

    // Raw input archived, info file written
    assert!(experiment.join("experiment_info.txt").exists());
    let archived = fs::read_dir(&experiment)
        .unwrap()
        .any(|entry| {
            entry
                .unwrap()
                .file_name()
                .to_string_lossy()
                .starts_with("benchmark_raw_")
        });
    assert!(archived);
}

#[test]
fn test_single_run_html_report() {
    let dir = TempDir::new().unwrap();
    let report = write_report(&dir, "bench.txt", SAMPLE_REPORT);
    let result_dir = dir.path().join("result");

    Command::cargo_bin("tasar")
        .unwrap()
        .arg(&report)
        .arg("--result-dir")
        .arg(&result_dir)
        .assert()
        .success();

    let experiment = experiment_dir(&result_dir);
    let html_file = fs::read_dir(&experiment)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .find(|path| path.extension().is_some_and(|ext| ext == "html"))
        .expect("html report missing");
    let html = fs::read_to_string(html_file).unwrap();
    assert!(html.contains("<svg"));
}

#[test]
fn test_single_run_json_format() {
    let dir = TempDir::new().unwrap();
    let report = write_report(&dir, "bench.txt", SAMPLE_REPORT);
    let result_dir = dir.path().join("result");

    Command::cargo_bin("tasar")
        .unwrap()
        .arg(&report)
        .arg("--result-dir")
        .arg(&result_dir)
        .arg("--format")
        .arg("json")
        .arg("--no-html")
        .assert()
        .success();

    let experiment = experiment_dir(&result_dir);
    let json = fs::read_to_string(experiment.join("rt_analysis.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["tests"][0]["name"], "Pure Computation");
}

#[test]
fn test_multi_run_aggregation_csv() {
    let dir = TempDir::new().unwrap();
    let run1 = write_report(&dir, "run1.txt", SAMPLE_REPORT);
    let run2 = write_report(&dir, "run2.txt", &SAMPLE_REPORT.replace("Avg: 1020", "Avg: 1120"));
    let result_dir = dir.path().join("result");

    Command::cargo_bin("tasar")
        .unwrap()
        .arg(&run1)
        .arg(&run2)
        .arg("--result-dir")
        .arg(&result_dir)
        .arg("--ci-method")
        .arg("student-t")
        .assert()
        .success()
        .stdout(predicate::str::contains("CI method: student-t"));

    let experiment = experiment_dir(&result_dir);
    let csv = fs::read_to_string(experiment.join("rt_analysis.csv")).unwrap();
    assert!(csv.starts_with("Test_Case,Metric,Mean"));
    assert!(csv.contains("Pure Computation,avg,1070.00"));
    assert!(csv.contains("student-t"));
}

#[test]
fn test_multi_run_normal_fallback_flag() {
    let dir = TempDir::new().unwrap();
    let run1 = write_report(&dir, "run1.txt", SAMPLE_REPORT);
    let run2 = write_report(&dir, "run2.txt", SAMPLE_REPORT);
    let result_dir = dir.path().join("result");

    Command::cargo_bin("tasar")
        .unwrap()
        .arg(&run1)
        .arg(&run2)
        .arg("--result-dir")
        .arg(&result_dir)
        .arg("--ci-method")
        .arg("normal")
        .assert()
        .success()
        .stdout(predicate::str::contains("CI method: normal-approx"));
}

#[test]
fn test_report_without_blocks_fails() {
    let dir = TempDir::new().unwrap();
    let report = write_report(&dir, "bench.txt", "no benchmark data in here\n");
    let result_dir = dir.path().join("result");

    Command::cargo_bin("tasar")
        .unwrap()
        .arg(&report)
        .arg("--result-dir")
        .arg(&result_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no valid data"));
}

#[test]
fn test_missing_file_fails() {
    Command::cargo_bin("tasar")
        .unwrap()
        .arg("does-not-exist.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read report"));
}

#[test]
fn test_no_archive_skips_raw_copy() {
    let dir = TempDir::new().unwrap();
    let report = write_report(&dir, "bench.txt", SAMPLE_REPORT);
    let result_dir = dir.path().join("result");

    Command::cargo_bin("tasar")
        .unwrap()
        .arg(&report)
        .arg("--result-dir")
        .arg(&result_dir)
        .arg("--no-html")
        .arg("--no-archive")
        .assert()
        .success();

    let experiment = experiment_dir(&result_dir);
    let archived = fs::read_dir(&experiment).unwrap().any(|entry| {
        entry
            .unwrap()
            .file_name()
            .to_string_lossy()
            .starts_with("benchmark_raw_")
    });
    assert!(!archived);
}
