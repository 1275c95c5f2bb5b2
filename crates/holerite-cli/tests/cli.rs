//! Integration tests for the holerite CLI.

use assert_cmd::Command;
use predicates::prelude::*;

const SAMPLE_PAYSLIP: &str = "\
Demonstrativo de Pagamento
Competência: 05/2024
SALARIO BASE 5000,00
INSS 828,39
Total de Vencimentos 5000,00
Total de Descontos 828,39
Líquido a Receber 4171,61
";

fn write_sample(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, SAMPLE_PAYSLIP).unwrap();
    path
}

#[test]
fn extract_json_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(&dir, "payslip.txt");

    Command::cargo_bin("holerite")
        .unwrap()
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"net_salary\""))
        .stdout(predicate::str::contains("4171.61"));
}

#[test]
fn extract_text_format() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(&dir, "payslip.txt");

    Command::cargo_bin("holerite")
        .unwrap()
        .args(["extract", "--format", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Period: 05/2024"))
        .stdout(predicate::str::contains("Status: ok"))
        .stdout(predicate::str::contains("SALARIO BASE"));
}

#[test]
fn extract_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(&dir, "payslip.txt");
    let output = dir.path().join("out.json");

    Command::cargo_bin("holerite")
        .unwrap()
        .arg("extract")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("\"total_earnings\""));
}

#[test]
fn extract_missing_input_fails() {
    Command::cargo_bin("holerite")
        .unwrap()
        .args(["extract", "no-such-file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn extract_strict_fails_on_degraded_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("degraded.txt");
    std::fs::write(&path, "SALARIO BASE 5000,00\n").unwrap();

    Command::cargo_bin("holerite")
        .unwrap()
        .args(["extract", "--strict"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("status warning"));
}

#[test]
fn audit_reports_fields() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(&dir, "payslip.txt");

    Command::cargo_bin("holerite")
        .unwrap()
        .arg("audit")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: ok"))
        .stdout(predicate::str::contains("Líquido a Receber"))
        .stdout(predicate::str::contains("Rows: 1 earnings, 1 deductions"));
}

#[test]
fn batch_writes_summary_csv() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(&dir, "a.txt");
    write_sample(&dir, "b.txt");
    let out_dir = dir.path().join("out");

    Command::cargo_bin("holerite")
        .unwrap()
        .arg("batch")
        .arg(dir.path().join("*.txt").to_str().unwrap())
        .arg("--output-dir")
        .arg(&out_dir)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful"));

    let summary = std::fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(summary.contains("a.txt"));
    assert!(summary.contains("b.txt"));
    assert!(out_dir.join("a.json").exists());
}

#[test]
fn batch_no_matches_fails() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("holerite")
        .unwrap()
        .arg("batch")
        .arg(dir.path().join("*.txt").to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn config_show_prints_defaults() {
    Command::cargo_bin("holerite")
        .unwrap()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deduction_keywords"))
        .stdout(predicate::str::contains("tolerance_cents"));
}

#[test]
fn config_keywords_lists_deduction_keywords() {
    Command::cargo_bin("holerite")
        .unwrap()
        .args(["config", "keywords"])
        .assert()
        .success()
        .stdout(predicate::str::contains("INSS"))
        .stdout(predicate::str::contains("VALE TRANSPORTE"));
}

#[test]
fn config_get_accepts_shortcut_keys() {
    Command::cargo_bin("holerite")
        .unwrap()
        .args(["config", "get", "tolerance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1"));
}

#[test]
fn config_init_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    Command::cargo_bin("holerite")
        .unwrap()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("tolerance_cents"));
}
