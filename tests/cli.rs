// End-to-end tests for the careerlaunch-insights CLI: exit codes,
// stdout, and data-file side effects, all against temp directories.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn insights() -> Command {
    Command::cargo_bin("careerlaunch-insights").expect("binary should exist")
}

#[test]
fn cli_version_flag() {
    insights()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("careerlaunch-insights"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_help_lists_subcommands() {
    insights()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analytics"))
        .stdout(predicate::str::contains("score"))
        .stdout(predicate::str::contains("seed"));
}

#[test]
fn seed_writes_the_data_file() {
    let dir = TempDir::new().expect("temp dir");
    let data = dir.path().join("students.json");

    insights()
        .args(["seed", "--data"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("100 demo students"));

    let raw = fs::read_to_string(&data).expect("data file");
    assert!(raw.contains("Alice Johnson"));
}

#[test]
fn analytics_falls_back_to_demo_cohort() {
    let dir = TempDir::new().expect("temp dir");

    insights()
        .args(["analytics", "--data"])
        .arg(dir.path().join("absent.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Cohort: 100 students"))
        .stdout(predicate::str::contains("Employment rate (6-mo):"))
        .stdout(predicate::str::contains("Completion by career path:"));
}

#[test]
fn analytics_accepts_track_and_year_filters() {
    let dir = TempDir::new().expect("temp dir");

    insights()
        .args(["analytics", "--track", "frontend", "--year", "2024", "--data"])
        .arg(dir.path().join("absent.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Frontend:"));
}

#[test]
fn analytics_rejects_unknown_track() {
    insights()
        .args(["analytics", "--track", "astronomy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn report_renders_markdown_to_file() {
    let dir = TempDir::new().expect("temp dir");
    let out = dir.path().join("report.md");

    insights()
        .args(["report", "--benchmark", "80", "--out"])
        .arg(&out)
        .args(["--data"])
        .arg(dir.path().join("absent.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let rendered = fs::read_to_string(&out).expect("report file");
    assert!(rendered.contains("# CareerLaunch Cohort Report"));
    assert!(rendered.contains("80% sector benchmark"));
    assert!(rendered.contains("## ROI Snapshot"));
}

#[test]
fn score_recommends_the_declared_interest() {
    let dir = TempDir::new().expect("temp dir");
    let answers = dir.path().join("answers.json");
    fs::write(&answers, r#"{"systems_interest": 2}"#).expect("answers file");

    insights()
        .args(["score", "--answers"])
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("Best-fit track: DevOps Engineer"))
        .stdout(predicate::str::contains("Track fit leaderboard:"))
        .stdout(predicate::str::contains("Suggested starter projects:"));
}

#[test]
fn score_rejects_malformed_answers() {
    let dir = TempDir::new().expect("temp dir");
    let answers = dir.path().join("answers.json");
    fs::write(&answers, "not json").expect("answers file");

    insights()
        .args(["score", "--answers"])
        .arg(&answers)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed answer map"));
}

#[test]
fn questions_prints_the_full_bank() {
    insights()
        .arg("questions")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. How comfortable are you"))
        .stdout(predicate::str::contains("[systems_interest]"));
}

#[test]
fn import_updates_and_persists_students() {
    let dir = TempDir::new().expect("temp dir");
    let data = dir.path().join("students.json");
    let csv = dir.path().join("import.csv");
    fs::write(
        &csv,
        "name,course,graduation_year,roadmap,progress,employment_status,employer\n\
         Alice Johnson,BSc Computer Science,2024,frontend,95,Employed,ACME Web\n\
         Zofia Nowak,MSc Cybersecurity,2026,backend,12,Seeking,\n",
    )
    .expect("csv file");

    insights()
        .args(["import", "--csv"])
        .arg(&csv)
        .args(["--data"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied 2 rows"));

    let raw = fs::read_to_string(&data).expect("data file");
    assert!(raw.contains("Zofia Nowak"));
    assert!(raw.contains("\"progress\": 95"));
}
