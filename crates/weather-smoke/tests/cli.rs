//! Binary-level tests. None of these reach a browser: they stop at
//! argument parsing, configuration or page resolution.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn smoke(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("weather-smoke").unwrap();
    cmd.current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("WEATHER_SMOKE_PAGE")
        .env_remove("WEATHER_SMOKE_SETTLE_TIMEOUT_SECS");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    smoke(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn list_prints_every_scenario() {
    let dir = TempDir::new().unwrap();
    let assert = smoke(&dir).arg("list").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let ids: Vec<_> = stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(
        ids,
        ["valid-city", "empty-city", "invalid-city", "forecast-cards", "weather-theme"]
    );
}

#[test]
fn unknown_scenario_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    smoke(&dir)
        .args(["run", "--only", "hail"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hail"));
}

#[test]
fn missing_config_file_fails_before_any_browser() {
    let dir = TempDir::new().unwrap();
    smoke(&dir)
        .args(["run", "--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn missing_page_fails_before_any_browser() {
    let dir = TempDir::new().unwrap();
    smoke(&dir)
        .args(["run", "missing/index.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Page not found"));
}

#[test]
fn malformed_env_value_is_reported() {
    let dir = TempDir::new().unwrap();
    smoke(&dir)
        .env("WEATHER_SMOKE_SETTLE_TIMEOUT_SECS", "soon")
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("settle_timeout_secs"));
}

#[test]
fn quiet_silences_status_output() {
    let dir = TempDir::new().unwrap();
    smoke(&dir)
        .args(["--quiet", "init"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    assert!(dir.path().join("weather-smoke.toml").exists());
}

#[test]
fn init_writes_loadable_config() {
    let dir = TempDir::new().unwrap();
    smoke(&dir).arg("init").assert().success();

    let written = std::fs::read_to_string(dir.path().join("weather-smoke.toml")).unwrap();
    assert!(written.contains("page = \"app/index.html\""));

    smoke(&dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    // The written file is picked up from the working directory and
    // still fails on the (absent) page, not on the config itself
    smoke(&dir)
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Page not found"));
}
