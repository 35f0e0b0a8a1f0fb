//! Run command implementation.

use crate::cli::RunArgs;
use crate::config::SmokeConfig;
use crate::error::{CliError, Result};
use crate::scenario::{RunReport, Scenario, run_all_with};
use crate::ui;
use std::path::Path;
use tracing::{debug, info};
use weather_browser::{ChromeProvider, SessionProvider};

/// Execute the run command.
///
/// # Process
///
/// 1. Load and validate configuration
/// 2. Optionally remove stale browser profiles
/// 3. Run the selected scenarios, each in a fresh browser
/// 4. Print the summary and write the JSON report if asked
///
/// # Errors
///
/// Returns configuration errors before any browser starts, and
/// `ScenariosFailed` if at least one scenario failed.
pub async fn execute(args: RunArgs) -> Result<()> {
    let config = SmokeConfig::load(&args)?;
    config.validate()?;

    let provider = ChromeProvider::new(config.browser_config());
    if config.clean_profiles {
        let removed = provider.clean_stale_profiles()?;
        if removed > 0 {
            ui::info(&format!("Removed {removed} stale browser profile(s)"));
        }
    }

    let report = run_scenarios(&config, &provider).await?;
    finish(&config, &report).await
}

/// Runs the configured scenarios against `provider` and prints each result.
///
/// # Errors
///
/// Returns `PageNotFound` if the configured page cannot be resolved.
pub async fn run_scenarios(
    config: &SmokeConfig,
    provider: &dyn SessionProvider,
) -> Result<RunReport> {
    let settings = config.run_settings()?;
    let scenarios = Scenario::select(&config.scenarios);

    info!("Testing {}", settings.page_url);
    ui::info(&format!(
        "Running {} scenario{} against {}",
        scenarios.len(),
        if scenarios.len() == 1 { "" } else { "s" },
        config.page
    ));

    Ok(run_all_with(provider, &scenarios, &settings, ui::print_scenario).await)
}

async fn finish(config: &SmokeConfig, report: &RunReport) -> Result<()> {
    ui::print_run_summary(report);

    if let Some(path) = &config.report {
        write_report(path, report).await?;
        ui::info(&format!("Report written to {}", path.display()));
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::ScenariosFailed {
            failed: report.failed(),
            total: report.total(),
        })
    }
}

/// Writes `report` as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns I/O or serialization errors.
pub async fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(report)?;
    tokio::fs::write(path, json).await?;
    debug!("Wrote report to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{Outcome, ScenarioId, ScenarioReport};
    use std::time::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn report_file_is_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("report.json");
        let report = RunReport {
            scenarios: vec![ScenarioReport {
                scenario: ScenarioId::EmptyCity,
                outcome: Outcome::Passed,
                elapsed: Duration::from_millis(120),
            }],
            elapsed: Duration::from_millis(150),
        };

        write_report(&path, &report).await.unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["scenarios"][0]["scenario"], "empty-city");
        assert_eq!(json["scenarios"][0]["status"], "passed");
    }

    #[tokio::test]
    async fn failed_run_is_an_error() {
        let report = RunReport {
            scenarios: vec![ScenarioReport {
                scenario: ScenarioId::ValidCity,
                outcome: Outcome::Failed {
                    kind: crate::scenario::FailureKind::Launch,
                    message: "no chrome".into(),
                },
                elapsed: Duration::from_millis(5),
            }],
            elapsed: Duration::from_millis(5),
        };

        let err = finish(&SmokeConfig::default(), &report).await.unwrap_err();
        assert!(matches!(err, CliError::ScenariosFailed { failed: 1, total: 1 }));
    }
}
