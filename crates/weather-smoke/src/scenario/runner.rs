//! Sequential scenario runner.
//!
//! Each scenario gets a fresh session from the provider and gives it back
//! on every exit path. A failing scenario never stops the ones after it.

use super::report::{Outcome, RunReport, ScenarioReport};
use super::Scenario;
use crate::error::ScenarioError;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use weather_browser::{Session, SessionProvider, WaitConfig};

/// Knobs shared by every scenario in a run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// URL of the weather page.
    pub page_url: String,
    /// Bound on the wait for the city input after navigation.
    pub page_wait: WaitConfig,
    /// Bound on each post-lookup condition.
    pub settle_wait: WaitConfig,
    /// Treat a missing invalid-city dialog as tolerated instead of failed.
    pub lenient_dialogs: bool,
    /// Minimum number of forecast cards.
    pub min_forecast_cards: usize,
    /// Where to save a PNG of the page when a scenario fails.
    pub screenshot_dir: Option<PathBuf>,
}

/// Runs one scenario in its own session.
pub async fn run_scenario(
    provider: &dyn SessionProvider,
    scenario: &Scenario,
    settings: &RunSettings,
) -> ScenarioReport {
    let start = Instant::now();
    info!(scenario = %scenario.id, "Running: {}", scenario.title);

    let outcome = match provider.acquire().await {
        Ok(session) => run_in_session(session, scenario, settings).await,
        Err(e) => Outcome::failed(&ScenarioError::from(e)),
    };

    match &outcome {
        Outcome::Passed => info!(scenario = %scenario.id, "Passed"),
        Outcome::Tolerated { note } => warn!(scenario = %scenario.id, "Tolerated: {}", note),
        Outcome::Failed { kind, message } => {
            error!(scenario = %scenario.id, kind = ?kind, "Failed: {}", message);
        }
    }

    ScenarioReport {
        scenario: scenario.id,
        outcome,
        elapsed: start.elapsed(),
    }
}

async fn run_in_session(
    session: Box<dyn Session>,
    scenario: &Scenario,
    settings: &RunSettings,
) -> Outcome {
    let result = scenario.execute(session.as_ref(), settings).await;

    if result.is_err() {
        if let Some(dir) = &settings.screenshot_dir {
            save_screenshot(session.as_ref(), dir, scenario).await;
        }
    }

    if let Err(e) = session.close().await {
        warn!(scenario = %scenario.id, "Failed to release browser session: {}", e);
    }

    match result {
        Ok(outcome) => outcome,
        Err(e) => Outcome::failed(&e),
    }
}

async fn save_screenshot(session: &dyn Session, dir: &std::path::Path, scenario: &Scenario) {
    let path = dir.join(format!("{}.png", scenario.id));
    let written = async {
        let png = session.screenshot().await.map_err(|e| e.to_string())?;
        tokio::fs::create_dir_all(dir).await.map_err(|e| e.to_string())?;
        tokio::fs::write(&path, png).await.map_err(|e| e.to_string())
    };

    match written.await {
        Ok(()) => info!(scenario = %scenario.id, "Saved screenshot to {}", path.display()),
        Err(e) => warn!(scenario = %scenario.id, "Could not save screenshot: {}", e),
    }
}

/// Runs `scenarios` one after another.
pub async fn run_all(
    provider: &dyn SessionProvider,
    scenarios: &[Scenario],
    settings: &RunSettings,
) -> RunReport {
    run_all_with(provider, scenarios, settings, |_| {}).await
}

/// Like [`run_all`], calling `on_report` as soon as each scenario finishes.
pub async fn run_all_with<F>(
    provider: &dyn SessionProvider,
    scenarios: &[Scenario],
    settings: &RunSettings,
    mut on_report: F,
) -> RunReport
where
    F: FnMut(&ScenarioReport),
{
    let start = Instant::now();
    let mut report = RunReport::default();

    for scenario in scenarios {
        let entry = run_scenario(provider, scenario, settings).await;
        on_report(&entry);
        report.scenarios.push(entry);
    }

    report.elapsed = start.elapsed();
    debug!("{}", report.summary_line());
    report
}
