//! Configuration with multi-source loading.
//!
//! Priority: CLI > environment (`WEATHER_SMOKE_*`) > `weather-smoke.toml` > defaults.

mod defaults;
mod loading;
mod validation;

use crate::error::{ConfigError, Result};
use crate::scenario::{RunSettings, ScenarioId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use weather_browser::{TestBrowserConfig, WaitConfig, page_url};

pub use defaults::*;
pub use loading::{CONFIG_FILE, ENV_PREFIX};

/// Settings for a smoke run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmokeConfig {
    /// Page under test: a local path or a URL
    #[serde(default = "default_page")]
    pub page: String,

    /// Scenarios to run (always executed in catalogue order)
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<ScenarioId>,

    /// Run Chrome without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Browser window and viewport width
    #[serde(default = "default_window_width")]
    pub window_width: u32,

    /// Browser window and viewport height
    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// Chrome executable; auto-detected when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<PathBuf>,

    /// Remove profile directories left by earlier runs before starting
    #[serde(default)]
    pub clean_profiles: bool,

    /// Bound on the wait for the city input after navigation
    #[serde(default = "default_page_timeout_secs")]
    pub page_timeout_secs: u64,

    /// Bound on each post-lookup condition
    #[serde(default = "default_settle_timeout_secs")]
    pub settle_timeout_secs: u64,

    /// How often conditions are re-checked
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Tolerate a missing dialog for an unknown city (legacy behavior)
    #[serde(default)]
    pub lenient_dialogs: bool,

    /// Minimum number of forecast cards after a lookup
    #[serde(default = "default_min_forecast_cards")]
    pub min_forecast_cards: usize,

    /// Save a screenshot of the page here when a scenario fails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_dir: Option<PathBuf>,

    /// Write the JSON run report here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            page: default_page(),
            scenarios: default_scenarios(),
            headless: default_headless(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            chrome_path: None,
            clean_profiles: false,
            page_timeout_secs: default_page_timeout_secs(),
            settle_timeout_secs: default_settle_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            lenient_dialogs: false,
            min_forecast_cards: default_min_forecast_cards(),
            screenshot_dir: None,
            report: None,
        }
    }
}

impl SmokeConfig {
    /// Browser launch settings.
    #[must_use]
    pub fn browser_config(&self) -> TestBrowserConfig {
        let mut config =
            TestBrowserConfig::default().with_window_size(self.window_width, self.window_height);
        if !self.headless {
            config = config.visible();
        }
        if let Some(path) = &self.chrome_path {
            config = config.with_chrome_path(path.clone());
        }
        config
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Wait used for the city input after navigation.
    #[must_use]
    pub fn page_wait(&self) -> WaitConfig {
        WaitConfig::new(Duration::from_secs(self.page_timeout_secs), self.poll_interval())
    }

    /// Wait used for each post-lookup condition.
    #[must_use]
    pub fn settle_wait(&self) -> WaitConfig {
        WaitConfig::new(Duration::from_secs(self.settle_timeout_secs), self.poll_interval())
    }

    /// Resolves the page location and builds the per-run settings.
    ///
    /// # Errors
    ///
    /// Returns `PageNotFound` if `page` is a local path that does not exist.
    pub fn run_settings(&self) -> Result<RunSettings> {
        let page_url =
            page_url(&self.page).map_err(|_| ConfigError::PageNotFound(self.page.clone()))?;

        Ok(RunSettings {
            page_url,
            page_wait: self.page_wait(),
            settle_wait: self.settle_wait(),
            lenient_dialogs: self.lenient_dialogs,
            min_forecast_cards: self.min_forecast_cards,
            screenshot_dir: self.screenshot_dir.clone(),
        })
    }

    /// Example `weather-smoke.toml` content.
    #[must_use]
    pub fn example_toml() -> String {
        format!(
            r#"# weather-smoke configuration
page = "{page}"
scenarios = ["valid-city", "empty-city", "invalid-city", "forecast-cards", "weather-theme"]
headless = true
window_width = {width}
window_height = {height}
# chrome_path = "/usr/bin/chromium"
clean_profiles = false
page_timeout_secs = {page_timeout}
settle_timeout_secs = {settle_timeout}
poll_interval_ms = {poll}
lenient_dialogs = false
min_forecast_cards = {cards}
# screenshot_dir = "target/smoke-screenshots"
# report = "target/smoke-report.json"
"#,
            page = default_page(),
            width = default_window_width(),
            height = default_window_height(),
            page_timeout = default_page_timeout_secs(),
            settle_timeout = default_settle_timeout_secs(),
            poll = default_poll_interval_ms(),
            cards = default_min_forecast_cards(),
        )
    }
}
