use crate::cli::RunArgs;
use crate::config::SmokeConfig;
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file picked up from the working directory when present.
pub const CONFIG_FILE: &str = "weather-smoke.toml";

/// Prefix for environment overrides, e.g. `WEATHER_SMOKE_SETTLE_TIMEOUT_SECS=30`.
pub const ENV_PREFIX: &str = "WEATHER_SMOKE_";

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Default, Serialize)]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scenarios: Option<Vec<crate::scenario::ScenarioId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    headless: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chrome_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    clean_profiles: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lenient_dialogs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_forecast_cards: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    screenshot_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<PathBuf>,
}

impl From<&RunArgs> for CliOverrides {
    fn from(args: &RunArgs) -> Self {
        // Flags only ever switch behavior on; absent flags defer to config
        Self {
            page: args.page.clone(),
            scenarios: (!args.only.is_empty()).then(|| args.only.clone()),
            headless: args.visible.then_some(false),
            chrome_path: args.chrome.clone(),
            clean_profiles: args.clean_profiles.then_some(true),
            lenient_dialogs: args.lenient_dialogs.then_some(true),
            min_forecast_cards: args.min_forecast_cards,
            screenshot_dir: args.screenshots.clone(),
            report: args.report.clone(),
        }
    }
}

impl SmokeConfig {
    /// Loads configuration for `run`.
    /// Priority: CLI args > environment variables > config file > defaults
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `--config` names a missing file, and
    /// `InvalidValue` if any layer has a malformed value.
    pub fn load(args: &RunArgs) -> Result<Self> {
        let config = Self::figment(args.config.as_deref())?
            .merge(Serialized::defaults(CliOverrides::from(args)))
            .extract()
            .map_err(|e| invalid("configuration", e))?;

        debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }

    /// Defaults, config file and environment, without CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `config_path` is given and does not exist.
    pub fn figment(config_path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = Path::new(CONFIG_FILE);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };

        if let Some(path) = config_file {
            debug!("Loading config from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }
}

fn invalid(field: &str, err: figment::Error) -> crate::error::CliError {
    ConfigError::InvalidValue {
        field: err
            .path
            .last()
            .cloned()
            .unwrap_or_else(|| field.to_string()),
        value: err.kind.to_string(),
        hint: "Check weather-smoke.toml and WEATHER_SMOKE_* variables for typos and field types"
            .to_string(),
    }
    .into()
}
