//! Error types for the smoke runner.
//!
//! - [`ScenarioError`] is what a single scenario fails with. It keeps
//!   browser-level failures (launch, missing element, expired wait) apart
//!   from oracle mismatches.
//! - [`ConfigError`] covers loading and validating configuration.
//! - [`CliError`] is what commands return; it becomes a miette report in
//!   `main`.

mod miette;

use crate::scenario::ScenarioId;
use std::path::PathBuf;
use thiserror::Error;
use weather_browser::BrowserError;

pub use self::miette::cli_error_to_miette;

/// Why a scenario failed.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The browser could not do what the scenario asked: launch, navigate,
    /// find an element, or see a condition within its timeout.
    #[error(transparent)]
    Browser(#[from] BrowserError),

    /// The page reached a state, but not the expected one.
    #[error("{scenario}: expected {expected}, got {actual}")]
    Assertion {
        /// Scenario whose oracle failed
        scenario: ScenarioId,
        /// What the oracle required
        expected: String,
        /// What the page actually showed
        actual: String,
    },
}

impl ScenarioError {
    /// Builds an assertion failure.
    pub fn assertion(
        scenario: ScenarioId,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        ScenarioError::Assertion {
            scenario,
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Browser setup errors outside any scenario (profile cleanup, etc.)
    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    /// At least one scenario failed
    #[error("{failed} of {total} scenarios failed")]
    ScenariosFailed {
        /// Number of failed scenarios
        failed: usize,
        /// Number of scenarios run
        total: usize,
    },

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O errors (writing reports or screenshots)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file given with --config doesn't exist
    #[error(
        "Config file not found: {}\n\nHint: Create weather-smoke.toml or fix the --config path",
        .0.display()
    )]
    NotFound(PathBuf),

    /// A value has the wrong type or is out of range
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },

    /// The page to test doesn't exist locally
    #[error(
        "Page not found: {0}\n\nHint: Pass the path to app/index.html, or a file:// or http:// URL"
    )]
    PageNotFound(String),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn assertion_message_shows_expected_and_actual() {
        let err = ScenarioError::assertion(
            ScenarioId::ValidCity,
            "city name containing \"London\"",
            "\"Paris, France\"",
        );
        assert_eq!(
            err.to_string(),
            "valid-city: expected city name containing \"London\", got \"Paris, France\""
        );
    }

    #[test]
    fn browser_errors_pass_through() {
        let err = ScenarioError::from(BrowserError::WaitTimeout {
            condition: "selector '#city'".into(),
            timeout: Duration::from_secs(10),
        });
        assert_eq!(
            err.to_string(),
            "wait condition 'selector '#city'' timed out after 10s"
        );
    }

    #[test]
    fn config_errors_convert() {
        let err: CliError = ConfigError::PageNotFound("app/index.html".into()).into();
        assert!(matches!(err, CliError::Config(ConfigError::PageNotFound(_))));
    }
}
