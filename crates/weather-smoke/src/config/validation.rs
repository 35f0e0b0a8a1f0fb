use crate::config::SmokeConfig;
use crate::error::{ConfigError, Result};
use std::time::Duration;

impl SmokeConfig {
    /// Rejects settings that would make every run fail or hang.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.scenarios.is_empty() {
            return Err(invalid(
                "scenarios",
                "[]",
                "Select at least one scenario; run `weather-smoke list` to see them",
            ));
        }

        if self.window_width == 0 || self.window_height == 0 {
            return Err(invalid(
                "window_width/window_height",
                &format!("{}x{}", self.window_width, self.window_height),
                "Both dimensions must be positive, e.g. 1920x1080",
            ));
        }

        if self.page_timeout_secs == 0 {
            return Err(invalid("page_timeout_secs", "0", "Use a positive number of seconds"));
        }

        if self.settle_timeout_secs == 0 {
            return Err(invalid("settle_timeout_secs", "0", "Use a positive number of seconds"));
        }

        if self.poll_interval_ms == 0
            || self.poll_interval() >= Duration::from_secs(self.settle_timeout_secs)
        {
            return Err(invalid(
                "poll_interval_ms",
                &self.poll_interval_ms.to_string(),
                "Must be positive and shorter than settle_timeout_secs",
            ));
        }

        if self.min_forecast_cards == 0 {
            return Err(invalid(
                "min_forecast_cards",
                "0",
                "A threshold of zero checks nothing; the page renders 5 cards",
            ));
        }

        if self.page.trim().is_empty() {
            return Err(invalid("page", "\"\"", "Pass the path to app/index.html or a URL"));
        }

        Ok(())
    }
}

fn invalid(field: &str, value: &str, hint: &str) -> crate::error::CliError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        hint: hint.to_string(),
    }
    .into()
}
