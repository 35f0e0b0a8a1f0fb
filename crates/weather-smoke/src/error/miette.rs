//! Miette diagnostic conversion for CLI errors.

use crate::error::{CliError, ConfigError};
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(ConfigError::InvalidValue { field, value, hint }) => {
            miette::miette!(
                help = hint,
                "Invalid value for '{}' in configuration: {}",
                field,
                value
            )
        }
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        CliError::Browser(e) => miette::miette!(
            help = "Is Chrome or Chromium installed? \
                    Point --chrome at the executable if it is not on PATH",
            "Browser error: {}",
            e
        ),
        CliError::ScenariosFailed { failed, total } => miette::miette!(
            help = "Re-run with --verbose for step-by-step logs, \
                    or --screenshots <DIR> to capture the page on failure",
            "{} of {} scenarios failed",
            failed,
            total
        ),
        _ => miette::miette!("{}", err),
    }
}
