//! weather-smoke - browser smoke tests for the weather lookup page.
//!
//! Each scenario launches its own Chrome through a [`SessionProvider`],
//! drives the page like a user would, checks one oracle and releases the
//! browser again whatever happened.
//!
//! # Architecture
//!
//! - [`scenario`] - the catalogue, oracles, runner and reports
//! - [`config`] - layered configuration (defaults, file, env, CLI)
//! - [`error`] - scenario, config and CLI errors
//! - [`logger`] - tracing setup
//! - [`ui`] - terminal output
//! - `cli` / `commands` - the `weather-smoke` binary
//!
//! [`SessionProvider`]: weather_browser::SessionProvider

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod scenario;
pub mod ui;

pub use config::SmokeConfig;
pub use error::{CliError, ConfigError, Result, ScenarioError};
pub use scenario::{Outcome, RunReport, RunSettings, Scenario, ScenarioId, ScenarioReport};
