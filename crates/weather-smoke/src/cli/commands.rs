use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::scenario::ScenarioId;

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run smoke scenarios against the weather page
    ///
    /// Every selected scenario runs in its own fresh browser, one after
    /// another. A summary line is printed at the end and the exit status is
    /// non-zero if any scenario failed.
    Run(RunArgs),

    /// List the available scenarios
    List,

    /// Write an example weather-smoke.toml
    Init(InitArgs),
}

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Page under test: path to index.html, or a file://, http:// or https:// URL
    ///
    /// Defaults to app/index.html.
    #[arg(value_name = "PAGE")]
    pub page: Option<String>,

    /// Path to config file (default: ./weather-smoke.toml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only run these scenarios (comma-separated or repeated)
    ///
    /// Examples:
    ///   weather-smoke run --only valid-city,empty-city
    ///   weather-smoke run --only weather-theme --only forecast-cards
    #[arg(long, value_enum, value_delimiter = ',', value_name = "ID")]
    pub only: Vec<ScenarioId>,

    /// Show the browser window
    #[arg(long)]
    pub visible: bool,

    /// Chrome/Chromium executable (default: auto-detect)
    #[arg(long, value_name = "PATH")]
    pub chrome: Option<PathBuf>,

    /// Remove browser profiles left behind by earlier runs first
    #[arg(long)]
    pub clean_profiles: bool,

    /// Only warn when the unknown-city dialog never appears
    ///
    /// Reproduces the old tolerant behavior. By default a missing dialog
    /// fails the invalid-city scenario.
    #[arg(long)]
    pub lenient_dialogs: bool,

    /// Minimum number of forecast cards expected after a lookup
    #[arg(long, value_name = "N")]
    pub min_forecast_cards: Option<usize>,

    /// Save a screenshot of the page to DIR when a scenario fails
    #[arg(long, value_name = "DIR")]
    pub screenshots: Option<PathBuf>,

    /// Write a JSON report of the run to FILE
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the config file
    #[arg(default_value = "weather-smoke.toml", value_name = "FILE")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
