//! Command-line interface definition.
//!
//! - `weather-smoke run [PAGE]` - run the smoke scenarios against the page
//! - `weather-smoke list` - show the scenario catalogue
//! - `weather-smoke init` - write an example `weather-smoke.toml`

mod commands;
mod tests;

use clap::Parser;

pub use commands::{Command, InitArgs, RunArgs};

/// Browser smoke tests for the weather lookup page
#[derive(Parser, Debug)]
#[command(
    name = "weather-smoke",
    version,
    about = "Browser smoke tests for the weather lookup page",
    long_about = "Drives the weather page in headless Chrome: looks up cities, checks the\n\
                  displayed city and temperature, validation dialogs, forecast cards and\n\
                  theme classes. Exits non-zero if any scenario fails."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print only failures and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
