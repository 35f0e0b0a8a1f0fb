//! Logging setup on top of `tracing`.
//!
//! - `--verbose`: debug level for the smoke runner and browser crates
//! - `--quiet`: errors only
//! - otherwise `RUST_LOG`, falling back to info
//!
//! Logs go to stderr so the `list` output and piped reports stay clean.
//!
//! ```rust,no_run
//! use weather_smoke::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("Starting smoke run");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "weather_smoke=debug,weather_browser=debug";
const QUIET_FILTER: &str = "weather_smoke=error,weather_browser=error";
const DEFAULT_FILTER: &str = "weather_smoke=info,weather_browser=info";

/// Initialize the global tracing subscriber.
///
/// Call once at startup, before anything logs. `verbose` wins over `quiet`.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(build_filter(verbose, quiet), no_color);
}

/// Initialize the global subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if let Some(directives) = fixed_directives(verbose, quiet) {
        EnvFilter::new(directives)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

fn fixed_directives(verbose: bool, quiet: bool) -> Option<&'static str> {
    if verbose {
        Some(VERBOSE_FILTER)
    } else if quiet {
        Some(QUIET_FILTER)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_wins_over_quiet() {
        assert_eq!(fixed_directives(true, true), Some(VERBOSE_FILTER));
        assert_eq!(fixed_directives(false, true), Some(QUIET_FILTER));
        assert_eq!(fixed_directives(false, false), None);
    }

    #[test]
    fn filters_parse() {
        for directives in [VERBOSE_FILTER, QUIET_FILTER, DEFAULT_FILTER] {
            assert!(EnvFilter::try_new(directives).is_ok(), "{directives}");
        }
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logger(false, true, true);
        init_logger(true, false, true);
    }
}
