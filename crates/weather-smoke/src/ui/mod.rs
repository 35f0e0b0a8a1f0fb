//! Terminal output for humans: status lines, per-scenario results and the
//! run summary. Everything goes to stderr except `list`, which prints to
//! stdout so it can be piped. In quiet mode only failures and the summary
//! of a failed run are printed.
//!
//! ```no_run
//! use weather_smoke::ui;
//!
//! ui::init(false, false);
//! ui::info("Running 5 scenarios");
//! ui::success("All scenarios passed");
//! ```

mod format;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{format_duration, print_run_summary, print_scenario};
pub use messages::{info, success};

static COLORS: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

/// Check if color output should be enabled.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; without either, colors follow
/// whether stderr is a terminal.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended_stderr()
}

/// Decide once whether status output is colored and whether it is quiet.
pub fn init(no_color: bool, quiet: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
    QUIET.store(quiet, Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

pub(crate) fn quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}
