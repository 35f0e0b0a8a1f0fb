//! Status message functions for terminal output.

use super::{colors_enabled, quiet};
use owo_colors::OwoColorize;

/// Print a success message to stderr, unless quiet.
pub fn success(message: &str) {
    if quiet() {
        return;
    }
    if colors_enabled() {
        eprintln!("{} {}", "✓".green().bold(), message);
    } else {
        eprintln!("✓ {message}");
    }
}

/// Print an info message to stderr, unless quiet.
pub fn info(message: &str) {
    if quiet() {
        return;
    }
    if colors_enabled() {
        eprintln!("{} {}", "ℹ".blue().bold(), message);
    } else {
        eprintln!("ℹ {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_messages() {
        success("Success message");
        info("Info message");
    }
}
