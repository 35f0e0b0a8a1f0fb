//! Formatting for durations, scenario results and the run summary.

use super::{colors_enabled, quiet};
use crate::scenario::{Outcome, RunReport, Scenario, ScenarioReport};
use console::Term;
use owo_colors::OwoColorize;
use std::time::Duration;

/// Format duration in human-readable format.
///
/// ```
/// use std::time::Duration;
/// use weather_smoke::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{total_ms}ms")
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print one finished scenario to stderr. Quiet mode prints only failures.
pub fn print_scenario(report: &ScenarioReport) {
    if !is_reported(&report.outcome, quiet()) {
        return;
    }

    let title = Scenario::get(report.scenario).title;
    let elapsed = format!("({})", format_duration(report.elapsed));
    let color = colors_enabled();

    match &report.outcome {
        Outcome::Passed if color => {
            eprintln!("  {} {} {}", "✓".green().bold(), title, elapsed.dimmed());
        }
        Outcome::Passed => eprintln!("  ✓ {title} {elapsed}"),
        Outcome::Tolerated { note } if color => {
            eprintln!("  {} {} {}", "~".yellow().bold(), title, elapsed.dimmed());
            eprintln!("      {}", note.yellow());
        }
        Outcome::Tolerated { note } => {
            eprintln!("  ~ {title} {elapsed}");
            eprintln!("      {note}");
        }
        Outcome::Failed { kind, message } if color => {
            eprintln!(
                "  {} {} {} {}",
                "✗".red().bold(),
                title.bold(),
                format!("[{}]", kind_label(*kind)).red(),
                elapsed.dimmed()
            );
            eprintln!("      {}", message.red());
        }
        Outcome::Failed { kind, message } => {
            eprintln!("  ✗ {title} [{}] {elapsed}", kind_label(*kind));
            eprintln!("      {message}");
        }
    }
}

/// Print the closing summary of a run to stderr. Quiet mode prints it only
/// when the run failed.
pub fn print_run_summary(report: &RunReport) {
    if quiet() && report.is_success() {
        return;
    }

    let width = usize::from(Term::stderr().size().1).clamp(20, 80);
    let rule = "─".repeat(width);
    let line = report.summary_line();

    if colors_enabled() {
        eprintln!("{}", rule.dimmed());
        if report.is_success() {
            eprintln!("  {}", line.green().bold());
        } else {
            eprintln!("  {}", line.red().bold());
        }
    } else {
        eprintln!("{rule}");
        eprintln!("  {line}");
    }
}

fn is_reported(outcome: &Outcome, quiet: bool) -> bool {
    !quiet || matches!(outcome, Outcome::Failed { .. })
}

fn kind_label(kind: crate::scenario::FailureKind) -> &'static str {
    use crate::scenario::FailureKind;

    match kind {
        FailureKind::Launch => "launch",
        FailureKind::PageState => "page state",
        FailureKind::Browser => "browser",
        FailureKind::Assertion => "assertion",
    }
}
