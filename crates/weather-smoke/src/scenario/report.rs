//! Per-scenario outcomes and the run summary.

use crate::error::ScenarioError;
use crate::scenario::ScenarioId;
use crate::ui::format_duration;
use serde::{Serialize, Serializer};
use std::time::Duration;

/// Broad category of a failure, kept in reports so CI can tell a broken
/// environment from a broken page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    /// The browser could not be launched or connected to.
    Launch,
    /// An element never appeared or a wait expired.
    PageState,
    /// Navigation or script execution failed.
    Browser,
    /// The page showed something other than what the oracle expects.
    Assertion,
}

impl From<&ScenarioError> for FailureKind {
    fn from(err: &ScenarioError) -> Self {
        use weather_browser::BrowserError;

        match err {
            ScenarioError::Assertion { .. } => FailureKind::Assertion,
            ScenarioError::Browser(e) if e.is_page_state() => FailureKind::PageState,
            ScenarioError::Browser(
                BrowserError::LaunchFailed { .. } | BrowserError::ConnectionFailed(_),
            ) => FailureKind::Launch,
            ScenarioError::Browser(_) => FailureKind::Browser,
        }
    }
}

/// How a scenario ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Outcome {
    /// The oracle held.
    Passed,
    /// A known gap was tolerated because configuration asked for it.
    Tolerated {
        /// What was tolerated
        note: String,
    },
    /// The scenario failed.
    Failed {
        /// Failure category
        kind: FailureKind,
        /// Full error message
        message: String,
    },
}

impl Outcome {
    /// Converts a scenario error into a failed outcome.
    #[must_use]
    pub fn failed(err: &ScenarioError) -> Self {
        Outcome::Failed {
            kind: FailureKind::from(err),
            message: err.to_string(),
        }
    }

    /// True for `Failed`.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

/// Result of one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    /// Which scenario ran
    pub scenario: ScenarioId,
    /// How it ended
    #[serde(flatten)]
    pub outcome: Outcome,
    /// Wall time including browser launch and shutdown
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
}

/// Results of a whole run, in execution order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// One entry per scenario run
    pub scenarios: Vec<ScenarioReport>,
    /// Wall time of the whole run
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
}

impl RunReport {
    /// Number of scenarios run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.scenarios.len()
    }

    /// Number of scenarios that passed outright.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Passed))
    }

    /// Number of scenarios passed with a tolerated gap.
    #[must_use]
    pub fn tolerated(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Tolerated { .. }))
    }

    /// Number of failed scenarios.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(Outcome::is_failure)
    }

    /// True when nothing failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// The report for `id`, if it ran.
    #[must_use]
    pub fn get(&self, id: ScenarioId) -> Option<&ScenarioReport> {
        self.scenarios.iter().find(|r| r.scenario == id)
    }

    /// One-line summary, e.g.
    /// `5 scenarios: 4 passed, 0 tolerated, 1 failed in 12.40s`.
    #[must_use]
    pub fn summary_line(&self) -> String {
        let total = self.total();
        format!(
            "{} scenario{}: {} passed, {} tolerated, {} failed in {}",
            total,
            if total == 1 { "" } else { "s" },
            self.passed(),
            self.tolerated(),
            self.failed(),
            format_duration(self.elapsed)
        )
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.scenarios.iter().filter(|r| pred(&r.outcome)).count()
    }
}

fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}
