//! List command implementation.

use crate::scenario::Scenario;

/// Print each scenario id and title to stdout, one per line.
pub fn execute() {
    for scenario in Scenario::catalogue() {
        println!("{:<16} {}", scenario.id, scenario.title);
    }
}
