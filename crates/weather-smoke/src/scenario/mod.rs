//! The scenario catalogue.
//!
//! Each scenario drives the weather page through one user flow and checks
//! one oracle. Scenarios never share a session.
//!
//! | id | input | oracle |
//! |---|---|---|
//! | `valid-city` | "London" | city name contains the query, temperature shows °C |
//! | `empty-city` | nothing | a dialog asking to enter a city, page still usable |
//! | `invalid-city` | nonsense | a "not found" dialog |
//! | `forecast-cards` | "Tokyo" | enough forecast cards render |
//! | `weather-theme` | "New York" | exactly one theme class on the current weather |

mod oracle;
pub mod report;
pub mod runner;
mod theme;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use report::{FailureKind, Outcome, RunReport, ScenarioReport};
pub use runner::{RunSettings, run_all, run_all_with, run_scenario};
pub use theme::Theme;

/// Element selectors from the page's DOM contract.
pub mod selectors {
    /// Text input for the city query.
    pub const CITY_INPUT: &str = "#city";
    /// Button that triggers the lookup.
    pub const LOOKUP_BUTTON: &str = "#getBtn";
    /// Displayed "City, Country" after a lookup.
    pub const CITY_NAME: &str = "#cityName";
    /// Displayed current temperature.
    pub const TEMPERATURE: &str = "#temp";
    /// Current weather panel whose class list carries the theme token.
    pub const CURRENT_WEATHER: &str = ".current-weather";
    /// One per forecast day.
    pub const FORECAST_CARD: &str = ".forecast-card";
}

/// Identifies a scenario on the command line, in config and in reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioId {
    /// Look up a well-known city.
    ValidCity,
    /// Look up with an empty input.
    EmptyCity,
    /// Look up a city that does not exist.
    InvalidCity,
    /// Check the multi-day forecast renders.
    ForecastCards,
    /// Check the weather theme class is applied.
    WeatherTheme,
}

impl ScenarioId {
    /// All scenarios in execution order.
    pub const ALL: [ScenarioId; 5] = [
        ScenarioId::ValidCity,
        ScenarioId::EmptyCity,
        ScenarioId::InvalidCity,
        ScenarioId::ForecastCards,
        ScenarioId::WeatherTheme,
    ];

    /// The kebab-case name used everywhere outside Rust code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioId::ValidCity => "valid-city",
            ScenarioId::EmptyCity => "empty-city",
            ScenarioId::InvalidCity => "invalid-city",
            ScenarioId::ForecastCards => "forecast-cards",
            ScenarioId::WeatherTheme => "weather-theme",
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A scenario and its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// Which scenario this is.
    pub id: ScenarioId,
    /// Human-readable title for listings and output.
    pub title: &'static str,
    /// The text typed into the city input. Empty means "type nothing".
    pub query: &'static str,
}

impl Scenario {
    /// Returns the definition of `id`.
    #[must_use]
    pub fn get(id: ScenarioId) -> Self {
        let (title, query) = match id {
            ScenarioId::ValidCity => ("Valid city search", "London"),
            ScenarioId::EmptyCity => ("Empty city field", ""),
            ScenarioId::InvalidCity => ("Invalid city name", "asldkfjasldkfj"),
            ScenarioId::ForecastCards => ("Forecast cards render", "Tokyo"),
            ScenarioId::WeatherTheme => ("Weather theme application", "New York"),
        };
        Self { id, title, query }
    }

    /// Every scenario, in execution order.
    #[must_use]
    pub fn catalogue() -> Vec<Self> {
        ScenarioId::ALL.into_iter().map(Self::get).collect()
    }

    /// The scenarios named in `ids`, in catalogue order, without duplicates.
    #[must_use]
    pub fn select(ids: &[ScenarioId]) -> Vec<Self> {
        ScenarioId::ALL
            .into_iter()
            .filter(|id| ids.contains(id))
            .map(Self::get)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_order_and_inputs() {
        let ids: Vec<_> = Scenario::catalogue().iter().map(|s| s.id).collect();
        assert_eq!(ids, ScenarioId::ALL);

        assert_eq!(Scenario::get(ScenarioId::ValidCity).query, "London");
        assert_eq!(Scenario::get(ScenarioId::EmptyCity).query, "");
        assert_eq!(Scenario::get(ScenarioId::InvalidCity).query, "asldkfjasldkfj");
        assert_eq!(Scenario::get(ScenarioId::ForecastCards).query, "Tokyo");
        assert_eq!(Scenario::get(ScenarioId::WeatherTheme).query, "New York");
    }

    #[test]
    fn select_keeps_catalogue_order_and_dedupes() {
        let picked = Scenario::select(&[
            ScenarioId::WeatherTheme,
            ScenarioId::ValidCity,
            ScenarioId::WeatherTheme,
        ]);
        let ids: Vec<_> = picked.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![ScenarioId::ValidCity, ScenarioId::WeatherTheme]);
    }

    #[test]
    fn ids_use_kebab_case_everywhere() {
        for id in ScenarioId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
            let value = id.to_possible_value().unwrap();
            assert_eq!(value.get_name(), id.as_str());
        }
    }
}
