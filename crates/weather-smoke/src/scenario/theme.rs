//! Weather theme tokens.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of theme classes the page puts on the current weather
/// panel after a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Clear or mainly clear sky
    Sunny,
    /// Drizzle, rain and showers
    Rainy,
    /// Partly cloudy, overcast, or unclassified
    Cloudy,
    /// Thunderstorms
    Stormy,
    /// Snowfall
    Snowy,
    /// Fog and rime fog
    Foggy,
}

impl Theme {
    /// Every theme token.
    pub const ALL: [Theme; 6] = [
        Theme::Sunny,
        Theme::Rainy,
        Theme::Cloudy,
        Theme::Stormy,
        Theme::Snowy,
        Theme::Foggy,
    ];

    /// The CSS class name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Sunny => "sunny",
            Theme::Rainy => "rainy",
            Theme::Cloudy => "cloudy",
            Theme::Stormy => "stormy",
            Theme::Snowy => "snowy",
            Theme::Foggy => "foggy",
        }
    }

    /// Parses an exact class token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == token)
    }

    /// The theme tokens present in a class list, in class-list order.
    #[must_use]
    pub fn in_classes<S: AsRef<str>>(classes: &[S]) -> Vec<Self> {
        classes
            .iter()
            .filter_map(|c| Self::from_token(c.as_ref()))
            .collect()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_token(theme.as_str()), Some(theme));
        }
        assert_eq!(Theme::from_token("Sunny"), None);
        assert_eq!(Theme::from_token("current-weather"), None);
    }

    #[test]
    fn tokens_are_matched_whole() {
        // A substring check would accept these; class tokens must match exactly
        assert!(Theme::in_classes(&["sunnyside", "not-cloudy"]).is_empty());
    }

    #[test]
    fn in_classes_finds_every_theme() {
        let classes = ["current-weather", "rainy", "stormy"];
        assert_eq!(Theme::in_classes(&classes), vec![Theme::Rainy, Theme::Stormy]);
        assert!(Theme::in_classes(&["current-weather"]).is_empty());
    }
}
