//! Scenario bodies and their oracles.
//!
//! Every post-lookup check polls the page until the oracle holds or the
//! settle timeout passes. On timeout the last observed value becomes the
//! "actual" of an assertion failure. If the last observation was itself an
//! error (element gone, script failed), that error is reported instead.

use super::report::Outcome;
use super::runner::RunSettings;
use super::selectors::{
    CITY_INPUT, CITY_NAME, CURRENT_WEATHER, FORECAST_CARD, LOOKUP_BUTTON, TEMPERATURE,
};
use super::{Scenario, ScenarioId, Theme};
use crate::error::ScenarioError;
use std::fmt::Debug;
use std::future::Future;
use tracing::{debug, warn};
use weather_browser::{BrowserError, Dialog, Session, Unsettled, WaitConfig, settle};

type Result<T> = std::result::Result<T, ScenarioError>;

const TEMPERATURE_MARKER: &str = "°C";

impl Scenario {
    /// Runs this scenario on an already acquired session.
    ///
    /// The caller owns the session and releases it afterwards, whatever
    /// this returns.
    ///
    /// # Errors
    ///
    /// Returns the first browser error or oracle mismatch.
    pub async fn execute(&self, session: &dyn Session, settings: &RunSettings) -> Result<Outcome> {
        open_page(session, settings).await?;

        if !self.query.is_empty() {
            session.type_text(CITY_INPUT, self.query).await?;
        }
        debug!(scenario = %self.id, query = self.query, "Triggering lookup");
        session.click(LOOKUP_BUTTON).await?;

        match self.id {
            ScenarioId::ValidCity => self.check_valid_city(session, settings).await,
            ScenarioId::EmptyCity => self.check_empty_city(session, settings).await,
            ScenarioId::InvalidCity => self.check_invalid_city(session, settings).await,
            ScenarioId::ForecastCards => self.check_forecast_cards(session, settings).await,
            ScenarioId::WeatherTheme => self.check_weather_theme(session, settings).await,
        }
    }

    async fn check_valid_city(
        &self,
        session: &dyn Session,
        settings: &RunSettings,
    ) -> Result<Outcome> {
        let city = eventually(
            self.id,
            || session.text(CITY_NAME),
            |text: &String| text.contains(self.query),
            settings.settle_wait,
            &format!("city name containing {:?}", self.query),
        )
        .await?;
        debug!(scenario = %self.id, city = %city, "City displayed");

        eventually(
            self.id,
            || session.text(TEMPERATURE),
            |text: &String| text.contains(TEMPERATURE_MARKER),
            settings.settle_wait,
            &format!("temperature containing {TEMPERATURE_MARKER:?}"),
        )
        .await?;

        Ok(Outcome::Passed)
    }

    async fn check_empty_city(
        &self,
        session: &dyn Session,
        settings: &RunSettings,
    ) -> Result<Outcome> {
        let dialog = session.next_dialog(settings.settle_wait).await?;
        expect_dialog(self.id, &dialog, "enter")?;

        // The page must still respond once the dialog is gone
        let inputs = session.count(CITY_INPUT).await?;
        if inputs == 0 {
            return Err(ScenarioError::assertion(
                self.id,
                "city input still present after the dialog",
                "no city input",
            ));
        }

        Ok(Outcome::Passed)
    }

    async fn check_invalid_city(
        &self,
        session: &dyn Session,
        settings: &RunSettings,
    ) -> Result<Outcome> {
        match session.next_dialog(settings.settle_wait).await {
            Ok(dialog) => {
                expect_dialog(self.id, &dialog, "not found")?;
                Ok(Outcome::Passed)
            }
            Err(BrowserError::WaitTimeout { timeout, .. }) if settings.lenient_dialogs => {
                let note = format!("no dialog within {timeout:?} for an unknown city");
                warn!(scenario = %self.id, "{}; tolerated by lenient_dialogs", note);
                Ok(Outcome::Tolerated { note })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn check_forecast_cards(
        &self,
        session: &dyn Session,
        settings: &RunSettings,
    ) -> Result<Outcome> {
        let min = settings.min_forecast_cards;
        let cards = eventually(
            self.id,
            || session.count(FORECAST_CARD),
            |count: &usize| *count >= min,
            settings.settle_wait,
            &format!("at least {min} forecast cards"),
        )
        .await?;
        debug!(scenario = %self.id, cards, "Forecast rendered");

        Ok(Outcome::Passed)
    }

    async fn check_weather_theme(
        &self,
        session: &dyn Session,
        settings: &RunSettings,
    ) -> Result<Outcome> {
        let classes = eventually(
            self.id,
            || session.class_list(CURRENT_WEATHER),
            |classes: &Vec<String>| Theme::in_classes(classes).len() == 1,
            settings.settle_wait,
            "exactly one theme class on the current weather panel",
        )
        .await?;
        debug!(scenario = %self.id, classes = ?classes, "Theme applied");

        Ok(Outcome::Passed)
    }
}

/// Loads the page and waits for the city input to exist.
async fn open_page(session: &dyn Session, settings: &RunSettings) -> Result<()> {
    session.open(&settings.page_url).await?;
    session.wait_for_selector(CITY_INPUT, settings.page_wait).await?;
    Ok(())
}

fn expect_dialog(scenario: ScenarioId, dialog: &Dialog, needle: &str) -> Result<()> {
    if !dialog.mentions(needle) {
        return Err(ScenarioError::assertion(
            scenario,
            format!("dialog mentioning {needle:?}"),
            format!("{:?}", dialog.message),
        ));
    }
    if !dialog.accepted {
        return Err(ScenarioError::assertion(
            scenario,
            "dialog to be accepted",
            format!("{} {:?} was dismissed", dialog.kind, dialog.message),
        ));
    }
    Ok(())
}

/// Polls `observe` until `accept` holds, turning a timeout into either an
/// assertion failure (with the last value) or the last browser error.
async fn eventually<T, F, Fut, P>(
    scenario: ScenarioId,
    observe: F,
    accept: P,
    wait: WaitConfig,
    expected: &str,
) -> Result<T>
where
    T: Debug,
    F: Fn() -> Fut,
    Fut: Future<Output = weather_browser::Result<T>>,
    P: Fn(&T) -> bool,
{
    match settle(observe, accept, wait).await {
        Ok(value) => Ok(value),
        Err(Unsettled {
            last: Some(actual), ..
        }) => Err(ScenarioError::assertion(
            scenario,
            expected,
            format!("{actual:?}"),
        )),
        Err(Unsettled {
            last_error: Some(e),
            ..
        }) => Err(e.into()),
        Err(unsettled) => Err(unsettled.into_timeout(expected).into()),
    }
}
