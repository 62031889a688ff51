//! Orchestrates one lookup: geocode, fetch, aggregate, then update the view state.

use chrono::NaiveDate;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, warn};

use crate::{
    Config,
    aggregate::aggregate,
    config::DefaultLocation,
    error::{MSG_DEFAULT_LOAD, Result, WeatherError},
    geocode::{Geocoder, NominatimGeocoder},
    input::validate_zip,
    model::Forecast,
    present::{Line, Presenter, ViewState},
    provider::{ForecastProvider, provider_from_config},
};

/// What happened to a completed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Result was written to the view state.
    Applied,
    /// A newer lookup was issued meanwhile; the result was dropped.
    Stale,
}

#[derive(Debug)]
pub struct WeatherApp {
    geocoder: Box<dyn Geocoder>,
    provider: Box<dyn ForecastProvider>,
    default_location: DefaultLocation,
    presenter: Mutex<Presenter>,
    latest: AtomicU64,
}

impl WeatherApp {
    pub fn new(
        geocoder: Box<dyn Geocoder>,
        provider: Box<dyn ForecastProvider>,
        default_location: DefaultLocation,
    ) -> Self {
        Self {
            geocoder,
            provider,
            default_location,
            presenter: Mutex::new(Presenter::new()),
            latest: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let geocoder = NominatimGeocoder::from_config(config)?;
        let provider = provider_from_config(config)?;
        Ok(Self::new(Box::new(geocoder), provider, config.default_location()))
    }

    pub fn state(&self) -> ViewState {
        self.presenter.lock().state().clone()
    }

    pub fn render(&self, today: NaiveDate) -> Vec<Line> {
        self.presenter.lock().render(today)
    }

    /// Look up the weather for a user-entered ZIP.
    ///
    /// Invalid input is reported without any network call. Errors are shown in
    /// the view and also returned so callers can react to the kind.
    pub async fn handle_search(&self, raw_zip: &str) -> Result<Outcome> {
        let zip = match validate_zip(raw_zip) {
            Ok(zip) => zip,
            Err(err) => {
                self.presenter.lock().show_error(err.message());
                return Err(err);
            }
        };

        let token = self.begin();
        let result = self.search(zip).await;

        if !self.is_current(token) {
            warn!(token, zip, "discarding stale search result");
            return Ok(Outcome::Stale);
        }

        let mut presenter = self.presenter.lock();
        presenter.show_loading(false);
        match result {
            Ok((name, forecast)) => {
                info!(zip, days = forecast.daily.len(), hours = forecast.hourly.len(), "search loaded");
                presenter.display_location(Some(name.as_str()));
                presenter.display_daily(forecast.daily);
                presenter.display_hourly(forecast.hourly);
                Ok(Outcome::Applied)
            }
            Err(err) => {
                warn!(zip, kind = %err.kind(), "search failed");
                presenter.show_error(err.message());
                Err(err)
            }
        }
    }

    /// Show the configured default location. A failed reverse lookup only changes the banner text.
    pub async fn load_default(&self) -> Result<Outcome> {
        let token = self.begin();
        let coordinates = self.default_location.coordinates();

        let name = self.geocoder.resolve_name(coordinates).await;
        if self.is_current(token) {
            let label = name.as_deref().unwrap_or(&self.default_location.label);
            self.presenter.lock().display_location(Some(label));
        }

        let result = self.provider.fetch(coordinates).await.map(|bundle| aggregate(&bundle));

        if !self.is_current(token) {
            warn!(token, "discarding stale default-location result");
            return Ok(Outcome::Stale);
        }

        let mut presenter = self.presenter.lock();
        presenter.show_loading(false);
        match result {
            Ok(forecast) => {
                info!(days = forecast.daily.len(), hours = forecast.hourly.len(), "default location loaded");
                presenter.display_daily(forecast.daily);
                presenter.display_hourly(forecast.hourly);
                Ok(Outcome::Applied)
            }
            Err(err) => {
                warn!(kind = %err.kind(), "default location failed");
                presenter.show_error(MSG_DEFAULT_LOAD);
                Err(WeatherError::new(err.kind(), MSG_DEFAULT_LOAD))
            }
        }
    }

    /// Issue a new request token and put the view into its loading state.
    fn begin(&self) -> u64 {
        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let mut presenter = self.presenter.lock();
        presenter.show_loading(true);
        presenter.hide_error();
        token
    }

    fn is_current(&self, token: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == token
    }

    async fn search(&self, zip: &str) -> Result<(String, Forecast)> {
        let location = self.geocoder.resolve_zip(zip).await?;
        let bundle = self.provider.fetch(location.coordinates).await?;
        Ok((location.display_name, aggregate(&bundle)))
    }
}
