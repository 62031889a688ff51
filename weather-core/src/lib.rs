//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - ZIP-code geocoding and reverse lookup (Nominatim)
//! - Forecast retrieval from the National Weather Service
//! - Aggregation of raw periods into daily rows and hourly entries
//! - An explicit view state with pure rendering, plus the light/dark theme
//! - Configuration & persisted preferences
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod aggregate;
pub mod app;
pub mod config;
pub mod error;
pub mod geocode;
pub mod input;
pub mod model;
pub mod present;
pub mod provider;
pub mod settings;
pub mod theme;

pub use app::{Outcome, WeatherApp};
pub use config::{Config, DefaultLocation};
pub use error::{ErrorKind, WeatherError};
pub use geocode::{Geocoder, NominatimGeocoder};
pub use model::{
    Coordinates, DailySummary, Forecast, ForecastBundle, HourlyEntry, LocationResult, RawPeriod,
};
pub use present::{Line, LineKind, Presenter, ViewState};
pub use provider::{ForecastProvider, NwsProvider};
pub use settings::{FileSettingsStore, MemorySettingsStore, SettingsStore};
pub use theme::{Theme, ThemeController, ThemeStyle};
