//! ZIP-to-coordinates lookup and the cosmetic reverse lookup, via Nominatim.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{fmt::Debug, time::Duration};
use tracing::{debug, warn};

use crate::{
    config::Config,
    error::{Result, WeatherError},
    model::{Coordinates, LocationResult},
};

const REQUEST_TIMEOUT_SECS: u64 = 10;
/// Country restriction appended to every free-text query.
const COUNTRY_SUFFIX: &str = "USA";

#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Resolve a pre-validated 5-digit ZIP to coordinates and a display name.
    async fn resolve_zip(&self, zip: &str) -> Result<LocationResult>;

    /// Best-effort reverse lookup. Never fails; any problem yields `None`.
    async fn resolve_name(&self, coordinates: Coordinates) -> Option<String>;
}

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct NominatimReverse {
    display_name: Option<String>,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str, user_agent: &str) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(config.geocoder_url(), config.user_agent())
    }

    async fn search(&self, zip: &str) -> Result<Vec<NominatimPlace>> {
        let url = format!("{}/search", self.base_url);
        let query = format!("{zip} {COUNTRY_SUFFIX}");
        debug!(%url, %query, "geocoding ZIP");

        let res = self
            .http
            .get(&url)
            .query(&[("format", "json"), ("q", query.as_str()), ("limit", "1")])
            .send()
            .await
            .map_err(|e| {
                warn!("geocoding request failed: {e}");
                WeatherError::geocoding_service()
            })?;

        let status = res.status();
        if !status.is_success() {
            warn!(%status, "geocoding service returned an error status");
            return Err(WeatherError::geocoding_service());
        }

        let body = res.text().await.map_err(|e| {
            warn!("failed to read geocoding response body: {e}");
            WeatherError::geocoding_service()
        })?;

        serde_json::from_str(&body).map_err(|e| {
            warn!("failed to parse geocoding JSON: {e}");
            WeatherError::geocoding_service()
        })
    }

    async fn reverse(&self, coordinates: Coordinates) -> anyhow::Result<Option<String>> {
        let url = format!("{}/reverse", self.base_url);
        let lat = coordinates.latitude.to_string();
        let lon = coordinates.longitude.to_string();

        let res = self
            .http
            .get(&url)
            .query(&[("format", "json"), ("lat", lat.as_str()), ("lon", lon.as_str())])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            debug!(%status, "reverse geocode returned non-success status");
            return Ok(None);
        }

        let parsed: NominatimReverse = res.json().await?;
        Ok(parsed.display_name)
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve_zip(&self, zip: &str) -> Result<LocationResult> {
        let places = self.search(zip).await?;
        let place = places.into_iter().next().ok_or_else(WeatherError::not_found)?;

        let latitude: f64 = place.lat.trim().parse().map_err(|_| {
            warn!(lat = %place.lat, "geocoder returned a non-numeric latitude");
            WeatherError::geocoding_service()
        })?;
        let longitude: f64 = place.lon.trim().parse().map_err(|_| {
            warn!(lon = %place.lon, "geocoder returned a non-numeric longitude");
            WeatherError::geocoding_service()
        })?;

        Ok(LocationResult {
            coordinates: Coordinates::new(latitude, longitude),
            display_name: place.display_name,
        })
    }

    async fn resolve_name(&self, coordinates: Coordinates) -> Option<String> {
        match self.reverse(coordinates).await {
            Ok(name) => name,
            Err(e) => {
                warn!("reverse geocoding failed: {e}");
                None
            }
        }
    }
}
