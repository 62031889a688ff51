use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    error::{Result, WeatherError},
    model::{Coordinates, ForecastBundle, RawPeriod},
};

use super::ForecastProvider;

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// National Weather Service client (api.weather.gov). No key, but a User-Agent is mandatory.
#[derive(Debug, Clone)]
pub struct NwsProvider {
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointsProperties {
    forecast: String,
    forecast_hourly: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Vec<RawPeriod>,
}

impl NwsProvider {
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

    fn points_url(&self, coordinates: Coordinates) -> String {
        let rounded = coordinates.rounded();
        format!("{}/points/{},{}", self.base_url, rounded.latitude, rounded.longitude)
    }

    async fn fetch_points(&self, coordinates: Coordinates) -> Result<PointsProperties> {
        let url = self.points_url(coordinates);
        debug!(%url, "NWS points request");

        let res = self.http.get(&url).send().await.map_err(|e| {
            warn!("NWS points request failed: {e}");
            WeatherError::retrieval()
        })?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::out_of_coverage());
        }
        if !status.is_success() {
            warn!(%status, "NWS points request returned an error status");
            return Err(WeatherError::retrieval());
        }

        let points: PointsResponse = res.json().await.map_err(|e| {
            warn!("failed to parse NWS points response: {e}");
            WeatherError::retrieval()
        })?;

        Ok(points.properties)
    }

    async fn get(&self, url: &str) -> Result<Response> {
        debug!(%url, "NWS forecast request");
        self.http.get(url).send().await.map_err(|e| {
            warn!("NWS forecast request failed: {e}");
            WeatherError::retrieval()
        })
    }
}

async fn parse_periods(res: Response) -> Result<Vec<RawPeriod>> {
    let body = res.text().await.map_err(|e| {
        warn!("failed to read NWS forecast body: {e}");
        WeatherError::retrieval()
    })?;

    let parsed: ForecastResponse = serde_json::from_str(&body).map_err(|e| {
        warn!("failed to parse NWS forecast JSON: {e}");
        WeatherError::retrieval()
    })?;

    Ok(parsed.properties.periods)
}

#[async_trait]
impl ForecastProvider for NwsProvider {
    async fn fetch(&self, coordinates: Coordinates) -> Result<ForecastBundle> {
        let points = self.fetch_points(coordinates).await?;

        let (daily_res, hourly_res) =
            tokio::try_join!(self.get(&points.forecast), self.get(&points.forecast_hourly))?;

        if !daily_res.status().is_success() || !hourly_res.status().is_success() {
            warn!(
                daily = %daily_res.status(),
                hourly = %hourly_res.status(),
                "NWS forecast retrieval failed"
            );
            return Err(WeatherError::retrieval());
        }

        let (daily, hourly) = tokio::try_join!(parse_periods(daily_res), parse_periods(hourly_res))?;

        debug!(daily = daily.len(), hourly = hourly.len(), "NWS forecast received");
        Ok(ForecastBundle { daily, hourly })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_url_uses_rounded_coordinates() {
        let provider = NwsProvider::new("https://api.weather.gov/", "test").expect("client");
        let url = provider.points_url(Coordinates::new(29.500749, -98.128094));
        assert_eq!(url, "https://api.weather.gov/points/29.5,-98.13");
    }

    #[test]
    fn points_properties_parse() {
        let json = serde_json::json!({
            "properties": {
                "forecast": "https://api.weather.gov/gridpoints/EWX/170,83/forecast",
                "forecastHourly": "https://api.weather.gov/gridpoints/EWX/170,83/forecast/hourly",
                "gridId": "EWX"
            }
        });
        let parsed: PointsResponse = serde_json::from_value(json).expect("points should parse");
        assert!(parsed.properties.forecast_hourly.ends_with("/forecast/hourly"));
    }
}
