use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, error::Result, model::Coordinates, model::ForecastBundle};

pub mod nws;

pub use nws::NwsProvider;

/// Source of raw forecast periods for a location.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Fetch the day/night and hourly period lists for `coordinates`.
    async fn fetch(&self, coordinates: Coordinates) -> Result<ForecastBundle>;
}

/// Construct the forecast provider described by the config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let provider = NwsProvider::new(config.forecast_url(), config.user_agent())?;
    Ok(Box::new(provider))
}
