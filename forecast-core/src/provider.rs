use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config,
    error::WeatherError,
    model::{ForecastFeed, RawObservation},
    provider::openweather::OpenWeatherProvider,
};

pub mod openweather;

/// Source of raw observations. Implementations do the network I/O; nothing
/// here normalizes or retries.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, city: &str) -> Result<RawObservation, WeatherError>;

    /// 3-hourly samples for the coming days, oldest first.
    async fn fetch_forecast_samples(&self, city: &str) -> Result<ForecastFeed, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?;
    Ok(Box::new(OpenWeatherProvider::new(api_key)))
}
