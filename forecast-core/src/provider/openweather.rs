use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::WeatherError,
    model::{ForecastFeed, RawObservation},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, city: &str) -> Result<T, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::InvalidCity);
        }

        let url = format!("{}/{endpoint}", self.base_url);
        debug!(endpoint, city, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::NotFound(city.to_string()));
        }

        if !status.is_success() {
            return Err(WeatherError::Upstream {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::malformed(format!("OpenWeather {endpoint} response: {e}")))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_current(&self, city: &str) -> Result<RawObservation, WeatherError> {
        self.get_json("weather", city).await
    }

    async fn fetch_forecast_samples(&self, city: &str) -> Result<ForecastFeed, WeatherError> {
        self.get_json("forecast", city).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
