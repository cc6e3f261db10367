use std::time::Duration;

use thiserror::Error;

/// Failures surfaced by normalization, aggregation and lookups.
///
/// A field the upstream did not report is not an error: it is carried as
/// `None` on the record instead.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City '{0}' not found")]
    NotFound(String),

    #[error("Please enter a city name")]
    InvalidCity,

    #[error("Request timed out after {}s. Try again.", .0.as_secs())]
    Timeout(Duration),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Upstream request failed with status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),
}

impl WeatherError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }
}
