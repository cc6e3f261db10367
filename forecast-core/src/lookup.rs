use std::time::Duration;

use tracing::info;

use crate::{
    aggregate::{DEFAULT_FORECAST_DAYS, aggregate_daily},
    config::{Config, DEFAULT_TIMEOUT_SECS, DayBoundary},
    error::WeatherError,
    model::{CanonicalRecord, DailySummary},
    normalize::{normalize, stamp_city},
    provider::WeatherProvider,
    state::DashboardState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupOptions {
    pub days: usize,
    pub timeout: Duration,
    pub day_boundary: DayBoundary,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            days: DEFAULT_FORECAST_DAYS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            day_boundary: DayBoundary::Utc,
        }
    }
}

impl From<&Config> for LookupOptions {
    fn from(config: &Config) -> Self {
        Self {
            days: config.forecast_days,
            timeout: config.timeout(),
            day_boundary: config.day_boundary,
        }
    }
}

/// Result of a completed lookup.
#[derive(Debug, Clone)]
pub struct Lookup {
    pub current: CanonicalRecord,
    pub daily: Vec<DailySummary>,
    /// `state` with the resolved city pushed onto the history.
    pub state: DashboardState,
}

/// Fetch, normalize and aggregate weather for `city` within `options.timeout`.
///
/// The history update only exists on the returned [`Lookup`]; a failed or
/// timed-out lookup leaves the caller with the state it passed in.
pub async fn lookup(
    provider: &dyn WeatherProvider,
    city: &str,
    state: &DashboardState,
    options: &LookupOptions,
) -> Result<Lookup, WeatherError> {
    let city = city.trim();
    if city.is_empty() {
        return Err(WeatherError::InvalidCity);
    }

    let (current, daily) = tokio::time::timeout(options.timeout, fetch_records(provider, city, options))
        .await
        .map_err(|_| WeatherError::Timeout(options.timeout))??;

    let resolved = current.city.clone().unwrap_or_else(|| city.to_string());
    info!(city = %resolved, days = daily.len(), "lookup complete");

    Ok(Lookup {
        state: state.record_search(&resolved),
        current,
        daily,
    })
}

async fn fetch_records(
    provider: &dyn WeatherProvider,
    city: &str,
    options: &LookupOptions,
) -> Result<(CanonicalRecord, Vec<DailySummary>), WeatherError> {
    let current = normalize(&provider.fetch_current(city).await?)?;

    let feed = provider.fetch_forecast_samples(city).await?;
    let bucketing = options
        .day_boundary
        .bucketing(feed.city.as_ref().and_then(|c| c.timezone));

    let mut daily = aggregate_daily(&feed.list, options.days, bucketing)?;
    if let Some(feed_city) = &feed.city {
        for day in &mut daily {
            stamp_city(&mut day.record, feed_city);
        }
    }

    Ok((current, daily))
}
