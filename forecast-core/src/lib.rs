//! Core library for the `forecast` dashboard.
//!
//! This crate defines:
//! - Normalization of OpenWeather samples into unit-agnostic records
//! - Daily aggregation of 3-hourly forecasts
//! - Temperature and wind-direction display helpers
//! - History/favorites list management and the persisted dashboard state
//! - Configuration, the OpenWeather provider and a timeout-bounded lookup
//!
//! The normalization, aggregation, unit, compass and list functions are
//! pure; network and storage access live in `provider` and `store`.

pub mod aggregate;
pub mod compass;
pub mod config;
pub mod error;
pub mod history;
pub mod lookup;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod state;
pub mod store;
pub mod units;

pub use aggregate::{DEFAULT_FORECAST_DAYS, DayBucketing, aggregate_daily};
pub use compass::{CompassPoint, to_compass_point};
pub use config::{Config, DayBoundary};
pub use error::WeatherError;
pub use lookup::{Lookup, LookupOptions, lookup};
pub use model::{CanonicalRecord, DailySummary, ForecastFeed, RawObservation};
pub use normalize::{normalize, stamp_city};
pub use provider::{WeatherProvider, provider_from_config};
pub use state::{DashboardState, KeyValueStore};
pub use store::{FileStore, MemoryStore};
pub use units::{TemperatureUnit, to_display_unit};
