use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One sample as reported by the OpenWeather `weather` or `forecast` endpoints.
///
/// Only `dt`, `main.temp` and the `weather` list are structural; everything
/// else may be missing and is carried as `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawObservation {
    pub dt: i64,
    pub main: RawMain,
    #[serde(default)]
    pub wind: Option<RawWind>,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
    /// City name, present on current observations only.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sys: Option<RawSys>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMain {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub temp_min: Option<f64>,
    #[serde(default)]
    pub temp_max: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawWind {
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub deg: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCondition {
    /// Category label such as "Clear" or "Rain".
    pub main: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSys {
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCity {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    /// Offset from UTC in seconds.
    #[serde(default)]
    pub timezone: Option<i32>,
}

/// Body of the 5 day / 3 hour forecast endpoint, samples in chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastFeed {
    #[serde(default)]
    pub city: Option<RawCity>,
    pub list: Vec<RawObservation>,
}

/// Unit-agnostic weather record. Temperatures are Celsius and `None` means
/// the upstream did not report the value, which is different from zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub city: Option<String>,
    pub country: Option<String>,
    pub temp_c: Option<f64>,
    pub temp_min_c: Option<f64>,
    pub temp_max_c: Option<f64>,
    pub feels_like_c: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_deg: Option<f64>,
    pub condition: String,
    pub description: String,
    pub observed_at: DateTime<Utc>,
    /// Calendar day, set on daily summaries.
    pub date: Option<NaiveDate>,
}

/// One forecast day reduced from its bucket of samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub label: String,
    pub record: CanonicalRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_current_payload_with_missing_optionals() {
        let body = r#"{
            "name": "Paris",
            "dt": 1760000000,
            "sys": { "country": "FR" },
            "main": { "temp": 14.2, "humidity": 71 },
            "weather": [{ "main": "Clouds", "description": "broken clouds" }]
        }"#;

        let raw: RawObservation = serde_json::from_str(body).unwrap();
        assert_eq!(raw.name.as_deref(), Some("Paris"));
        assert!(raw.wind.is_none());
        assert_eq!(raw.main.feels_like, None);
        assert_eq!(raw.main.humidity, Some(71.0));
    }

    #[test]
    fn missing_temperature_is_a_parse_error() {
        let body = r#"{ "dt": 1, "main": { "humidity": 50 }, "weather": [] }"#;
        assert!(serde_json::from_str::<RawObservation>(body).is_err());
    }

    #[test]
    fn parses_forecast_feed() {
        let body = r#"{
            "city": { "name": "Tokyo", "country": "JP", "timezone": 32400 },
            "list": [
                { "dt": 1760000000, "main": { "temp": 20.0 },
                  "wind": { "speed": 3.1, "deg": 200 },
                  "weather": [{ "main": "Rain", "description": "light rain" }] }
            ]
        }"#;

        let feed: ForecastFeed = serde_json::from_str(body).unwrap();
        let city = feed.city.unwrap();
        assert_eq!(city.timezone, Some(32400));
        assert_eq!(feed.list.len(), 1);
        assert_eq!(feed.list[0].wind.as_ref().and_then(|w| w.deg), Some(200.0));
    }
}
