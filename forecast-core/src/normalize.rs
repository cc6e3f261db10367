use chrono::{DateTime, Utc};

use crate::{
    error::WeatherError,
    model::{CanonicalRecord, RawCity, RawObservation},
};

/// Map one upstream sample to a [`CanonicalRecord`].
///
/// Optional readings that are missing or non-finite become `None`. A sample
/// without a condition label or with an unrepresentable timestamp is rejected.
pub fn normalize(raw: &RawObservation) -> Result<CanonicalRecord, WeatherError> {
    let condition = raw
        .weather
        .first()
        .ok_or_else(|| WeatherError::malformed(format!("sample at dt={} has no weather entry", raw.dt)))?;

    if condition.main.trim().is_empty() {
        return Err(WeatherError::malformed(format!(
            "sample at dt={} has a blank condition label",
            raw.dt
        )));
    }

    let observed_at = unix_to_utc(raw.dt)
        .ok_or_else(|| WeatherError::malformed(format!("timestamp {} is out of range", raw.dt)))?;

    let wind = raw.wind.clone().unwrap_or_default();

    Ok(CanonicalRecord {
        city: raw.name.clone(),
        country: raw.sys.as_ref().and_then(|s| s.country.clone()),
        temp_c: finite(Some(raw.main.temp)),
        temp_min_c: finite(raw.main.temp_min),
        temp_max_c: finite(raw.main.temp_max),
        feels_like_c: finite(raw.main.feels_like),
        humidity: finite(raw.main.humidity),
        wind_speed: finite(wind.speed),
        wind_deg: finite(wind.deg),
        condition: condition.main.clone(),
        description: condition.description.clone(),
        observed_at,
        date: None,
    })
}

/// Fill in the feed's city and country where the record has none.
pub fn stamp_city(record: &mut CanonicalRecord, city: &RawCity) {
    record.city.get_or_insert_with(|| city.name.clone());
    if record.country.is_none() {
        record.country = city.country.clone();
    }
}

pub(crate) fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawCondition, RawMain, RawSys, RawWind};

    fn sample(dt: i64, temp: f64) -> RawObservation {
        RawObservation {
            dt,
            main: RawMain {
                temp,
                feels_like: None,
                temp_min: None,
                temp_max: None,
                humidity: None,
            },
            wind: None,
            weather: vec![RawCondition { main: "Clear".into(), description: "clear sky".into() }],
            name: None,
            sys: None,
        }
    }

    #[test]
    fn maps_current_fields() {
        let mut raw = sample(1_760_000_000, 18.5);
        raw.name = Some("Lisbon".into());
        raw.sys = Some(RawSys { country: Some("PT".into()) });
        raw.main.feels_like = Some(17.9);
        raw.main.temp_min = Some(16.0);
        raw.main.temp_max = Some(20.0);
        raw.main.humidity = Some(64.0);
        raw.wind = Some(RawWind { speed: Some(4.2), deg: Some(310.0) });

        let record = normalize(&raw).unwrap();
        assert_eq!(record.city.as_deref(), Some("Lisbon"));
        assert_eq!(record.country.as_deref(), Some("PT"));
        assert_eq!(record.temp_c, Some(18.5));
        assert_eq!(record.temp_min_c, Some(16.0));
        assert_eq!(record.temp_max_c, Some(20.0));
        assert_eq!(record.feels_like_c, Some(17.9));
        assert_eq!(record.humidity, Some(64.0));
        assert_eq!(record.wind_speed, Some(4.2));
        assert_eq!(record.wind_deg, Some(310.0));
        assert_eq!(record.condition, "Clear");
        assert_eq!(record.description, "clear sky");
        assert_eq!(record.observed_at.timestamp(), 1_760_000_000);
    }

    #[test]
    fn absent_fields_are_unavailable_not_zero() {
        let record = normalize(&sample(0, 0.0)).unwrap();
        assert_eq!(record.temp_c, Some(0.0));
        assert_eq!(record.wind_deg, None);
        assert_eq!(record.wind_speed, None);
        assert_eq!(record.feels_like_c, None);
        assert_eq!(record.humidity, None);
    }

    #[test]
    fn non_finite_temperature_is_unavailable() {
        let record = normalize(&sample(0, f64::NAN)).unwrap();
        assert_eq!(record.temp_c, None);
    }

    #[test]
    fn missing_condition_is_malformed() {
        let mut raw = sample(0, 10.0);
        raw.weather.clear();
        let err = normalize(&raw).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedInput(_)));
    }

    #[test]
    fn out_of_range_timestamp_is_malformed() {
        let err = normalize(&sample(i64::MAX, 10.0)).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn feed_city_fills_only_missing_location() {
        let oslo = RawCity { name: "Oslo".into(), country: Some("NO".into()), timezone: Some(3600) };

        let mut bare = normalize(&sample(0, 1.0)).unwrap();
        stamp_city(&mut bare, &oslo);
        assert_eq!(bare.city.as_deref(), Some("Oslo"));
        assert_eq!(bare.country.as_deref(), Some("NO"));

        let mut named = sample(0, 1.0);
        named.name = Some("Bergen".into());
        let mut named = normalize(&named).unwrap();
        stamp_city(&mut named, &oslo);
        assert_eq!(named.city.as_deref(), Some("Bergen"));
        assert_eq!(named.country.as_deref(), Some("NO"));
    }
}
