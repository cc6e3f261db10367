use chrono::Local;
use forecast_core::{
    CanonicalRecord, DailySummary, TemperatureUnit, to_compass_point, to_display_unit,
};

const UNAVAILABLE: &str = "—";

pub fn temperature(temp_c: Option<f64>, unit: TemperatureUnit) -> String {
    match to_display_unit(temp_c, unit) {
        Some(t) => format!("{t:.1}°{unit}"),
        None => UNAVAILABLE.to_string(),
    }
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| UNAVAILABLE.to_string(), |v| format!("{v:.0}%"))
}

fn speed(value: Option<f64>) -> String {
    value.map_or_else(|| UNAVAILABLE.to_string(), |v| format!("{v:.1} m/s"))
}

fn direction(deg: Option<f64>) -> String {
    to_compass_point(deg).map_or_else(|| UNAVAILABLE.to_string(), |p| p.to_string())
}

/// Symbol for a condition category; unknown categories get a globe.
pub fn icon(condition: &str) -> &'static str {
    match condition {
        "Clear" => "☀️",
        "Clouds" => "☁️",
        "Rain" => "🌧️",
        "Drizzle" => "🌦️",
        "Thunderstorm" => "⛈️",
        "Snow" => "❄️",
        "Mist" | "Haze" | "Fog" => "🌫️",
        _ => "🌍",
    }
}

pub fn current_card(record: &CanonicalRecord, unit: TemperatureUnit, favorite: bool) -> String {
    let place = match (&record.city, &record.country) {
        (Some(city), Some(country)) => format!("{city}, {country}"),
        (Some(city), None) => city.clone(),
        _ => UNAVAILABLE.to_string(),
    };
    let star = if favorite { " ★" } else { "" };

    [
        format!("{place}{star}"),
        format!(
            "{} {}  {} ({})",
            icon(&record.condition),
            temperature(record.temp_c, unit),
            record.condition,
            record.description
        ),
        format!(
            "Feels {}  Humidity {}  Wind {} {}",
            temperature(record.feels_like_c, unit),
            percent(record.humidity),
            speed(record.wind_speed),
            direction(record.wind_deg)
        ),
        format!("Observed {}", record.observed_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")),
    ]
    .join("\n")
}

pub fn daily_row(day: &DailySummary, unit: TemperatureUnit) -> String {
    let r = &day.record;
    format!(
        "{:<12} {} {:>8}  ↓{:>8} ↑{:>8}  {:>4}  {:>9} {:>2}",
        day.label,
        icon(&r.condition),
        temperature(r.temp_c, unit),
        temperature(r.temp_min_c, unit),
        temperature(r.temp_max_c, unit),
        percent(r.humidity),
        speed(r.wind_speed),
        direction(r.wind_deg),
    )
}
