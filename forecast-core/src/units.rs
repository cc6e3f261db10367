use serde::{Deserialize, Serialize};

/// Display unit for temperatures. Records always hold Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl TryFrom<&str> for TemperatureUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_uppercase().as_str() {
            "C" | "CELSIUS" => Ok(TemperatureUnit::Celsius),
            "F" | "FAHRENHEIT" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!("Unknown unit '{value}'. Supported units: C, F.")),
        }
    }
}

/// Convert a canonical Celsius reading to `unit`.
///
/// Returns `None` when the reading is unavailable (absent or NaN).
pub fn to_display_unit(temp_c: Option<f64>, unit: TemperatureUnit) -> Option<f64> {
    let t = temp_c.filter(|t| !t.is_nan())?;

    Some(match unit {
        TemperatureUnit::Celsius => t,
        TemperatureUnit::Fahrenheit => t * 9.0 / 5.0 + 32.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fahrenheit_reference_points() {
        assert_eq!(to_display_unit(Some(0.0), TemperatureUnit::Fahrenheit), Some(32.0));
        assert_eq!(to_display_unit(Some(100.0), TemperatureUnit::Fahrenheit), Some(212.0));
        assert_eq!(to_display_unit(Some(-40.0), TemperatureUnit::Fahrenheit), Some(-40.0));
    }

    #[test]
    fn celsius_is_identity() {
        assert_eq!(to_display_unit(Some(21.5), TemperatureUnit::Celsius), Some(21.5));
        assert_eq!(to_display_unit(Some(0.0), TemperatureUnit::Celsius), Some(0.0));
    }

    #[test]
    fn missing_or_nan_is_unavailable() {
        assert_eq!(to_display_unit(None, TemperatureUnit::Fahrenheit), None);
        assert_eq!(to_display_unit(Some(f64::NAN), TemperatureUnit::Celsius), None);
        assert_eq!(to_display_unit(Some(f64::NAN), TemperatureUnit::Fahrenheit), None);
    }

    #[test]
    fn unit_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&TemperatureUnit::Fahrenheit).unwrap(), "\"F\"");
        let parsed: TemperatureUnit = serde_json::from_str("\"C\"").unwrap();
        assert_eq!(parsed, TemperatureUnit::Celsius);
    }

    #[test]
    fn toggle_and_parse() {
        assert_eq!(TemperatureUnit::Celsius.toggled(), TemperatureUnit::Fahrenheit);
        assert_eq!(TemperatureUnit::try_from("f").unwrap(), TemperatureUnit::Fahrenheit);
        assert!(TemperatureUnit::try_from("kelvin").is_err());
    }
}
