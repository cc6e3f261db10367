use anyhow::{Context, Result};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    error::WeatherError,
    history::{self, HISTORY_LIMIT},
    units::TemperatureUnit,
};

pub const FAVORITES_KEY: &str = "favorites";
pub const HISTORY_KEY: &str = "history";
pub const DARK_MODE_KEY: &str = "darkMode";
pub const UNIT_KEY: &str = "unit";

/// String key-value storage holding one JSON document per key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;

    /// Write several keys. Stores that can commit them together should.
    fn set_many(&mut self, entries: Vec<(&str, String)>) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// Everything the dashboard remembers between runs.
///
/// Values are plain data; every transition returns a new state and the
/// store is only touched through [`DashboardState::load`] and
/// [`DashboardState::save`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardState {
    pub favorites: Vec<String>,
    pub history: Vec<String>,
    pub dark_mode: bool,
    pub unit: TemperatureUnit,
}

impl DashboardState {
    /// Read all keys from `store`. Missing keys fall back to their defaults.
    pub fn load(store: &impl KeyValueStore) -> Result<Self> {
        Ok(Self {
            favorites: read_key(store, FAVORITES_KEY)?,
            history: read_key(store, HISTORY_KEY)?,
            dark_mode: read_key(store, DARK_MODE_KEY)?,
            unit: read_key(store, UNIT_KEY)?,
        })
    }

    /// Write all keys in a single batch.
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<()> {
        store.set_many(vec![
            (FAVORITES_KEY, to_json(FAVORITES_KEY, &self.favorites)?),
            (HISTORY_KEY, to_json(HISTORY_KEY, &self.history)?),
            (DARK_MODE_KEY, to_json(DARK_MODE_KEY, &self.dark_mode)?),
            (UNIT_KEY, to_json(UNIT_KEY, &self.unit)?),
        ])
    }

    /// Remember a completed lookup for `city`.
    pub fn record_search(&self, city: &str) -> Self {
        Self {
            history: history::upsert_front(&self.history, city, Some(HISTORY_LIMIT)),
            ..self.clone()
        }
    }

    pub fn clear_history(&self) -> Self {
        Self { history: history::clear(), ..self.clone() }
    }

    pub fn add_favorite(&self, city: &str) -> Self {
        Self {
            favorites: history::upsert_front(&self.favorites, city, None),
            ..self.clone()
        }
    }

    pub fn remove_favorite(&self, city: &str) -> Self {
        Self {
            favorites: history::remove(&self.favorites, city),
            ..self.clone()
        }
    }

    pub fn is_favorite(&self, city: &str) -> bool {
        history::contains(&self.favorites, city)
    }

    pub fn with_unit(&self, unit: TemperatureUnit) -> Self {
        Self { unit, ..self.clone() }
    }

    pub fn toggle_unit(&self) -> Self {
        self.with_unit(self.unit.toggled())
    }

    pub fn toggle_dark_mode(&self) -> Self {
        Self { dark_mode: !self.dark_mode, ..self.clone() }
    }
}

fn read_key<T: DeserializeOwned + Default>(store: &impl KeyValueStore, key: &str) -> Result<T> {
    let Some(text) = store.get(key)? else {
        return Ok(T::default());
    };

    serde_json::from_str(&text)
        .map_err(|e| WeatherError::malformed(format!("stored '{key}' is not valid: {e}")).into())
}

fn to_json<T: Serialize>(key: &str, value: &T) -> Result<String> {
    serde_json::to_string(value).with_context(|| format!("Failed to serialize '{key}'"))
}
