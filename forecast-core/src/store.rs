use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::state::KeyValueStore;

/// Key-value store persisted as a single JSON object on disk.
///
/// Each write replaces the whole file through a temporary file and a
/// rename, so readers see either the old or the new contents.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self { path, entries: BTreeMap::new() });
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read state file: {}", path.display()))?;

        let entries = serde_json::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse state file: {}\n\
                 Hint: run `forecast reset` to start over.",
                path.display()
            )
        })?;

        Ok(Self { path, entries })
    }

    /// Replace whatever is at `path`, readable or not, with an empty store.
    pub fn reset(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { path: path.into(), entries: BTreeMap::new() };
        store.flush()?;
        Ok(store)
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// Path to the state file in the platform data directory.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().join("state.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create state directory: {}", parent.display())
        })?;

        let json = serde_json::to_string_pretty(&self.entries).context("Failed to serialize state")?;

        let mut tmp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .context("Failed to write temporary state file")?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to write state file: {}", self.path.display()))?;

        debug!(path = %self.path.display(), keys = self.entries.len(), "state flushed");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn set_many(&mut self, entries: Vec<(&str, String)>) -> Result<()> {
        for (key, value) in entries {
            self.entries.insert(key.to_string(), value);
        }
        self.flush()
    }
}

/// In-process store, for tests and embedders that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DashboardState;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("state.json")).unwrap();
        assert_eq!(store.get("history").unwrap(), None);
    }

    #[test]
    fn writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let mut store = FileStore::open(&path).unwrap();
        DashboardState::default()
            .record_search("Nairobi")
            .toggle_dark_mode()
            .save(&mut store)
            .unwrap();

        let reopened = FileStore::open(&path).unwrap();
        let state = DashboardState::load(&reopened).unwrap();
        assert_eq!(state.history, vec!["Nairobi".to_string()]);
        assert!(state.dark_mode);
    }

    #[test]
    fn corrupt_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse state file"));
        assert!(err.to_string().contains("forecast reset"));
    }

    #[test]
    fn reset_recovers_a_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileStore::reset(&path).unwrap();
        assert_eq!(DashboardState::load(&store).unwrap(), DashboardState::default());

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("history").unwrap(), None);
    }

    #[test]
    fn save_writes_every_key_in_one_file_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = FileStore::open(&path).unwrap();
        DashboardState::default()
            .add_favorite("Quito")
            .record_search("Lima")
            .save(&mut store)
            .unwrap();

        let on_disk: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            on_disk.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["darkMode", "favorites", "history", "unit"]
        );

        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }
}
