//! Durable settings store backed by a single JSON map file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use platform_host::{SettingsStore, SettingsStoreFuture};

/// File name of the settings map inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

type SettingsMap = BTreeMap<String, String>;

fn load_settings_map(path: &Path) -> Result<SettingsMap, String> {
    if !path.exists() {
        return Ok(SettingsMap::new());
    }
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(SettingsMap::new());
    }
    serde_json::from_str(&raw)
        .map_err(|err| format!("failed to parse settings map {}: {err}", path.display()))
}

fn save_settings_map(path: &Path, map: &SettingsMap) -> Result<(), String> {
    let serialized = serde_json::to_string_pretty(map)
        .map_err(|err| format!("failed to serialize settings map: {err}"))?;
    fs::write(path, serialized).map_err(|err| format!("failed to write {}: {err}", path.display()))
}

fn validate_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        Err("Settings key must not be empty".to_string())
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// Settings store persisting every key into `<root>/settings.json`.
///
/// The file is re-read on every access so external edits are picked up.
pub struct FileSettingsStore {
    file: PathBuf,
}

impl FileSettingsStore {
    /// Creates a store rooted at `root`, creating the directory if needed.
    pub fn from_root(root: impl AsRef<Path>) -> Result<Self, String> {
        let root = root.as_ref();
        fs::create_dir_all(root)
            .map_err(|err| format!("failed to create settings dir {}: {err}", root.display()))?;
        Ok(Self {
            file: root.join(SETTINGS_FILE_NAME),
        })
    }

    /// Path of the backing JSON file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Loads a raw JSON payload by key.
    pub fn load(&self, key: &str) -> Result<Option<String>, String> {
        validate_key(key)?;
        let map = load_settings_map(&self.file)?;
        Ok(map.get(key).cloned())
    }

    /// Saves a raw JSON payload by key.
    pub fn save(&self, key: &str, raw_json: &str) -> Result<(), String> {
        validate_key(key)?;
        let mut map = load_settings_map(&self.file)?;
        map.insert(key.to_string(), raw_json.to_string());
        save_settings_map(&self.file, &map)
    }

    /// Deletes a key.
    pub fn remove(&self, key: &str) -> Result<(), String> {
        validate_key(key)?;
        let mut map = load_settings_map(&self.file)?;
        map.remove(key);
        save_settings_map(&self.file, &map)
    }
}

impl SettingsStore for FileSettingsStore {
    fn load_raw<'a>(
        &'a self,
        key: &'a str,
    ) -> SettingsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { self.load(key) })
    }

    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> SettingsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move { self.save(key, raw_json) })
    }

    fn delete<'a>(&'a self, key: &'a str) -> SettingsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move { self.remove(key) })
    }
}
