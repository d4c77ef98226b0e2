// unibrowser-sync Settings Store
// Persisted key-value settings shared with whatever edits them (the CLI, an options UI).
// Stored as one JSON object at the platform-specific config path.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::SettingsMap;

/// Trait defining the settings store interface.
pub trait SettingsStoreTrait {
    fn get(&self, keys: &[&str]) -> Result<SettingsMap, SettingsError>;
    fn get_all(&self) -> Result<SettingsMap, SettingsError>;
    fn set(&self, values: SettingsMap) -> Result<(), SettingsError>;
    fn exists(&self) -> bool;
    fn path(&self) -> &Path;
}

/// Settings store backed by a JSON file on disk.
///
/// Every read goes back to the file, so changes written by another process
/// are picked up by the next `get`.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a new SettingsStore.
    ///
    /// If `path_override` is `Some`, uses that path for the store file.
    /// Otherwise, uses the platform-specific config directory with `settings.json`.
    pub fn new(path_override: Option<PathBuf>) -> Self {
        let path = path_override.unwrap_or_else(|| platform::get_config_dir().join("settings.json"));
        Self { path }
    }

    fn load(&self) -> Result<SettingsMap, SettingsError> {
        if !self.path.exists() {
            return Ok(SettingsMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| SettingsError::Read(format!("{}: {}", self.path.display(), e)))?;
        if content.trim().is_empty() {
            return Ok(SettingsMap::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(SettingsError::Read(format!(
                "{}: expected a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(SettingsError::Read(format!("{}: {}", self.path.display(), e))),
        }
    }
}

impl SettingsStoreTrait for SettingsStore {
    /// Returns the requested keys that are present; absent keys are simply missing.
    fn get(&self, keys: &[&str]) -> Result<SettingsMap, SettingsError> {
        let mut all = self.load()?;
        let mut selected = SettingsMap::new();
        for key in keys {
            if let Some(value) = all.remove(*key) {
                selected.insert((*key).to_string(), value);
            }
        }
        Ok(selected)
    }

    fn get_all(&self) -> Result<SettingsMap, SettingsError> {
        self.load()
    }

    /// Merges `values` into the stored object and writes it back.
    ///
    /// Creates parent directories if they don't exist.
    fn set(&self, values: SettingsMap) -> Result<(), SettingsError> {
        let mut current = self.load()?;
        current.extend(values);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::Write(format!("Failed to create settings directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&Value::Object(current))
            .map_err(|e| SettingsError::Serialization(e.to_string()))?;

        fs::write(&self.path, json)
            .map_err(|e| SettingsError::Write(format!("{}: {}", self.path.display(), e)))?;

        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
