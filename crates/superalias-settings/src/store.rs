//! The [`SettingsStore`] trait and its backends.
//!
//! A store is the host's generic per-plugin key-value area: it holds one
//! JSON document and knows nothing about what the document means.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::Value;

use crate::error::{Result, SettingsError};

/// Storage backend for persisted plugin data.
pub trait SettingsStore: Send + Sync {
    /// Read the persisted document.
    ///
    /// Returns `Ok(None)` if nothing has been saved yet.
    fn load_data(&self) -> Result<Option<Value>>;

    /// Replace the persisted document.
    fn save_data(&self, data: &Value) -> Result<()>;
}

/// A [`SettingsStore`] that keeps the document in memory.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    data: RwLock<Option<Value>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `data`.
    pub fn with_data(data: Value) -> Self {
        Self {
            data: RwLock::new(Some(data)),
        }
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn load_data(&self) -> Result<Option<Value>> {
        let data = self
            .data
            .read()
            .map_err(|e| SettingsError::Unavailable(format!("lock poisoned: {e}")))?;
        Ok(data.clone())
    }

    fn save_data(&self, data: &Value) -> Result<()> {
        let mut slot = self
            .data
            .write()
            .map_err(|e| SettingsError::Unavailable(format!("lock poisoned: {e}")))?;
        *slot = Some(data.clone());
        Ok(())
    }
}

/// A [`SettingsStore`] backed by a JSON file, conventionally
/// `<vault>/.obsidian/plugins/super-alias/data.json`.
#[derive(Clone, Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    /// Relative location of the data file inside a vault.
    pub const VAULT_RELATIVE_PATH: &'static str = ".obsidian/plugins/super-alias/data.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store used by a vault rooted at `root`.
    pub fn for_vault(root: &Path) -> Self {
        Self::new(root.join(Self::VAULT_RELATIVE_PATH))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn load_data(&self) -> Result<Option<Value>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save_data(&self, data: &Value) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let encoded = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, encoded)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_store_starts_empty() {
        let store = InMemorySettingsStore::new();
        assert_eq!(store.load_data().unwrap(), None);
    }

    #[test]
    fn memory_store_keeps_last_save() {
        let store = InMemorySettingsStore::with_data(json!({"keys": "a"}));
        store.save_data(&json!({"keys": "b"})).unwrap();
        assert_eq!(store.load_data().unwrap(), Some(json!({"keys": "b"})));
    }

    #[test]
    fn file_store_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path().join("data.json"));
        assert_eq!(store.load_data().unwrap(), None);
    }

    #[test]
    fn file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettingsStore::for_vault(dir.path());
        store.save_data(&json!({"keys": "title"})).unwrap();

        assert!(dir.path().join(".obsidian/plugins/super-alias/data.json").exists());
        assert_eq!(store.load_data().unwrap(), Some(json!({"keys": "title"})));
    }

    #[test]
    fn file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{not json").unwrap();

        let result = FileSettingsStore::new(path).load_data();
        assert!(matches!(result, Err(SettingsError::Serialization(_))));
    }
}
