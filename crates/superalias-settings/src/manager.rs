//! Loading and saving [`Settings`] through a [`SettingsStore`].

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use superalias_types::FieldNames;

use crate::error::Result;
use crate::settings::Settings;
use crate::store::SettingsStore;

/// Owns the live [`Settings`] value and writes it back on every edit.
pub struct SettingsManager {
    settings: Settings,
    store: Arc<dyn SettingsStore>,
}

impl std::fmt::Debug for SettingsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsManager")
            .field("settings", &self.settings)
            .finish()
    }
}

impl SettingsManager {
    /// Load settings from `store`, falling back to defaults per field.
    ///
    /// Every persisted field overrides its default; fields that are absent
    /// or null keep the default value. Unknown fields are ignored.
    pub fn load(store: Arc<dyn SettingsStore>) -> Result<Self> {
        let settings = match store.load_data()? {
            Some(data) => merge_over_defaults(data)?,
            None => Settings::default(),
        };
        debug!(keys = %settings.keys, "settings loaded");
        Ok(Self { settings, store })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Field names for the merge, parsed from the current `keys`.
    pub fn field_names(&self) -> FieldNames {
        self.settings.field_names()
    }

    /// Replace `keys` and persist immediately. The value is not validated.
    pub fn set_keys(&mut self, keys: impl Into<String>) -> Result<()> {
        self.settings.keys = keys.into();
        self.save()
    }

    /// Persist the current settings.
    pub fn save(&self) -> Result<()> {
        let data = serde_json::to_value(&self.settings)?;
        self.store.save_data(&data)?;
        debug!(keys = %self.settings.keys, "settings saved");
        Ok(())
    }
}

fn merge_over_defaults(persisted: Value) -> Result<Settings> {
    let mut merged = serde_json::to_value(Settings::default())?;
    if let (Value::Object(base), Value::Object(overrides)) = (&mut merged, persisted) {
        for (key, value) in overrides {
            if !value.is_null() {
                base.insert(key, value);
            }
        }
    }
    Ok(serde_json::from_value(merged)?)
}
