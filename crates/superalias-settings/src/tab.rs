//! The settings tab model.
//!
//! The tab is described as data so any front end (the CLI, a host UI) can
//! render it. Edits go through [`SettingsTab::on_change`], which saves.

use crate::error::{Result, SettingsError};
use crate::manager::SettingsManager;

const KEYS_NAME: &str = "keys";
const KEYS_DESCRIPTION: &str = "Enter keys to be aliased, split by comma";

/// A single free-text setting as shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextSetting {
    pub name: &'static str,
    pub description: &'static str,
    pub placeholder: &'static str,
    pub value: String,
}

/// The plugin's settings tab, bound to a [`SettingsManager`].
#[derive(Debug)]
pub struct SettingsTab<'a> {
    manager: &'a mut SettingsManager,
}

impl<'a> SettingsTab<'a> {
    pub fn new(manager: &'a mut SettingsManager) -> Self {
        Self { manager }
    }

    /// Current contents of the tab.
    pub fn display(&self) -> Vec<TextSetting> {
        vec![TextSetting {
            name: KEYS_NAME,
            description: KEYS_DESCRIPTION,
            placeholder: KEYS_DESCRIPTION,
            value: self.manager.settings().keys.clone(),
        }]
    }

    /// Apply an edit to the named field and save.
    pub fn on_change(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            KEYS_NAME => self.manager.set_keys(value),
            other => Err(SettingsError::UnknownSetting(other.to_string())),
        }
    }
}
