//! Plugin settings for SuperAlias.
//!
//! The only user-facing setting is `keys`: a comma-separated list of
//! frontmatter fields whose values are folded into each note's aliases.
//!
//! # Modules
//!
//! - [`error`] — Error types for settings persistence
//! - [`settings`] — The [`Settings`] value and its defaults
//! - [`store`] — The [`SettingsStore`] trait with in-memory and file backends
//! - [`manager`] — [`SettingsManager`]: default-merged load and save-on-edit
//! - [`tab`] — The settings tab model bound to `keys`

pub mod error;
pub mod manager;
pub mod settings;
pub mod store;
pub mod tab;

pub use error::{Result, SettingsError};
pub use manager::SettingsManager;
pub use settings::{Settings, DEFAULT_KEYS};
pub use store::{FileSettingsStore, InMemorySettingsStore, SettingsStore};
pub use tab::{SettingsTab, TextSetting};
