//! Error types for settings persistence.

use thiserror::Error;

/// Errors that can occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The persisted data could not be decoded or encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The settings tab has no field with this name.
    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    /// A backend lock was poisoned.
    #[error("settings store unavailable: {0}")]
    Unavailable(String),

    /// I/O error in a file-based store.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
