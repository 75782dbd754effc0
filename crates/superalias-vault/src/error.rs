//! Error types for vault operations.

use thiserror::Error;

/// Errors that can occur while hosting notes.
#[derive(Debug, Error)]
pub enum VaultError {
    /// A note's frontmatter could not be parsed or rendered.
    #[error("frontmatter error in {path}: {source}")]
    Frontmatter {
        path: String,
        source: superalias_types::TypeError,
    },

    /// The path does not name a Markdown note inside the vault.
    #[error("invalid document path: {0}")]
    InvalidPath(String),

    /// The metadata cache could not be accessed.
    #[error("metadata cache unavailable: {0}")]
    CacheUnavailable(String),

    /// Loading or saving settings failed.
    #[error("settings error: {0}")]
    Settings(#[from] superalias_settings::SettingsError),

    /// Directory traversal failed.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// I/O error reading or writing a note.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;
