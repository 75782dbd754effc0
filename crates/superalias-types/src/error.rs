use thiserror::Error;

/// Errors produced while reading or writing metadata blocks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("frontmatter is not a mapping: found {0}")]
    InvalidFrontmatter(String),

    #[error("yaml error: {0}")]
    Yaml(String),

    #[error("rewritten aliases read back as {found:?}, expected {expected:?}")]
    AliasesMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

/// Convenience alias for type-level operations.
pub type Result<T> = std::result::Result<T, TypeError>;
