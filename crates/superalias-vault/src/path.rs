use std::fmt;
use std::path::{Component, Path};

use crate::error::{Result, VaultError};

const NOTE_EXTENSION: &str = "md";

/// Vault-relative handle of a Markdown note, always `/`-separated.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentPath(String);

impl DocumentPath {
    /// Build a handle from a path relative to the vault root.
    ///
    /// Rejects absolute paths, parent-directory components, and files that
    /// are not `.md` notes.
    pub fn from_relative(path: &Path) -> Result<Self> {
        let mut parts = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => return Err(VaultError::InvalidPath(path.display().to_string())),
            }
        }
        if parts.is_empty() || !is_note(path) {
            return Err(VaultError::InvalidPath(path.display().to_string()));
        }
        Ok(Self(parts.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name without the `.md` extension.
    pub fn basename(&self) -> &str {
        let name = self.0.rsplit('/').next().unwrap_or(&self.0);
        strip_extension(name)
    }

    /// Full path without the `.md` extension, as written in a link.
    pub fn link_path(&self) -> &str {
        strip_extension(&self.0)
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn is_note(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(NOTE_EXTENSION))
}

fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext)) if ext.eq_ignore_ascii_case(NOTE_EXTENSION) => stem,
        _ => name,
    }
}
