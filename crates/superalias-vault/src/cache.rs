//! The [`MetadataCache`] trait and its in-memory implementation.

use std::collections::BTreeMap;
use std::sync::RwLock;

use superalias_types::{parse_frontmatter_aliases, Frontmatter};

use crate::error::{Result, VaultError};
use crate::path::DocumentPath;

/// Parsed metadata of one note.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CachedMetadata {
    /// `None` when the note has no frontmatter block.
    pub frontmatter: Option<Frontmatter>,
}

impl CachedMetadata {
    pub fn new(frontmatter: Option<Frontmatter>) -> Self {
        Self { frontmatter }
    }

    /// Current aliases as the host reads them.
    pub fn aliases(&self) -> Vec<String> {
        self.frontmatter
            .as_ref()
            .and_then(parse_frontmatter_aliases)
            .unwrap_or_default()
    }
}

/// Host-owned cache of per-note metadata.
///
/// Readers receive copies; changes become visible to other readers only
/// through [`MetadataCache::set_file_cache`].
pub trait MetadataCache: Send + Sync {
    /// Read the metadata of a note.
    ///
    /// Returns `Ok(None)` if the note is not cached.
    fn get_file_cache(&self, path: &DocumentPath) -> Result<Option<CachedMetadata>>;

    /// Create or replace the metadata of a note.
    fn set_file_cache(&self, path: &DocumentPath, metadata: CachedMetadata) -> Result<()>;

    /// Drop a note. Returns `Ok(true)` if it was cached.
    fn remove(&self, path: &DocumentPath) -> Result<bool>;

    /// All cached notes in path order.
    fn paths(&self) -> Result<Vec<DocumentPath>>;
}

/// A [`MetadataCache`] held in a `BTreeMap` behind a `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryMetadataCache {
    entries: RwLock<BTreeMap<DocumentPath, CachedMetadata>>,
}

impl InMemoryMetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned(e: impl std::fmt::Display) -> VaultError {
    VaultError::CacheUnavailable(format!("lock poisoned: {e}"))
}

impl MetadataCache for InMemoryMetadataCache {
    fn get_file_cache(&self, path: &DocumentPath) -> Result<Option<CachedMetadata>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(path).cloned())
    }

    fn set_file_cache(&self, path: &DocumentPath, metadata: CachedMetadata) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(path.clone(), metadata);
        Ok(())
    }

    fn remove(&self, path: &DocumentPath) -> Result<bool> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        Ok(entries.remove(path).is_some())
    }

    fn paths(&self) -> Result<Vec<DocumentPath>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.keys().cloned().collect())
    }
}
