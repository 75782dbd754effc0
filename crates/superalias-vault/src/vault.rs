//! [`Vault`]: a directory of Markdown notes acting as the plugin's host.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use superalias_merge::MergeOutcome;
use superalias_types::{parse_frontmatter_aliases, replace_aliases, split_frontmatter, ALIASES_KEY};

use crate::cache::{CachedMetadata, InMemoryMetadataCache, MetadataCache};
use crate::error::{Result, VaultError};
use crate::path::{is_note, DocumentPath};
use crate::plugin::{MetadataEvent, SuperAlias};

/// A vault rooted at a directory, with its metadata cache.
///
/// Hidden files and directories (names starting with `.`) are not notes.
#[derive(Debug)]
pub struct Vault {
    root: PathBuf,
    cache: Arc<InMemoryMetadataCache>,
}

impl Vault {
    /// Walk `root` and parse every note into the metadata cache.
    ///
    /// Notes that cannot be read as UTF-8 text, or whose frontmatter cannot
    /// be parsed, are cached without frontmatter, so the plugin skips them.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let vault = Self {
            root,
            cache: Arc::new(InMemoryMetadataCache::new()),
        };

        let walker = WalkDir::new(&vault.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_note(entry.path()) {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&vault.root)
                .map_err(|_| VaultError::InvalidPath(entry.path().display().to_string()))?;
            let path = DocumentPath::from_relative(relative)?;
            let metadata = match vault.read_note(&path) {
                Ok((metadata, _)) => metadata,
                Err(e) => {
                    warn!(path = %path, error = %e, "unreadable note; skipping");
                    CachedMetadata::new(None)
                }
            };
            vault.cache.set_file_cache(&path, metadata)?;
        }

        info!(root = %vault.root.display(), notes = vault.cache.len(), "vault opened");
        Ok(vault)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The metadata cache shared with the plugin.
    pub fn cache(&self) -> Arc<InMemoryMetadataCache> {
        Arc::clone(&self.cache)
    }

    pub fn notes(&self) -> Result<Vec<DocumentPath>> {
        self.cache.paths()
    }

    /// Deliver a *resolved* notification for every cached note.
    ///
    /// Returns the outcome for each note that has frontmatter.
    pub fn resolve_all(&self, plugin: &SuperAlias) -> Result<Vec<(DocumentPath, MergeOutcome)>> {
        let mut outcomes = Vec::new();
        for path in self.cache.paths()? {
            if let Some(outcome) = plugin.handle(MetadataEvent::Resolved { file: path.clone() })? {
                outcomes.push((path, outcome));
            }
        }
        Ok(outcomes)
    }

    /// Re-read one note from disk and deliver a *changed* notification.
    pub fn reload(&self, plugin: &SuperAlias, path: &DocumentPath) -> Result<Option<MergeOutcome>> {
        let (cache, data) = self.read_note(path)?;
        plugin.handle(MetadataEvent::Changed {
            file: path.clone(),
            data,
            cache,
        })
    }

    /// Write a note's cached aliases back to its file.
    ///
    /// Only the `aliases` entry of the header is rewritten; every other
    /// header line and the body stay as they are on disk. Returns `Ok(true)`
    /// if the file was rewritten.
    pub fn persist(&self, path: &DocumentPath) -> Result<bool> {
        let Some(frontmatter) = self
            .cache
            .get_file_cache(path)?
            .and_then(|metadata| metadata.frontmatter)
        else {
            return Ok(false);
        };
        if !frontmatter.contains_key(ALIASES_KEY) {
            return Ok(false);
        }
        let aliases = parse_frontmatter_aliases(&frontmatter).unwrap_or_default();

        let file = self.file_path(path);
        let content = fs::read_to_string(&file)?;
        let rewritten = match replace_aliases(&content, &aliases) {
            Ok(Some(rewritten)) if rewritten != content => rewritten,
            Ok(_) => return Ok(false),
            Err(source) => return Err(frontmatter_error(path, source)),
        };

        fs::write(&file, rewritten)?;
        debug!(path = %path, aliases = aliases.len(), "note written");
        Ok(true)
    }

    /// Notes a link to `name` resolves to.
    ///
    /// Matches the note's file name, its full link path, or any of its
    /// aliases, ignoring case.
    pub fn lookup(&self, name: &str) -> Result<Vec<DocumentPath>> {
        let wanted = name.trim().to_lowercase();
        let mut matches = Vec::new();
        for path in self.cache.paths()? {
            let metadata = self.cache.get_file_cache(&path)?.unwrap_or_default();
            let aliases = metadata
                .frontmatter
                .as_ref()
                .and_then(parse_frontmatter_aliases)
                .unwrap_or_default();

            let hit = path.basename().to_lowercase() == wanted
                || path.link_path().to_lowercase() == wanted
                || aliases.iter().any(|alias| alias.to_lowercase() == wanted);
            if hit {
                matches.push(path);
            }
        }
        Ok(matches)
    }

    fn file_path(&self, path: &DocumentPath) -> PathBuf {
        self.root.join(path.as_str())
    }

    fn read_note(&self, path: &DocumentPath) -> Result<(CachedMetadata, String)> {
        let content = fs::read_to_string(self.file_path(path))?;
        let frontmatter = match split_frontmatter(&content) {
            Ok((frontmatter, _)) => frontmatter,
            Err(e) => {
                warn!(path = %path, error = %e, "unreadable frontmatter; treating note as plain");
                None
            }
        };
        Ok((CachedMetadata::new(frontmatter), content))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn frontmatter_error(path: &DocumentPath, source: superalias_types::TypeError) -> VaultError {
    VaultError::Frontmatter {
        path: path.to_string(),
        source,
    }
}
