//! The SuperAlias plugin and its notification handlers.

use std::sync::Arc;

use tracing::debug;

use superalias_merge::{merge, MergeOutcome};
use superalias_settings::{SettingsManager, SettingsTab};

use crate::cache::{CachedMetadata, MetadataCache};
use crate::error::Result;
use crate::path::DocumentPath;

/// A notification delivered by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum MetadataEvent {
    /// A note's metadata was re-parsed after its content changed.
    Changed {
        file: DocumentPath,
        data: String,
        cache: CachedMetadata,
    },
    /// A note's metadata finished resolving; read it from the cache.
    Resolved { file: DocumentPath },
}

/// Keeps each note's aliases in sync with its configured fields.
pub struct SuperAlias {
    settings: SettingsManager,
    cache: Arc<dyn MetadataCache>,
}

impl std::fmt::Debug for SuperAlias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuperAlias")
            .field("settings", &self.settings)
            .finish()
    }
}

impl SuperAlias {
    pub fn new(settings: SettingsManager, cache: Arc<dyn MetadataCache>) -> Self {
        Self { settings, cache }
    }

    pub fn settings(&self) -> &SettingsManager {
        &self.settings
    }

    /// The settings tab, bound to this plugin's settings.
    pub fn settings_tab(&mut self) -> SettingsTab<'_> {
        SettingsTab::new(&mut self.settings)
    }

    /// Handle a *changed* notification on the snapshot the host passed in.
    ///
    /// Returns `None` when the note has no frontmatter.
    pub fn on_changed(
        &self,
        file: &DocumentPath,
        data: &str,
        cache: &mut CachedMetadata,
    ) -> Option<MergeOutcome> {
        debug!(path = %file, bytes = data.len(), "metadata changed");
        self.inject_aliases(file, cache)
    }

    /// Handle a *resolved* notification by re-reading the cached metadata.
    ///
    /// The merged metadata is stored back into the cache. Returns `None`
    /// when the note is not cached or has no frontmatter.
    pub fn on_resolved(&self, file: &DocumentPath) -> Result<Option<MergeOutcome>> {
        debug!(path = %file, "metadata resolved");
        let Some(mut cache) = self.cache.get_file_cache(file)? else {
            return Ok(None);
        };
        let outcome = self.inject_aliases(file, &mut cache);
        if outcome.is_some() {
            self.cache.set_file_cache(file, cache)?;
        }
        Ok(outcome)
    }

    /// Dispatch a host notification.
    ///
    /// A *changed* snapshot is owned by the event, so after merging it
    /// replaces the cached entry.
    pub fn handle(&self, event: MetadataEvent) -> Result<Option<MergeOutcome>> {
        match event {
            MetadataEvent::Changed {
                file,
                data,
                mut cache,
            } => {
                let outcome = self.on_changed(&file, &data, &mut cache);
                self.cache.set_file_cache(&file, cache)?;
                Ok(outcome)
            }
            MetadataEvent::Resolved { file } => self.on_resolved(&file),
        }
    }

    fn inject_aliases(&self, file: &DocumentPath, cache: &mut CachedMetadata) -> Option<MergeOutcome> {
        let outcome = merge(cache.frontmatter.as_mut(), &self.settings.field_names())?;
        if outcome.changed() {
            debug!(path = %file, added = ?outcome.added(), "aliases updated");
        }
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryMetadataCache;
    use serde_json::{json, Value};
    use std::path::Path;
    use superalias_settings::InMemorySettingsStore;

    fn path(p: &str) -> DocumentPath {
        DocumentPath::from_relative(Path::new(p)).unwrap()
    }

    fn metadata(value: Value) -> CachedMetadata {
        CachedMetadata::new(Some(serde_json::from_value(value).unwrap()))
    }

    fn plugin_with_keys(keys: Option<&str>) -> (Arc<InMemoryMetadataCache>, SuperAlias) {
        let store = match keys {
            Some(keys) => InMemorySettingsStore::with_data(json!({ "keys": keys })),
            None => InMemorySettingsStore::new(),
        };
        let settings = SettingsManager::load(Arc::new(store)).unwrap();
        let cache = Arc::new(InMemoryMetadataCache::new());
        let plugin = SuperAlias::new(settings, cache.clone());
        (cache, plugin)
    }

    #[test]
    fn changed_merges_snapshot_in_place() {
        let (_, plugin) = plugin_with_keys(None);
        let mut snapshot = metadata(json!({"title": "My Note", "aliases": ["Old Alias"]}));

        let outcome = plugin.on_changed(&path("note.md"), "raw", &mut snapshot).unwrap();

        assert!(outcome.changed());
        assert_eq!(snapshot.aliases(), vec!["Old Alias".to_string(), "My Note".to_string()]);
    }

    #[test]
    fn changed_without_frontmatter_is_skipped() {
        let (_, plugin) = plugin_with_keys(None);
        let mut snapshot = CachedMetadata::default();
        assert!(plugin.on_changed(&path("note.md"), "", &mut snapshot).is_none());
        assert_eq!(snapshot, CachedMetadata::default());
    }

    #[test]
    fn resolved_refetches_and_stores() {
        let (cache, plugin) = plugin_with_keys(Some("title,subtitle"));
        let file = path("note.md");
        cache
            .set_file_cache(&file, metadata(json!({"title": "T", "subtitle": "S"})))
            .unwrap();

        let outcome = plugin.on_resolved(&file).unwrap().unwrap();
        assert_eq!(outcome.after, vec!["T".to_string(), "S".to_string()]);

        let stored = cache.get_file_cache(&file).unwrap().unwrap();
        assert_eq!(stored.aliases(), vec!["T".to_string(), "S".to_string()]);
    }

    #[test]
    fn resolved_for_unknown_note_is_noop() {
        let (cache, plugin) = plugin_with_keys(None);
        assert!(plugin.on_resolved(&path("missing.md")).unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn resolved_without_frontmatter_leaves_cache() {
        let (cache, plugin) = plugin_with_keys(None);
        let file = path("plain.md");
        cache.set_file_cache(&file, CachedMetadata::default()).unwrap();

        assert!(plugin.on_resolved(&file).unwrap().is_none());
        assert_eq!(cache.get_file_cache(&file).unwrap(), Some(CachedMetadata::default()));
    }

    #[test]
    fn both_triggers_agree() {
        let (cache, plugin) = plugin_with_keys(None);
        let file = path("note.md");
        let original = metadata(json!({"title": "My Note", "aliases": ["A"]}));

        let mut changed = original.clone();
        plugin.on_changed(&file, "", &mut changed);

        cache.set_file_cache(&file, original).unwrap();
        plugin.on_resolved(&file).unwrap();
        let resolved = cache.get_file_cache(&file).unwrap().unwrap();

        assert_eq!(changed, resolved);
    }

    #[test]
    fn handle_changed_writes_cache() {
        let (cache, plugin) = plugin_with_keys(None);
        let file = path("note.md");
        let event = MetadataEvent::Changed {
            file: file.clone(),
            data: "---\ntitle: T\n---\n".into(),
            cache: metadata(json!({"title": "T"})),
        };

        plugin.handle(event).unwrap();
        let stored = cache.get_file_cache(&file).unwrap().unwrap();
        assert_eq!(stored.aliases(), vec!["T".to_string()]);
    }

    #[test]
    fn settings_edit_applies_to_next_notification() {
        let (cache, mut plugin) = plugin_with_keys(None);
        let file = path("note.md");
        cache
            .set_file_cache(&file, metadata(json!({"title": "T", "name": "N"})))
            .unwrap();

        plugin.settings_tab().on_change("keys", "name").unwrap();
        let outcome = plugin.on_resolved(&file).unwrap().unwrap();
        assert_eq!(outcome.after, vec!["N".to_string()]);
    }
}
