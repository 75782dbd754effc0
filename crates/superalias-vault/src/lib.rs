//! Vault host for SuperAlias.
//!
//! A vault is a directory of Markdown notes. This crate plays the host's
//! part around the alias merge: it parses each note's frontmatter into a
//! metadata cache, delivers *changed* and *resolved* notifications to the
//! [`SuperAlias`] plugin, and resolves link targets by file name or alias.
//!
//! # Architecture
//!
//! - The [`MetadataCache`] owns every note's [`CachedMetadata`]. The plugin
//!   only borrows a snapshot for the duration of one notification.
//! - Both notifications end in the same call to
//!   [`superalias_merge::merge`] with the configured field names.
//! - Files on disk are only rewritten by [`Vault::persist`], and only when
//!   the serialized note actually differs.
//!
//! # Modules
//!
//! - [`error`] — Error types for vault operations
//! - [`path`] — [`DocumentPath`], the vault-relative note handle
//! - [`cache`] — The [`MetadataCache`] trait and [`InMemoryMetadataCache`]
//! - [`plugin`] — [`SuperAlias`] and its notification handlers
//! - [`vault`] — [`Vault`], the filesystem-backed host

pub mod cache;
pub mod error;
pub mod path;
pub mod plugin;
pub mod vault;

pub use cache::{CachedMetadata, InMemoryMetadataCache, MetadataCache};
pub use error::{Result, VaultError};
pub use path::DocumentPath;
pub use plugin::{MetadataEvent, SuperAlias};
pub use vault::Vault;
