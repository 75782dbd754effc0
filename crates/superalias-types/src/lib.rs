//! Foundation types for SuperAlias.
//!
//! This crate provides the metadata structures shared by every other
//! SuperAlias crate: the frontmatter block attached to a note, the ordered
//! list of configured field names, and the alias-parsing utility that decides
//! what counts as a note's existing aliases.
//!
//! # Key Types
//!
//! - [`Frontmatter`] — Ordered field-name to value mapping of a note header
//! - [`FieldNames`] — Ordered list of metadata keys folded into aliases
//! - [`parse_frontmatter_aliases`] — Canonical reader for the alias entry
//! - [`split_frontmatter`] / [`replace_aliases`] — YAML header framing

pub mod document;
pub mod error;
pub mod field_names;
pub mod frontmatter;

pub use document::{replace_aliases, split_frontmatter};
pub use error::{Result, TypeError};
pub use field_names::FieldNames;
pub use frontmatter::{alias_text, parse_frontmatter_aliases, Frontmatter, ALIASES_KEY};
