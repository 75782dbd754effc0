//! Alias merge engine for SuperAlias.
//!
//! Folds the values of configured frontmatter fields into a note's alias
//! list. The merge is stateless and idempotent: existing aliases are never
//! dropped, newly discovered values are appended in configured order, and
//! duplicates collapse onto their first occurrence.

pub mod merger;

pub use merger::{merge, merged_aliases, MergeOutcome};
