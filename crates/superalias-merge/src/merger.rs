//! The alias merge itself.

use std::collections::HashSet;

use tracing::debug;

use superalias_types::{alias_text, parse_frontmatter_aliases, FieldNames, Frontmatter};

/// Alias lists observed around a single merge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Aliases as read before the merge.
    pub before: Vec<String>,
    /// Aliases written back by the merge.
    pub after: Vec<String>,
}

impl MergeOutcome {
    /// Returns `true` if the alias list differs from what was read.
    pub fn changed(&self) -> bool {
        self.before != self.after
    }

    /// Aliases present after the merge that were not present before.
    pub fn added(&self) -> Vec<&str> {
        let before: HashSet<&str> = self.before.iter().map(String::as_str).collect();
        self.after
            .iter()
            .map(String::as_str)
            .filter(|alias| !before.contains(alias))
            .collect()
    }
}

/// Compute the merged alias list without touching the block.
///
/// `existing` comes first, followed by the alias text of each configured
/// field in order. The result keeps the first occurrence of every value.
pub fn merged_aliases(
    existing: Vec<String>,
    frontmatter: &Frontmatter,
    field_names: &FieldNames,
) -> Vec<String> {
    let mut aliases = existing;
    for key in field_names.iter() {
        if let Some(text) = frontmatter.get(key).and_then(alias_text) {
            aliases.push(text);
        }
    }

    let mut seen = HashSet::with_capacity(aliases.len());
    aliases.retain(|alias| seen.insert(alias.clone()));
    aliases
}

/// Merge configured field values into the block's `aliases` entry.
///
/// An absent block is skipped and `None` is returned. Otherwise the alias
/// entry is always rewritten as a sequence, even when nothing was added.
pub fn merge(frontmatter: Option<&mut Frontmatter>, field_names: &FieldNames) -> Option<MergeOutcome> {
    let frontmatter = frontmatter?;

    let before = parse_frontmatter_aliases(frontmatter).unwrap_or_default();
    let after = merged_aliases(before.clone(), frontmatter, field_names);
    frontmatter.set_aliases(after.clone());

    let outcome = MergeOutcome { before, after };
    debug!(
        added = outcome.added().len(),
        total = outcome.after.len(),
        "aliases merged"
    );
    Some(outcome)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::Value;

    const KEYS: [&str; 6] = ["title", "subtitle", "name", "aliases", "alias", "Alias"];

    fn alias() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["", "A", "B", "My Note", "T", "1", "true"])
            .prop_map(str::to_string)
    }

    /// Any of the shapes an alias entry takes in real notes.
    fn alias_entry() -> impl Strategy<Value = Value> {
        prop_oneof![
            prop::collection::vec(alias(), 0..5)
                .prop_map(|items| Value::Array(items.into_iter().map(Value::String).collect())),
            prop::collection::vec(alias(), 0..5).prop_map(|items| Value::String(items.join(", "))),
            Just(Value::Null),
        ]
    }

    fn field_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            alias().prop_map(Value::String),
            (0u64..3).prop_map(Value::from),
            any::<bool>().prop_map(Value::Bool),
            Just(Value::Null),
        ]
    }

    fn alias_key() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["aliases", "alias", "Alias"])
    }

    fn frontmatter() -> impl Strategy<Value = Frontmatter> {
        (
            prop::option::of((alias_key(), alias_entry())),
            prop::option::of(field_value()),
            prop::option::of(field_value()),
            prop::option::of(field_value()),
        )
            .prop_map(|(aliases, title, subtitle, name)| {
                let mut fm = Frontmatter::new();
                if let Some(title) = title {
                    fm.insert("title", title);
                }
                if let Some(subtitle) = subtitle {
                    fm.insert("subtitle", subtitle);
                }
                if let Some(name) = name {
                    fm.insert("name", name);
                }
                if let Some((key, entry)) = aliases {
                    fm.insert(key, entry);
                }
                fm
            })
    }

    fn field_names() -> impl Strategy<Value = FieldNames> {
        prop::collection::vec(prop::sample::select(KEYS.to_vec()), 0..5)
            .prop_map(|keys| keys.into_iter().collect())
    }

    fn current_aliases(fm: &Frontmatter) -> Vec<String> {
        parse_frontmatter_aliases(fm).unwrap_or_default()
    }

    proptest! {
        #[test]
        fn merge_is_idempotent(fm in frontmatter(), names in field_names()) {
            let mut once = fm.clone();
            merge(Some(&mut once), &names);
            let mut twice = once.clone();
            merge(Some(&mut twice), &names);
            prop_assert_eq!(current_aliases(&once), current_aliases(&twice));
        }

        #[test]
        fn merge_never_drops_aliases(fm in frontmatter(), names in field_names()) {
            let before = current_aliases(&fm);
            let mut merged = fm.clone();
            merge(Some(&mut merged), &names);
            let after = current_aliases(&merged);
            for alias in &before {
                prop_assert!(after.contains(alias));
            }
        }

        #[test]
        fn merge_has_no_duplicates(fm in frontmatter(), names in field_names()) {
            let mut merged = fm.clone();
            let outcome = merge(Some(&mut merged), &names).unwrap();
            let unique: HashSet<&String> = outcome.after.iter().collect();
            prop_assert_eq!(unique.len(), outcome.after.len());
        }

        #[test]
        fn merge_includes_configured_values(fm in frontmatter(), names in field_names()) {
            let mut merged = fm.clone();
            let outcome = merge(Some(&mut merged), &names).unwrap();
            for key in names.iter() {
                if let Some(text) = fm.get(key).and_then(alias_text) {
                    prop_assert!(outcome.after.contains(&text));
                }
            }
        }
    }
}
