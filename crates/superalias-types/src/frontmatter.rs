//! The frontmatter block attached to a note.
//!
//! A [`Frontmatter`] is an insertion-ordered mapping from field name to a
//! loosely typed value. Field values are kept as [`serde_json::Value`] so the
//! block survives a YAML round-trip without losing fields SuperAlias does not
//! understand.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name the alias list is written back under.
pub const ALIASES_KEY: &str = "aliases";

/// Structured key-value header of a note.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frontmatter(Map<String, Value>);

impl Frontmatter {
    /// Create an empty block.
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert or replace a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replace the `aliases` entry with the given sequence.
    pub fn set_aliases(&mut self, aliases: Vec<String>) {
        let values = aliases.into_iter().map(Value::String).collect();
        self.0.insert(ALIASES_KEY.to_string(), Value::Array(values));
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Frontmatter {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Frontmatter {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Read the existing aliases of a block.
///
/// The `aliases` field is read when present, otherwise the first field named
/// `aliases` or `alias` in any case. A sequence contributes its scalar
/// entries, a string is split on commas. Returns `None` when there is no such
/// field or it yields no alias.
pub fn parse_frontmatter_aliases(frontmatter: &Frontmatter) -> Option<Vec<String>> {
    let value = match frontmatter.get(ALIASES_KEY) {
        Some(value) => value,
        None => frontmatter.iter().find(|(key, _)| is_alias_key(key))?.1,
    };

    let aliases: Vec<String> = match value {
        Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    if aliases.is_empty() {
        None
    } else {
        Some(aliases)
    }
}

/// Text a field value contributes as an alias, if any.
///
/// Absent-like values (null, `false`, zero, the empty string) contribute
/// nothing. Sequences and mappings are not aliases. Numbers and `true` become
/// their text, so a field holding `2024` and an existing alias `"2024"` are
/// the same alias after the merge.
pub fn alias_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn is_alias_key(key: &str) -> bool {
    key.eq_ignore_ascii_case("aliases") || key.eq_ignore_ascii_case("alias")
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
