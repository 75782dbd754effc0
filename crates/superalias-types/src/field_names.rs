//! The ordered list of metadata keys whose values become aliases.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator used by the raw, user-edited form of the field list.
pub const FIELD_SEPARATOR: char = ',';

/// Ordered sequence of field names.
///
/// The raw form is a comma-separated string. Parsing splits on commas and
/// nothing else: whitespace is kept as part of the name, and an empty raw
/// string yields a single empty name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldNames(Vec<String>);

impl FieldNames {
    /// Parse the raw comma-separated form.
    pub fn parse(raw: &str) -> Self {
        Self(raw.split(FIELD_SEPARATOR).map(str::to_string).collect())
    }

    /// Build from already-split names.
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for FieldNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for FieldNames {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for FieldNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}
