use serde::{Deserialize, Serialize};

use superalias_types::FieldNames;

/// Field list used when nothing has been persisted.
pub const DEFAULT_KEYS: &str = "title";

/// Persisted plugin settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Comma-separated frontmatter fields to fold into aliases.
    pub keys: String,
}

impl Settings {
    /// The configured field names, split from the raw `keys` string.
    pub fn field_names(&self) -> FieldNames {
        FieldNames::parse(&self.keys)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keys: DEFAULT_KEYS.to_string(),
        }
    }
}
