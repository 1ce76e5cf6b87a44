use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A catalog entry. `title` is the primary key.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Coerced ordering attributes keyed by column name.
    #[serde(default)]
    pub attributes: BTreeMap<String, u64>,
}

impl Article {
    #[must_use]
    pub fn new(title: impl Into<String>, abstract_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            abstract_text: abstract_text.into(),
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: u64) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<u64> {
        self.attributes.get(name).copied()
    }
}
