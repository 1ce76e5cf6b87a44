//! Fallback ordering configuration.

use revq_core::entities::OrderingKey;
use serde::{Deserialize, Serialize};

fn default_ordering() -> Vec<OrderingKey> {
    vec![OrderingKey::desc("Year"), OrderingKey::asc("Citations")]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectionConfig {
    /// Sort keys for never-reviewed articles. The first key is primary.
    #[serde(default = "default_ordering")]
    pub ordering: Vec<OrderingKey>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            ordering: default_ordering(),
        }
    }
}

impl SelectionConfig {
    /// Attribute names in key order. These columns are required in the catalog.
    #[must_use]
    pub fn attributes(&self) -> Vec<String> {
        self.ordering.iter().map(|k| k.attribute.clone()).collect()
    }
}
