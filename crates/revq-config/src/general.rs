//! General application configuration.

use revq_core::columns::DEFAULT_SKIP_MARKER;
use serde::{Deserialize, Serialize};

fn default_skip_marker() -> String {
    DEFAULT_SKIP_MARKER.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Value written to every aspect column when a reviewer skips an article.
    #[serde(default = "default_skip_marker")]
    pub skip_marker: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            skip_marker: default_skip_marker(),
        }
    }
}
