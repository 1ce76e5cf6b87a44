//! Store locations for the catalog source and the results table.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Which `TableStore` implementation backs a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Directory of `<table>.jsonl` files.
    #[default]
    Jsonl,
    /// libSQL database file, one SQL table per logical table.
    Libsql,
}

fn default_catalog_path() -> String {
    ".revq/catalog".to_string()
}

fn default_results_path() -> String {
    ".revq/results".to_string()
}

fn default_results_table() -> String {
    "results".to_string()
}

/// Where articles are read from.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Directory (jsonl) or database file (libsql). Relative paths resolve
    /// against the project root.
    #[serde(default = "default_catalog_path")]
    pub path: String,

    /// Source tables in concatenation order. Empty means every table the
    /// backend lists, in name order.
    #[serde(default)]
    pub tables: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_catalog_path(),
            tables: Vec::new(),
        }
    }
}

impl CatalogConfig {
    #[must_use]
    pub fn resolved_path(&self, project_root: &Path) -> PathBuf {
        resolve(project_root, &self.path)
    }
}

/// Where evaluations are read from and written back to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResultsConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    #[serde(default = "default_results_path")]
    pub path: String,

    #[serde(default = "default_results_table")]
    pub table: String,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_results_path(),
            table: default_results_table(),
        }
    }
}

impl ResultsConfig {
    #[must_use]
    pub fn resolved_path(&self, project_root: &Path) -> PathBuf {
        resolve(project_root, &self.path)
    }
}

fn resolve(project_root: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        project_root.join(path)
    }
}
