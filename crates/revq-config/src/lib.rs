//! # revq-config
//!
//! Layered configuration loading for revq using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`REVQ_*` prefix, `__` as separator)
//! 2. Project-level `.revq/config.toml`
//! 3. User-level `~/.config/revq/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `REVQ_RESULTS__PATH` -> `results.path` and
//! `REVQ_REVIEWERS__10809607670` -> `reviewers.10809607670`. Figment lowercases
//! env keys, so reviewer ids set through the environment must be lowercase.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use revq_config::RevqConfig;
//!
//! let config = RevqConfig::load_from(Path::new(".")).expect("config");
//! config.validate().expect("valid config");
//! println!("{} aspects configured", config.aspects.len());
//! ```

mod aspects;
mod error;
mod general;
mod selection;
mod store;

pub use aspects::default_aspects;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use selection::SelectionConfig;
pub use store::{CatalogConfig, ResultsConfig, StoreBackend};

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use revq_core::columns::{ABSTRACT_COLUMN, EVALUATION_DATE_FIELD, REVIEWER_SEPARATOR, TITLE_COLUMN};
use revq_core::entities::Aspect;
use serde::{Deserialize, Serialize};

/// Project-local config directory name.
pub const PROJECT_DIR: &str = ".revq";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevqConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub results: ResultsConfig,
    /// Static registry: credential id -> display name.
    #[serde(default)]
    pub reviewers: BTreeMap<String, String>,
    #[serde(default = "default_aspects")]
    pub aspects: Vec<Aspect>,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl Default for RevqConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            results: ResultsConfig::default(),
            reviewers: BTreeMap::new(),
            aspects: default_aspects(),
            selection: SelectionConfig::default(),
            general: GeneralConfig::default(),
        }
    }
}

impl RevqConfig {
    /// Load configuration with the project file taken from `project_root`.
    ///
    /// Does NOT read `.env`; the binary loads it before calling this.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source fails to parse or extract.
    pub fn load_from(project_root: &Path) -> Result<Self, ConfigError> {
        Self::figment_for(project_root)
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the provider chain with the project file under `project_root`.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    #[must_use]
    pub fn figment_for(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = Self::project_config_path(project_root);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("REVQ_").split("__"))
    }

    /// `<project_root>/.revq/config.toml`.
    #[must_use]
    pub fn project_config_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_DIR).join("config.toml")
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("revq").join("config.toml"))
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_aspects()?;
        self.validate_reviewers()?;
        self.validate_ordering()?;
        Ok(())
    }

    fn validate_aspects(&self) -> Result<(), ConfigError> {
        if self.aspects.is_empty() {
            return Err(ConfigError::invalid("aspects", "at least one aspect is required"));
        }
        let marker = &self.general.skip_marker;
        if marker.trim().is_empty() {
            return Err(ConfigError::invalid("general.skip_marker", "must not be empty"));
        }

        let mut labels = HashSet::new();
        for (idx, aspect) in self.aspects.iter().enumerate() {
            let field = format!("aspects[{idx}].label");
            if aspect.label.trim().is_empty() {
                return Err(ConfigError::invalid(field, "must not be empty"));
            }
            if aspect.label.contains(REVIEWER_SEPARATOR) {
                return Err(ConfigError::invalid(
                    field,
                    format!("must not contain '{REVIEWER_SEPARATOR}'"),
                ));
            }
            if aspect.label == EVALUATION_DATE_FIELD {
                return Err(ConfigError::invalid(
                    field,
                    format!("'{EVALUATION_DATE_FIELD}' is reserved"),
                ));
            }
            if !labels.insert(aspect.label.as_str()) {
                return Err(ConfigError::invalid(
                    field,
                    format!("duplicate label '{}'", aspect.label),
                ));
            }
            if aspect.options.is_empty() {
                return Err(ConfigError::invalid(
                    format!("aspects[{idx}].options"),
                    "at least one option is required",
                ));
            }
            if aspect.options.iter().any(|o| o == marker) {
                return Err(ConfigError::invalid(
                    format!("aspects[{idx}].options"),
                    format!("option collides with skip marker '{marker}'"),
                ));
            }
        }
        Ok(())
    }

    fn validate_reviewers(&self) -> Result<(), ConfigError> {
        for id in self.reviewers.keys() {
            if id.trim().is_empty() || id.contains(REVIEWER_SEPARATOR) {
                return Err(ConfigError::invalid(
                    format!("reviewers.{id}"),
                    format!("reviewer id must be non-empty and must not contain '{REVIEWER_SEPARATOR}'"),
                ));
            }
        }
        Ok(())
    }

    fn validate_ordering(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (idx, key) in self.selection.ordering.iter().enumerate() {
            let field = format!("selection.ordering[{idx}].attribute");
            if key.attribute == TITLE_COLUMN || key.attribute == ABSTRACT_COLUMN {
                return Err(ConfigError::invalid(field, "Title and Abstract are not numeric"));
            }
            if key.attribute.trim().is_empty() {
                return Err(ConfigError::invalid(field, "must not be empty"));
            }
            if !seen.insert(key.attribute.as_str()) {
                return Err(ConfigError::invalid(
                    field,
                    format!("duplicate attribute '{}'", key.attribute),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use revq_core::entities::OrderingKey;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RevqConfig::default();
        assert!(config.reviewers.is_empty());
        assert_eq!(config.aspects.len(), 3);
        assert_eq!(config.results.table, "results");
        config.validate().expect("defaults should validate");
    }

    #[test]
    fn figment_builds_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config: RevqConfig = RevqConfig::figment_for(dir.path())
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.general.skip_marker, "SKIPPED");
        assert_eq!(config.selection.ordering.len(), 2);
    }

    #[test]
    fn rejects_label_with_separator() {
        let mut config = RevqConfig::default();
        config.aspects[0].label = "bad/label".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("aspects[0].label"));
    }

    #[test]
    fn rejects_reserved_label() {
        let mut config = RevqConfig::default();
        config.aspects[1].label = "EvaluationDate".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_option_equal_to_skip_marker() {
        let mut config = RevqConfig::default();
        config.aspects[0].options.push("SKIPPED".into());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("skip marker"));
    }

    #[test]
    fn rejects_reviewer_id_with_separator() {
        let mut config = RevqConfig::default();
        config.reviewers.insert("a/b".into(), "Someone".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_duplicate_ordering_attribute() {
        let mut config = RevqConfig::default();
        config.selection.ordering = vec![OrderingKey::asc("Year"), OrderingKey::desc("Year")];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate attribute"));
    }

    #[test]
    fn rejects_title_as_ordering_attribute() {
        let mut config = RevqConfig::default();
        config.selection.ordering = vec![OrderingKey::asc("Title")];
        assert!(config.validate().is_err());
    }
}
