//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use figment::Jail;
use pretty_assertions::assert_eq;
use revq_config::{RevqConfig, StoreBackend};
use revq_core::enums::SortDirection;

#[test]
fn loads_project_config_from_revq_dir() {
    Jail::expect_with(|jail| {
        jail.create_dir(".revq")?;
        jail.create_file(
            ".revq/config.toml",
            r#"
[catalog]
backend = "libsql"
path = "articles.db"
tables = ["2023", "2024"]

[results]
backend = "jsonl"
path = "out"
table = "evaluations"

[reviewers]
"10809607670" = "Ada Lovelace"
"78142440644" = "Alan Turing"

[[aspects]]
label = "Relevance"
prompt = "How relevant is it?"
options = ["Low", "Medium", "High"]

[selection]
ordering = [
    { attribute = "Citations", direction = "desc" },
]

[general]
skip_marker = "PASS"
"#,
        )?;

        let config = RevqConfig::load_from(jail.directory()).expect("config loads");

        assert_eq!(config.catalog.backend, StoreBackend::Libsql);
        assert_eq!(config.catalog.tables, vec!["2023", "2024"]);
        assert_eq!(config.results.table, "evaluations");
        assert_eq!(config.reviewers.len(), 2);
        assert_eq!(config.reviewers["78142440644"], "Alan Turing");
        assert_eq!(config.aspects.len(), 1);
        assert_eq!(config.aspects[0].options, vec!["Low", "Medium", "High"]);
        assert_eq!(config.selection.ordering.len(), 1);
        assert_eq!(config.selection.ordering[0].direction, SortDirection::Desc);
        assert_eq!(config.general.skip_marker, "PASS");
        config.validate().expect("valid");
        Ok(())
    });
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    Jail::expect_with(|jail| {
        jail.create_dir(".revq")?;
        jail.create_file(
            ".revq/config.toml",
            r#"
[reviewers]
"r1" = "Reviewer One"
"#,
        )?;

        let config = RevqConfig::load_from(jail.directory()).expect("config loads");

        assert_eq!(config.aspects.len(), 3);
        assert_eq!(config.selection.attributes(), vec!["Year", "Citations"]);
        assert_eq!(config.catalog.backend, StoreBackend::Jsonl);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".revq")?;
        jail.create_file(
            ".revq/config.toml",
            r#"
[results]
path = "from-toml"
"#,
        )?;
        jail.set_env("REVQ_RESULTS__PATH", "from-env");
        jail.set_env("REVQ_REVIEWERS__12345", "Grace Hopper");

        let config = RevqConfig::load_from(jail.directory()).expect("config loads");

        assert_eq!(config.results.path, "from-env");
        assert_eq!(config.reviewers["12345"], "Grace Hopper");
        Ok(())
    });
}

#[test]
fn malformed_toml_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_dir(".revq")?;
        jail.create_file(".revq/config.toml", "[catalog\npath = ")?;

        assert!(RevqConfig::load_from(jail.directory()).is_err());
        Ok(())
    });
}
