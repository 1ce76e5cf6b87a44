use std::path::Path;

use anyhow::Context;
use revq_config::RevqConfig;

/// Load `.env`, then the layered config for `project_root`, and validate it.
pub fn load_config(project_root: &Path) -> anyhow::Result<RevqConfig> {
    load_project_dotenv(project_root)?;

    let config = RevqConfig::load_from(project_root).with_context(|| {
        format!(
            "failed to load configuration for {}",
            project_root.display()
        )
    })?;
    config.validate().context("invalid configuration")?;

    if config.reviewers.is_empty() {
        tracing::warn!("no reviewers configured; add a [reviewers] table to .revq/config.toml");
    }
    Ok(config)
}

fn load_project_dotenv(project_root: &Path) -> anyhow::Result<()> {
    let env_path = project_root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        return Ok(());
    }

    dotenvy::dotenv().ok();
    Ok(())
}
