use std::path::PathBuf;

use anyhow::Context;
use revq_config::RevqConfig;
use revq_engine::ReviewService;
use revq_store::AnyStore;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: ReviewService<AnyStore>,
}

impl AppContext {
    /// Open both stores and load the catalog and the ledger.
    pub async fn init(project_root: PathBuf, config: RevqConfig) -> anyhow::Result<Self> {
        let catalog_path = config.catalog.resolved_path(&project_root);
        let results_path = config.results.resolved_path(&project_root);

        let catalog_store = AnyStore::open(config.catalog.backend, &catalog_path)
            .await
            .with_context(|| format!("failed to open catalog store at {}", catalog_path.display()))?;
        let results_store = AnyStore::open(config.results.backend, &results_path)
            .await
            .with_context(|| format!("failed to open results store at {}", results_path.display()))?;

        let service = ReviewService::open(&config, &catalog_store, results_store)
            .await
            .context("failed to load catalog and results")?;

        if service.catalog().is_empty() {
            tracing::warn!(path = %catalog_path.display(), "catalog is empty");
        }
        tracing::debug!(
            root = %project_root.display(),
            articles = service.catalog().len(),
            reviewers = service.registry().len(),
            "context ready"
        );

        Ok(Self { service })
    }
}
