//! Service layer: one reviewer session over a loaded catalog and ledger.
//!
//! `ReviewService` owns the results store, the catalog, and the in-memory
//! ledger. Every mutation follows the same commit protocol:
//! 1. Clone the ledger
//! 2. Record the submission into the clone
//! 3. Save the whole clone to the results table
//! 4. Replace the in-memory ledger only if the save succeeded
//!
//! A failed save therefore leaves both the stored table and the session's
//! view of it as they were.

use rand::Rng;
use revq_config::RevqConfig;
use revq_core::columns::ColumnKey;
use revq_core::entities::{Article, Aspect, OrderingKey};
use revq_core::enums::Tier;
use revq_core::responses::{AnswerView, AspectPrompt, AttributeBounds, CatalogResponse, SubmitResponse};
use revq_store::TableStore;

use crate::auth::ReviewerRegistry;
use crate::catalog::{Catalog, load_catalog};
use crate::error::EngineError;
use crate::filter::RangeFilter;
use crate::ledger::{Ledger, load_ledger};
use crate::resume::{EditableFilter, blank_prompts, list_editable, prefill};
use crate::selection::Selector;
use crate::session::{ReviewSession, SessionMode};
use crate::submission::{Submission, record, written_values};

/// An article ready to be shown, with its aspect prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub article: Article,
    /// Selection tier, or `None` when reopened for editing.
    pub tier: Option<Tier>,
    /// The reviewer's first-answer timestamp, when editing.
    pub evaluated_at: Option<String>,
    pub aspects: Vec<AspectPrompt>,
}

/// Orchestrates selection, recording, and persistence for one process.
pub struct ReviewService<S> {
    results: S,
    results_table: String,
    catalog: Catalog,
    ledger: Ledger,
    registry: ReviewerRegistry,
    aspects: Vec<Aspect>,
    ordering: Vec<OrderingKey>,
    skip_marker: String,
}

impl<S: TableStore> ReviewService<S> {
    /// Assemble from an already built catalog and ledger.
    #[must_use]
    pub fn new(config: &RevqConfig, catalog: Catalog, ledger: Ledger, results: S) -> Self {
        Self {
            results,
            results_table: config.results.table.clone(),
            catalog,
            ledger,
            registry: ReviewerRegistry::new(config.reviewers.clone()),
            aspects: config.aspects.clone(),
            ordering: config.selection.ordering.clone(),
            skip_marker: config.general.skip_marker.clone(),
        }
    }

    /// Load the catalog and the ledger and start a service.
    ///
    /// # Errors
    ///
    /// - `EngineError::MissingColumns` if the catalog lacks required columns
    /// - `EngineError::Store` if a source table or the results table cannot be read
    /// - `EngineError::InvalidLedger` if the results table has no `Title` column
    pub async fn open<C: TableStore>(
        config: &RevqConfig,
        catalog_store: &C,
        results: S,
    ) -> Result<Self, EngineError> {
        let shared = config.catalog.backend == config.results.backend
            && config.catalog.path == config.results.path;
        let exclude = shared.then_some(config.results.table.as_str());

        let catalog = load_catalog(
            catalog_store,
            &config.catalog.tables,
            &config.selection.attributes(),
            exclude,
        )
        .await?;
        let ledger = load_ledger(&results, &config.results.table).await?;
        tracing::debug!(
            articles = catalog.len(),
            ledger_rows = ledger.len(),
            "review service ready"
        );
        Ok(Self::new(config, catalog, ledger, results))
    }

    /// Log a reviewer in and start a queue-mode session.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidCredentials` on a bad id/name pair.
    pub fn authenticate(&self, id: &str, name: &str) -> Result<ReviewSession, EngineError> {
        self.registry.authenticate(id, name).map(ReviewSession::new)
    }

    /// What the session should show next.
    ///
    /// In queue mode this runs the selector over the filtered catalog and
    /// returns `None` once nothing is left. In resume mode it reopens the
    /// chosen title with stored answers filled in.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnknownArticle` if a resumed title is neither in
    /// the catalog nor in the ledger.
    pub fn present<R: Rng + ?Sized>(
        &self,
        session: &ReviewSession,
        rng: &mut R,
    ) -> Result<Option<Presentation>, EngineError> {
        match &session.mode {
            SessionMode::Queue => {
                let filtered = self.catalog.filter(&session.ranges);
                let selector = Selector::new(&self.registry, &self.ordering);
                Ok(selector
                    .select_next(session.reviewer_id(), &filtered, &self.ledger, rng)
                    .map(|pick| Presentation {
                        article: pick.article.clone(),
                        tier: Some(pick.tier),
                        evaluated_at: None,
                        aspects: blank_prompts(&self.aspects),
                    }))
            }
            SessionMode::Resume { title } => {
                let article = self.resolve_article(title)?;
                let reviewer = session.reviewer_id();
                Ok(Some(Presentation {
                    evaluated_at: self
                        .ledger
                        .get(title, &ColumnKey::evaluation_date(reviewer))
                        .map(str::to_string),
                    aspects: prefill(&self.ledger, reviewer, title, &self.aspects),
                    article,
                    tier: None,
                }))
            }
        }
    }

    /// Find an article by title in the full catalog, falling back to the
    /// title and abstract stored in the ledger for articles that have since
    /// left the catalog.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnknownArticle` if neither knows the title.
    pub fn resolve_article(&self, title: &str) -> Result<Article, EngineError> {
        if let Some(article) = self.catalog.get(title) {
            return Ok(article.clone());
        }
        self.ledger
            .row(title)
            .map(|row| Article::new(title, row.get(&ColumnKey::Abstract).unwrap_or_default()))
            .ok_or_else(|| EngineError::UnknownArticle {
                title: title.to_string(),
            })
    }

    /// Record a submission for `title` and commit the whole results table.
    ///
    /// # Errors
    ///
    /// - `EngineError::UnknownArticle` if the title cannot be resolved
    /// - `EngineError::Store` if the save fails; the in-memory ledger is
    ///   left as it was before the call
    pub async fn submit(
        &mut self,
        session: &ReviewSession,
        title: &str,
        submission: &Submission,
    ) -> Result<SubmitResponse, EngineError> {
        let article = self.resolve_article(title)?;
        let reviewer = session.reviewer_id();

        let next = record(
            &self.ledger,
            reviewer,
            &article,
            &self.aspects,
            submission,
            &self.skip_marker,
        );
        let table = next.to_table()?;
        if let Err(e) = self.results.save(&self.results_table, &table).await {
            tracing::warn!(reviewer, title, error = %e, "commit failed; keeping previous ledger");
            return Err(e.into());
        }
        self.ledger = next;

        let action = submission.action();
        tracing::info!(reviewer, title, %action, "evaluation committed");

        let answers = self
            .aspects
            .iter()
            .zip(written_values(&self.aspects, submission, &self.skip_marker))
            .map(|(aspect, value)| AnswerView {
                label: aspect.label.clone(),
                value,
            })
            .collect();
        Ok(SubmitResponse {
            reviewer_id: reviewer.to_string(),
            title: title.to_string(),
            action,
            evaluated_at: self
                .ledger
                .get(title, &ColumnKey::evaluation_date(reviewer))
                .map(str::to_string),
            answers,
        })
    }

    /// Titles the session's reviewer can reopen.
    #[must_use]
    pub fn editable(&self, session: &ReviewSession, filter: &EditableFilter) -> Vec<String> {
        list_editable(&self.ledger, session.reviewer_id(), filter, &self.skip_marker)
    }

    /// Catalog size before and after `ranges`, with attribute extents.
    #[must_use]
    pub fn summary(&self, ranges: &RangeFilter) -> CatalogResponse {
        let bounds = self
            .catalog
            .attributes()
            .iter()
            .filter_map(|attr| {
                self.catalog
                    .attribute_bounds(attr)
                    .map(|(min, max)| AttributeBounds {
                        attribute: attr.clone(),
                        min,
                        max,
                    })
            })
            .collect();
        CatalogResponse {
            total: self.catalog.len(),
            filtered: self.catalog.filter(ranges).len(),
            bounds,
            ranges: ranges
                .iter()
                .map(|(attr, range)| AttributeBounds {
                    attribute: attr.clone(),
                    min: range.min,
                    max: range.max,
                })
                .collect(),
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub fn aspects(&self) -> &[Aspect] {
        &self.aspects
    }

    #[must_use]
    pub const fn registry(&self) -> &ReviewerRegistry {
        &self.registry
    }

    #[must_use]
    pub fn skip_marker(&self) -> &str {
        &self.skip_marker
    }

    /// The results store, for inspection after commits.
    #[must_use]
    pub const fn results_store(&self) -> &S {
        &self.results
    }
}
