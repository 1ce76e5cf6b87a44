//! Engine error types for revq-engine.

use revq_core::errors::CoreError;
use revq_store::StoreError;
use thiserror::Error;

/// Errors surfaced to the reviewer. Running out of articles is not one of
/// them: selection returns `None` for an exhausted queue.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The catalog source lacks required columns. Fatal for the session.
    #[error("Catalog is missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// Loading or saving a table failed.
    #[error("Store access failed: {0}")]
    Store(#[from] StoreError),

    /// Unknown credential id, or a display name that does not match it.
    #[error("Invalid credentials for reviewer id '{id}'")]
    InvalidCredentials { id: String },

    /// Title is neither in the catalog nor in the results table.
    #[error("Unknown article: '{title}'")]
    UnknownArticle { title: String },

    /// An answer that is not one of the aspect's options.
    #[error("Invalid answer for {aspect}: '{value}'")]
    InvalidAnswer { aspect: String, value: String },

    /// Some aspects have no answer yet.
    #[error("Missing answers for: {}", aspects.join(", "))]
    IncompleteAnswers { aspects: Vec<String> },

    /// The stored results table cannot be interpreted.
    #[error("Invalid results table: {0}")]
    InvalidLedger(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
