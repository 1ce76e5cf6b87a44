//! Store error types for revq-store.

use revq_core::errors::CoreError;
use thiserror::Error;

/// Errors from loading or saving tables.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The named table does not exist in the store.
    #[error("Table not found: {table}")]
    NotFound { table: String },

    /// Table names map to file names and SQL identifiers; some are refused.
    #[error("Invalid table name: '{0}'")]
    InvalidTableName(String),

    /// Stored content could not be read as a table.
    #[error("Malformed table '{table}': {reason}")]
    Format { table: String, reason: String },

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Table shape violation while assembling rows.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub(crate) fn format(table: &str, reason: impl Into<String>) -> Self {
        Self::Format {
            table: table.to_string(),
            reason: reason.into(),
        }
    }
}
