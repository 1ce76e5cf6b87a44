//! Cross-cutting error types for revq.
//!
//! Domain-specific errors (`StoreError`, `EngineError`) live in their own
//! crates. `anyhow` is only used at the binary boundary.

use thiserror::Error;

/// Errors that can be raised by any revq crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A row was pushed with a different number of cells than the table has columns.
    #[error("Row has {found} cells but table has {expected} columns")]
    RowWidth { expected: usize, found: usize },

    /// A column name appeared twice in a table header.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
}
