//! # revq-store
//!
//! The persistence collaborator: named tables that can be listed, loaded,
//! and saved wholesale.
//!
//! Backends:
//! - [`JsonlStore`]: a directory of `<table>.jsonl` files
//! - [`LibsqlStore`]: a libSQL database, one SQL table per logical table
//! - [`MemoryStore`]: in-process, for tests
//!
//! [`AnyStore`] picks a backend from configuration at runtime.
//!
//! # Consistency
//!
//! `save` is the only write primitive and it replaces the whole table. Two
//! sessions that load, modify, and save the same table concurrently race:
//! the later save overwrites the earlier one, including rows it never
//! touched. No locking or compare-and-swap is attempted.

pub mod any;
pub mod error;
pub mod jsonl;
pub mod libsql_store;
pub mod memory;

pub use any::AnyStore;
pub use error::StoreError;
pub use jsonl::JsonlStore;
pub use libsql_store::LibsqlStore;
pub use memory::MemoryStore;

use revq_core::table::Table;

/// A collection of named tables with whole-table reads and writes.
#[allow(async_fn_in_trait)]
pub trait TableStore {
    /// Read an entire table.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the table does not exist, or another
    /// `StoreError` if it cannot be read.
    async fn load(&self, table: &str) -> Result<Table, StoreError>;

    /// Replace the entire contents of a table, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails. A failed save leaves the
    /// previously stored contents in place.
    async fn save(&self, table: &str, data: &Table) -> Result<(), StoreError>;

    /// Names of all tables in the store, sorted.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be enumerated.
    async fn list_tables(&self) -> Result<Vec<String>, StoreError>;
}

/// Reject names that cannot safely become a file name.
pub(crate) fn check_table_name(table: &str) -> Result<(), StoreError> {
    let bad = table.trim().is_empty()
        || table.contains(['/', '\\'])
        || table.starts_with('.')
        || table.contains('\0');
    if bad {
        return Err(StoreError::InvalidTableName(table.to_string()));
    }
    Ok(())
}
