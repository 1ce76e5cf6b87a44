//! In-process table store for tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use revq_core::table::Table;

use crate::error::StoreError;
use crate::{TableStore, check_table_name};

/// Tables held in memory. Saves can be made to fail on demand.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<BTreeMap<String, Table>>,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seeding.
    #[must_use]
    pub fn with_table(self, name: impl Into<String>, table: Table) -> Self {
        self.lock().insert(name.into(), table);
        self
    }

    /// Snapshot of a stored table.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<Table> {
        self.lock().get(name).cloned()
    }

    /// While set, every save returns an I/O error and stores nothing.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Table>> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TableStore for MemoryStore {
    async fn load(&self, table: &str) -> Result<Table, StoreError> {
        check_table_name(table)?;
        self.lock()
            .get(table)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                table: table.to_string(),
            })
    }

    async fn save(&self, table: &str, data: &Table) -> Result<(), StoreError> {
        check_table_name(table)?;
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::other("simulated save failure")));
        }
        self.lock().insert(table.to_string(), data.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list_tables(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.lock().keys().cloned().collect())
    }
}
