use std::path::Path;

use revq_config::StoreBackend;
use revq_core::table::Table;

use crate::error::StoreError;
use crate::{JsonlStore, LibsqlStore, TableStore};

/// A store whose backend is chosen by configuration.
pub enum AnyStore {
    Jsonl(JsonlStore),
    Libsql(LibsqlStore),
}

impl AnyStore {
    /// Open the configured backend. For JSONL `path` is a directory, for
    /// libSQL it is the database file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the libSQL database cannot be opened.
    pub async fn open(backend: StoreBackend, path: &Path) -> Result<Self, StoreError> {
        tracing::debug!(?backend, path = %path.display(), "opening store");
        match backend {
            StoreBackend::Jsonl => Ok(Self::Jsonl(JsonlStore::new(path))),
            StoreBackend::Libsql => {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    std::fs::create_dir_all(parent)?;
                }
                let path = path.to_string_lossy();
                Ok(Self::Libsql(LibsqlStore::open_local(&path).await?))
            }
        }
    }
}

impl TableStore for AnyStore {
    async fn load(&self, table: &str) -> Result<Table, StoreError> {
        match self {
            Self::Jsonl(s) => s.load(table).await,
            Self::Libsql(s) => s.load(table).await,
        }
    }

    async fn save(&self, table: &str, data: &Table) -> Result<(), StoreError> {
        match self {
            Self::Jsonl(s) => s.save(table, data).await,
            Self::Libsql(s) => s.save(table, data).await,
        }
    }

    async fn list_tables(&self) -> Result<Vec<String>, StoreError> {
        match self {
            Self::Jsonl(s) => s.list_tables().await,
            Self::Libsql(s) => s.list_tables().await,
        }
    }
}
