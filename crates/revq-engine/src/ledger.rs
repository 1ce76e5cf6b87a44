//! Evaluation ledger: the in-memory form of the results table.
//!
//! A ledger is a list of rows keyed by title, each holding a sparse map from
//! [`ColumnKey`] to value. Reviewer columns appear the first time a reviewer
//! writes; columns the engine does not own are carried through untouched.

use std::collections::{BTreeMap, HashMap, HashSet};

use revq_core::columns::{ColumnKey, ReviewerField};
use revq_core::table::Table;
use revq_store::TableStore;

use crate::auth::ReviewerRegistry;
use crate::error::EngineError;

/// One results-table row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerRow {
    cells: BTreeMap<ColumnKey, String>,
}

impl LedgerRow {
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.get(&ColumnKey::Title)
    }

    #[must_use]
    pub fn get(&self, key: &ColumnKey) -> Option<&str> {
        self.cells.get(key).map(String::as_str)
    }

    /// Every non-empty `(field, value)` this reviewer owns in the row.
    pub fn reviewer_fields<'a>(
        &'a self,
        reviewer: &'a str,
    ) -> impl Iterator<Item = (&'a ReviewerField, &'a str)> + 'a {
        self.cells.iter().filter_map(move |(key, value)| match key {
            ColumnKey::Reviewer { reviewer: r, field } if r == reviewer => {
                Some((field, value.as_str()))
            }
            _ => None,
        })
    }

    /// Whether `reviewer` has answered or skipped this row.
    #[must_use]
    pub fn has_entry_by(&self, reviewer: &str) -> bool {
        self.reviewer_fields(reviewer).next().is_some()
    }

    fn set(&mut self, key: ColumnKey, value: String) {
        self.cells.insert(key, value);
    }
}

/// The full results table, keyed by title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    columns: Vec<ColumnKey>,
    rows: Vec<LedgerRow>,
    /// Title -> first row carrying it.
    index: HashMap<String, usize>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            columns: vec![ColumnKey::Title, ColumnKey::Abstract],
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl Ledger {
    /// Interpret a stored results table.
    ///
    /// A table with no columns is an empty ledger. Duplicate titles are kept
    /// as stored; lookups see the first one.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidLedger` if a table with columns has no
    /// `Title` column.
    pub fn from_table(table: &Table) -> Result<Self, EngineError> {
        if table.columns().is_empty() {
            return Ok(Self::default());
        }
        let columns: Vec<ColumnKey> = table.columns().iter().map(|c| ColumnKey::parse(c)).collect();
        if !columns.contains(&ColumnKey::Title) {
            return Err(EngineError::InvalidLedger("no 'Title' column".to_string()));
        }

        let mut ledger = Self {
            columns,
            rows: Vec::with_capacity(table.len()),
            index: HashMap::with_capacity(table.len()),
        };
        for cells in table.rows() {
            let mut row = LedgerRow::default();
            for (key, cell) in ledger.columns.iter().zip(cells) {
                if let Some(value) = cell {
                    row.set(key.clone(), value.clone());
                }
            }
            if let Some(title) = row.title() {
                if ledger.index.contains_key(title) {
                    tracing::warn!(%title, "duplicate title in results table; first row wins");
                } else {
                    ledger.index.insert(title.to_string(), ledger.rows.len());
                }
            }
            ledger.rows.push(row);
        }
        Ok(ledger)
    }

    /// Render back to a table, columns in ledger order.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Core` only if the ledger's own bookkeeping is
    /// inconsistent.
    pub fn to_table(&self) -> Result<Table, EngineError> {
        let mut table = Table::new(self.columns.iter().map(ToString::to_string))?;
        for row in &self.rows {
            table.push_row(
                self.columns
                    .iter()
                    .map(|key| row.get(key).map(str::to_string))
                    .collect(),
            )?;
        }
        Ok(table)
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnKey] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &LedgerRow> {
        self.rows.iter()
    }

    /// Whether any row carries `title`, reviewed or not.
    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.index.contains_key(title)
    }

    #[must_use]
    pub fn row(&self, title: &str) -> Option<&LedgerRow> {
        self.index.get(title).map(|&i| &self.rows[i])
    }

    #[must_use]
    pub fn get(&self, title: &str, key: &ColumnKey) -> Option<&str> {
        self.row(title).and_then(|row| row.get(key))
    }

    /// Titles `reviewer` has answered or skipped, on any row carrying them.
    #[must_use]
    pub fn reviewed_by(&self, reviewer: &str) -> HashSet<&str> {
        self.titled_rows()
            .filter(|(_, row)| row.has_entry_by(reviewer))
            .map(|(title, _)| title)
            .collect()
    }

    /// Titles any registered reviewer other than `reviewer` has answered or skipped.
    #[must_use]
    pub fn reviewed_by_others(&self, reviewer: &str, registry: &ReviewerRegistry) -> HashSet<&str> {
        self.titled_rows()
            .filter(|(_, row)| {
                registry
                    .ids()
                    .filter(|id| *id != reviewer)
                    .any(|id| row.has_entry_by(id))
            })
            .map(|(title, _)| title)
            .collect()
    }

    /// Set one cell, creating the row (seeded with title and abstract) and
    /// the column as needed. New columns go to the end.
    pub(crate) fn set(&mut self, title: &str, abstract_text: &str, key: ColumnKey, value: String) {
        if !self.columns.contains(&key) {
            self.columns.push(key.clone());
        }
        let idx = self.row_index_or_insert(title, abstract_text);
        self.rows[idx].set(key, value);
    }

    fn row_index_or_insert(&mut self, title: &str, abstract_text: &str) -> usize {
        if let Some(&idx) = self.index.get(title) {
            return idx;
        }
        for key in [ColumnKey::Title, ColumnKey::Abstract] {
            if !self.columns.contains(&key) {
                self.columns.push(key);
            }
        }
        let mut row = LedgerRow::default();
        row.set(ColumnKey::Title, title.to_string());
        if !abstract_text.trim().is_empty() {
            row.set(ColumnKey::Abstract, abstract_text.to_string());
        }
        let idx = self.rows.len();
        self.rows.push(row);
        self.index.insert(title.to_string(), idx);
        idx
    }

    /// Every row with a title, duplicates included.
    fn titled_rows(&self) -> impl Iterator<Item = (&str, &LedgerRow)> {
        self.rows.iter().filter_map(|row| row.title().map(|title| (title, row)))
    }
}

/// Load the results table. A missing table is an empty ledger (first run);
/// any other failure is returned, since saving over an unread table would
/// erase it.
///
/// # Errors
///
/// Returns `EngineError::Store` for load failures other than not-found, or
/// `EngineError::InvalidLedger` from [`Ledger::from_table`].
pub async fn load_ledger<S: TableStore>(store: &S, table: &str) -> Result<Ledger, EngineError> {
    match store.load(table).await {
        Ok(data) => {
            let ledger = Ledger::from_table(&data)?;
            tracing::debug!(table, rows = ledger.len(), "ledger loaded");
            Ok(ledger)
        }
        Err(e) if e.is_not_found() => {
            tracing::debug!(table, "results table not found; starting empty");
            Ok(Ledger::default())
        }
        Err(e) => Err(e.into()),
    }
}
