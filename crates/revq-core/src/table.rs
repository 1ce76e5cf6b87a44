//! Column-oriented table shape shared by every store backend.
//!
//! A `Table` is what a worksheet looks like from the engine's side: an ordered
//! header plus rows of optional text cells. Blank cells (empty or
//! whitespace-only) are normalised to `None` when a row is pushed, so "empty"
//! has exactly one representation everywhere downstream.

use std::collections::{BTreeMap, HashSet};

use crate::errors::CoreError;

/// An ordered header with rows of optional text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Create an empty table with the given header.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateColumn` if a column name repeats.
    pub fn new<I, S>(columns: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(CoreError::DuplicateColumn(column.clone()));
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Append a column if it is not already present. Existing rows get an
    /// empty cell. Returns the column's index.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(None);
        }
        self.columns.len() - 1
    }

    /// Append a row. Blank cells are normalised to `None`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::RowWidth` if the row width differs from the header.
    pub fn push_row(&mut self, cells: Vec<Option<String>>) -> Result<(), CoreError> {
        if cells.len() != self.columns.len() {
            return Err(CoreError::RowWidth {
                expected: self.columns.len(),
                found: cells.len(),
            });
        }
        self.rows
            .push(cells.into_iter().map(normalize_cell).collect());
        Ok(())
    }

    /// Iterate rows as name-addressable records.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(|cells| Record {
            columns: &self.columns,
            cells,
        })
    }

    /// Union several tables into one.
    ///
    /// Columns are the union of all headers in first-seen order; rows keep
    /// concatenation order and get empty cells for columns their source
    /// table lacked.
    #[must_use]
    pub fn concat(tables: &[Self]) -> Self {
        let mut out = Self::default();
        for table in tables {
            for column in &table.columns {
                out.ensure_column(column);
            }
        }
        for table in tables {
            let mapping: Vec<usize> = table
                .columns
                .iter()
                .filter_map(|c| out.column_index(c))
                .collect();
            for row in &table.rows {
                let mut cells = vec![None; out.columns.len()];
                for (src, dst) in mapping.iter().enumerate() {
                    cells[*dst].clone_from(&row[src]);
                }
                out.rows.push(cells);
            }
        }
        out
    }

    /// Compare two tables by content: same rows in the same order with the
    /// same non-empty fields. Column order and all-empty columns are ignored.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        let left: Vec<_> = self.records().map(|r| r.to_map()).collect();
        let right: Vec<_> = other.records().map(|r| r.to_map()).collect();
        left == right
    }
}

/// A borrowed row addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    cells: &'a [Option<String>],
}

impl<'a> Record<'a> {
    /// Non-empty value of `column`, or `None` if the cell is empty or the
    /// column does not exist.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.cells.get(idx).and_then(|c| c.as_deref())
    }

    /// Iterate `(column, value)` pairs for non-empty cells in header order.
    pub fn fields(self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.columns
            .iter()
            .zip(self.cells.iter())
            .filter_map(|(c, v)| v.as_deref().map(|v| (c.as_str(), v)))
    }

    fn to_map(self) -> BTreeMap<&'a str, &'a str> {
        self.fields().collect()
    }
}

fn normalize_cell(cell: Option<String>) -> Option<String> {
    cell.filter(|s| !s.trim().is_empty())
}
