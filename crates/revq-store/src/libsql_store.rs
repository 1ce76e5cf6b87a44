//! libSQL-backed tables.
//!
//! Every logical table maps to one SQL table whose columns are all `TEXT`.
//! A save drops and recreates the SQL table inside a transaction, so a failed
//! save leaves the previous contents untouched.

use libsql::{Builder, Value};
use revq_core::table::Table;

use crate::error::StoreError;
use crate::{TableStore, check_table_name};

/// Tables stored in a local libSQL database file.
pub struct LibsqlStore {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl LibsqlStore {
    /// Open (or create) a local database at `path`. `":memory:"` works for tests.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LibSql` if the database cannot be opened.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        Ok(Self { db, conn })
    }

    async fn exists(&self, table: &str) -> Result<bool, StoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }
}

impl TableStore for LibsqlStore {
    async fn load(&self, table: &str) -> Result<Table, StoreError> {
        check_table_name(table)?;
        if !self.exists(table).await? {
            return Err(StoreError::NotFound {
                table: table.to_string(),
            });
        }

        let mut rows = self
            .conn
            .query(&format!("SELECT * FROM {}", quote_ident(table)), ())
            .await?;

        let width = rows.column_count();
        let columns = (0..width)
            .map(|i| rows.column_name(i).unwrap_or_default().to_string())
            .collect::<Vec<_>>();
        let mut out = Table::new(columns)?;

        while let Some(row) = rows.next().await? {
            let mut cells = Vec::with_capacity(out.columns().len());
            for i in 0..width {
                cells.push(cell_from_value(row.get_value(i)?));
            }
            out.push_row(cells)?;
        }

        tracing::debug!(table, rows = out.len(), "loaded libsql table");
        Ok(out)
    }

    async fn save(&self, table: &str, data: &Table) -> Result<(), StoreError> {
        check_table_name(table)?;
        if data.columns().is_empty() {
            return Err(StoreError::format(table, "a table needs at least one column"));
        }

        let name = quote_ident(table);
        let column_list = data
            .columns()
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ");
        let create = format!(
            "CREATE TABLE {name} ({})",
            data.columns()
                .iter()
                .map(|c| format!("{} TEXT", quote_ident(c)))
                .collect::<Vec<_>>()
                .join(", ")
        );
        let placeholders = (1..=data.columns().len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let insert = format!("INSERT INTO {name} ({column_list}) VALUES ({placeholders})");

        let tx = self.conn.transaction().await?;
        tx.execute(&format!("DROP TABLE IF EXISTS {name}"), ()).await?;
        tx.execute(&create, ()).await?;
        for row in data.rows() {
            let params = row
                .iter()
                .map(|cell| cell.clone().map_or(Value::Null, Value::Text))
                .collect::<Vec<_>>();
            tx.execute(&insert, libsql::params_from_iter(params)).await?;
        }
        tx.commit().await?;

        tracing::debug!(table, rows = data.len(), "saved libsql table");
        Ok(())
    }

    async fn list_tables(&self) -> Result<Vec<String>, StoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
                (),
            )
            .await?;
        let mut names = Vec::new();
        while let Some(row) = rows.next().await? {
            names.push(row.get::<String>(0)?);
        }
        Ok(names)
    }
}

/// Quote an identifier for SQL, doubling embedded quotes.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn cell_from_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Text(s) => Some(s),
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) => Some(f.to_string()),
        Value::Blob(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("r1/Aspect 1"), "\"r1/Aspect 1\"");
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn numeric_cells_become_text() {
        assert_eq!(cell_from_value(Value::Integer(2020)), Some("2020".to_string()));
        assert_eq!(cell_from_value(Value::Null), None);
    }
}
