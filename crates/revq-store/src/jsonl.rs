//! JSONL table files.
//!
//! Each table is `{dir}/{table}.jsonl`. The first line is a JSON array of
//! column names and every following line is a JSON array of cells, with
//! `null` for an empty cell:
//!
//! ```text
//! ["Title","Abstract","r1/Aspect 1","r1/EvaluationDate"]
//! ["C","About C","4 - High","2026-10-18T09:00:00+00:00"]
//! ["B","About B",null,null]
//! ```
//!
//! Files whose lines are JSON objects are also readable (exports from other
//! tools); columns are then the union of keys in first-seen order.

use std::io;
use std::path::PathBuf;

use revq_core::table::Table;
use serde_json::Value;

use crate::error::StoreError;
use crate::{TableStore, check_table_name};

const EXTENSION: &str = "jsonl";

/// Reads and writes tables as JSONL files in one directory.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    dir: PathBuf,
}

impl JsonlStore {
    /// Point at a directory. Nothing is created until the first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{table}.{EXTENSION}"))
    }
}

impl TableStore for JsonlStore {
    async fn load(&self, table: &str) -> Result<Table, StoreError> {
        check_table_name(table)?;
        let path = self.table_path(table);
        if !path.is_file() {
            return Err(StoreError::NotFound {
                table: table.to_string(),
            });
        }

        let lines: Vec<Value> = serde_jsonlines::json_lines(&path)
            .and_then(|iter| iter.collect::<io::Result<Vec<Value>>>())
            .map_err(|e| io_to_store(table, e))?;
        tracing::debug!(table, lines = lines.len(), path = %path.display(), "loaded jsonl table");

        parse_lines(table, lines)
    }

    async fn save(&self, table: &str, data: &Table) -> Result<(), StoreError> {
        check_table_name(table)?;
        std::fs::create_dir_all(&self.dir)?;

        let header = Value::Array(
            data.columns()
                .iter()
                .map(|c| Value::String(c.clone()))
                .collect(),
        );
        let rows = data.rows().iter().map(|row| {
            Value::Array(
                row.iter()
                    .map(|cell| cell.clone().map_or(Value::Null, Value::String))
                    .collect(),
            )
        });

        // Write beside the target and rename so readers never see a partial table.
        let path = self.table_path(table);
        let tmp = self.dir.join(format!(".{table}.{EXTENSION}.tmp"));
        serde_jsonlines::write_json_lines(&tmp, std::iter::once(header).chain(rows))?;
        std::fs::rename(&tmp, &path)?;

        tracing::debug!(table, rows = data.len(), path = %path.display(), "saved jsonl table");
        Ok(())
    }

    async fn list_tables(&self) -> Result<Vec<String>, StoreError> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && !stem.starts_with('.')
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

fn io_to_store(table: &str, error: io::Error) -> StoreError {
    if error.kind() == io::ErrorKind::InvalidData {
        StoreError::format(table, error.to_string())
    } else {
        StoreError::Io(error)
    }
}

fn parse_lines(table: &str, lines: Vec<Value>) -> Result<Table, StoreError> {
    let mut lines = lines.into_iter();
    let Some(first) = lines.next() else {
        return Ok(Table::default());
    };

    match first {
        Value::Array(header) => {
            let columns = header
                .into_iter()
                .map(|v| match v {
                    Value::String(s) => Ok(s),
                    other => Err(StoreError::format(
                        table,
                        format!("header cells must be strings, found {other}"),
                    )),
                })
                .collect::<Result<Vec<_>, _>>()?;
            let mut out = Table::new(columns)?;
            for (idx, line) in lines.enumerate() {
                let Value::Array(cells) = line else {
                    return Err(StoreError::format(
                        table,
                        format!("line {} is not an array", idx + 2),
                    ));
                };
                out.push_row(cells.into_iter().map(cell_from_value).collect())
                    .map_err(|e| StoreError::format(table, format!("line {}: {e}", idx + 2)))?;
            }
            Ok(out)
        }
        Value::Object(_) => parse_object_lines(table, std::iter::once(first).chain(lines)),
        other => Err(StoreError::format(
            table,
            format!("first line must be an array or object, found {other}"),
        )),
    }
}

fn parse_object_lines(
    table: &str,
    lines: impl Iterator<Item = Value>,
) -> Result<Table, StoreError> {
    let mut records = Vec::new();
    for (idx, line) in lines.enumerate() {
        let Value::Object(map) = line else {
            return Err(StoreError::format(
                table,
                format!("line {} is not an object", idx + 1),
            ));
        };
        records.push(map);
    }

    let mut out = Table::default();
    for record in &records {
        for key in record.keys() {
            out.ensure_column(key);
        }
    }
    for record in records {
        let cells = out
            .columns()
            .iter()
            .map(|c| record.get(c).cloned().and_then(cell_from_value))
            .collect();
        out.push_row(cells)?;
    }
    Ok(out)
}

fn cell_from_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn header_and_rows_parse() {
        let lines = vec![
            serde_json::json!(["Title", "Year"]),
            serde_json::json!(["A", 2020]),
            serde_json::json!(["B", null]),
        ];
        let table = parse_lines("t", lines).unwrap();
        assert_eq!(table.columns(), ["Title", "Year"]);
        assert_eq!(table.rows()[0], vec![Some("A".to_string()), Some("2020".to_string())]);
        assert_eq!(table.rows()[1], vec![Some("B".to_string()), None]);
    }

    #[test]
    fn object_lines_union_keys() {
        let lines = vec![
            serde_json::json!({"Title": "A", "Year": 2020}),
            serde_json::json!({"Title": "B", "Citations": 3}),
        ];
        let table = parse_lines("t", lines).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.has_column("Citations"));
        let second = table.records().nth(1).unwrap();
        assert_eq!(second.get("Citations"), Some("3"));
        assert_eq!(second.get("Year"), None);
    }

    #[test]
    fn ragged_row_is_a_format_error() {
        let lines = vec![serde_json::json!(["Title", "Year"]), serde_json::json!(["A"])];
        let err = parse_lines("t", lines).unwrap_err();
        assert!(matches!(err, StoreError::Format { .. }));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn scalar_first_line_is_a_format_error() {
        let err = parse_lines("t", vec![serde_json::json!(42)]).unwrap_err();
        assert!(matches!(err, StoreError::Format { .. }));
    }

    #[test]
    fn empty_file_is_an_empty_table() {
        let table = parse_lines("t", Vec::new()).unwrap();
        assert!(table.columns().is_empty());
        assert!(table.is_empty());
    }
}
