use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_rows(&items)),
        Value::Object(_) => {
            let mut rows = Vec::new();
            flatten("", &value, &mut rows);
            Ok(table::render(&["field", "value"], &rows, table_options()))
        }
        scalar => Ok(table::render(
            &["value"],
            &[vec![cell(&scalar)]],
            table_options(),
        )),
    }
}

/// Arrays of objects become one row per item; anything else one cell per item.
fn render_rows(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
        return table::render(&["value"], &rows, table_options());
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render(&header_refs, &rows, table_options())
}

/// Walk nested objects and arrays, emitting `a.b` and `a[0]` paths in
/// field order.
fn flatten(prefix: &str, value: &Value, rows: &mut Vec<Vec<String>>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, rows);
            }
        }
        Value::Array(items) if !items.is_empty() && !items.iter().all(is_scalar) => {
            for (index, child) in items.iter().enumerate() {
                flatten(&format!("{prefix}[{index}]"), child, rows);
            }
        }
        other => rows.push(vec![prefix.to_string(), cell(other)]),
    }
}

const fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(is_scalar) => items
            .iter()
            .map(cell)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use serde_json::json;

    use super::{flatten, render};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        title: &'static str,
        year: u32,
    }

    #[test]
    fn json_render_is_pretty() {
        let value = Example {
            title: "A",
            year: 2020,
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["title"], "A");
        assert!(out.contains('\n'));
    }

    #[test]
    fn raw_render_is_single_line() {
        let value = Example {
            title: "A",
            year: 2020,
        };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        assert!(out.contains("\"year\":2020"));
    }

    #[test]
    fn nested_values_flatten_to_paths() {
        let value = json!({
            "article": { "title": "A", "attributes": { "year": 2020 } },
            "aspects": [
                { "label": "Aspect 1", "options": ["1", "2"] },
            ],
            "message": null,
        });

        let mut rows = Vec::new();
        flatten("", &value, &mut rows);
        let paths = rows.iter().map(|row| row[0].as_str()).collect::<Vec<_>>();

        assert_eq!(
            paths,
            vec![
                "article.title",
                "article.attributes.year",
                "aspects[0].label",
                "aspects[0].options",
                "message",
            ]
        );
        assert_eq!(rows[3][1], "1, 2");
        assert_eq!(rows[4][1], "-");
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let items: Vec<Example> = Vec::new();
        let out = render(&items, OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "(no rows)");
    }

    #[test]
    fn object_table_has_field_header() {
        let value = Example {
            title: "A",
            year: 2020,
        };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("field")));
        assert!(out.contains("2020"));
    }
}
