//! Output rendering for the Site24x7 CLI client.
//!
//! Responses are untyped JSON values. They are rendered as an aligned text
//! table, pretty JSON or YAML into whatever writer the caller provides.

use serde_json::Value;
use std::io::Write;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

pub const NO_DATA_NOTICE: &str = "No data to display";

const COLUMN_SEPARATOR: &str = "  ";

/// Error types that can occur during formatting operations
#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    /// Error when an unsupported output format is requested
    #[error("invalid output format {0}")]
    UnsupportedOutputFormat(String),

    #[error("JSON serialization error: {0}")]
    JsonSerializationError(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    WriteError(#[from] std::io::Error),
}

/// Enum representing the supported output formats
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// Pretty printed JSON
    Json,
    /// Block style YAML
    Yaml,
}

impl OutputFormat {
    /// Returns a vector of all supported format names as strings
    pub fn names() -> Vec<&'static str> {
        OutputFormat::iter().map(<&'static str>::from).collect()
    }

    pub fn from_name(name: &str) -> Result<OutputFormat, FormattingError> {
        OutputFormat::from_str(name.trim())
            .map_err(|_| FormattingError::UnsupportedOutputFormat(name.to_string()))
    }
}

/// Render `data` in the requested format and write it, newline terminated, to `out`
pub fn render(data: &Value, format: OutputFormat, out: &mut dyn Write) -> Result<(), FormattingError> {
    let rendered = match format {
        OutputFormat::Json => to_pretty_json(data)?,
        OutputFormat::Yaml => to_yaml(data)?,
        OutputFormat::Table => to_table(data),
    };

    writeln!(out, "{}", rendered.trim_end_matches('\n'))?;
    Ok(())
}

pub fn to_pretty_json(data: &Value) -> Result<String, FormattingError> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// YAML rendering falls back to JSON if the value cannot be expressed as YAML
pub fn to_yaml(data: &Value) -> Result<String, FormattingError> {
    match serde_yaml::to_string(data) {
        Ok(yaml) => Ok(yaml),
        Err(e) => {
            crate::error_utils::report_warning(&format!(
                "YAML output unavailable ({}), falling back to JSON",
                e
            ));
            to_pretty_json(data)
        }
    }
}

pub fn to_table(data: &Value) -> String {
    match data {
        Value::Array(items) if items.is_empty() => NO_DATA_NOTICE.to_string(),
        Value::Object(map) if map.is_empty() => NO_DATA_NOTICE.to_string(),
        Value::Array(items) => match items.first() {
            Some(Value::Object(first)) => {
                let keys: Vec<&String> = first.keys().collect();
                let rows = items
                    .iter()
                    .map(|item| {
                        keys.iter()
                            .map(|key| item.get(key.as_str()).map(cell_text).unwrap_or_default())
                            .collect()
                    })
                    .collect();
                layout_table(keys.iter().map(|key| column_title(key)).collect(), rows)
            }
            _ => items.iter().map(cell_text).collect::<Vec<_>>().join("\n"),
        },
        Value::Object(map) => {
            let headers = map.keys().map(|key| column_title(key)).collect();
            let row = map.values().map(cell_text).collect();
            layout_table(headers, vec![row])
        }
        other => cell_text(other),
    }
}

/// Turn a record key into a column header: `check_frequency` becomes `Check Frequency`
pub fn column_title(key: &str) -> String {
    let mut title = String::with_capacity(key.len());
    let mut previous_is_alphabetic = false;

    for c in key.replace('_', " ").chars() {
        if c.is_alphabetic() {
            if previous_is_alphabetic {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            previous_is_alphabetic = true;
        } else {
            title.push(c);
            previous_is_alphabetic = false;
        }
    }

    title
}

/// String form of a cell: strings unquoted, null empty, nested values as compact JSON
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn layout_table(headers: Vec<String>, rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(&headers, &widths));
    lines.push(format_row(&rule, &widths));
    for row in &rows {
        lines.push(format_row(row, &widths));
    }

    lines.join("\n")
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR)
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render_to_string(data: &Value, format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        render(data, format, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_name("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_name("YAML").unwrap(), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from_name("Table").unwrap(), OutputFormat::Table);
        assert!(OutputFormat::from_name("csv").is_err());
        assert_eq!(OutputFormat::names(), vec!["table", "json", "yaml"]);
        assert_eq!(OutputFormat::default().to_string(), "table");
    }

    #[test]
    fn test_empty_list_prints_notice() {
        assert_eq!(render_to_string(&json!([]), OutputFormat::Table), "No data to display\n");
    }

    #[test]
    fn test_table_headers_are_title_cased() {
        let data = json!([
            {"monitor_id": "1001", "display_name": "Home page", "status": 1},
            {"monitor_id": "1002", "display_name": "Login", "status": 0}
        ]);

        let output = render_to_string(&data, OutputFormat::Table);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Monitor Id  Display Name  Status");
        assert_eq!(lines[1], "----------  ------------  ------");
        assert_eq!(lines[2], "1001        Home page     1");
        assert_eq!(lines[3], "1002        Login         0");
    }

    #[test]
    fn test_table_missing_keys_render_empty_cells() {
        let data = json!([{"a": "x", "b": "y"}, {"b": "z"}]);
        let output = to_table(&data);
        assert_eq!(output.lines().last().unwrap(), "   z");
    }

    #[test]
    fn test_single_mapping_renders_one_row() {
        let data = json!({"display_name": "API", "tags": ["a", "b"], "group": null});
        let output = to_table(&data);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Display Name"));
        assert!(lines[2].contains("[\"a\",\"b\"]"));
    }

    #[test]
    fn test_column_title() {
        assert_eq!(column_title("check_frequency"), "Check Frequency");
        assert_eq!(column_title("group_id"), "Group Id");
        assert_eq!(column_title("URL"), "Url");
        assert_eq!(column_title("http2_enabled"), "Http2 Enabled");
    }

    #[test]
    fn test_json_uses_two_space_indentation() {
        let output = render_to_string(&json!({"a": 1}), OutputFormat::Json);
        assert_eq!(output, "{\n  \"a\": 1\n}\n");
    }

    #[test]
    fn test_yaml_block_style() {
        let output = render_to_string(&json!({"name": "web", "tags": ["x"]}), OutputFormat::Yaml);
        assert_eq!(output, "name: web\ntags:\n- x\n");
    }
}
