//! Catalog key output formatting.

use serde::Serialize;

use crate::catalog::MatchMode;

use super::helpers::{format_header, format_key, truncate_str};

/// One catalog key as listed by `fk keys`.
#[derive(Debug, Serialize)]
pub struct KeyRow<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub field: &'a str,
    #[serde(rename = "match")]
    pub match_mode: MatchMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'a str>,
}

/// JSON output structure for the keys command.
#[derive(Serialize)]
struct KeysOutput<'a> {
    keys: &'a [KeyRow<'a>],
}

/// Formats catalog keys as JSON.
pub fn format_keys_json(rows: &[KeyRow]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&KeysOutput { keys: rows })
}

/// Formats catalog keys as a table.
pub fn format_keys_table(rows: &[KeyRow], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No filter keys configured. Run 'fk config init' to create a starter config.\n"
            .to_string();
    }

    let mut output = format_header(
        &format!("{:<16} {:<16} {:<9} {}", "Key", "Label", "Match", "Hint"),
        use_colors,
    );
    for row in rows {
        let key = format_key(&format!("{:<16}", row.key), use_colors);
        let label = truncate_str(row.label, 16);
        let line = format!(
            "{} {:<16} {:<9} {}",
            key,
            label,
            row.match_mode.to_string(),
            row.hint.unwrap_or("")
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<KeyRow<'static>> {
        vec![
            KeyRow {
                key: "serial",
                label: "Serial",
                field: "serial",
                match_mode: MatchMode::Contains,
                hint: Some("Token serial number"),
            },
            KeyRow {
                key: "type",
                label: "Type",
                field: "tokentype",
                match_mode: MatchMode::Equals,
                hint: None,
            },
        ]
    }

    #[test]
    fn test_format_keys_json() {
        let json: serde_json::Value =
            serde_json::from_str(&format_keys_json(&rows()).unwrap()).unwrap();
        assert_eq!(json["keys"][0]["key"], "serial");
        assert_eq!(json["keys"][0]["match"], "contains");
        assert_eq!(json["keys"][1]["field"], "tokentype");
        assert!(json["keys"][1].get("hint").is_none());
    }

    #[test]
    fn test_format_keys_table() {
        let table = format_keys_table(&rows(), false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("serial"));
        assert!(lines[1].ends_with("Token serial number"));
        assert!(lines[2].contains("equals"));
    }

    #[test]
    fn test_format_keys_table_empty() {
        assert!(format_keys_table(&[], false).contains("fk config init"));
    }
}
