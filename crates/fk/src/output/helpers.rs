//! Common helper functions for output formatting.

use owo_colors::OwoColorize;
use serde_json::Value;

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats a filter key for display.
pub fn format_key(key: &str, use_colors: bool) -> String {
    if use_colors {
        key.cyan().to_string()
    } else {
        key.to_string()
    }
}

/// Formats an optional filter value, with a placeholder for `None`.
pub fn format_optional_value(value: Option<&str>, use_colors: bool) -> String {
    match value {
        Some("") => "\"\"".to_string(),
        Some(value) => value.to_string(),
        None if use_colors => "(none)".dimmed().to_string(),
        None => "(none)".to_string(),
    }
}

/// Formats a header line, dimmed when colors are on.
pub fn format_header(header: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}\n", header.dimmed())
    } else {
        format!("{header}\n")
    }
}

/// Renders an item as compact single-line JSON.
pub fn format_item_line(item: &Value, max_len: usize) -> String {
    truncate_str(&item.to_string(), max_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a longer string", 10), "a longe...");
        assert_eq!(truncate_str("ééééé", 4), "é...");
    }

    #[test]
    fn test_format_optional_value() {
        assert_eq!(format_optional_value(Some("admin"), false), "admin");
        assert_eq!(format_optional_value(Some(""), false), "\"\"");
        assert_eq!(format_optional_value(None, false), "(none)");
    }

    #[test]
    fn test_format_key_plain() {
        assert_eq!(format_key("serial", false), "serial");
    }

    #[test]
    fn test_format_item_line() {
        let item = json!({ "serial": "TOTP0001" });
        assert_eq!(format_item_line(&item, 80), r#"{"serial":"TOTP0001"}"#);
        assert_eq!(format_item_line(&item, 10), r#"{"seria..."#);
    }
}
