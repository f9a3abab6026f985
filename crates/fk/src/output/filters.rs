//! Filter output formatting for the parse and apply commands.

use filterkit_rs::filter::{ActiveFilter, ParsedFilter};
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::Value;

use crate::commands::apply::ApplyResult;

use super::helpers::{format_header, format_item_line, format_key, format_optional_value};

/// Maximum width of an item line in table output.
const ITEM_LINE_WIDTH: usize = 100;

/// JSON output structure for one parsed pair.
#[derive(Serialize)]
pub struct ParsedPairOutput<'a> {
    pub key: &'a str,
    pub value: Option<&'a str>,
}

/// JSON output structure for the parse command.
#[derive(Serialize)]
pub struct ParsedOutput<'a> {
    pub filters: Vec<ParsedPairOutput<'a>>,
}

/// Formats parsed pairs as JSON.
pub fn format_parsed_json(parsed: &ParsedFilter) -> Result<String, serde_json::Error> {
    let output = ParsedOutput {
        filters: parsed
            .iter()
            .map(|(key, value)| ParsedPairOutput {
                key,
                value: value.as_deref(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats parsed pairs as a table.
pub fn format_parsed_table(parsed: &ParsedFilter, use_colors: bool) -> String {
    if parsed.is_empty() {
        return "No filters found.\n".to_string();
    }

    let mut output = format_header(&format!("{:<20} {}", "Key", "Value"), use_colors);
    for (key, value) in parsed {
        // Pad before coloring so escape codes don't break alignment.
        let key = format_key(&format!("{key:<20}"), use_colors);
        let value = format_optional_value(value.as_deref(), use_colors);
        output.push_str(&format!("{key} {value}\n"));
    }
    output
}

/// JSON output structure for the apply command.
#[derive(Serialize)]
pub struct ApplyOutput<'a> {
    pub raw_value: &'a str,
    pub api_filter_string: &'a str,
    pub filters: &'a [ActiveFilter],
    pub unknown_keys: &'a [String],
    pub total: usize,
    pub matched: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<&'a [&'a Value]>,
}

/// Formats an apply result as JSON.
pub fn format_apply_json(result: &ApplyResult) -> Result<String, serde_json::Error> {
    let output = ApplyOutput {
        raw_value: &result.snapshot.raw_value,
        api_filter_string: &result.snapshot.api_filter_string,
        filters: &result.snapshot.filters,
        unknown_keys: &result.unknown_keys,
        total: result.total,
        matched: result.matched.len(),
        items: (!result.summary).then_some(result.matched.as_slice()),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats an apply result as text.
pub fn format_apply_table(result: &ApplyResult, use_colors: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("Search: {}\n", result.snapshot.raw_value));
    output.push_str(&format!("Query:  {}\n", result.snapshot.api_filter_string));

    let hidden: Vec<&ActiveFilter> = result.snapshot.filters.iter().filter(|f| f.hidden).collect();
    if !hidden.is_empty() {
        let fields: Vec<String> = hidden
            .iter()
            .map(|f| format!("{}={}", f.key, f.value.as_deref().unwrap_or("")))
            .collect();
        output.push_str(&format!("Hidden: {}\n", fields.join(" ")));
    }

    let count = format!("{} of {} items match", result.matched.len(), result.total);
    if use_colors {
        output.push_str(&format!("{}\n", count.bold()));
    } else {
        output.push_str(&count);
        output.push('\n');
    }

    if result.summary || result.matched.is_empty() {
        return output;
    }

    output.push('\n');
    for item in &result.matched {
        output.push_str(&format_item_line(item, ITEM_LINE_WIDTH));
        output.push('\n');
    }
    output
}
