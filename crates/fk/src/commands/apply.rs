//! Apply command implementation.
//!
//! Builds a filter state from the configured catalog, applies the search
//! text and hidden filters, and filters a JSON array of items.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use filterkit_rs::filter::FilterSnapshot;
use filterkit_rs::FilterValue;
use serde_json::Value;
use strsim::levenshtein;
use tracing::debug;

use super::config::Config;
use super::{CommandContext, CommandError, Result};
use crate::catalog::build_catalog;
use crate::output::{format_apply_json, format_apply_table};

/// Maximum Levenshtein distance to consider a key as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Options for the apply command.
#[derive(Debug, Default)]
pub struct ApplyOptions {
    /// Search text.
    pub text: String,
    /// Hidden filters as `key=value`.
    pub hidden: Vec<String>,
    /// Items file. Reads stdin when `None`.
    pub input: Option<PathBuf>,
    /// Omit matching items from the output.
    pub summary: bool,
}

/// Result of applying a filter to items.
#[derive(Debug)]
pub struct ApplyResult<'a> {
    /// Active filters and rendered strings.
    pub snapshot: FilterSnapshot,
    /// Typed keys the catalog does not know.
    pub unknown_keys: Vec<String>,
    /// Number of input items.
    pub total: usize,
    /// Items that passed every filter.
    pub matched: Vec<&'a Value>,
    /// Whether items are left out of the output.
    pub summary: bool,
}

/// Executes the apply command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not a JSON array, if a
/// hidden filter is malformed or names a key outside the catalog, or if
/// JSON serialization fails.
pub fn execute(ctx: &CommandContext, opts: &ApplyOptions, config: &Config) -> Result<()> {
    let items = read_items(opts.input.as_deref())?;
    if ctx.verbose {
        eprintln!("Read {} items", items.len());
    }
    let filter = build_filter(&build_catalog(&config.filters), &opts.text, &opts.hidden)?;
    let result = apply(&filter, &items, opts.summary);

    if !ctx.quiet {
        for key in &result.unknown_keys {
            let candidates = filter.available_options().map(|o| o.key());
            eprintln!("Warning: {}", format_unknown_key(key, find_similar_key(key, candidates)));
        }
    }

    if ctx.json_output {
        let output = format_apply_json(&result)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_apply_table(&result, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}

/// Applies search text and `key=value` hidden filters to a base state.
///
/// # Errors
///
/// Returns [`CommandError::Input`] for a malformed hidden filter and
/// [`CommandError::Filter`] for a hidden key outside the catalog.
pub fn build_filter(
    base: &FilterValue<Value>,
    text: &str,
    hidden: &[String],
) -> Result<FilterValue<Value>> {
    let mut filter = base.set_by_string(text);

    for pair in hidden {
        let (key, value) = parse_hidden_pair(pair)?;
        filter = filter.set_value_of_hidden_key(&key, Some(value))?;
    }

    debug!(
        raw = %filter.raw_value(),
        api = %filter.api_filter_string(),
        "built filter"
    );
    Ok(filter)
}

/// Filters items and collects the result.
pub fn apply<'a>(filter: &FilterValue<Value>, items: &'a [Value], summary: bool) -> ApplyResult<'a> {
    ApplyResult {
        snapshot: filter.snapshot(),
        unknown_keys: filter.unknown_keys().into_iter().map(str::to_string).collect(),
        total: items.len(),
        matched: filter.filter_items(items),
        summary,
    }
}

/// Splits `key=value`. The key is trimmed and lower-cased; the value is kept.
fn parse_hidden_pair(pair: &str) -> Result<(String, &str)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_lowercase(), value)),
        _ => Err(CommandError::Input(format!(
            "hidden filter '{pair}' must look like key=value"
        ))),
    }
}

/// Reads a JSON array of items from a file, or from stdin when `path` is `None`.
fn read_items(path: Option<&Path>) -> Result<Vec<Value>> {
    let content = match path {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            CommandError::Input(format!("failed to read {}: {}", path.display(), e))
        })?,
        None => {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            content
        }
    };

    parse_items(&content)
}

/// Parses a JSON array of items.
fn parse_items(content: &str) -> Result<Vec<Value>> {
    match serde_json::from_str(content)? {
        Value::Array(items) => Ok(items),
        other => Err(CommandError::Input(format!(
            "expected a JSON array of items, found {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Finds the catalog key closest to `query`, if any is close enough.
fn find_similar_key<'a>(query: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    let (best_match, best_distance) = candidates
        .map(|key| (key, levenshtein(query, key)))
        .min_by_key(|(_, distance)| *distance)?;

    // Only suggest if the distance is within threshold and not an exact match
    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match.to_string())
    } else {
        None
    }
}

/// Formats the unknown-key warning, optionally including a suggestion.
fn format_unknown_key(key: &str, suggestion: Option<String>) -> String {
    let base = format!("unknown filter key '{key}' matches every item.");
    match suggestion {
        Some(s) => format!("{base} Did you mean '{s}'?"),
        None => base,
    }
}
