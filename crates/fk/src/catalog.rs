//! Filter catalog built from the config file.
//!
//! Each `[[filters]]` entry becomes a [`FilterOption`] over JSON items. The
//! option's predicate looks up a dotted field path in the item and compares
//! it to the current filter value with the entry's [`MatchMode`].

use std::fmt;

use filterkit_rs::{FilterOption, FilterValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a filter value is compared against an item field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Case-insensitive substring match. Surrounding `*` are ignored.
    #[default]
    Contains,
    /// Case-insensitive equality.
    Equals,
    /// Case-insensitive prefix match. A trailing `*` is ignored.
    Prefix,
    /// Boolean comparison accepting `true/false/yes/no/1/0`.
    Boolean,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Contains => "contains",
            Self::Equals => "equals",
            Self::Prefix => "prefix",
            Self::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// A catalog entry from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDef {
    /// Filter key as typed in search text.
    pub key: String,

    /// Display name. Defaults to the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Description shown by `fk keys`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    /// Dotted path into each item. Defaults to the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Comparison mode.
    #[serde(rename = "match", default)]
    pub match_mode: MatchMode,
}

impl FilterDef {
    /// Returns the display label.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }

    /// Returns the field path.
    pub fn field(&self) -> &str {
        self.field.as_deref().unwrap_or(&self.key)
    }
}

/// Returns true if `key` can be typed as `key:` in search text.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Builds the filter state over JSON items from catalog entries.
///
/// A later entry with the same key replaces an earlier one.
pub fn build_catalog(defs: &[FilterDef]) -> FilterValue<Value> {
    FilterValue::new(defs.iter().map(|def| {
        let key = def.key.clone();
        let field = def.field().to_string();
        let mode = def.match_mode;

        let option = FilterOption::new(
            def.key.clone(),
            def.label(),
            move |item: &Value, state: &FilterValue<Value>| {
                field_matches(item, &field, mode, state.get_value_of_key(&key))
            },
        );
        match &def.hint {
            Some(hint) => option.with_hint(hint.clone()),
            None => option,
        }
    }))
}

/// Finds the catalog entry for a key. The last duplicate wins.
pub fn find_def<'a>(defs: &'a [FilterDef], key: &str) -> Option<&'a FilterDef> {
    defs.iter().rev().find(|def| def.key == key)
}

/// Resolves a dotted path such as `user.name` or `tags.0`.
///
/// Returns `None` for a missing segment or a JSON `null`.
pub fn lookup<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    let found = path
        .split('.')
        .try_fold(item, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(values) => segment.parse::<usize>().ok().and_then(|i| values.get(i)),
            _ => None,
        })?;
    (!found.is_null()).then_some(found)
}

/// Tests one item field against a filter value.
///
/// `None`, empty and all-`*` values place no constraint. A missing field
/// never matches a real constraint.
pub fn field_matches(item: &Value, path: &str, mode: MatchMode, wanted: Option<&str>) -> bool {
    let Some(wanted) = wanted else {
        return true;
    };
    if wanted.chars().all(|c| c == '*') {
        return true;
    }

    match lookup(item, path) {
        Some(found) => value_matches(found, mode, &wanted.to_lowercase()),
        None => false,
    }
}

/// Compares a JSON value to a lower-cased filter value.
///
/// An array matches when any element matches.
pub fn value_matches(found: &Value, mode: MatchMode, wanted: &str) -> bool {
    let text = match found {
        Value::Array(values) => return values.iter().any(|v| value_matches(v, mode, wanted)),
        Value::Null | Value::Object(_) => return false,
        Value::String(s) => s.to_lowercase(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
    };

    match mode {
        MatchMode::Contains => text.contains(wanted.trim_matches('*')),
        MatchMode::Equals => text == wanted,
        MatchMode::Prefix => text.starts_with(wanted.trim_end_matches('*')),
        MatchMode::Boolean => match (parse_bool(wanted), parse_bool(&text)) {
            (Some(want), Some(have)) => want == have,
            _ => false,
        },
    }
}

/// Parses `true/false/yes/no/1/0` (lower case).
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
