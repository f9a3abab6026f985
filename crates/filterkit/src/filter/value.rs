//! The immutable filter state.
//!
//! [`FilterValue`] holds a catalog of known options plus the active public
//! and hidden filters. Every operation that changes state returns a new
//! value and shares the catalog with its predecessor.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

use super::error::{FilterError, FilterResult};
use super::option::FilterOption;
use super::parser::FilterTextParser;

/// Insertion-ordered map of options keyed by [`FilterOption::key`].
pub type OptionMap<T> = IndexMap<String, FilterOption<T>>;

/// Icon shown for an option that is not active.
const ICON_ADD: &str = "add_circle";

/// Icon shown for an option that is active.
const ICON_REMOVE: &str = "remove_circle";

/// Returns true if a value places no constraint (empty or only `*`).
fn is_unconstrained(value: &str) -> bool {
    value.chars().all(|c| c == '*')
}

/// Wraps a value in double quotes, escaping `"` and backslashes.
fn quote_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Quotes a value when it would not survive a parse unquoted.
fn render_value(value: &str) -> Cow<'_, str> {
    let needs_quotes = value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '\\' | ':'));
    if needs_quotes {
        Cow::Owned(quote_value(value))
    } else {
        Cow::Borrowed(value)
    }
}

/// Renders options as search text.
///
/// A dummy without a value renders as its bare key. An empty value renders
/// as `key:`. An unquoted value runs until the next `key:`, so a value that
/// is followed by a bare key is always quoted.
fn render_fields<'a, T: 'a>(options: impl Iterator<Item = &'a FilterOption<T>>) -> String {
    let options: Vec<&FilterOption<T>> = options.collect();
    let is_bare = |option: &FilterOption<T>| option.is_dummy() && option.value().is_none();

    let mut fields = Vec::with_capacity(options.len());
    for (index, &option) in options.iter().enumerate() {
        if is_bare(option) {
            fields.push(option.key().to_string());
            continue;
        }

        let value = option.value().unwrap_or("");
        let bare_follows = options.get(index + 1).is_some_and(|&next| is_bare(next));
        let field = if bare_follows {
            format!("{}: {}", option.key(), quote_value(value))
        } else if value.is_empty() {
            format!("{}:", option.key())
        } else {
            format!("{}: {}", option.key(), render_value(value))
        };
        fields.push(field);
    }
    fields.join(" ")
}

/// Serializable view of one active filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFilter {
    /// The filter key.
    pub key: String,
    /// The filter value, if any.
    pub value: Option<String>,
    /// True for hidden filters.
    pub hidden: bool,
    /// True for keys unknown to the catalog.
    pub dummy: bool,
}

/// Serializable view of a whole filter state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSnapshot {
    /// Public filters first, then hidden filters.
    pub filters: Vec<ActiveFilter>,
    /// Editable search text for the public filters.
    pub raw_value: String,
    /// Query string for a backend.
    pub api_filter_string: String,
}

/// Immutable filter state over items of type `T`.
///
/// The state has three parts:
///
/// - the catalog of every option the caller offers, shared between all
///   states derived from the same root
/// - public filters, which mirror the editable search text
/// - hidden filters, driven by other controls and never shown in the text
///
/// A public filter shadows a hidden filter with the same key.
pub struct FilterValue<T> {
    available: Arc<OptionMap<T>>,
    filter_map: OptionMap<T>,
    hidden_filter_map: OptionMap<T>,
}

impl<T> FilterValue<T> {
    /// Creates an empty filter state over a catalog of options.
    ///
    /// When two options share a key, the later one wins.
    pub fn new(available: impl IntoIterator<Item = FilterOption<T>>) -> Self {
        let available: OptionMap<T> = available
            .into_iter()
            .map(|option| (option.key().to_string(), option))
            .collect();
        Self::from_catalog(Arc::new(available))
    }

    /// Creates an empty filter state reusing an existing catalog.
    pub fn from_catalog(available: Arc<OptionMap<T>>) -> Self {
        Self {
            available,
            filter_map: OptionMap::new(),
            hidden_filter_map: OptionMap::new(),
        }
    }

    /// Replaces the public filters.
    pub fn with_filters(mut self, filters: impl IntoIterator<Item = FilterOption<T>>) -> Self {
        self.filter_map = filters
            .into_iter()
            .map(|option| (option.key().to_string(), option))
            .collect();
        self
    }

    /// Replaces the hidden filters.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnknownHiddenKey`] if any key is missing from
    /// the catalog.
    pub fn with_hidden_filters(
        mut self,
        filters: impl IntoIterator<Item = FilterOption<T>>,
    ) -> FilterResult<Self> {
        let mut hidden = OptionMap::new();
        for option in filters {
            if !self.available.contains_key(option.key()) {
                return Err(FilterError::unknown_hidden_key(option.key()));
            }
            hidden.insert(option.key().to_string(), option);
        }
        self.hidden_filter_map = hidden;
        Ok(self)
    }

    /// Builds a successor state that shares this catalog.
    fn copy_with(&self, filter_map: OptionMap<T>, hidden_filter_map: OptionMap<T>) -> Self {
        Self {
            available: Arc::clone(&self.available),
            filter_map,
            hidden_filter_map,
        }
    }

    /// The catalog option for `key`, or a fresh dummy.
    fn option_or_dummy(&self, key: &str) -> FilterOption<T> {
        self.available
            .get(key)
            .cloned()
            .unwrap_or_else(|| FilterOption::dummy(key))
    }

    /// The catalog option for `key`, required for hidden filters.
    fn hidden_option(&self, key: &str) -> FilterResult<FilterOption<T>> {
        self.available
            .get(key)
            .cloned()
            .ok_or_else(|| FilterError::unknown_hidden_key(key))
    }

    // ==================== Derived Properties ====================

    /// Returns true if no public filter is active.
    pub fn is_empty(&self) -> bool {
        self.filter_map.is_empty()
    }

    /// Returns true if any public filter is active.
    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Returns true if no hidden filter is active.
    pub fn hidden_is_empty(&self) -> bool {
        self.hidden_filter_map.is_empty()
    }

    /// Returns true if any hidden filter is active.
    pub fn hidden_is_not_empty(&self) -> bool {
        !self.hidden_is_empty()
    }

    /// Editable search text for the public filters.
    pub fn raw_value(&self) -> String {
        render_fields(self.filter_map.values())
    }

    /// Query string for a backend.
    ///
    /// Each filter renders as `key: value` with the value verbatim; quoting
    /// and wildcard syntax belong to the backend. Public filters come first,
    /// then hidden filters not shadowed by a public one. Dummies and options
    /// without a real constraint (no value, an empty value or only `*`) are
    /// left out. Embedded wildcards such as `*admin*` are passed through.
    pub fn api_filter_string(&self) -> String {
        let hidden = self
            .hidden_filter_map
            .values()
            .filter(|option| !self.filter_map.contains_key(option.key()));
        self.filter_map
            .values()
            .chain(hidden)
            .filter(|option| !option.is_dummy())
            .filter_map(|option| {
                let value = option.value().filter(|v| !is_unconstrained(v))?;
                Some(format!("{}: {}", option.key(), value))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    // ==================== Public Filters ====================

    /// Activates `key` as a public filter.
    ///
    /// Known keys take the catalog option as it stands. Unknown keys become
    /// dummies. An already active key is replaced by the catalog option.
    pub fn add_key(&self, key: &str) -> Self {
        self.add_option(self.option_or_dummy(key))
    }

    /// Activates a caller-built option as a public filter.
    pub fn add_option(&self, option: FilterOption<T>) -> Self {
        let mut filter_map = self.filter_map.clone();
        filter_map.insert(option.key().to_string(), option);
        self.copy_with(filter_map, self.hidden_filter_map.clone())
    }

    /// Deactivates a public filter. Absent keys leave the state unchanged.
    pub fn remove_key(&self, key: &str) -> Self {
        if !self.has_key(key) {
            return self.clone();
        }
        let mut filter_map = self.filter_map.clone();
        filter_map.shift_remove(key);
        self.copy_with(filter_map, self.hidden_filter_map.clone())
    }

    /// Returns true if `key` is an active public filter.
    pub fn has_key(&self, key: &str) -> bool {
        self.filter_map.contains_key(key)
    }

    /// Removes `key` if it is active, otherwise adds it.
    pub fn toggle_key(&self, key: &str) -> Self {
        if self.has_key(key) {
            self.remove_key(key)
        } else {
            self.add_key(key)
        }
    }

    /// Sets the value of a public filter, activating it first if needed.
    ///
    /// Dummy options stay dummies.
    pub fn set_value_of_key(&self, key: &str, value: Option<&str>) -> Self {
        let option = match self.filter_map.get(key) {
            Some(active) => active.with_value(value),
            None => self.option_or_dummy(key).with_value(value),
        };
        self.add_option(option)
    }

    /// Replaces the public filters with those parsed from `raw`.
    ///
    /// The text is trimmed and lower-cased before parsing. Hidden filters
    /// and the catalog carry over.
    pub fn set_by_string(&self, raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        let parsed = FilterTextParser::parse(&normalized);
        debug!(input = %normalized, keys = parsed.len(), "parsed filter text");

        let mut filter_map = OptionMap::with_capacity(parsed.len());
        for (key, value) in parsed {
            let option = self.option_or_dummy(&key).with_value(value.as_deref());
            filter_map.insert(key, option);
        }
        self.copy_with(filter_map, self.hidden_filter_map.clone())
    }

    /// Keys typed by the user that the catalog does not know.
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.filter_map
            .values()
            .filter(|option| option.is_dummy())
            .map(FilterOption::key)
            .collect()
    }

    // ==================== Hidden Filters ====================

    /// Activates `key` as a hidden filter.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnknownHiddenKey`] if the catalog does not
    /// know `key`.
    pub fn add_hidden_key(&self, key: &str) -> FilterResult<Self> {
        let option = self.hidden_option(key)?;
        let mut hidden_filter_map = self.hidden_filter_map.clone();
        hidden_filter_map.insert(key.to_string(), option);
        Ok(self.copy_with(self.filter_map.clone(), hidden_filter_map))
    }

    /// Deactivates a hidden filter. Absent keys leave the state unchanged.
    pub fn remove_hidden_key(&self, key: &str) -> Self {
        if !self.has_hidden_key(key) {
            return self.clone();
        }
        let mut hidden_filter_map = self.hidden_filter_map.clone();
        hidden_filter_map.shift_remove(key);
        self.copy_with(self.filter_map.clone(), hidden_filter_map)
    }

    /// Returns true if `key` is an active hidden filter.
    pub fn has_hidden_key(&self, key: &str) -> bool {
        self.hidden_filter_map.contains_key(key)
    }

    /// Sets the value of a hidden filter, activating it first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnknownHiddenKey`] if the key is not active
    /// and the catalog does not know it.
    pub fn set_value_of_hidden_key(&self, key: &str, value: Option<&str>) -> FilterResult<Self> {
        let option = match self.hidden_filter_map.get(key) {
            Some(active) => active.with_value(value),
            None => self.hidden_option(key)?.with_value(value),
        };
        let mut hidden_filter_map = self.hidden_filter_map.clone();
        hidden_filter_map.insert(key.to_string(), option);
        Ok(self.copy_with(self.filter_map.clone(), hidden_filter_map))
    }

    // ==================== Lookups ====================

    /// The catalog option for `key`, regardless of active state.
    pub fn get_option_for_key(&self, key: &str) -> Option<&FilterOption<T>> {
        self.available.get(key)
    }

    /// The active option for `key`: public first, then hidden.
    pub fn get_active_option(&self, key: &str) -> Option<&FilterOption<T>> {
        self.filter_map
            .get(key)
            .or_else(|| self.hidden_filter_map.get(key))
    }

    /// The active value for `key`.
    ///
    /// An active public filter shadows a hidden one even when it has no
    /// value. Returns `None` for inactive keys and for filters without a
    /// value.
    pub fn get_value_of_key(&self, key: &str) -> Option<&str> {
        self.get_active_option(key).and_then(FilterOption::value)
    }

    /// Active public filters in order.
    pub fn options(&self) -> impl Iterator<Item = &FilterOption<T>> {
        self.filter_map.values()
    }

    /// Active hidden filters in order.
    pub fn hidden_options(&self) -> impl Iterator<Item = &FilterOption<T>> {
        self.hidden_filter_map.values()
    }

    /// Every catalog option in order.
    pub fn available_options(&self) -> impl Iterator<Item = &FilterOption<T>> {
        self.available.values()
    }

    /// The shared catalog.
    pub fn catalog(&self) -> &Arc<OptionMap<T>> {
        &self.available
    }

    /// Returns true if both states share the same catalog allocation.
    pub fn shares_catalog_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.available, &other.available)
    }

    // ==================== UI Affordances ====================

    /// Icon name for an option.
    ///
    /// Uses the option's icon callback when set, otherwise reflects whether
    /// the key is an active public filter.
    pub fn get_filter_icon_name(&self, option: &FilterOption<T>) -> String {
        match option.icon_name_fn() {
            Some(icon_name) => icon_name(self),
            None if self.has_key(option.key()) => ICON_REMOVE.to_string(),
            None => ICON_ADD.to_string(),
        }
    }

    /// Whether an option shows as selected.
    pub fn is_option_selected(&self, option: &FilterOption<T>) -> bool {
        match option.is_selected_fn() {
            Some(is_selected) => is_selected(self),
            None => self.has_key(option.key()),
        }
    }

    /// The state after toggling an option.
    pub fn toggle_option(&self, option: &FilterOption<T>) -> Self {
        match option.toggle_fn() {
            Some(toggle) => toggle(self),
            None => self.toggle_key(option.key()),
        }
    }

    // ==================== Filtering ====================

    /// Returns true if `item` passes every active public and hidden filter.
    pub fn matches(&self, item: &T) -> bool {
        self.filter_map
            .values()
            .chain(self.hidden_filter_map.values())
            .all(|option| option.matches(item, self))
    }

    /// Filters a slice of items, returning only those that match.
    ///
    /// With no active filters every item is returned and no predicate runs.
    pub fn filter_items<'b>(&self, items: &'b [T]) -> Vec<&'b T> {
        if items.is_empty() {
            return Vec::new();
        }
        if self.is_empty() && self.hidden_is_empty() {
            return items.iter().collect();
        }

        let matched: Vec<&T> = items.iter().filter(|item| self.matches(item)).collect();
        trace!(
            total = items.len(),
            matched = matched.len(),
            "filtered items"
        );
        matched
    }

    /// Returns a state with no public or hidden filters.
    pub fn clear(&self) -> Self {
        self.copy_with(OptionMap::new(), OptionMap::new())
    }

    /// Serializable view of the active filters.
    pub fn snapshot(&self) -> FilterSnapshot {
        let public = self.filter_map.values().map(|option| (option, false));
        let hidden = self.hidden_filter_map.values().map(|option| (option, true));
        let filters = public
            .chain(hidden)
            .map(|(option, hidden)| ActiveFilter {
                key: option.key().to_string(),
                value: option.value().map(str::to_string),
                hidden,
                dummy: option.is_dummy(),
            })
            .collect();

        FilterSnapshot {
            filters,
            raw_value: self.raw_value(),
            api_filter_string: self.api_filter_string(),
        }
    }
}

impl<T> Default for FilterValue<T> {
    fn default() -> Self {
        Self::from_catalog(Arc::new(OptionMap::new()))
    }
}

impl<T> Clone for FilterValue<T> {
    fn clone(&self) -> Self {
        self.copy_with(self.filter_map.clone(), self.hidden_filter_map.clone())
    }
}

impl<T> fmt::Debug for FilterValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterValue")
            .field("available", &self.available.keys().collect::<Vec<_>>())
            .field("filters", &self.filter_map.values().collect::<Vec<_>>())
            .field(
                "hidden_filters",
                &self.hidden_filter_map.values().collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<T> fmt::Display for FilterValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_value())
    }
}
