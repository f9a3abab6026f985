//! Filter option descriptors.

use std::fmt;
use std::sync::Arc;

use super::value::FilterValue;

/// Predicate deciding whether an item passes a filter option.
pub type MatchFn<T> = Arc<dyn Fn(&T, &FilterValue<T>) -> bool + Send + Sync>;

/// Callback deciding whether an option shows as selected.
pub type SelectedFn<T> = Arc<dyn Fn(&FilterValue<T>) -> bool + Send + Sync>;

/// Callback choosing the icon shown next to an option.
pub type IconNameFn<T> = Arc<dyn Fn(&FilterValue<T>) -> String + Send + Sync>;

/// Callback producing the filter state after the option is toggled.
pub type ToggleFn<T> = Arc<dyn Fn(&FilterValue<T>) -> FilterValue<T> + Send + Sync>;

/// Whether an option comes from the catalog or from typed text.
enum OptionKind<T> {
    /// A catalog option with a real predicate.
    Known(MatchFn<T>),
    /// A key typed by the user that the catalog does not know.
    Dummy,
}

impl<T> Clone for OptionKind<T> {
    fn clone(&self) -> Self {
        match self {
            OptionKind::Known(matches) => OptionKind::Known(Arc::clone(matches)),
            OptionKind::Dummy => OptionKind::Dummy,
        }
    }
}

/// One filterable attribute of an item type `T`.
///
/// Options are immutable. [`with_value`](Self::with_value) returns a copy
/// with a new value and leaves everything else, including the dummy kind,
/// untouched. Cloning is cheap: callbacks are shared.
///
/// A `None` value means the key is present without a value. `Some("")` is an
/// explicit empty value.
pub struct FilterOption<T> {
    key: String,
    value: Option<String>,
    label: String,
    hint: Option<String>,
    kind: OptionKind<T>,
    is_selected: Option<SelectedFn<T>>,
    icon_name: Option<IconNameFn<T>>,
    toggle: Option<ToggleFn<T>>,
}

impl<T> FilterOption<T> {
    /// Creates a catalog option.
    ///
    /// The predicate should read the current value through the filter state
    /// (for example [`FilterValue::get_value_of_key`]) and treat `None` as
    /// "no constraint".
    pub fn new<F>(key: impl Into<String>, label: impl Into<String>, matches: F) -> Self
    where
        F: Fn(&T, &FilterValue<T>) -> bool + Send + Sync + 'static,
    {
        let key = key.into();
        debug_assert!(!key.is_empty(), "filter option key must not be empty");
        Self {
            key,
            value: None,
            label: label.into(),
            hint: None,
            kind: OptionKind::Known(Arc::new(matches)),
            is_selected: None,
            icon_name: None,
            toggle: None,
        }
    }

    /// Creates a dummy option for a key the catalog does not know.
    ///
    /// The label equals the key and the option matches every item.
    pub fn dummy(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
            value: None,
            hint: None,
            kind: OptionKind::Dummy,
            is_selected: None,
            icon_name: None,
            toggle: None,
        }
    }

    /// Sets the hint text.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Sets the selection callback.
    pub fn with_is_selected<F>(mut self, is_selected: F) -> Self
    where
        F: Fn(&FilterValue<T>) -> bool + Send + Sync + 'static,
    {
        self.is_selected = Some(Arc::new(is_selected));
        self
    }

    /// Sets the icon callback.
    pub fn with_icon_name<F>(mut self, icon_name: F) -> Self
    where
        F: Fn(&FilterValue<T>) -> String + Send + Sync + 'static,
    {
        self.icon_name = Some(Arc::new(icon_name));
        self
    }

    /// Sets the toggle callback.
    pub fn with_toggle<F>(mut self, toggle: F) -> Self
    where
        F: Fn(&FilterValue<T>) -> FilterValue<T> + Send + Sync + 'static,
    {
        self.toggle = Some(Arc::new(toggle));
        self
    }

    /// Returns a copy of this option with `value` replaced.
    pub fn with_value(&self, value: Option<&str>) -> Self {
        Self {
            value: value.map(str::to_owned),
            ..self.clone()
        }
    }

    /// The option key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The current value, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The hint text, if any.
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Returns true for options created from unknown typed keys.
    pub fn is_dummy(&self) -> bool {
        matches!(self.kind, OptionKind::Dummy)
    }

    /// Returns true if `item` passes this option. Dummies pass everything.
    pub fn matches(&self, item: &T, state: &FilterValue<T>) -> bool {
        match &self.kind {
            OptionKind::Known(matches) => matches(item, state),
            OptionKind::Dummy => true,
        }
    }

    pub(crate) fn is_selected_fn(&self) -> Option<&SelectedFn<T>> {
        self.is_selected.as_ref()
    }

    pub(crate) fn icon_name_fn(&self) -> Option<&IconNameFn<T>> {
        self.icon_name.as_ref()
    }

    pub(crate) fn toggle_fn(&self) -> Option<&ToggleFn<T>> {
        self.toggle.as_ref()
    }
}

impl<T> Clone for FilterOption<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            label: self.label.clone(),
            hint: self.hint.clone(),
            kind: self.kind.clone(),
            is_selected: self.is_selected.clone(),
            icon_name: self.icon_name.clone(),
            toggle: self.toggle.clone(),
        }
    }
}

impl<T> fmt::Debug for FilterOption<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterOption")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("label", &self.label)
            .field("hint", &self.hint)
            .field("dummy", &self.is_dummy())
            .finish_non_exhaustive()
    }
}
