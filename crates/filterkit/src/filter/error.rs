//! Error types for the filter model.

use thiserror::Error;

/// A specialized Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while building a filter.
///
/// Search text never produces an error. Unknown keys typed by a user become
/// dummy options instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A hidden filter was requested for a key missing from the catalog.
    ///
    /// Hidden filters are driven by code, not by typed text, so they must
    /// always be registered in the catalog up front.
    #[error("hidden filter key not in catalog: {key}")]
    UnknownHiddenKey {
        /// The key that was requested.
        key: String,
    },
}

impl FilterError {
    /// Creates an unknown hidden key error.
    pub fn unknown_hidden_key(key: impl Into<String>) -> Self {
        FilterError::UnknownHiddenKey { key: key.into() }
    }
}
