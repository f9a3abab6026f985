//! Keyed filter expressions for search boxes and list views.
//!
//! This crate turns free search text such as `name:"strict policy" active:true`
//! into a structured filter model. The model filters in-memory collections
//! and serializes back into an editable string and an API query string.
//!
//! # Example
//!
//! ```
//! use filterkit_rs::filter::{FilterOption, FilterValue};
//!
//! struct Policy {
//!     name: String,
//!     active: bool,
//! }
//!
//! let filter = FilterValue::new([
//!     FilterOption::new("name", "Name", |p: &Policy, f: &FilterValue<Policy>| {
//!         f.get_value_of_key("name")
//!             .map_or(true, |v| p.name.to_lowercase().contains(v))
//!     }),
//!     FilterOption::new("active", "Active", |p: &Policy, f: &FilterValue<Policy>| {
//!         f.get_value_of_key("active")
//!             .map_or(true, |v| p.active.to_string() == v)
//!     }),
//! ]);
//!
//! let filter = filter.set_by_string("Name:strict active:true");
//! assert_eq!(filter.raw_value(), "name: strict active: true");
//!
//! let policies = vec![
//!     Policy { name: "Strict".to_string(), active: true },
//!     Policy { name: "Strict".to_string(), active: false },
//! ];
//! assert_eq!(filter.filter_items(&policies).len(), 1);
//! ```

pub mod filter;

pub use filter::{FilterError, FilterOption, FilterResult, FilterValue};
