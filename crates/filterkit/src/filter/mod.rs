//! Filter search text parser and keyed filter model.
//!
//! # Search Syntax
//!
//! The search text is a sequence of `key: value` pairs and standalone words:
//!
//! - `scope:admin` - key `scope` with value `admin`
//! - `name:"Strict Policy"` - double-quoted value, `\"` and `\\` are escapes
//! - `name:'Strict Policy'` - single-quoted value, `\'` and `\\` are escapes
//! - `name:scope:admin` - a colon inside an unquoted value is kept
//! - `name: priority:10` - `name` gets an empty value
//! - `standalone` - a bare word, kept as a key without a value
//!
//! An unquoted value runs until the next `key:` that follows whitespace.
//! Keys are made of ASCII letters, digits and `_`.
//!
//! # Model
//!
//! - [`FilterOption`] describes one filterable attribute of an item type.
//! - [`FilterValue`] holds the catalog of options and the active public
//!   and hidden filters. Every operation returns a new value.
//! - [`FilterTextParser`] turns text into ordered `(key, value)` pairs.

mod error;
mod option;
mod parser;
mod scanner;
mod value;

pub use error::{FilterError, FilterResult};
pub use option::{FilterOption, IconNameFn, MatchFn, SelectedFn, ToggleFn};
pub use parser::{FilterTextParser, ParsedFilter};
pub use value::{ActiveFilter, FilterSnapshot, FilterValue, OptionMap};
