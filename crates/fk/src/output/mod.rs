//! Output formatting utilities for the fk CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by command:
//!
//! - [`filters`] - Parsed pairs and applied filter results (parse, apply)
//! - [`keys`] - Catalog key listing (keys)
//! - [`helpers`] - Common formatting utilities (truncation, placeholders)

mod filters;
pub mod helpers;
mod keys;

// Parse and apply
pub use filters::{
    format_apply_json, format_apply_table, format_parsed_json, format_parsed_table,
};

// Keys
pub use keys::{format_keys_json, format_keys_table, KeyRow};
