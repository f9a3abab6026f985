//! Keys command implementation.
//!
//! Lists the filter keys offered by the configured catalog.

use super::config::Config;
use super::{CommandContext, Result};
use crate::catalog::{build_catalog, find_def};
use crate::output::{format_keys_json, format_keys_table, KeyRow};

/// Builds one row per catalog key, in catalog order.
pub fn key_rows(config: &Config) -> Vec<KeyRow<'_>> {
    let catalog = build_catalog(&config.filters);
    catalog
        .available_options()
        .filter_map(|option| find_def(&config.filters, option.key()))
        .map(|def| KeyRow {
            key: &def.key,
            label: def.label(),
            field: def.field(),
            match_mode: def.match_mode,
            hint: def.hint.as_deref(),
        })
        .collect()
}

/// Executes the keys command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &CommandContext, config: &Config) -> Result<()> {
    let rows = key_rows(config);

    if ctx.json_output {
        let output = format_keys_json(&rows)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_keys_table(&rows, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}
