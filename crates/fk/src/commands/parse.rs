//! Parse command implementation.
//!
//! Shows the key/value pairs the parser reads from search text, without
//! folding case or consulting the catalog.

use filterkit_rs::filter::FilterTextParser;

use super::{CommandContext, Result};
use crate::output::{format_parsed_json, format_parsed_table};

/// Executes the parse command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &CommandContext, text: &str) -> Result<()> {
    let parsed = FilterTextParser::parse(text);

    if ctx.json_output {
        let output = format_parsed_json(&parsed)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_parsed_table(&parsed, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}
