//! Command implementations for the fk CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod apply;
pub mod completions;
pub mod config;
pub mod keys;
pub mod parse;

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Filter state error.
    #[error("filter error: {0}")]
    Filter(#[from] filterkit_rs::FilterError),

    /// Invalid command input (items file, hidden filter syntax).
    #[error("invalid input: {0}")]
    Input(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color,
            quiet: cli.quiet,
            verbose: cli.verbose,
        }
    }

    /// Applies the `[output]` settings from the config file.
    ///
    /// `--no-color` and the `NO_COLOR` environment variable always win.
    pub fn with_output_config(mut self, output: &config::OutputConfig) -> Self {
        if output.color == Some(false) || std::env::var_os("NO_COLOR").is_some() {
            self.use_colors = false;
        }
        self
    }
}
