//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the fk CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// fk - Parse and apply keyed filter expressions
#[derive(Parser, Debug)]
#[command(name = "fk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file path (default: ~/.config/fk/config.toml)
    #[arg(long, global = true, env = "FK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the key/value pairs parsed from search text
    #[command(alias = "p")]
    Parse {
        /// Search text (e.g., 'name:"strict policy" active:true')
        text: String,
    },

    /// Apply search text to a JSON array of items
    #[command(alias = "a")]
    Apply {
        /// Search text (e.g., "type:totp user:alice")
        text: String,

        /// Hidden filter as key=value (repeatable)
        #[arg(long, action = clap::ArgAction::Append)]
        hidden: Vec<String>,

        /// JSON file with an array of items (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Only print the filter strings, not the matching items
        #[arg(long)]
        summary: bool,
    },

    /// List the filter keys in the catalog
    #[command(alias = "k")]
    Keys,

    /// View or create configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shells supported for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print config file path
    Path,

    /// Write a starter config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
