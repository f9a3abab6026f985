//! Config command implementation.
//!
//! View and create configuration settings.
//! Config file is located at ~/.config/fk/config.toml.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{CommandContext, CommandError, Result};
use crate::catalog::{is_valid_key, FilterDef};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Default config file contents.
pub const DEFAULT_CONFIG: &str = r#"# fk - filter expression CLI configuration

# Config schema version (do not modify)
version = 1

# Output preferences
[output]
# color = true              # Enable colors (respects NO_COLOR env)

# Filter catalog. Each entry makes `key:value` usable in search text.
#
#   key   - lower-case letters, digits and `_`
#   label - display name (defaults to the key)
#   hint  - description shown by `fk keys`
#   field - dotted path into each JSON item (defaults to the key)
#   match - "contains" (default), "equals", "prefix" or "boolean"

[[filters]]
key = "serial"
label = "Serial"
hint = "Token serial number"

[[filters]]
key = "type"
label = "Type"
field = "tokentype"
match = "equals"

[[filters]]
key = "user"
label = "User"
field = "user.username"

[[filters]]
key = "active"
label = "Active"
match = "boolean"
"#;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Filter catalog entries.
    #[serde(default)]
    pub filters: Vec<FilterDef>,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            output: OutputConfig::default(),
            filters: Vec::new(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Gets the config file path.
///
/// Uses the `--config` flag (or `FK_CONFIG`) if given, then
/// `$XDG_CONFIG_HOME/fk/config.toml`, then `~/.config/fk/config.toml`.
pub fn get_config_path(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        if !xdg_config.is_empty() {
            return Ok(PathBuf::from(xdg_config).join("fk").join("config.toml"));
        }
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("fk").join("config.toml"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Loads the configuration from disk.
///
/// A missing file yields the default (empty) configuration.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    parse_config(&content)
}

/// Parses, migrates and validates config file contents.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    let config = migrate_config(config)?;
    validate_config(&config)?;
    Ok(config)
}

/// Migrates config to current version if needed.
fn migrate_config(mut config: Config) -> Result<Config> {
    if config.version > CONFIG_VERSION {
        return Err(CommandError::Config(format!(
            "Config version {} is newer than supported version {}",
            config.version, CONFIG_VERSION
        )));
    }

    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Checks catalog keys. Duplicate keys are allowed; the last entry wins.
fn validate_config(config: &Config) -> Result<()> {
    for (index, def) in config.filters.iter().enumerate() {
        if !is_valid_key(&def.key) {
            return Err(CommandError::Config(format!(
                "Invalid filter key '{}': use lower-case letters, digits and '_'",
                def.key
            )));
        }
        if config.filters[index + 1..].iter().any(|d| d.key == def.key) {
            warn!(key = %def.key, "duplicate filter key, the last entry wins");
        }
    }
    Ok(())
}

/// Writes the starter config file.
///
/// # Errors
///
/// Returns an error if the file exists and `force` is false, or if writing fails.
pub fn execute_init(ctx: &CommandContext, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CommandError::Config(format!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    fs::write(path, DEFAULT_CONFIG)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "created": true,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Created {}", path.display());
    }

    Ok(())
}

/// Shows the current configuration.
pub fn execute_show(ctx: &CommandContext, path: &Path) -> Result<()> {
    let config = load_config(path)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        println!("Settings:");
        if let Some(color) = config.output.color {
            println!("  output.color: {}", color);
        }
        println!("  filters: {}", config.filters.len());
        for def in &config.filters {
            println!("    {} -> {} ({})", def.key, def.field(), def.match_mode);
        }
    }

    Ok(())
}

/// Prints the config file path.
pub fn execute_path(ctx: &CommandContext, path: &Path) -> Result<()> {
    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}
