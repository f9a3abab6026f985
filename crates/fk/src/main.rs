use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod commands;
mod output;

use cli::{Cli, Commands, ConfigCommands};
use commands::apply::ApplyOptions;
use commands::config::{get_config_path, load_config};
use commands::{CommandContext, CommandError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{error_json:#}");
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `FK_LOG` takes an `EnvFilter` directive and overrides `--verbose`/`--quiet`.
fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("FK_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);
    let config_path = get_config_path(cli.config.as_deref())?;

    match &cli.command {
        Some(Commands::Parse { text }) => commands::parse::execute(&ctx, text),
        Some(Commands::Apply {
            text,
            hidden,
            input,
            summary,
        }) => {
            let config = load_config(&config_path)?;
            let ctx = ctx.with_output_config(&config.output);
            let opts = ApplyOptions {
                text: text.clone(),
                hidden: hidden.clone(),
                input: input.clone(),
                summary: *summary,
            };
            commands::apply::execute(&ctx, &opts, &config)
        }
        Some(Commands::Keys) => {
            let config = load_config(&config_path)?;
            let ctx = ctx.with_output_config(&config.output);
            commands::keys::execute(&ctx, &config)
        }
        Some(Commands::Config { command }) => match command {
            Some(ConfigCommands::Show) | None => commands::config::execute_show(&ctx, &config_path),
            Some(ConfigCommands::Path) => commands::config::execute_path(&ctx, &config_path),
            Some(ConfigCommands::Init { force }) => {
                commands::config::execute_init(&ctx, &config_path, *force)
            }
        },
        Some(Commands::Completions { shell }) => {
            commands::completions::execute(shell).map_err(CommandError::Io)
        }
        None => {
            if !ctx.quiet {
                println!("fk - filter expression CLI");
                println!("Use --help for usage information");
            }
            Ok(())
        }
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Input(_) => "INPUT_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Config(_) => ExitCode::from(5),
        CommandError::Filter(_) => ExitCode::from(1),
        CommandError::Input(_) => ExitCode::from(2),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::Json(_) => ExitCode::from(1),
    }
}
