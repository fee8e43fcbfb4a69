//! # optlint CLI entry point
//!
//! Parses command-line arguments, initialises logging, and dispatches to
//! the check handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use optlint_cli::check::{resolve_config, run_check, CheckArgs};
use optlint_core::DuplicatePolicy;
use optlint_schema::SchemaKind;

/// Linter for plugin option schemas.
///
/// Reports structural, type, range and uniqueness problems in format and
/// algorithm schema files. Diagnostics are written to stderr.
#[derive(Parser, Debug)]
#[command(name = "optlint", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Exit with a failure status when any warning is reported.
    #[arg(long, global = true)]
    deny_warnings: bool,

    /// Duplicate-identifier reporting policy (progressive, consolidated).
    #[arg(long, global = true)]
    duplicates: Option<DuplicatePolicy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check format plugin schemas.
    Format(CheckArgs),

    /// Check algorithm schemas.
    Algorithm(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("optlint v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match resolve_config(cli.config.as_deref(), cli.deny_warnings, cli.duplicates) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };

    let result = match cli.command {
        Commands::Format(args) => run_check(SchemaKind::Format, &args, config),
        Commands::Algorithm(args) => run_check(SchemaKind::Algorithm, &args, config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
