// Rust guideline compliant 2026-10-18

//! Pearly CLI Application
//!
//! Command-line front end for checking records against value object schemas.

use anyhow::{bail, Result};
use clap::Parser;
use pearly_cli::commands::{self, check::CheckOutcome};
use pearly_cli::create_formatter;
use pearly_core::config::CONFIG_FILE;
use pearly_core::{Config, TypeRegistry};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;

/// Exit code for a record that failed validation.
const EXIT_INVALID: u8 = 1;

/// Exit code for usage, IO and contract errors.
const EXIT_ERROR: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "pearly",
    version,
    about = "Pearly: typed value objects with validation",
    long_about = "Pearly builds value objects from schema files, validates records against them and shows how fields read in model, view and escaped view mode.",
    after_help = "Examples:\n  pearly check article.toml article.json\n  pearly check article.toml article.json --mode escaped --escape html\n  pearly diff article.toml before.json after.json\n  pearly types date money\n"
)]
struct Cli {
    /// Enable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Custom config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Validate a record against a schema
    Check {
        /// Schema file (TOML)
        schema: PathBuf,

        /// Record file (JSON object)
        record: PathBuf,

        /// Mode used to print the fields
        #[arg(long, default_value = "escaped", value_parser = ["model", "view", "escaped"])]
        mode: String,

        /// Escape function for escaped reads
        #[arg(long, default_value = "html", value_parser = ["none", "html", "xml"])]
        escape: String,
    },

    /// Show the fields that change between two records
    Diff {
        /// Schema file (TOML)
        schema: PathBuf,

        /// Baseline record file (JSON object)
        before: PathBuf,

        /// Updated record file (JSON object)
        after: PathBuf,
    },

    /// Show how type names resolve to converters
    Types {
        /// Type names (defaults to the built-in types)
        names: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let formatter = create_formatter(cli.json);

    let _guard = match init_tracing(&cli.log_level, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("{}", formatter.format_error(&format!("{err:#}")));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match run(cli, formatter.as_ref()) {
        Ok(CheckOutcome::Valid) => ExitCode::SUCCESS,
        Ok(CheckOutcome::Invalid) => ExitCode::from(EXIT_INVALID),
        Err(err) => {
            eprintln!("{}", formatter.format_error(&format!("{err:#}")));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: Cli, formatter: &dyn pearly_cli::OutputFormatter) -> Result<CheckOutcome> {
    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let config = Config::load(&config_path)?;
    debug!(config = %config_path.display(), package = %config.package, "loaded configuration");
    let registry = Arc::new(TypeRegistry::from_config(&config));

    match cli.command {
        Commands::Check {
            schema,
            record,
            mode,
            escape,
        } => commands::check::execute(&schema, &record, &mode, &escape, registry, formatter),
        Commands::Diff {
            schema,
            before,
            after,
        } => {
            commands::diff::execute(&schema, &before, &after, registry, formatter)?;
            Ok(CheckOutcome::Valid)
        }
        Commands::Types { names } => {
            commands::types::execute(names, &registry, formatter)?;
            Ok(CheckOutcome::Valid)
        }
    }
}

fn init_tracing(level: &str, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = parse_log_level(level)?;

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        let subscriber = fmt()
            .with_max_level(level)
            .with_target(false)
            .json()
            .with_writer(writer)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
        return Ok(Some(guard));
    }

    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(None)
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        other => bail!("Invalid log level '{}'", other),
    }
}
