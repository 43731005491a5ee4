//! Weft CLI Binary
//!
//! Compiles serialized template trees through a declared engine.
//!
//! # Usage
//!
//! ```bash
//! # Compile a tree with the default engine
//! wf compile page.json
//!
//! # Compile with a declared engine and write the program to a file
//! wf compile page.wfir --engine page.toml --output page.rs
//!
//! # Render directly with the reference renderer
//! wf render page.json --bind name=World
//!
//! # Convert between the JSON and binary forms
//! wf encode page.json --output page.wfir
//! wf decode page.wfir
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info};
use wf_cli::{
    commands::{
        self, compile::CompileArgs, convert::DecodeArgs, convert::EncodeArgs, render::RenderArgs,
    },
    diagnostics::{render_cli_error, setup_error_reporting},
    CliError, Result,
};

#[derive(Parser)]
#[command(
    name = "wf",
    version = env!("CARGO_PKG_VERSION"),
    about = "Weft: a compiler pipeline for template trees",
    long_about = r#"
Weft threads a tagged IR tree through an engine of filters and a generator,
producing program text that renders the template.

EXAMPLES:
    wf compile page.json                     # Compile with the default engine
    wf compile page.json --engine page.toml  # Compile with a declared engine
    wf render page.json --bind name=World    # Render with the reference renderer
    wf stages                                # List filters and generators
    "#
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (use multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Set log level (overrides --verbose/--quiet)
    #[arg(long, global = true, value_enum)]
    log: Option<LogLevel>,

    /// Set log output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    log_format: LogFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    directory: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a tree to a program through the declared engine
    Compile(CompileArgs),

    /// Run the declared filters and render the tree directly
    Render(RenderArgs),

    /// Convert a JSON tree to the binary form
    Encode(EncodeArgs),

    /// Convert a binary tree to JSON
    Decode(DecodeArgs),

    /// List the filters and generators an engine file can declare
    Stages,
}

fn main() {
    let cli = Cli::parse();

    // Set up error reporting
    setup_error_reporting();

    // Configure logging
    setup_logging(cli.verbose, cli.quiet, cli.log, cli.log_format);

    let verbose = cli.verbose;
    match run(cli) {
        Ok(()) => {
            if verbose > 0 {
                info!("Command completed successfully");
            }
        }
        Err(e) => {
            if verbose > 0 {
                error!(?e, "detailed error context");
            }
            render_cli_error(e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // Change working directory if specified
    if let Some(dir) = &cli.directory {
        std::env::set_current_dir(dir).map_err(|e| CliError::io(dir, e))?;
    }

    match cli.command {
        Commands::Compile(args) => commands::compile_command(args),
        Commands::Render(args) => commands::render_command(args),
        Commands::Encode(args) => commands::encode_command(args),
        Commands::Decode(args) => commands::decode_command(args),
        Commands::Stages => commands::stages_command(),
    }
}

fn setup_logging(verbose: u8, quiet: bool, log_level: Option<LogLevel>, log_format: LogFormat) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if let Some(level) = log_level {
        EnvFilter::new(match level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        })
    } else if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // stdout carries command output
    let formatter = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_level(true);

    match log_format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(formatter)
                .with(filter)
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(formatter.json())
                .with(filter)
                .init();
        }
    }
}
