//! # pzod CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pzod_cli::generate::{run_generate, GenerateArgs};

/// Prisma to Zod validator generator.
///
/// Reads a Prisma DMMF document and writes one TypeScript module per model,
/// each exporting a Zod schema for the model's scalar fields and, when
/// enabled, a lazily evaluated schema that includes its relations.
#[derive(Parser, Debug)]
#[command(name = "pzod", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit log lines as JSON objects.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate Zod validator modules from a DMMF document.
    Generate(GenerateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    tracing::debug!(project_root = %project_root.display(), "pzod starting");

    let result = match cli.command {
        Commands::Generate(args) => run_generate(&args, &project_root),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
