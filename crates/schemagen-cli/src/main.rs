//! schemagen CLI - Entity Framework Core code generator
//!
//! Commands:
//! - `schemagen generate` - Generate entity and context classes for every target
//! - `schemagen check` - Validate a schemagen.toml manifest and dry-run the pass
//! - `schemagen init` - Create a starter manifest and sample schema

use clap::{Parser, Subcommand};
use std::process::ExitCode;

mod discovery;
mod generate;
mod init;
mod logging;
mod manifest;

#[derive(Parser)]
#[command(name = "schemagen")]
#[command(author, version, about = "Entity Framework Core generator for relational schemas", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error, off); RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate code for every target in the manifest
    Generate {
        /// Path to schemagen.toml (default: ./schemagen.toml)
        #[arg(short, long)]
        manifest: Option<String>,

        /// Output directory, overriding the manifest's output_dir
        #[arg(short, long)]
        output: Option<String>,

        /// Print generated units instead of writing files
        #[arg(long)]
        stdout: bool,
    },

    /// Validate a manifest and run the pass without writing
    Check {
        /// Path to schemagen.toml (default: ./schemagen.toml)
        #[arg(short, long)]
        manifest: Option<String>,
    },

    /// Create a starter schemagen.toml and sample schema
    Init {
        /// Project name used for the sample namespace and context class
        #[arg(short, long, default_value = "blog")]
        name: String,

        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Generate {
            manifest,
            output,
            stdout,
        } => generate::run(generate::GenerateOptions {
            manifest,
            output,
            stdout,
            log_level: cli.log_level,
        })?,
        Commands::Check { manifest } => generate::check(manifest, cli.log_level)?,
        Commands::Init { name, path } => {
            logging::init(cli.log_level.as_deref())?;
            init::run(&name, path)?;
            generate::Outcome::default()
        }
    };

    Ok(outcome.exit_code())
}
