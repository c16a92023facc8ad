//! nuprep CLI library
//!
//! This library contains all the CLI logic for nuprep, making it reusable
//! for testing and integration with other tools.

pub mod cmd;
pub mod command;
pub mod common;
pub mod error;
pub mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use command::Command;
use common::RuntimeContext;

/// nuprep - prepare a project for package authoring
#[derive(Parser)]
#[command(name = "nuprep")]
#[command(about = "Overlay packaging resources onto a project")]
#[command(version)]
#[command(long_about = "Overlay packaging resources onto a project

nuprep mirrors a packaging-resources template tree into a project,
marks every mirrored file to be copied to the build output, installs
the package manifest template under the project's name, and points the
Release configuration's documentation output at the assembly.

The operation is idempotent: resources the project already has are
skipped and left exactly as they were.")]
pub struct Cli {
    /// Path to the project directory (defaults to the current directory)
    #[arg(long, env = "NUPREP_PROJECT_DIR", value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "NUPREP_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the nuprep CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Mirror the packaging resources into the project and install the
    /// package manifest
    Prepare(cmd::prepare::PrepareCommand),
}

/// Parse-independent entry point used by `main` and by tests
pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.verbose, cli.log_file.as_deref())?;

    let context = RuntimeContext::resolve(cli.project)?;

    match cli.command {
        Commands::Prepare(cmd) => {
            cmd.execute(&context)?;
        }
    }

    Ok(())
}
