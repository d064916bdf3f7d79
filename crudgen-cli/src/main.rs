//! crudgen CLI tool

#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{GenerateCommand, InspectCommand, OutputFormat, TemplatesCommand, ValidateCommand};
use crudgen::config::CrudgenConfig;
use crudgen::observability::{self, LogFormat, ObservabilityConfig};

#[derive(Parser)]
#[command(name = "crudgen")]
#[command(version)]
#[command(about = "Generate layered CRUD application code from model definitions", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the standard locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log generation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate code from a JSON request
    Generate {
        /// Request file (JSON)
        request: PathBuf,
        /// Archive path (zip) or output directory (text)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format, overriding the request and configuration
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Directory with template overrides
        #[arg(long)]
        templates: Option<PathBuf>,
        /// Reject requests that fail pre-flight validation
        #[arg(long)]
        strict: bool,
    },
    /// Check a JSON request without generating anything
    Validate {
        /// Request file (JSON)
        request: PathBuf,
    },
    /// List the contents of a generated archive
    Inspect {
        /// Archive file
        archive: PathBuf,
    },
    /// Manage templates
    Templates {
        #[command(subcommand)]
        command: TemplatesCommands,
    },
}

#[derive(Subcommand)]
enum TemplatesCommands {
    /// Write the built-in templates to a directory for customization
    Export {
        /// Target directory
        dir: PathBuf,
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "info,crudgen=debug" } else { "warn" };
    observability::init_with(
        &ObservabilityConfig::new(filter)
            .with_format(LogFormat::Compact)
            .with_stderr(),
    )?;

    let config = match &cli.config {
        Some(path) => CrudgenConfig::load_from(path),
        None => CrudgenConfig::load(),
    }
    .context("Failed to load configuration")?;

    match cli.command {
        Commands::Generate {
            request,
            output,
            format,
            templates,
            strict,
        } => {
            let cmd = GenerateCommand {
                request,
                output,
                format,
                templates,
                strict,
            };
            cmd.execute(&config)?;
        }
        Commands::Validate { request } => {
            ValidateCommand::new(request).execute()?;
        }
        Commands::Inspect { archive } => {
            InspectCommand::new(archive).execute()?;
        }
        Commands::Templates { command } => match command {
            TemplatesCommands::Export { dir, force } => {
                TemplatesCommand::Export { dir, force }.execute()?;
            }
        },
    }

    Ok(())
}
