//! Code generation command
//!
//! Reads a JSON request, runs the generator and writes either a zip archive
//! or the file tree.
//!
//! # Example
//!
//! ```bash
//! crudgen generate shop.json --format zip --output Shop.zip
//! crudgen generate shop.json --format text --output ./Shop --templates ./my-templates
//! ```
//!
//! The output format is taken from `--format`, then the request's
//! `responseType`, then `output.default_format` in the configuration.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use console::style;
use crudgen::config::CrudgenConfig;
use crudgen::file_set::GeneratedFileSet;
use crudgen::generator::{CodeGenerator, GenerationOutput};
use crudgen::schema::{CodeGenerationRequest, ResponseType};
use crudgen::telemetry::UsageRecord;

use super::read_request;

/// Output format flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Zip archive
    Zip,
    /// Plain files on disk
    Text,
}

impl From<OutputFormat> for ResponseType {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Zip => Self::Zip,
            OutputFormat::Text => Self::Text,
        }
    }
}

pub struct GenerateCommand {
    pub request: PathBuf,
    pub output: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub templates: Option<PathBuf>,
    pub strict: bool,
}

impl GenerateCommand {
    pub fn execute(&self, config: &CrudgenConfig) -> Result<()> {
        let file = read_request(&self.request)?;
        let response_type = match self.format {
            Some(format) => format.into(),
            None if file.has_response_type => file.request.response_type,
            None => config.output.default_format,
        };
        let request = file.request.with_response_type(response_type);

        println!(
            "\n{} {} {}",
            style("Generating").cyan().bold(),
            style(request.project_name.trim()).green().bold(),
            style(format!("({} models, {response_type})", request.models.len())).dim()
        );

        let mut config = config.clone();
        if let Some(dir) = &self.templates {
            config.templates.dir = Some(dir.clone());
        }
        let strict = self.strict || config.generation.strict;

        let generator = CodeGenerator::new(config.template_source()).with_strict(strict);
        let output = generator
            .respond(&request)
            .context("Failed to generate code")?;

        record_usage(&config, &request);

        match output {
            GenerationOutput::Archive(bytes) => {
                let path = self
                    .output
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(&config.output.archive_name));
                write_archive(&path, &bytes)?;
            }
            GenerationOutput::Files(files) => {
                let root = self
                    .output
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(request.project_name.trim()));
                write_tree(&root, &files)?;
            }
        }

        Ok(())
    }
}

/// Telemetry never fails the command
fn record_usage(config: &CrudgenConfig, request: &CodeGenerationRequest) {
    if let Some(sink) = config.usage_sink() {
        let record = UsageRecord::from_request("cli", request);
        if let Err(err) = sink.record(&record) {
            tracing::warn!(error = %err, "failed to record usage");
        }
    }
}

fn write_archive(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, bytes)
        .with_context(|| format!("Failed to write archive: {}", path.display()))?;

    println!(
        "\n{} {} ({} bytes)",
        style("Wrote").green().bold(),
        style(path.display()).green(),
        bytes.len()
    );
    Ok(())
}

/// Generated paths come from model names, so they must stay under `root`
fn output_path(root: &Path, relative: &str) -> Result<PathBuf> {
    let relative = Path::new(relative);
    let escapes = relative.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        bail!(
            "Refusing to write '{}' outside {}",
            relative.display(),
            root.display()
        );
    }
    Ok(root.join(relative))
}

fn write_tree(root: &Path, files: &GeneratedFileSet) -> Result<()> {
    // Check every path before anything touches the disk
    let targets = files
        .paths()
        .map(|path| output_path(root, path))
        .collect::<Result<Vec<_>>>()?;

    println!(
        "\n{} {} files:",
        style("Generated").green().bold(),
        files.len()
    );

    for (file, full_path) in files.files().zip(targets) {
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&full_path, &file.content)
            .with_context(|| format!("Failed to write file: {}", full_path.display()))?;

        println!(
            "  {} {} ({})",
            style("✓").green(),
            style(&file.path).dim(),
            style(&file.description).dim()
        );
    }

    println!(
        "\n{} Project written to {}",
        style("✨").green().bold(),
        style(root.display()).green().bold()
    );
    Ok(())
}
