//! Template management commands

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use crudgen::template::EmbeddedTemplateSource;

pub enum TemplatesCommand {
    /// Write the built-in templates to a directory
    Export { dir: PathBuf, force: bool },
}

impl TemplatesCommand {
    pub fn execute(&self) -> Result<()> {
        match self {
            Self::Export { dir, force } => export(dir, *force),
        }
    }
}

fn export(dir: &Path, force: bool) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let mut written = 0;
    for (name, text) in EmbeddedTemplateSource::templates() {
        let path = dir.join(name.file_name());
        if path.exists() && !force {
            println!(
                "  {} {} (exists, use --force to overwrite)",
                style("-").yellow(),
                style(name.file_name()).dim()
            );
            continue;
        }

        fs::write(&path, text)
            .with_context(|| format!("Failed to write template: {}", path.display()))?;
        written += 1;
        println!("  {} {}", style("✓").green(), style(name.file_name()).dim());
    }

    println!(
        "\n{} {written} templates to {}",
        style("Exported").green().bold(),
        style(dir.display()).green()
    );
    println!(
        "Use them with {}",
        style(format!("crudgen generate <request.json> --templates {}", dir.display())).yellow()
    );
    Ok(())
}
