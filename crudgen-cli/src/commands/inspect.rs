//! Archive inspection command

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use crudgen::archive;

pub struct InspectCommand {
    archive: PathBuf,
}

impl InspectCommand {
    pub const fn new(archive: PathBuf) -> Self {
        Self { archive }
    }

    pub fn execute(&self) -> Result<()> {
        let bytes = fs::read(&self.archive)
            .with_context(|| format!("Failed to read archive: {}", self.archive.display()))?;
        let files = archive::unpack(&bytes)
            .with_context(|| format!("Failed to open archive: {}", self.archive.display()))?;

        println!(
            "{} {} ({} files, {} bytes uncompressed)",
            style("Archive").cyan().bold(),
            style(self.archive.display()).green(),
            files.len(),
            files.total_bytes()
        );

        for (path, content) in files.iter() {
            println!("  {:>8}  {}", content.len(), path);
        }

        Ok(())
    }
}
