//! Request validation command

use std::path::PathBuf;

use anyhow::{bail, Result};
use console::style;
use crudgen::resolver;

use super::read_request;

pub struct ValidateCommand {
    request: PathBuf,
}

impl ValidateCommand {
    pub const fn new(request: PathBuf) -> Self {
        Self { request }
    }

    pub fn execute(&self) -> Result<()> {
        let request = read_request(&self.request)?.request;
        let mut problems: Vec<String> = Vec::new();

        if !request.has_project_name() {
            problems.push("project name is required".to_string());
        }
        problems.extend(request.validate().iter().map(ToString::to_string));
        problems.extend(
            request
                .models
                .iter()
                .filter_map(|model| resolver::resolve_all(model).err())
                .map(|err| err.to_string()),
        );

        if problems.is_empty() {
            println!(
                "{} {} ({} models)",
                style("✓").green().bold(),
                style(self.request.display()).green(),
                request.models.len()
            );
            return Ok(());
        }

        println!(
            "{} {}:",
            style("✗").red().bold(),
            style(self.request.display()).red()
        );
        for problem in &problems {
            println!("  {} {problem}", style("-").red());
        }

        bail!("{} problem(s) found", problems.len())
    }
}
