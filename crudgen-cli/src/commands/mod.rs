//! CLI commands

mod generate;
mod inspect;
mod templates;
mod validate;

pub use generate::{GenerateCommand, OutputFormat};
pub use inspect::InspectCommand;
pub use templates::TemplatesCommand;
pub use validate::ValidateCommand;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use crudgen::schema::CodeGenerationRequest;

/// A parsed request file
pub struct RequestFile {
    pub request: CodeGenerationRequest,
    /// Whether the file set `responseType` itself
    pub has_response_type: bool,
}

/// Read and parse a JSON request file
pub fn read_request(path: &Path) -> Result<RequestFile> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file: {}", path.display()))?;

    let value: serde_json::Value = serde_json::from_str(&json)
        .with_context(|| format!("Request file is not valid JSON: {}", path.display()))?;
    let has_response_type = value.get("responseType").is_some();

    let request: CodeGenerationRequest = serde_json::from_value(value)
        .with_context(|| format!("Request file has an unexpected shape: {}", path.display()))?;

    Ok(RequestFile {
        request,
        has_response_type,
    })
}
