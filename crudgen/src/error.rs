//! Error types and error handling
//!
//! Every failure is terminal for the current generation call. The generator
//! never hands back a partially generated file set or archive.

use thiserror::Error;

use crate::schema::ValidationIssue;

/// Result alias used throughout the generation engine
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Generation engine error type
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The request carries an empty or whitespace-only project name
    #[error("project name is required")]
    MissingProjectName,

    /// The template source has no template with this name
    #[error("template not found: {name}")]
    TemplateNotFound {
        /// Template file name (e.g. `ModelTemplate.txt`)
        name: String,
    },

    /// The template exists but could not be read
    #[error("failed to read template '{name}': {source}")]
    TemplateRead {
        /// Template file name
        name: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A relationship declares a kind the resolver does not know
    #[error("unsupported relationship kind '{kind}' on model '{model}'")]
    UnsupportedRelationshipKind {
        /// Model declaring the relationship
        model: String,
        /// Kind as supplied by the caller
        kind: String,
    },

    /// Two generated files map to the same path
    #[error("duplicate generated path: {0}")]
    DuplicatePath(String),

    /// Strict pre-flight validation rejected the request
    #[error("invalid request: {}", format_issues(.0))]
    InvalidRequest(Vec<ValidationIssue>),

    /// Archive could not be written or read
    #[error("packaging error: {0}")]
    PackagingError(String),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

impl GenerationError {
    /// Create a packaging error from any displayable cause
    #[must_use]
    pub fn packaging<T: std::fmt::Display>(cause: T) -> Self {
        Self::PackagingError(cause.to_string())
    }

    /// Create a template-not-found error
    #[must_use]
    pub fn template_not_found<T: Into<String>>(name: T) -> Self {
        Self::TemplateNotFound { name: name.into() }
    }
}

impl From<zip::result::ZipError> for GenerationError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::packaging(err)
    }
}

impl From<figment::Error> for GenerationError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_project_name_message() {
        assert_eq!(
            GenerationError::MissingProjectName.to_string(),
            "project name is required"
        );
    }

    #[test]
    fn test_invalid_request_lists_every_issue() {
        let err = GenerationError::InvalidRequest(vec![
            ValidationIssue::DuplicateModel("Order".to_string()),
            ValidationIssue::DanglingTarget {
                model: "Order".to_string(),
                target: "Customer".to_string(),
            },
        ]);
        let message = err.to_string();
        assert!(message.contains("duplicate model name 'Order'"));
        assert!(message.contains("'Customer'"));
    }

    #[test]
    fn test_packaging_helper() {
        let err = GenerationError::packaging("disk full");
        assert!(matches!(err, GenerationError::PackagingError(ref m) if m == "disk full"));
    }
}
