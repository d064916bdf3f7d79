//! crudgen - model-to-code generator for layered CRUD applications
//!
//! Turns a declarative description of data models into the source files of
//! an ASP.NET Core application: entity classes, service, repository and
//! controller layers, an Entity Framework context, an optional JWT
//! authentication subsystem and the project bootstrap files. The result is
//! returned as a path → content map or packed into a zip archive.
//!
//! # Quick Start
//!
//! ```
//! use crudgen::prelude::*;
//!
//! # fn main() -> crudgen::Result<()> {
//! let request = CodeGenerationRequest::new("Shop")
//!     .model(
//!         ModelDefinition::new("Customer")
//!             .attribute("Name", "string")
//!             .relationship(Relationship::new("Orders", "Order", RelationshipKind::OneToMany)),
//!     )
//!     .model(
//!         ModelDefinition::new("Order")
//!             .attribute("Total", "decimal")
//!             .relationship(Relationship::new("Customer", "Customer", RelationshipKind::ManyToOne)),
//!     )
//!     .with_response_type(ResponseType::Zip);
//!
//! match CodeGenerator::embedded().respond(&request)? {
//!     GenerationOutput::Archive(bytes) => assert!(!bytes.is_empty()),
//!     GenerationOutput::Files(_) => unreachable!(),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`schema`]: request types and pre-flight validation
//! - [`resolver`]: relationship resolution into fields and join tables
//! - [`template`]: template names, sources and placeholder substitution
//! - [`generators`]: one renderer per generated file
//! - [`generator`]: the orchestrator
//! - [`archive`]: zip packaging
//! - [`telemetry`]: usage records and sinks
//! - [`config`]: layered configuration
//! - [`observability`]: logging setup

#![forbid(unsafe_code)]

pub mod archive;
pub mod config;
pub mod error;
pub mod file_set;
pub mod generator;
pub mod generators;
pub mod naming;
pub mod observability;
pub mod resolver;
pub mod schema;
pub mod telemetry;
pub mod template;

pub use error::{GenerationError, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::CrudgenConfig;
    pub use crate::error::{GenerationError, Result};
    pub use crate::file_set::{GeneratedFile, GeneratedFileSet};
    pub use crate::generator::{CodeGenerator, GenerationOutput};
    pub use crate::schema::{
        AttributeDefinition, AttributeType, CodeGenerationRequest, ModelDefinition, Relationship,
        RelationshipKind, ResponseType, ValidationIssue,
    };
    pub use crate::telemetry::{UsageRecord, UsageSink};
    pub use crate::template::{
        DirectoryTemplateSource, EmbeddedTemplateSource, LayeredTemplateSource, TemplateName,
        TemplateSource,
    };
}
