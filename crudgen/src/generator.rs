//! Generation orchestrator
//!
//! Coordinates the file generators for one request, in a fixed order:
//! 1. Per model: entity, service, repository, controller
//! 2. Database context
//! 3. Authentication subsystem (when requested)
//! 4. `Program.cs`, project file, application settings
//!
//! Any failure aborts the whole call. Callers never see a partial file set.

use tracing::{debug, info, info_span};

use crate::archive;
use crate::error::{GenerationError, Result};
use crate::file_set::{GeneratedFile, GeneratedFileSet};
use crate::generators::{auth, bootstrap, db_context, layers, model, project};
use crate::resolver::{self, ResolvedRelationship};
use crate::schema::{CodeGenerationRequest, ResponseType};
use crate::template::{EmbeddedTemplateSource, TemplateRenderer, TemplateSource};

/// Result of a generation call, shaped by the requested response type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutput {
    /// Zip archive bytes
    Archive(Vec<u8>),
    /// Raw file set
    Files(GeneratedFileSet),
}

impl GenerationOutput {
    /// Whether this is an archive
    #[must_use]
    pub const fn is_archive(&self) -> bool {
        matches!(self, Self::Archive(_))
    }
}

/// Model-to-code generator
///
/// The template source is fixed at construction. A generator holds no
/// per-request state, so one instance can serve concurrent callers.
///
/// # Example
///
/// ```
/// use crudgen::generator::CodeGenerator;
/// use crudgen::schema::{CodeGenerationRequest, ModelDefinition};
///
/// # fn main() -> crudgen::Result<()> {
/// let request = CodeGenerationRequest::new("Shop")
///     .model(ModelDefinition::new("Order").attribute("Total", "decimal"));
///
/// let files = CodeGenerator::embedded().generate(&request)?;
/// assert!(files.contains("Models/Order.cs"));
/// assert!(files.contains("Shop.csproj"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CodeGenerator<S> {
    renderer: TemplateRenderer<S>,
    strict: bool,
}

impl CodeGenerator<EmbeddedTemplateSource> {
    /// Generator over the built-in templates
    #[must_use]
    pub const fn embedded() -> Self {
        Self::new(EmbeddedTemplateSource::new())
    }
}

impl<S: TemplateSource> CodeGenerator<S> {
    /// Create a generator over a template source
    pub const fn new(source: S) -> Self {
        Self {
            renderer: TemplateRenderer::new(source),
            strict: false,
        }
    }

    /// Enable or disable pre-flight validation
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Whether pre-flight validation is enabled
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// Template renderer in use
    pub const fn renderer(&self) -> &TemplateRenderer<S> {
        &self.renderer
    }

    /// Generate every file for a request
    ///
    /// # Errors
    ///
    /// - [`GenerationError::MissingProjectName`] for an empty or blank
    ///   project name, before any template is loaded
    /// - [`GenerationError::InvalidRequest`] in strict mode when validation
    ///   finds problems
    /// - [`GenerationError::UnsupportedRelationshipKind`] for an unknown
    ///   relationship kind
    /// - [`GenerationError::TemplateNotFound`] or
    ///   [`GenerationError::TemplateRead`] when a template is unavailable
    /// - [`GenerationError::DuplicatePath`] when two files collide, such as
    ///   a model named `User` alongside authentication
    pub fn generate(&self, request: &CodeGenerationRequest) -> Result<GeneratedFileSet> {
        if !request.has_project_name() {
            return Err(GenerationError::MissingProjectName);
        }

        // Surrounding whitespace never reaches paths or namespaces
        let project_name = request.project_name.trim();
        let span = info_span!(
            "generate",
            project = project_name,
            models = request.models.len(),
            auth = request.include_jwt_authentication,
        );
        let _guard = span.enter();

        if self.strict {
            let issues = request.validate();
            if !issues.is_empty() {
                return Err(GenerationError::InvalidRequest(issues));
            }
        }

        let resolved = request
            .models
            .iter()
            .map(resolver::resolve_all)
            .collect::<Result<Vec<_>>>()?;

        let mut files = GeneratedFileSet::new();

        for (definition, relationships) in request.models.iter().zip(&resolved) {
            let name = definition.name.as_str();
            push(&mut files, model::generate(&self.renderer, project_name, definition, relationships)?)?;
            push(&mut files, layers::service(&self.renderer, project_name, name)?)?;
            push(&mut files, layers::repository(&self.renderer, project_name, name)?)?;
            push(&mut files, layers::controller(&self.renderer, project_name, name)?)?;
        }

        let model_names = request.model_names();
        let all_relationships: Vec<ResolvedRelationship> = resolved.into_iter().flatten().collect();
        push(
            &mut files,
            db_context::generate(
                &self.renderer,
                project_name,
                model_names.iter().copied(),
                &all_relationships,
                request.include_jwt_authentication,
            )?,
        )?;

        if request.include_jwt_authentication {
            let roles = request.effective_roles();
            for file in auth::generate(&self.renderer, project_name, &roles)? {
                push(&mut files, file)?;
            }
        }

        push(
            &mut files,
            bootstrap::generate(
                &self.renderer,
                project_name,
                &model_names,
                request.include_jwt_authentication,
            )?,
        )?;
        push(&mut files, project::project_file(&self.renderer, project_name)?)?;
        push(&mut files, project::app_settings(&self.renderer)?)?;

        info!(
            files = files.len(),
            bytes = files.total_bytes(),
            "generation complete"
        );
        Ok(files)
    }

    /// Generate and shape the output for the requested response type
    ///
    /// # Errors
    ///
    /// Everything [`Self::generate`] returns, plus
    /// [`GenerationError::PackagingError`] if the archive cannot be written.
    pub fn respond(&self, request: &CodeGenerationRequest) -> Result<GenerationOutput> {
        let files = self.generate(request)?;
        match request.response_type {
            ResponseType::Zip => archive::pack(&files).map(GenerationOutput::Archive),
            ResponseType::Text => Ok(GenerationOutput::Files(files)),
        }
    }
}

fn push(files: &mut GeneratedFileSet, file: GeneratedFile) -> Result<()> {
    debug!(path = %file.path, bytes = file.content.len(), "generated file");
    files.insert(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ModelDefinition, Relationship, RelationshipKind};
    use crate::template::{InMemoryTemplateSource, TemplateName};

    fn stub_source() -> InMemoryTemplateSource {
        TemplateName::ALL
            .into_iter()
            .fold(InMemoryTemplateSource::new(), |source, name| {
                source.with(name, name.file_name())
            })
    }

    #[test]
    fn test_blank_project_name_fails_first() {
        // No templates at all: the project name check must come first
        let generator = CodeGenerator::new(InMemoryTemplateSource::new());
        let err = generator.generate(&CodeGenerationRequest::new("  ")).unwrap_err();
        assert!(matches!(err, GenerationError::MissingProjectName));
    }

    #[test]
    fn test_project_name_is_trimmed() {
        let request = CodeGenerationRequest::new("  Shop ").model(ModelDefinition::new("Order"));
        let source = stub_source().with(TemplateName::Service, "namespace {{ProjectName}}.Services;");
        let files = CodeGenerator::new(source).generate(&request).unwrap();

        assert!(files.contains("Shop.csproj"));
        assert_eq!(
            files.get("Services/IOrderService.cs"),
            Some("namespace Shop.Services;")
        );
    }

    #[test]
    fn test_file_order_without_authentication() {
        let request = CodeGenerationRequest::new("Shop")
            .model(ModelDefinition::new("Order"))
            .model(ModelDefinition::new("Customer"));
        let files = CodeGenerator::new(stub_source()).generate(&request).unwrap();

        assert_eq!(
            files.paths().collect::<Vec<_>>(),
            vec![
                "Models/Order.cs",
                "Services/IOrderService.cs",
                "Repositories/IOrderRepository.cs",
                "Controllers/OrderController.cs",
                "Models/Customer.cs",
                "Services/ICustomerService.cs",
                "Repositories/ICustomerRepository.cs",
                "Controllers/CustomerController.cs",
                "AppDbContext.cs",
                "Program.cs",
                "Shop.csproj",
                "appsettings.json",
            ]
        );
    }

    #[test]
    fn test_authentication_files_follow_db_context() {
        let request = CodeGenerationRequest::new("Shop")
            .model(ModelDefinition::new("Order"))
            .with_authentication(["Admin"]);
        let files = CodeGenerator::new(stub_source()).generate(&request).unwrap();
        let paths: Vec<_> = files.paths().collect();

        let db = paths.iter().position(|p| *p == "AppDbContext.cs").unwrap();
        assert_eq!(paths[db + 1], "Authentication/JwtAuthenticationManager.cs");
        assert_eq!(paths[db + 7], "Models/User.cs");
        assert_eq!(paths[db + 8], "Program.cs");
        assert_eq!(files.len(), 4 + 1 + 7 + 3);
    }

    #[test]
    fn test_user_model_collides_with_authentication() {
        let request = CodeGenerationRequest::new("Shop")
            .model(ModelDefinition::new("User"))
            .with_authentication(["Admin"]);
        let err = CodeGenerator::new(stub_source()).generate(&request).unwrap_err();
        assert!(matches!(err, GenerationError::DuplicatePath(ref p) if p == "Models/User.cs"));
    }

    #[test]
    fn test_unsupported_kind_aborts_before_rendering() {
        let request = CodeGenerationRequest::new("Shop").model(
            ModelDefinition::new("Order")
                .relationship(Relationship::new("X", "X", RelationshipKind::from_name("OneToOne"))),
        );
        let err = CodeGenerator::new(InMemoryTemplateSource::new())
            .generate(&request)
            .unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedRelationshipKind { .. }));
    }

    #[test]
    fn test_strict_mode_rejects_dangling_targets() {
        let request = CodeGenerationRequest::new("Shop").model(
            ModelDefinition::new("Order")
                .relationship(Relationship::new("Customer", "Customer", RelationshipKind::ManyToOne)),
        );

        assert!(CodeGenerator::new(stub_source()).generate(&request).is_ok());

        let err = CodeGenerator::new(stub_source())
            .with_strict(true)
            .generate(&request)
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidRequest(ref issues) if issues.len() == 1));
    }

    #[test]
    fn test_respond_shapes_output() {
        let generator = CodeGenerator::new(stub_source());
        let request = CodeGenerationRequest::new("Shop").model(ModelDefinition::new("Order"));

        let text = generator.respond(&request).unwrap();
        assert!(matches!(text, GenerationOutput::Files(ref files) if files.len() == 7));

        let zip = generator
            .respond(&request.with_response_type(ResponseType::Zip))
            .unwrap();
        assert!(zip.is_archive());
    }
}
