//! Template rendering
//!
//! Templates are opaque text with `{{Token}}` placeholders. Rendering is a
//! single, non-recursive pass: every supplied token is replaced by its value,
//! substituted text is never scanned again, and tokens that were not supplied
//! are left in place. Conditional sections are handled by the caller
//! supplying an empty string.
//!
//! Template names and placeholder tokens are closed enums. Each template
//! declares the placeholders it understands, so a generator filling a token
//! its template does not recognize is visible in the logs instead of silently
//! producing nothing.
//!
//! # Example
//!
//! ```
//! use crudgen::template::{InMemoryTemplateSource, Placeholder, PlaceholderMap, TemplateName, TemplateRenderer};
//!
//! # fn main() -> crudgen::Result<()> {
//! let source = InMemoryTemplateSource::new()
//!     .with(TemplateName::Service, "public interface I{{ModelName}}Service {}");
//! let renderer = TemplateRenderer::new(source);
//!
//! let placeholders = PlaceholderMap::new().with(Placeholder::ModelName, "Order");
//! let text = renderer.render(TemplateName::Service, &placeholders)?;
//! assert_eq!(text, "public interface IOrderService {}");
//! # Ok(())
//! # }
//! ```

mod embedded;
mod source;

pub use embedded::EmbeddedTemplateSource;
pub use source::{DirectoryTemplateSource, InMemoryTemplateSource, LayeredTemplateSource, TemplateSource};

use std::collections::BTreeMap;
use std::fmt;

use crate::error::Result;

/// Every template the generator knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateName {
    /// Entity class
    Model,
    /// Service interface
    Service,
    /// Repository interface
    Repository,
    /// API controller
    Controller,
    /// ORM mapping context
    DbContext,
    /// Application bootstrap
    Program,
    /// Project file
    ProjectFile,
    /// Application settings
    AppSettings,
    /// JWT token issuing and validation
    JwtAuthenticationManager,
    /// Login endpoint
    JwtAuthenticationController,
    /// Token extraction middleware
    JwtMiddleware,
    /// Role policy registration
    Authorization,
    /// User service
    UserService,
    /// User repository
    UserRepository,
    /// User entity
    UserEntity,
}

impl TemplateName {
    /// All template names, in generation order
    pub const ALL: [Self; 15] = [
        Self::Model,
        Self::Service,
        Self::Repository,
        Self::Controller,
        Self::DbContext,
        Self::Program,
        Self::ProjectFile,
        Self::AppSettings,
        Self::JwtAuthenticationManager,
        Self::JwtAuthenticationController,
        Self::JwtMiddleware,
        Self::Authorization,
        Self::UserService,
        Self::UserRepository,
        Self::UserEntity,
    ];

    /// Template file name (e.g. `ModelTemplate.txt`)
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Model => "ModelTemplate.txt",
            Self::Service => "ServiceTemplate.txt",
            Self::Repository => "RepositoryTemplate.txt",
            Self::Controller => "ControllerTemplate.txt",
            Self::DbContext => "DbContextTemplate.txt",
            Self::Program => "ProgramTemplate.txt",
            Self::ProjectFile => "ProjectFileTemplate.txt",
            Self::AppSettings => "AppSettingsTemplate.txt",
            Self::JwtAuthenticationManager => "JwtAuthenticationManagerTemplate.txt",
            Self::JwtAuthenticationController => "JwtAuthenticationControllerTemplate.txt",
            Self::JwtMiddleware => "JwtMiddlewareTemplate.txt",
            Self::Authorization => "AuthorizationTemplate.txt",
            Self::UserService => "UserServiceTemplate.txt",
            Self::UserRepository => "UserRepositoryTemplate.txt",
            Self::UserEntity => "UserEntityTemplate.txt",
        }
    }

    /// Placeholders this template recognizes
    #[must_use]
    pub const fn placeholders(self) -> &'static [Placeholder] {
        use Placeholder as P;
        match self {
            Self::Model => &[P::ModelName, P::ProjectName, P::Attributes, P::Relationships],
            Self::Service | Self::Controller => &[P::ModelName, P::ProjectName],
            Self::Repository => &[P::ModelName, P::ModelNamePlural, P::ProjectName],
            Self::DbContext => &[P::ProjectName, P::DbSets, P::RelationshipConfigurations],
            Self::Program => &[
                P::ProjectName,
                P::AuthenticationUsings,
                P::ServiceRegistrations,
                P::RepositoryRegistrations,
                P::AuthenticationSetup,
                P::AuthenticationMiddleware,
            ],
            Self::Authorization => &[P::ProjectName, P::RoleChecks],
            Self::AppSettings => &[],
            Self::ProjectFile
            | Self::JwtAuthenticationManager
            | Self::JwtAuthenticationController
            | Self::JwtMiddleware
            | Self::UserService
            | Self::UserRepository
            | Self::UserEntity => &[P::ProjectName],
        }
    }

    /// Look a template up by its file name
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.file_name() == file_name)
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Recognized placeholder tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    /// `{{ModelName}}`
    ModelName,
    /// `{{ModelNamePlural}}`
    ModelNamePlural,
    /// `{{ProjectName}}`
    ProjectName,
    /// `{{Attributes}}`
    Attributes,
    /// `{{Relationships}}`
    Relationships,
    /// `{{DbSets}}`
    DbSets,
    /// `{{RelationshipConfigurations}}`
    RelationshipConfigurations,
    /// `{{RoleChecks}}`
    RoleChecks,
    /// `{{ServiceRegistrations}}`
    ServiceRegistrations,
    /// `{{RepositoryRegistrations}}`
    RepositoryRegistrations,
    /// `{{AuthenticationUsings}}`
    AuthenticationUsings,
    /// `{{AuthenticationSetup}}`
    AuthenticationSetup,
    /// `{{AuthenticationMiddleware}}`
    AuthenticationMiddleware,
}

impl Placeholder {
    /// Token name without braces
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ModelName => "ModelName",
            Self::ModelNamePlural => "ModelNamePlural",
            Self::ProjectName => "ProjectName",
            Self::Attributes => "Attributes",
            Self::Relationships => "Relationships",
            Self::DbSets => "DbSets",
            Self::RelationshipConfigurations => "RelationshipConfigurations",
            Self::RoleChecks => "RoleChecks",
            Self::ServiceRegistrations => "ServiceRegistrations",
            Self::RepositoryRegistrations => "RepositoryRegistrations",
            Self::AuthenticationUsings => "AuthenticationUsings",
            Self::AuthenticationSetup => "AuthenticationSetup",
            Self::AuthenticationMiddleware => "AuthenticationMiddleware",
        }
    }

    /// Token as it appears in templates (`{{ModelName}}`)
    #[must_use]
    pub fn token(self) -> String {
        format!("{{{{{}}}}}", self.name())
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Values to substitute into one template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap {
    values: BTreeMap<Placeholder, String>,
}

impl PlaceholderMap {
    /// Create an empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, replacing any previous value for the placeholder
    #[must_use]
    pub fn with(mut self, placeholder: Placeholder, value: impl Into<String>) -> Self {
        self.insert(placeholder, value);
        self
    }

    /// Add a value in place
    pub fn insert(&mut self, placeholder: Placeholder, value: impl Into<String>) {
        self.values.insert(placeholder, value.into());
    }

    /// Value for a placeholder
    #[must_use]
    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        self.values.get(&placeholder).map(String::as_str)
    }

    /// Match a supplied `{{Token}}` at the start of `text`
    ///
    /// Returns the token length and the value to substitute.
    fn match_at(&self, text: &str) -> Option<(usize, &str)> {
        let inner = text.strip_prefix("{{")?;
        self.values.iter().find_map(|(placeholder, value)| {
            let name = placeholder.name();
            inner
                .strip_prefix(name)
                .filter(|after| after.starts_with("}}"))
                .map(|_| (name.len() + 4, value.as_str()))
        })
    }

    /// Supplied placeholders
    pub fn keys(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.values.keys().copied()
    }

    /// Number of supplied placeholders
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no placeholders were supplied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Substitute placeholders into template text in a single pass
///
/// Unknown and unsupplied tokens are copied verbatim. Values are inserted as
/// is and never rescanned, so a value containing `{{Token}}` survives intact.
///
/// # Examples
///
/// ```
/// # use crudgen::template::{substitute, Placeholder, PlaceholderMap};
/// let values = PlaceholderMap::new().with(Placeholder::ModelName, "{{ProjectName}}");
/// let text = substitute("{{ModelName}} / {{ProjectName}}", &values);
/// assert_eq!(text, "{{ProjectName}} / {{ProjectName}}");
/// ```
#[must_use]
pub fn substitute(template: &str, placeholders: &PlaceholderMap) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let candidate = &rest[start..];

        if let Some((token_len, value)) = placeholders.match_at(candidate) {
            output.push_str(value);
            rest = &candidate[token_len..];
        } else {
            // Advance one brace so `{{{ModelName}}}` still matches at offset 1.
            output.push('{');
            rest = &candidate[1..];
        }
    }

    output.push_str(rest);
    output
}

/// Renders named templates from an injected template source
///
/// The source is fixed at construction and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct TemplateRenderer<S> {
    source: S,
}

impl<S: TemplateSource> TemplateRenderer<S> {
    /// Create a renderer over a template source
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Underlying template source
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Load a template and substitute the given placeholders
    ///
    /// # Errors
    ///
    /// Returns [`crate::GenerationError::TemplateNotFound`] if the source has
    /// no such template, or [`crate::GenerationError::TemplateRead`] if it
    /// could not be read.
    pub fn render(&self, name: TemplateName, placeholders: &PlaceholderMap) -> Result<String> {
        let recognized = name.placeholders();
        for placeholder in placeholders.keys() {
            if !recognized.contains(&placeholder) {
                tracing::warn!(
                    template = %name,
                    placeholder = %placeholder,
                    "placeholder is not recognized by template"
                );
            }
        }

        let text = self.source.load(name)?;
        Ok(substitute(&text, placeholders))
    }
}
