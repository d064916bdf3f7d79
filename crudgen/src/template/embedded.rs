//! Default templates compiled into the binary

use std::borrow::Cow;

use super::{TemplateName, TemplateSource};
use crate::error::Result;

/// Built-in template set
///
/// Always contains every [`TemplateName`], so it is the natural last layer
/// of a [`super::LayeredTemplateSource`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplateSource;

impl EmbeddedTemplateSource {
    /// Create the embedded source
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Raw text of a built-in template
    #[must_use]
    pub const fn text(name: TemplateName) -> &'static str {
        match name {
            TemplateName::Model => include_str!("../../templates/ModelTemplate.txt"),
            TemplateName::Service => include_str!("../../templates/ServiceTemplate.txt"),
            TemplateName::Repository => include_str!("../../templates/RepositoryTemplate.txt"),
            TemplateName::Controller => include_str!("../../templates/ControllerTemplate.txt"),
            TemplateName::DbContext => include_str!("../../templates/DbContextTemplate.txt"),
            TemplateName::Program => include_str!("../../templates/ProgramTemplate.txt"),
            TemplateName::ProjectFile => include_str!("../../templates/ProjectFileTemplate.txt"),
            TemplateName::AppSettings => include_str!("../../templates/AppSettingsTemplate.txt"),
            TemplateName::JwtAuthenticationManager => {
                include_str!("../../templates/JwtAuthenticationManagerTemplate.txt")
            }
            TemplateName::JwtAuthenticationController => {
                include_str!("../../templates/JwtAuthenticationControllerTemplate.txt")
            }
            TemplateName::JwtMiddleware => include_str!("../../templates/JwtMiddlewareTemplate.txt"),
            TemplateName::Authorization => include_str!("../../templates/AuthorizationTemplate.txt"),
            TemplateName::UserService => include_str!("../../templates/UserServiceTemplate.txt"),
            TemplateName::UserRepository => include_str!("../../templates/UserRepositoryTemplate.txt"),
            TemplateName::UserEntity => include_str!("../../templates/UserEntityTemplate.txt"),
        }
    }

    /// Every built-in template with its file name, for exporting
    pub fn templates() -> impl Iterator<Item = (TemplateName, &'static str)> {
        TemplateName::ALL.into_iter().map(|name| (name, Self::text(name)))
    }
}

impl TemplateSource for EmbeddedTemplateSource {
    fn load(&self, name: TemplateName) -> Result<Cow<'_, str>> {
        Ok(Cow::Borrowed(Self::text(name)))
    }

    fn contains(&self, _name: TemplateName) -> bool {
        true
    }
}
