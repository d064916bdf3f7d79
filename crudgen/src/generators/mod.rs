//! File generators
//!
//! Each generator renders exactly one template into one [`GeneratedFile`].
//! Generators are pure with respect to the request: they build a
//! [`PlaceholderMap`], render, and attach the fixed output path. Ordering and
//! the authentication switch belong to [`crate::generator::CodeGenerator`].

pub mod auth;
pub mod bootstrap;
pub mod db_context;
pub mod layers;
pub mod model;
pub mod project;

use crate::error::Result;
use crate::file_set::GeneratedFile;
use crate::template::{Placeholder, PlaceholderMap, TemplateName, TemplateRenderer, TemplateSource};

/// Fixed output paths
pub mod paths {
    /// `Models/<Name>.cs`
    #[must_use]
    pub fn model(name: &str) -> String {
        format!("Models/{name}.cs")
    }

    /// `Services/I<Name>Service.cs`
    #[must_use]
    pub fn service(name: &str) -> String {
        format!("Services/I{name}Service.cs")
    }

    /// `Repositories/I<Name>Repository.cs`
    #[must_use]
    pub fn repository(name: &str) -> String {
        format!("Repositories/I{name}Repository.cs")
    }

    /// `Controllers/<Name>Controller.cs`
    #[must_use]
    pub fn controller(name: &str) -> String {
        format!("Controllers/{name}Controller.cs")
    }

    /// `<ProjectName>.csproj`
    #[must_use]
    pub fn project_file(project_name: &str) -> String {
        format!("{project_name}.csproj")
    }

    /// ORM mapping context
    pub const DB_CONTEXT: &str = "AppDbContext.cs";
    /// Application bootstrap
    pub const PROGRAM: &str = "Program.cs";
    /// Application settings
    pub const APP_SETTINGS: &str = "appsettings.json";

    /// JWT token manager
    pub const JWT_MANAGER: &str = "Authentication/JwtAuthenticationManager.cs";
    /// Login controller
    pub const JWT_CONTROLLER: &str = "Authentication/JwtAuthenticationController.cs";
    /// Token middleware
    pub const JWT_MIDDLEWARE: &str = "Authentication/JwtMiddleware.cs";
    /// Role policy extensions
    pub const AUTHORIZATION: &str = "Authentication/Extensions/AuthorizationExtensions.cs";
    /// User service
    pub const USER_SERVICE: &str = "Services/UserService.cs";
    /// User repository
    pub const USER_REPOSITORY: &str = "Repositories/UserRepository.cs";
    /// User entity
    pub const USER_ENTITY: &str = "Models/User.cs";

    /// Directory prefix shared by the JWT files
    pub const AUTHENTICATION_DIR: &str = "Authentication/";
}

/// Join generated lines the way every generator does
pub(crate) fn join_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| line.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Placeholder map pre-filled with `{{ProjectName}}`
pub(crate) fn project_placeholders(project_name: &str) -> PlaceholderMap {
    PlaceholderMap::new().with(Placeholder::ProjectName, project_name)
}

/// Render a template and wrap it as a generated file
pub(crate) fn render_file<S: TemplateSource>(
    renderer: &TemplateRenderer<S>,
    template: TemplateName,
    placeholders: &PlaceholderMap,
    path: impl Into<String>,
    description: impl Into<String>,
) -> Result<GeneratedFile> {
    let content = renderer.render(template, placeholders)?;
    Ok(GeneratedFile::new(path, content, description))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(paths::model("Order"), "Models/Order.cs");
        assert_eq!(paths::service("Order"), "Services/IOrderService.cs");
        assert_eq!(paths::repository("Order"), "Repositories/IOrderRepository.cs");
        assert_eq!(paths::controller("Order"), "Controllers/OrderController.cs");
        assert_eq!(paths::project_file("Shop"), "Shop.csproj");
    }

    #[test]
    fn test_join_lines() {
        assert_eq!(join_lines(["a", "b"]), "a\nb");
        assert_eq!(join_lines(Vec::<String>::new()), "");
    }
}
