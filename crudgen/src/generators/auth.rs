//! JWT authentication subsystem generator
//!
//! Seven files, all keyed on `{{ProjectName}}`. The authorization extensions
//! additionally receive one policy registration per role.

use super::{join_lines, paths, project_placeholders, render_file};
use crate::error::Result;
use crate::file_set::GeneratedFile;
use crate::template::{Placeholder, TemplateName, TemplateRenderer, TemplateSource};

/// Templates rendered verbatim apart from the project name, with their paths
const STATIC_FILES: [(TemplateName, &str, &str); 6] = [
    (
        TemplateName::JwtAuthenticationManager,
        paths::JWT_MANAGER,
        "JWT token issuing and validation",
    ),
    (
        TemplateName::JwtAuthenticationController,
        paths::JWT_CONTROLLER,
        "Login and registration endpoints",
    ),
    (
        TemplateName::JwtMiddleware,
        paths::JWT_MIDDLEWARE,
        "Bearer token middleware",
    ),
    (TemplateName::UserService, paths::USER_SERVICE, "User service"),
    (TemplateName::UserRepository, paths::USER_REPOSITORY, "User repository"),
    (TemplateName::UserEntity, paths::USER_ENTITY, "User entity"),
];

/// One authorization policy registration per role
///
/// # Examples
///
/// ```
/// # use crudgen::generators::auth::role_checks;
/// assert_eq!(
///     role_checks(&["Admin".to_string()]),
///     r#"        services.AddAuthorization(options => options.AddPolicy("Admin", policy => policy.RequireRole("Admin")));"#
/// );
/// ```
#[must_use]
pub fn role_checks(roles: &[String]) -> String {
    join_lines(roles.iter().map(|role| {
        format!(
            "        services.AddAuthorization(options => options.AddPolicy(\"{role}\", policy => policy.RequireRole(\"{role}\")));"
        )
    }))
}

/// Render `Authentication/Extensions/AuthorizationExtensions.cs`
///
/// # Errors
///
/// Fails if the authorization template cannot be loaded.
pub fn authorization<S: TemplateSource>(
    renderer: &TemplateRenderer<S>,
    project_name: &str,
    roles: &[String],
) -> Result<GeneratedFile> {
    let placeholders =
        project_placeholders(project_name).with(Placeholder::RoleChecks, role_checks(roles));
    render_file(
        renderer,
        TemplateName::Authorization,
        &placeholders,
        paths::AUTHORIZATION,
        format!("Role policies ({})", roles.join(", ")),
    )
}

/// Render all seven authentication files in output order
///
/// `roles` must already have the default role applied.
///
/// # Errors
///
/// Fails on the first template that cannot be loaded.
pub fn generate<S: TemplateSource>(
    renderer: &TemplateRenderer<S>,
    project_name: &str,
    roles: &[String],
) -> Result<Vec<GeneratedFile>> {
    let placeholders = project_placeholders(project_name);
    let render = |(template, path, description): &(TemplateName, &str, &str)| {
        render_file(renderer, *template, &placeholders, *path, *description)
    };

    // The authorization extensions sit between the middleware and the user files
    let (jwt, user) = STATIC_FILES.split_at(3);
    let mut files = jwt.iter().map(&render).collect::<Result<Vec<_>>>()?;
    files.push(authorization(renderer, project_name, roles)?);
    for entry in user {
        files.push(render(entry)?);
    }

    Ok(files)
}
