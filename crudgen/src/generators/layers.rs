//! Service, repository and controller generators
//!
//! One file of each per model, keyed on `{{ModelName}}`. The repository also
//! receives `{{ModelNamePlural}}` to address the matching `DbSet`.

use super::{paths, project_placeholders, render_file};
use crate::error::Result;
use crate::file_set::GeneratedFile;
use crate::naming;
use crate::template::{Placeholder, TemplateName, TemplateRenderer, TemplateSource};

/// Render `Services/I<Name>Service.cs`
///
/// # Errors
///
/// Fails if the service template cannot be loaded.
pub fn service<S: TemplateSource>(
    renderer: &TemplateRenderer<S>,
    project_name: &str,
    model_name: &str,
) -> Result<GeneratedFile> {
    let placeholders = project_placeholders(project_name).with(Placeholder::ModelName, model_name);
    render_file(
        renderer,
        TemplateName::Service,
        &placeholders,
        paths::service(model_name),
        format!("{} service", naming::service_interface(model_name)),
    )
}

/// Render `Repositories/I<Name>Repository.cs`
///
/// # Errors
///
/// Fails if the repository template cannot be loaded.
pub fn repository<S: TemplateSource>(
    renderer: &TemplateRenderer<S>,
    project_name: &str,
    model_name: &str,
) -> Result<GeneratedFile> {
    let placeholders = project_placeholders(project_name)
        .with(Placeholder::ModelName, model_name)
        .with(Placeholder::ModelNamePlural, naming::pluralize(model_name));
    render_file(
        renderer,
        TemplateName::Repository,
        &placeholders,
        paths::repository(model_name),
        format!("{} repository", naming::repository_interface(model_name)),
    )
}

/// Render `Controllers/<Name>Controller.cs`
///
/// # Errors
///
/// Fails if the controller template cannot be loaded.
pub fn controller<S: TemplateSource>(
    renderer: &TemplateRenderer<S>,
    project_name: &str,
    model_name: &str,
) -> Result<GeneratedFile> {
    let placeholders = project_placeholders(project_name).with(Placeholder::ModelName, model_name);
    render_file(
        renderer,
        TemplateName::Controller,
        &placeholders,
        paths::controller(model_name),
        format!("{model_name} API controller"),
    )
}
