//! Project file and application settings generators

use super::{paths, project_placeholders, render_file};
use crate::error::Result;
use crate::file_set::GeneratedFile;
use crate::template::{PlaceholderMap, TemplateName, TemplateRenderer, TemplateSource};

/// Render `<ProjectName>.csproj`
///
/// # Errors
///
/// Fails if the project file template cannot be loaded.
pub fn project_file<S: TemplateSource>(
    renderer: &TemplateRenderer<S>,
    project_name: &str,
) -> Result<GeneratedFile> {
    render_file(
        renderer,
        TemplateName::ProjectFile,
        &project_placeholders(project_name),
        paths::project_file(project_name),
        "Project file",
    )
}

/// Render `appsettings.json`, which takes no placeholders
///
/// # Errors
///
/// Fails if the settings template cannot be loaded.
pub fn app_settings<S: TemplateSource>(renderer: &TemplateRenderer<S>) -> Result<GeneratedFile> {
    render_file(
        renderer,
        TemplateName::AppSettings,
        &PlaceholderMap::new(),
        paths::APP_SETTINGS,
        "Application settings",
    )
}
