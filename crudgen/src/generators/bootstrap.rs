//! `Program.cs` generator
//!
//! Registers every model's service and repository. When authentication is
//! enabled it also wires bearer-token validation, the user service and the
//! token middleware; otherwise those placeholders are emptied.

use super::{join_lines, paths, project_placeholders, render_file};
use crate::error::Result;
use crate::file_set::GeneratedFile;
use crate::naming;
use crate::template::{Placeholder, TemplateName, TemplateRenderer, TemplateSource};

const AUTHENTICATION_SETUP: &str = r#"builder.Services.AddScoped<JwtAuthenticationManager>();
builder.Services.AddScoped<IUserService, UserService>();
builder.Services.AddScoped<IUserRepository, UserRepository>();

builder.Services.AddAuthentication(JwtBearerDefaults.AuthenticationScheme)
    .AddJwtBearer(options =>
    {
        options.TokenValidationParameters = new TokenValidationParameters
        {
            ValidateIssuer = true,
            ValidateAudience = true,
            ValidateLifetime = true,
            ValidateIssuerSigningKey = true,
            ValidIssuer = builder.Configuration["Jwt:Issuer"],
            ValidAudience = builder.Configuration["Jwt:Audience"],
            IssuerSigningKey = new SymmetricSecurityKey(
                Encoding.UTF8.GetBytes(builder.Configuration["Jwt:Key"]!))
        };
    });

builder.Services.AddRolePolicies();"#;

const AUTHENTICATION_MIDDLEWARE: &str = "app.UseAuthentication();\napp.UseMiddleware<JwtMiddleware>();";

/// `AddScoped` line per model service
#[must_use]
pub fn service_registrations<'a>(model_names: impl IntoIterator<Item = &'a str>) -> String {
    join_lines(model_names.into_iter().map(|name| {
        format!(
            "builder.Services.AddScoped<{}, {name}Service>();",
            naming::service_interface(name)
        )
    }))
}

/// `AddScoped` line per model repository
#[must_use]
pub fn repository_registrations<'a>(model_names: impl IntoIterator<Item = &'a str>) -> String {
    join_lines(model_names.into_iter().map(|name| {
        format!(
            "builder.Services.AddScoped<{}, {name}Repository>();",
            naming::repository_interface(name)
        )
    }))
}

/// Namespaces the authentication setup needs, empty when authentication is off
#[must_use]
pub fn authentication_usings(project_name: &str, include_authentication: bool) -> String {
    if !include_authentication {
        return String::new();
    }
    join_lines([
        "using System.Text;".to_string(),
        "using Microsoft.AspNetCore.Authentication.JwtBearer;".to_string(),
        "using Microsoft.IdentityModel.Tokens;".to_string(),
        format!("using {project_name}.Authentication;"),
        format!("using {project_name}.Authentication.Extensions;"),
    ])
}

/// Authentication service setup, empty when authentication is off
#[must_use]
pub const fn authentication_setup(include_authentication: bool) -> &'static str {
    if include_authentication {
        AUTHENTICATION_SETUP
    } else {
        ""
    }
}

/// Authentication middleware registration, empty when authentication is off
#[must_use]
pub const fn authentication_middleware(include_authentication: bool) -> &'static str {
    if include_authentication {
        AUTHENTICATION_MIDDLEWARE
    } else {
        ""
    }
}

/// Render `Program.cs`
///
/// # Errors
///
/// Fails if the program template cannot be loaded.
pub fn generate<S: TemplateSource>(
    renderer: &TemplateRenderer<S>,
    project_name: &str,
    model_names: &[&str],
    include_authentication: bool,
) -> Result<GeneratedFile> {
    let placeholders = project_placeholders(project_name)
        .with(
            Placeholder::AuthenticationUsings,
            authentication_usings(project_name, include_authentication),
        )
        .with(
            Placeholder::ServiceRegistrations,
            service_registrations(model_names.iter().copied()),
        )
        .with(
            Placeholder::RepositoryRegistrations,
            repository_registrations(model_names.iter().copied()),
        )
        .with(
            Placeholder::AuthenticationSetup,
            authentication_setup(include_authentication),
        )
        .with(
            Placeholder::AuthenticationMiddleware,
            authentication_middleware(include_authentication),
        );

    render_file(
        renderer,
        TemplateName::Program,
        &placeholders,
        paths::PROGRAM,
        "Application bootstrap and service registration",
    )
}
