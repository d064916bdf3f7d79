//! Configuration management
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `CRUDGEN_` prefix, `__` for nesting)
//! 2. `./crudgen.toml` (project-local)
//! 3. `~/.config/crudgen/config.toml` (user config, XDG)
//! 4. `/etc/crudgen/config.toml` (system config)
//! 5. Hardcoded defaults (fallback)
//!
//! Example: `CRUDGEN_GENERATION__STRICT=true`
//!
//! ```toml
//! [templates]
//! dir = "./my-templates"
//!
//! [generation]
//! strict = true
//!
//! [output]
//! archive_name = "Api.zip"
//! default_format = "text"
//!
//! [telemetry]
//! enabled = true
//! log_path = "./usage.jsonl"
//! ```

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::archive::DEFAULT_ARCHIVE_NAME;
use crate::error::{GenerationError, Result};
use crate::schema::ResponseType;
use crate::telemetry::{JsonLinesUsageSink, TracingUsageSink, UsageSink};
use crate::template::{DirectoryTemplateSource, EmbeddedTemplateSource, LayeredTemplateSource};

/// Template lookup settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Directory whose templates override the built-in ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Generation behavior
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Run pre-flight validation and reject requests with issues
    pub strict: bool,
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// File name used when writing an archive without an explicit path
    pub archive_name: String,
    /// Format used when the caller does not choose one
    pub default_format: ResponseType,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            default_format: ResponseType::Zip,
        }
    }
}

/// Usage telemetry settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySettings {
    /// Record usage at all
    pub enabled: bool,
    /// JSON-lines file to append records to; logged via `tracing` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
}

/// Complete crudgen configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrudgenConfig {
    /// Template lookup
    pub templates: TemplateSettings,
    /// Generation behavior
    pub generation: GenerationSettings,
    /// Output
    pub output: OutputSettings,
    /// Usage telemetry
    pub telemetry: TelemetrySettings,
}

impl CrudgenConfig {
    /// Environment variable prefix
    pub const ENV_PREFIX: &'static str = "CRUDGEN_";

    /// Load configuration from the standard locations
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Config`] if a configuration file cannot be
    /// parsed or a value has the wrong type.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use crudgen::config::CrudgenConfig;
    ///
    /// # fn main() -> crudgen::Result<()> {
    /// let config = CrudgenConfig::load()?;
    /// println!("strict: {}", config.generation.strict);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self> {
        let mut figment = Self::defaults()?;

        for path in [
            PathBuf::from("/etc/crudgen/config.toml"),
            Self::recommended_path(),
            PathBuf::from("./crudgen.toml"),
        ] {
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
            }
        }

        Ok(Self::with_env(figment).extract()?)
    }

    /// Load configuration from a specific file plus the environment
    ///
    /// A missing file is not an error; defaults and the environment apply.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Config`] if the file cannot be parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let figment = Self::defaults()?.merge(Toml::file(path.as_ref()));
        Ok(Self::with_env(figment).extract()?)
    }

    /// User configuration path (`~/.config/crudgen/config.toml`)
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from("./crudgen.toml"),
            |config_dir| config_dir.join("crudgen").join("config.toml"),
        )
    }

    fn defaults() -> Result<Figment> {
        let defaults =
            toml::to_string(&Self::default()).map_err(|err| GenerationError::Config(err.to_string()))?;
        Ok(Figment::new().merge(Toml::string(&defaults)))
    }

    fn with_env(figment: Figment) -> Figment {
        figment.merge(Env::prefixed(Self::ENV_PREFIX).split("__").lowercase(true))
    }

    /// Template source honoring `templates.dir`
    ///
    /// The override directory, when set, is consulted first and the
    /// built-in templates fill in anything it lacks.
    #[must_use]
    pub fn template_source(&self) -> LayeredTemplateSource {
        let source = LayeredTemplateSource::new();
        let source = match &self.templates.dir {
            Some(dir) => source.layer(DirectoryTemplateSource::new(dir)),
            None => source,
        };
        source.layer(EmbeddedTemplateSource::new())
    }

    /// Usage sink honoring the telemetry settings, if telemetry is enabled
    #[must_use]
    pub fn usage_sink(&self) -> Option<Box<dyn UsageSink>> {
        if !self.telemetry.enabled {
            return None;
        }

        let sink: Box<dyn UsageSink> = match &self.telemetry.log_path {
            Some(path) => Box::new(JsonLinesUsageSink::new(path)),
            None => Box::new(TracingUsageSink),
        };
        Some(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{TemplateName, TemplateSource};
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = CrudgenConfig::default();
        assert!(config.templates.dir.is_none());
        assert!(!config.generation.strict);
        assert_eq!(config.output.archive_name, "GeneratedCode.zip");
        assert_eq!(config.output.default_format, ResponseType::Zip);
        assert!(!config.telemetry.enabled);
        assert!(config.usage_sink().is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crudgen.toml");
        std::fs::write(
            &path,
            r#"
[generation]
strict = true

[output]
default_format = "text"

[telemetry]
enabled = true
"#,
        )
        .unwrap();

        let config = CrudgenConfig::load_from(&path).unwrap();
        assert!(config.generation.strict);
        assert_eq!(config.output.default_format, ResponseType::Text);
        assert_eq!(config.output.archive_name, "GeneratedCode.zip");
        assert!(config.usage_sink().is_some());
    }

    #[test]
    fn test_load_from_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = CrudgenConfig::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.output, OutputSettings::default());
    }

    #[test]
    fn test_load_from_rejects_wrong_types() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crudgen.toml");
        std::fs::write(&path, "[generation]\nstrict = \"very\"\n").unwrap();

        let err = CrudgenConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, GenerationError::Config(_)));
    }

    #[test]
    fn test_template_source_layers_override_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("ModelTemplate.txt"), "custom").unwrap();

        let config = CrudgenConfig {
            templates: TemplateSettings {
                dir: Some(dir.path().to_path_buf()),
            },
            ..CrudgenConfig::default()
        };
        let source = config.template_source();

        assert_eq!(source.len(), 2);
        assert_eq!(source.load(TemplateName::Model).unwrap(), "custom");
        assert!(source.load(TemplateName::Service).unwrap().contains("{{ModelName}}"));
    }
}
