//! Template sources
//!
//! A template source maps a [`TemplateName`] to raw template text. Sources
//! are injected into the renderer once and never change afterwards.
//!
//! Lookup order when templates can be customized mirrors the usual
//! override chain: a user directory first, the embedded defaults last.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::TemplateName;
use crate::error::{GenerationError, Result};

/// Provides raw template text by name
pub trait TemplateSource: Send + Sync {
    /// Load the raw text of a template
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::TemplateNotFound`] if this source has no
    /// such template, or [`GenerationError::TemplateRead`] if it exists but
    /// cannot be read.
    fn load(&self, name: TemplateName) -> Result<Cow<'_, str>>;

    /// Whether this source can provide a template
    fn contains(&self, name: TemplateName) -> bool;
}

impl<T: TemplateSource + ?Sized> TemplateSource for Box<T> {
    fn load(&self, name: TemplateName) -> Result<Cow<'_, str>> {
        (**self).load(name)
    }

    fn contains(&self, name: TemplateName) -> bool {
        (**self).contains(name)
    }
}

impl<T: TemplateSource + ?Sized> TemplateSource for std::sync::Arc<T> {
    fn load(&self, name: TemplateName) -> Result<Cow<'_, str>> {
        (**self).load(name)
    }

    fn contains(&self, name: TemplateName) -> bool {
        (**self).contains(name)
    }
}

/// Reads `<dir>/<Name>Template.txt` files from disk on every load
#[derive(Debug, Clone)]
pub struct DirectoryTemplateSource {
    root: PathBuf,
}

impl DirectoryTemplateSource {
    /// Create a source rooted at a directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Template directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: TemplateName) -> PathBuf {
        self.root.join(name.file_name())
    }
}

impl TemplateSource for DirectoryTemplateSource {
    fn load(&self, name: TemplateName) -> Result<Cow<'_, str>> {
        let path = self.path_for(name);
        tracing::trace!(path = %path.display(), "reading template");

        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Cow::Owned(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(GenerationError::template_not_found(name.file_name()))
            }
            Err(source) => Err(GenerationError::TemplateRead {
                name: name.file_name().to_string(),
                source,
            }),
        }
    }

    fn contains(&self, name: TemplateName) -> bool {
        self.path_for(name).is_file()
    }
}

/// Templates held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateSource {
    templates: HashMap<TemplateName, String>,
}

impl InMemoryTemplateSource {
    /// Create an empty source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a template
    #[must_use]
    pub fn with(mut self, name: TemplateName, text: impl Into<String>) -> Self {
        self.templates.insert(name, text.into());
        self
    }

    /// Remove a template
    #[must_use]
    pub fn without(mut self, name: TemplateName) -> Self {
        self.templates.remove(&name);
        self
    }
}

impl TemplateSource for InMemoryTemplateSource {
    fn load(&self, name: TemplateName) -> Result<Cow<'_, str>> {
        self.templates
            .get(&name)
            .map(|text| Cow::Borrowed(text.as_str()))
            .ok_or_else(|| GenerationError::template_not_found(name.file_name()))
    }

    fn contains(&self, name: TemplateName) -> bool {
        self.templates.contains_key(&name)
    }
}

/// Tries each layer in order and uses the first one that has the template
#[derive(Default)]
pub struct LayeredTemplateSource {
    layers: Vec<Box<dyn TemplateSource>>,
}

impl LayeredTemplateSource {
    /// Create a source with no layers
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lower-priority layer
    #[must_use]
    pub fn layer(mut self, source: impl TemplateSource + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }

    /// Number of layers
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether there are no layers
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl fmt::Debug for LayeredTemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredTemplateSource")
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl TemplateSource for LayeredTemplateSource {
    fn load(&self, name: TemplateName) -> Result<Cow<'_, str>> {
        self.layers
            .iter()
            .find(|layer| layer.contains(name))
            .map_or_else(
                || Err(GenerationError::template_not_found(name.file_name())),
                |layer| layer.load(name),
            )
    }

    fn contains(&self, name: TemplateName) -> bool {
        self.layers.iter().any(|layer| layer.contains(name))
    }
}
