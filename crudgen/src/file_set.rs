//! Generated file set
//!
//! Insertion-ordered map from forward-slash relative path to file content.
//! Order is the order the orchestrator produced the files in and is kept all
//! the way into the archive.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{GenerationError, Result};

/// A single generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative path (e.g. `Models/Order.cs`)
    pub path: String,
    /// File content
    pub content: String,
    /// Short description for reports
    pub description: String,
}

impl GeneratedFile {
    /// Create a generated file
    pub fn new(
        path: impl Into<String>,
        content: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    content: String,
    description: String,
}

/// Ordered, duplicate-free collection of generated files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFileSet {
    files: IndexMap<String, Entry>,
}

impl GeneratedFileSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::DuplicatePath`] if the path is already
    /// present. The set is left unchanged in that case.
    pub fn insert(&mut self, file: GeneratedFile) -> Result<()> {
        if self.files.contains_key(&file.path) {
            return Err(GenerationError::DuplicatePath(file.path));
        }

        self.files.insert(
            file.path,
            Entry {
                content: file.content,
                description: file.description,
            },
        );
        Ok(())
    }

    /// Content of a file
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(|entry| entry.content.as_str())
    }

    /// Description of a file
    #[must_use]
    pub fn description(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(|entry| entry.description.as_str())
    }

    /// Whether a path is present
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// `(path, content)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files
            .iter()
            .map(|(path, entry)| (path.as_str(), entry.content.as_str()))
    }

    /// Files in insertion order, with descriptions
    pub fn files(&self) -> impl Iterator<Item = GeneratedFile> + '_ {
        self.files.iter().map(|(path, entry)| GeneratedFile {
            path: path.clone(),
            content: entry.content.clone(),
            description: entry.description.clone(),
        })
    }

    /// Paths in insertion order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Number of files
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total content size in bytes
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.files.values().map(|entry| entry.content.len()).sum()
    }

    /// Consume the set into an ordered `path → content` map
    #[must_use]
    pub fn into_map(self) -> IndexMap<String, String> {
        self.files
            .into_iter()
            .map(|(path, entry)| (path, entry.content))
            .collect()
    }
}

/// Serializes as a plain `{ path: content }` object
impl Serialize for GeneratedFileSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.files.len()))?;
        for (path, content) in self.iter() {
            map.serialize_entry(path, content)?;
        }
        map.end()
    }
}
