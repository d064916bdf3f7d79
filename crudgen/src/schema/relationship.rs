//! Relationship declarations between models
//!
//! A relationship is declared on one model and only describes that side.
//! Declaring `Order → Customer` as `ManyToOne` does not add anything to
//! `Customer`; the caller declares the mirrored `OneToMany` explicitly if
//! it wants the collection on the other side.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

use crate::naming;

/// A relationship declared on a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Navigation property name (e.g. "Orders" on `Customer`)
    ///
    /// Defaults to the declaring model's name pluralized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,
    /// Name of the model on the other side
    pub target_model: String,
    /// Relationship kind
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
}

impl Relationship {
    /// Create a relationship with an explicit navigation property name
    pub fn new(
        property_name: impl Into<String>,
        target_model: impl Into<String>,
        kind: RelationshipKind,
    ) -> Self {
        Self {
            property_name: Some(property_name.into()),
            target_model: target_model.into(),
            kind,
        }
    }

    /// Create a relationship that uses the default navigation property name
    pub fn with_default_name(target_model: impl Into<String>, kind: RelationshipKind) -> Self {
        Self {
            property_name: None,
            target_model: target_model.into(),
            kind,
        }
    }

    /// Navigation property name, falling back to the pluralized declaring model
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudgen::schema::{Relationship, RelationshipKind};
    /// let rel = Relationship::with_default_name("Product", RelationshipKind::ManyToMany);
    /// assert_eq!(rel.property_name_for("Category"), "Categories");
    ///
    /// let rel = Relationship::new("Items", "Product", RelationshipKind::OneToMany);
    /// assert_eq!(rel.property_name_for("Order"), "Items");
    /// ```
    #[must_use]
    pub fn property_name_for<'a>(&'a self, declaring_model: &str) -> Cow<'a, str> {
        match self.property_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Cow::Borrowed(name),
            _ => Cow::Owned(naming::pluralize(declaring_model)),
        }
    }
}

/// Relationship kind
///
/// Kinds arrive over the wire either by name (`"ManyToOne"`) or by ordinal
/// (`1` = `OneToMany`, `2` = `ManyToOne`, `3` = `ManyToMany`). Anything else is
/// kept as [`RelationshipKind::Unsupported`] and rejected at resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    /// The declaring model owns a collection of the target
    OneToMany,
    /// The declaring model holds a foreign key to the target
    ManyToOne,
    /// Both sides hold collections, joined through a join table
    ManyToMany,
    /// Unrecognized kind as supplied by the caller
    Unsupported(String),
}

impl RelationshipKind {
    /// Parse a kind from its name
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudgen::schema::RelationshipKind;
    /// assert_eq!(RelationshipKind::from_name("ManyToOne"), RelationshipKind::ManyToOne);
    /// assert_eq!(
    ///     RelationshipKind::from_name("OneToOne"),
    ///     RelationshipKind::Unsupported("OneToOne".to_string())
    /// );
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "OneToMany" => Self::OneToMany,
            "ManyToOne" => Self::ManyToOne,
            "ManyToMany" => Self::ManyToMany,
            other => Self::Unsupported(other.to_string()),
        }
    }

    /// Parse a kind from its wire ordinal
    #[must_use]
    pub fn from_ordinal(ordinal: i64) -> Self {
        match ordinal {
            1 => Self::OneToMany,
            2 => Self::ManyToOne,
            3 => Self::ManyToMany,
            other => Self::Unsupported(other.to_string()),
        }
    }

    /// Kind name as used on the wire
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::OneToMany => "OneToMany",
            Self::ManyToOne => "ManyToOne",
            Self::ManyToMany => "ManyToMany",
            Self::Unsupported(raw) => raw,
        }
    }

    /// Whether the kind can be resolved
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RelationshipKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireKind {
    Name(String),
    Ordinal(i64),
}

impl<'de> Deserialize<'de> for RelationshipKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WireKind::deserialize(deserializer)? {
            WireKind::Name(name) => Self::from_name(&name),
            WireKind::Ordinal(ordinal) => Self::from_ordinal(ordinal),
        })
    }
}
