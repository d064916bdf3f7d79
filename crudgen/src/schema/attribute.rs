//! Attribute definitions and the attribute type system
//!
//! Attribute types are either one of the built-in scalar types or a custom
//! type name that is emitted verbatim into the generated model class.
//!
//! # Built-in Types
//!
//! | Input (case-insensitive)   | Generated type |
//! |----------------------------|----------------|
//! | `int`, `integer`           | `int`          |
//! | `string`                   | `string`       |
//! | `datetime`                 | `DateTime`     |
//! | `bool`, `boolean`          | `bool`         |
//! | `decimal`                  | `decimal`      |
//! | `double`                   | `double`       |
//! | `guid`, `uuid`             | `Guid`         |
//!
//! Anything else (`Address`, `List<string>`, `int?`) is kept as a custom type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A single declared attribute of a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    /// Attribute name (e.g. "Name", "`CreatedAt`")
    pub name: String,
    /// Attribute type
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
}

impl AttributeDefinition {
    /// Create an attribute from a name and a type string
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudgen::schema::{AttributeDefinition, AttributeType};
    /// let attr = AttributeDefinition::new("Price", "decimal");
    /// assert_eq!(attr.attribute_type, AttributeType::Decimal);
    /// assert_eq!(attr.type_name(), "decimal");
    /// ```
    pub fn new(name: impl Into<String>, attribute_type: &str) -> Self {
        Self {
            name: name.into(),
            attribute_type: AttributeType::parse(attribute_type),
        }
    }

    /// Type name as it appears in the generated source
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.attribute_type.type_name()
    }
}

/// Attribute type enumeration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeType {
    /// 32-bit integer
    Int,
    /// String
    String,
    /// Date and time
    DateTime,
    /// Boolean
    Bool,
    /// Decimal number
    Decimal,
    /// 64-bit float
    Double,
    /// Globally unique identifier
    Guid,
    /// Any other type name, emitted verbatim
    Custom(String),
}

impl AttributeType {
    /// Parse a type name, falling back to a verbatim custom type
    ///
    /// Parsing never fails: unknown names are custom types by definition.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudgen::schema::AttributeType;
    /// assert_eq!(AttributeType::parse("DateTime"), AttributeType::DateTime);
    /// assert_eq!(AttributeType::parse("GUID"), AttributeType::Guid);
    /// assert_eq!(
    ///     AttributeType::parse("Address"),
    ///     AttributeType::Custom("Address".to_string())
    /// );
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.to_lowercase().as_str() {
            "int" | "integer" => Self::Int,
            "string" => Self::String,
            "datetime" => Self::DateTime,
            "bool" | "boolean" => Self::Bool,
            "decimal" => Self::Decimal,
            "double" => Self::Double,
            "guid" | "uuid" => Self::Guid,
            _ => Self::Custom(trimmed.to_string()),
        }
    }

    /// Type name as emitted into generated code
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Int => "int",
            Self::String => "string",
            Self::DateTime => "DateTime",
            Self::Bool => "bool",
            Self::Decimal => "decimal",
            Self::Double => "double",
            Self::Guid => "Guid",
            Self::Custom(name) => name,
        }
    }

    /// Whether this is one of the built-in types
    #[must_use]
    pub const fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl FromStr for AttributeType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl Serialize for AttributeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.type_name())
    }
}

impl<'de> Deserialize<'de> for AttributeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_builtin_types() {
        let cases = vec![
            ("int", AttributeType::Int, "int"),
            ("string", AttributeType::String, "string"),
            ("datetime", AttributeType::DateTime, "DateTime"),
            ("bool", AttributeType::Bool, "bool"),
            ("decimal", AttributeType::Decimal, "decimal"),
            ("double", AttributeType::Double, "double"),
            ("guid", AttributeType::Guid, "Guid"),
        ];

        for (input, expected, rendered) in cases {
            let parsed = AttributeType::parse(input);
            assert_eq!(parsed, expected);
            assert_eq!(parsed.type_name(), rendered);
            assert!(parsed.is_builtin());
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(AttributeType::parse("DateTime"), AttributeType::DateTime);
        assert_eq!(AttributeType::parse("Guid"), AttributeType::Guid);
        assert_eq!(AttributeType::parse("BOOL"), AttributeType::Bool);
    }

    #[test]
    fn test_custom_type_kept_verbatim() {
        let parsed = AttributeType::parse("List<string>");
        assert_eq!(parsed, AttributeType::Custom("List<string>".to_string()));
        assert_eq!(parsed.type_name(), "List<string>");
        assert!(!parsed.is_builtin());
    }

    #[test]
    fn test_custom_type_is_trimmed() {
        assert_eq!(AttributeType::parse("  Address "), AttributeType::Custom("Address".to_string()));
    }

    #[test]
    fn test_json_round_trip_uses_type_key() {
        let attr: AttributeDefinition =
            serde_json::from_str(r#"{"name":"CreatedAt","type":"datetime"}"#).unwrap();
        assert_eq!(attr.attribute_type, AttributeType::DateTime);

        let json = serde_json::to_string(&attr).unwrap();
        assert_eq!(json, r#"{"name":"CreatedAt","type":"DateTime"}"#);
    }
}
