//! Generation request schema
//!
//! In-memory representation of one generation request: the project name, the
//! model definitions with their attributes and relationships, the requested
//! response format and the authentication options.
//!
//! The request is built once per generation call and is not mutated by the
//! generator. JSON field names are camelCase:
//!
//! ```json
//! {
//!   "projectName": "Shop",
//!   "models": [
//!     {
//!       "name": "Order",
//!       "attributes": [{ "name": "Total", "type": "decimal" }],
//!       "relationships": [
//!         { "propertyName": "Customer", "targetModel": "Customer", "type": "ManyToOne" }
//!       ]
//!     }
//!   ],
//!   "responseType": "zip",
//!   "roles": ["Admin"],
//!   "includeJwtAuthentication": true
//! }
//! ```

pub mod attribute;
pub mod relationship;

pub use attribute::{AttributeDefinition, AttributeType};
pub use relationship::{Relationship, RelationshipKind};

use inflector::Inflector;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Role substituted when authentication is enabled without any roles
pub const DEFAULT_ROLE: &str = "User";

/// One model to generate code for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDefinition {
    /// Model name (e.g. "Order", "`OrderItem`")
    pub name: String,
    /// Declared attributes, in declaration order
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
    /// Declared relationships, in declaration order
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl ModelDefinition {
    /// Create a model without attributes or relationships
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            relationships: Vec::new(),
        }
    }

    /// Add an attribute
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, attribute_type: &str) -> Self {
        self.attributes.push(AttributeDefinition::new(name, attribute_type));
        self
    }

    /// Add a relationship
    #[must_use]
    pub fn relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }
}

/// Requested output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResponseType {
    /// Zip archive bytes
    Zip,
    /// Raw `{path → content}` map
    #[default]
    Text,
}

impl ResponseType {
    /// Wire name of the response type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Text => "text",
        }
    }
}

impl From<String> for ResponseType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<&str> for ResponseType {
    /// Anything other than "zip" means text
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("zip") {
            Self::Zip
        } else {
            Self::Text
        }
    }
}

impl From<ResponseType> for String {
    fn from(value: ResponseType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeGenerationRequest {
    /// Project name, used for namespaces and the project file name
    #[serde(default)]
    pub project_name: String,
    /// Models to generate, in declaration order
    #[serde(default)]
    pub models: Vec<ModelDefinition>,
    /// Requested output format
    #[serde(default)]
    pub response_type: ResponseType,
    /// Role names for the authorization policies
    #[serde(default)]
    pub roles: Vec<String>,
    /// Whether to generate the JWT authentication subsystem
    #[serde(default)]
    pub include_jwt_authentication: bool,
}

impl CodeGenerationRequest {
    /// Create a request for a project with no models
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            models: Vec::new(),
            response_type: ResponseType::default(),
            roles: Vec::new(),
            include_jwt_authentication: false,
        }
    }

    /// Parse a request from JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or has the wrong shape.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Add a model
    #[must_use]
    pub fn model(mut self, model: ModelDefinition) -> Self {
        self.models.push(model);
        self
    }

    /// Enable JWT authentication with the given roles
    #[must_use]
    pub fn with_authentication<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_jwt_authentication = true;
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Set the response type
    #[must_use]
    pub const fn with_response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    /// Whether the project name is present
    #[must_use]
    pub fn has_project_name(&self) -> bool {
        !self.project_name.trim().is_empty()
    }

    /// Roles used for policy generation
    ///
    /// Falls back to a single [`DEFAULT_ROLE`] when no roles were supplied.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudgen::schema::CodeGenerationRequest;
    /// let request = CodeGenerationRequest::new("Shop").with_authentication(Vec::<String>::new());
    /// assert_eq!(request.effective_roles(), vec!["User".to_string()]);
    /// ```
    #[must_use]
    pub fn effective_roles(&self) -> Vec<String> {
        let roles: Vec<String> = self
            .roles
            .iter()
            .map(|role| role.trim())
            .filter(|role| !role.is_empty())
            .map(ToString::to_string)
            .collect();

        if roles.is_empty() {
            vec![DEFAULT_ROLE.to_string()]
        } else {
            roles
        }
    }

    /// Model names in declaration order
    #[must_use]
    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name.as_str()).collect()
    }

    /// Pre-flight validation
    ///
    /// Collects every issue instead of stopping at the first one. The
    /// generator only runs this in strict mode; by default dangling
    /// relationship targets are generated as declared.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let declared: HashSet<&str> = self.models.iter().map(|m| m.name.as_str()).collect();
        let mut seen_models = HashSet::new();

        for model in &self.models {
            let name = model.name.trim();
            if name.is_empty() {
                issues.push(ValidationIssue::EmptyModelName);
                continue;
            }
            if !seen_models.insert(name) {
                issues.push(ValidationIssue::DuplicateModel(name.to_string()));
            }
            if !name.is_pascal_case() {
                issues.push(ValidationIssue::NotPascalCase(name.to_string()));
            }

            let mut seen_attributes = HashSet::new();
            for attribute in &model.attributes {
                let attr_name = attribute.name.trim();
                if attr_name.is_empty() {
                    issues.push(ValidationIssue::EmptyAttributeName {
                        model: name.to_string(),
                    });
                } else if !seen_attributes.insert(attr_name) {
                    issues.push(ValidationIssue::DuplicateAttribute {
                        model: name.to_string(),
                        attribute: attr_name.to_string(),
                    });
                }
            }

            for relationship in &model.relationships {
                if !declared.contains(relationship.target_model.as_str()) {
                    issues.push(ValidationIssue::DanglingTarget {
                        model: name.to_string(),
                        target: relationship.target_model.clone(),
                    });
                }
            }
        }

        issues
    }
}

/// Problem found by [`CodeGenerationRequest::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// A model has an empty name
    EmptyModelName,
    /// Two models share a name
    DuplicateModel(String),
    /// Model name is not `PascalCase`
    NotPascalCase(String),
    /// An attribute has an empty name
    EmptyAttributeName {
        /// Owning model
        model: String,
    },
    /// Two attributes of one model share a name
    DuplicateAttribute {
        /// Owning model
        model: String,
        /// Attribute name
        attribute: String,
    },
    /// A relationship points at a model that is not in the request
    DanglingTarget {
        /// Declaring model
        model: String,
        /// Missing target model
        target: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyModelName => write!(f, "model name cannot be empty"),
            Self::DuplicateModel(name) => write!(f, "duplicate model name '{name}'"),
            Self::NotPascalCase(name) => write!(f, "model name '{name}' is not PascalCase"),
            Self::EmptyAttributeName { model } => {
                write!(f, "model '{model}' has an attribute with an empty name")
            }
            Self::DuplicateAttribute { model, attribute } => {
                write!(f, "model '{model}' declares attribute '{attribute}' more than once")
            }
            Self::DanglingTarget { model, target } => {
                write!(f, "model '{model}' references unknown model '{target}'")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop_request() -> CodeGenerationRequest {
        CodeGenerationRequest::new("Shop")
            .model(
                ModelDefinition::new("Customer")
                    .attribute("Name", "string")
                    .relationship(Relationship::new("Orders", "Order", RelationshipKind::OneToMany)),
            )
            .model(
                ModelDefinition::new("Order")
                    .attribute("Total", "decimal")
                    .relationship(Relationship::new(
                        "Customer",
                        "Customer",
                        RelationshipKind::ManyToOne,
                    )),
            )
    }

    #[test]
    fn test_parse_full_request() {
        let json = r#"{
            "projectName": "Shop",
            "models": [
                {
                    "name": "Order",
                    "attributes": [{ "name": "Total", "type": "decimal" }],
                    "relationships": [
                        { "propertyName": "Customer", "targetModel": "Customer", "type": "ManyToOne" }
                    ]
                }
            ],
            "responseType": "zip",
            "roles": ["Admin"],
            "includeJwtAuthentication": true
        }"#;

        let request = CodeGenerationRequest::from_json(json).unwrap();
        assert_eq!(request.project_name, "Shop");
        assert_eq!(request.models.len(), 1);
        assert_eq!(request.models[0].attributes[0].attribute_type, AttributeType::Decimal);
        assert_eq!(request.response_type, ResponseType::Zip);
        assert_eq!(request.roles, vec!["Admin"]);
        assert!(request.include_jwt_authentication);
    }

    #[test]
    fn test_parse_minimal_request_uses_defaults() {
        let request = CodeGenerationRequest::from_json(r#"{"projectName":"Shop"}"#).unwrap();
        assert!(request.models.is_empty());
        assert_eq!(request.response_type, ResponseType::Text);
        assert!(request.roles.is_empty());
        assert!(!request.include_jwt_authentication);
    }

    #[test]
    fn test_response_type_anything_but_zip_is_text() {
        assert_eq!(ResponseType::from("zip"), ResponseType::Zip);
        assert_eq!(ResponseType::from("ZIP"), ResponseType::Zip);
        assert_eq!(ResponseType::from("text"), ResponseType::Text);
        assert_eq!(ResponseType::from("json"), ResponseType::Text);
    }

    #[test]
    fn test_effective_roles() {
        let request = CodeGenerationRequest::new("Shop").with_authentication(["Admin", "User"]);
        assert_eq!(request.effective_roles(), vec!["Admin", "User"]);

        let request = CodeGenerationRequest::new("Shop").with_authentication(["  "]);
        assert_eq!(request.effective_roles(), vec![DEFAULT_ROLE]);
    }

    #[test]
    fn test_has_project_name() {
        assert!(CodeGenerationRequest::new("Shop").has_project_name());
        assert!(!CodeGenerationRequest::new("").has_project_name());
        assert!(!CodeGenerationRequest::new(" \t ").has_project_name());
    }

    #[test]
    fn test_validate_clean_request() {
        assert!(shop_request().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_dangling_target() {
        let request = CodeGenerationRequest::new("Shop").model(
            ModelDefinition::new("Order")
                .relationship(Relationship::new("Customer", "Customer", RelationshipKind::ManyToOne)),
        );

        assert_eq!(
            request.validate(),
            vec![ValidationIssue::DanglingTarget {
                model: "Order".to_string(),
                target: "Customer".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_reports_duplicates() {
        let request = CodeGenerationRequest::new("Shop")
            .model(
                ModelDefinition::new("Order")
                    .attribute("Total", "decimal")
                    .attribute("Total", "double"),
            )
            .model(ModelDefinition::new("Order"));

        let issues = request.validate();
        assert!(issues.contains(&ValidationIssue::DuplicateModel("Order".to_string())));
        assert!(issues.contains(&ValidationIssue::DuplicateAttribute {
            model: "Order".to_string(),
            attribute: "Total".to_string(),
        }));
    }

    #[test]
    fn test_validate_reports_naming_problems() {
        let request = CodeGenerationRequest::new("Shop")
            .model(ModelDefinition::new("order_item"))
            .model(ModelDefinition::new(""));

        let issues = request.validate();
        assert!(issues.contains(&ValidationIssue::NotPascalCase("order_item".to_string())));
        assert!(issues.contains(&ValidationIssue::EmptyModelName));
    }
}
