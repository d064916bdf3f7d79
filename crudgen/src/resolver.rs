//! Relationship resolution
//!
//! Turns a relationship declared on a model into the fields it implies on
//! that model:
//!
//! | Kind         | Foreign key          | Navigation                         | Join table        |
//! |--------------|----------------------|------------------------------------|-------------------|
//! | `OneToMany`  | none                 | `ICollection<Target> PropertyName` | none              |
//! | `ManyToOne`  | `int <Target>Id`     | `Target PropertyName`              | none              |
//! | `ManyToMany` | none                 | `ICollection<Target> PropertyName` | `<Model>_<Target>`|
//!
//! Each declared side is resolved on its own. Nothing is inferred for the
//! target model and the target is not required to exist in the request.

use crate::error::{GenerationError, Result};
use crate::naming;
use crate::schema::{ModelDefinition, Relationship, RelationshipKind};

/// Scalar foreign key field added to the declaring model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyField {
    /// Field name (`<Target>Id`)
    pub name: String,
    /// Field type name
    pub type_name: &'static str,
}

/// Shape of a navigation property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// A single reference to the target
    Single,
    /// A collection of the target
    Collection,
}

/// Navigation property added to the declaring model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationField {
    /// Property name
    pub name: String,
    /// Target model name
    pub target: String,
    /// Single reference or collection
    pub cardinality: Cardinality,
}

impl NavigationField {
    /// Type name of the property (`Customer` or `ICollection<Order>`)
    #[must_use]
    pub fn type_name(&self) -> String {
        match self.cardinality {
            Cardinality::Single => self.target.clone(),
            Cardinality::Collection => format!("ICollection<{}>", self.target),
        }
    }
}

/// Everything a single relationship contributes to the generated code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelationship {
    /// Declaring model
    pub model: String,
    /// Resolved kind (never [`RelationshipKind::Unsupported`])
    pub kind: RelationshipKind,
    /// Foreign key on the declaring model (`ManyToOne` only)
    pub foreign_key: Option<ForeignKeyField>,
    /// Navigation property on the declaring model
    pub navigation: NavigationField,
    /// Join table name (`ManyToMany` only)
    pub join_table: Option<String>,
}

/// Resolve one relationship declared on `model_name`
///
/// # Errors
///
/// Returns [`GenerationError::UnsupportedRelationshipKind`] if the
/// relationship kind is not one of the three supported kinds.
///
/// # Examples
///
/// ```
/// # use crudgen::resolver::{resolve, Cardinality};
/// # use crudgen::schema::{Relationship, RelationshipKind};
/// let rel = Relationship::new("Customer", "Customer", RelationshipKind::ManyToOne);
/// let resolved = resolve("Order", &rel).unwrap();
/// assert_eq!(resolved.foreign_key.unwrap().name, "CustomerId");
/// assert_eq!(resolved.navigation.cardinality, Cardinality::Single);
/// ```
pub fn resolve(model_name: &str, relationship: &Relationship) -> Result<ResolvedRelationship> {
    let target = relationship.target_model.clone();
    let navigation = |cardinality| NavigationField {
        name: relationship.property_name_for(model_name).into_owned(),
        target: target.clone(),
        cardinality,
    };

    let (foreign_key, navigation, join_table) = match &relationship.kind {
        RelationshipKind::OneToMany => (None, navigation(Cardinality::Collection), None),
        RelationshipKind::ManyToOne => (
            Some(ForeignKeyField {
                name: naming::foreign_key(&target),
                type_name: "int",
            }),
            navigation(Cardinality::Single),
            None,
        ),
        RelationshipKind::ManyToMany => (
            None,
            navigation(Cardinality::Collection),
            Some(naming::join_table(model_name, &target)),
        ),
        RelationshipKind::Unsupported(kind) => {
            return Err(GenerationError::UnsupportedRelationshipKind {
                model: model_name.to_string(),
                kind: kind.clone(),
            });
        }
    };

    Ok(ResolvedRelationship {
        model: model_name.to_string(),
        kind: relationship.kind.clone(),
        foreign_key,
        navigation,
        join_table,
    })
}

/// Resolve every relationship of a model in declaration order
///
/// # Errors
///
/// Fails on the first unsupported relationship kind.
pub fn resolve_all(model: &ModelDefinition) -> Result<Vec<ResolvedRelationship>> {
    model
        .relationships
        .iter()
        .map(|relationship| resolve(&model.name, relationship))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_to_many_has_collection_and_no_foreign_key() {
        let rel = Relationship::new("Orders", "Order", RelationshipKind::OneToMany);
        let resolved = resolve("Customer", &rel).unwrap();

        assert!(resolved.foreign_key.is_none());
        assert!(resolved.join_table.is_none());
        assert_eq!(resolved.navigation.name, "Orders");
        assert_eq!(resolved.navigation.cardinality, Cardinality::Collection);
        assert_eq!(resolved.navigation.type_name(), "ICollection<Order>");
    }

    #[test]
    fn test_many_to_one_has_foreign_key_and_single_navigation() {
        let rel = Relationship::new("Buyer", "Customer", RelationshipKind::ManyToOne);
        let resolved = resolve("Order", &rel).unwrap();

        let fk = resolved.foreign_key.unwrap();
        assert_eq!(fk.name, "CustomerId");
        assert_eq!(fk.type_name, "int");
        assert_eq!(resolved.navigation.name, "Buyer");
        assert_eq!(resolved.navigation.type_name(), "Customer");
        assert!(resolved.join_table.is_none());
    }

    #[test]
    fn test_many_to_many_has_join_table() {
        let rel = Relationship::new("Tags", "Tag", RelationshipKind::ManyToMany);
        let resolved = resolve("Post", &rel).unwrap();

        assert!(resolved.foreign_key.is_none());
        assert_eq!(resolved.navigation.type_name(), "ICollection<Tag>");
        assert_eq!(resolved.join_table.as_deref(), Some("Post_Tag"));
    }

    #[test]
    fn test_default_property_name() {
        let rel = Relationship::with_default_name("Tag", RelationshipKind::ManyToMany);
        let resolved = resolve("Category", &rel).unwrap();
        assert_eq!(resolved.navigation.name, "Categories");
    }

    #[test]
    fn test_dangling_target_still_resolves() {
        let rel = Relationship::new("Ghost", "DoesNotExist", RelationshipKind::ManyToOne);
        let resolved = resolve("Order", &rel).unwrap();
        assert_eq!(resolved.foreign_key.unwrap().name, "DoesNotExistId");
    }

    #[test]
    fn test_unsupported_kind_fails() {
        let rel = Relationship::new("Profile", "Profile", RelationshipKind::from_name("OneToOne"));
        let err = resolve("User", &rel).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::UnsupportedRelationshipKind { ref model, ref kind }
                if model == "User" && kind == "OneToOne"
        ));
    }

    #[test]
    fn test_resolve_all_keeps_order_and_fails_fast() {
        let model = ModelDefinition::new("Order")
            .relationship(Relationship::new("Customer", "Customer", RelationshipKind::ManyToOne))
            .relationship(Relationship::new("Items", "OrderItem", RelationshipKind::OneToMany));
        let resolved = resolve_all(&model).unwrap();
        assert_eq!(resolved[0].navigation.name, "Customer");
        assert_eq!(resolved[1].navigation.name, "Items");

        let broken = model.relationship(Relationship::new(
            "X",
            "X",
            RelationshipKind::from_ordinal(9),
        ));
        assert!(resolve_all(&broken).is_err());
    }
}
