//! Entity class generator
//!
//! `{{Attributes}}` holds the declared attributes followed by the foreign
//! keys implied by `ManyToOne` relationships. `{{Relationships}}` holds the
//! navigation properties. Both groups keep declaration order.

use super::{join_lines, paths, project_placeholders, render_file};
use crate::error::Result;
use crate::file_set::GeneratedFile;
use crate::resolver::ResolvedRelationship;
use crate::schema::{AttributeDefinition, ModelDefinition};
use crate::template::{Placeholder, TemplateName, TemplateRenderer, TemplateSource};

/// Auto-property line shared by attributes, foreign keys and navigations
fn property_line(type_name: &str, name: &str) -> String {
    format!("        public {type_name} {name} {{ get; set; }}")
}

/// Attribute lines followed by foreign key lines
#[must_use]
pub fn attribute_lines(
    attributes: &[AttributeDefinition],
    relationships: &[ResolvedRelationship],
) -> String {
    let declared = attributes
        .iter()
        .map(|attr| property_line(attr.type_name(), &attr.name));
    let foreign_keys = relationships
        .iter()
        .filter_map(|rel| rel.foreign_key.as_ref())
        .map(|fk| property_line(fk.type_name, &fk.name));

    join_lines(declared.chain(foreign_keys))
}

/// Navigation property lines
#[must_use]
pub fn navigation_lines(relationships: &[ResolvedRelationship]) -> String {
    join_lines(
        relationships
            .iter()
            .map(|rel| property_line(&rel.navigation.type_name(), &rel.navigation.name)),
    )
}

/// Render `Models/<Name>.cs`
///
/// # Errors
///
/// Fails if the model template cannot be loaded.
pub fn generate<S: TemplateSource>(
    renderer: &TemplateRenderer<S>,
    project_name: &str,
    model: &ModelDefinition,
    relationships: &[ResolvedRelationship],
) -> Result<GeneratedFile> {
    let placeholders = project_placeholders(project_name)
        .with(Placeholder::ModelName, model.name.as_str())
        .with(Placeholder::Attributes, attribute_lines(&model.attributes, relationships))
        .with(Placeholder::Relationships, navigation_lines(relationships));

    render_file(
        renderer,
        TemplateName::Model,
        &placeholders,
        paths::model(&model.name),
        format!("{} entity", model.name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve_all;
    use crate::schema::{Relationship, RelationshipKind};
    use crate::template::InMemoryTemplateSource;

    fn renderer() -> TemplateRenderer<InMemoryTemplateSource> {
        TemplateRenderer::new(InMemoryTemplateSource::new().with(
            TemplateName::Model,
            "namespace {{ProjectName}}.Models;\nclass {{ModelName}}\n{{Attributes}}\n--\n{{Relationships}}",
        ))
    }

    #[test]
    fn test_attribute_lines_use_csharp_types() {
        let model = ModelDefinition::new("Order")
            .attribute("Total", "decimal")
            .attribute("PlacedAt", "datetime")
            .attribute("Reference", "Guid");

        assert_eq!(
            attribute_lines(&model.attributes, &[]),
            "        public decimal Total { get; set; }\n\
             \x20       public DateTime PlacedAt { get; set; }\n\
             \x20       public Guid Reference { get; set; }"
        );
    }

    #[test]
    fn test_foreign_keys_follow_attributes() {
        let model = ModelDefinition::new("Order")
            .attribute("Total", "decimal")
            .relationship(Relationship::new("Buyer", "Customer", RelationshipKind::ManyToOne))
            .relationship(Relationship::new("Lines", "OrderLine", RelationshipKind::OneToMany));
        let resolved = resolve_all(&model).unwrap();

        let attributes = attribute_lines(&model.attributes, &resolved);
        assert_eq!(
            attributes.lines().collect::<Vec<_>>(),
            vec![
                "        public decimal Total { get; set; }",
                "        public int CustomerId { get; set; }",
            ]
        );

        let navigations = navigation_lines(&resolved);
        assert_eq!(
            navigations.lines().collect::<Vec<_>>(),
            vec![
                "        public Customer Buyer { get; set; }",
                "        public ICollection<OrderLine> Lines { get; set; }",
            ]
        );
    }

    #[test]
    fn test_generate_model_file() {
        let model = ModelDefinition::new("Tag").attribute("Label", "string");
        let file = generate(&renderer(), "Blog", &model, &[]).unwrap();

        assert_eq!(file.path, "Models/Tag.cs");
        assert_eq!(
            file.content,
            "namespace Blog.Models;\nclass Tag\n        public string Label { get; set; }\n--\n"
        );
    }

    #[test]
    fn test_model_without_fields_leaves_empty_sections() {
        let file = generate(&renderer(), "Blog", &ModelDefinition::new("Empty"), &[]).unwrap();
        assert_eq!(file.content, "namespace Blog.Models;\nclass Empty\n\n--\n");
    }
}
