//! ORM mapping context generator
//!
//! One `DbSet` per model (plus `Users` when authentication is on) and one
//! fluent configuration block per declared relationship.

use super::{join_lines, paths, project_placeholders, render_file};
use crate::error::Result;
use crate::file_set::GeneratedFile;
use crate::naming;
use crate::resolver::ResolvedRelationship;
use crate::schema::RelationshipKind;
use crate::template::{Placeholder, TemplateName, TemplateRenderer, TemplateSource};

/// Model name of the authentication user entity
pub const USER_ENTITY: &str = "User";

fn db_set_line(model_name: &str) -> String {
    format!(
        "        public DbSet<{model_name}> {} {{ get; set; }}",
        naming::pluralize(model_name)
    )
}

/// `DbSet` property lines, `Users` first when authentication is on
#[must_use]
pub fn db_sets<'a>(model_names: impl IntoIterator<Item = &'a str>, include_users: bool) -> String {
    let users: Option<&str> = include_users.then_some(USER_ENTITY);
    join_lines(users.into_iter().chain(model_names).map(db_set_line))
}

/// Fluent configuration block for one relationship
#[must_use]
pub fn relationship_configuration(relationship: &ResolvedRelationship) -> String {
    let model = &relationship.model;
    let property = &relationship.navigation.name;
    let target = &relationship.navigation.target;

    let tail = match &relationship.kind {
        RelationshipKind::OneToMany => format!(
            "                .HasMany(e => e.{property})\n\
             \x20               .WithOne(e => e.{model})\n\
             \x20               .HasForeignKey(e => e.{});",
            naming::foreign_key(model)
        ),
        RelationshipKind::ManyToOne => format!(
            "                .HasOne(e => e.{property})\n\
             \x20               .WithMany(e => e.{model})\n\
             \x20               .HasForeignKey(e => e.{});",
            naming::foreign_key(target)
        ),
        // Resolution never yields an unsupported kind
        RelationshipKind::ManyToMany | RelationshipKind::Unsupported(_) => format!(
            "                .HasMany(e => e.{property})\n\
             \x20               .WithMany(e => e.{model})\n\
             \x20               .UsingEntity(j => j.ToTable(\"{}\"));",
            relationship
                .join_table
                .clone()
                .unwrap_or_else(|| naming::join_table(model, target))
        ),
    };

    format!("            modelBuilder.Entity<{model}>()\n{tail}")
}

/// Render `AppDbContext.cs`
///
/// `relationships` holds every resolved relationship of every model, in
/// model order then declaration order.
///
/// # Errors
///
/// Fails if the db context template cannot be loaded.
pub fn generate<'a, S: TemplateSource>(
    renderer: &TemplateRenderer<S>,
    project_name: &str,
    model_names: impl IntoIterator<Item = &'a str>,
    relationships: &[ResolvedRelationship],
    include_users: bool,
) -> Result<GeneratedFile> {
    let configurations = join_lines(relationships.iter().map(relationship_configuration));
    let placeholders = project_placeholders(project_name)
        .with(Placeholder::DbSets, db_sets(model_names, include_users))
        .with(Placeholder::RelationshipConfigurations, configurations);

    render_file(
        renderer,
        TemplateName::DbContext,
        &placeholders,
        paths::DB_CONTEXT,
        "Entity Framework database context",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;
    use crate::schema::Relationship;

    #[test]
    fn test_db_sets() {
        assert_eq!(
            db_sets(["Order", "Category"], false),
            "        public DbSet<Order> Orders { get; set; }\n\
             \x20       public DbSet<Category> Categories { get; set; }"
        );
    }

    #[test]
    fn test_db_sets_put_users_first() {
        let sets = db_sets(["Order"], true);
        let lines: Vec<_> = sets.lines().collect();
        assert_eq!(lines[0], "        public DbSet<User> Users { get; set; }");
        assert_eq!(lines[1], "        public DbSet<Order> Orders { get; set; }");
    }

    #[test]
    fn test_one_to_many_configuration() {
        let rel = resolve(
            "Customer",
            &Relationship::new("Orders", "Order", RelationshipKind::OneToMany),
        )
        .unwrap();
        let block = relationship_configuration(&rel);

        assert!(block.starts_with("            modelBuilder.Entity<Customer>()"));
        assert!(block.contains(".HasMany(e => e.Orders)"));
        assert!(block.contains(".WithOne(e => e.Customer)"));
        assert!(block.contains(".HasForeignKey(e => e.CustomerId);"));
    }

    #[test]
    fn test_many_to_one_configuration() {
        let rel = resolve(
            "Order",
            &Relationship::new("Buyer", "Customer", RelationshipKind::ManyToOne),
        )
        .unwrap();
        let block = relationship_configuration(&rel);

        assert!(block.contains(".HasOne(e => e.Buyer)"));
        assert!(block.contains(".WithMany(e => e.Order)"));
        assert!(block.contains(".HasForeignKey(e => e.CustomerId);"));
    }

    #[test]
    fn test_many_to_many_configuration_names_join_table() {
        let rel = resolve("Post", &Relationship::new("Tags", "Tag", RelationshipKind::ManyToMany))
            .unwrap();
        let block = relationship_configuration(&rel);

        assert!(block.contains(".HasMany(e => e.Tags)"));
        assert!(block.contains(".WithMany(e => e.Post)"));
        assert!(block.contains(".UsingEntity(j => j.ToTable(\"Post_Tag\"));"));
    }
}
