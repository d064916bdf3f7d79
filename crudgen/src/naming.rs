//! Naming helpers for code generation
//!
//! Pluralization and derived identifier names shared by the generators.
//! Pluralization is deliberately minimal: a trailing `y` becomes `ies`,
//! everything else gets an `s`. Irregular plurals (`Person`, `Child`) are not
//! handled, so `Person` becomes `Persons`.

/// Pluralize a model name
///
/// # Examples
///
/// ```
/// # use crudgen::naming::pluralize;
/// assert_eq!(pluralize("Category"), "Categories");
/// assert_eq!(pluralize("Order"), "Orders");
/// assert_eq!(pluralize("Key"), "Keies");
/// ```
#[must_use]
pub fn pluralize(name: &str) -> String {
    name.strip_suffix('y')
        .map_or_else(|| format!("{name}s"), |stem| format!("{stem}ies"))
}

/// Foreign key property name for a target model (`Customer` → `CustomerId`)
#[must_use]
pub fn foreign_key(target_model: &str) -> String {
    format!("{target_model}Id")
}

/// Join table name for a many-to-many relationship (`Order_Product`)
#[must_use]
pub fn join_table(model: &str, target_model: &str) -> String {
    format!("{model}_{target_model}")
}

/// Service interface name (`Order` → `IOrderService`)
#[must_use]
pub fn service_interface(model: &str) -> String {
    format!("I{model}Service")
}

/// Repository interface name (`Order` → `IOrderRepository`)
#[must_use]
pub fn repository_interface(model: &str) -> String {
    format!("I{model}Repository")
}
