//! External name resolution.
//!
//! A declaration's external name is its `@map` / `@@map` string when one is
//! given, otherwise the declared name folded to snake case.

use tblsgen_schema::{Attribute, Enum, EnumValue, Field, Model, find_attribute};

/// Fold a declared name to snake case.
///
/// An underscore goes in front of every upper-case letter that directly
/// follows a lower-case letter, then the whole string is lower-cased. Runs
/// of capitals are not split: `HTTPServer` becomes `httpserver`.
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;

    for c in name.chars() {
        if prev_lower && c.is_ascii_uppercase() {
            out.push('_');
        }
        prev_lower = c.is_ascii_lowercase();
        out.push(c.to_ascii_lowercase());
    }

    out
}

/// Resolve an external name from a declared name and its attributes.
///
/// `map_attribute` is looked up in `attributes`; only a string first
/// argument counts as an override.
pub fn resolve_name(declared: &str, attributes: &[Attribute], map_attribute: &str) -> String {
    external_name(
        declared,
        find_attribute(attributes, map_attribute).and_then(Attribute::string_arg),
    )
}

fn external_name(declared: &str, mapped: Option<&str>) -> String {
    mapped
        .map(str::to_string)
        .unwrap_or_else(|| to_snake_case(declared))
}

/// Table name of a model (`@@map` or snake case).
pub fn table_name(model: &Model) -> String {
    external_name(model.name(), model.mapped_name())
}

/// Column name of a field (`@map` or snake case).
pub fn column_name(field: &Field) -> String {
    external_name(field.name(), field.mapped_name())
}

/// Name of an enum (`@@map` or snake case).
pub fn enum_name(e: &Enum) -> String {
    external_name(e.name(), e.mapped_name())
}

/// Stored value of an enum member: the `@map` string or the declared name unchanged.
pub fn enum_value_name(value: &EnumValue) -> String {
    value.db_value().to_string()
}

/// Column name for a field referenced by name from a model attribute or
/// relation. Names that match no field are folded to snake case.
pub fn field_column(model: &Model, field_name: &str) -> String {
    model
        .get_field(field_name)
        .map(column_name)
        .unwrap_or_else(|| to_snake_case(field_name))
}
