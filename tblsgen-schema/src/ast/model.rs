//! Model and enum definitions for the schema AST.

use serde::{Deserialize, Serialize};

use super::{Attribute, Documentation, Field, Ident, Span, find_attribute};

/// A model definition (maps to a database table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Model name.
    pub name: Ident,
    /// Model fields in source order. Column order follows this order.
    pub fields: Vec<Field>,
    /// Model-level attributes (prefixed with `@@`).
    pub attributes: Vec<Attribute>,
    /// Documentation comment.
    pub documentation: Option<Documentation>,
    /// Source location.
    pub span: Span,
}

impl Model {
    /// Create a new model.
    pub fn new(name: Ident, span: Span) -> Self {
        Self {
            name,
            fields: vec![],
            attributes: vec![],
            documentation: None,
            span,
        }
    }

    /// Get the model name as a string.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Add a field to the model.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Get the first field with the given name.
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Get the fields marked `@id`.
    pub fn id_fields(&self) -> Vec<&Field> {
        self.fields.iter().filter(|f| f.is_id()).collect()
    }

    /// Get the fields carrying a `@relation` attribute.
    pub fn relation_fields(&self) -> Vec<&Field> {
        self.fields
            .iter()
            .filter(|f| f.has_attribute("relation"))
            .collect()
    }

    /// Check if this model has a specific model-level attribute.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.is(name))
    }

    /// Get the first model-level attribute with the given name.
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        find_attribute(&self.attributes, name)
    }

    /// Get every model-level attribute with the given name, in source order.
    pub fn attributes_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Attribute> + 'a {
        self.attributes.iter().filter(move |a| a.is(name))
    }

    /// Name given by `@@map("...")`, if any.
    pub fn mapped_name(&self) -> Option<&str> {
        self.get_attribute("map").and_then(|a| a.string_arg())
    }
}

/// An enum definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    /// Enum name.
    pub name: Ident,
    /// Enum values in declaration order.
    pub values: Vec<EnumValue>,
    /// Enum-level attributes (prefixed with `@@`).
    pub attributes: Vec<Attribute>,
    /// Documentation comment.
    pub documentation: Option<Documentation>,
    /// Source location.
    pub span: Span,
}

impl Enum {
    /// Create a new enum.
    pub fn new(name: Ident, span: Span) -> Self {
        Self {
            name,
            values: vec![],
            attributes: vec![],
            documentation: None,
            span,
        }
    }

    /// Get the enum name as a string.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Add a value to the enum.
    pub fn add_value(&mut self, value: EnumValue) {
        self.values.push(value);
    }

    /// Get a value by name.
    pub fn get_value(&self, name: &str) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.name() == name)
    }

    /// Name given by `@@map("...")`, if any.
    pub fn mapped_name(&self) -> Option<&str> {
        find_attribute(&self.attributes, "map").and_then(|a| a.string_arg())
    }
}

/// A single enum value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Value name.
    pub name: Ident,
    /// Value attributes (`@map`).
    pub attributes: Vec<Attribute>,
    /// Documentation comment.
    pub documentation: Option<Documentation>,
    /// Source location.
    pub span: Span,
}

impl EnumValue {
    /// Create a new enum value.
    pub fn new(name: Ident, span: Span) -> Self {
        Self {
            name,
            attributes: vec![],
            documentation: None,
            span,
        }
    }

    /// Get the value name as a string.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Name given by `@map("...")`, if any.
    pub fn mapped_name(&self) -> Option<&str> {
        find_attribute(&self.attributes, "map").and_then(|a| a.string_arg())
    }

    /// The value as stored in the database: the `@map` name or the declared name.
    pub fn db_value(&self) -> &str {
        self.mapped_name().unwrap_or_else(|| self.name())
    }
}
