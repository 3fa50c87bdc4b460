//! Field definitions for the schema AST.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{Attribute, AttributeValue, Documentation, FieldType, Ident, Span, TypeModifier};

/// A field in a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name.
    pub name: Ident,
    /// Field type.
    pub field_type: FieldType,
    /// Type modifier (optional, list, etc.).
    pub modifier: TypeModifier,
    /// Raw attributes as parsed, in source order.
    pub attributes: Vec<Attribute>,
    /// Documentation comment.
    pub documentation: Option<Documentation>,
    /// Source location.
    pub span: Span,
}

impl Field {
    /// Create a new field.
    pub fn new(
        name: Ident,
        field_type: FieldType,
        modifier: TypeModifier,
        attributes: Vec<Attribute>,
        span: Span,
    ) -> Self {
        Self {
            name,
            field_type,
            modifier,
            attributes,
            documentation: None,
            span,
        }
    }

    /// Get the field name as a string.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Check if the field is optional.
    pub fn is_optional(&self) -> bool {
        self.modifier.is_optional()
    }

    /// Check if the field is a list.
    pub fn is_list(&self) -> bool {
        self.modifier.is_list()
    }

    /// Check if this field has a specific attribute.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.is(name))
    }

    /// Get an attribute by name.
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.is(name))
    }

    /// Check if this is a primary key field. Always read from the attribute list.
    pub fn is_id(&self) -> bool {
        self.has_attribute("id")
    }

    /// Check if this field has a unique constraint.
    pub fn is_unique(&self) -> bool {
        self.has_attribute("unique")
    }

    /// Value of the `@default(...)` attribute, if any.
    pub fn default_value(&self) -> Option<&AttributeValue> {
        self.get_attribute("default").and_then(|a| a.first_arg())
    }

    /// Name given by `@map("...")`, if any.
    pub fn mapped_name(&self) -> Option<&str> {
        self.get_attribute("map").and_then(|a| a.string_arg())
    }

    /// Parse the `@relation(...)` attribute, if present.
    pub fn relation(&self) -> Option<RelationAttribute> {
        let attr = self.get_attribute("relation")?;

        let name = attr
            .get_arg("name")
            .or_else(|| attr.first_positional())
            .and_then(AttributeValue::as_string)
            .map(String::from);
        let fields = attr
            .get_arg("fields")
            .and_then(AttributeValue::as_list)
            .map(<[SmolStr]>::to_vec)
            .unwrap_or_default();
        let references = attr
            .get_arg("references")
            .and_then(AttributeValue::as_list)
            .map(<[SmolStr]>::to_vec)
            .unwrap_or_default();

        Some(RelationAttribute {
            name,
            fields,
            references,
        })
    }
}

/// The structured content of a `@relation(...)` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationAttribute {
    /// Relation name (first positional string or `name:`).
    pub name: Option<String>,
    /// Local fields holding the foreign key.
    pub fields: Vec<SmolStr>,
    /// Referenced fields on the target model.
    pub references: Vec<SmolStr>,
}

impl RelationAttribute {
    /// Whether the relation names a usable foreign key: both sides present
    /// with the same, non-zero number of fields.
    pub fn is_foreign_key(&self) -> bool {
        !self.fields.is_empty() && self.fields.len() == self.references.len()
    }
}
