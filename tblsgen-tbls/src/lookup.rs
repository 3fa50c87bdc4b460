//! Name lookups over a parsed schema.

use indexmap::IndexMap;
use tblsgen_schema::{Enum, Field, FieldKind, FieldType, Model, Schema};

/// Models and enums indexed by declared name.
///
/// When a name is declared twice the first declaration wins, matching
/// [`Schema::get_model`].
#[derive(Debug)]
pub struct SchemaLookup<'a> {
    models: IndexMap<&'a str, &'a Model>,
    enums: IndexMap<&'a str, &'a Enum>,
}

impl<'a> SchemaLookup<'a> {
    /// Index a schema.
    pub fn new(schema: &'a Schema) -> Self {
        let mut models = IndexMap::with_capacity(schema.models.len());
        for model in &schema.models {
            models.entry(model.name()).or_insert(model);
        }

        let mut enums = IndexMap::with_capacity(schema.enums.len());
        for e in &schema.enums {
            enums.entry(e.name()).or_insert(e);
        }

        Self { models, enums }
    }

    /// Get a model by declared name.
    pub fn model(&self, name: &str) -> Option<&'a Model> {
        self.models.get(name).copied()
    }

    /// Check whether a name is a declared enum.
    pub fn is_enum(&self, name: &str) -> bool {
        self.enums.contains_key(name)
    }

    /// Kind of a field once declared enums are known: an object type that
    /// names an enum is an enum.
    pub fn field_kind(&self, field: &Field) -> FieldKind {
        match &field.field_type {
            FieldType::Object(name) if self.is_enum(name) => FieldKind::Enum,
            other => other.kind(),
        }
    }
}
