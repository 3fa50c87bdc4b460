//! Top-level schema definition.

use serde::{Deserialize, Serialize};

use super::{Enum, Model};

/// A complete parsed schema.
///
/// Models and enums are kept in declaration order. Duplicate names are not
/// rejected; lookups return the first declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// All models in the schema.
    pub models: Vec<Model>,
    /// All enums in the schema.
    pub enums: Vec<Enum>,
}

impl Schema {
    /// Create a new empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model to the schema.
    pub fn add_model(&mut self, model: Model) {
        self.models.push(model);
    }

    /// Add an enum to the schema.
    pub fn add_enum(&mut self, e: Enum) {
        self.enums.push(e);
    }

    /// Get a model by name.
    pub fn get_model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name() == name)
    }

    /// Get an enum by name.
    pub fn get_enum(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name() == name)
    }

    /// Check whether a type name refers to a declared enum.
    pub fn is_enum(&self, name: &str) -> bool {
        self.get_enum(name).is_some()
    }

    /// Get all model names.
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name())
    }

    /// Get all enum names.
    pub fn enum_names(&self) -> impl Iterator<Item = &str> {
        self.enums.iter().map(|e| e.name())
    }

    /// Check if the schema declares nothing.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty() && self.enums.is_empty()
    }
}

/// Schema statistics for debugging/info.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaStats {
    /// Number of models.
    pub model_count: usize,
    /// Number of enums.
    pub enum_count: usize,
    /// Total number of fields across all models.
    pub field_count: usize,
    /// Number of fields carrying a `@relation` attribute.
    pub relation_count: usize,
}

impl Schema {
    /// Get statistics about the schema.
    pub fn stats(&self) -> SchemaStats {
        SchemaStats {
            model_count: self.models.len(),
            enum_count: self.enums.len(),
            field_count: self.models.iter().map(|m| m.fields.len()).sum(),
            relation_count: self.models.iter().map(|m| m.relation_fields().len()).sum(),
        }
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        write!(
            f,
            "Schema({} models, {} enums, {} fields, {} relations)",
            stats.model_count, stats.enum_count, stats.field_count, stats.relation_count
        )
    }
}
