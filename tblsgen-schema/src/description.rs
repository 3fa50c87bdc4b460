//! Adapter for normalized model descriptions.
//!
//! Schema introspection tools can hand over an already structured
//! description of the data model (the DMMF `datamodel` shape). This module
//! reads that JSON and rebuilds the same [`Schema`] AST the parser
//! produces, turning each flag back into the attribute it stands for, so the
//! converter only ever sees one input form.

use serde::Deserialize;
use serde_json::Value;
use smol_str::SmolStr;
use tracing::{debug, warn};

use crate::ast::*;
use crate::error::{SchemaError, SchemaResult};

/// A normalized model description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescription {
    /// Model descriptions.
    #[serde(default)]
    pub models: Vec<ModelDesc>,
    /// Enum descriptions.
    #[serde(default)]
    pub enums: Vec<EnumDesc>,
    /// Index descriptions, keyed to models by name.
    #[serde(default)]
    pub indexes: Vec<IndexDesc>,
}

/// One model of a description.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDesc {
    pub name: String,
    #[serde(default)]
    pub db_name: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDesc>,
    #[serde(default)]
    pub primary_key: Option<PrimaryKeyDesc>,
    #[serde(default)]
    pub unique_fields: Vec<Vec<String>>,
    #[serde(default)]
    pub documentation: Option<String>,
}

/// One field of a described model.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDesc {
    pub name: String,
    pub kind: FieldKind,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub is_required: Option<bool>,
    #[serde(default)]
    pub is_optional: Option<bool>,
    #[serde(default)]
    pub is_list: bool,
    #[serde(default)]
    pub is_id: bool,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default)]
    pub has_default_value: Option<bool>,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub relation_name: Option<String>,
    #[serde(default)]
    pub relation_from_fields: Option<Vec<String>>,
    #[serde(default)]
    pub relation_to_fields: Option<Vec<String>>,
    #[serde(default)]
    pub db_name: Option<String>,
    #[serde(default)]
    pub documentation: Option<String>,
}

/// A model's compound primary key.
#[derive(Debug, Clone, Deserialize)]
pub struct PrimaryKeyDesc {
    #[serde(default)]
    pub name: Option<String>,
    pub fields: Vec<String>,
}

/// One enum of a description.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDesc {
    pub name: String,
    #[serde(default)]
    pub values: Vec<EnumValueDesc>,
    #[serde(default)]
    pub db_name: Option<String>,
    #[serde(default)]
    pub documentation: Option<String>,
}

/// One value of a described enum.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueDesc {
    pub name: String,
    #[serde(default)]
    pub db_name: Option<String>,
    #[serde(default)]
    pub documentation: Option<String>,
}

/// A described index.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDesc {
    pub model: String,
    #[serde(rename = "type")]
    pub index_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub db_name: Option<String>,
    #[serde(default)]
    pub fields: Vec<IndexFieldDesc>,
}

/// A field reference inside an index.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexFieldDesc {
    pub name: String,
}

impl ModelDescription {
    /// Read a description from JSON text.
    pub fn from_json(text: &str) -> SchemaResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Read a description from a JSON value.
    ///
    /// Accepts either `{"datamodel": {...}}` or the inner object itself.
    pub fn from_value(value: Value) -> SchemaResult<Self> {
        let inner = match value {
            Value::Object(mut map) => match map.remove("datamodel") {
                Some(datamodel @ Value::Object(_)) => datamodel,
                Some(_) => {
                    return Err(SchemaError::invalid_description(
                        "`datamodel` must be an object",
                    ));
                }
                None => Value::Object(map),
            },
            _ => {
                return Err(SchemaError::invalid_description(
                    "expected a JSON object at the top level",
                ));
            }
        };

        let description: Self = serde_json::from_value(inner)?;
        debug!(
            models = description.models.len(),
            enums = description.enums.len(),
            indexes = description.indexes.len(),
            "read model description"
        );
        Ok(description)
    }

    /// Rebuild the schema AST from this description.
    pub fn into_schema(self) -> Schema {
        let mut schema = Schema::new();

        for model in &self.models {
            schema.add_model(model.to_model(&self.indexes));
        }
        for e in &self.enums {
            schema.add_enum(e.to_enum());
        }

        schema
    }
}

/// Read a JSON description straight into a schema.
pub fn parse_description(text: &str) -> SchemaResult<Schema> {
    Ok(ModelDescription::from_json(text)?.into_schema())
}

impl ModelDesc {
    fn to_model(&self, indexes: &[IndexDesc]) -> Model {
        let mut model = Model::new(Ident::synthetic(self.name.as_str()), Span::default());
        model.documentation = self.documentation.as_deref().map(doc);

        for field in &self.fields {
            model.add_field(field.to_field(&self.name));
        }

        if let Some(db_name) = &self.db_name {
            model.attributes.push(string_attribute("map", db_name));
        }
        if let Some(pk) = &self.primary_key {
            let mut args = vec![named("fields", names(&pk.fields))];
            if let Some(name) = &pk.name {
                args.push(named("name", AttributeValue::String(name.clone())));
            }
            model.attributes.push(attribute("id", args));
        }
        for group in &self.unique_fields {
            model
                .attributes
                .push(attribute("unique", vec![named("fields", names(group))]));
        }
        for index in indexes
            .iter()
            .filter(|i| i.model == self.name && i.index_type == "normal")
        {
            let fields: Vec<String> = index.fields.iter().map(|f| f.name.clone()).collect();
            let mut args = vec![named("fields", names(&fields))];
            if let Some(name) = &index.name {
                args.push(named("name", AttributeValue::String(name.clone())));
            }
            if let Some(db_name) = &index.db_name {
                args.push(named("map", AttributeValue::String(db_name.clone())));
            }
            model.attributes.push(attribute("index", args));
        }

        model
    }
}

impl FieldDesc {
    fn is_optional(&self) -> bool {
        match (self.is_optional, self.is_required) {
            (Some(optional), _) => optional,
            (None, Some(required)) => !required,
            (None, None) => false,
        }
    }

    fn field_type(&self, model: &str) -> FieldType {
        let name = SmolStr::new(&self.type_name);
        match self.kind {
            FieldKind::Scalar => match ScalarType::from_str(&self.type_name) {
                Some(scalar) => FieldType::Scalar(scalar),
                None => {
                    warn!(
                        model,
                        field = %self.name,
                        type_name = %self.type_name,
                        "unknown scalar type, passing type name through"
                    );
                    FieldType::Native(name)
                }
            },
            FieldKind::Object => FieldType::Object(name),
            FieldKind::Enum => FieldType::Enum(name),
            FieldKind::Unsupported => FieldType::Unsupported(name),
        }
    }

    fn to_field(&self, model: &str) -> Field {
        let mut attributes = Vec::new();

        if self.is_id {
            attributes.push(flag("id"));
        }
        if self.is_unique {
            attributes.push(flag("unique"));
        }
        if self.has_default_value != Some(false) {
            if let Some(value) = self.default.as_ref().and_then(default_value) {
                attributes.push(attribute("default", vec![positional(value)]));
            }
        }
        let from = self.relation_from_fields.as_deref().unwrap_or_default();
        let to = self.relation_to_fields.as_deref().unwrap_or_default();
        if self.relation_name.is_some() || !from.is_empty() || !to.is_empty() {
            let mut args = Vec::new();
            if let Some(name) = &self.relation_name {
                args.push(named("name", AttributeValue::String(name.clone())));
            }
            if !from.is_empty() {
                args.push(named("fields", names(from)));
            }
            if !to.is_empty() {
                args.push(named("references", names(to)));
            }
            attributes.push(attribute("relation", args));
        }
        if let Some(db_name) = &self.db_name {
            attributes.push(string_attribute("map", db_name));
        }

        let mut field = Field::new(
            Ident::synthetic(self.name.as_str()),
            self.field_type(model),
            TypeModifier::from_flags(self.is_list, self.is_optional()),
            attributes,
            Span::default(),
        );
        field.documentation = self.documentation.as_deref().map(doc);
        field
    }
}

impl EnumDesc {
    fn to_enum(&self) -> Enum {
        let mut e = Enum::new(Ident::synthetic(self.name.as_str()), Span::default());
        e.documentation = self.documentation.as_deref().map(doc);

        if let Some(db_name) = &self.db_name {
            e.attributes.push(string_attribute("map", db_name));
        }
        for value in &self.values {
            let mut v = EnumValue::new(Ident::synthetic(value.name.as_str()), Span::default());
            v.documentation = value.documentation.as_deref().map(doc);
            if let Some(db_name) = &value.db_name {
                v.attributes.push(string_attribute("map", db_name));
            }
            e.add_value(v);
        }

        e
    }
}

/// Translate a described default. Objects are function calls; anything
/// that is not a string, number, boolean or call yields no default.
fn default_value(value: &Value) -> Option<AttributeValue> {
    match value {
        Value::String(s) => Some(AttributeValue::String(s.clone())),
        Value::Number(n) => n.as_f64().map(AttributeValue::Number),
        Value::Bool(b) => Some(AttributeValue::Boolean(*b)),
        Value::Object(map) => map
            .get("name")
            .and_then(Value::as_str)
            .map(|name| AttributeValue::FunctionCall(SmolStr::new(name))),
        Value::Null | Value::Array(_) => None,
    }
}

fn doc(text: &str) -> Documentation {
    Documentation::new(text, Span::default())
}

fn names(items: &[String]) -> AttributeValue {
    AttributeValue::StringList(items.iter().map(SmolStr::new).collect())
}

fn attribute(name: &str, args: Vec<AttributeArg>) -> Attribute {
    Attribute::new(Ident::synthetic(name), args, Span::default())
}

fn flag(name: &str) -> Attribute {
    Attribute::simple(Ident::synthetic(name), Span::default())
}

fn string_attribute(name: &str, value: &str) -> Attribute {
    attribute(name, vec![positional(AttributeValue::String(value.to_string()))])
}

fn named(name: &str, value: AttributeValue) -> AttributeArg {
    AttributeArg::named(Ident::synthetic(name), value, Span::default())
}

fn positional(value: AttributeValue) -> AttributeArg {
    AttributeArg::positional(value, Span::default())
}
