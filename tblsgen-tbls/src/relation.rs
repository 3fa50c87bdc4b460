//! Foreign-key relation extraction.

use tblsgen_schema::{Field, FieldKind, Model, Schema};
use tracing::{trace, warn};

use crate::document::{Cardinality, Relation};
use crate::lookup::SchemaLookup;
use crate::naming::{field_column, table_name};

/// Extract every foreign-key relation in the schema, in model then field order.
///
/// Only object fields whose `@relation` lists `fields` and `references` of
/// the same non-zero length produce a relation. A relation pointing at an
/// undeclared model is dropped.
pub fn extract_relations(schema: &Schema, lookup: &SchemaLookup<'_>) -> Vec<Relation> {
    schema
        .models
        .iter()
        .flat_map(|model| {
            model
                .fields
                .iter()
                .filter_map(move |field| extract_relation(model, field, lookup))
        })
        .collect()
}

fn extract_relation(model: &Model, field: &Field, lookup: &SchemaLookup<'_>) -> Option<Relation> {
    if lookup.field_kind(field) != FieldKind::Object {
        return None;
    }

    let relation = field.relation()?;
    if !relation.is_foreign_key() {
        trace!(
            model = model.name(),
            field = field.name(),
            "relation without matching fields/references"
        );
        return None;
    }

    let target_name = field.field_type.type_name();
    let Some(target) = lookup.model(target_name) else {
        warn!(
            model = model.name(),
            field = field.name(),
            target = target_name,
            "dropping relation to unknown model"
        );
        return None;
    };

    let table = table_name(model);
    let parent_table = table_name(target);
    let columns: Vec<String> = relation
        .fields
        .iter()
        .map(|f| field_column(model, f))
        .collect();
    let parent_columns: Vec<String> = relation
        .references
        .iter()
        .map(|f| field_column(target, f))
        .collect();

    Some(Relation {
        def: Relation::foreign_key_def(&columns, &parent_table, &parent_columns),
        cardinality: Cardinality::from_modifiers(field.is_list(), field.is_optional()),
        parent_cardinality: parent_cardinality(model, target, lookup),
        table,
        columns,
        parent_table,
        parent_columns,
    })
}

/// Cardinality of the first object field on `target` that points back at
/// `child`; `exactly_one` when there is none.
fn parent_cardinality(child: &Model, target: &Model, lookup: &SchemaLookup<'_>) -> Cardinality {
    target
        .fields
        .iter()
        .find(|f| {
            lookup.field_kind(f) == FieldKind::Object && f.field_type.type_name() == child.name()
        })
        .map(|f| Cardinality::from_modifiers(f.is_list(), f.is_optional()))
        .unwrap_or(Cardinality::ExactlyOne)
}
