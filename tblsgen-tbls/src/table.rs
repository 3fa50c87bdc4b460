//! Model to table conversion.

use tblsgen_schema::{Attribute, AttributeValue, FieldKind, Model};
use tracing::trace;

use crate::document::{Column, Constraint, Index, Table};
use crate::lookup::SchemaLookup;
use crate::naming::{column_name, field_column, table_name};
use crate::types::{field_default, is_nullable, map_type};

/// Convert a model into a table with its columns, constraints and indexes.
pub fn convert_model(model: &Model, lookup: &SchemaLookup<'_>) -> Table {
    let name = table_name(model);
    let comment = model
        .documentation
        .as_ref()
        .map(|d| d.text.clone())
        .unwrap_or_default();

    let mut table = Table::new(name, comment);
    table.columns = columns(model, lookup);
    table.constraints = constraints(model, &table.name);
    table.indexes = indexes(model, &table.name);

    trace!(
        model = model.name(),
        table = %table.name,
        columns = table.columns.len(),
        constraints = table.constraints.len(),
        indexes = table.indexes.len(),
        "converted model"
    );
    table
}

/// Scalar and enum fields become columns, in declaration order.
fn columns(model: &Model, lookup: &SchemaLookup<'_>) -> Vec<Column> {
    model
        .fields
        .iter()
        .filter(|f| matches!(lookup.field_kind(f), FieldKind::Scalar | FieldKind::Enum))
        .map(|field| Column {
            name: column_name(field),
            column_type: map_type(field.field_type.type_name(), field.is_list()),
            nullable: is_nullable(field),
            default: field_default(field),
            comment: field
                .documentation
                .as_ref()
                .map(|d| d.text.clone())
                .unwrap_or_default(),
        })
        .collect()
}

/// Column names for the field list of a composite attribute.
fn attribute_columns(model: &Model, attr: &Attribute) -> Option<Vec<String>> {
    let fields = attr.field_list()?;
    Some(fields.iter().map(|f| field_column(model, f)).collect())
}

/// At most one primary key (composite `@@id` first, else the `@id` fields),
/// then one unique constraint per `@unique` field and per `@@unique`.
fn constraints(model: &Model, table: &str) -> Vec<Constraint> {
    let mut constraints = Vec::new();

    let composite_key = model
        .get_attribute("id")
        .and_then(|attr| attribute_columns(model, attr))
        .filter(|cols| !cols.is_empty());
    let primary_key = composite_key.or_else(|| {
        let cols: Vec<String> = model.id_fields().into_iter().map(column_name).collect();
        (!cols.is_empty()).then_some(cols)
    });
    if let Some(columns) = primary_key {
        constraints.push(Constraint::primary_key(table, columns));
    }

    for field in model.fields.iter().filter(|f| f.is_unique()) {
        constraints.push(Constraint::unique(table, vec![column_name(field)]));
    }

    for attr in model.attributes_named("unique") {
        match attribute_columns(model, attr) {
            Some(columns) if !columns.is_empty() => {
                constraints.push(Constraint::unique(table, columns));
            }
            _ => trace!(model = model.name(), "skipping @@unique without fields"),
        }
    }

    constraints
}

/// One index per `@@index`.
fn indexes(model: &Model, table: &str) -> Vec<Index> {
    model
        .attributes_named("index")
        .filter_map(|attr| {
            let columns = attribute_columns(model, attr).filter(|c| !c.is_empty());
            if columns.is_none() {
                trace!(model = model.name(), "skipping @@index without fields");
            }
            let name = attr
                .get_arg("name")
                .or_else(|| attr.get_arg("map"))
                .and_then(AttributeValue::as_string)
                .map(str::to_string);
            columns.map(|columns| Index::new(table, columns, name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ConstraintType;
    use pretty_assertions::assert_eq;
    use tblsgen_schema::{Schema, parse_schema};

    fn convert_first(schema: &Schema) -> Table {
        let lookup = SchemaLookup::new(schema);
        convert_model(&schema.models[0], &lookup)
    }

    fn column_names(table: &Table) -> Vec<&str> {
        table.columns.iter().map(|c| c.name.as_str()).collect()
    }

    // ==================== Column Tests ====================

    #[test]
    fn test_basic_user_table() {
        let schema = parse_schema(
            r#"
            model User {
                id    Int    @id @default(autoincrement())
                email String @unique
            }
            "#,
        )
        .unwrap();
        let table = convert_first(&schema);

        assert_eq!(table.name, "user");
        assert_eq!(table.kind, "table");
        assert_eq!(table.comment, "");
        assert_eq!(column_names(&table), vec!["id", "email"]);

        let id = &table.columns[0];
        assert_eq!(id.column_type, "INTEGER");
        assert!(!id.nullable);
        assert_eq!(id.default.as_deref(), Some("autoincrement()"));

        let email = &table.columns[1];
        assert_eq!(email.column_type, "VARCHAR");
        assert!(!email.nullable);
        assert!(email.default.is_none());
    }

    #[test]
    fn test_relation_fields_are_not_columns() {
        let schema = parse_schema(
            r#"
            model Post {
                title    String
                author   User   @relation(fields: [authorId], references: [id])
                authorId Int
                tags     String[]
                shape    Unsupported("polygon")
            }
            model User { id Int @id }
            "#,
        )
        .unwrap();
        let table = convert_first(&schema);

        assert_eq!(column_names(&table), vec!["title", "author_id", "tags"]);
        assert_eq!(table.columns[2].column_type, "JSON");
    }

    #[test]
    fn test_enum_fields_are_columns() {
        let schema = parse_schema(
            r#"
            model User {
                role Role? @default(USER)
            }
            enum Role { USER ADMIN }
            "#,
        )
        .unwrap();
        let table = convert_first(&schema);

        let role = &table.columns[0];
        assert_eq!(role.column_type, "Role");
        assert!(role.nullable);
        assert_eq!(role.default.as_deref(), Some("'USER'"));
    }

    #[test]
    fn test_comments_preserve_newlines() {
        let schema = parse_schema(
            r#"
            /// First line
            /// Second line
            model Note {
                /// The body
                body String
            }
            "#,
        )
        .unwrap();
        let table = convert_first(&schema);

        assert_eq!(table.comment, "First line\nSecond line");
        assert_eq!(table.columns[0].comment, "The body");
    }

    #[test]
    fn test_mapped_names() {
        let schema = parse_schema(
            r#"
            model BlogPost {
                createdAt DateTime @map("created")
                @@map("posts")
            }
            "#,
        )
        .unwrap();
        let table = convert_first(&schema);
        assert_eq!(table.name, "posts");
        assert_eq!(column_names(&table), vec!["created"]);
    }

    // ==================== Constraint Tests ====================

    #[test]
    fn test_single_field_constraints() {
        let schema = parse_schema(
            r#"
            model User {
                id       Int    @id
                email    String @unique
                username String @unique
            }
            "#,
        )
        .unwrap();
        let table = convert_first(&schema);

        assert_eq!(table.constraints.len(), 3);
        let pk = table.primary_key().unwrap();
        assert_eq!(pk.columns, vec!["id"]);
        assert_eq!(pk.def, "PRIMARY KEY (id)");

        let uniques: Vec<&Constraint> = table.unique_constraints().collect();
        assert_eq!(uniques.len(), 2);
        assert!(uniques.iter().all(|c| c.columns.len() == 1));
        assert_eq!(uniques[0].name, "user_email_unique");
        assert_eq!(uniques[1].def, "UNIQUE (username)");
    }

    #[test]
    fn test_composite_id_takes_precedence() {
        let schema = parse_schema(
            r#"
            model Membership {
                userId  Int @id
                groupId Int
                @@id([userId, groupId])
            }
            "#,
        )
        .unwrap();
        let table = convert_first(&schema);

        let pks: Vec<&Constraint> = table
            .constraints
            .iter()
            .filter(|c| c.kind == ConstraintType::PrimaryKey)
            .collect();
        assert_eq!(pks.len(), 1);
        assert_eq!(pks[0].name, "membership_pkey");
        assert_eq!(pks[0].columns, vec!["user_id", "group_id"]);
        assert_eq!(pks[0].def, "PRIMARY KEY (user_id, group_id)");
    }

    #[test]
    fn test_multiple_id_fields_form_one_key() {
        let schema = parse_schema("model Pair { a Int @id\n b Int @id }").unwrap();
        let table = convert_first(&schema);
        assert_eq!(table.constraints.len(), 1);
        assert_eq!(table.constraints[0].columns, vec!["a", "b"]);
    }

    #[test]
    fn test_composite_unique_named_fields() {
        let schema = parse_schema(
            r#"
            model User {
                firstName String
                lastName  String @map("surname")
                @@unique(fields: [firstName, lastName])
            }
            "#,
        )
        .unwrap();
        let table = convert_first(&schema);

        assert_eq!(table.constraints.len(), 1);
        let unique = &table.constraints[0];
        assert_eq!(unique.name, "user_first_name_surname_unique");
        assert_eq!(unique.columns, vec!["first_name", "surname"]);
        assert_eq!(unique.def, "UNIQUE (first_name, surname)");
    }

    #[test]
    fn test_model_without_keys_has_no_constraints() {
        let schema = parse_schema("model Log { message String }").unwrap();
        let table = convert_first(&schema);
        assert!(table.constraints.is_empty());
        assert!(table.indexes.is_empty());
    }

    // ==================== Index Tests ====================

    #[test]
    fn test_index_over_two_fields() {
        let schema = parse_schema(
            r#"
            model User {
                email String
                name  String
                @@index([email, name])
            }
            "#,
        )
        .unwrap();
        let table = convert_first(&schema);

        assert_eq!(table.indexes.len(), 1);
        let index = &table.indexes[0];
        assert_eq!(index.name, "user_email_name_idx");
        assert_eq!(index.def, "CREATE INDEX user_email_name_idx ON user (email, name)");
        assert_eq!(index.table, "user");
        assert_eq!(index.columns, vec!["email", "name"]);
    }

    #[test]
    fn test_index_explicit_names() {
        let schema = parse_schema(
            r#"
            model Post {
                title     String
                createdAt DateTime
                @@index(fields: [title], name: "post_title")
                @@index([createdAt], map: "post_created_idx")
            }
            "#,
        )
        .unwrap();
        let table = convert_first(&schema);

        assert_eq!(table.indexes[0].name, "post_title");
        assert_eq!(table.indexes[0].def, "CREATE INDEX post_title ON post (title)");
        assert_eq!(table.indexes[1].name, "post_created_idx");
        assert_eq!(table.indexes[1].columns, vec!["created_at"]);
    }

    #[test]
    fn test_index_without_fields_is_skipped() {
        let schema = parse_schema("model A { x Int\n @@index(name: \"nothing\") }").unwrap();
        assert!(convert_first(&schema).indexes.is_empty());
    }
}
