//! Integration tests for schema to document conversion.
//!
//! These tests run the whole pipeline from schema text to the serialized
//! tbls document.

use pretty_assertions::assert_eq;
use serde_json::json;
use tblsgen::prelude::*;
use tblsgen::tbls::{Cardinality, ConstraintType, to_snake_case};

fn convert(source: &str) -> SchemaDocument {
    convert_source(source, &TblsConfig::default()).expect("Failed to convert schema")
}

// ==================== End-to-End Scenarios ====================

/// A single model with an identifier and a unique email
#[test]
fn test_user_model_document() {
    let document = convert(
        r#"
        model User {
            id    Int    @id @default(autoincrement())
            email String @unique
        }
    "#,
    );

    assert_eq!(document.tables.len(), 1);
    let user = &document.tables[0];
    assert_eq!(user.name, "user");
    assert_eq!(user.columns.len(), 2);

    assert_eq!(user.columns[0].name, "id");
    assert_eq!(user.columns[0].column_type, "INTEGER");
    assert!(!user.columns[0].nullable);
    assert_eq!(user.columns[1].name, "email");
    assert_eq!(user.columns[1].column_type, "VARCHAR");
    assert!(!user.columns[1].nullable);

    assert_eq!(user.constraints.len(), 2);
    assert_eq!(user.constraints[0].kind, ConstraintType::PrimaryKey);
    assert_eq!(user.constraints[0].columns, vec!["id"]);
    assert_eq!(user.constraints[1].kind, ConstraintType::Unique);
    assert_eq!(user.constraints[1].columns, vec!["email"]);
}

/// An empty document converts to an empty schema
#[test]
fn test_empty_document() {
    let document = convert("");
    assert!(document.tables.is_empty());
    assert!(document.enums.is_empty());
    assert!(document.relations.is_empty());

    let value: serde_json::Value = serde_json::from_str(&document.to_json(false).unwrap()).unwrap();
    assert_eq!(value["relations"], json!([]));
    assert_eq!(value["enums"], json!([]));
}

/// A foreign key from posts to users
#[test]
fn test_post_author_relation() {
    let document = convert(
        r#"
        model User {
            id Int @id
        }

        model Post {
            authorId Int
            author   User @relation(fields: [authorId], references: [id])
        }
    "#,
    );

    assert_eq!(document.relations.len(), 1);
    let relation = &document.relations[0];
    assert_eq!(relation.table, "post");
    assert_eq!(relation.columns, vec!["author_id"]);
    assert_eq!(relation.parent_table, "user");
    assert_eq!(relation.parent_columns, vec!["id"]);
    assert_eq!(relation.cardinality, Cardinality::ExactlyOne);
    assert_eq!(relation.parent_cardinality, Cardinality::ExactlyOne);
    assert_eq!(relation.def, "FOREIGN KEY (author_id) REFERENCES user(id)");
}

/// An index over two fields
#[test]
fn test_two_field_index() {
    let document = convert(
        r#"
        model Article {
            slug   String
            locale String
            @@index([slug, locale])
        }
    "#,
    );

    let index = &document.tables[0].indexes[0];
    assert_eq!(
        index.def,
        format!("CREATE INDEX {} ON article (slug, locale)", index.name)
    );
    assert_eq!(index.name, "article_slug_locale_idx");
}

/// Model documentation keeps its newlines
#[test]
fn test_comment_with_newlines() {
    let document = convert(
        r#"
        /// Line one
        /// Line two
        ///
        /// Line four
        model Note {
            id Int @id
        }
    "#,
    );

    assert_eq!(document.tables[0].comment, "Line one\nLine two\n\nLine four");
}

/// A trailing doc comment describes the column it trails
#[test]
fn test_trailing_comment_on_column() {
    let document = convert("model User {\n  id Int @id /// primary key\n  email String\n}");

    let comments: Vec<(&str, &str)> = document.tables[0]
        .columns
        .iter()
        .map(|c| (c.name.as_str(), c.comment.as_str()))
        .collect();
    assert_eq!(comments, vec![("id", "primary key"), ("email", "")]);
}

// ==================== Properties ====================

/// Columns keep field order and leave out relation fields
#[test]
fn test_column_order_preserved() {
    let document = convert(
        r#"
        model Order {
            zeta      Int
            customer  Customer @relation(fields: [customerId], references: [id])
            alpha     String
            items     Item[]
            customerId Int
            status    Status
            middle    Boolean
        }
        model Customer { id Int @id }
        model Item { id Int @id }
        enum Status { OPEN CLOSED }
    "#,
    );

    let names: Vec<&str> = document.tables[0].columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "customer_id", "status", "middle"]);
}

/// Default rendering across value kinds
#[test]
fn test_default_rendering() {
    let document = convert(
        r#"
        model Settings {
            id      Int     @id @default(autoincrement())
            status  String  @default("active")
            count   Int     @default(0)
            ratio   Float   @default(0.5)
            enabled Boolean @default(true)
            note    String?
        }
    "#,
    );

    let defaults: Vec<Option<&str>> = document.tables[0]
        .columns
        .iter()
        .map(|c| c.default.as_deref())
        .collect();
    assert_eq!(
        defaults,
        vec![
            Some("autoincrement()"),
            Some("'active'"),
            Some("0"),
            Some("0.5"),
            Some("true"),
            None,
        ]
    );
}

/// Child and parent cardinalities for each modifier combination
#[test]
fn test_cardinality_table() {
    let document = convert(
        r#"
        model Parent {
            id       Int       @id
            required Required[]
            optional Optional?
        }
        model Required {
            parentId Int
            parent   Parent  @relation(fields: [parentId], references: [id])
        }
        model Optional {
            parentId Int?
            parent   Parent? @relation(fields: [parentId], references: [id])
        }
        model Orphan {
            parentId Int
            parents  Parent[] @relation(fields: [parentId], references: [id])
        }
    "#,
    );

    let pairs: Vec<(&str, Cardinality, Cardinality)> = document
        .relations
        .iter()
        .map(|r| (r.table.as_str(), r.cardinality, r.parent_cardinality))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("required", Cardinality::ExactlyOne, Cardinality::ZeroOrMore),
            ("optional", Cardinality::ZeroOrOne, Cardinality::ZeroOrOne),
            ("orphan", Cardinality::ZeroOrMore, Cardinality::ExactlyOne),
        ]
    );
}

/// Two unique fields give two single-column constraints
#[test]
fn test_two_unique_fields() {
    let document = convert(
        r#"
        model Account {
            email    String @unique
            username String @unique
        }
    "#,
    );

    let uniques: Vec<_> = document.tables[0].unique_constraints().collect();
    assert_eq!(uniques.len(), 2);
    assert!(uniques.iter().all(|c| c.columns.len() == 1));
    assert!(document.tables[0].primary_key().is_none());
}

/// A composite key yields exactly one primary key
#[test]
fn test_composite_primary_key() {
    let document = convert(
        r#"
        model Enrollment {
            studentId Int @id
            courseId  Int
            @@id([studentId, courseId])
        }
    "#,
    );

    let keys: Vec<_> = document.tables[0]
        .constraints
        .iter()
        .filter(|c| c.kind == ConstraintType::PrimaryKey)
        .collect();
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].columns, vec!["student_id", "course_id"]);
}

/// Snake casing is deterministic and idempotent
#[test]
fn test_name_transform() {
    assert_eq!(to_snake_case("userId"), "user_id");
    assert_eq!(to_snake_case("ID"), "id");
    assert_eq!(to_snake_case("HTTPServer"), "httpserver");
    for name in ["user_id", "created_at", "post"] {
        assert_eq!(to_snake_case(name), name);
    }
}

/// An identifier is never nullable
#[test]
fn test_optional_id_not_nullable() {
    let document = convert("model Token { id String? @id\n label String? }");
    assert!(!document.tables[0].columns[0].nullable);
    assert!(document.tables[0].columns[1].nullable);
}

/// Relations to undeclared models are dropped without failing
#[test]
fn test_dangling_relation_dropped() {
    let document = convert(
        r#"
        model Post {
            authorId Int
            author   Ghost @relation(fields: [authorId], references: [id])
        }
    "#,
    );
    assert_eq!(document.tables.len(), 1);
    assert!(document.relations.is_empty());
}

/// Syntax errors abort the whole conversion
#[test]
fn test_syntax_error_aborts() {
    let err = convert_source(
        "model A { id Int @id }\nmodel B { id Int @id(",
        &TblsConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, TblsError::Schema(SchemaError::SyntaxError { .. })));
}

// ==================== Serialization ====================

/// The serialized document has the exact tbls shape
#[test]
fn test_document_json_shape() {
    let document = convert(
        r#"
        /// People
        model Person {
            id   Int     @id @default(autoincrement())
            nick String? @unique
            kind Kind    @default(HUMAN)
        }
        enum Kind { HUMAN ROBOT }
    "#,
    );

    let value: serde_json::Value = serde_json::from_str(&document.to_json(true).unwrap()).unwrap();
    assert_eq!(
        value,
        json!({
            "name": "Database Schema",
            "desc": "Generated from Prisma schema",
            "tables": [{
                "name": "person",
                "type": "table",
                "comment": "People",
                "columns": [
                    { "name": "id", "type": "INTEGER", "nullable": false,
                      "default": "autoincrement()", "comment": "" },
                    { "name": "nick", "type": "VARCHAR", "nullable": true,
                      "default": null, "comment": "" },
                    { "name": "kind", "type": "Kind", "nullable": false,
                      "default": "'HUMAN'", "comment": "" }
                ],
                "constraints": [
                    { "name": "person_pkey", "type": "PRIMARY KEY", "def": "PRIMARY KEY (id)",
                      "table": "person", "columns": ["id"] },
                    { "name": "person_nick_unique", "type": "UNIQUE", "def": "UNIQUE (nick)",
                      "table": "person", "columns": ["nick"] }
                ],
                "indexes": []
            }],
            "relations": [],
            "enums": [{ "name": "kind", "values": ["HUMAN", "ROBOT"] }],
            "driver": { "name": "prisma", "database_version": "1.0.0" }
        })
    );

    let round_trip = SchemaDocument::from_json(&document.to_json(false).unwrap()).unwrap();
    assert_eq!(round_trip, document);
}

/// Independent conversions can run on separate threads
#[test]
fn test_parallel_conversions() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let source = format!("model M{i} {{ id Int @id }}");
                convert_source(&source, &TblsConfig::default()).map(|d| d.tables[0].name.clone())
            })
        })
        .collect();

    let names: Vec<String> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();
    assert_eq!(names, vec!["m0", "m1", "m2", "m3"]);
}
