//! Structured fuzzing for schema conversion.
//!
//! Generates well-formed schemas with scalar, enum and relation fields and
//! checks that conversion succeeds and keeps its structural guarantees.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_schema_structured
//! ```

#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use tblsgen_tbls::{ConstraintType, TblsConfig, convert_source};

/// A generated scalar type.
#[derive(Debug, Arbitrary)]
enum FuzzScalar {
    Int,
    String,
    Boolean,
    Float,
    DateTime,
    Json,
    Bytes,
    BigInt,
    Decimal,
}

impl FuzzScalar {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "Int",
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Float => "Float",
            Self::DateTime => "DateTime",
            Self::Json => "Json",
            Self::Bytes => "Bytes",
            Self::BigInt => "BigInt",
            Self::Decimal => "Decimal",
        }
    }
}

/// What a generated field points at.
#[derive(Debug, Arbitrary)]
enum FuzzFieldType {
    Scalar(FuzzScalar),
    /// Index into the generated enums.
    Enum(u8),
    /// Index into the generated models; becomes a foreign key.
    Relation(u8),
}

/// A generated field modifier.
#[derive(Debug, Arbitrary)]
enum FuzzModifier {
    None,
    Optional,
    List,
}

impl FuzzModifier {
    fn suffix(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Optional => "?",
            Self::List => "[]",
        }
    }
}

/// A generated field attribute.
#[derive(Debug, Arbitrary)]
enum FuzzAttribute {
    None,
    Unique,
    Default(FuzzDefault),
    Map(String),
}

/// A generated default value.
#[derive(Debug, Arbitrary)]
enum FuzzDefault {
    Now,
    AutoIncrement,
    Int(i32),
    Bool(bool),
    Str(String),
}

impl FuzzDefault {
    fn render(&self) -> String {
        match self {
            Self::Now => "now()".to_string(),
            Self::AutoIncrement => "autoincrement()".to_string(),
            Self::Int(i) => i.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Str(s) => format!("\"{}\"", sanitize_string(s)),
        }
    }
}

/// A generated field.
#[derive(Debug, Arbitrary)]
struct FuzzField {
    field_type: FuzzFieldType,
    modifier: FuzzModifier,
    attribute: FuzzAttribute,
    documented: bool,
}

/// A generated model.
#[derive(Debug, Arbitrary)]
struct FuzzModel {
    fields: Vec<FuzzField>,
    indexed: bool,
}

/// A generated schema.
#[derive(Debug, Arbitrary)]
struct FuzzSchema {
    models: Vec<FuzzModel>,
    enum_sizes: Vec<u8>,
}

impl FuzzSchema {
    fn render(&self) -> String {
        let model_count = self.models.len().clamp(1, 8);
        let enum_count = self.enum_sizes.len().min(4);
        let mut out = String::new();

        for (m, model) in self.models.iter().take(model_count).enumerate() {
            out.push_str(&format!("model Model{m} {{\n  id Int @id\n"));
            for (f, field) in model.fields.iter().take(16).enumerate() {
                if field.documented {
                    out.push_str(&format!("  /// Field {f}\n"));
                }
                let line = match &field.field_type {
                    FuzzFieldType::Scalar(scalar) => format!(
                        "  field{f} {}{}{}",
                        scalar.as_str(),
                        field.modifier.suffix(),
                        render_attribute(&field.attribute)
                    ),
                    FuzzFieldType::Enum(_) if enum_count == 0 => format!("  field{f} Int"),
                    FuzzFieldType::Enum(e) => format!(
                        "  field{f} Enum{}{}",
                        usize::from(*e) % enum_count,
                        field.modifier.suffix()
                    ),
                    FuzzFieldType::Relation(target) => {
                        let target = usize::from(*target) % model_count;
                        format!(
                            "  ref{f}Id Int\n  ref{f} Model{target}{} @relation(fields: [ref{f}Id], references: [id])",
                            field.modifier.suffix()
                        )
                    }
                };
                out.push_str(&line);
                out.push('\n');
            }
            if model.indexed {
                out.push_str("  @@index([id])\n");
            }
            out.push_str("}\n\n");
        }

        for (e, size) in self.enum_sizes.iter().take(enum_count).enumerate() {
            out.push_str(&format!("enum Enum{e} {{\n"));
            for v in 0..(usize::from(*size) % 6) {
                out.push_str(&format!("  VALUE_{v}\n"));
            }
            out.push_str("}\n\n");
        }

        out
    }
}

fn render_attribute(attribute: &FuzzAttribute) -> String {
    match attribute {
        FuzzAttribute::None => String::new(),
        FuzzAttribute::Unique => " @unique".to_string(),
        FuzzAttribute::Default(value) => format!(" @default({})", value.render()),
        FuzzAttribute::Map(name) => format!(" @map(\"{}\")", sanitize_string(name)),
    }
}

/// Sanitize a string for use in a string literal.
fn sanitize_string(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '"' | '\\' | '\n' | '\r'))
        .take(50)
        .collect()
}

fuzz_target!(|data: &[u8]| {
    let mut unstructured = Unstructured::new(data);
    let Ok(schema) = FuzzSchema::arbitrary(&mut unstructured) else {
        return;
    };
    let source = schema.render();

    let document = match convert_source(&source, &TblsConfig::default()) {
        Ok(document) => document,
        Err(err) => panic!("generated schema failed to convert: {err}\n{source}"),
    };

    for table in &document.tables {
        let keys = table
            .constraints
            .iter()
            .filter(|c| c.kind == ConstraintType::PrimaryKey)
            .count();
        assert_eq!(keys, 1, "every generated model has exactly one key");
    }
    for relation in &document.relations {
        assert_eq!(relation.columns.len(), relation.parent_columns.len());
        assert!(document.table(&relation.parent_table).is_some());
    }
});
