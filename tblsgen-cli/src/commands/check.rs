//! `tblsgen check` command - Parse a schema and report what it declares.

use std::path::PathBuf;

use tblsgen_schema::{ParseOptions, Schema, parse_description, parse_schema_with};
use tblsgen_tbls::{InputFormat, SchemaLookup, relation::extract_relations};

use crate::cli::CheckArgs;
use crate::config::{load_config, resolve_path};
use crate::error::{CliError, CliResult};
use crate::output::{self, success, warn};

/// Run the check command
pub async fn run(args: CheckArgs, config_path: Option<PathBuf>) -> CliResult<()> {
    output::header("Check Schema");

    let config = load_config(config_path.as_deref())?;
    let schema_path = resolve_path(args.schema, &config.input.path);
    let format = args.format.map(InputFormat::from).unwrap_or(config.input.format);

    if !schema_path.exists() {
        return Err(CliError::Config(format!(
            "Schema file not found: {}",
            schema_path.display()
        )));
    }

    output::kv("Schema", &schema_path.display().to_string());
    output::kv("Format", format.as_str());
    output::newline();

    output::step(1, 2, "Parsing schema...");
    let source = tokio::fs::read_to_string(&schema_path).await?;
    let schema = match format {
        InputFormat::Dsl => {
            let options = ParseOptions::new().with_strict_lexing(config.lexer.strict);
            parse_schema_with(&source, options)?
        }
        InputFormat::Description => parse_description(&source)?,
    };

    output::step(2, 2, "Resolving relations...");
    let unresolved = unresolved_relations(&schema);
    let lookup = SchemaLookup::new(&schema);
    let relations = extract_relations(&schema, &lookup);
    output::newline();

    if unresolved.is_empty() {
        success("Schema is valid!");
    } else {
        success("Schema is valid with warnings:");
        output::newline();
        for message in &unresolved {
            warn(message);
        }
    }
    output::newline();

    let stats = schema.stats();
    output::section("Schema Summary");
    output::kv("Models", &stats.model_count.to_string());
    output::kv("Enums", &stats.enum_count.to_string());
    output::kv("Total Fields", &stats.field_count.to_string());
    output::kv("Relations", &relations.len().to_string());

    Ok(())
}

/// Relation fields whose target model is not declared. These are dropped
/// from the generated document.
fn unresolved_relations(schema: &Schema) -> Vec<String> {
    let lookup = SchemaLookup::new(schema);
    schema
        .models
        .iter()
        .flat_map(|model| {
            model
                .fields
                .iter()
                .filter(|f| f.relation().is_some_and(|r| r.is_foreign_key()))
                .filter(|f| lookup.model(f.field_type.type_name()).is_none())
                .map(move |f| {
                    format!(
                        "Relation '{}' in model '{}' references unknown model '{}'",
                        f.name(),
                        model.name(),
                        f.field_type.type_name()
                    )
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tblsgen_schema::parse_schema;

    #[test]
    fn test_unresolved_relations() {
        let schema = parse_schema(
            r#"
            model Post {
                authorId Int
                author   Ghost @relation(fields: [authorId], references: [id])
            }
            "#,
        )
        .unwrap();
        let found = unresolved_relations(&schema);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("'Ghost'"));
    }

    #[test]
    fn test_resolved_relations_are_silent() {
        let schema = parse_schema(
            r#"
            model User { id Int @id }
            model Post {
                authorId Int
                author   User @relation(fields: [authorId], references: [id])
            }
            "#,
        )
        .unwrap();
        assert!(unresolved_relations(&schema).is_empty());
    }
}
