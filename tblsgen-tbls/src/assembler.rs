//! Schema document assembly.
//!
//! Runs the structural converter and relation extractor over a parsed
//! schema and stamps the result with document metadata.

use tblsgen_schema::{ParseOptions, Schema, parse_description, parse_schema_with};
use tracing::debug;

use crate::config::{InputFormat, TblsConfig};
use crate::document::{Driver, SchemaDocument};
use crate::enums::convert_enum;
use crate::error::TblsResult;
use crate::lookup::SchemaLookup;
use crate::relation::extract_relations;
use crate::table::convert_model;

/// Descriptive metadata attached to every document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
    pub name: String,
    pub desc: String,
    pub driver: Driver,
}

impl Default for DocumentMeta {
    fn default() -> Self {
        TblsConfig::default().document_meta()
    }
}

/// Convert a parsed schema into a document.
pub fn convert_schema(schema: &Schema, meta: &DocumentMeta) -> SchemaDocument {
    let lookup = SchemaLookup::new(schema);

    let tables = schema
        .models
        .iter()
        .map(|model| convert_model(model, &lookup))
        .collect();
    let relations = extract_relations(schema, &lookup);
    let enums = schema.enums.iter().map(convert_enum).collect();

    let document = SchemaDocument {
        name: meta.name.clone(),
        desc: meta.desc.clone(),
        tables,
        relations,
        enums,
        driver: meta.driver.clone(),
    };

    debug!(
        tables = document.tables.len(),
        relations = document.relations.len(),
        enums = document.enums.len(),
        "assembled schema document"
    );
    document
}

/// Parse schema DSL text and convert it.
pub fn convert_source(source: &str, config: &TblsConfig) -> TblsResult<SchemaDocument> {
    let options = ParseOptions::new().with_strict_lexing(config.lexer.strict);
    let schema = parse_schema_with(source, options)?;
    Ok(convert_schema(&schema, &config.document_meta()))
}

/// Read a normalized JSON model description and convert it.
pub fn convert_description(json: &str, config: &TblsConfig) -> TblsResult<SchemaDocument> {
    let schema = parse_description(json)?;
    Ok(convert_schema(&schema, &config.document_meta()))
}

/// Convert input in the given format.
pub fn convert_input(
    input: &str,
    format: InputFormat,
    config: &TblsConfig,
) -> TblsResult<SchemaDocument> {
    match format {
        InputFormat::Dsl => convert_source(input, config),
        InputFormat::Description => convert_description(input, config),
    }
}
