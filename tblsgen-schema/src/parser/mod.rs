//! Schema parser for Prisma-style schema files.

mod grammar;

use std::path::Path;

use tracing::debug;

use crate::ast::*;
use crate::error::{SchemaError, SchemaResult};
use crate::lexer::{Lexer, Token, tokenize};

use grammar::Parser;

/// Options controlling how source text is turned into a schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail on unrecognized characters instead of skipping them.
    pub strict_lexing: bool,
}

impl ParseOptions {
    /// Create default (permissive) options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable strict lexing.
    pub fn with_strict_lexing(mut self, strict: bool) -> Self {
        self.strict_lexing = strict;
        self
    }
}

/// Parse an already tokenized schema.
///
/// `src` is the text the tokens came from; it is only used to render
/// diagnostics. The first unexpected token aborts the parse.
pub fn parse(tokens: Vec<Token>, src: &str) -> SchemaResult<Schema> {
    let schema = Parser::new(tokens, src).parse_schema()?;
    debug!(
        models = schema.models.len(),
        enums = schema.enums.len(),
        "parsed schema"
    );
    Ok(schema)
}

/// Parse a schema from a string.
pub fn parse_schema(input: &str) -> SchemaResult<Schema> {
    parse(tokenize(input), input)
}

/// Parse a schema from a string with explicit options.
pub fn parse_schema_with(input: &str, options: ParseOptions) -> SchemaResult<Schema> {
    let tokens = Lexer::new(input)
        .strict(options.strict_lexing)
        .tokenize()?;
    parse(tokens, input)
}

/// Parse a schema from a file.
pub fn parse_schema_file(path: impl AsRef<Path>) -> SchemaResult<Schema> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_schema(&content)
}
