//! Error types for schema lexing, parsing and description loading.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

use crate::ast::Span;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while turning input into a schema AST.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(tblsgen::schema::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Syntax error in the schema source.
    #[error("syntax error at {line}:{column}: {message}")]
    #[diagnostic(code(tblsgen::schema::syntax_error))]
    SyntaxError {
        #[source_code]
        src: String,
        #[label("error here")]
        span: miette::SourceSpan,
        message: String,
        line: u32,
        column: u32,
    },

    /// Unrecognized character, only reported when strict lexing is enabled.
    #[error("unexpected character {character:?} at {line}:{column}")]
    #[diagnostic(
        code(tblsgen::schema::lex_error),
        help("disable strict lexing to skip unrecognized characters")
    )]
    LexError {
        #[source_code]
        src: String,
        #[label("unrecognized character")]
        span: miette::SourceSpan,
        character: char,
        line: u32,
        column: u32,
    },

    /// The normalized model description is not valid JSON for the expected shape.
    #[error("failed to read model description")]
    #[diagnostic(code(tblsgen::schema::description_error))]
    DescriptionError {
        #[source]
        source: serde_json::Error,
    },

    /// The normalized model description is structurally unusable.
    #[error("invalid model description: {message}")]
    #[diagnostic(code(tblsgen::schema::invalid_description))]
    InvalidDescription { message: String },
}

impl SchemaError {
    /// Create a syntax error with source location.
    pub fn syntax(
        src: impl Into<String>,
        span: Span,
        line: u32,
        column: u32,
        message: impl Into<String>,
    ) -> Self {
        Self::SyntaxError {
            src: src.into(),
            span: (span.start, span.len()).into(),
            message: message.into(),
            line,
            column,
        }
    }

    /// Create a lex error for an unrecognized character.
    pub fn lex(src: impl Into<String>, offset: usize, character: char, line: u32, column: u32) -> Self {
        Self::LexError {
            src: src.into(),
            span: (offset, character.len_utf8()).into(),
            character,
            line,
            column,
        }
    }

    /// Create an invalid description error.
    pub fn invalid_description(message: impl Into<String>) -> Self {
        Self::InvalidDescription {
            message: message.into(),
        }
    }

    /// Line and column of the offending token, for positional errors.
    pub fn position(&self) -> Option<(u32, u32)> {
        match self {
            Self::SyntaxError { line, column, .. } | Self::LexError { line, column, .. } => {
                Some((*line, *column))
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(source: serde_json::Error) -> Self {
        Self::DescriptionError { source }
    }
}
