//! CLI error types and result alias.

use miette::Diagnostic;
use thiserror::Error;

use tblsgen_schema::SchemaError;
use tblsgen_tbls::TblsError;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(tblsgen::io))]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(code(tblsgen::config))]
    Config(String),

    /// Schema parsing error
    #[error("Schema error: {0}")]
    #[diagnostic(code(tblsgen::schema))]
    Schema(String),

    /// Conversion or serialization error
    #[error("Conversion error: {0}")]
    #[diagnostic(code(tblsgen::convert))]
    Convert(String),

    /// Command error
    #[error("Command error: {0}")]
    #[diagnostic(code(tblsgen::command))]
    Command(String),
}

impl From<SchemaError> for CliError {
    fn from(err: SchemaError) -> Self {
        CliError::Schema(render_chain(&err))
    }
}

impl From<TblsError> for CliError {
    fn from(err: TblsError) -> Self {
        match err {
            TblsError::Schema(e) => e.into(),
            TblsError::ConfigError { .. } | TblsError::TomlError { .. } => {
                CliError::Config(render_chain(&err))
            }
            TblsError::IoError { .. } => CliError::Command(render_chain(&err)),
            TblsError::SerializeError { .. } => CliError::Convert(render_chain(&err)),
        }
    }
}

/// Render an error followed by its sources.
fn render_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
