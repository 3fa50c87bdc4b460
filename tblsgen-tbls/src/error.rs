//! Error types for conversion and configuration.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

use tblsgen_schema::SchemaError;

/// Result type for conversion operations.
pub type TblsResult<T> = Result<T, TblsError>;

/// Errors that can occur while producing a schema document.
#[derive(Error, Debug, Diagnostic)]
pub enum TblsError {
    /// The input could not be turned into a schema.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] SchemaError),

    /// Error reading or writing a file.
    #[error("failed to access file: {path}")]
    #[diagnostic(code(tblsgen::tbls::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration value.
    #[error("configuration error: {message}")]
    #[diagnostic(code(tblsgen::tbls::config_error))]
    ConfigError { message: String },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(tblsgen::tbls::toml_error))]
    TomlError {
        #[source]
        source: toml::de::Error,
    },

    /// The document could not be serialized.
    #[error("failed to serialize schema document")]
    #[diagnostic(code(tblsgen::tbls::serialize_error))]
    SerializeError {
        #[source]
        source: serde_json::Error,
    },
}

impl TblsError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(unused_assignments)]
mod tests {
    use super::*;

    #[test]
    fn test_from_schema_error_is_transparent() {
        let err: TblsError = SchemaError::invalid_description("no models").into();
        assert!(matches!(err, TblsError::Schema(_)));
        assert_eq!(err.to_string(), "invalid model description: no models");
    }

    #[test]
    fn test_config_error_display() {
        let err = TblsError::config("bad value");
        assert_eq!(err.to_string(), "configuration error: bad value");
    }

    #[test]
    fn test_io_error_display() {
        let err = TblsError::IoError {
            path: "out/schema.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("out/schema.json"));
    }

    #[test]
    fn test_toml_error() {
        let source = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err = TblsError::TomlError { source };
        assert_eq!(err.to_string(), "failed to parse TOML");
    }
}
