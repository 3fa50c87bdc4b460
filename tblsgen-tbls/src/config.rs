//! Configuration file parsing for `tblsgen.toml`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::assembler::DocumentMeta;
use crate::document::Driver;
use crate::error::{TblsError, TblsResult};

/// Main configuration structure for `tblsgen.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TblsConfig {
    /// Document metadata.
    #[serde(default)]
    pub document: DocumentConfig,

    /// Driver identity written into the document.
    #[serde(default)]
    pub driver: DriverConfig,

    /// Lexer behavior.
    #[serde(default)]
    pub lexer: LexerConfig,

    /// Where to read the schema from.
    #[serde(default)]
    pub input: InputConfig,

    /// Where and how to write the document.
    #[serde(default)]
    pub output: OutputConfig,
}

impl TblsConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> TblsResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TblsError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> TblsResult<Self> {
        let expanded = expand_env_vars(content)?;
        toml::from_str(&expanded).map_err(|e| TblsError::TomlError { source: e })
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> TblsResult<String> {
        toml::to_string_pretty(self).map_err(|e| TblsError::config(e.to_string()))
    }

    /// Metadata the assembler stamps onto the document.
    pub fn document_meta(&self) -> DocumentMeta {
        DocumentMeta {
            name: self.document.name.clone(),
            desc: self.document.desc.clone(),
            driver: Driver::from(&self.driver),
        }
    }
}

/// `[document]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentConfig {
    /// Document name.
    #[serde(default = "default_document_name")]
    pub name: String,

    /// Document description.
    #[serde(default = "default_document_desc")]
    pub desc: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            name: default_document_name(),
            desc: default_document_desc(),
        }
    }
}

fn default_document_name() -> String {
    "Database Schema".to_string()
}

fn default_document_desc() -> String {
    "Generated from Prisma schema".to_string()
}

/// `[driver]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DriverConfig {
    #[serde(default = "default_driver_name")]
    pub name: String,

    #[serde(default = "default_database_version")]
    pub database_version: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            name: default_driver_name(),
            database_version: default_database_version(),
        }
    }
}

impl From<&DriverConfig> for Driver {
    fn from(config: &DriverConfig) -> Self {
        Self {
            name: config.name.clone(),
            database_version: config.database_version.clone(),
        }
    }
}

fn default_driver_name() -> String {
    "prisma".to_string()
}

fn default_database_version() -> String {
    "1.0.0".to_string()
}

/// `[lexer]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LexerConfig {
    /// Fail on unknown characters instead of skipping them.
    #[serde(default)]
    pub strict: bool,
}

/// Input format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Schema DSL text.
    #[default]
    Dsl,
    /// Normalized JSON model description.
    Description,
}

impl InputFormat {
    /// Get the configuration name of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dsl => "dsl",
            Self::Description => "description",
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `[input]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    #[serde(default = "default_input_path")]
    pub path: String,

    #[serde(default)]
    pub format: InputFormat,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
            format: InputFormat::default(),
        }
    }
}

fn default_input_path() -> String {
    "schema.prisma".to_string()
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,

    /// Indent the JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            pretty: true,
        }
    }
}

fn default_output_path() -> String {
    "schema.json".to_string()
}

fn default_true() -> bool {
    true
}

/// Expand environment variables in the format `${VAR_NAME}`.
///
/// Unset variables are left as written.
fn expand_env_vars(content: &str) -> TblsResult<String> {
    let re = regex_lite::Regex::new(r"\$\{([^}]+)\}")
        .map_err(|e| TblsError::config(format!("invalid interpolation pattern: {e}")))?;

    let expanded = re.replace_all(content, |caps: &regex_lite::Captures<'_>| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    });
    Ok(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = TblsConfig::default();
        assert_eq!(config.document.name, "Database Schema");
        assert_eq!(config.document.desc, "Generated from Prisma schema");
        assert_eq!(config.driver.name, "prisma");
        assert_eq!(config.driver.database_version, "1.0.0");
        assert!(!config.lexer.strict);
        assert_eq!(config.input.path, "schema.prisma");
        assert_eq!(config.input.format, InputFormat::Dsl);
        assert_eq!(config.output.path, "schema.json");
        assert!(config.output.pretty);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(TblsConfig::from_str("").unwrap(), TblsConfig::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
            [document]
            name = "Shop"

            [input]
            path = "dmmf.json"
            format = "description"

            [output]
            pretty = false
        "#;

        let config = TblsConfig::from_str(toml).unwrap();
        assert_eq!(config.document.name, "Shop");
        assert_eq!(config.document.desc, "Generated from Prisma schema");
        assert_eq!(config.input.format, InputFormat::Description);
        assert_eq!(config.input.path, "dmmf.json");
        assert_eq!(config.output.path, "schema.json");
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = TblsConfig::from_str("[document]\ntitle = \"x\"").unwrap_err();
        assert!(matches!(err, TblsError::TomlError { .. }));

        let err = TblsConfig::from_str("[database]\nurl = \"x\"").unwrap_err();
        assert!(matches!(err, TblsError::TomlError { .. }));
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(TblsConfig::from_str("[input]\nformat = \"yaml\"").is_err());
    }

    #[test]
    fn test_document_meta() {
        let config = TblsConfig::from_str(
            "[document]\nname = \"Shop\"\n[driver]\ndatabase_version = \"5.2.0\"",
        )
        .unwrap();
        let meta = config.document_meta();
        assert_eq!(meta.name, "Shop");
        assert_eq!(meta.desc, "Generated from Prisma schema");
        assert_eq!(meta.driver.name, "prisma");
        assert_eq!(meta.driver.database_version, "5.2.0");
    }

    #[test]
    fn test_to_toml_round_trips() {
        let mut config = TblsConfig::default();
        config.lexer.strict = true;
        let text = config.to_toml().unwrap();
        assert_eq!(TblsConfig::from_str(&text).unwrap(), config);
    }

    #[test]
    fn test_env_var_expansion() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var("TBLSGEN_TEST_DOC_NAME", "From Env");
        }
        let expanded = expand_env_vars("name = \"${TBLSGEN_TEST_DOC_NAME}\"").unwrap();
        assert_eq!(expanded, "name = \"From Env\"");
        unsafe {
            std::env::remove_var("TBLSGEN_TEST_DOC_NAME");
        }
    }

    #[test]
    fn test_unset_env_var_left_alone() {
        let expanded = expand_env_vars("name = \"${TBLSGEN_TEST_SURELY_UNSET}\"").unwrap();
        assert_eq!(expanded, "name = \"${TBLSGEN_TEST_SURELY_UNSET}\"");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tblsgen.toml");
        std::fs::write(&path, "[lexer]\nstrict = true\n").unwrap();

        let config = TblsConfig::from_file(&path).unwrap();
        assert!(config.lexer.strict);

        let missing = TblsConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, TblsError::IoError { .. }));
    }
}
