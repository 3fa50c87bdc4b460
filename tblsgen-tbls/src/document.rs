//! The tbls schema document model.
//!
//! Field names and field order follow the tbls JSON schema so the
//! serialized output can be fed to `tbls` directly.

use serde::{Deserialize, Serialize};

use crate::config::DriverConfig;
use crate::error::{TblsError, TblsResult};

/// The kind string every table carries.
pub const TABLE_KIND: &str = "table";

/// A complete schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Document name.
    pub name: String,
    /// Document description.
    pub desc: String,
    /// One table per model.
    pub tables: Vec<Table>,
    /// Foreign-key relations. Always present, possibly empty.
    pub relations: Vec<Relation>,
    /// Enums. Always present, possibly empty.
    pub enums: Vec<Enum>,
    /// Identity of the producing driver.
    pub driver: Driver,
}

impl SchemaDocument {
    /// Get a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self, pretty: bool) -> TblsResult<String> {
        let result = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        result.map_err(|source| TblsError::SerializeError { source })
    }

    /// Read a document back from JSON.
    pub fn from_json(text: &str) -> TblsResult<Self> {
        serde_json::from_str(text).map_err(|source| TblsError::SerializeError { source })
    }
}

/// A table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    /// Always [`TABLE_KIND`].
    #[serde(rename = "type")]
    pub kind: String,
    /// Model documentation, or empty.
    pub comment: String,
    pub columns: Vec<Column>,
    pub constraints: Vec<Constraint>,
    pub indexes: Vec<Index>,
}

impl Table {
    /// Create an empty table.
    pub fn new(name: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TABLE_KIND.to_string(),
            comment: comment.into(),
            columns: Vec::new(),
            constraints: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The primary key constraint, if any.
    pub fn primary_key(&self) -> Option<&Constraint> {
        self.constraints
            .iter()
            .find(|c| c.kind == ConstraintType::PrimaryKey)
    }

    /// All unique constraints.
    pub fn unique_constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints
            .iter()
            .filter(|c| c.kind == ConstraintType::Unique)
    }
}

/// A column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    pub nullable: bool,
    /// Rendered default expression; `null` when there is none.
    pub default: Option<String>,
    /// Field documentation, or empty.
    pub comment: String,
}

/// Constraint kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintType {
    #[serde(rename = "PRIMARY KEY")]
    PrimaryKey,
    #[serde(rename = "UNIQUE")]
    Unique,
}

impl ConstraintType {
    /// SQL keyword for the constraint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrimaryKey => "PRIMARY KEY",
            Self::Unique => "UNIQUE",
        }
    }
}

/// A table constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ConstraintType,
    pub def: String,
    pub table: String,
    pub columns: Vec<String>,
}

impl Constraint {
    /// Primary key named `<table>_pkey`.
    pub fn primary_key(table: &str, columns: Vec<String>) -> Self {
        Self::build(ConstraintType::PrimaryKey, format!("{table}_pkey"), table, columns)
    }

    /// Unique constraint named `<table>_<col1>_<col2>..._unique`.
    pub fn unique(table: &str, columns: Vec<String>) -> Self {
        let name = format!("{table}_{}_unique", columns.join("_"));
        Self::build(ConstraintType::Unique, name, table, columns)
    }

    fn build(kind: ConstraintType, name: String, table: &str, columns: Vec<String>) -> Self {
        Self {
            name,
            kind,
            def: format!("{} ({})", kind.as_str(), columns.join(", ")),
            table: table.to_string(),
            columns,
        }
    }
}

/// A secondary index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub def: String,
    pub table: String,
    pub columns: Vec<String>,
}

impl Index {
    /// Build an index; without an explicit name it is `<table>_<cols>_idx`.
    pub fn new(table: &str, columns: Vec<String>, name: Option<String>) -> Self {
        let name = name.unwrap_or_else(|| format!("{table}_{}_idx", columns.join("_")));
        Self {
            def: format!("CREATE INDEX {name} ON {table} ({})", columns.join(", ")),
            name,
            table: table.to_string(),
            columns,
        }
    }
}

/// Multiplicity of one side of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    ZeroOrOne,
    ExactlyOne,
    ZeroOrMore,
    OneOrMore,
}

impl Cardinality {
    /// Cardinality implied by a field's list/optional modifiers.
    pub fn from_modifiers(is_list: bool, is_optional: bool) -> Self {
        if is_list {
            Self::ZeroOrMore
        } else if is_optional {
            Self::ZeroOrOne
        } else {
            Self::ExactlyOne
        }
    }

    /// Get the serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ZeroOrOne => "zero_or_one",
            Self::ExactlyOne => "exactly_one",
            Self::ZeroOrMore => "zero_or_more",
            Self::OneOrMore => "one_or_more",
        }
    }
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A foreign-key relation between two tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub table: String,
    pub columns: Vec<String>,
    pub cardinality: Cardinality,
    pub parent_table: String,
    pub parent_columns: Vec<String>,
    pub parent_cardinality: Cardinality,
    pub def: String,
}

impl Relation {
    /// `FOREIGN KEY (<cols>) REFERENCES <parent>(<parent cols>)`
    pub fn foreign_key_def(columns: &[String], parent_table: &str, parent_columns: &[String]) -> String {
        format!(
            "FOREIGN KEY ({}) REFERENCES {}({})",
            columns.join(", "),
            parent_table,
            parent_columns.join(", ")
        )
    }
}

/// An enum and its stored values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    pub values: Vec<String>,
}

/// Driver identity block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub name: String,
    pub database_version: String,
}

impl Default for Driver {
    fn default() -> Self {
        Self::from(&DriverConfig::default())
    }
}
