//! Type definitions for the schema AST.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A span in the source code for error reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Start offset in bytes.
    pub start: usize,
    /// End offset in bytes.
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Get the length of the span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge two spans into one that covers both.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

/// An identifier with source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ident {
    /// The identifier name.
    pub name: SmolStr,
    /// Source location.
    pub span: Span,
}

impl Ident {
    /// Create a new identifier.
    pub fn new(name: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// Create an identifier that has no source location (built by an adapter).
    pub fn synthetic(name: impl Into<SmolStr>) -> Self {
        Self::new(name, Span::default())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarType {
    /// Text.
    String,
    /// Boolean.
    Boolean,
    /// 32-bit integer.
    Int,
    /// 64-bit integer.
    BigInt,
    /// Floating point.
    Float,
    /// Arbitrary precision decimal.
    Decimal,
    /// Date and time.
    DateTime,
    /// JSON document.
    Json,
    /// Binary data.
    Bytes,
}

impl ScalarType {
    /// Parse a scalar type from its schema name. Matching is case sensitive.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "String" => Some(Self::String),
            "Boolean" => Some(Self::Boolean),
            "Int" => Some(Self::Int),
            "BigInt" => Some(Self::BigInt),
            "Float" => Some(Self::Float),
            "Decimal" => Some(Self::Decimal),
            "DateTime" => Some(Self::DateTime),
            "Json" => Some(Self::Json),
            "Bytes" => Some(Self::Bytes),
            _ => None,
        }
    }

    /// Get the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Int => "Int",
            Self::BigInt => "BigInt",
            Self::Float => "Float",
            Self::Decimal => "Decimal",
            Self::DateTime => "DateTime",
            Self::Json => "Json",
            Self::Bytes => "Bytes",
        }
    }
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse classification of a field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Built-in scalar.
    Scalar,
    /// Reference to another model.
    Object,
    /// Reference to an enum.
    Enum,
    /// Database-specific type the schema language cannot express.
    Unsupported,
}

/// A field type in the schema.
///
/// The parser never produces [`FieldType::Enum`]: every non-scalar name is an
/// [`FieldType::Object`] until the converter checks it against declared enums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// A scalar type (Int, String, etc.).
    Scalar(ScalarType),
    /// A reference to a model (relation).
    Object(SmolStr),
    /// A reference to an enum defined in the schema.
    Enum(SmolStr),
    /// An `Unsupported("...")` type.
    Unsupported(SmolStr),
    /// A scalar outside the built-in set, kept under its raw name.
    Native(SmolStr),
}

impl FieldType {
    /// Classify a type name as scalar or object.
    pub fn from_type_name(name: &str) -> Self {
        match ScalarType::from_str(name) {
            Some(scalar) => Self::Scalar(scalar),
            None => Self::Object(SmolStr::new(name)),
        }
    }

    /// Get the kind of this type.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Scalar(_) | Self::Native(_) => FieldKind::Scalar,
            Self::Object(_) => FieldKind::Object,
            Self::Enum(_) => FieldKind::Enum,
            Self::Unsupported(_) => FieldKind::Unsupported,
        }
    }

    /// Check if this is a scalar type.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Native(_))
    }

    /// Check if this is a relation to another model.
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Check if this is an enum type.
    pub fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }

    /// Get the type name as a string.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Scalar(s) => s.as_str(),
            Self::Object(name) | Self::Enum(name) | Self::Unsupported(name) | Self::Native(name) => {
                name.as_str()
            }
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported(name) => write!(f, "Unsupported({:?})", name.as_str()),
            _ => write!(f, "{}", self.type_name()),
        }
    }
}

/// Modifier for field types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeModifier {
    /// Required field (no modifier).
    #[default]
    Required,
    /// Optional field (`?` suffix).
    Optional,
    /// List field (`[]` suffix).
    List,
    /// Optional list field (`[]?` suffix).
    OptionalList,
}

impl TypeModifier {
    /// Build a modifier from the two flags.
    pub fn from_flags(is_list: bool, is_optional: bool) -> Self {
        match (is_list, is_optional) {
            (false, false) => Self::Required,
            (false, true) => Self::Optional,
            (true, false) => Self::List,
            (true, true) => Self::OptionalList,
        }
    }

    /// Check if the field is optional.
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional | Self::OptionalList)
    }

    /// Check if the field is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List | Self::OptionalList)
    }
}

/// A documentation comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documentation {
    /// The documentation text (without `///` prefix), lines joined by `\n`.
    pub text: String,
    /// Source location.
    pub span: Span,
}

impl Documentation {
    /// Create new documentation.
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }
}
