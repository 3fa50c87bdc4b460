//! Attribute definitions for the schema AST.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{Ident, Span};

/// An attribute argument value.
///
/// Consumers match on the variant rather than probing the value at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// A string literal.
    String(String),
    /// A numeric literal.
    Number(f64),
    /// A boolean literal.
    Boolean(bool),
    /// A bracketed list of names, e.g. `[firstName, lastName]`.
    StringList(Vec<SmolStr>),
    /// A call expression such as `autoincrement()`. Call arguments are not kept.
    FunctionCall(SmolStr),
    /// A bare identifier, e.g. the `USER` in `@default(USER)`.
    Ident(SmolStr),
}

impl AttributeValue {
    /// Try to get the value as a string.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as a list of names.
    pub fn as_list(&self) -> Option<&[SmolStr]> {
        match self {
            Self::StringList(items) => Some(items),
            _ => None,
        }
    }
}

/// An attribute argument (named or positional).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeArg {
    /// Argument name (None for positional arguments).
    pub name: Option<Ident>,
    /// Argument value.
    pub value: AttributeValue,
    /// Source location.
    pub span: Span,
}

impl AttributeArg {
    /// Create a positional argument.
    pub fn positional(value: AttributeValue, span: Span) -> Self {
        Self {
            name: None,
            value,
            span,
        }
    }

    /// Create a named argument.
    pub fn named(name: Ident, value: AttributeValue, span: Span) -> Self {
        Self {
            name: Some(name),
            value,
            span,
        }
    }

    /// Check if this is a positional argument.
    pub fn is_positional(&self) -> bool {
        self.name.is_none()
    }
}

/// An attribute applied to a field, model, enum, or enum value.
///
/// Whether it was written `@name` or `@@name` follows from where it is stored:
/// field and enum-value attributes are single `@`, model and enum attributes
/// are `@@`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name without the `@` prefix. Namespaced names keep their dots (`db.VarChar`).
    pub name: Ident,
    /// Attribute arguments in source order.
    pub args: Vec<AttributeArg>,
    /// Source location (including `@`).
    pub span: Span,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: Ident, args: Vec<AttributeArg>, span: Span) -> Self {
        Self { name, args, span }
    }

    /// Create an attribute with no arguments.
    pub fn simple(name: Ident, span: Span) -> Self {
        Self {
            name,
            args: vec![],
            span,
        }
    }

    /// Get the attribute name as a string.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Check if this attribute has the given name.
    pub fn is(&self, name: &str) -> bool {
        self.name.as_str() == name
    }

    /// Get the first argument, positional or named.
    pub fn first_arg(&self) -> Option<&AttributeValue> {
        self.args.first().map(|a| &a.value)
    }

    /// Get the first positional argument.
    pub fn first_positional(&self) -> Option<&AttributeValue> {
        self.args
            .iter()
            .find(|a| a.is_positional())
            .map(|a| &a.value)
    }

    /// Get a named argument by name.
    pub fn get_arg(&self, name: &str) -> Option<&AttributeValue> {
        self.args
            .iter()
            .find(|a| a.name.as_ref().map(|n| n.as_str()) == Some(name))
            .map(|a| &a.value)
    }

    /// Field list of a composite attribute (`@@id`, `@@unique`, `@@index`).
    ///
    /// Accepts both `@@index([a, b])` and `@@index(fields: [a, b])`.
    pub fn field_list(&self) -> Option<&[SmolStr]> {
        self.get_arg("fields")
            .or_else(|| self.first_positional())
            .and_then(AttributeValue::as_list)
    }

    /// The string given as first argument, used by `@map`/`@@map`.
    pub fn string_arg(&self) -> Option<&str> {
        self.first_arg().and_then(AttributeValue::as_string)
    }
}

/// Find the first attribute with the given name.
pub fn find_attribute<'a>(attributes: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attributes.iter().find(|a| a.is(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> AttributeValue {
        AttributeValue::StringList(items.iter().map(|s| SmolStr::new(*s)).collect())
    }

    // ==================== AttributeValue Tests ====================

    #[test]
    fn test_attribute_value_accessors() {
        assert_eq!(AttributeValue::String("x".into()).as_string(), Some("x"));
        assert_eq!(list(&["a", "b"]).as_list().map(|l| l.len()), Some(2));
    }

    #[test]
    fn test_attribute_value_accessors_wrong_variant() {
        let value = AttributeValue::FunctionCall("now".into());
        assert!(value.as_string().is_none());
        assert!(value.as_list().is_none());
    }

    // ==================== AttributeArg Tests ====================

    #[test]
    fn test_attribute_arg_positional() {
        let arg = AttributeArg::positional(AttributeValue::Number(1.0), Span::new(0, 1));
        assert!(arg.is_positional());
    }

    #[test]
    fn test_attribute_arg_named() {
        let arg = AttributeArg::named(
            Ident::new("name", Span::new(0, 4)),
            AttributeValue::String("idx".into()),
            Span::new(0, 11),
        );
        assert!(!arg.is_positional());
        assert_eq!(arg.name.as_ref().map(|n| n.as_str()), Some("name"));
    }

    // ==================== Attribute Tests ====================

    #[test]
    fn test_attribute_simple() {
        let attr = Attribute::simple(Ident::new("id", Span::new(1, 3)), Span::new(0, 3));
        assert!(attr.is("id"));
        assert!(!attr.is("unique"));
        assert!(attr.args.is_empty());
        assert!(attr.first_arg().is_none());
    }

    #[test]
    fn test_attribute_get_arg() {
        let attr = Attribute::new(
            Ident::synthetic("relation"),
            vec![
                AttributeArg::named(Ident::synthetic("fields"), list(&["authorId"]), Span::default()),
                AttributeArg::named(Ident::synthetic("references"), list(&["id"]), Span::default()),
            ],
            Span::default(),
        );

        assert_eq!(attr.get_arg("references"), Some(&list(&["id"])));
        assert!(attr.get_arg("onDelete").is_none());
    }

    #[test]
    fn test_attribute_field_list_positional() {
        let attr = Attribute::new(
            Ident::synthetic("index"),
            vec![AttributeArg::positional(list(&["email", "name"]), Span::default())],
            Span::default(),
        );
        let fields: Vec<&str> = attr.field_list().unwrap_or_default().iter().map(|s| s.as_str()).collect();
        assert_eq!(fields, vec!["email", "name"]);
    }

    #[test]
    fn test_attribute_field_list_named_after_name() {
        let attr = Attribute::new(
            Ident::synthetic("index"),
            vec![
                AttributeArg::named(
                    Ident::synthetic("name"),
                    AttributeValue::String("by_email".into()),
                    Span::default(),
                ),
                AttributeArg::named(Ident::synthetic("fields"), list(&["email"]), Span::default()),
            ],
            Span::default(),
        );
        assert_eq!(attr.field_list().map(|l| l.len()), Some(1));
    }

    #[test]
    fn test_attribute_string_arg() {
        let map = Attribute::new(
            Ident::synthetic("map"),
            vec![AttributeArg::positional(
                AttributeValue::String("users".into()),
                Span::default(),
            )],
            Span::default(),
        );
        assert_eq!(map.string_arg(), Some("users"));

        let not_string = Attribute::new(
            Ident::synthetic("map"),
            vec![AttributeArg::positional(AttributeValue::Number(3.0), Span::default())],
            Span::default(),
        );
        assert_eq!(not_string.string_arg(), None);
    }

    #[test]
    fn test_find_attribute() {
        let attrs = vec![
            Attribute::simple(Ident::synthetic("id"), Span::default()),
            Attribute::simple(Ident::synthetic("unique"), Span::default()),
        ];
        assert!(find_attribute(&attrs, "unique").is_some());
        assert!(find_attribute(&attrs, "map").is_none());
    }
}
