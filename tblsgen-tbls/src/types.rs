//! Column type mapping and default rendering.

use tblsgen_schema::{AttributeValue, Field};

/// Map a schema type name to its canonical column type.
///
/// Lists are stored as serialized JSON. Names outside the built-in scalar
/// set (enums, unknown types) are returned unchanged.
pub fn map_type(type_name: &str, is_list: bool) -> String {
    if is_list {
        return "JSON".to_string();
    }

    let canonical = match type_name {
        "String" => "VARCHAR",
        "Int" => "INTEGER",
        "BigInt" => "BIGINT",
        "Float" => "FLOAT",
        "Decimal" => "DECIMAL",
        "DateTime" => "DATETIME",
        "Boolean" => "BOOLEAN",
        "Json" => "JSON",
        "Bytes" => "BLOB",
        other => other,
    };
    canonical.to_string()
}

/// Render a `@default(...)` value as it appears in the column's `default`.
pub fn render_default(value: &AttributeValue) -> Option<String> {
    match value {
        AttributeValue::FunctionCall(name) => Some(format!("{name}()")),
        AttributeValue::String(s) => Some(format!("'{s}'")),
        AttributeValue::Ident(s) => Some(format!("'{s}'")),
        // -0 renders as 0
        AttributeValue::Number(n) if *n == 0.0 => Some("0".to_string()),
        AttributeValue::Number(n) => Some(n.to_string()),
        AttributeValue::Boolean(b) => Some(b.to_string()),
        AttributeValue::StringList(_) => None,
    }
}

/// Rendered default of a field, absent when it has no `@default`.
pub fn field_default(field: &Field) -> Option<String> {
    field.default_value().and_then(render_default)
}

/// An identifier column is never nullable, even when marked optional.
pub fn is_nullable(field: &Field) -> bool {
    field.is_optional() && !field.is_id()
}
