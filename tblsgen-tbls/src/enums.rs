//! Enum conversion.

use tblsgen_schema::Enum as SchemaEnum;
use tracing::trace;

use crate::document::Enum;
use crate::naming::{enum_name, enum_value_name};

/// Convert an enum declaration. Values keep their declared order.
pub fn convert_enum(e: &SchemaEnum) -> Enum {
    let converted = Enum {
        name: enum_name(e),
        values: e.values.iter().map(enum_value_name).collect(),
    };
    trace!(name = %converted.name, values = converted.values.len(), "converted enum");
    converted
}
