//! Abstract Syntax Tree (AST) types for schemas.
//!
//! Both the text parser and the model-description adapter produce these
//! types, so everything downstream is written against one representation.

mod attribute;
mod field;
mod model;
mod schema;
mod types;

pub use attribute::*;
pub use field::*;
pub use model::*;
pub use schema::*;
pub use types::*;
