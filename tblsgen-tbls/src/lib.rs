//! # tblsgen-tbls
//!
//! Conversion of schema ASTs into [tbls](https://github.com/k1LoW/tbls)
//! schema documents.
//!
//! This crate provides:
//! - External name resolution (`@map` / `@@map` or snake case)
//! - Column type mapping and default rendering
//! - Table, constraint, index and enum conversion
//! - Foreign-key relation extraction with cardinalities
//! - `tblsgen.toml` configuration
//!
//! ## Example
//!
//! ```rust
//! use tblsgen_tbls::{TblsConfig, convert_source};
//!
//! let document = convert_source(r#"
//!     model User {
//!         id    Int    @id @default(autoincrement())
//!         email String @unique
//!     }
//! "#, &TblsConfig::default()).unwrap();
//!
//! assert_eq!(document.tables[0].name, "user");
//! assert_eq!(document.tables[0].columns[0].column_type, "INTEGER");
//! ```

pub mod assembler;
pub mod config;
pub mod document;
pub mod enums;
pub mod error;
pub mod lookup;
pub mod naming;
pub mod relation;
pub mod table;
pub mod types;

pub use assembler::{DocumentMeta, convert_description, convert_input, convert_schema, convert_source};
pub use config::{InputFormat, TblsConfig};
pub use document::{
    Cardinality, Column, Constraint, ConstraintType, Driver, Enum, Index, Relation,
    SchemaDocument, Table,
};
pub use error::{TblsError, TblsResult};
pub use lookup::SchemaLookup;
pub use naming::{resolve_name, to_snake_case};
pub use types::{map_type, render_default};
