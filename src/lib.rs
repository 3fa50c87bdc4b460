//! # tblsgen
//!
//! Translate Prisma-style schema files into [tbls](https://github.com/k1LoW/tbls)
//! schema documents.
//!
//! tblsgen provides:
//! - A lexer and recursive-descent parser for the schema language
//! - An adapter for normalized JSON model descriptions (DMMF)
//! - Conversion into tables, columns, constraints, indexes, relations and enums
//! - A `tblsgen.toml` configuration layer
//!
//! ## Quick Start
//!
//! ```rust
//! use tblsgen::prelude::*;
//!
//! let document = convert_source(r#"
//!     model User {
//!         id    Int    @id @default(autoincrement())
//!         email String @unique
//!         posts Post[]
//!     }
//!
//!     model Post {
//!         id       Int  @id
//!         authorId Int
//!         author   User @relation(fields: [authorId], references: [id])
//!     }
//! "#, &TblsConfig::default()).unwrap();
//!
//! assert_eq!(document.tables.len(), 2);
//! assert_eq!(document.relations[0].def, "FOREIGN KEY (author_id) REFERENCES user(id)");
//!
//! let json = document.to_json(true).unwrap();
//! assert!(json.contains("\"parent_cardinality\": \"zero_or_more\""));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Schema lexing, parsing and AST types.
pub mod schema {
    pub use tblsgen_schema::*;
}

/// Conversion into tbls schema documents.
pub mod tbls {
    pub use tblsgen_tbls::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::schema::{Schema, SchemaError, parse_description, parse_schema, parse_schema_file};
    pub use crate::tbls::{
        DocumentMeta, InputFormat, SchemaDocument, TblsConfig, TblsError, convert_description,
        convert_input, convert_schema, convert_source,
    };
}

// Re-export key types at the crate root
pub use schema::{Schema, SchemaError};
pub use tbls::{SchemaDocument, TblsConfig, TblsError};
