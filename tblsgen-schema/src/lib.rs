//! # tblsgen-schema
//!
//! Lexer, parser and AST for Prisma-style schema files.
//!
//! This crate provides:
//! - A tokenizer with line/column positions for every token
//! - A recursive-descent parser producing a [`Schema`] AST
//! - An adapter that turns a normalized JSON model description into the same AST
//!
//! ## Example
//!
//! ```rust
//! use tblsgen_schema::parse_schema;
//!
//! let schema = parse_schema(r#"
//!     model User {
//!         id    Int    @id @default(autoincrement())
//!         email String @unique
//!     }
//! "#).unwrap();
//!
//! assert_eq!(schema.models[0].name(), "User");
//! ```

pub mod ast;
pub mod description;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::*;
pub use description::{ModelDescription, parse_description};
pub use error::{SchemaError, SchemaResult};
pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use parser::{ParseOptions, parse, parse_schema, parse_schema_file, parse_schema_with};
