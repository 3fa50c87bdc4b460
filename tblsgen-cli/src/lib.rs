//! tblsgen CLI - Command-line interface for generating tbls schema documents.
//!
//! This crate provides the `tblsgen` binary, which reads a Prisma-style
//! schema (or a normalized JSON model description) and writes the matching
//! tbls schema document.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
