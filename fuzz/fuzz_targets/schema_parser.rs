//! Fuzz target for the schema lexer, parser and converter.
//!
//! Arbitrary text must never panic: it either converts or fails with an
//! error carrying a position.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_schema_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use tblsgen_schema::{Lexer, TokenKind, tokenize};
use tblsgen_tbls::{TblsConfig, convert_source};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let tokens = tokenize(input);
    assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);

    if let Err(err) = Lexer::new(input).strict(true).tokenize() {
        assert!(err.position().is_some());
    }

    if let Err(tblsgen_tbls::TblsError::Schema(err)) = convert_source(input, &TblsConfig::default()) {
        assert!(err.position().is_some());
    }
});
