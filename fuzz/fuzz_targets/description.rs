//! Fuzz target for the normalized model description adapter.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_description
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use tblsgen_tbls::{TblsConfig, convert_description};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Malformed JSON is an error, never a panic
        let _ = convert_description(input, &TblsConfig::default());
    }
});
