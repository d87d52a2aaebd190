//! Fuzz target for JSON Lines corpus parsing and training.

#![no_main]

use std::io::Cursor;
use std::path::Path;

use libfuzzer_sys::fuzz_target;
use ob_core::corpus::parse_corpus;
use ob_core::Trainer;

fuzz_target!(|data: &[u8]| {
    if let Ok(examples) = parse_corpus(Cursor::new(data), Path::new("<fuzz>")) {
        let store = Trainer::new().train(&examples);
        assert_eq!(store.cases_total(), examples.len() as f64);
    }
});
