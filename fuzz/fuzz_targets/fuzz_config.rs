//! Fuzz target for classifier.json parsing.
//!
//! Tests that configuration parsing and validation handle arbitrary input
//! without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ob_config::{validate_config, ClassifierConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = ClassifierConfig::from_json(text) {
        // Should never panic, only return an error
        let _ = validate_config(&config);
        let _ = config.smoothing();
    }
});
