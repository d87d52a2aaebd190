//! Fuzz target for model dump decoding.
//!
//! Arbitrary bytes must either load into a store whose derived totals agree
//! with its raw counts, or fail with an error. Never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ob_core::{dump, load, CountStore, StringLabels};

fuzz_target!(|data: &[u8]| {
    let Ok(store) = load::<String, _>(data, &StringLabels) else {
        return;
    };
    assert!(store.totals_consistent());

    // A loaded store must survive its own dump.
    let bytes = dump(&store, &StringLabels).expect("loaded store should dump");
    let reloaded: CountStore<String> = load(&bytes, &StringLabels).expect("dump should reload");
    assert_eq!(reloaded.labels(), store.labels());
});
