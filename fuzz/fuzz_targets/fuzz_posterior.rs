//! Fuzz target for posterior odds over structured random corpora.
//!
//! Small alphabets keep labels and features colliding often enough to reach
//! the interesting paths.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ob_core::{Accumulation, Feature, LabeledExample, PosteriorOptions, Smoothing, Trainer};

#[derive(Debug, Arbitrary)]
struct Input {
    examples: Vec<(u8, Vec<(u8, u8)>)>,
    query: Vec<(u8, u8)>,
    laplace: bool,
    log_odds: bool,
    ignore_prior_odds: bool,
}

fn feature((name, value): (u8, u8)) -> Feature {
    Feature::new(format!("f{}", name % 4), format!("v{}", value % 4))
}

fuzz_target!(|input: Input| {
    let examples: Vec<_> = input
        .examples
        .into_iter()
        .map(|(label, features)| {
            LabeledExample::new(label % 4, features.into_iter().map(feature).collect())
        })
        .collect();

    let smoothing = if input.laplace {
        Smoothing::Laplace
    } else {
        Smoothing::None
    };
    let store = Trainer::new().with_smoothing(smoothing).train(&examples);
    assert!(store.totals_consistent());

    let accumulation = if input.log_odds {
        Accumulation::Log
    } else {
        Accumulation::Linear
    };
    let options = PosteriorOptions::new()
        .with_accumulation(accumulation)
        .ignore_prior_odds(input.ignore_prior_odds);
    let query: Vec<Feature> = input.query.into_iter().map(feature).collect();

    if let Ok(result) = store.posterior_odds(&query, &options) {
        assert!(result.label_odds.iter().all(|entry| entry.odds <= result.max_odds));
    }
});
