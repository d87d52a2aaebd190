//! Criterion benchmarks for training and posterior odds evaluation.
//!
//! Corpora are synthetic and deterministic so runs are comparable across
//! machines.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ob_core::{Accumulation, CountStore, Feature, LabeledExample, PosteriorOptions, Trainer};

/// `examples` rows over `labels` labels, each with `width` features drawn
/// from a vocabulary of 16 values per name.
fn synthetic_corpus(examples: usize, labels: usize, width: usize) -> Vec<LabeledExample<String>> {
    (0..examples)
        .map(|i| {
            let label = format!("label-{}", i % labels);
            let features = (0..width)
                .map(|f| Feature::new(format!("f{}", f), format!("v{}", (i * 7 + f * 3) % 16)))
                .collect();
            LabeledExample::new(label, features)
        })
        .collect()
}

fn query(width: usize) -> Vec<Feature> {
    (0..width)
        .map(|f| Feature::new(format!("f{}", f), format!("v{}", (f * 5) % 16)))
        .collect()
}

fn bench_train(c: &mut Criterion) {
    let mut group = c.benchmark_group("train");
    for examples in [1_000usize, 10_000] {
        let corpus = synthetic_corpus(examples, 4, 8);
        group.bench_with_input(BenchmarkId::new("examples", examples), &corpus, |b, corpus| {
            b.iter(|| black_box(Trainer::new().train(black_box(corpus))));
        });
    }
    group.finish();
}

fn bench_posterior_odds(c: &mut Criterion) {
    let mut group = c.benchmark_group("posterior_odds");

    for labels in [2usize, 8, 32] {
        let store: CountStore<String> = Trainer::new().train(&synthetic_corpus(5_000, labels, 16));
        let features = query(16);

        for accumulation in [Accumulation::Linear, Accumulation::Log] {
            let options = PosteriorOptions::new().with_accumulation(accumulation);
            group.bench_with_input(
                BenchmarkId::new(accumulation.to_string(), labels),
                &features,
                |b, features| {
                    b.iter(|| {
                        let result = store
                            .posterior_odds(black_box(features), black_box(&options))
                            .expect("posterior odds should evaluate");
                        black_box(result.max_odds);
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_train, bench_posterior_odds);
criterion_main!(benches);
