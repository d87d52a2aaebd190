//! Batch training: labeled examples into a [`CountStore`].

use std::collections::HashMap;

use ob_config::{ClassifierConfig, Smoothing};
use tracing::{debug, warn};

use crate::error::Result;
use crate::feature::{Feature, LabeledExample};
use crate::label::Label;
use crate::store::CountStore;

/// Builds a [`CountStore`] from a training corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Trainer {
    smoothing: Smoothing,
}

impl Trainer {
    /// A trainer without whole-model smoothing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Trainer configured from the `smoothing` section of a classifier config.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        Ok(Self::new().with_smoothing(config.smoothing()?))
    }

    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// Count every example and every feature occurrence.
    ///
    /// Labels are recorded in first-seen order. A feature repeated inside
    /// one example is counted once per occurrence. With Laplace or Lidstone
    /// smoothing, every (observed feature, label) cell and every label count
    /// receive the pseudo-count before totals are computed. Features under
    /// the reserved `priorOdds` name are not counted.
    pub fn train<L: Label>(&self, examples: &[LabeledExample<L>]) -> CountStore<L> {
        let mut labels: Vec<L> = Vec::new();
        let mut label_counts: HashMap<L, f64> = HashMap::new();
        let mut feature_counts: HashMap<Feature, HashMap<L, f64>> = HashMap::new();
        let mut skipped_reserved = 0usize;

        for example in examples {
            let count = label_counts.entry(example.label.clone()).or_insert_with(|| {
                labels.push(example.label.clone());
                0.0
            });
            *count += 1.0;

            for feature in &example.features {
                if feature.is_prior_odds() {
                    skipped_reserved += 1;
                    continue;
                }
                *feature_counts
                    .entry(feature.clone())
                    .or_default()
                    .entry(example.label.clone())
                    .or_insert(0.0) += 1.0;
            }
        }

        if let Some(alpha) = self.smoothing.pseudo_count() {
            for label in &labels {
                if let Some(count) = label_counts.get_mut(label) {
                    *count += alpha;
                }
            }
            for per_label in feature_counts.values_mut() {
                for label in &labels {
                    *per_label.entry(label.clone()).or_insert(0.0) += alpha;
                }
            }
        }

        if skipped_reserved > 0 {
            warn!(
                occurrences = skipped_reserved,
                "skipped features under the reserved priorOdds name"
            );
        }

        let store = CountStore::from_parts(labels, label_counts, feature_counts);
        debug!(
            examples = examples.len(),
            labels = store.labels().len(),
            features = store.feature_len(),
            cases_total = store.cases_total(),
            smoothing = %self.smoothing,
            "trained count store"
        );
        store
    }
}
