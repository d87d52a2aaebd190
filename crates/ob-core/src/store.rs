//! Count Store: label and feature frequencies accumulated from training.
//!
//! The store is built once, either by the [`Trainer`](crate::train::Trainer)
//! or by loading a dump, and is read-only afterwards. Derived totals are
//! always recomputed from the raw counts on construction so that
//! `cases_total == Σ label_counts` and
//! `feature_totals[f] == Σ_label feature_counts[f][label]` hold for every
//! store handed out by this crate.

use std::collections::HashMap;

use crate::error::Result;
use crate::feature::Feature;
use crate::label::Label;
use crate::posterior::{PosteriorOdds, PosteriorOptions};

/// Accumulated frequency statistics of a training corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct CountStore<L: Label> {
    labels: Vec<L>,
    label_counts: HashMap<L, f64>,
    feature_counts: HashMap<Feature, HashMap<L, f64>>,
    feature_totals: HashMap<Feature, f64>,
    cases_total: f64,
}

impl<L: Label> CountStore<L> {
    /// A store with no labels and no features.
    pub fn empty() -> Self {
        Self {
            labels: Vec::new(),
            label_counts: HashMap::new(),
            feature_counts: HashMap::new(),
            feature_totals: HashMap::new(),
            cases_total: 0.0,
        }
    }

    /// Assemble a store from raw counts, recomputing all derived totals.
    ///
    /// `labels` fixes iteration order; every label must have an entry in
    /// `label_counts`. Callers in this crate guarantee that.
    pub(crate) fn from_parts(
        labels: Vec<L>,
        label_counts: HashMap<L, f64>,
        feature_counts: HashMap<Feature, HashMap<L, f64>>,
    ) -> Self {
        let cases_total = labels
            .iter()
            .map(|label| label_counts.get(label).copied().unwrap_or(0.0))
            .sum();

        let feature_totals = feature_counts
            .iter()
            .map(|(feature, per_label)| {
                let total = labels
                    .iter()
                    .map(|label| per_label.get(label).copied().unwrap_or(0.0))
                    .sum();
                (feature.clone(), total)
            })
            .collect();

        Self {
            labels,
            label_counts,
            feature_counts,
            feature_totals,
            cases_total,
        }
    }

    // ── accessors ──────────────────────────────────────────────────────

    /// Distinct labels in first-seen order.
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    pub fn label_counts(&self) -> &HashMap<L, f64> {
        &self.label_counts
    }

    pub fn label_count(&self, label: &L) -> Option<f64> {
        self.label_counts.get(label).copied()
    }

    /// Occurrences of `feature` under `label`; zero when never observed.
    pub fn feature_count(&self, feature: &Feature, label: &L) -> f64 {
        self.feature_counts
            .get(feature)
            .and_then(|per_label| per_label.get(label))
            .copied()
            .unwrap_or(0.0)
    }

    /// Per-label counts of one feature, if it was observed in training.
    pub fn feature_counts(&self, feature: &Feature) -> Option<&HashMap<L, f64>> {
        self.feature_counts.get(feature)
    }

    pub fn feature_total(&self, feature: &Feature) -> Option<f64> {
        self.feature_totals.get(feature).copied()
    }

    pub fn has_feature(&self, feature: &Feature) -> bool {
        self.feature_counts.contains_key(feature)
    }

    /// Observed features, in no particular order.
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.feature_counts.keys()
    }

    pub fn feature_len(&self) -> usize {
        self.feature_counts.len()
    }

    pub fn cases_total(&self) -> f64 {
        self.cases_total
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Check the derived-total invariants against the raw counts.
    pub fn totals_consistent(&self) -> bool {
        let label_sum: f64 = self
            .labels
            .iter()
            .map(|label| self.label_count(label).unwrap_or(0.0))
            .sum();
        if label_sum != self.cases_total || self.labels.len() != self.label_counts.len() {
            return false;
        }
        self.feature_counts.iter().all(|(feature, per_label)| {
            let sum: f64 = self
                .labels
                .iter()
                .map(|label| per_label.get(label).copied().unwrap_or(0.0))
                .sum();
            self.feature_totals.get(feature) == Some(&sum)
        })
    }

    // ── calculations ───────────────────────────────────────────────────

    /// Prior odds of `label` under the training distribution.
    pub fn prior_odds(&self, label: &L) -> Result<f64> {
        crate::odds::prior_odds(label, &self.label_counts)
    }

    /// Likelihood ratio of one feature for `label`.
    pub fn likelihood(&self, feature: &Feature, label: &L) -> Result<f64> {
        crate::likelihood::likelihood(self, feature, label)
    }

    /// Posterior odds of every label given `features`.
    pub fn posterior_odds(
        &self,
        features: &[Feature],
        options: &PosteriorOptions<L>,
    ) -> Result<PosteriorOdds<L>> {
        crate::posterior::posterior_odds(self, features, options)
    }
}

impl<L: Label> Default for CountStore<L> {
    fn default() -> Self {
        Self::empty()
    }
}
