//! Evidence ledger for explainability.
//!
//! Turns the likelihood terms of a [`PosteriorOdds`] into JSON-friendly
//! summaries: one entry per term, strongest first, each annotated with its
//! evidence in bits and its Jeffreys-scale strength.

use ob_config::Accumulation;
use ob_math::bayes_factor::{EvidenceDirection, EvidenceStrength, EvidenceSummary};
use ob_math::probability_from_log_odds;
use serde::Serialize;

use crate::label::{Label, LabelCodec};
use crate::posterior::{LabelOdds, PosteriorOdds};

/// Number of entries rendered into [`ClassificationReport::top_evidence`].
const TOP_EVIDENCE: usize = 3;

/// Weakest evidence worth a line in [`ClassificationReport::top_evidence`].
const TOP_EVIDENCE_MIN_STRENGTH: EvidenceStrength = EvidenceStrength::Anecdotal;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OddsEntry {
    /// `name: value` of the feature (or `priorOdds: true`).
    pub feature: String,
    /// Likelihood ratio, or prior odds for the prior entry.
    pub odds: f64,
    pub delta_bits: f64,
    pub strength: EvidenceStrength,
    pub direction: EvidenceDirection,
}

/// Likelihood contributions of one label, sorted by descending odds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OddsDetails(Vec<OddsEntry>);

impl OddsDetails {
    /// Contributions recorded for `label`; empty if the label was not evaluated.
    pub fn new<L: Label>(posterior: &PosteriorOdds<L>, label: &L) -> Self {
        let mut entries: Vec<OddsEntry> = posterior
            .likelihoods_for(label)
            .map(|contributions| {
                contributions
                    .terms
                    .iter()
                    .map(|term| {
                        let summary = EvidenceSummary::from_ratio(term.likelihood);
                        OddsEntry {
                            feature: term.feature.to_string(),
                            odds: term.likelihood,
                            delta_bits: summary.delta_bits,
                            strength: summary.strength,
                            direction: summary.direction,
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        // Stable: equal odds keep evaluation order.
        entries.sort_by(|a, b| {
            b.odds
                .partial_cmp(&a.odds)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self(entries)
    }

    pub fn entries(&self) -> &[OddsEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries whose evidence reaches `min_strength`.
    pub fn significant(&self, min_strength: EvidenceStrength) -> impl Iterator<Item = &OddsEntry> {
        self.0
            .iter()
            .filter(move |entry| entry.strength >= min_strength)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelReport {
    pub label: String,
    pub odds: f64,
    pub log_odds: f64,
    pub probability: f64,
}

/// Serializable outcome of one classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub max_label: String,
    pub max_odds: f64,
    pub probability: f64,
    pub accumulation: Accumulation,
    /// Every label in training order.
    pub labels: Vec<LabelReport>,
    /// Contributions behind `max_label`.
    pub evidence: OddsDetails,
    pub top_evidence: Vec<String>,
    pub summary: String,
}

impl ClassificationReport {
    pub fn new<L: Label, C: LabelCodec<L> + ?Sized>(
        posterior: &PosteriorOdds<L>,
        codec: &C,
        accumulation: Accumulation,
    ) -> Self {
        let max_label = codec.label_id(&posterior.max_label);

        // Under log accumulation, probabilities come from the unclamped log odds.
        let probability_of = |entry: &LabelOdds<L>| match accumulation {
            Accumulation::Log => probability_from_log_odds(entry.log_odds),
            Accumulation::Linear => posterior.probability(&entry.label).unwrap_or(f64::NAN),
        };

        let labels: Vec<LabelReport> = posterior
            .label_odds
            .iter()
            .map(|entry| LabelReport {
                label: codec.label_id(&entry.label),
                odds: entry.odds,
                log_odds: entry.log_odds,
                probability: probability_of(entry),
            })
            .collect();
        let probability = posterior
            .label_odds
            .iter()
            .position(|entry| entry.label == posterior.max_label)
            .map(|idx| labels[idx].probability)
            .unwrap_or(f64::NAN);

        let evidence = OddsDetails::new(posterior, &posterior.max_label);
        let top_evidence = evidence
            .significant(TOP_EVIDENCE_MIN_STRENGTH)
            .take(TOP_EVIDENCE)
            .map(|entry| {
                let toward = match entry.direction {
                    EvidenceDirection::Supports => "toward",
                    _ => "away from",
                };
                format!(
                    "{} ({:.1} bits {} {})",
                    entry.feature,
                    entry.delta_bits.abs(),
                    toward,
                    max_label
                )
            })
            .collect();

        let summary = format!(
            "Classified as {} with odds {:.2} (p={:.2}).",
            max_label, posterior.max_odds, probability
        );

        Self {
            max_label,
            max_odds: posterior.max_odds,
            probability,
            accumulation,
            labels,
            evidence,
            top_evidence,
            summary,
        }
    }
}
