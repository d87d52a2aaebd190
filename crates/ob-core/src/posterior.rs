//! Posterior odds of every trained label given a feature set.
//!
//! For each label in training order the engine seeds the running odds with
//! the prior odds (or 1 when priors are ignored), then folds in the
//! likelihood ratio of every supplied feature that was seen during training.
//! Features the store has never seen are skipped; a request in which no
//! feature is known fails as a whole.
//!
//! Two accumulation strategies share the same arg-max semantics:
//! - [`Accumulation::Linear`]: `prior * Π likelihood`
//! - [`Accumulation::Log`]: `ln(prior) + Σ ln(likelihood)`, converted back to
//!   linear odds with overflow clamping for reporting.

use std::collections::HashMap;

use ob_config::{Accumulation, ClassificationConfig};
use ob_math::{ln_nonnegative, odds_from_log_odds, probability_from_odds};
use tracing::debug;

use crate::error::{Error, Result};
use crate::feature::Feature;
use crate::label::Label;
use crate::odds::prior_odds;
use crate::store::CountStore;

/// Per-call evaluation settings. Never stored on the model.
#[derive(Debug, Clone, PartialEq)]
pub struct PosteriorOptions<L: Label> {
    prior_odds: Option<HashMap<L, f64>>,
    ignore_prior_odds: bool,
    accumulation: Accumulation,
}

impl<L: Label> Default for PosteriorOptions<L> {
    fn default() -> Self {
        Self {
            prior_odds: None,
            ignore_prior_odds: false,
            accumulation: Accumulation::Linear,
        }
    }
}

impl<L: Label> PosteriorOptions<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults taken from the `classification` section of a config.
    pub fn from_config(config: &ClassificationConfig) -> Self {
        Self::new()
            .ignore_prior_odds(config.ignore_prior_odds)
            .with_accumulation(config.accumulation)
    }

    /// Replace the training label frequencies for the prior-odds term.
    ///
    /// Useful when the label mix at classification time differs from the
    /// training corpus. Every trained label needs an entry; entries for
    /// labels the model never saw only add to the total.
    pub fn with_prior_odds(mut self, distribution: HashMap<L, f64>) -> Self {
        self.prior_odds = Some(distribution);
        self
    }

    /// Seed running odds at 1 instead of the prior odds.
    pub fn ignore_prior_odds(mut self, ignore: bool) -> Self {
        self.ignore_prior_odds = ignore;
        self
    }

    pub fn with_accumulation(mut self, accumulation: Accumulation) -> Self {
        self.accumulation = accumulation;
        self
    }

    pub fn prior_odds_override(&self) -> Option<&HashMap<L, f64>> {
        self.prior_odds.as_ref()
    }

    pub fn ignores_prior_odds(&self) -> bool {
        self.ignore_prior_odds
    }

    pub fn accumulation(&self) -> Accumulation {
        self.accumulation
    }
}

/// Final odds of one label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelOdds<L> {
    pub label: L,
    pub odds: f64,
    pub log_odds: f64,
}

/// One factor of a label's posterior odds.
#[derive(Debug, Clone, PartialEq)]
pub struct LikelihoodTerm {
    pub feature: Feature,
    pub likelihood: f64,
}

/// Factors that produced a label's posterior odds, in evaluation order.
///
/// The first term is the `priorOdds: true` pseudo-feature unless priors
/// were ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLikelihoods<L> {
    pub label: L,
    pub terms: Vec<LikelihoodTerm>,
}

/// Outcome of a posterior odds evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct PosteriorOdds<L: Label> {
    /// Odds per label, in training order.
    pub label_odds: Vec<LabelOdds<L>>,
    pub max_label: L,
    pub max_odds: f64,
    /// Label frequencies the prior odds were computed from.
    pub label_cases: HashMap<L, f64>,
    pub likelihoods: Vec<LabelLikelihoods<L>>,
}

impl<L: Label> PosteriorOdds<L> {
    pub fn odds(&self, label: &L) -> Option<f64> {
        self.label_odds
            .iter()
            .find(|entry| &entry.label == label)
            .map(|entry| entry.odds)
    }

    /// Posterior probability of `label`, `odds / (1 + odds)`.
    pub fn probability(&self, label: &L) -> Option<f64> {
        self.odds(label).map(probability_from_odds)
    }

    pub fn likelihoods_for(&self, label: &L) -> Option<&LabelLikelihoods<L>> {
        self.likelihoods.iter().find(|entry| &entry.label == label)
    }
}

fn ln(value: f64) -> f64 {
    ln_nonnegative(value).unwrap_or(f64::NAN)
}

/// Evaluate the posterior odds of every trained label.
///
/// # Errors
/// - [`Error::TooFewLabels`] if the store or the effective prior
///   distribution has fewer than two labels.
/// - [`Error::UnknownLabel`] if an override omits a trained label.
/// - [`Error::InfiniteOdds`] if a prior cannot be expressed as finite odds.
/// - [`Error::AllFeaturesUnknown`] if none of `features` was seen in training.
///   Reported after the first label's prior, so prior failures win.
pub fn posterior_odds<L: Label>(
    store: &CountStore<L>,
    features: &[Feature],
    options: &PosteriorOptions<L>,
) -> Result<PosteriorOdds<L>> {
    let distribution = options
        .prior_odds
        .as_ref()
        .unwrap_or_else(|| store.label_counts());

    if store.labels().len() < 2 {
        return Err(Error::TooFewLabels {
            found: store.labels().len(),
        });
    }
    if distribution.len() < 2 {
        return Err(Error::TooFewLabels {
            found: distribution.len(),
        });
    }

    let known: Vec<&Feature> = features.iter().filter(|f| store.has_feature(f)).collect();

    let log_mode = options.accumulation == Accumulation::Log;
    let mut label_odds = Vec::with_capacity(store.labels().len());
    let mut likelihoods = Vec::with_capacity(store.labels().len());
    let mut best: Option<(usize, f64)> = None;

    for (idx, label) in store.labels().iter().enumerate() {
        let mut terms = Vec::with_capacity(known.len() + 1);
        let mut odds = 1.0;
        let mut log_odds = 0.0;

        if !options.ignore_prior_odds {
            let prior = prior_odds(label, distribution)?;
            odds = prior;
            log_odds = ln(prior);
            terms.push(LikelihoodTerm {
                feature: Feature::prior_odds(),
                likelihood: prior,
            });
        }

        // Checked after the first prior so a bad distribution surfaces first.
        if known.is_empty() {
            return Err(Error::AllFeaturesUnknown);
        }

        for feature in &known {
            let lh = store.likelihood(feature, label)?;
            if log_mode {
                log_odds += ln(lh);
            } else {
                odds *= lh;
            }
            terms.push(LikelihoodTerm {
                feature: (*feature).clone(),
                likelihood: lh,
            });
        }

        if log_mode {
            odds = odds_from_log_odds(log_odds);
        } else {
            log_odds = ln(odds);
        }

        let score = if log_mode { log_odds } else { odds };
        match best {
            None => best = Some((idx, score)),
            Some((_, top)) if score > top => best = Some((idx, score)),
            _ => {}
        }

        label_odds.push(LabelOdds {
            label: label.clone(),
            odds,
            log_odds,
        });
        likelihoods.push(LabelLikelihoods {
            label: label.clone(),
            terms,
        });
    }

    // At least two labels were evaluated above.
    let (max_idx, _) = best.unwrap_or((0, f64::NAN));
    let max = &label_odds[max_idx];
    let result = PosteriorOdds {
        max_label: max.label.clone(),
        max_odds: max.odds,
        label_odds,
        label_cases: distribution.clone(),
        likelihoods,
    };

    debug!(
        features = features.len(),
        known_features = known.len(),
        labels = result.label_odds.len(),
        max_label = ?result.max_label,
        max_odds = result.max_odds,
        accumulation = %options.accumulation,
        "posterior odds evaluated"
    );
    Ok(result)
}
