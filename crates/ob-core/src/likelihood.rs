//! Likelihood ratio of a single feature.

use crate::error::{Error, Result};
use crate::feature::Feature;
use crate::label::Label;
use crate::store::CountStore;

/// Count substituted for a zero count at evaluation time.
const CRUDE_SMOOTHING: f64 = 1.0;

/// `P(feature | label) / P(feature | not label)` from the store's counts.
///
/// A zero count for the label, or for the rest of the labels, is replaced by
/// one before dividing. Stored counts are never modified.
///
/// # Errors
/// - [`Error::UnknownFeature`] if `feature` was never observed.
/// - [`Error::UnknownLabel`] if `label` was never trained.
/// - [`Error::TooFewLabels`] if no cases fall outside `label`.
pub fn likelihood<L: Label>(store: &CountStore<L>, feature: &Feature, label: &L) -> Result<f64> {
    let feature_total = store
        .feature_total(feature)
        .ok_or_else(|| Error::UnknownFeature {
            name: feature.name.to_string(),
            value: feature.value.to_string(),
        })?;
    let label_cases = store
        .label_count(label)
        .ok_or_else(|| Error::unknown_label(label))?;

    let rest_cases = store.cases_total() - label_cases;
    if rest_cases <= 0.0 {
        return Err(Error::TooFewLabels {
            found: store.labels().len(),
        });
    }

    let mut count_feature = store.feature_count(feature, label);
    let mut count_rest = feature_total - count_feature;
    if count_feature == 0.0 {
        count_feature = CRUDE_SMOOTHING;
    }
    if count_rest == 0.0 {
        count_rest = CRUDE_SMOOTHING;
    }

    let p_feature = count_feature / label_cases;
    let p_rest = count_rest / rest_cases;
    Ok(p_feature / p_rest)
}
