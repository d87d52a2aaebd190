//! Prior odds from a label frequency table.

use std::collections::HashMap;

use ob_math::odds_from_probability;

use crate::error::{Error, Result};
use crate::label::Label;

/// Odds of `label` against all other labels of `distribution`.
///
/// `p = distribution[label] / Σ distribution`, odds = `p / (1 - p)`.
///
/// # Errors
/// - [`Error::UnknownLabel`] if `label` has no entry.
/// - [`Error::InfiniteOdds`] if the total is zero or `label` holds every case.
pub fn prior_odds<L: Label>(label: &L, distribution: &HashMap<L, f64>) -> Result<f64> {
    let count = distribution
        .get(label)
        .copied()
        .ok_or_else(|| Error::unknown_label(label))?;

    let total: f64 = distribution.values().sum();
    if total == 0.0 {
        return Err(Error::InfiniteOdds);
    }

    let p = count / total;
    if p == 1.0 {
        return Err(Error::InfiniteOdds);
    }
    Ok(odds_from_probability(p))
}
