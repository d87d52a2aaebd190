//! Conversions between probabilities, odds and log-odds.
//!
//! Odds describe how likely a hypothesis is compared to all other
//! hypotheses taken together:
//!
//! ```text
//! odds = P(H) / (1 - P(H))        P(H) = odds / (1 + odds)
//! ```
//!
//! Posterior odds are a product of prior odds and likelihood ratios, so the
//! log-domain forms here are what keep long products from underflowing.

use crate::math::stable::log_add_exp;

/// Maximum log-odds before clamping on the way back to linear odds.
/// exp(709) ≈ 8.2e307 is near f64::MAX.
pub const LOG_ODDS_MAX: f64 = 700.0;

/// Minimum log-odds before clamping on the way back to linear odds.
pub const LOG_ODDS_MIN: f64 = -700.0;

/// Odds for a probability.
///
/// Returns +inf for p = 1 and NaN for p outside [0, 1].
pub fn odds_from_probability(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }
    p / (1.0 - p)
}

/// Probability for non-negative odds.
///
/// Returns 1.0 for +inf and NaN for negative odds.
pub fn probability_from_odds(odds: f64) -> f64 {
    if odds.is_nan() || odds < 0.0 {
        return f64::NAN;
    }
    if odds == f64::INFINITY {
        return 1.0;
    }
    odds / (1.0 + odds)
}

/// Probability for log-odds, computed as a stable logistic function.
pub fn probability_from_log_odds(log_odds: f64) -> f64 {
    if log_odds.is_nan() {
        return f64::NAN;
    }
    // p = exp(lo) / (1 + exp(lo)) = exp(lo - log(1 + exp(lo)))
    (log_odds - log_add_exp(0.0, log_odds)).exp()
}

/// Convert log-odds back to linear odds with overflow-safe handling.
///
/// - Clamps to [LOG_ODDS_MIN, LOG_ODDS_MAX] before exponentiation
/// - Returns 0.0 for -inf
/// - Returns f64::MAX for +inf
pub fn odds_from_log_odds(log_odds: f64) -> f64 {
    if log_odds.is_nan() {
        return f64::NAN;
    }
    if log_odds == f64::NEG_INFINITY {
        return 0.0;
    }
    if log_odds == f64::INFINITY {
        return f64::MAX;
    }
    log_odds.clamp(LOG_ODDS_MIN, LOG_ODDS_MAX).exp()
}
