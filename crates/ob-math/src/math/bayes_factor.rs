//! Likelihood-ratio utilities for evidence explainability.
//!
//! A single feature's likelihood ratio `P(f|L) / P(f|¬L)` is a Bayes factor
//! for label L against all other labels. This module provides:
//! - Computing evidence in bits
//! - Evidence strength labeling (Jeffreys scale)
//! - Direction of evidence (toward or away from the label)
//!
//! All inputs are log Bayes factors in nats (`ln(likelihood_ratio)`).

use serde::Serialize;

/// Convert log Bayes factor to evidence in bits.
///
/// Returns NaN if input is NaN.
pub fn delta_bits(log_bf: f64) -> f64 {
    if log_bf.is_nan() {
        return f64::NAN;
    }
    log_bf / std::f64::consts::LN_2
}

/// Evidence strength on the Jeffreys scale.
///
/// Labels are for presentation only; the raw ratio is always preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceStrength {
    /// |log_bf| ≈ 0: No evidence
    None,
    /// |log_bf| < ln(3.2) ≈ 1.16: Barely worth mentioning
    Anecdotal,
    /// ln(3.2) <= |log_bf| < ln(10) ≈ 2.30: Substantial
    Substantial,
    /// ln(10) <= |log_bf| < ln(32) ≈ 3.47: Strong
    Strong,
    /// ln(32) <= |log_bf| < ln(100) ≈ 4.61: Very strong
    VeryStrong,
    /// |log_bf| >= ln(100): Decisive
    Decisive,
}

impl EvidenceStrength {
    /// Classify evidence strength from log Bayes factor.
    ///
    /// Uses the absolute value; direction is reported separately.
    pub fn from_log_bf(log_bf: f64) -> Self {
        if log_bf.is_nan() {
            return EvidenceStrength::None;
        }

        let abs_log_bf = log_bf.abs();

        const LN_3_2: f64 = 1.163_150_809_678_64; // ln(3.2)
        const LN_32: f64 = 3.465_735_902_799_727; // ln(32)
        const LN_100: f64 = 4.605_170_185_988_092; // ln(100)
        let ln_10 = std::f64::consts::LN_10;

        if abs_log_bf < LN_3_2 {
            if abs_log_bf < f64::EPSILON {
                EvidenceStrength::None
            } else {
                EvidenceStrength::Anecdotal
            }
        } else if abs_log_bf < ln_10 {
            EvidenceStrength::Substantial
        } else if abs_log_bf < LN_32 {
            EvidenceStrength::Strong
        } else if abs_log_bf < LN_100 {
            EvidenceStrength::VeryStrong
        } else {
            EvidenceStrength::Decisive
        }
    }

    /// Return a short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            EvidenceStrength::None => "none",
            EvidenceStrength::Anecdotal => "anecdotal",
            EvidenceStrength::Substantial => "substantial",
            EvidenceStrength::Strong => "strong",
            EvidenceStrength::VeryStrong => "very strong",
            EvidenceStrength::Decisive => "decisive",
        }
    }
}

impl std::fmt::Display for EvidenceStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which way a likelihood ratio pushes the odds of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceDirection {
    /// log_bf > 0: evidence raises the odds of the label
    Supports,
    /// log_bf < 0: evidence lowers the odds of the label
    Opposes,
    /// log_bf = 0: no shift
    Neutral,
}

impl EvidenceDirection {
    /// Determine direction from log Bayes factor.
    pub fn from_log_bf(log_bf: f64) -> Self {
        if log_bf.is_nan() || log_bf.abs() < f64::EPSILON {
            EvidenceDirection::Neutral
        } else if log_bf > 0.0 {
            EvidenceDirection::Supports
        } else {
            EvidenceDirection::Opposes
        }
    }
}

/// Evidence summary for one likelihood ratio.
#[derive(Debug, Clone, Serialize)]
pub struct EvidenceSummary {
    /// Log Bayes factor in nats.
    pub log_bf: f64,
    /// Evidence in bits.
    pub delta_bits: f64,
    /// Evidence strength on Jeffreys scale.
    pub strength: EvidenceStrength,
    /// Which way the odds move.
    pub direction: EvidenceDirection,
}

impl EvidenceSummary {
    /// Create an evidence summary from a log Bayes factor.
    pub fn from_log_bf(log_bf: f64) -> Self {
        EvidenceSummary {
            log_bf,
            delta_bits: delta_bits(log_bf),
            strength: EvidenceStrength::from_log_bf(log_bf),
            direction: EvidenceDirection::from_log_bf(log_bf),
        }
    }

    /// Create an evidence summary from a linear likelihood ratio.
    ///
    /// A zero ratio maps to -inf (decisive against the label).
    pub fn from_ratio(ratio: f64) -> Self {
        let log_bf = if ratio.is_nan() || ratio < 0.0 {
            f64::NAN
        } else if ratio == 0.0 {
            f64::NEG_INFINITY
        } else {
            ratio.ln()
        };
        Self::from_log_bf(log_bf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() && b.is_nan() {
            return true;
        }
        if a.is_nan() || b.is_nan() {
            return false;
        }
        (a - b).abs() <= tol
    }

    // =======================================================================
    // delta_bits tests
    // =======================================================================

    #[test]
    fn delta_bits_zero() {
        assert!(approx_eq(delta_bits(0.0), 0.0, 1e-12));
    }

    #[test]
    fn delta_bits_ln_2() {
        // ln(2) nats = 1 bit exactly
        assert!(approx_eq(delta_bits(std::f64::consts::LN_2), 1.0, 1e-12));
    }

    #[test]
    fn delta_bits_negative() {
        assert!(approx_eq(delta_bits(-std::f64::consts::LN_2), -1.0, 1e-12));
    }

    #[test]
    fn delta_bits_nan() {
        assert!(delta_bits(f64::NAN).is_nan());
    }

    // =======================================================================
    // EvidenceStrength tests
    // =======================================================================

    #[test]
    fn evidence_strength_none() {
        assert_eq!(EvidenceStrength::from_log_bf(0.0), EvidenceStrength::None);
    }

    #[test]
    fn evidence_strength_anecdotal() {
        // likelihood 1.5 for plain cookies in the first jar
        let s = EvidenceStrength::from_log_bf(1.5f64.ln());
        assert_eq!(s, EvidenceStrength::Anecdotal);
    }

    #[test]
    fn evidence_strength_substantial() {
        let s = EvidenceStrength::from_log_bf(5.0f64.ln());
        assert_eq!(s, EvidenceStrength::Substantial);
    }

    #[test]
    fn evidence_strength_strong() {
        let s = EvidenceStrength::from_log_bf(15.0f64.ln());
        assert_eq!(s, EvidenceStrength::Strong);
    }

    #[test]
    fn evidence_strength_very_strong() {
        let s = EvidenceStrength::from_log_bf(50.0f64.ln());
        assert_eq!(s, EvidenceStrength::VeryStrong);
    }

    #[test]
    fn evidence_strength_decisive() {
        let s = EvidenceStrength::from_log_bf(1000.0f64.ln());
        assert_eq!(s, EvidenceStrength::Decisive);
    }

    #[test]
    fn evidence_strength_uses_absolute_value() {
        let s_pos = EvidenceStrength::from_log_bf(30.0f64.ln());
        let s_neg = EvidenceStrength::from_log_bf(-(30.0f64.ln()));
        assert_eq!(s_pos, s_neg);
    }

    #[test]
    fn evidence_strength_nan_is_none() {
        assert_eq!(EvidenceStrength::from_log_bf(f64::NAN), EvidenceStrength::None);
    }

    #[test]
    fn evidence_strength_ordering() {
        assert!(EvidenceStrength::Decisive > EvidenceStrength::Strong);
        assert!(EvidenceStrength::Anecdotal > EvidenceStrength::None);
    }

    #[test]
    fn evidence_strength_display() {
        assert_eq!(EvidenceStrength::VeryStrong.to_string(), "very strong");
        assert_eq!(EvidenceStrength::Decisive.label(), "decisive");
    }

    // =======================================================================
    // EvidenceDirection / EvidenceSummary tests
    // =======================================================================

    #[test]
    fn direction_from_sign() {
        assert_eq!(EvidenceDirection::from_log_bf(1.0), EvidenceDirection::Supports);
        assert_eq!(EvidenceDirection::from_log_bf(-1.0), EvidenceDirection::Opposes);
        assert_eq!(EvidenceDirection::from_log_bf(0.0), EvidenceDirection::Neutral);
    }

    #[test]
    fn summary_from_ratio_above_one() {
        let s = EvidenceSummary::from_ratio(30.0);
        assert_eq!(s.direction, EvidenceDirection::Supports);
        assert_eq!(s.strength, EvidenceStrength::Strong);
        assert!(approx_eq(s.log_bf, 30.0f64.ln(), 1e-12));
    }

    #[test]
    fn summary_from_ratio_below_one() {
        let s = EvidenceSummary::from_ratio(0.5);
        assert_eq!(s.direction, EvidenceDirection::Opposes);
        assert!(approx_eq(s.delta_bits, -1.0, 1e-12));
    }

    #[test]
    fn summary_from_zero_ratio_is_decisive_against() {
        let s = EvidenceSummary::from_ratio(0.0);
        assert_eq!(s.direction, EvidenceDirection::Opposes);
        assert_eq!(s.strength, EvidenceStrength::Decisive);
    }
}
