//! Features (evidence) and labeled training examples.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a category of evidence, e.g. `shape`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureName(pub String);

/// One discrete value within a feature name's domain, e.g. `round`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureValue(pub String);

impl FeatureName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FeatureValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FeatureName {
    fn from(s: &str) -> Self {
        FeatureName(s.to_string())
    }
}

impl From<String> for FeatureName {
    fn from(s: String) -> Self {
        FeatureName(s)
    }
}

impl From<&str> for FeatureValue {
    fn from(s: &str) -> Self {
        FeatureValue(s.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(s: String) -> Self {
        FeatureValue(s)
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A piece of evidence: a (name, value) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Feature {
    pub name: FeatureName,
    pub value: FeatureValue,
}

impl Feature {
    pub fn new(name: impl Into<FeatureName>, value: impl Into<FeatureValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Pseudo-feature under which prior odds are reported among likelihoods.
    pub fn prior_odds() -> Self {
        Self::new(PRIOR_ODDS_FEATURE, "true")
    }

    /// True for any feature under the reserved prior-odds name.
    ///
    /// Parsed input never carries that name, so within a breakdown this
    /// identifies the prior entry.
    pub fn is_prior_odds(&self) -> bool {
        self.name.as_str() == PRIOR_ODDS_FEATURE
    }
}

/// Feature name of the prior odds entry in likelihood breakdowns.
///
/// Reserved: feature parsing, corpora and model loading reject it.
pub const PRIOR_ODDS_FEATURE: &str = "priorOdds";

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

impl std::str::FromStr for Feature {
    type Err = String;

    /// Parse `name=value`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((PRIOR_ODDS_FEATURE, _)) => {
                Err(format!("feature name '{}' is reserved", PRIOR_ODDS_FEATURE))
            }
            Some((name, value)) if !name.is_empty() => Ok(Feature::new(name, value)),
            _ => Err(format!("expected name=value, got '{}'", s)),
        }
    }
}

/// One training instance.
///
/// Features may repeat; every occurrence is counted.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledExample<L> {
    pub label: L,
    pub features: Vec<Feature>,
}

impl<L> LabeledExample<L> {
    pub fn new(label: L, features: Vec<Feature>) -> Self {
        Self { label, features }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_display() {
        let f = Feature::new("CookieF", "plain");
        assert_eq!(f.to_string(), "CookieF: plain");
    }

    #[test]
    fn feature_parse_name_value() {
        let f: Feature = "shape=round".parse().unwrap();
        assert_eq!(f, Feature::new("shape", "round"));
    }

    #[test]
    fn feature_parse_keeps_extra_equals_in_value() {
        let f: Feature = "expr=a=b".parse().unwrap();
        assert_eq!(f.value.as_str(), "a=b");
    }

    #[test]
    fn feature_parse_rejects_missing_separator() {
        assert!("shape".parse::<Feature>().is_err());
        assert!("=round".parse::<Feature>().is_err());
    }

    #[test]
    fn feature_parse_rejects_reserved_name() {
        let err = "priorOdds=true".parse::<Feature>().unwrap_err();
        assert!(err.contains("reserved"), "{}", err);
        assert!("priorodds=true".parse::<Feature>().is_ok());
    }

    #[test]
    fn prior_odds_pseudo_feature() {
        let f = Feature::prior_odds();
        assert!(f.is_prior_odds());
        assert_eq!(f.to_string(), "priorOdds: true");
        assert!(!Feature::new("shape", "star").is_prior_odds());
    }

    #[test]
    fn feature_serde_shape() {
        let f = Feature::new("kind", "plain");
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(json, r#"{"name":"kind","value":"plain"}"#);
    }
}
