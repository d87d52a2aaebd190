//! Classifier configuration types.
//!
//! These types match the classifier.json layout:
//!
//! ```json
//! {
//!   "schema_version": "1.0.0",
//!   "smoothing": { "laplace": false, "lidstone": 0.5 },
//!   "classification": { "accumulation": "log", "ignore_prior_odds": false }
//! }
//! ```

use crate::validate::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};

fn default_schema_version() -> String {
    crate::CONFIG_SCHEMA_VERSION.to_string()
}

/// Complete classifier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub smoothing: SmoothingConfig,

    #[serde(default)]
    pub classification: ClassificationConfig,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            description: None,
            smoothing: SmoothingConfig::default(),
            classification: ClassificationConfig::default(),
        }
    }
}

impl ClassifierConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> ValidationResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Resolve the whole-model smoothing this configuration asks for.
    pub fn smoothing(&self) -> ValidationResult<Smoothing> {
        self.smoothing.resolve()
    }
}

/// Training-time smoothing switches as written in the config file.
///
/// Both may be set; Lidstone takes precedence over Laplace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmoothingConfig {
    #[serde(default)]
    pub laplace: bool,

    #[serde(default)]
    pub lidstone: Option<f64>,
}

impl SmoothingConfig {
    /// Turn the switches into a validated [`Smoothing`].
    pub fn resolve(&self) -> ValidationResult<Smoothing> {
        if let Some(a) = self.lidstone {
            return Ok(Smoothing::Lidstone(LidstoneCoefficient::new(a)?));
        }
        if self.laplace {
            return Ok(Smoothing::Laplace);
        }
        Ok(Smoothing::None)
    }
}

/// Classification-time defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationConfig {
    #[serde(default)]
    pub accumulation: Accumulation,

    #[serde(default)]
    pub ignore_prior_odds: bool,
}

/// How posterior odds are accumulated across likelihoods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accumulation {
    /// Multiply prior odds by every likelihood (default).
    #[default]
    Linear,
    /// Sum log prior odds and log likelihoods; safe for long feature vectors.
    Log,
}

impl std::str::FromStr for Accumulation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" | "product" => Ok(Accumulation::Linear),
            "log" | "log-odds" | "logarithmic" => Ok(Accumulation::Log),
            _ => Err(format!("unknown accumulation: {}", s)),
        }
    }
}

impl std::fmt::Display for Accumulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Accumulation::Linear => write!(f, "linear"),
            Accumulation::Log => write!(f, "log"),
        }
    }
}

/// Whole-model smoothing applied once after raw counting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Smoothing {
    /// Raw counts only.
    #[default]
    None,
    /// Add one pseudo-count to every feature/label cell.
    Laplace,
    /// Add a fractional pseudo-count in (0, 1).
    Lidstone(LidstoneCoefficient),
}

impl Smoothing {
    /// Pseudo-count added per cell, if any.
    pub fn pseudo_count(&self) -> Option<f64> {
        match self {
            Smoothing::None => None,
            Smoothing::Laplace => Some(1.0),
            Smoothing::Lidstone(a) => Some(a.value()),
        }
    }
}

impl std::fmt::Display for Smoothing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Smoothing::None => write!(f, "none"),
            Smoothing::Laplace => write!(f, "laplace"),
            Smoothing::Lidstone(a) => write!(f, "lidstone({})", a.value()),
        }
    }
}

/// A Lidstone pseudo-count, guaranteed to lie strictly between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LidstoneCoefficient(f64);

impl LidstoneCoefficient {
    /// Validate a coefficient.
    pub fn new(value: f64) -> ValidationResult<Self> {
        if value.is_nan() || value <= 0.0 || value >= 1.0 {
            return Err(ValidationError::InvalidValue {
                field: "smoothing.lidstone".to_string(),
                message: format!("Must be in (0, 1), got {}", value),
            });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_smoothing() {
        let config = ClassifierConfig::default();
        assert_eq!(config.schema_version, crate::CONFIG_SCHEMA_VERSION);
        assert_eq!(config.smoothing().unwrap(), Smoothing::None);
        assert_eq!(config.classification.accumulation, Accumulation::Linear);
        assert!(!config.classification.ignore_prior_odds);
    }

    #[test]
    fn empty_object_parses_to_defaults() {
        let config = ClassifierConfig::from_json("{}").unwrap();
        assert_eq!(config, ClassifierConfig::default());
    }

    #[test]
    fn laplace_resolves() {
        let config = ClassifierConfig::from_json(r#"{"smoothing": {"laplace": true}}"#).unwrap();
        assert_eq!(config.smoothing().unwrap(), Smoothing::Laplace);
        assert_eq!(Smoothing::Laplace.pseudo_count(), Some(1.0));
    }

    #[test]
    fn lidstone_takes_precedence_over_laplace() {
        let config = ClassifierConfig::from_json(
            r#"{"smoothing": {"laplace": true, "lidstone": 0.25}}"#,
        )
        .unwrap();
        let smoothing = config.smoothing().unwrap();
        assert_eq!(smoothing.pseudo_count(), Some(0.25));
        assert!(matches!(smoothing, Smoothing::Lidstone(_)));
    }

    #[test]
    fn lidstone_out_of_range_rejected() {
        for bad in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let err = LidstoneCoefficient::new(bad).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidValue { .. }), "{bad}");
        }
    }

    #[test]
    fn lidstone_in_range_accepted() {
        let a = LidstoneCoefficient::new(0.5).unwrap();
        assert_eq!(a.value(), 0.5);
    }

    #[test]
    fn accumulation_parse() {
        assert_eq!("linear".parse::<Accumulation>().unwrap(), Accumulation::Linear);
        assert_eq!("LOG".parse::<Accumulation>().unwrap(), Accumulation::Log);
        assert_eq!("log-odds".parse::<Accumulation>().unwrap(), Accumulation::Log);
        assert!("cubic".parse::<Accumulation>().is_err());
    }

    #[test]
    fn accumulation_serde_lowercase() {
        let config = ClassifierConfig::from_json(
            r#"{"classification": {"accumulation": "log", "ignore_prior_odds": true}}"#,
        )
        .unwrap();
        assert_eq!(config.classification.accumulation, Accumulation::Log);
        assert!(config.classification.ignore_prior_odds);
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = ClassifierConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ValidationError::ParseError(_)));
    }

    #[test]
    fn smoothing_display() {
        assert_eq!(Smoothing::None.to_string(), "none");
        let a = LidstoneCoefficient::new(0.5).unwrap();
        assert_eq!(Smoothing::Lidstone(a).to_string(), "lidstone(0.5)");
    }
}
