//! Error types for odds-bayes.
//!
//! Every failure is local and recoverable: callers are expected to surface
//! these as messages, never to treat them as invariant violations.
//!
//! Errors serialize to structured JSON for machine consumers:
//! ```json
//! {
//!   "code": 22,
//!   "category": "classification",
//!   "message": "all features are unknown",
//!   "recoverable": true
//! }
//! ```

use ob_config::ValidationError;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for odds-bayes operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Lookups against the trained model.
    Model,
    /// Prior/posterior odds evaluation.
    Classification,
    /// Model dump/load.
    Serialization,
    /// Classifier configuration.
    Config,
    /// File I/O.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Model => write!(f, "model"),
            ErrorCategory::Classification => write!(f, "classification"),
            ErrorCategory::Serialization => write!(f, "serialization"),
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for odds-bayes.
#[derive(Error, Debug)]
pub enum Error {
    // Model lookups (10-19)
    #[error("unknown label '{label}'")]
    UnknownLabel { label: String },

    #[error("no feature with name '{name}' and value '{value}'")]
    UnknownFeature { name: String, value: String },

    // Classification (20-29)
    #[error("infinite prior odds")]
    InfiniteOdds,

    #[error("at least 2 labels are required, found {found}")]
    TooFewLabels { found: usize },

    #[error("all features are unknown")]
    AllFeaturesUnknown,

    // Serialization (30-39)
    #[error("cannot decode model: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("malformed model: {0}")]
    MalformedModel(String),

    #[error("no label registered for identifier '{0}'")]
    UnknownLabelIdentifier(String),

    #[error("corpus line {line}: {source}")]
    CorpusLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("corpus line {line}: feature name '{name}' is reserved")]
    ReservedFeature { line: usize, name: String },

    // Configuration (40-49)
    #[error("configuration error: {0}")]
    Config(#[from] ValidationError),

    // I/O (60-69)
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn unknown_label(label: &impl std::fmt::Debug) -> Self {
        Error::UnknownLabel {
            label: label_text(label),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Model lookup errors
    /// - 20-29: Classification errors
    /// - 30-39: Serialization errors
    /// - 40-49: Configuration errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::UnknownLabel { .. } => 10,
            Error::UnknownFeature { .. } => 11,
            Error::InfiniteOdds => 20,
            Error::TooFewLabels { .. } => 21,
            Error::AllFeaturesUnknown => 22,
            Error::Decode(_) => 30,
            Error::MalformedModel(_) => 31,
            Error::UnknownLabelIdentifier(_) => 32,
            Error::CorpusLine { .. } => 33,
            Error::ReservedFeature { .. } => 34,
            Error::Config(_) => 40,
            Error::Io { .. } => 60,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::UnknownLabel { .. } | Error::UnknownFeature { .. } => ErrorCategory::Model,

            Error::InfiniteOdds | Error::TooFewLabels { .. } | Error::AllFeaturesUnknown => {
                ErrorCategory::Classification
            }

            Error::Decode(_)
            | Error::MalformedModel(_)
            | Error::UnknownLabelIdentifier(_)
            | Error::CorpusLine { .. }
            | Error::ReservedFeature { .. } => ErrorCategory::Serialization,

            Error::Config(_) => ErrorCategory::Config,
            Error::Io { .. } => ErrorCategory::Io,
        }
    }

    /// Returns whether this error is potentially recoverable.
    ///
    /// None of the classifier's failures leave shared state behind, so every
    /// error can be retried with different input.
    pub fn is_recoverable(&self) -> bool {
        true
    }

    /// Structured form for JSON output.
    pub fn to_structured(&self) -> StructuredError {
        StructuredError {
            code: self.code(),
            category: self.category(),
            message: self.to_string(),
            recoverable: self.is_recoverable(),
        }
    }
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct StructuredError {
    pub code: u32,
    pub category: ErrorCategory,
    pub message: String,
    pub recoverable: bool,
}

/// Render a label for error messages, dropping the quotes `Debug` puts
/// around strings.
fn label_text(label: &impl std::fmt::Debug) -> String {
    let text = format!("{:?}", label);
    match text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        Some(inner) => inner.to_string(),
        None => text,
    }
}
