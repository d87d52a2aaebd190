//! odds-bayes core library.
//!
//! A Naive Bayes classifier expressed in odds form. Training examples of
//! discrete named features are counted into a [`CountStore`]; the store then
//! answers prior odds, per-feature likelihood ratios and the posterior odds
//! of every label for an unlabeled feature set.
//!
//! ```
//! use ob_core::{Feature, LabeledExample, PosteriorOptions, Trainer};
//!
//! let examples = vec![
//!     LabeledExample::new("spam".to_string(), vec![Feature::new("word", "prize")]),
//!     LabeledExample::new("ham".to_string(), vec![Feature::new("word", "lunch")]),
//!     LabeledExample::new("ham".to_string(), vec![Feature::new("word", "lunch")]),
//! ];
//! let store = Trainer::new().train(&examples);
//! let result = store
//!     .posterior_odds(&[Feature::new("word", "lunch")], &PosteriorOptions::new())
//!     .unwrap();
//! assert_eq!(result.max_label, "ham");
//! ```

pub mod corpus;
pub mod dump;
pub mod error;
pub mod exit_codes;
pub mod feature;
pub mod label;
pub mod ledger;
pub mod likelihood;
pub mod logging;
pub mod odds;
pub mod posterior;
pub mod store;
pub mod train;

pub use dump::{dump, inspect, load, load_model, save_model, ModelDump};
pub use error::{Error, ErrorCategory, Result, StructuredError};
pub use feature::{Feature, FeatureName, FeatureValue, LabeledExample, PRIOR_ODDS_FEATURE};
pub use label::{Label, LabelCodec, LabelRegistry, StringLabels};
pub use ledger::{ClassificationReport, OddsDetails, OddsEntry};
pub use posterior::{LabelLikelihoods, LabelOdds, LikelihoodTerm, PosteriorOdds, PosteriorOptions};
pub use store::CountStore;
pub use train::Trainer;

pub use ob_config::{Accumulation, Smoothing};
