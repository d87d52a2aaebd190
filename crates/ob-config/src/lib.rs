//! odds-bayes configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for classifier.json
//! - Whole-model smoothing and posterior accumulation settings
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation

pub mod classifier;
pub mod resolve;
pub mod validate;

pub use classifier::{
    Accumulation, ClassificationConfig, ClassifierConfig, LidstoneCoefficient, Smoothing,
    SmoothingConfig,
};
pub use resolve::{resolve_config_path, ConfigSource, ResolvedPath};
pub use validate::{validate_config, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
