//! Configuration module for the scoring engine
//!
//! This module handles:
//! - Engine-level configuration (semantic-complexity.toml)
//! - Scoring overrides (epsilon, threshold, dimension weights)
//! - Interaction-matrix and canonical-profile overrides
//! - Validation errors reported at construction time

mod engine_config;

pub use engine_config::{
    load_engine_config, DimensionWeights, EngineConfig, InferenceConfig, MatrixOverride,
    ProfileOverride, ScoringConfig, CONFIG_FILE_JSON, CONFIG_FILE_TOML,
};

use crate::models::{Dimension, ModuleType};
use thiserror::Error;

/// Errors raised while building an engine from configuration.
///
/// Scoring itself never fails; only configuration can be wrong.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown module type in config: {0:?}")]
    UnknownModuleType(String),

    #[error("Matrix for {module_type} has a non-finite entry at [{row}][{col}]")]
    NonFiniteEntry {
        module_type: ModuleType,
        row: usize,
        col: usize,
    },

    #[error("Matrix for {module_type} is not symmetric at [{row}][{col}]")]
    AsymmetricMatrix {
        module_type: ModuleType,
        row: usize,
        col: usize,
    },

    #[error("Matrix for {module_type} has non-positive diagonal entry {value} at index {index}")]
    NonPositiveDiagonal {
        module_type: ModuleType,
        index: usize,
        value: f64,
    },

    #[error("Profile for {module_type} has invalid {dimension} bounds [{min}, {max}]")]
    InvalidBounds {
        module_type: ModuleType,
        dimension: Dimension,
        min: f64,
        max: f64,
    },

    #[error("Weight for {dimension} must be finite and non-negative, got {value}")]
    InvalidWeight { dimension: Dimension, value: f64 },

    #[error("Epsilon must be finite and non-negative, got {0}")]
    InvalidEpsilon(f64),

    #[error("Threshold must be finite and positive, got {0}")]
    InvalidThreshold(f64),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
