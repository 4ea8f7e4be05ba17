//! Engine-level configuration support
//!
//! Loads engine configuration from `semantic-complexity.toml` or
//! `.semantic-complexity.json` in a given directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # semantic-complexity.toml
//!
//! [scoring]
//! epsilon = 2.0
//! threshold = 10.0
//! weights = { control = 1.0, nesting = 1.5, state = 2.0, async = 2.5, coupling = 3.0 }
//!
//! [matrices.lib]
//! rows = [
//!     [1.0, 0.2, 0.2, 0.2, 0.2],
//!     [0.2, 1.0, 0.2, 0.2, 0.2],
//!     [0.2, 0.2, 1.0, 0.2, 0.2],
//!     [0.2, 0.2, 0.2, 1.0, 0.2],
//!     [0.2, 0.2, 0.2, 0.2, 1.0],
//! ]
//!
//! [profiles.api]
//! control = [0.0, 6.0]  # other dimensions keep the shipped bounds
//!
//! [inference]
//! infer_unknown = true
//! ```

use super::{ConfigError, ConfigResult};
use crate::linalg::Matrix5x5;
use crate::models::{Dimension, ModuleType, Vector5D};
use crate::registry::{builtin_profile, CanonicalBounds};
use crate::scoring::{DEFAULT_EPSILON, DEFAULT_THRESHOLD, DEFAULT_WEIGHTS};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Preferred config file name
pub const CONFIG_FILE_TOML: &str = "semantic-complexity.toml";
/// Fallback config file name
pub const CONFIG_FILE_JSON: &str = ".semantic-complexity.json";

/// Engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Scoring parameters
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Interaction-matrix overrides keyed by module type name
    #[serde(default)]
    pub matrices: BTreeMap<String, MatrixOverride>,

    /// Canonical-profile overrides keyed by module type name
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileOverride>,

    /// Module-type inference for combined analysis
    #[serde(default)]
    pub inference: InferenceConfig,
}

/// Scoring parameters shared by every analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Regularization strength (default: 2.0). Zero means "use the default"
    /// in tensor scoring but is taken literally by convergence analysis.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    /// Convergence threshold (default: 10.0)
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Per-dimension weights
    #[serde(default)]
    pub weights: DimensionWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            threshold: default_threshold(),
            weights: DimensionWeights::default(),
        }
    }
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}
fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// Weights for each of the five dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionWeights {
    /// Weight for control (default: 1.0)
    #[serde(default = "default_control_weight")]
    pub control: f64,

    /// Weight for nesting (default: 1.5)
    #[serde(default = "default_nesting_weight")]
    pub nesting: f64,

    /// Weight for state (default: 2.0)
    #[serde(default = "default_state_weight")]
    pub state: f64,

    /// Weight for async (default: 2.5)
    #[serde(default = "default_async_weight", rename = "async")]
    pub async_: f64,

    /// Weight for coupling (default: 3.0)
    #[serde(default = "default_coupling_weight")]
    pub coupling: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            control: default_control_weight(),
            nesting: default_nesting_weight(),
            state: default_state_weight(),
            async_: default_async_weight(),
            coupling: default_coupling_weight(),
        }
    }
}

fn default_control_weight() -> f64 {
    DEFAULT_WEIGHTS.control
}
fn default_nesting_weight() -> f64 {
    DEFAULT_WEIGHTS.nesting
}
fn default_state_weight() -> f64 {
    DEFAULT_WEIGHTS.state
}
fn default_async_weight() -> f64 {
    DEFAULT_WEIGHTS.async_
}
fn default_coupling_weight() -> f64 {
    DEFAULT_WEIGHTS.coupling
}

impl DimensionWeights {
    pub fn to_vector(&self) -> Vector5D {
        Vector5D::new(self.control, self.nesting, self.state, self.async_, self.coupling)
    }

    /// All weights finite and non-negative
    pub fn is_valid(&self) -> bool {
        self.first_invalid().is_none()
    }

    fn first_invalid(&self) -> Option<(Dimension, f64)> {
        let weights = self.to_vector();
        Dimension::ALL
            .into_iter()
            .map(|d| (d, weights.get(d)))
            .find(|(_, w)| !w.is_finite() || *w < 0.0)
    }
}

impl From<DimensionWeights> for Vector5D {
    fn from(weights: DimensionWeights) -> Self {
        weights.to_vector()
    }
}

/// Full replacement of one module type's interaction matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixOverride {
    pub rows: Matrix5x5,
}

/// Partial replacement of one module type's canonical profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileOverride {
    #[serde(default)]
    pub control: Option<[f64; 2]>,
    #[serde(default)]
    pub nesting: Option<[f64; 2]>,
    #[serde(default)]
    pub state: Option<[f64; 2]>,
    #[serde(default, rename = "async")]
    pub async_: Option<[f64; 2]>,
    #[serde(default)]
    pub coupling: Option<[f64; 2]>,
}

impl ProfileOverride {
    /// Overlay the configured intervals on `base`
    pub fn apply(&self, base: CanonicalBounds) -> CanonicalBounds {
        CanonicalBounds {
            control: self.control.unwrap_or(base.control),
            nesting: self.nesting.unwrap_or(base.nesting),
            state: self.state.unwrap_or(base.state),
            async_: self.async_.unwrap_or(base.async_),
            coupling: self.coupling.unwrap_or(base.coupling),
        }
    }
}

/// Module-type inference settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Use the best-fit module type when a unit's hint is `unknown`
    /// (default: true)
    #[serde(default = "default_infer_unknown")]
    pub infer_unknown: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            infer_unknown: default_infer_unknown(),
        }
    }
}

fn default_infer_unknown() -> bool {
    true
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check scalar parameters and module type names.
    ///
    /// Matrix and profile contents are checked when the registry is built.
    pub fn validate(&self) -> ConfigResult<()> {
        let epsilon = self.scoring.epsilon;
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(ConfigError::InvalidEpsilon(epsilon));
        }

        let threshold = self.scoring.threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ConfigError::InvalidThreshold(threshold));
        }

        if let Some((dimension, value)) = self.scoring.weights.first_invalid() {
            return Err(ConfigError::InvalidWeight { dimension, value });
        }

        for name in self.matrices.keys().chain(self.profiles.keys()) {
            resolve_module_type(name)?;
        }

        Ok(())
    }

    /// Configured matrices, resolved to module types
    pub fn matrix_overrides(&self) -> ConfigResult<Vec<(ModuleType, Matrix5x5)>> {
        self.matrices
            .iter()
            .map(|(name, o)| resolve_module_type(name).map(|t| (t, o.rows)))
            .collect()
    }

    /// Configured profiles, overlaid on the shipped ones
    pub fn profile_overrides(&self) -> ConfigResult<Vec<(ModuleType, CanonicalBounds)>> {
        self.profiles
            .iter()
            .map(|(name, o)| {
                resolve_module_type(name).map(|t| (t, o.apply(builtin_profile(t))))
            })
            .collect()
    }
}

/// Config keys are strict: a typo must not silently fall back to `unknown`
fn resolve_module_type(name: &str) -> ConfigResult<ModuleType> {
    ModuleType::lookup(name).ok_or_else(|| ConfigError::UnknownModuleType(name.to_string()))
}

/// Load engine configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `semantic-complexity.toml`
/// 2. `.semantic-complexity.json`
///
/// Returns default configuration if no config file is found or if the
/// file found cannot be loaded.
pub fn load_engine_config(dir: &Path) -> EngineConfig {
    let toml_path = dir.join(CONFIG_FILE_TOML);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded engine config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", toml_path.display(), e);
            }
        }
    }

    let json_path = dir.join(CONFIG_FILE_JSON);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded engine config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", json_path.display(), e);
            }
        }
    }

    debug!("No engine config found, using defaults");
    EngineConfig::default()
}

fn load_toml_config(path: &Path) -> anyhow::Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(EngineConfig::from_toml_str(&content)?)
}

fn load_json_config(path: &Path) -> anyhow::Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(EngineConfig::from_json_str(&content)?)
}
