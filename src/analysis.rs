//! Combined per-unit analysis
//!
//! [`ComplexityEngine`] bundles a validated registry with the scoring
//! parameters of an [`EngineConfig`] and runs every analysis of one unit in
//! a single call. All analyses are pure; a batch is scored in parallel and
//! returned in input order.

use crate::canonical::{
    analyze_deviation_with, find_best_module_type_with, BestFit, DeviationResult,
};
use crate::config::{load_engine_config, ConfigResult, EngineConfig};
use crate::convergence::{ConvergenceAnalysis, ConvergenceRequest, Measurement};
use crate::models::{ComplexityLevel, ModuleType, Vector5D};
use crate::recommend::{recommend_refactoring, RefactoringRecommendation};
use crate::registry::Registry;
use crate::scoring::{decompose, Decomposition, TensorScore, TensorScorer};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, trace};

/// One unit as delivered by an extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitInput {
    /// Caller-side identifier, echoed in the result
    #[serde(default)]
    pub name: Option<String>,
    pub vector: Vector5D,
    #[serde(default)]
    pub module_hint: ModuleType,
    /// Earlier measurement of the same unit, for trend analysis
    #[serde(default)]
    pub previous: Option<Measurement>,
    /// Oscillation flag from the caller's iteration history
    #[serde(default)]
    pub oscillating: bool,
}

impl UnitInput {
    pub fn new(vector: Vector5D, module_hint: ModuleType) -> Self {
        Self {
            name: None,
            vector,
            module_hint,
            previous: None,
            oscillating: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_previous(mut self, previous: Measurement) -> Self {
        self.previous = Some(previous);
        self
    }

    pub fn with_oscillation(mut self, oscillating: bool) -> Self {
        self.oscillating = oscillating;
        self
    }
}

/// Every analysis of one unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub module_hint: ModuleType,
    /// Module type the analyses ran under
    pub module_type: ModuleType,
    pub best_fit: BestFit,
    pub tensor: TensorScore,
    pub level: ComplexityLevel,
    pub deviation: DeviationResult,
    pub decomposition: Decomposition,
    pub recommendations: Vec<RefactoringRecommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convergence: Option<ConvergenceAnalysis>,
}

/// Scoring engine with a fixed registry and parameters
#[derive(Debug, Clone)]
pub struct ComplexityEngine {
    registry: Registry,
    config: EngineConfig,
}

impl Default for ComplexityEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ComplexityEngine {
    /// Validate `config` and build its registry
    pub fn new(config: EngineConfig) -> ConfigResult<Self> {
        config.validate()?;
        let registry = Registry::from_config(&config)?;
        debug!(
            "Engine ready: epsilon={} threshold={} {} matrix and {} profile overrides",
            config.scoring.epsilon,
            config.scoring.threshold,
            config.matrices.len(),
            config.profiles.len()
        );
        Ok(Self { registry, config })
    }

    /// Shipped registry and default parameters
    pub fn builtin() -> Self {
        Self {
            registry: Registry::builtin().clone(),
            config: EngineConfig::default(),
        }
    }

    /// Engine configured from the config file in `dir`, if any
    pub fn from_dir(dir: &Path) -> ConfigResult<Self> {
        Self::new(load_engine_config(dir))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn weights(&self) -> Vector5D {
        self.config.scoring.weights.to_vector()
    }

    fn scorer(&self) -> TensorScorer<'_> {
        TensorScorer::new(&self.registry)
            .with_epsilon(self.config.scoring.epsilon)
            .with_weights(self.weights())
    }

    pub fn tensor_score(&self, v: &Vector5D, module_type: ModuleType) -> TensorScore {
        self.scorer().calculate(v, module_type)
    }

    pub fn deviation(&self, v: &Vector5D, module_type: ModuleType) -> DeviationResult {
        analyze_deviation_with(&self.registry, v, module_type)
    }

    pub fn best_fit(&self, v: &Vector5D) -> BestFit {
        find_best_module_type_with(&self.registry, v)
    }

    pub fn decompose(&self, v: &Vector5D) -> Decomposition {
        decompose(v, &self.weights())
    }

    pub fn recommendations(&self, v: &Vector5D) -> Vec<RefactoringRecommendation> {
        recommend_refactoring(v, &self.weights())
    }

    /// Convergence request preloaded with the configured threshold and
    /// epsilon. The epsilon is passed as is, so zero stays literal.
    pub fn convergence_request(&self, score: f64) -> ConvergenceRequest {
        ConvergenceRequest::new(score)
            .threshold(self.config.scoring.threshold)
            .epsilon(self.config.scoring.epsilon)
    }

    /// Hint if known; otherwise the best fit when inference is enabled
    pub fn resolve_module_type(&self, hint: ModuleType, best_fit: &BestFit) -> ModuleType {
        if hint.is_known() {
            hint
        } else if self.config.inference.infer_unknown {
            best_fit.module_type
        } else {
            ModuleType::Unknown
        }
    }

    pub fn analyze(&self, input: &UnitInput) -> UnitAnalysis {
        let v = &input.vector;
        let best_fit = self.best_fit(v);
        let module_type = self.resolve_module_type(input.module_hint, &best_fit);

        let tensor = self.tensor_score(v, module_type);
        let level = tensor.level();
        let deviation = self.deviation(v, module_type);
        let decomposition = self.decompose(v);
        let recommendations = self.recommendations(v);

        let convergence = input.previous.map(|previous| {
            self.convergence_request(tensor.regularized)
                .trend(previous, *v)
                .oscillating(input.oscillating)
                .analyze()
        });

        debug!(
            "Analyzed {} as {} (hint {}): regularized={} zone={} status={}",
            input.name.as_deref().unwrap_or("<unnamed>"),
            module_type,
            input.module_hint,
            tensor.regularized,
            tensor.zone,
            deviation.status
        );
        trace!(
            "Best fit {} at {} (confidence {})",
            best_fit.module_type,
            best_fit.distance,
            best_fit.confidence
        );

        UnitAnalysis {
            name: input.name.clone(),
            module_hint: input.module_hint,
            module_type,
            best_fit,
            tensor,
            level,
            deviation,
            decomposition,
            recommendations,
            convergence,
        }
    }

    /// Analyze units in parallel; output order matches input order
    pub fn analyze_batch(&self, inputs: &[UnitInput]) -> Vec<UnitAnalysis> {
        debug!("Analyzing {} units", inputs.len());
        inputs.par_iter().map(|input| self.analyze(input)).collect()
    }
}
