//! Semantic Complexity - dimensional complexity scoring engine
//!
//! Turns the 5-component structural vector of one code unit
//! (control, nesting, state, async, coupling) into risk classifications:
//! an interaction-aware tensor score, distance from the canonical profile
//! of its module type, a three-way score decomposition, and convergence
//! tracking across repeated measurements.
//!
//! Source parsing is not part of this crate. Extractors hand over a
//! [`Vector5D`] and a [`ModuleType`] hint; everything here is pure and
//! deterministic, with outputs rounded to fixed precision so that
//! independent implementations produce identical serialized results.
//!
//! ```
//! use semantic_complexity::{tensor_score, ModuleType, Vector5D, Zone, DEFAULT_WEIGHTS};
//!
//! let v = Vector5D::new(5.0, 3.0, 2.0, 1.0, 1.0);
//! let score = tensor_score(&v, ModuleType::Unknown, 2.0, &DEFAULT_WEIGHTS);
//! assert_eq!(score.raw_sum_ratio, 0.218);
//! assert_eq!(score.zone, Zone::Safe);
//! ```

pub mod analysis;
pub mod canonical;
pub mod config;
pub mod convergence;
pub mod linalg;
pub mod models;
pub mod recommend;
pub mod registry;
pub mod scoring;

pub use analysis::{ComplexityEngine, UnitAnalysis, UnitInput};
pub use canonical::{
    analyze_deviation, find_best_module_type, BestFit, DeviationResult, DeviationStatus,
};
pub use config::{load_engine_config, ConfigError, ConfigResult, EngineConfig};
pub use convergence::{
    analyze_convergence, convergence_score, estimate_lipschitz, ConvergenceAnalysis,
    ConvergenceRequest, ConvergenceStatus, IterationHistory, Measurement,
};
pub use linalg::Matrix5x5;
pub use models::{ComplexityLevel, Dimension, ModuleType, Vector5D};
pub use recommend::{recommend_refactoring, RefactoringRecommendation};
pub use registry::{matrix_for, profile_for, CanonicalBounds, Registry};
pub use scoring::{
    decompose, tensor_score, Decomposition, TensorScore, TensorScorer, Zone, DEFAULT_EPSILON,
    DEFAULT_THRESHOLD, DEFAULT_WEIGHTS,
};
