//! Linear + quadratic + regularization score of one vector

use crate::linalg::{dot, norm, quadratic_form, round_to};
use crate::models::{ComplexityLevel, ModuleType, Vector5D};
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Default linear weights (control, nesting, state, async, coupling)
pub const DEFAULT_WEIGHTS: Vector5D = Vector5D::new(1.0, 1.5, 2.0, 2.5, 3.0);

/// Default regularization strength
pub const DEFAULT_EPSILON: f64 = 2.0;

/// Default convergence threshold
pub const DEFAULT_THRESHOLD: f64 = 10.0;

const QUADRATIC_SCALE: f64 = 0.1;
const REGULARIZATION_SCALE: f64 = 0.01;

// Regularized-score classification: threshold(10) - ε(2)
const SAFE_BELOW: f64 = 8.0;
const VIOLATION_AT: f64 = 10.0;

/// Raw-sum zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Safe,
    Review,
    Violation,
}

impl Zone {
    pub fn from_ratio(ratio: f64) -> Zone {
        if ratio < 0.7 {
            Zone::Safe
        } else if ratio < 1.0 {
            Zone::Review
        } else {
            Zone::Violation
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Safe => write!(f, "safe"),
            Zone::Review => write!(f, "review"),
            Zone::Violation => write!(f, "violation"),
        }
    }
}

/// Composite score of one vector under one module type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorScore {
    pub linear: f64,
    pub quadratic: f64,
    pub raw: f64,
    pub regularization: f64,
    pub regularized: f64,
    /// Effective epsilon after default substitution
    pub epsilon: f64,
    pub module_type: ModuleType,
    pub vector: Vector5D,
    pub raw_sum: f64,
    pub raw_sum_threshold: f64,
    pub raw_sum_ratio: f64,
    pub zone: Zone,
}

impl TensorScore {
    /// Regularized score below 8.0
    pub fn is_safe(&self) -> bool {
        self.regularized < SAFE_BELOW
    }

    /// Regularized score in [8.0, 10.0)
    pub fn needs_review(&self) -> bool {
        self.regularized >= SAFE_BELOW && self.regularized < VIOLATION_AT
    }

    /// Regularized score at or above 10.0
    pub fn is_violation(&self) -> bool {
        self.regularized >= VIOLATION_AT
    }

    pub fn level(&self) -> ComplexityLevel {
        ComplexityLevel::classify(self.regularized)
    }
}

/// Scores vectors against a registry with fixed epsilon and weights
#[derive(Debug, Clone, Copy)]
pub struct TensorScorer<'a> {
    registry: &'a Registry,
    epsilon: f64,
    weights: Vector5D,
}

impl<'a> TensorScorer<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            epsilon: DEFAULT_EPSILON,
            weights: DEFAULT_WEIGHTS,
        }
    }

    /// Zero is treated as "not supplied" and selects [`DEFAULT_EPSILON`]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = if epsilon == 0.0 { DEFAULT_EPSILON } else { epsilon };
        self
    }

    pub fn with_weights(mut self, weights: Vector5D) -> Self {
        self.weights = weights;
        self
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn calculate(&self, v: &Vector5D, module_type: ModuleType) -> TensorScore {
        let matrix = self.registry.matrix_for(module_type);

        let linear = dot(v, &self.weights);
        let quadratic = quadratic_form(v, matrix) * QUADRATIC_SCALE;
        let raw = linear + quadratic;

        let norm_squared = norm(v).powi(2);
        let regularization = self.epsilon * norm_squared * REGULARIZATION_SCALE;
        let regularized = raw + regularization;

        let sum = raw_sum(v);
        let threshold = self.registry.raw_sum_threshold(module_type);
        let ratio = if threshold > 0.0 { sum / threshold } else { 0.0 };
        let raw_sum_ratio = round_to(ratio, 3);

        trace!(
            "Tensor score for {}: linear={:.3} quadratic={:.3} reg={:.3} ratio={:.3}",
            module_type,
            linear,
            quadratic,
            regularization,
            ratio
        );

        TensorScore {
            linear: round_to(linear, 2),
            quadratic: round_to(quadratic, 2),
            raw: round_to(raw, 2),
            regularization: round_to(regularization, 2),
            regularized: round_to(regularized, 2),
            epsilon: self.epsilon,
            module_type,
            vector: *v,
            raw_sum: round_to(sum, 2),
            raw_sum_threshold: threshold,
            raw_sum_ratio,
            zone: Zone::from_ratio(raw_sum_ratio),
        }
    }
}

/// Tensor score against the shipped registry
pub fn tensor_score(
    v: &Vector5D,
    module_type: ModuleType,
    epsilon: f64,
    weights: &Vector5D,
) -> TensorScore {
    TensorScorer::new(Registry::builtin())
        .with_epsilon(epsilon)
        .with_weights(*weights)
        .calculate(v, module_type)
}

/// Σvᵢ, insensitive to weights and matrices
pub fn raw_sum(v: &Vector5D) -> f64 {
    v.control + v.nesting + v.state + v.async_ + v.coupling
}

/// Sum of the shipped profile's upper bounds
pub fn raw_sum_threshold(module_type: ModuleType) -> f64 {
    Registry::builtin().raw_sum_threshold(module_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(v: Vector5D, t: ModuleType) -> TensorScore {
        tensor_score(&v, t, DEFAULT_EPSILON, &DEFAULT_WEIGHTS)
    }

    #[test]
    fn test_reference_vector_unknown() {
        let s = score(Vector5D::new(5.0, 3.0, 2.0, 1.0, 1.0), ModuleType::Unknown);
        assert_eq!(s.linear, 19.0);
        assert_eq!(s.quadratic, 7.52);
        assert_eq!(s.raw, 26.52);
        assert_eq!(s.regularization, 0.8);
        assert_eq!(s.regularized, 27.32);
        assert_eq!(s.raw_sum, 12.0);
        assert_eq!(s.raw_sum_threshold, 55.0);
        assert_eq!(s.raw_sum_ratio, 0.218);
        assert_eq!(s.zone, Zone::Safe);
        assert_eq!(s.epsilon, 2.0);
    }

    #[test]
    fn test_module_type_changes_matrix_and_threshold() {
        let s = score(Vector5D::new(5.0, 3.0, 2.0, 1.0, 1.0), ModuleType::Api);
        assert_eq!(s.quadratic, 7.5);
        assert_eq!(s.regularized, 27.3);
        assert_eq!(s.raw_sum_threshold, 16.0);
        assert_eq!(s.raw_sum_ratio, 0.75);
        assert_eq!(s.zone, Zone::Review);
    }

    #[test]
    fn test_zero_epsilon_selects_default() {
        let v = Vector5D::new(5.0, 3.0, 2.0, 1.0, 1.0);
        let zero = tensor_score(&v, ModuleType::Unknown, 0.0, &DEFAULT_WEIGHTS);
        let two = tensor_score(&v, ModuleType::Unknown, 2.0, &DEFAULT_WEIGHTS);
        assert_eq!(zero, two);
        assert_eq!(zero.epsilon, 2.0);
    }

    #[test]
    fn test_regularized_strictly_increases_with_epsilon() {
        let v = Vector5D::new(5.0, 3.0, 2.0, 1.0, 1.0);
        let r: Vec<f64> = [1.0, 2.0, 5.0]
            .iter()
            .map(|&e| tensor_score(&v, ModuleType::Unknown, e, &DEFAULT_WEIGHTS).regularized)
            .collect();
        assert_eq!(r, vec![26.92, 27.32, 28.52]);
    }

    #[test]
    fn test_zero_vector() {
        let s = score(Vector5D::ZERO, ModuleType::Lib);
        assert_eq!(s.regularized, 0.0);
        assert_eq!(s.raw_sum_ratio, 0.0);
        assert_eq!(s.zone, Zone::Safe);
        assert!(s.is_safe());
        assert_eq!(s.level(), ComplexityLevel::Minimal);
    }

    #[test]
    fn test_zone_boundaries() {
        assert_eq!(Zone::from_ratio(0.5), Zone::Safe);
        assert_eq!(Zone::from_ratio(0.8), Zone::Review);
        assert_eq!(Zone::from_ratio(1.5), Zone::Violation);
        assert_eq!(Zone::from_ratio(0.7), Zone::Review);
        assert_eq!(Zone::from_ratio(1.0), Zone::Violation);
        assert_eq!(Zone::from_ratio(0.699), Zone::Safe);
    }

    #[test]
    fn test_zone_uses_rounded_ratio() {
        // 21 / 21.0001 rounds to 1.000 and lands in violation
        let mut registry_profile = crate::registry::builtin_profile(ModuleType::Lib);
        registry_profile.coupling = [0.0, 2.0001];
        let registry =
            Registry::with_overrides([], [(ModuleType::Lib, registry_profile)]).unwrap();
        let v = Vector5D::new(10.0, 5.0, 2.0, 2.0, 2.0);
        let s = TensorScorer::new(&registry).calculate(&v, ModuleType::Lib);
        assert_eq!(s.raw_sum_ratio, 1.0);
        assert_eq!(s.zone, Zone::Violation);
    }

    #[test]
    fn test_regularized_helpers() {
        let mut s = score(Vector5D::ZERO, ModuleType::Unknown);
        s.regularized = 7.99;
        assert!(s.is_safe() && !s.needs_review() && !s.is_violation());
        s.regularized = 8.0;
        assert!(!s.is_safe() && s.needs_review() && !s.is_violation());
        s.regularized = 10.0;
        assert!(!s.needs_review() && s.is_violation());
    }

    #[test]
    fn test_custom_weights() {
        let v = Vector5D::new(1.0, 1.0, 1.0, 1.0, 1.0);
        let s = tensor_score(&v, ModuleType::Deploy, 2.0, &Vector5D::splat(1.0));
        assert_eq!(s.linear, 5.0);
    }

    #[test]
    fn test_serialized_zone_and_async_field() {
        let s = score(Vector5D::new(2.0, 1.0, 0.0, 3.0, 4.0), ModuleType::Infra);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["zone"], "safe");
        assert_eq!(json["module_type"], "infra");
        assert_eq!(json["vector"]["async"], 3.0);
        assert_eq!(json["regularized"], 31.19);
    }
}
