//! Convergence and trend analysis
//!
//! A score is judged against an ε-neighborhood below its threshold:
//!
//! ```text
//!   target = threshold - ε
//!   convergence_score = (score - target) / ε
//!
//!   < 0     safe       (below the neighborhood)
//!   [0, 1)  review     (inside the neighborhood)
//!   ≥ 1     violation  (at or above the threshold)
//! ```
//!
//! Between two measurements of the same unit, the local Lipschitz estimate
//! `|s₂ - s₁| / ‖v₂ - v₁‖` tells whether successive refactorings behave as
//! a contraction (< 1). Oscillation is a property of a longer history and
//! is supplied by the caller, typically from [`IterationHistory`].

mod history;

pub use history::{IterationHistory, DEFAULT_HISTORY_LIMIT};

use crate::linalg::{euclidean_distance, round_to};
use crate::models::Vector5D;
use crate::scoring::{DEFAULT_EPSILON, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vector distances below this are treated as "no movement"
pub const LIPSCHITZ_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConvergenceStatus {
    Safe,
    Review,
    Violation,
    Oscillating,
}

impl ConvergenceStatus {
    /// Oscillation overrides every score-based status
    pub fn classify(convergence_score: f64, is_oscillating: bool) -> ConvergenceStatus {
        if is_oscillating {
            ConvergenceStatus::Oscillating
        } else if convergence_score < 0.0 {
            ConvergenceStatus::Safe
        } else if convergence_score < 1.0 {
            ConvergenceStatus::Review
        } else {
            ConvergenceStatus::Violation
        }
    }
}

impl fmt::Display for ConvergenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvergenceStatus::Safe => write!(f, "safe"),
            ConvergenceStatus::Review => write!(f, "review"),
            ConvergenceStatus::Violation => write!(f, "violation"),
            ConvergenceStatus::Oscillating => write!(f, "oscillating"),
        }
    }
}

/// One earlier observation of a unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub vector: Vector5D,
    pub score: f64,
}

impl Measurement {
    pub fn new(vector: Vector5D, score: f64) -> Self {
        Self { vector, score }
    }
}

/// Convergence of one score.
///
/// `convergence_score` is `+∞` for a literal zero epsilon with the score
/// above threshold; JSON renders that as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceAnalysis {
    pub score: f64,
    pub threshold: f64,
    pub epsilon: f64,
    pub convergence_score: f64,
    pub status: ConvergenceStatus,
    pub distance_to_target: f64,
    pub distance_to_threshold: f64,
    pub lipschitz_estimate: f64,
}

impl ConvergenceAnalysis {
    /// `threshold - epsilon`
    pub fn target(&self) -> f64 {
        self.threshold - self.epsilon
    }

    pub fn is_converged(&self) -> bool {
        self.status == ConvergenceStatus::Safe
    }

    /// Contraction condition on the local slope
    pub fn can_converge(&self) -> bool {
        self.lipschitz_estimate < 1.0
    }
}

/// `(current - target) / epsilon`.
///
/// A literal zero epsilon is not replaced by a default here: the result is
/// `+∞` above the threshold and `0` otherwise.
pub fn convergence_score(current: f64, threshold: f64, epsilon: f64) -> f64 {
    let target = threshold - epsilon;
    if epsilon == 0.0 {
        return if current > target { f64::INFINITY } else { 0.0 };
    }
    (current - target) / epsilon
}

/// `|s₂ - s₁| / ‖v₂ - v₁‖`, or 0 when the vectors coincide
pub fn estimate_lipschitz(v1: &Vector5D, v2: &Vector5D, score1: f64, score2: f64) -> f64 {
    let distance = euclidean_distance(v1, v2);
    if distance < LIPSCHITZ_TOLERANCE {
        return 0.0;
    }
    (score1 - score2).abs() / distance
}

/// Inputs of a convergence analysis.
///
/// Threshold and epsilon fall back to 10.0 and 2.0 only when not set; an
/// explicit zero epsilon is used as is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceRequest {
    score: f64,
    threshold: Option<f64>,
    epsilon: Option<f64>,
    previous: Option<Measurement>,
    current_vector: Option<Vector5D>,
    is_oscillating: bool,
}

impl ConvergenceRequest {
    pub fn new(score: f64) -> Self {
        Self {
            score,
            threshold: None,
            epsilon: None,
            previous: None,
            current_vector: None,
            is_oscillating: false,
        }
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    /// Previous measurement and the vector the current score came from.
    /// Both are needed for a Lipschitz estimate.
    pub fn trend(mut self, previous: Measurement, current_vector: Vector5D) -> Self {
        self.previous = Some(previous);
        self.current_vector = Some(current_vector);
        self
    }

    pub fn oscillating(mut self, is_oscillating: bool) -> Self {
        self.is_oscillating = is_oscillating;
        self
    }

    /// Take the oscillation flag from a score history
    pub fn history(self, history: &IterationHistory) -> Self {
        self.oscillating(history.is_oscillating())
    }

    pub fn analyze(&self) -> ConvergenceAnalysis {
        analyze_convergence(self)
    }
}

pub fn analyze_convergence(request: &ConvergenceRequest) -> ConvergenceAnalysis {
    let score = request.score;
    let threshold = request.threshold.unwrap_or(DEFAULT_THRESHOLD);
    let epsilon = request.epsilon.unwrap_or(DEFAULT_EPSILON);

    let target = threshold - epsilon;
    let conv_score = convergence_score(score, threshold, epsilon);

    let lipschitz = match (request.previous, request.current_vector) {
        (Some(prev), Some(current)) => {
            estimate_lipschitz(&prev.vector, &current, prev.score, score)
        }
        _ => 0.0,
    };

    ConvergenceAnalysis {
        score,
        threshold,
        epsilon,
        convergence_score: round_to(conv_score, 3),
        status: ConvergenceStatus::classify(conv_score, request.is_oscillating),
        distance_to_target: round_to(score - target, 2),
        distance_to_threshold: round_to(threshold - score, 2),
        lipschitz_estimate: round_to(lipschitz, 3),
    }
}
