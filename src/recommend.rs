//! Refactoring recommendations
//!
//! Ranks dimensions by their weighted contribution to the linear score and
//! proposes one canned action for each dimension that carries at least a
//! tenth of the total.

use crate::linalg::round_to;
use crate::models::{Dimension, Vector5D};
use serde::{Deserialize, Serialize};

/// Minimum share of the weighted total for a dimension to be recommended
pub const MIN_SHARE: f64 = 0.1;

/// Assumed reduction of a dimension's contribution after refactoring
pub const IMPACT_FACTOR: f64 = 0.3;

const MAX_PRIORITY: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefactoringRecommendation {
    pub dimension: Dimension,
    /// 1 to 5, higher is more urgent
    pub priority: u8,
    pub action: String,
    /// Estimated score reduction
    pub expected_impact: f64,
}

impl Dimension {
    /// Canned refactoring advice for this dimension
    pub fn action(self) -> &'static str {
        match self {
            Dimension::Control => "Extract complex conditionals into separate functions",
            Dimension::Nesting => "Flatten nested structures using early returns or guard clauses",
            Dimension::State => "Reduce state mutations; consider immutable patterns",
            Dimension::Async => "Simplify async flow; reduce callback nesting",
            Dimension::Coupling => "Extract dependencies; use dependency injection",
        }
    }
}

/// Recommendations ordered by weighted contribution, largest first.
/// Equal contributions keep dimension order.
pub fn recommend_refactoring(v: &Vector5D, weights: &Vector5D) -> Vec<RefactoringRecommendation> {
    let values = v.to_array();
    let w = weights.to_array();

    let mut weighted = [0.0; 5];
    let mut total = 0.0;
    for i in 0..5 {
        weighted[i] = values[i] * w[i];
        total += weighted[i];
    }

    if total == 0.0 {
        return Vec::new();
    }

    let mut contributions: Vec<(Dimension, f64)> = Dimension::ALL
        .iter()
        .map(|&d| (d, weighted[d.index()]))
        .collect();
    contributions.sort_by(|a, b| b.1.total_cmp(&a.1));

    contributions
        .into_iter()
        .filter_map(|(dimension, contribution)| {
            let share = contribution / total;
            if share < MIN_SHARE {
                return None;
            }
            let priority = ((share * 10.0).floor() + 1.0).min(f64::from(MAX_PRIORITY)) as u8;
            Some(RefactoringRecommendation {
                dimension,
                priority,
                action: dimension.action().to_string(),
                expected_impact: round_to(contribution * IMPACT_FACTOR, 2),
            })
        })
        .collect()
}
