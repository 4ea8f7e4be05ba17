//! Three-way split of the weighted score

use crate::linalg::round_to;
use crate::models::Vector5D;
use serde::{Deserialize, Serialize};

/// Minimum balanced share for a unit to count as harmonic
pub const HARMONIC_RATIO: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    /// Control and nesting
    pub algorithmic: f64,
    /// State and coupling
    pub architectural: f64,
    /// Async, which bridges both
    pub balanced: f64,
    pub total: f64,
    pub balance_ratio: f64,
    pub is_harmonic: bool,
}

pub fn decompose(v: &Vector5D, weights: &Vector5D) -> Decomposition {
    let algorithmic = v.control * weights.control + v.nesting * weights.nesting;
    let architectural = v.state * weights.state + v.coupling * weights.coupling;
    let balanced = v.async_ * weights.async_;

    let total = algorithmic + architectural + balanced;
    let balance_ratio = if total > 0.0 { balanced / total } else { 0.0 };

    Decomposition {
        algorithmic: round_to(algorithmic, 2),
        architectural: round_to(architectural, 2),
        balanced: round_to(balanced, 2),
        total: round_to(total, 2),
        balance_ratio: round_to(balance_ratio, 3),
        // unrounded on purpose: 0.2996 is not harmonic
        is_harmonic: balance_ratio >= HARMONIC_RATIO,
    }
}
