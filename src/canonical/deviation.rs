use crate::linalg::{euclidean_distance, mahalanobis_distance, round_to};
use crate::models::{Dimension, ModuleType, Vector5D};
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mahalanobis distance that maps to a normalized deviation of 1.0
pub const NORMALIZATION_SCALE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviationStatus {
    /// Inside the module type's own profile
    Canonical,
    /// Outside its own profile but inside some other known one
    Deviated,
    /// Outside every known profile
    Orphan,
}

impl fmt::Display for DeviationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviationStatus::Canonical => write!(f, "canonical"),
            DeviationStatus::Deviated => write!(f, "deviated"),
            DeviationStatus::Orphan => write!(f, "orphan"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationResult {
    pub euclidean_distance: f64,
    pub mahalanobis_distance: f64,
    pub max_dimension_deviation: f64,
    /// Mahalanobis distance scaled into [0, 1]
    pub normalized_deviation: f64,
    pub is_canonical: bool,
    pub is_orphan: bool,
    pub module_type: ModuleType,
    pub vector: Vector5D,
    pub violation_dimensions: Vec<Dimension>,
    pub status: DeviationStatus,
}

/// Deviation from the shipped profile of `module_type`
pub fn analyze_deviation(v: &Vector5D, module_type: ModuleType) -> DeviationResult {
    analyze_deviation_with(Registry::builtin(), v, module_type)
}

pub fn analyze_deviation_with(
    registry: &Registry,
    v: &Vector5D,
    module_type: ModuleType,
) -> DeviationResult {
    let profile = registry.profile_for(module_type);
    let centroid = profile.centroid();
    let matrix = registry.matrix_for(module_type);

    let euclidean = euclidean_distance(v, &centroid);
    let mahalanobis = mahalanobis_distance(v, &centroid, matrix);

    let max_deviation = v
        .sub(&centroid)
        .to_array()
        .iter()
        .fold(0.0_f64, |max, d| if d.abs() > max { d.abs() } else { max });

    let normalized = (mahalanobis / NORMALIZATION_SCALE).min(1.0);

    let within_bounds = profile.contains(v);
    let is_orphan = registry.is_orphan(v);
    let status = match (within_bounds, is_orphan) {
        (true, _) => DeviationStatus::Canonical,
        (false, true) => DeviationStatus::Orphan,
        (false, false) => DeviationStatus::Deviated,
    };

    DeviationResult {
        euclidean_distance: round_to(euclidean, 3),
        mahalanobis_distance: round_to(mahalanobis, 3),
        max_dimension_deviation: round_to(max_deviation, 3),
        normalized_deviation: round_to(normalized, 3),
        is_canonical: within_bounds,
        is_orphan,
        module_type,
        vector: *v,
        violation_dimensions: profile.violation_dimensions(v),
        status,
    }
}
