use crate::linalg::{mahalanobis_distance, round_to};
use crate::models::{ModuleType, Vector5D};
use crate::registry::Registry;
use serde::{Deserialize, Serialize};

/// Closest known module type for a vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestFit {
    pub module_type: ModuleType,
    /// Interaction-weighted distance to that type's centroid, rounded to 3
    pub distance: f64,
    /// `1 / (1 + distance)` on the rounded distance
    pub confidence: f64,
}

pub fn find_best_module_type(v: &Vector5D) -> BestFit {
    find_best_module_type_with(Registry::builtin(), v)
}

/// Scans known types in enumeration order; a tie keeps the earlier type.
pub fn find_best_module_type_with(registry: &Registry, v: &Vector5D) -> BestFit {
    let mut best: Option<(ModuleType, f64)> = None;

    for module_type in ModuleType::KNOWN {
        let centroid = registry.profile_for(module_type).centroid();
        let distance = mahalanobis_distance(v, &centroid, registry.matrix_for(module_type));
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((module_type, distance));
        }
    }

    // KNOWN is non-empty, so the scan always picks a candidate
    let (best_type, best_distance) = best.unwrap_or((ModuleType::Api, f64::INFINITY));
    let distance = round_to(best_distance, 3);
    BestFit {
        module_type: best_type,
        distance,
        confidence: round_to(1.0 / (1.0 + distance), 3),
    }
}
