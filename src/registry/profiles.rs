//! Canonical profiles: the admissible region of each module type

use crate::models::{Dimension, ModuleType, Vector5D};
use serde::{Deserialize, Serialize};

/// Per-dimension closed intervals `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanonicalBounds {
    pub control: [f64; 2],
    pub nesting: [f64; 2],
    pub state: [f64; 2],
    #[serde(rename = "async")]
    pub async_: [f64; 2],
    pub coupling: [f64; 2],
}

impl CanonicalBounds {
    /// Profile with every lower bound at zero
    pub const fn upper(control: f64, nesting: f64, state: f64, async_: f64, coupling: f64) -> Self {
        Self {
            control: [0.0, control],
            nesting: [0.0, nesting],
            state: [0.0, state],
            async_: [0.0, async_],
            coupling: [0.0, coupling],
        }
    }

    pub fn bounds(&self, dimension: Dimension) -> [f64; 2] {
        match dimension {
            Dimension::Control => self.control,
            Dimension::Nesting => self.nesting,
            Dimension::State => self.state,
            Dimension::Async => self.async_,
            Dimension::Coupling => self.coupling,
        }
    }

    /// Per-dimension midpoint
    pub fn centroid(&self) -> Vector5D {
        let mid = |b: [f64; 2]| (b[0] + b[1]) / 2.0;
        Vector5D::new(
            mid(self.control),
            mid(self.nesting),
            mid(self.state),
            mid(self.async_),
            mid(self.coupling),
        )
    }

    /// Inclusive on both ends: a vector on the boundary is canonical
    pub fn contains(&self, v: &Vector5D) -> bool {
        Dimension::ALL.iter().all(|&d| {
            let [min, max] = self.bounds(d);
            let value = v.get(d);
            value >= min && value <= max
        })
    }

    /// Dimensions outside their interval, in canonical dimension order
    pub fn violation_dimensions(&self, v: &Vector5D) -> Vec<Dimension> {
        Dimension::ALL
            .iter()
            .copied()
            .filter(|&d| {
                let [min, max] = self.bounds(d);
                let value = v.get(d);
                value < min || value > max
            })
            .collect()
    }

    /// Sum of upper bounds, the raw-sum threshold of this profile
    pub fn upper_sum(&self) -> f64 {
        self.control[1] + self.nesting[1] + self.state[1] + self.async_[1] + self.coupling[1]
    }
}

// thin controllers, stateless
const API_PROFILE: CanonicalBounds = CanonicalBounds::upper(5.0, 3.0, 2.0, 3.0, 3.0);
// algorithmic ok, pure
const LIB_PROFILE: CanonicalBounds = CanonicalBounds::upper(10.0, 5.0, 2.0, 2.0, 2.0);
// stateful workflows ok
const APP_PROFILE: CanonicalBounds = CanonicalBounds::upper(10.0, 5.0, 8.0, 8.0, 5.0);
// component hierarchy
const WEB_PROFILE: CanonicalBounds = CanonicalBounds::upper(8.0, 10.0, 5.0, 5.0, 3.0);
// entity fields, ORM
const DATA_PROFILE: CanonicalBounds = CanonicalBounds::upper(3.0, 2.0, 10.0, 2.0, 5.0);
// DB I/O, external deps
const INFRA_PROFILE: CanonicalBounds = CanonicalBounds::upper(5.0, 3.0, 2.0, 8.0, 8.0);
// idempotent scripts
const DEPLOY_PROFILE: CanonicalBounds = CanonicalBounds::upper(3.0, 2.0, 2.0, 2.0, 3.0);
// permissive
const UNKNOWN_PROFILE: CanonicalBounds = CanonicalBounds::upper(15.0, 10.0, 10.0, 10.0, 10.0);

/// Shipped profile for a module type
pub fn builtin_profile(module_type: ModuleType) -> CanonicalBounds {
    match module_type {
        ModuleType::Api => API_PROFILE,
        ModuleType::Lib => LIB_PROFILE,
        ModuleType::App => APP_PROFILE,
        ModuleType::Web => WEB_PROFILE,
        ModuleType::Data => DATA_PROFILE,
        ModuleType::Infra => INFRA_PROFILE,
        ModuleType::Deploy => DEPLOY_PROFILE,
        ModuleType::Unknown => UNKNOWN_PROFILE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centroid_is_midpoint() {
        let c = builtin_profile(ModuleType::Web).centroid();
        assert_eq!(c, Vector5D::new(4.0, 5.0, 2.5, 2.5, 1.5));
    }

    #[test]
    fn test_violations_keep_dimension_order() {
        let profile = builtin_profile(ModuleType::Api);
        // coupling exceeds by far more than control, order must not change
        let v = Vector5D::new(6.0, 0.0, 0.0, 0.0, 50.0);
        assert_eq!(
            profile.violation_dimensions(&v),
            vec![Dimension::Control, Dimension::Coupling]
        );
    }

    #[test]
    fn test_upper_bound_is_canonical() {
        for t in ModuleType::ALL {
            let p = builtin_profile(t);
            let at_upper =
                Vector5D::new(p.control[1], p.nesting[1], p.state[1], p.async_[1], p.coupling[1]);
            assert!(p.contains(&at_upper), "{t} upper bound should be canonical");
            assert!(p.violation_dimensions(&at_upper).is_empty());
        }
    }

    #[test]
    fn test_upper_sum() {
        assert_eq!(builtin_profile(ModuleType::Unknown).upper_sum(), 55.0);
        assert_eq!(builtin_profile(ModuleType::Api).upper_sum(), 16.0);
    }
}
