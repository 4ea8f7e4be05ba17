//! Canonical-form analysis
//!
//! Every module type owns an admissible region (its canonical profile).
//! This module measures how far a vector sits from that region's centroid,
//! which dimensions break out of it, and which module type the vector fits
//! best when no reliable hint exists.
//!
//! Distances are interaction-weighted: the Mahalanobis-style distance uses
//! the module type's own matrix, so moving along strongly coupled
//! dimensions costs more than moving along independent ones.

mod best_fit;
mod deviation;

pub use best_fit::{find_best_module_type, find_best_module_type_with, BestFit};
pub use deviation::{
    analyze_deviation, analyze_deviation_with, DeviationResult, DeviationStatus,
    NORMALIZATION_SCALE,
};
