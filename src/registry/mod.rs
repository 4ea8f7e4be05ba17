//! Interaction-matrix and canonical-profile registry
//!
//! A closed lookup from [`ModuleType`] to data: no module type overrides
//! behavior, only the matrix and profile it selects. Lookups never fail;
//! anything unrecognized resolves to the `unknown` entry.
//!
//! The shipped registry is a process-wide constant initialized once and
//! shared without locking. Custom registries are built from configuration
//! and validated at construction time.

mod matrices;
mod profiles;

pub use matrices::{builtin_matrix, DEFAULT_MATRIX};
pub use profiles::{builtin_profile, CanonicalBounds};

use crate::config::{ConfigError, ConfigResult, EngineConfig};
use crate::linalg::Matrix5x5;
use crate::models::{Dimension, ModuleType, Vector5D};
use std::sync::OnceLock;
use tracing::warn;

static BUILTIN_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Matrices and profiles for every module type
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    matrices: [Matrix5x5; 8],
    profiles: [CanonicalBounds; 8],
}

impl Registry {
    /// The shipped registry
    pub fn builtin() -> &'static Registry {
        BUILTIN_REGISTRY.get_or_init(Registry::shipped)
    }

    fn shipped() -> Registry {
        Registry {
            matrices: ModuleType::ALL.map(builtin_matrix),
            profiles: ModuleType::ALL.map(builtin_profile),
        }
    }

    /// Shipped data with per-module-type replacements applied.
    ///
    /// Every replacement is validated; a matrix that is valid but not
    /// diagonally dominant is accepted with a warning, like the shipped ones.
    pub fn with_overrides<M, P>(matrices: M, profiles: P) -> ConfigResult<Registry>
    where
        M: IntoIterator<Item = (ModuleType, Matrix5x5)>,
        P: IntoIterator<Item = (ModuleType, CanonicalBounds)>,
    {
        let mut registry = Registry::shipped();

        for (module_type, matrix) in matrices {
            validate_matrix(module_type, &matrix)?;
            if !matrix.is_diagonally_dominant() {
                warn!(
                    "Configured matrix for {} is not diagonally dominant; PSD is not guaranteed",
                    module_type
                );
            }
            registry.matrices[module_type.index()] = matrix;
        }

        for (module_type, profile) in profiles {
            validate_profile(module_type, &profile)?;
            registry.profiles[module_type.index()] = profile;
        }

        Ok(registry)
    }

    /// Registry with the overrides of `config` applied
    pub fn from_config(config: &EngineConfig) -> ConfigResult<Registry> {
        Registry::with_overrides(config.matrix_overrides()?, config.profile_overrides()?)
    }

    pub fn matrix_for(&self, module_type: ModuleType) -> &Matrix5x5 {
        &self.matrices[module_type.index()]
    }

    pub fn profile_for(&self, module_type: ModuleType) -> &CanonicalBounds {
        &self.profiles[module_type.index()]
    }

    /// Lookup by free-form name, falling back to `unknown`
    pub fn matrix_for_name(&self, name: &str) -> &Matrix5x5 {
        self.matrix_for(ModuleType::parse(name))
    }

    /// Lookup by free-form name, falling back to `unknown`
    pub fn profile_for_name(&self, name: &str) -> &CanonicalBounds {
        self.profile_for(ModuleType::parse(name))
    }

    /// Sum of the profile's upper bounds
    pub fn raw_sum_threshold(&self, module_type: ModuleType) -> f64 {
        self.profile_for(module_type).upper_sum()
    }

    /// True if `v` lies outside the region of every known module type.
    /// The permissive `unknown` profile does not count.
    pub fn is_orphan(&self, v: &Vector5D) -> bool {
        !ModuleType::KNOWN
            .iter()
            .any(|&t| self.profile_for(t).contains(v))
    }

    /// Hard checks on every entry: finite, symmetric matrices with a
    /// positive diagonal, and ordered finite profile bounds.
    pub fn validate(&self) -> ConfigResult<()> {
        for module_type in ModuleType::ALL {
            validate_matrix(module_type, self.matrix_for(module_type))?;
            validate_profile(module_type, self.profile_for(module_type))?;
        }
        Ok(())
    }

    /// Diagonal-dominance status of each module type's matrix
    pub fn dominance_report(&self) -> Vec<(ModuleType, bool)> {
        ModuleType::ALL
            .iter()
            .map(|&t| (t, self.matrix_for(t).is_diagonally_dominant()))
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::builtin().clone()
    }
}

/// Shipped matrix lookup
pub fn matrix_for(module_type: ModuleType) -> &'static Matrix5x5 {
    Registry::builtin().matrix_for(module_type)
}

/// Shipped profile lookup
pub fn profile_for(module_type: ModuleType) -> &'static CanonicalBounds {
    Registry::builtin().profile_for(module_type)
}

fn validate_matrix(module_type: ModuleType, matrix: &Matrix5x5) -> ConfigResult<()> {
    for (row, values) in matrix.rows().iter().enumerate() {
        if let Some(col) = values.iter().position(|x| !x.is_finite()) {
            return Err(ConfigError::NonFiniteEntry {
                module_type,
                row,
                col,
            });
        }
    }

    if let Some((row, col)) = matrix.asymmetry() {
        return Err(ConfigError::AsymmetricMatrix {
            module_type,
            row,
            col,
        });
    }

    for (index, value) in matrix.diagonal().into_iter().enumerate() {
        if value <= 0.0 {
            return Err(ConfigError::NonPositiveDiagonal {
                module_type,
                index,
                value,
            });
        }
    }

    Ok(())
}

fn validate_profile(module_type: ModuleType, profile: &CanonicalBounds) -> ConfigResult<()> {
    for dimension in Dimension::ALL {
        let [min, max] = profile.bounds(dimension);
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ConfigError::InvalidBounds {
                module_type,
                dimension,
                min,
                max,
            });
        }
    }
    Ok(())
}
