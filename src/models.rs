//! Core data models for the scoring engine
//!
//! These models are shared by every analysis: the 5D structural vector
//! produced by an external extractor, the dimension names, and the coarse
//! module-type tag that selects which profiles and matrices apply.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One axis of the complexity space
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// C: branch points
    Control,
    /// N: depth penalty
    Nesting,
    /// S: state mutations
    State,
    /// A: async boundaries
    Async,
    /// Λ: hidden coupling
    Coupling,
}

impl Dimension {
    /// All dimensions in canonical order. Every ordered output follows this.
    pub const ALL: [Dimension; 5] = [
        Dimension::Control,
        Dimension::Nesting,
        Dimension::State,
        Dimension::Async,
        Dimension::Coupling,
    ];

    pub fn index(self) -> usize {
        match self {
            Dimension::Control => 0,
            Dimension::Nesting => 1,
            Dimension::State => 2,
            Dimension::Async => 3,
            Dimension::Coupling => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Control => "control",
            Dimension::Nesting => "nesting",
            Dimension::State => "state",
            Dimension::Async => "async",
            Dimension::Coupling => "coupling",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 5-dimensional complexity vector for one analyzed code unit.
///
/// Components are expected to be non-negative; enforcing that is the
/// extractor's job, not the engine's.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector5D {
    #[serde(default)]
    pub control: f64,
    #[serde(default)]
    pub nesting: f64,
    #[serde(default)]
    pub state: f64,
    #[serde(default, rename = "async")]
    pub async_: f64,
    #[serde(default)]
    pub coupling: f64,
}

impl Vector5D {
    pub const ZERO: Vector5D = Vector5D::new(0.0, 0.0, 0.0, 0.0, 0.0);

    pub const fn new(control: f64, nesting: f64, state: f64, async_: f64, coupling: f64) -> Self {
        Self {
            control,
            nesting,
            state,
            async_,
            coupling,
        }
    }

    /// Same value on every dimension
    pub const fn splat(value: f64) -> Self {
        Self::new(value, value, value, value, value)
    }

    pub const fn from_array(values: [f64; 5]) -> Self {
        Self::new(values[0], values[1], values[2], values[3], values[4])
    }

    pub const fn to_array(&self) -> [f64; 5] {
        [self.control, self.nesting, self.state, self.async_, self.coupling]
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        self.to_array()[dimension.index()]
    }

    /// Component-wise difference `self - other`
    pub fn sub(&self, other: &Vector5D) -> Vector5D {
        Vector5D::new(
            self.control - other.control,
            self.nesting - other.nesting,
            self.state - other.state,
            self.async_ - other.async_,
            self.coupling - other.coupling,
        )
    }

    pub fn is_zero(&self) -> bool {
        self.to_array().iter().all(|x| *x == 0.0)
    }
}

impl From<[f64; 5]> for Vector5D {
    fn from(values: [f64; 5]) -> Self {
        Self::from_array(values)
    }
}

/// Coarse architectural role of a module.
///
/// Parsing is total: any unrecognized name maps to [`ModuleType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    /// REST/GraphQL endpoints, thin controllers
    Api,
    /// Reusable library code, pure functions
    Lib,
    /// Application logic, stateful services
    App,
    /// Frontend, UI components
    Web,
    /// Models, entities, schemas
    Data,
    /// Repositories, DB access, external I/O
    Infra,
    /// Infrastructure scripts, configuration
    Deploy,
    #[default]
    Unknown,
}

impl ModuleType {
    /// Every module type, in enumeration order
    pub const ALL: [ModuleType; 8] = [
        ModuleType::Api,
        ModuleType::Lib,
        ModuleType::App,
        ModuleType::Web,
        ModuleType::Data,
        ModuleType::Infra,
        ModuleType::Deploy,
        ModuleType::Unknown,
    ];

    /// Every module type except `Unknown`, in enumeration order.
    /// Best-fit scans and orphan checks walk this list.
    pub const KNOWN: [ModuleType; 7] = [
        ModuleType::Api,
        ModuleType::Lib,
        ModuleType::App,
        ModuleType::Web,
        ModuleType::Data,
        ModuleType::Infra,
        ModuleType::Deploy,
    ];

    pub fn index(self) -> usize {
        match self {
            ModuleType::Api => 0,
            ModuleType::Lib => 1,
            ModuleType::App => 2,
            ModuleType::Web => 3,
            ModuleType::Data => 4,
            ModuleType::Infra => 5,
            ModuleType::Deploy => 6,
            ModuleType::Unknown => 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ModuleType::Api => "api",
            ModuleType::Lib => "lib",
            ModuleType::App => "app",
            ModuleType::Web => "web",
            ModuleType::Data => "data",
            ModuleType::Infra => "infra",
            ModuleType::Deploy => "deploy",
            ModuleType::Unknown => "unknown",
        }
    }

    /// Strict lookup, `None` for unrecognized names. Matching is exact:
    /// `"API"` or `" api"` are not module type names.
    pub fn lookup(name: &str) -> Option<ModuleType> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Total parse: unrecognized names fall back to `Unknown`
    pub fn parse(name: &str) -> ModuleType {
        Self::lookup(name).unwrap_or(ModuleType::Unknown)
    }

    pub fn is_known(self) -> bool {
        self != ModuleType::Unknown
    }
}

impl TryFrom<&[f64]> for Vector5D {
    type Error = std::array::TryFromSliceError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        <[f64; 5]>::try_from(values).map(Self::from_array)
    }
}

impl From<&str> for ModuleType {
    fn from(name: &str) -> Self {
        ModuleType::parse(name)
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ModuleType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ModuleType::parse(&name))
    }
}

/// Complexity classification of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    Minimal,
    Low,
    Medium,
    High,
    Extreme,
}

impl ComplexityLevel {
    pub fn classify(score: f64) -> ComplexityLevel {
        match score {
            s if s < 2.0 => ComplexityLevel::Minimal,
            s if s < 5.0 => ComplexityLevel::Low,
            s if s < 10.0 => ComplexityLevel::Medium,
            s if s < 20.0 => ComplexityLevel::High,
            _ => ComplexityLevel::Extreme,
        }
    }
}

impl fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplexityLevel::Minimal => write!(f, "minimal"),
            ComplexityLevel::Low => write!(f, "low"),
            ComplexityLevel::Medium => write!(f, "medium"),
            ComplexityLevel::High => write!(f, "high"),
            ComplexityLevel::Extreme => write!(f, "extreme"),
        }
    }
}
