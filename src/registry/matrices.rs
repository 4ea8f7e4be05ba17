//! Shipped interaction matrices
//!
//! Downstream thresholds were tuned against these exact values. Do not
//! "fix" entries to force diagonal dominance.

use crate::linalg::Matrix5x5;
use crate::models::ModuleType;

/// Default interaction matrix, also used for `unknown`
pub const DEFAULT_MATRIX: Matrix5x5 = Matrix5x5([
    //  C    N    S    A    Λ
    [1.0, 0.3, 0.2, 0.2, 0.3], // Control
    [0.3, 1.0, 0.4, 0.8, 0.2], // Nesting × Async ↑
    [0.2, 0.4, 1.0, 0.5, 0.9], // State × Coupling ↑↑
    [0.2, 0.8, 0.5, 1.0, 0.4], // Async × Nesting ↑
    [0.3, 0.2, 0.9, 0.4, 1.0], // Coupling × State ↑↑
]);

// Coupling interactions are critical
const API_MATRIX: Matrix5x5 = Matrix5x5([
    [1.0, 0.2, 0.3, 0.2, 0.4],
    [0.2, 1.0, 0.3, 0.6, 0.2],
    [0.3, 0.3, 1.0, 0.4, 1.5], // State × Coupling ↑↑↑
    [0.2, 0.6, 0.4, 1.0, 0.5],
    [0.4, 0.2, 1.5, 0.5, 1.0],
]);

// Control/Nesting interactions matter most
const LIB_MATRIX: Matrix5x5 = Matrix5x5([
    [1.0, 1.2, 0.2, 0.2, 0.2], // Control × Nesting ↑
    [1.2, 1.0, 0.3, 0.5, 0.2],
    [0.2, 0.3, 1.0, 0.3, 0.6],
    [0.2, 0.5, 0.3, 1.0, 0.3],
    [0.2, 0.2, 0.6, 0.3, 1.0],
]);

// State/Async interactions are critical
const APP_MATRIX: Matrix5x5 = Matrix5x5([
    [1.0, 0.3, 0.3, 0.3, 0.3],
    [0.3, 1.0, 0.5, 0.9, 0.2], // Nesting × Async ↑
    [0.3, 0.5, 1.0, 1.3, 0.7], // State × Async ↑↑
    [0.3, 0.9, 1.3, 1.0, 0.4],
    [0.3, 0.2, 0.7, 0.4, 1.0],
]);

// Component hierarchy: nesting self-weight raised
const WEB_MATRIX: Matrix5x5 = Matrix5x5([
    [1.0, 0.5, 0.2, 0.4, 0.2],
    [0.5, 1.5, 0.3, 0.6, 0.2],
    [0.2, 0.3, 1.0, 0.3, 0.5],
    [0.4, 0.6, 0.3, 1.0, 0.3],
    [0.2, 0.2, 0.5, 0.3, 1.0],
]);

// Entity definitions: state self-weight raised
const DATA_MATRIX: Matrix5x5 = Matrix5x5([
    [1.0, 0.2, 0.3, 0.1, 0.4],
    [0.2, 1.0, 0.2, 0.1, 0.2],
    [0.3, 0.2, 1.5, 0.2, 0.8], // State × Coupling ↑
    [0.1, 0.1, 0.2, 1.0, 0.2],
    [0.4, 0.2, 0.8, 0.2, 1.0],
]);

// DB/IO: async and coupling self-weights raised
const INFRA_MATRIX: Matrix5x5 = Matrix5x5([
    [1.0, 0.2, 0.2, 0.3, 0.4],
    [0.2, 1.0, 0.2, 0.3, 0.2],
    [0.2, 0.2, 1.0, 0.4, 0.6],
    [0.3, 0.3, 0.4, 1.5, 0.8], // Async × Coupling ↑
    [0.4, 0.2, 0.6, 0.8, 1.5],
]);

// All interactions minimal
const DEPLOY_MATRIX: Matrix5x5 = Matrix5x5([
    [1.0, 0.1, 0.1, 0.1, 0.2],
    [0.1, 1.0, 0.1, 0.1, 0.1],
    [0.1, 0.1, 1.0, 0.1, 0.3],
    [0.1, 0.1, 0.1, 1.0, 0.2],
    [0.2, 0.1, 0.3, 0.2, 1.0],
]);

/// Shipped matrix for a module type
pub fn builtin_matrix(module_type: ModuleType) -> Matrix5x5 {
    match module_type {
        ModuleType::Api => API_MATRIX,
        ModuleType::Lib => LIB_MATRIX,
        ModuleType::App => APP_MATRIX,
        ModuleType::Web => WEB_MATRIX,
        ModuleType::Data => DATA_MATRIX,
        ModuleType::Infra => INFRA_MATRIX,
        ModuleType::Deploy => DEPLOY_MATRIX,
        ModuleType::Unknown => DEFAULT_MATRIX,
    }
}
