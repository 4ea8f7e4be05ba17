//! Tensor Scoring and Score Decomposition
//!
//! This module turns a 5D complexity vector into a composite score that
//! accounts for dimension interactions, not just their sum.
//!
//! # Scoring Formula
//!
//! ```text
//! score(v) = wᵗv + 0.1 · vᵗMv + ε · ‖v‖² · 0.01
//!            ─┬─   ────┬────   ───────┬──────
//!          linear  quadratic   regularization
//!
//! Where:
//!   w = per-dimension weights (control, nesting, state, async, coupling)
//!   M = interaction matrix of the module type
//!   ε = regularization strength (0 selects the default, 2.0)
//! ```
//!
//! # Raw Sum Zone
//!
//! Independent of weights and matrices, the plain sum Σvᵢ is compared with
//! the sum of the module type's profile upper bounds:
//!
//! - **safe**: ratio < 0.7
//! - **review**: 0.7 ≤ ratio < 1.0
//! - **violation**: ratio ≥ 1.0
//!
//! # Decomposition
//!
//! The weighted score splits into three fixed parts:
//!
//! ```text
//! algorithmic   = control · w_c + nesting · w_n
//! architectural = state · w_s + coupling · w_Λ
//! balanced      = async · w_a
//! ```
//!
//! A unit is harmonic when at least 30% of its weighted score is balanced.

mod decomposition;
mod tensor;

pub use decomposition::{decompose, Decomposition, HARMONIC_RATIO};
pub use tensor::{
    raw_sum, raw_sum_threshold, tensor_score, TensorScore, TensorScorer, Zone, DEFAULT_EPSILON,
    DEFAULT_THRESHOLD, DEFAULT_WEIGHTS,
};
